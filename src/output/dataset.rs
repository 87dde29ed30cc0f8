//! CSV dataset writer

use crate::output::OutputResult;
use crate::state::ItemRecord;
use std::path::Path;

/// Header row of the dataset, in column order
pub const DATASET_HEADER: [&str; 5] = ["Categoria", "Título", "Preço", "Link", "Avaliação"];

/// Writes one row per item to a UTF-8, comma-delimited file
///
/// The header row comes from the serde field names of [`ItemRecord`]. An
/// empty item list still produces the header; the coordinator never persists
/// an empty run, so that case serves library callers only.
///
/// # Arguments
///
/// * `items` - Records in the order they were collected
/// * `path` - Destination file, created or truncated
pub fn write_dataset(items: &[ItemRecord], path: &Path) -> OutputResult<()> {
    let mut writer = csv::Writer::from_path(path)?;

    if items.is_empty() {
        writer.write_record(DATASET_HEADER)?;
    }

    for item in items {
        writer.serialize(item)?;
    }

    writer.flush()?;
    tracing::info!("{} rows saved to '{}'", items.len(), path.display());
    Ok(())
}
