//! Per-category item count report

use crate::output::OutputResult;
use crate::state::ItemRecord;
use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

const REPORT_HEADER: &str = "=== RELATORIO DE LIVROS POR CATEGORIA ===";
const REPORT_FOOTER: &str = "=========================================";

/// Number of items collected for one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub name: String,
    pub count: usize,
}

/// Counts items per category
///
/// Sorted by descending count, then by name. Categories that contributed no
/// items do not appear.
pub fn count_by_category(items: &[ItemRecord]) -> Vec<CategoryCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for item in items {
        *counts.entry(item.category.as_str()).or_insert(0) += 1;
    }

    let mut counts: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(name, count)| CategoryCount {
            name: name.to_string(),
            count,
        })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    counts
}

/// Formats the category report
///
/// One line per category, `<name right-aligned to 25>: <count> livros`, then
/// the total, all enclosed by a fixed header and footer.
pub fn format_category_report(counts: &[CategoryCount]) -> String {
    let mut report = String::new();
    report.push_str(REPORT_HEADER);
    report.push('\n');

    for entry in counts {
        report.push_str(&format!("{:>25}: {} livros\n", entry.name, entry.count));
    }

    let total: usize = counts.iter().map(|c| c.count).sum();
    report.push_str(&format!(
        "TOTAL: {} livros em {} categorias\n",
        total,
        counts.len()
    ));

    report.push_str(REPORT_FOOTER);
    report.push('\n');
    report
}

/// Writes the category report to `path` and emits it as a log entry
pub fn write_category_report(counts: &[CategoryCount], path: &Path) -> OutputResult<()> {
    let report = format_category_report(counts);

    let mut file = File::create(path)?;
    file.write_all(report.as_bytes())?;

    tracing::info!("\n{}", report);
    Ok(())
}
