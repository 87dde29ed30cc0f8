//! Output module for persisting crawl results
//!
//! This module handles:
//! - Writing the item dataset as CSV
//! - Generating the per-category count report
//! - Timing run stages and reporting their durations

mod dataset;
mod report;
mod timing;

pub use dataset::{write_dataset, DATASET_HEADER};
pub use report::{count_by_category, format_category_report, write_category_report, CategoryCount};
pub use timing::{
    format_timing_report, log_timing_report, write_timing_report, Stage, StageTimer, StageTimings,
};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
