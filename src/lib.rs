//! Shelf-Sweep: a catalog category crawler
//!
//! This crate enumerates the product categories of a catalog site, walks every
//! category's paginated listing, extracts one record per listed item and
//! persists the aggregate as a CSV dataset plus a per-category report.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Shelf-Sweep operations
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("No categories found at {url}")]
    NoCategories { url: String },

    #[error("No items collected from {categories} categories")]
    NoItems { categories: usize },

    #[error("Category '{category}' failed: {reason}")]
    CategoryFailed { category: String, reason: String },

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Shelf-Sweep operations
pub type Result<T> = std::result::Result<T, SweepError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Coordinator, RunOutcome, RunSummary};
pub use state::{CategoryOutcome, CategoryRef, ItemRecord};
pub use crate::url::LinkNormalizer;
