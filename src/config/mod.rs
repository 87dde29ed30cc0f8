//! Configuration module for Shelf-Sweep
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default, so an empty file (or no file at all) yields a usable
//! configuration aimed at the public demo catalog.
//!
//! # Example
//!
//! ```no_run
//! use shelf_sweep::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sweep.toml")).unwrap();
//! println!("Crawling {}", config.crawler.home_url());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{hash_config_text, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
