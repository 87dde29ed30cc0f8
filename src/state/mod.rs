//! State management for categories and their crawl progress
//!
//! This module provides:
//! - The records produced by a crawl (categories and items)
//! - The per-category page cursor with its retry and page counters
//! - The tagged outcome a category crawl ends with

mod crawl_state;
mod records;

pub use crawl_state::{Advance, CategoryOutcome, CrawlState, EmptyReason};
pub use records::{CategoryRef, ItemRecord, ListingEntry, RATING_UNAVAILABLE};
