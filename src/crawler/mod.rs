//! Crawler module for catalog fetching and extraction
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the `PageFetcher` trait
//! - Listing and category-menu parsing
//! - The per-category page walk with retry and a page ceiling
//! - Overall run coordination

mod categories;
mod category;
mod coordinator;
mod fetcher;
mod parser;
mod retry;

#[cfg(test)]
pub(crate) mod testing;

pub use categories::enumerate_categories;
pub use category::CategoryCrawler;
pub use coordinator::{run_crawl, Coordinator, RunAggregate, RunOutcome, RunSummary};
pub use fetcher::{build_http_client, fetch_url, FetchResult, HttpFetcher, PageFetcher};
pub use parser::{parse_category_menu, parse_listing, ListingPage, MenuLink};
pub use retry::RetryPolicy;
