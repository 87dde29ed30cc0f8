//! Integration tests for Shelf-Sweep

mod crawl_tests;
mod fetcher_tests;
