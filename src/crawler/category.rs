//! Category crawler - walks the listing pages of one category
//!
//! One page is fetched and fully extracted before the next is requested.
//! After each fetch the crawler moves through a small state machine:
//!
//! | Fetch result | Action |
//! |--------------|--------|
//! | Success, items, next link, below ceiling | wait request delay, fetch next page |
//! | Success, items, no next link or ceiling hit | finish with accumulated items |
//! | Success, no items on page | warn, finish with accumulated items |
//! | NotFound | give the category up immediately |
//! | Failed, attempts left | wait backoff, fetch the same page again |
//! | Failed, attempts used up | give the category up |
//!
//! Giving up yields an empty outcome under the skip policy and a fatal one
//! otherwise. Items gathered before giving up are discarded.

use crate::config::CrawlerConfig;
use crate::crawler::fetcher::{FetchResult, PageFetcher};
use crate::crawler::parser::parse_listing;
use crate::crawler::retry::RetryPolicy;
use crate::state::{Advance, CategoryOutcome, CategoryRef, CrawlState, EmptyReason, ItemRecord};
use crate::url::{resolve_sibling, LinkNormalizer};
use std::time::Duration;

/// Crawls categories one at a time with bounded retry and a page ceiling
#[derive(Debug, Clone)]
pub struct CategoryCrawler {
    normalizer: LinkNormalizer,
    retry: RetryPolicy,
    request_delay: Duration,
    max_pages: u32,
    skip_failures: bool,
}

impl CategoryCrawler {
    pub fn new(
        normalizer: LinkNormalizer,
        retry: RetryPolicy,
        request_delay: Duration,
        max_pages: u32,
        skip_failures: bool,
    ) -> Self {
        Self {
            normalizer,
            retry,
            request_delay,
            max_pages,
            skip_failures,
        }
    }

    /// Builds a crawler from the `[crawler]` configuration table
    pub fn from_config(config: &CrawlerConfig) -> Self {
        Self::new(
            LinkNormalizer::new(&config.catalogue_url()),
            RetryPolicy::from_config(config),
            config.request_delay(),
            config.max_pages_per_category,
            config.skip_failed_categories,
        )
    }

    /// Crawls every listing page of `category`
    ///
    /// # Returns
    ///
    /// * `Success(items)` - at least one item was extracted
    /// * `EmptyTerminal(reason)` - nothing to contribute; under the skip policy
    ///   this includes 404s and exhausted retries
    /// * `Fatal(message)` - a 404 or exhausted retries with the skip policy off
    pub async fn crawl<F>(&self, fetcher: &F, category: &CategoryRef) -> CategoryOutcome
    where
        F: PageFetcher + ?Sized,
    {
        tracing::info!("Crawling category '{}' ({})", category.name, category.url);

        let mut state = CrawlState::new(category.url.as_str());
        let mut items: Vec<ItemRecord> = Vec::new();

        while let Some(url) = state.url.clone() {
            match fetcher.fetch(&url).await {
                FetchResult::Success { body, .. } => {
                    let page = parse_listing(&body, &self.normalizer);

                    if page.is_empty() {
                        tracing::warn!("No books found on page {}", url);
                        state.finish();
                        continue;
                    }

                    tracing::info!(
                        "{} books collected from page {} of '{}'",
                        page.entries.len(),
                        state.pages_fetched + 1,
                        category.name
                    );
                    if page.malformed > 0 {
                        tracing::warn!("{} malformed entries skipped on {}", page.malformed, url);
                    }

                    items.extend(
                        page.entries
                            .into_iter()
                            .map(|entry| entry.into_record(&category.name)),
                    );

                    let next = page
                        .next_page
                        .and_then(|href| match resolve_sibling(&url, &href) {
                            Ok(next) => Some(next.to_string()),
                            Err(e) => {
                                tracing::warn!("Ignoring invalid next link '{}' on {}: {}", href, url, e);
                                None
                            }
                        });

                    match state.record_success(next, self.max_pages) {
                        Advance::NextPage => {
                            tracing::debug!("Advancing to page {}", state.pages_fetched + 1);
                            tokio::time::sleep(self.request_delay).await;
                        }
                        Advance::LastPage => {
                            tracing::debug!("Last page of '{}' reached", category.name);
                        }
                        Advance::CeilingReached => {
                            tracing::warn!(
                                "Page limit of {} reached for '{}', stopping",
                                self.max_pages,
                                category.name
                            );
                        }
                    }
                }

                FetchResult::NotFound => {
                    return self.give_up(category, &url, EmptyReason::NotFound);
                }

                FetchResult::Failed { error, .. } => {
                    let failures = state.record_failure();

                    if self.retry.is_exhausted(failures) {
                        tracing::error!(
                            "Giving up on {} after {} attempts: {}",
                            url,
                            failures,
                            error
                        );
                        return self.give_up(category, &url, EmptyReason::RetriesExhausted);
                    }

                    let backoff = self.retry.backoff_for(failures);
                    tracing::warn!(
                        "Attempt {}/{} for {} failed ({}), retrying in {:.1}s",
                        failures,
                        self.retry.max_attempts,
                        url,
                        error,
                        backoff.as_secs_f64()
                    );
                    tokio::time::sleep(backoff).await;
                }
            }
        }

        if items.is_empty() {
            tracing::warn!("No books found in category '{}'", category.name);
            return CategoryOutcome::EmptyTerminal(EmptyReason::NoItems);
        }

        tracing::info!(
            "Category '{}' finished: {} books in {} pages",
            category.name,
            items.len(),
            state.pages_fetched
        );
        CategoryOutcome::Success(items)
    }

    /// Ends a category that could not be crawled
    fn give_up(&self, category: &CategoryRef, url: &str, reason: EmptyReason) -> CategoryOutcome {
        if self.skip_failures {
            // Same wording as a genuinely empty category; the reason is kept in the outcome
            tracing::warn!("No books found in category '{}'", category.name);
            tracing::debug!("Category '{}' skipped: {} at {}", category.name, reason, url);
            CategoryOutcome::EmptyTerminal(reason)
        } else {
            CategoryOutcome::Fatal(format!("{} at {}", reason, url))
        }
    }
}
