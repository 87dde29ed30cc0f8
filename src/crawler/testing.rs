//! Test doubles for the crawler
//!
//! `ScriptedFetcher` answers each URL from a queue of canned results so the
//! crawl state machine can be driven without a network.

use crate::crawler::fetcher::{FetchResult, PageFetcher};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Fetcher replaying scripted results per URL
///
/// Results for a URL are consumed in order; the last one repeats forever.
/// URLs without a script answer `NotFound`.
#[derive(Default)]
pub struct ScriptedFetcher {
    scripts: Mutex<HashMap<String, VecDeque<FetchResult>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a result for `url`
    pub fn respond(self, url: &str, result: FetchResult) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_default()
            .push_back(result);
        self
    }

    /// Queues a 200 response with `body` for `url`
    pub fn page(self, url: &str, body: impl Into<String>) -> Self {
        self.respond(
            url,
            FetchResult::Success {
                status_code: 200,
                body: body.into(),
            },
        )
    }

    /// Queues a retryable failure for `url`
    pub fn failure(self, url: &str) -> Self {
        self.respond(
            url,
            FetchResult::Failed {
                status_code: Some(503),
                error: "HTTP 503".to_string(),
            },
        )
    }

    /// Number of fetches made for `url`
    pub fn calls_to(&self, url: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.as_str() == url)
            .count()
    }

    /// Every URL fetched, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for ScriptedFetcher {
    async fn fetch(&self, url: &str) -> FetchResult {
        self.calls.lock().unwrap().push(url.to_string());

        let mut scripts = self.scripts.lock().unwrap();
        match scripts.get_mut(url) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) => queue.front().cloned().unwrap_or(FetchResult::NotFound),
            None => FetchResult::NotFound,
        }
    }
}

/// Builds a listing page with `count` well-formed items
pub fn listing_html(prefix: &str, count: usize, next: Option<&str>) -> String {
    let articles: String = (0..count)
        .map(|i| {
            format!(
                r#"<article class="product_pod">
                    <p class="star-rating Three"></p>
                    <h3><a href="../../../{prefix}-{i}_{i}/index.html" title="{prefix} {i}">{prefix} {i}</a></h3>
                    <p class="price_color">£{i}.99</p>
                </article>"#,
                prefix = prefix,
                i = i
            )
        })
        .collect();

    let pager = next
        .map(|n| format!(r#"<ul class="pager"><li class="next"><a href="{}">next</a></li></ul>"#, n))
        .unwrap_or_default();

    format!("<html><body><ol>{}</ol>{}</body></html>", articles, pager)
}

/// Builds a home page whose menu lists `categories` as `(name, href)`
pub fn home_html(categories: &[(&str, &str)]) -> String {
    let items: String = categories
        .iter()
        .map(|(name, href)| format!(r#"<li><a href="{}">{}</a></li>"#, href, name))
        .collect();

    format!(
        r#"<html><body><div class="side_categories"><ul><li>
            <a href="catalogue/category/books_1/index.html">Books</a>
            <ul>{}</ul>
        </li></ul></div></body></html>"#,
        items
    )
}
