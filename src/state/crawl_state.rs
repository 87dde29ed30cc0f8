/// Per-category crawl state and outcome definitions
///
/// A category crawl walks its listing pages one at a time. `CrawlState` holds the
/// page cursor and the counters the crawler consults after every fetch, and
/// `CategoryOutcome` is what the crawler hands back to the coordinator.
use crate::state::ItemRecord;
use std::fmt;

/// Page cursor and counters for one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlState {
    /// Page to fetch next; `None` once the category is finished
    pub url: Option<String>,

    /// Listing pages fetched and extracted so far
    pub pages_fetched: u32,

    /// Transient failures since the last successful fetch
    pub consecutive_failures: u32,
}

/// What the crawler should do after a successful page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Fetch the next listing page
    NextPage,

    /// The page had no "next" marker
    LastPage,

    /// A "next" marker exists but the page ceiling was reached
    CeilingReached,
}

impl CrawlState {
    /// Creates the state for a category starting at `start_url`
    pub fn new(start_url: impl Into<String>) -> Self {
        Self {
            url: Some(start_url.into()),
            pages_fetched: 0,
            consecutive_failures: 0,
        }
    }

    /// Records a successfully fetched and extracted page
    ///
    /// Resets the failure counter and counts the page. The cursor moves to
    /// `next` only while the page count is below `ceiling`; otherwise it is
    /// cleared, so `pages_fetched` never exceeds `ceiling`.
    pub fn record_success(&mut self, next: Option<String>, ceiling: u32) -> Advance {
        self.consecutive_failures = 0;
        self.pages_fetched += 1;

        match next {
            Some(next) if self.pages_fetched < ceiling => {
                self.url = Some(next);
                Advance::NextPage
            }
            Some(_) => {
                self.url = None;
                Advance::CeilingReached
            }
            None => {
                self.url = None;
                Advance::LastPage
            }
        }
    }

    /// Records a transient failure of the current page
    ///
    /// The cursor stays on the same page. Returns the updated failure count.
    pub fn record_failure(&mut self) -> u32 {
        self.consecutive_failures += 1;
        self.consecutive_failures
    }

    /// Stops the crawl without touching the counters
    pub fn finish(&mut self) {
        self.url = None;
    }

    /// Returns true once there is no page left to fetch
    pub fn is_finished(&self) -> bool {
        self.url.is_none()
    }
}

/// Why a category ended without items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmptyReason {
    /// Pages were fetched but listed nothing
    NoItems,

    /// A listing page answered 404
    NotFound,

    /// A listing page kept failing until the retry ceiling
    RetriesExhausted,
}

impl EmptyReason {
    /// Returns true if the category was given up because of a fetch failure
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::NotFound | Self::RetriesExhausted)
    }
}

impl fmt::Display for EmptyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::NoItems => "no items listed",
            Self::NotFound => "listing page not found",
            Self::RetriesExhausted => "retries exhausted",
        };
        f.write_str(text)
    }
}

/// Result of crawling one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryOutcome {
    /// The category yielded at least one item
    Success(Vec<ItemRecord>),

    /// The category ended with nothing to contribute
    EmptyTerminal(EmptyReason),

    /// The category failed and the skip policy did not absorb it
    Fatal(String),
}

impl CategoryOutcome {
    /// Number of items carried by this outcome
    pub fn item_count(&self) -> usize {
        match self {
            Self::Success(items) => items.len(),
            _ => 0,
        }
    }
}
