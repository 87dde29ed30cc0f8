use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Shelf-Sweep
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Root of the catalog site
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Page carrying the category menu, relative to `base_url`
    #[serde(rename = "home-page")]
    pub home_page: String,

    /// Directory that item detail pages live under, relative to `base_url`
    #[serde(rename = "catalogue-path")]
    pub catalogue_path: String,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Delay between two listing pages of the same category (milliseconds)
    #[serde(rename = "request-delay-ms")]
    pub request_delay_ms: u64,

    /// Delay between categories, and base of the retry backoff (milliseconds)
    ///
    /// Must be longer than `request-delay-ms` unless both are zero.
    #[serde(rename = "backoff-delay-ms")]
    pub backoff_delay_ms: u64,

    /// Total fetch attempts for one page before the category is given up
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// Hard ceiling on listing pages fetched per category
    #[serde(rename = "max-pages-per-category")]
    pub max_pages_per_category: u32,

    /// Log and skip a failed category instead of aborting the run
    #[serde(rename = "skip-failed-categories")]
    pub skip_failed_categories: bool,

    /// With the skip policy on, end quietly when nothing was collected
    #[serde(rename = "tolerate-empty-run")]
    pub tolerate_empty_run: bool,
}

impl CrawlerConfig {
    /// Absolute URL of the home page
    pub fn home_url(&self) -> String {
        join_base(&self.base_url, &self.home_page)
    }

    /// Absolute catalogue base that relative item links are resolved against
    pub fn catalogue_url(&self) -> String {
        join_base(&self.base_url, &self.catalogue_path)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    pub fn backoff_delay(&self) -> Duration {
        Duration::from_millis(self.backoff_delay_ms)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            base_url: "https://books.toscrape.com/".to_string(),
            home_page: "index.html".to_string(),
            catalogue_path: "catalogue/".to_string(),
            request_timeout_secs: 10,
            request_delay_ms: 1000,
            backoff_delay_ms: 2000,
            max_retries: 3,
            max_pages_per_category: 50,
            skip_failed_categories: true,
            tolerate_empty_run: false,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Value sent in the `User-Agent` header of every request
    pub value: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            value: "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) \
                    Chrome/120.0 Safari/537.36"
                .to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the CSV dataset
    #[serde(rename = "dataset-path")]
    pub dataset_path: String,

    /// Path to the per-category report
    #[serde(rename = "report-path")]
    pub report_path: String,

    /// Path to the execution-time report; logged only when unset
    #[serde(rename = "timing-path")]
    pub timing_path: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dataset_path: "livros.csv".to_string(),
            report_path: "relatorio_categorias.txt".to_string(),
            timing_path: None,
        }
    }
}

fn join_base(base: &str, relative: &str) -> String {
    let mut joined = base.to_string();
    if !joined.ends_with('/') {
        joined.push('/');
    }
    joined.push_str(relative.trim_start_matches('/'));
    joined
}
