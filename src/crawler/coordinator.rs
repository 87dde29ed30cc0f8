//! Crawler coordinator - main crawl orchestration logic
//!
//! This module drives a whole run:
//! - Enumerating categories from the home page
//! - Crawling each category in turn and aggregating its items
//! - Applying the skip-or-abort policy to failed categories
//! - Persisting the dataset and reports
//! - Timing each stage of the run

use crate::config::Config;
use crate::crawler::categories::enumerate_categories;
use crate::crawler::category::CategoryCrawler;
use crate::crawler::fetcher::{HttpFetcher, PageFetcher};
use crate::output::{
    count_by_category, log_timing_report, write_category_report, write_dataset,
    write_timing_report, CategoryCount, Stage, StageTimer, StageTimings,
};
use crate::state::{CategoryOutcome, CategoryRef, ItemRecord};
use crate::SweepError;
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

/// Items and category tallies accumulated across a run
#[derive(Debug, Clone, Default)]
pub struct RunAggregate {
    /// Every item collected, in crawl order
    pub items: Vec<ItemRecord>,

    /// Categories crawled to completion, empty ones included
    pub categories_processed: usize,

    /// Categories given up because of a failure
    pub categories_skipped: usize,
}

/// Result of a completed run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub started_at: DateTime<Local>,
    pub items: Vec<ItemRecord>,
    pub category_counts: Vec<CategoryCount>,
    pub categories_processed: usize,
    pub categories_skipped: usize,
    pub timings: StageTimings,
    pub dataset_path: PathBuf,
    pub report_path: PathBuf,
}

/// How a run ended when it did not fail
#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// Items were collected and written out
    Completed(RunSummary),

    /// Nothing was collected and the configuration tolerates that; no files
    /// were written
    NothingCollected {
        categories_skipped: usize,
        timings: StageTimings,
    },
}

/// Main crawler coordinator structure
pub struct Coordinator<F: PageFetcher> {
    config: Config,
    fetcher: F,
    crawler: CategoryCrawler,
}

impl Coordinator<HttpFetcher> {
    /// Creates a coordinator that fetches over HTTP
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(SweepError)` - The HTTP client could not be built
    pub fn new(config: Config) -> Result<Self, SweepError> {
        let fetcher = HttpFetcher::new(
            &config.user_agent.value,
            config.crawler.request_timeout(),
        )?;
        Ok(Self::with_fetcher(config, fetcher))
    }
}

impl<F: PageFetcher> Coordinator<F> {
    /// Creates a coordinator around any page fetcher
    pub fn with_fetcher(config: Config, fetcher: F) -> Self {
        let crawler = CategoryCrawler::from_config(&config.crawler);
        Self {
            config,
            fetcher,
            crawler,
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Runs the whole crawl
    ///
    /// 1. Enumerates categories (stage `DOWNLOAD`); none found is fatal
    /// 2. Crawls every category (stage `EXTRACAO`)
    /// 3. Writes dataset and category report (stage `SALVAMENTO`)
    /// 4. Reports stage timings, however the run ended
    ///
    /// The timing report is always logged. It is written to the timing file
    /// too, except when nothing was collected and that is tolerated.
    ///
    /// # Returns
    ///
    /// * `Ok(RunOutcome)` - The run completed, or collected nothing and that
    ///   is tolerated
    /// * `Err(SweepError)` - No categories, no items, a category failure under
    ///   the abort policy, or an output failure
    pub async fn run(&self) -> Result<RunOutcome, SweepError> {
        let mut timer = StageTimer::start();
        let result = self.run_stages(&mut timer).await;
        let timing_path = self.config.output.timing_path.as_deref().map(Path::new);

        match &result {
            Ok(RunOutcome::Completed(summary)) => {
                write_timing_report(&summary.timings, timing_path)?;
            }
            Ok(RunOutcome::NothingCollected { timings, .. }) => {
                log_timing_report(timings);
            }
            Err(_) => {
                if let Err(e) = write_timing_report(&timer.snapshot(), timing_path) {
                    tracing::warn!("Failed to save timing report: {}", e);
                }
            }
        }

        result
    }

    async fn run_stages(&self, timer: &mut StageTimer) -> Result<RunOutcome, SweepError> {
        let started_at = Local::now();
        let home_url = self.config.crawler.home_url();
        tracing::info!(
            "Starting crawl of {} at {}",
            home_url,
            started_at.format("%d/%m/%Y %H:%M:%S")
        );

        let categories = enumerate_categories(&self.fetcher, &home_url).await;
        timer.finish_stage(Stage::Download);

        if categories.is_empty() {
            tracing::error!("No categories found at {}", home_url);
            return Err(SweepError::NoCategories { url: home_url });
        }

        let aggregate = self.crawl_categories(&categories).await?;
        timer.finish_stage(Stage::Extraction);

        tracing::info!(
            "{} books collected: {} categories processed, {} skipped",
            aggregate.items.len(),
            aggregate.categories_processed,
            aggregate.categories_skipped
        );

        if aggregate.items.is_empty() {
            let crawler = &self.config.crawler;
            if crawler.skip_failed_categories && crawler.tolerate_empty_run {
                tracing::warn!("No books collected; nothing will be saved");
                return Ok(RunOutcome::NothingCollected {
                    categories_skipped: aggregate.categories_skipped,
                    timings: timer.snapshot(),
                });
            }
            tracing::error!("No books collected from {} categories", categories.len());
            return Err(SweepError::NoItems {
                categories: categories.len(),
            });
        }

        let category_counts = count_by_category(&aggregate.items);
        let dataset_path = PathBuf::from(&self.config.output.dataset_path);
        let report_path = PathBuf::from(&self.config.output.report_path);

        self.persist(&aggregate.items, &category_counts, &dataset_path, &report_path)?;
        timer.finish_stage(Stage::Persistence);

        Ok(RunOutcome::Completed(RunSummary {
            started_at,
            items: aggregate.items,
            category_counts,
            categories_processed: aggregate.categories_processed,
            categories_skipped: aggregate.categories_skipped,
            timings: timer.snapshot(),
            dataset_path,
            report_path,
        }))
    }

    /// Crawls each category in order, waiting between categories
    async fn crawl_categories(&self, categories: &[CategoryRef]) -> Result<RunAggregate, SweepError> {
        let mut aggregate = RunAggregate::default();
        let category_delay = self.config.crawler.backoff_delay();

        for (index, category) in categories.iter().enumerate() {
            if index > 0 {
                tokio::time::sleep(category_delay).await;
            }

            tracing::info!(
                "Category {}/{}: {}",
                index + 1,
                categories.len(),
                category.name
            );

            match self.crawler.crawl(&self.fetcher, category).await {
                CategoryOutcome::Success(items) => {
                    aggregate.categories_processed += 1;
                    aggregate.items.extend(items);
                }
                CategoryOutcome::EmptyTerminal(reason) => {
                    if reason.is_failure() {
                        aggregate.categories_skipped += 1;
                    } else {
                        aggregate.categories_processed += 1;
                    }
                }
                CategoryOutcome::Fatal(reason) => {
                    if self.config.crawler.skip_failed_categories {
                        tracing::error!("Skipping category '{}': {}", category.name, reason);
                        aggregate.categories_skipped += 1;
                    } else {
                        tracing::error!("Aborting run at category '{}': {}", category.name, reason);
                        return Err(SweepError::CategoryFailed {
                            category: category.name.clone(),
                            reason,
                        });
                    }
                }
            }
        }

        Ok(aggregate)
    }

    /// Writes the dataset and the category report
    fn persist(
        &self,
        items: &[ItemRecord],
        counts: &[CategoryCount],
        dataset_path: &Path,
        report_path: &Path,
    ) -> Result<(), SweepError> {
        write_dataset(items, dataset_path).map_err(|e| {
            tracing::error!("Failed to save dataset '{}': {}", dataset_path.display(), e);
            e
        })?;

        write_category_report(counts, report_path).map_err(|e| {
            tracing::error!("Failed to save report '{}': {}", report_path.display(), e);
            e
        })?;

        Ok(())
    }
}

/// Runs a complete crawl over HTTP with the given configuration
///
/// # Example
///
/// ```no_run
/// use shelf_sweep::config::Config;
/// use shelf_sweep::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// run_crawl(Config::default()).await?;
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config) -> Result<RunOutcome, SweepError> {
    let coordinator = Coordinator::new(config)?;
    coordinator.run().await
}
