//! Shelf-Sweep main entry point
//!
//! This is the command-line interface for the Shelf-Sweep catalog crawler.

use anyhow::Context;
use clap::Parser;
use shelf_sweep::config::{load_config_with_hash, Config};
use shelf_sweep::crawler::{run_crawl, RunOutcome};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::EnvFilter;

/// Shelf-Sweep: a catalog category crawler
///
/// Shelf-Sweep lists every category of a catalog site, walks each category's
/// listing pages and saves the collected items as CSV together with a
/// per-category report.
#[derive(Parser, Debug)]
#[command(name = "shelf-sweep")]
#[command(version = "1.0.0")]
#[command(about = "A catalog category crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Append log records to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Abort the whole run when a category fails instead of skipping it
    #[arg(long)]
    abort_on_error: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Held until exit so buffered log lines reach the file
    let _log_guard = setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            Config::default()
        }
    };

    if cli.abort_on_error {
        config.crawler.skip_failed_categories = false;
    }

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// With a log file, records are appended to it through a background writer
/// and the returned guard must stay alive until the program ends.
fn setup_logging(
    verbose: u8,
    quiet: bool,
    log_file: Option<&Path>,
) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("shelf_sweep=info,warn"),
            1 => EnvFilter::new("shelf_sweep=debug,info"),
            2 => EnvFilter::new("shelf_sweep=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false);

    match log_file {
        Some(path) => {
            let (writer, guard) = file_log_writer(path)?;
            subscriber
                .with_ansi(false)
                .with_line_number(true)
                .with_writer(writer)
                .init();
            Ok(Some(guard))
        }
        None => {
            subscriber.init();
            Ok(None)
        }
    }
}

/// Splits a log file path into its directory and file name
///
/// A bare file name lives in the current directory.
fn log_file_location(path: &Path) -> anyhow::Result<(PathBuf, OsString)> {
    let file_name = path
        .file_name()
        .with_context(|| format!("log file path has no file name: {}", path.display()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, file_name.to_os_string()))
}

/// Builds a non-blocking writer appending to `path`, never rotated
fn file_log_writer(path: &Path) -> anyhow::Result<(NonBlocking, WorkerGuard)> {
    let (dir, file_name) = log_file_location(path)?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(&dir, file_name);
    Ok(tracing_appender::non_blocking(appender))
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== Shelf-Sweep Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Home page: {}", config.crawler.home_url());
    println!("  Catalogue base: {}", config.crawler.catalogue_url());
    println!(
        "  Request timeout: {}s",
        config.crawler.request_timeout_secs
    );
    println!("  Request delay: {}ms", config.crawler.request_delay_ms);
    println!("  Backoff delay: {}ms", config.crawler.backoff_delay_ms);
    println!("  Max retries: {}", config.crawler.max_retries);
    println!(
        "  Max pages per category: {}",
        config.crawler.max_pages_per_category
    );
    println!(
        "  On category failure: {}",
        if config.crawler.skip_failed_categories {
            "skip"
        } else {
            "abort"
        }
    );

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.value);

    println!("\nOutput:");
    println!("  Dataset: {}", config.output.dataset_path);
    println!("  Category report: {}", config.output.report_path);
    match &config.output.timing_path {
        Some(path) => println!("  Timing report: {}", path),
        None => println!("  Timing report: log only"),
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config) -> anyhow::Result<()> {
    match run_crawl(config).await {
        Ok(RunOutcome::Completed(summary)) => {
            tracing::info!("Crawl completed successfully");
            println!("\nScraping concluído! Verifique os arquivos:");
            println!(
                "- Início da execução: {}",
                summary.started_at.format("%d/%m/%Y %H:%M:%S")
            );
            println!("- Dados extraídos: {}", summary.dataset_path.display());
            println!("- Relatório por categoria: {}", summary.report_path.display());
            println!(
                "- {} livros em {} categorias ({} ignoradas)",
                summary.items.len(),
                summary.category_counts.len(),
                summary.categories_skipped
            );
            Ok(())
        }
        Ok(RunOutcome::NothingCollected {
            categories_skipped, ..
        }) => {
            tracing::warn!("Crawl finished without collecting anything");
            println!(
                "\nNenhum livro coletado ({} categorias ignoradas); nenhum arquivo gerado.",
                categories_skipped
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e).context("crawl failed")
        }
    }
}
