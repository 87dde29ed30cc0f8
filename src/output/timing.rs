//! Stage timing and the execution-time report
//!
//! The coordinator owns a [`StageTimer`] for the whole run and closes one stage
//! at a time; the resulting [`StageTimings`] travel with the run summary.

use crate::output::OutputResult;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::{Duration, Instant};

/// Timed stages of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Category discovery
    Download,

    /// The per-category extraction loop
    Extraction,

    /// Writing the dataset and reports
    Persistence,
}

impl Stage {
    /// All stages, in report order
    pub const ALL: [Stage; 3] = [Stage::Download, Stage::Extraction, Stage::Persistence];

    /// Key used in logs and the execution-time report
    pub fn key(&self) -> &'static str {
        match self {
            Self::Download => "DOWNLOAD",
            Self::Extraction => "EXTRACAO",
            Self::Persistence => "SALVAMENTO",
        }
    }
}

/// Elapsed time per stage plus the total run time
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageTimings {
    stages: Vec<(Stage, Duration)>,
    total: Duration,
}

impl StageTimings {
    /// Duration recorded for `stage`, if it ran
    pub fn get(&self, stage: Stage) -> Option<Duration> {
        self.stages
            .iter()
            .find(|(s, _)| *s == stage)
            .map(|(_, d)| *d)
    }

    pub fn total(&self) -> Duration {
        self.total
    }
}

/// Measures consecutive stages of a run
#[derive(Debug, Clone)]
pub struct StageTimer {
    run_start: Instant,
    stage_start: Instant,
    stages: Vec<(Stage, Duration)>,
}

impl StageTimer {
    /// Starts the run clock and the first stage
    pub fn start() -> Self {
        let now = Instant::now();
        Self {
            run_start: now,
            stage_start: now,
            stages: Vec::new(),
        }
    }

    /// Closes the current stage under `stage` and starts the next one
    pub fn finish_stage(&mut self, stage: Stage) -> Duration {
        let elapsed = self.stage_start.elapsed();
        tracing::info!(
            "ETAPA '{}' concluida em {:.2} segundos",
            stage.key(),
            elapsed.as_secs_f64()
        );

        self.stages.push((stage, elapsed));
        self.stage_start = Instant::now();
        elapsed
    }

    /// Timings recorded so far, with the total measured now
    pub fn snapshot(&self) -> StageTimings {
        StageTimings {
            stages: self.stages.clone(),
            total: self.run_start.elapsed(),
        }
    }
}

/// Formats the execution-time report
///
/// Stages that never ran are reported as `0.00s`.
pub fn format_timing_report(timings: &StageTimings) -> String {
    let mut report = String::from("RELATORIO DETALHADO:\n");
    report.push_str(&format!(
        "TOTAL: {:.2} segundos\n",
        timings.total().as_secs_f64()
    ));

    for stage in Stage::ALL {
        let elapsed = timings.get(stage).unwrap_or_default();
        report.push_str(&format!("{}: {:.2}s\n", stage.key(), elapsed.as_secs_f64()));
    }

    report.push_str("Concluido!\n");
    report
}

/// Emits the execution-time report as a log entry only
pub fn log_timing_report(timings: &StageTimings) -> String {
    let report = format_timing_report(timings);
    tracing::info!("\n{}", report);
    report
}

/// Emits the execution-time report as a log entry and optionally to a file
pub fn write_timing_report(timings: &StageTimings, path: Option<&Path>) -> OutputResult<()> {
    let report = log_timing_report(timings);

    if let Some(path) = path {
        let mut file = File::create(path)?;
        file.write_all(report.as_bytes())?;
    }

    Ok(())
}
