use serde::Serialize;
use std::time::Duration;

use crate::discovery::ParseStats;
use crate::validation::ProbeBatch;

/// Totals of one run, printed at the end and serialized in JSON output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub input: String,
    pub output: String,
    pub total_lines: usize,
    pub candidates: usize,
    pub skipped_lines: usize,
    pub probed: usize,
    pub reachable: usize,
    pub failed: usize,
    pub unsupported: usize,
    pub written: usize,
    /// Percentage of probed candidates that were reachable
    pub success_rate: f64,
    pub duration_ms: u128,
    pub generated_at: String,
}

impl RunSummary {
    pub fn new(
        input: &str,
        output: &str,
        stats: &ParseStats,
        batch: &ProbeBatch,
        duration: Duration,
    ) -> Self {
        Self {
            input: input.to_string(),
            output: output.to_string(),
            total_lines: stats.total_lines,
            candidates: stats.candidates,
            skipped_lines: stats.skipped(),
            probed: batch.probed(),
            reachable: batch.reachable(),
            failed: batch.failed(),
            unsupported: batch.unsupported,
            written: 0,
            success_rate: batch.success_rate(),
            duration_ms: duration.as_millis(),
            generated_at: chrono::Utc::now()
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string(),
        }
    }

    pub fn with_written(mut self, written: usize) -> Self {
        self.written = written;
        self
    }
}
