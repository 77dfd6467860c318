use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;

use crate::validation::ProbeResult;

/// Per-probe console reporting.
///
/// Every finished probe gets a `✓`/`✗` line. With the bar enabled and drawn
/// the line goes through the bar; otherwise it goes straight to stderr.
pub struct ProgressReporter {
    multi_progress: Arc<MultiProgress>,
    probe_progress: Option<ProgressBar>,
    enabled: bool,
}

impl ProgressReporter {
    pub fn new(enabled: bool) -> Self {
        Self {
            multi_progress: Arc::new(MultiProgress::new()),
            probe_progress: None,
            enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn start_probing(&mut self, total_candidates: usize) {
        if !self.enabled {
            return;
        }

        let pb = self
            .multi_progress
            .add(ProgressBar::new(total_candidates as u64));
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.yellow/red}] {pos}/{len} channels probed ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        pb.set_style(style);
        pb.set_message("Probing channels");
        pb.enable_steady_tick(Duration::from_millis(120));
        self.probe_progress = Some(pb);
    }

    /// Print one line for a finished probe and advance the bar
    pub fn report_probe(&self, result: &ProbeResult) {
        let line = probe_line(result);

        match self.probe_progress {
            Some(ref pb) if !pb.is_hidden() => {
                pb.println(line);
                pb.inc(1);
            }
            Some(ref pb) => {
                eprintln!("{line}");
                pb.inc(1);
            }
            None => eprintln!("{line}"),
        }
    }

    pub fn finish_probing(&self, reachable: usize, probed: usize) {
        if let Some(ref pb) = self.probe_progress {
            let message = if reachable == probed {
                "✓ All channels reachable".to_string()
            } else {
                format!("✓ Probing complete ({reachable}/{probed} reachable)")
            };
            pb.finish_with_message(message);
        }
    }

    pub fn finish_and_clear(&self) {
        if self.enabled {
            self.multi_progress.clear().unwrap_or(());
            println!();
        }
    }
}

/// `✓ name - 120ms` for reachable channels, `✗ name - reason (Nms)` otherwise
pub fn probe_line(result: &ProbeResult) -> String {
    if result.is_ok() {
        format!("✓ {result}")
    } else {
        format!("✗ {result}")
    }
}
