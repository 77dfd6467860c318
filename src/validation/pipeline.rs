//! Concurrent probing of channel candidates
//!
//! Candidates with a supported scheme are fanned out to a [`Probe`] with a
//! fixed number in flight. Results are collected in completion order and
//! reported to the progress bar and the log as they arrive.

use async_trait::async_trait;
use futures::{StreamExt, stream};
use log::debug;
use rustc_hash::FxHashSet;
use std::sync::Arc;
use tokio::time::{Duration, Instant, timeout};

use crate::config::Config;
use crate::core::constants::timeouts;
use crate::core::error::Result;
use crate::core::types::Candidate;
use crate::reporting::logging;
use crate::ui::progress::ProgressReporter;
use crate::validation::probe::{Probe, SchemeRouter};
use crate::validation::result::{ProbeError, ProbeResult};

#[async_trait]
pub trait ProbeChannels {
    async fn probe_channels(
        &self,
        candidates: Vec<Candidate>,
        progress: Option<&mut ProgressReporter>,
    ) -> ProbeBatch;
}

/// Every result of one pipeline run, in completion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProbeBatch {
    pub results: Vec<ProbeResult>,
    /// Candidates skipped because no probe handles their scheme
    pub unsupported: usize,
}

impl ProbeBatch {
    pub fn probed(&self) -> usize {
        self.results.len()
    }

    pub fn reachable(&self) -> usize {
        self.results.iter().filter(|r| r.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.iter().filter(|r| r.is_not_ok()).count()
    }

    /// Share of probed candidates that were reachable, in percent
    pub fn success_rate(&self) -> f64 {
        if self.results.is_empty() {
            return 0.0;
        }
        self.reachable() as f64 / self.probed() as f64 * 100.0
    }
}

/// Bounded fan-out of probes over a list of candidates.
///
/// At most `concurrency` probes are in flight. Each probe is abandoned
/// `timeout + SCHEDULING_SLACK_MS` after it started and recorded as a
/// timeout, so a batch always finishes.
pub struct ProbePipeline {
    prober: Arc<dyn Probe>,
    concurrency: usize,
    timeout: Duration,
}

impl ProbePipeline {
    pub fn new(prober: Arc<dyn Probe>, concurrency: usize, timeout: Duration) -> Self {
        Self {
            prober,
            concurrency: concurrency.max(1),
            timeout,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            Arc::new(SchemeRouter::from_config(config)?),
            config.concurrency(),
            config.timeout_duration(),
        ))
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    fn deadline(&self) -> Duration {
        self.timeout + Duration::from_millis(timeouts::SCHEDULING_SLACK_MS)
    }

    /// Keep the first candidate for every URL, preserving input order
    pub fn deduplicate(candidates: Vec<Candidate>) -> Vec<Candidate> {
        let mut seen_urls =
            FxHashSet::with_capacity_and_hasher(candidates.len(), Default::default());
        let mut unique = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            if seen_urls.insert(candidate.url.clone()) {
                unique.push(candidate);
            }
        }

        unique
    }
}

#[async_trait]
impl ProbeChannels for ProbePipeline {
    async fn probe_channels(
        &self,
        candidates: Vec<Candidate>,
        mut progress: Option<&mut ProgressReporter>,
    ) -> ProbeBatch {
        let (supported, unsupported): (Vec<_>, Vec<_>) = candidates
            .into_iter()
            .partition(|candidate| candidate.scheme().is_supported());

        for candidate in &unsupported {
            debug!("Skipping unsupported scheme: {}", candidate.url);
        }

        let total = supported.len();
        if let Some(ref mut prog) = progress {
            prog.start_probing(total);
        }

        let deadline = self.deadline();
        let mut in_flight = stream::iter(supported)
            .map(|candidate| {
                let prober = &self.prober;
                async move {
                    let start = Instant::now();
                    let outcome = timeout(deadline, prober.probe(&candidate.url))
                        .await
                        .unwrap_or(Err(ProbeError::Timeout));
                    ProbeResult::new(candidate, start.elapsed(), outcome)
                }
            })
            .buffer_unordered(self.concurrency);

        let mut results = Vec::with_capacity(total);
        while let Some(result) = in_flight.next().await {
            logging::log_probe_result(&result);
            if let Some(ref mut prog) = progress {
                prog.report_probe(&result);
            }
            results.push(result);
        }

        let batch = ProbeBatch {
            results,
            unsupported: unsupported.len(),
        };

        if let Some(ref prog) = progress {
            prog.finish_probing(batch.reachable(), batch.probed());
        }

        batch
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use crate::validation::result::ProbeOutcome;
    use mockito::Server;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::time::sleep;

    /// Answers every URL after a scripted delay with a scripted outcome
    struct ScriptedProbe {
        script: HashMap<String, (u64, bool)>,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    impl ScriptedProbe {
        fn new(script: &[(&str, u64, bool)]) -> Self {
            Self {
                script: script
                    .iter()
                    .map(|(url, delay, ok)| (url.to_string(), (*delay, *ok)))
                    .collect(),
                in_flight: AtomicUsize::new(0),
                max_in_flight: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Probe for ScriptedProbe {
        async fn probe(&self, url: &str) -> std::result::Result<ProbeOutcome, ProbeError> {
            let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(current, Ordering::SeqCst);

            let (delay, ok) = self.script.get(url).copied().unwrap_or((0, false));
            sleep(Duration::from_millis(delay)).await;

            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            if ok {
                Ok(ProbeOutcome { status: Some(200) })
            } else {
                Err(ProbeError::Status(500))
            }
        }
    }

    fn candidates(entries: &[(&str, &str)]) -> Vec<Candidate> {
        entries
            .iter()
            .enumerate()
            .map(|(i, (name, url))| Candidate::new(name, url, i).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_probe_channels__empty_input() {
        let pipeline = ProbePipeline::new(
            Arc::new(ScriptedProbe::new(&[])),
            50,
            Duration::from_secs(3),
        );

        let batch = pipeline.probe_channels(vec![], None).await;

        assert_eq!(batch, ProbeBatch::default());
        assert_eq!(batch.success_rate(), 0.0);
    }

    #[tokio::test]
    async fn test_probe_channels__one_result_per_candidate() {
        let probe = ScriptedProbe::new(&[
            ("http://a.test/", 30, true),
            ("http://b.test/", 10, false),
            ("rtmp://c.test/live", 20, true),
        ]);
        let pipeline = ProbePipeline::new(Arc::new(probe), 3, Duration::from_secs(3));
        let input = candidates(&[
            ("A", "http://a.test/"),
            ("B", "http://b.test/"),
            ("C", "rtmp://c.test/live"),
        ]);

        let batch = pipeline.probe_channels(input, None).await;

        assert_eq!(batch.probed(), 3);
        assert_eq!(batch.reachable(), 2);
        assert_eq!(batch.failed(), 1);
        assert_eq!(batch.unsupported, 0);

        let mut names: Vec<_> = batch
            .results
            .iter()
            .map(|r| r.candidate.name.as_str())
            .collect();
        names.sort();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_probe_channels__unsupported_scheme_is_not_counted() {
        let probe = ScriptedProbe::new(&[("http://a.test/", 0, true)]);
        let pipeline = ProbePipeline::new(Arc::new(probe), 4, Duration::from_secs(3));
        let input = candidates(&[("A", "http://a.test/"), ("F", "ftp://f.test/file")]);

        let batch = pipeline.probe_channels(input, None).await;

        assert_eq!(batch.unsupported, 1);
        assert_eq!(batch.probed(), 1);
        assert_eq!(batch.reachable(), 1);
        assert_eq!(batch.failed(), 0);
        assert!(batch.results.iter().all(|r| r.candidate.name != "F"));
    }

    #[tokio::test]
    async fn test_probe_channels__respects_concurrency_limit() {
        let script: Vec<(String, u64, bool)> = (0..20)
            .map(|i| (format!("http://host{i}.test/"), 20, true))
            .collect();
        let script_refs: Vec<(&str, u64, bool)> = script
            .iter()
            .map(|(url, delay, ok)| (url.as_str(), *delay, *ok))
            .collect();
        let probe = Arc::new(ScriptedProbe::new(&script_refs));
        let pipeline = ProbePipeline::new(probe.clone(), 4, Duration::from_secs(3));
        let entries: Vec<(&str, &str)> =
            script_refs.iter().map(|(url, _, _)| ("X", *url)).collect();

        let batch = pipeline.probe_channels(candidates(&entries), None).await;

        assert_eq!(batch.probed(), 20);
        let max = probe.max_in_flight.load(Ordering::SeqCst);
        assert!(max <= 4, "max in flight was {max}");
        assert!(max >= 2, "probes never overlapped");
    }

    #[tokio::test]
    async fn test_probe_channels__slow_probe_times_out() {
        let probe = ScriptedProbe::new(&[
            ("http://slow.test/", 10_000, true),
            ("http://fast.test/", 0, true),
        ]);
        let pipeline = ProbePipeline::new(Arc::new(probe), 2, Duration::from_millis(100));
        let input = candidates(&[("Slow", "http://slow.test/"), ("Fast", "http://fast.test/")]);

        let start = Instant::now();
        let batch = pipeline.probe_channels(input, None).await;
        let elapsed = start.elapsed();

        assert!(elapsed < Duration::from_secs(2), "batch took {elapsed:?}");
        let slow = batch
            .results
            .iter()
            .find(|r| r.candidate.name == "Slow")
            .unwrap();
        assert_eq!(slow.error(), Some(&ProbeError::Timeout));
        assert!(slow.latency < Duration::from_secs(2));
        assert_eq!(batch.reachable(), 1);
    }

    #[tokio::test]
    async fn test_probe_channels__with_progress() {
        let probe = ScriptedProbe::new(&[("http://a.test/", 0, true)]);
        let pipeline = ProbePipeline::new(Arc::new(probe), 1, Duration::from_secs(3));
        let mut progress = ProgressReporter::new(false);

        let batch = pipeline
            .probe_channels(candidates(&[("A", "http://a.test/")]), Some(&mut progress))
            .await;

        assert_eq!(batch.reachable(), 1);
    }

    #[tokio::test]
    async fn test_probe_channels__from_config_against_server() -> Result<()> {
        let mut server = Server::new_async().await;
        let _m200 = server.mock("GET", "/ok").with_status(200).create();
        let _m503 = server.mock("GET", "/down").with_status(503).create();
        let config = Config {
            timeout: Some(2),
            concurrency: Some(2),
            ..Default::default()
        };
        let pipeline = ProbePipeline::from_config(&config)?;
        let ok_url = server.url() + "/ok";
        let down_url = server.url() + "/down";
        let input = candidates(&[("Up", ok_url.as_str()), ("Down", down_url.as_str())]);

        let batch = pipeline.probe_channels(input, None).await;

        assert_eq!(batch.probed(), 2);
        let up = batch.results.iter().find(|r| r.candidate.name == "Up").unwrap();
        assert_eq!(up.outcome, Ok(ProbeOutcome { status: Some(200) }));
        let down = batch.results.iter().find(|r| r.candidate.name == "Down").unwrap();
        assert_eq!(down.error(), Some(&ProbeError::Status(503)));
        Ok(())
    }

    #[test]
    fn test_deduplicate__keeps_first_entry() {
        let input = candidates(&[
            ("A", "http://same.test/"),
            ("B", "http://other.test/"),
            ("C", "http://same.test/"),
        ]);

        let unique = ProbePipeline::deduplicate(input);

        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].name, "A");
        assert_eq!(unique[1].name, "B");
    }

    #[test]
    fn test_new__clamps_zero_concurrency() {
        let pipeline = ProbePipeline::new(
            Arc::new(ScriptedProbe::new(&[])),
            0,
            Duration::from_secs(1),
        );
        assert_eq!(pipeline.concurrency(), 1);
    }

    #[test]
    fn test_success_rate() {
        let candidate = Candidate::new("A", "http://a.test/", 0).unwrap();
        let batch = ProbeBatch {
            results: vec![
                ProbeResult::success(candidate.clone(), Duration::from_millis(1), Some(200)),
                ProbeResult::failure(candidate, Duration::from_millis(1), ProbeError::Timeout),
            ],
            unsupported: 3,
        };

        assert_eq!(batch.success_rate(), 50.0);
    }
}
