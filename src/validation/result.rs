use std::fmt;
use std::time::Duration;

use crate::core::constants::error_messages;
use crate::core::types::Candidate;

/// What a successful probe learned about the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProbeOutcome {
    /// HTTP status of the response; `None` for streams checked by the probe tool
    pub status: Option<u16>,
}

/// Why a probe did not count as reachable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    /// No answer within the probe timeout
    Timeout,
    /// The server answered with a non-2xx status
    Status(u16),
    /// Connection, TLS or protocol failure
    Network(String),
    /// The external probe tool could not be started
    ToolUnavailable(String),
    /// The external probe tool ran but could not open the stream
    ToolFailed(String),
    /// The URL scheme has no probe
    UnsupportedScheme,
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeError::Timeout => write!(f, "{}", error_messages::OPERATION_TIMED_OUT),
            ProbeError::Status(code) => write!(f, "HTTP {code}"),
            ProbeError::Network(msg) => write!(f, "{msg}"),
            ProbeError::ToolUnavailable(msg) => write!(f, "probe tool unavailable: {msg}"),
            ProbeError::ToolFailed(msg) => write!(f, "probe tool failed: {msg}"),
            ProbeError::UnsupportedScheme => write!(f, "unsupported scheme"),
        }
    }
}

impl std::error::Error for ProbeError {}

impl From<reqwest::Error> for ProbeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return ProbeError::Timeout;
        }

        let description = std::error::Error::source(&err)
            .map(|e| e.to_string())
            .unwrap_or_else(|| err.to_string());
        ProbeError::Network(description)
    }
}

/// One probed candidate. Created once by the pipeline and never changed.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeResult {
    pub candidate: Candidate,
    /// Wall-clock time from probe start until it resolved
    pub latency: Duration,
    pub outcome: Result<ProbeOutcome, ProbeError>,
}

impl ProbeResult {
    pub fn new(
        candidate: Candidate,
        latency: Duration,
        outcome: Result<ProbeOutcome, ProbeError>,
    ) -> Self {
        Self {
            candidate,
            latency,
            outcome,
        }
    }

    /// Create a ProbeResult for a reachable stream.
    pub fn success(candidate: Candidate, latency: Duration, status: Option<u16>) -> Self {
        Self::new(candidate, latency, Ok(ProbeOutcome { status }))
    }

    /// Create a ProbeResult for a failed probe.
    pub fn failure(candidate: Candidate, latency: Duration, error: ProbeError) -> Self {
        Self::new(candidate, latency, Err(error))
    }

    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn is_not_ok(&self) -> bool {
        !self.is_ok()
    }

    /// Latency in whole milliseconds
    pub fn latency_millis(&self) -> u64 {
        u64::try_from(self.latency.as_millis()).unwrap_or(u64::MAX)
    }

    pub fn error(&self) -> Option<&ProbeError> {
        self.outcome.as_ref().err()
    }
}

impl fmt::Display for ProbeResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.outcome {
            Ok(_) => write!(f, "{} - {}ms", self.candidate.name, self.latency_millis()),
            Err(err) => write!(
                f,
                "{} - {} ({}ms)",
                self.candidate.name,
                err,
                self.latency_millis()
            ),
        }
    }
}
