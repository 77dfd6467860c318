//! Per-scheme stream probes

use async_trait::async_trait;
use log::warn;
use reqwest::header::RANGE;
use reqwest::redirect::Policy;
use std::process::Stdio;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use tokio::process::Command;
use tokio::time::{Duration, timeout};

use crate::config::Config;
use crate::core::error::Result;
use crate::core::types::Scheme;
use crate::validation::result::{ProbeError, ProbeOutcome};

/// A single bounded-time reachability check against one URL.
#[async_trait]
pub trait Probe: Send + Sync {
    async fn probe(&self, url: &str) -> std::result::Result<ProbeOutcome, ProbeError>;
}

/// Probes `http`/`https` URLs with a GET and stops at the response headers.
///
/// Any 2xx status counts as reachable, which includes `206 Partial Content`
/// answered to the optional Range header.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: reqwest::Client,
    range_bytes: Option<u64>,
}

impl HttpProbe {
    pub fn new(client: reqwest::Client, range_bytes: Option<u64>) -> Self {
        Self {
            client,
            range_bytes,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(build_client(config)?, config.range_bytes))
    }
}

/// Build the HTTP client shared by every http probe of a run.
pub fn build_client(config: &Config) -> Result<reqwest::Client> {
    let user_agent = config.user_agent.as_deref().unwrap_or(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    let probe_timeout = config.timeout_duration();
    let concurrency = config.concurrency();

    let mut client_builder = reqwest::Client::builder()
        .timeout(probe_timeout)
        .connect_timeout(probe_timeout)
        .redirect(Policy::limited(10))
        .user_agent(user_agent)
        .pool_max_idle_per_host(concurrency.min(20))
        .pool_idle_timeout(Duration::from_secs(30));

    if config.skip_ssl_verification.unwrap_or(false) {
        client_builder = client_builder.danger_accept_invalid_certs(true);
    }

    if let Some(ref proxy_url) = config.proxy {
        client_builder = client_builder.proxy(reqwest::Proxy::all(proxy_url)?);
    }

    Ok(client_builder.build()?)
}

#[async_trait]
impl Probe for HttpProbe {
    async fn probe(&self, url: &str) -> std::result::Result<ProbeOutcome, ProbeError> {
        let mut request = self.client.get(url);
        if let Some(bytes) = self.range_bytes {
            request = request.header(RANGE, format!("bytes=0-{}", bytes.saturating_sub(1)));
        }

        // Resolves once headers arrive; the body is never read
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(ProbeOutcome {
                status: Some(status.as_u16()),
            })
        } else {
            Err(ProbeError::Status(status.as_u16()))
        }
    }
}

/// Probes `rtmp` URLs by asking an external media probe tool (ffprobe) for
/// the stream duration.
///
/// When the tool cannot be started, every later probe of the run fails fast
/// with `ToolUnavailable` and a single warning is logged.
#[derive(Debug)]
pub struct RtmpProbe {
    program: String,
    timeout: Duration,
    unavailable: AtomicBool,
}

impl RtmpProbe {
    pub fn new<S: Into<String>>(program: S, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
            unavailable: AtomicBool::new(false),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.ffprobe_path(), config.timeout_duration())
    }

    pub fn is_available(&self) -> bool {
        !self.unavailable.load(AtomicOrdering::Relaxed)
    }

    fn command(&self, url: &str) -> Command {
        // ffprobe expects its own -timeout in microseconds
        let micros = self.timeout.as_micros().to_string();

        let mut command = Command::new(&self.program);
        command
            .args([
                "-v",
                "error",
                "-rtmp_transport",
                "tcp",
                "-select_streams",
                "v:0",
                "-show_entries",
                "format=duration",
                "-of",
                "default=noprint_wrappers=1:nokey=1",
                "-timeout",
                micros.as_str(),
            ])
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        command
    }
}

#[async_trait]
impl Probe for RtmpProbe {
    async fn probe(&self, url: &str) -> std::result::Result<ProbeOutcome, ProbeError> {
        if !self.is_available() {
            return Err(ProbeError::ToolUnavailable(self.program.clone()));
        }

        let child = match self.command(url).spawn() {
            Ok(child) => child,
            Err(err) => {
                if !self.unavailable.swap(true, AtomicOrdering::Relaxed) {
                    warn!(
                        "Could not start '{}' ({err}), rtmp streams will be reported as unreachable",
                        self.program
                    );
                }
                return Err(ProbeError::ToolUnavailable(format!("{}: {err}", self.program)));
            }
        };

        // Dropping the child on timeout kills it
        let output = match timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(err)) => return Err(ProbeError::ToolFailed(err.to_string())),
            Err(_) => return Err(ProbeError::Timeout),
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = stderr
                .lines()
                .map(str::trim)
                .find(|line| !line.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| output.status.to_string());
            return Err(ProbeError::ToolFailed(reason));
        }

        if String::from_utf8_lossy(&output.stdout).trim().is_empty() {
            return Err(ProbeError::ToolFailed("no duration reported".to_string()));
        }

        Ok(ProbeOutcome { status: None })
    }
}

/// Dispatches each URL to the probe for its scheme.
pub struct SchemeRouter {
    http: Arc<dyn Probe>,
    rtmp: Arc<dyn Probe>,
}

impl SchemeRouter {
    pub fn new(http: Arc<dyn Probe>, rtmp: Arc<dyn Probe>) -> Self {
        Self { http, rtmp }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            Arc::new(HttpProbe::from_config(config)?),
            Arc::new(RtmpProbe::from_config(config)),
        ))
    }
}

#[async_trait]
impl Probe for SchemeRouter {
    async fn probe(&self, url: &str) -> std::result::Result<ProbeOutcome, ProbeError> {
        match Scheme::from_url(url) {
            Scheme::Http => self.http.probe(url).await,
            Scheme::Rtmp => self.rtmp.probe(url).await,
            Scheme::Unsupported => Err(ProbeError::UnsupportedScheme),
        }
    }
}
