use crate::config::Config;
use crate::discovery::ParseStats;
use crate::validation::ProbeResult;
use log::{debug, error, info, warn};
use std::path::Path;

/// Initialize the logger with appropriate level based on verbosity
pub fn init_logger(verbose: bool, quiet: bool) {
    // A second call keeps the first logger
    let _ = env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Debug)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .try_init();

    set_verbosity(verbose, quiet);
}

/// Change the active level, e.g. once a config file has been merged in
pub fn set_verbosity(verbose: bool, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Off
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Off // Only show structured logs in verbose mode
    };
    log::set_max_level(level);

    debug!("Logger level set to {level:?}");
}

/// Log configuration information
pub fn log_config_info(config: &Config) {
    let timeout = config.timeout_duration().as_secs();
    let concurrency = config.concurrency();
    let skip_ssl_verification = config.skip_ssl_verification.unwrap_or(false);

    info!("Configuration: concurrency={concurrency}, timeout={timeout}s");
    info!("Ranking: mode={:?}", config.rank_mode());
    info!(
        "Probing: range_bytes={:?}, ffprobe={}, dedup={}",
        config.range_bytes,
        config.ffprobe_path(),
        config.dedup.unwrap_or(false)
    );
    info!(
        "HTTP: skip_ssl={skip_ssl_verification}, proxy={:?}",
        config.proxy
    );
}

/// Log input file information
pub fn log_input_info<P: AsRef<Path>>(path: P, line_count: usize, lossy: bool) {
    info!(
        "Read {line_count} line(s) from {}{}",
        path.as_ref().display(),
        if lossy { " (lossy UTF-8)" } else { "" }
    );
}

/// Log what the parser kept and skipped
pub fn log_parse_stats(stats: &ParseStats) {
    info!(
        "Parsed {} candidate(s) from {} line(s)",
        stats.candidates, stats.total_lines
    );
    if stats.skipped() > 0 {
        debug!(
            "Skipped {} line(s): {} blank, {} comment, {} malformed",
            stats.skipped(),
            stats.blank,
            stats.comments,
            stats.malformed
        );
    }
}

/// Log probing start
pub fn log_probe_start(candidate_count: usize, concurrency: usize) {
    info!("Probing {candidate_count} candidate(s) with up to {concurrency} in flight");
}

/// Log a single probe result for debugging
pub fn log_probe_result(result: &ProbeResult) {
    match &result.outcome {
        Ok(_) => debug!(
            "✓ {} {} -> {}ms",
            result.candidate.name,
            result.candidate.url,
            result.latency_millis()
        ),
        Err(err) => debug!(
            "✗ {} {} -> {err} ({}ms)",
            result.candidate.name,
            result.candidate.url,
            result.latency_millis()
        ),
    }
}

/// Log probing completion
pub fn log_probe_complete(probed: usize, reachable: usize, unsupported: usize, duration_ms: u128) {
    if reachable > 0 {
        info!(
            "✅ Probing complete: {reachable}/{probed} reachable, {unsupported} unsupported ({duration_ms}ms)"
        );
    } else {
        warn!(
            "❌ Probing complete: no reachable channels out of {probed}, {unsupported} unsupported ({duration_ms}ms)"
        );
    }
}

/// Log error information
pub fn log_error(message: &str, source: Option<&dyn std::error::Error>) {
    match source {
        Some(err) => error!("{message}: {err}"),
        None => error!("{message}"),
    }
}
