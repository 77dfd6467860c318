//! chanprobe: probe channel lists and keep the fastest reachable streams
//!
//! The pipeline reads a `name,url` list, probes every supported URL
//! concurrently with a bounded worker pool, ranks the reachable channels by
//! latency and writes them back out.

pub mod config;
pub mod core;
pub mod discovery;
pub mod reporting;
pub mod ui;
pub mod validation;

// Re-export commonly used items
pub use config::{CliConfig, Config};
pub use core::{Candidate, ChanProbeError, Result, Scheme};
pub use discovery::{ParsedList, parse_lines, read_lines};
pub use validation::{
    ProbeBatch, ProbeChannels, ProbePipeline, ProbeResult, RankMode, RankedList, rank,
};
