//! Stream probing and ranking
//!
//! This module probes candidates concurrently with a bounded
//! number of in-flight requests and ranks the reachable ones.

pub mod pipeline;
pub mod probe;
pub mod ranking;
pub mod result;

// Re-export commonly used items
pub use pipeline::{ProbeBatch, ProbeChannels, ProbePipeline};
pub use probe::{HttpProbe, Probe, RtmpProbe, SchemeRouter};
pub use ranking::{ChannelGroup, RankMode, RankedList, rank};
pub use result::{ProbeError, ProbeOutcome, ProbeResult};
