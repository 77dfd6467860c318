//! Channel list discovery
//!
//! This module reads channel list files and turns their lines
//! into probe candidates.

pub mod parser;
pub mod reader;
pub mod sample;

// Re-export commonly used items
pub use parser::{LineKind, ParseStats, ParsedList, classify_line, parse_lines};
pub use reader::{InputLines, read_lines};
pub use sample::write_sample_file;
