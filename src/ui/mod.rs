//! User interface and interaction
//!
//! This module contains all components related to user interaction,
//! including CLI parsing, output writing, progress reporting,
//! and shell completion generation.

pub mod cli;
pub mod color;
pub mod completion;
pub mod output;
pub mod progress;

// Re-export commonly used items
pub use cli::{Cli, Commands, cli_to_config};
pub use completion::print_completions;
pub use progress::ProgressReporter;
