//! Logging and run reporting
//!
//! This module handles structured logging and the end-of-run
//! summary for the application.

pub mod logging;
pub mod summary;

// Re-export commonly used items
pub use summary::RunSummary;
