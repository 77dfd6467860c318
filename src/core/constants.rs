/// Application-wide constants to avoid magic values throughout the codebase.
///
/// This module centralizes all magic strings, numbers, and other literal values
/// used across the application, making them easier to maintain and modify.
/// Output format constants
pub mod output_formats {
    /// Text output format - colorful, emoji-enhanced output
    pub const TEXT: &str = "text";
    /// JSON output format - structured summary for automation
    pub const JSON: &str = "json";
    /// Minimal output format - plain text without colors or emojis
    pub const MINIMAL: &str = "minimal";

    /// Default output format
    pub const DEFAULT: &str = TEXT;

    /// All valid output formats
    pub const ALL: [&str; 3] = [TEXT, JSON, MINIMAL];
}

/// Timeout and duration constants
pub mod timeouts {
    /// Default per-probe timeout in seconds
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 3;
    /// Maximum reasonable per-probe timeout in seconds
    pub const MAX_TIMEOUT_SECONDS: u64 = 300;
    /// Slack added on top of the probe timeout before a probe is abandoned
    pub const SCHEDULING_SLACK_MS: u64 = 500;
}

/// Default configuration values
pub mod defaults {
    /// Default number of probes in flight
    pub const CONCURRENCY: usize = 50;
    /// Upper bound on the number of probes in flight
    pub const MAX_CONCURRENCY: usize = 1000;
    /// Default number of channels kept in top-N mode
    pub const TOP_N: usize = 3;
    /// Default external tool used for rtmp probes
    pub const FFPROBE: &str = "ffprobe";
    /// Default output file
    pub const OUTPUT_FILE: &str = "fastest_channels.txt";
}

/// Error message constants
pub mod error_messages {
    /// Description of a probe that ran out of time
    pub const OPERATION_TIMED_OUT: &str = "operation timed out";
}

/// File processing constants
pub mod files {
    /// Config file looked up in the working directory and its parents
    pub const CONFIG_FILE_NAME: &str = ".chanprobe.toml";
    /// How many parent directories are searched for a config file
    pub const CONFIG_SEARCH_DEPTH: usize = 3;
    /// Byte order mark stripped from the start of input files
    pub const UTF8_BOM: char = '\u{feff}';
}

/// Channel list syntax
pub mod syntax {
    /// Separator between channel name and URL
    pub const FIELD_SEPARATOR: char = ',';
    /// Marker that every stream URL must contain
    pub const SCHEME_SEPARATOR: &str = "://";
    /// Start of a trailing URL suffix that is stripped
    pub const URL_SUFFIX_MARKER: char = '$';
    /// Prefix of comment lines
    pub const COMMENT_PREFIX: char = '#';
}

/// Display and formatting constants
pub mod display {
    /// Emoji for success status
    pub const SUCCESS_EMOJI: &str = "✅";
    /// Emoji for warning status
    pub const WARNING_EMOJI: &str = "⚠️";
    /// Emoji for error status
    pub const ERROR_EMOJI: &str = "❌";
    /// Emoji for file information
    pub const FILE_EMOJI: &str = "📁";
    /// Emoji for the ranking header
    pub const RANKING_EMOJI: &str = "📺";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_formats_constants() {
        assert_eq!(output_formats::TEXT, "text");
        assert_eq!(output_formats::JSON, "json");
        assert_eq!(output_formats::MINIMAL, "minimal");
        assert_eq!(output_formats::DEFAULT, "text");
        assert_eq!(output_formats::ALL.len(), 3);
    }

    #[test]
    fn test_default_constants() {
        assert_eq!(timeouts::DEFAULT_TIMEOUT_SECONDS, 3);
        assert_eq!(defaults::CONCURRENCY, 50);
        assert_eq!(defaults::TOP_N, 3);
        assert_eq!(defaults::FFPROBE, "ffprobe");
    }

    #[test]
    fn test_syntax_constants() {
        assert_eq!(syntax::FIELD_SEPARATOR, ',');
        assert_eq!(syntax::SCHEME_SEPARATOR, "://");
        assert_eq!(syntax::URL_SUFFIX_MARKER, '$');
        assert_eq!(syntax::COMMENT_PREFIX, '#');
    }

    #[test]
    fn test_error_message_constants() {
        assert_eq!(error_messages::OPERATION_TIMED_OUT, "operation timed out");
    }
}
