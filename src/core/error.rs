use std::fmt;

/// Error types for chanprobe operations that abort a run
#[derive(Debug)]
pub enum ChanProbeError {
    /// IO error (reading the channel list, writing the output file)
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// HTTP client construction error
    Http(reqwest::Error),

    /// TOML parsing error
    TomlParsing(toml::de::Error),

    /// File not found error
    FileNotFound(String),

    /// Invalid argument error
    InvalidArgument(String),
}

impl fmt::Display for ChanProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChanProbeError::Io(err) => write!(f, "IO error: {err}"),
            ChanProbeError::Config(msg) => write!(f, "Configuration error: {msg}"),
            ChanProbeError::Http(err) => write!(f, "HTTP error: {err}"),
            ChanProbeError::TomlParsing(err) => write!(f, "TOML parsing error: {err}"),
            ChanProbeError::FileNotFound(path) => write!(f, "File not found: {path}"),
            ChanProbeError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
        }
    }
}

impl std::error::Error for ChanProbeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ChanProbeError::Io(err) => Some(err),
            ChanProbeError::Http(err) => Some(err),
            ChanProbeError::TomlParsing(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ChanProbeError {
    fn from(err: std::io::Error) -> Self {
        ChanProbeError::Io(err)
    }
}

impl From<reqwest::Error> for ChanProbeError {
    fn from(err: reqwest::Error) -> Self {
        ChanProbeError::Http(err)
    }
}

impl From<toml::de::Error> for ChanProbeError {
    fn from(err: toml::de::Error) -> Self {
        ChanProbeError::TomlParsing(err)
    }
}

/// Type alias for Results using ChanProbeError
pub type Result<T> = std::result::Result<T, ChanProbeError>;
