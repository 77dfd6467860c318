use std::fmt;

use crate::core::constants::syntax;

/// A named stream entry parsed from a channel list, waiting to be probed.
///
/// The `index` is the candidate's position in the parsed list. Ranking uses it
/// to break latency ties, so equal latencies keep their input order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Candidate {
    /// Channel name as written before the first comma
    pub name: String,
    /// Stream URL, always containing `://`
    pub url: String,
    /// Position among the parsed candidates (0-indexed)
    pub index: usize,
}

/// Errors that can occur when creating a `Candidate`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateError {
    /// URL is missing or empty
    MissingUrl,
    /// URL does not contain a `scheme://` marker
    MissingScheme,
}

impl fmt::Display for CandidateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingUrl => write!(f, "URL is required and cannot be empty"),
            Self::MissingScheme => write!(f, "URL must contain a scheme (e.g. http://)"),
        }
    }
}

impl std::error::Error for CandidateError {}

impl Candidate {
    /// Create a new Candidate, trimming both fields.
    ///
    /// # Examples
    /// ```
    /// use chanprobe::core::types::Candidate;
    ///
    /// let candidate = Candidate::new(" CCTV1 ", " http://example.com/cctv1 ", 0).unwrap();
    /// assert_eq!(candidate.name, "CCTV1");
    /// assert_eq!(candidate.url, "http://example.com/cctv1");
    /// ```
    pub fn new<N, U>(name: N, url: U, index: usize) -> Result<Self, CandidateError>
    where
        N: AsRef<str>,
        U: AsRef<str>,
    {
        let url = url.as_ref().trim();
        if url.is_empty() {
            return Err(CandidateError::MissingUrl);
        }
        if !url.contains(syntax::SCHEME_SEPARATOR) {
            return Err(CandidateError::MissingScheme);
        }

        Ok(Self {
            name: name.as_ref().trim().to_string(),
            url: url.to_string(),
            index,
        })
    }

    /// The probing strategy this candidate's URL calls for.
    pub fn scheme(&self) -> Scheme {
        Scheme::from_url(&self.url)
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.name, syntax::FIELD_SEPARATOR, self.url)
    }
}

/// URL scheme families the prober knows how to check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// `http://` and `https://`
    Http,
    /// `rtmp://` and its variants (`rtmps`, `rtmpt`, ...)
    Rtmp,
    /// Anything else; never probed
    Unsupported,
}

impl Scheme {
    pub fn from_url(url: &str) -> Self {
        let Some((scheme, _)) = url.split_once(syntax::SCHEME_SEPARATOR) else {
            return Scheme::Unsupported;
        };

        match scheme.trim().to_ascii_lowercase().as_str() {
            "http" | "https" => Scheme::Http,
            s if s.starts_with("rtmp") => Scheme::Rtmp,
            _ => Scheme::Unsupported,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Scheme::Unsupported)
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scheme::Http => write!(f, "http"),
            Scheme::Rtmp => write!(f, "rtmp"),
            Scheme::Unsupported => write!(f, "unsupported"),
        }
    }
}
