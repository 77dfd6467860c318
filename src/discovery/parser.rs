//! Channel list line parsing

use crate::core::constants::syntax;
use crate::core::types::Candidate;

/// What a single raw line turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// A `name,url` entry
    Entry {
        name: String,
        url: String,
    },
    Blank,
    Comment,
    /// Anything without both a separator and a scheme, or whose URL lost its
    /// scheme once the `$` suffix was stripped
    Malformed,
}

/// Counts of what the parser kept and skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub total_lines: usize,
    pub candidates: usize,
    pub blank: usize,
    pub comments: usize,
    pub malformed: usize,
}

impl ParseStats {
    /// Lines that produced no candidate
    pub fn skipped(&self) -> usize {
        self.blank + self.comments + self.malformed
    }
}

/// Parsed channel list: candidates in input order plus skip counts.
#[derive(Debug, Clone, Default)]
pub struct ParsedList {
    pub candidates: Vec<Candidate>,
    pub stats: ParseStats,
}

/// Classify one raw line.
///
/// ```
/// use chanprobe::discovery::parser::{classify_line, LineKind};
///
/// assert_eq!(
///     classify_line("A,http://x/y$token"),
///     LineKind::Entry { name: "A".into(), url: "http://x/y".into() }
/// );
/// assert_eq!(classify_line("CCTV,#genre#"), LineKind::Malformed);
/// ```
pub fn classify_line(line: &str) -> LineKind {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineKind::Blank;
    }
    if trimmed.starts_with(syntax::COMMENT_PREFIX) {
        return LineKind::Comment;
    }
    if !trimmed.contains(syntax::FIELD_SEPARATOR) || !trimmed.contains(syntax::SCHEME_SEPARATOR) {
        return LineKind::Malformed;
    }

    let Some((name, url)) = trimmed.split_once(syntax::FIELD_SEPARATOR) else {
        return LineKind::Malformed;
    };

    let url = match url.split_once(syntax::URL_SUFFIX_MARKER) {
        Some((head, _suffix)) => head,
        None => url,
    }
    .trim();

    // "://x,y" has both markers but the scheme ends up in the name
    if !url.contains(syntax::SCHEME_SEPARATOR) {
        return LineKind::Malformed;
    }

    LineKind::Entry {
        name: name.trim().to_string(),
        url: url.to_string(),
    }
}

/// Parse raw lines into candidates, silently skipping everything else.
pub fn parse_lines<I, S>(lines: I) -> ParsedList
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parsed = ParsedList::default();

    for line in lines {
        parsed.stats.total_lines += 1;

        match classify_line(line.as_ref()) {
            LineKind::Entry { name, url } => {
                let index = parsed.candidates.len();
                match Candidate::new(name, url, index) {
                    Ok(candidate) => parsed.candidates.push(candidate),
                    Err(_) => parsed.stats.malformed += 1,
                }
            }
            LineKind::Blank => parsed.stats.blank += 1,
            LineKind::Comment => parsed.stats.comments += 1,
            LineKind::Malformed => parsed.stats.malformed += 1,
        }
    }

    parsed.stats.candidates = parsed.candidates.len();
    parsed
}
