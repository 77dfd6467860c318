//! Reading channel list files

use std::fs;
use std::path::Path;

use log::warn;

use crate::core::constants::files;
use crate::core::error::{ChanProbeError, Result};

/// Raw lines of an input file and whether decoding needed the fallback.
#[derive(Debug, Clone, Default)]
pub struct InputLines {
    pub lines: Vec<String>,
    /// The file was not valid UTF-8 and was decoded lossily
    pub lossy: bool,
}

/// Read a channel list into lines.
///
/// Invalid UTF-8 is decoded lossily (one fallback) instead of failing, so a
/// list saved in a legacy encoding still yields its ASCII URLs. A missing or
/// unreadable file is an error.
pub fn read_lines<P: AsRef<Path>>(path: P) -> Result<InputLines> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ChanProbeError::FileNotFound(path.display().to_string()));
    }

    let bytes = fs::read(path)?;
    let (content, lossy) = match String::from_utf8(bytes) {
        Ok(content) => (content, false),
        Err(err) => {
            warn!(
                "{} is not valid UTF-8, falling back to lossy decoding",
                path.display()
            );
            (String::from_utf8_lossy(err.as_bytes()).into_owned(), true)
        }
    };

    Ok(InputLines {
        lines: split_lines(&content),
        lossy,
    })
}

fn split_lines(content: &str) -> Vec<String> {
    content
        .strip_prefix(files::UTF8_BOM)
        .unwrap_or(content)
        .lines()
        .map(str::to_string)
        .collect()
}
