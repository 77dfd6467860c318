//! Sample channel list

use std::fs;
use std::path::Path;

use crate::core::error::Result;

pub const SAMPLE_CHANNELS: &[&str] = &[
    "CCTV1,http://example.com/cctv1",
    "CCTV5,http://example.com/cctv5",
    "湖南卫视,http://example.com/hunan",
    "浙江卫视,http://example.com/zhejiang",
    "东方卫视,http://example.com/dongfang",
];

/// Write the sample list to `path` and return how many channels it holds.
pub fn write_sample_file<P: AsRef<Path>>(path: P) -> Result<usize> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let mut content = SAMPLE_CHANNELS.join("\n");
    content.push('\n');
    fs::write(path, content)?;

    Ok(SAMPLE_CHANNELS.len())
}
