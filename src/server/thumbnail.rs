//! Thumbnail file naming
//!
//! Thumbnails are looked up in a freedesktop-style cache where each file is
//! named after the MD5 of the source file's `file://` URI.

use std::path::Path;

/// Cache file name of the thumbnail for `absolute`.
pub fn thumbnail_name(absolute: &Path) -> String {
    let uri = format!("file://{}", absolute.display());
    format!("{:x}.png", md5::compute(uri.as_bytes()))
}

/// URL under which the browser serves the thumbnail for `absolute`.
pub fn thumbnail_url(absolute: &Path) -> String {
    format!("/thumb/{}", thumbnail_name(absolute))
}
