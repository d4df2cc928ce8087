//! HTML rendering of a directory listing

use std::cmp::Ordering;
use std::path::Path;

use super::thumbnail::thumbnail_url;

const STYLE: &str = "body { font-family: Arial, sans-serif; } \
table { border-collapse: collapse; } td { padding: 4px 8px; } \
a { text-decoration: none; color: #333; } a:hover { text-decoration: underline; }";

/// One child of the directory being listed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub name: String,
    pub is_dir: bool,
}

/// Directories first, then files, each group by name.
pub fn sort_entries(entries: &mut [ListingEntry]) {
    entries.sort_by(|a, b| match (a.is_dir, b.is_dir) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a.name.cmp(&b.name),
    });
}

/// Render the listing page for the directory with index key `key`.
///
/// `dir` is the absolute directory path, used to name file thumbnails.
pub fn render(key: &str, dir: &Path, entries: &[ListingEntry]) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html><head><meta charset=\"UTF-8\"><title>File Browser</title>");
    html.push_str(&format!("<style>{}</style></head><body>\n", STYLE));
    html.push_str(&format!("<h1>Browsing: {}</h1>\n<table>\n", escape_html(key)));
    html.push_str(&format!(
        "<tr><td></td><td><a href=\"{}\">📁 ..</a></td></tr>\n",
        href(&parent_key(key))
    ));

    for entry in entries {
        let child = child_key(key, &entry.name);
        if entry.is_dir {
            html.push_str(&format!(
                "<tr><td></td><td><a href=\"{}\">📁 {}</a></td></tr>\n",
                href(&child),
                escape_html(&entry.name)
            ));
        } else {
            html.push_str(&format!(
                "<tr><td><img src=\"{}\" alt=\"\"></td><td><span>📄 {}</span></td></tr>\n",
                thumbnail_url(&dir.join(&entry.name)),
                escape_html(&entry.name)
            ));
        }
    }

    html.push_str("</table></body></html>\n");
    html
}

/// Key of the parent directory; the root is its own parent.
pub fn parent_key(key: &str) -> String {
    match key.trim_end_matches('/').rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(idx) => key[..idx].to_string(),
    }
}

fn child_key(key: &str, name: &str) -> String {
    if key.ends_with('/') {
        format!("{}{}", key, name)
    } else {
        format!("{}/{}", key, name)
    }
}

/// Percent-encode each segment of a key for use in an `href`.
fn href(key: &str) -> String {
    let encoded: Vec<String> = key
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect();
    let joined = encoded.join("/");
    if joined.is_empty() {
        "/".to_string()
    } else {
        joined
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
