//! Cross-platform filesystem utilities
//!
//! This module provides helpers that work correctly on both Unix and Windows:
//! - `normalize_path`: Strips Windows `\\?\` prefix from canonicalized paths
//! - `write_atomic`: Write-to-temp-then-rename so readers never see a partial file
//! - `get_thumbnail_dir`: Returns the platform thumbnail cache directory

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Normalize Windows paths by removing the `\\?\` prefix if present.
///
/// On Windows, `Path::canonicalize()` returns paths with the extended-length path prefix
/// (`\\?\C:\...`), which breaks prefix comparisons against user-supplied paths.
/// This function strips the prefix on Windows while being a no-op on Unix.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use tagger::fs_utils::normalize_path;
///
/// // On Unix, path is returned unchanged
/// let path = PathBuf::from("/home/user/photos");
/// assert_eq!(normalize_path(&path), path);
/// ```
pub fn normalize_path(path: &Path) -> PathBuf {
    #[cfg(windows)]
    {
        let s = path.to_string_lossy();
        // Handle UNC paths: \\?\UNC\server\share -> \\server\share
        if let Some(stripped) = s.strip_prefix(r"\\?\UNC\") {
            return PathBuf::from(format!(r"\\{}", stripped));
        }
        // Handle local paths: \\?\C:\path -> C:\path
        if let Some(stripped) = s.strip_prefix(r"\\?\") {
            return PathBuf::from(stripped);
        }
    }
    path.to_path_buf()
}

/// Replace `path` with `contents` without ever exposing a half-written file.
///
/// The data is written and synced to a uniquely named sibling temp file
/// (`<name>.<random>.tmp`), which is then renamed over the target. Each
/// writer gets its own temp file, so concurrent writers never share one; the
/// last rename wins. The temp file is removed if any step fails.
pub fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut prefix = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("tagger"));
    prefix.push(".");

    let mut temp = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(".tmp")
        .tempfile_in(dir)?;
    temp.write_all(contents)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Get the platform thumbnail cache directory (freedesktop "normal" size).
///
/// - **Windows**: `%LOCALAPPDATA%\thumbnails\normal`
/// - **Unix**: `$XDG_CACHE_HOME/thumbnails/normal` or `~/.cache/thumbnails/normal`
/// - **Fallback**: System temp directory + `thumbnails/normal`
pub fn get_thumbnail_dir() -> PathBuf {
    #[cfg(windows)]
    {
        if let Ok(local_appdata) = std::env::var("LOCALAPPDATA") {
            return PathBuf::from(local_appdata).join("thumbnails").join("normal");
        }
        if let Some(home) = dirs::home_dir() {
            return home
                .join("AppData")
                .join("Local")
                .join("thumbnails")
                .join("normal");
        }
    }

    #[cfg(not(windows))]
    {
        if let Ok(xdg_cache) = std::env::var("XDG_CACHE_HOME") {
            if !xdg_cache.is_empty() {
                return PathBuf::from(xdg_cache).join("thumbnails").join("normal");
            }
        }
        if let Some(home) = dirs::home_dir() {
            return home.join(".cache").join("thumbnails").join("normal");
        }
    }

    // Last resort: temp directory
    std::env::temp_dir().join("thumbnails").join("normal")
}
