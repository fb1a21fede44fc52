//! Platform abstraction for hosts file location, stdin detection and atomic replace.

#[cfg(unix)]
pub mod unix;

#[cfg(windows)]
pub mod windows;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// OS default hosts file.
pub fn default_hosts_path() -> PathBuf {
    #[cfg(unix)]
    return unix::default_hosts_path();

    #[cfg(windows)]
    return windows::default_hosts_path();
}

/// Whether data was piped to stdin (a pipe or redirected file, not a terminal or device).
pub fn stdin_is_piped() -> bool {
    #[cfg(unix)]
    return unix::stdin_is_piped();

    #[cfg(windows)]
    return windows::stdin_is_piped();
}

/// Fail early if the hosts file cannot be opened for writing.
pub fn ensure_writable(path: &Path) -> Result<()> {
    fs::OpenOptions::new()
        .write(true)
        .open(path)
        .with_context(|| format!("open {} for writing", path.display()))?;
    Ok(())
}

/// Create a temp file next to `path` carrying its permissions (and owner on Unix).
/// Same directory keeps the final rename on one filesystem.
pub fn temp_file_for(path: &Path) -> Result<NamedTempFile> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let temp = tempfile::Builder::new()
        .prefix(".hostsfile-")
        .tempfile_in(dir)
        .with_context(|| format!("create temp file in {}", dir.display()))?;

    #[cfg(unix)]
    unix::copy_ownership(path, temp.path())?;

    #[cfg(windows)]
    windows::copy_ownership(path, temp.path())?;

    Ok(temp)
}

/// Sync the temp file and rename it over `path`.
pub fn replace_atomically(temp: NamedTempFile, path: &Path) -> Result<()> {
    temp.as_file().sync_all().context("sync temp hosts file")?;
    temp.persist(path)
        .with_context(|| format!("replace {}", path.display()))?;
    Ok(())
}
