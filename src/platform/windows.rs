//! Windows platform implementations.

use anyhow::Result;
use std::os::windows::io::{AsRawHandle, RawHandle};
use std::path::{Path, PathBuf};
use windows_sys::Win32::Foundation::HANDLE;
use windows_sys::Win32::Storage::FileSystem::{GetFileType, FILE_TYPE_DISK, FILE_TYPE_PIPE};

pub fn default_hosts_path() -> PathBuf {
    let root = std::env::var_os("SystemRoot").unwrap_or_else(|| r"C:\Windows".into());
    PathBuf::from(root)
        .join("System32")
        .join("drivers")
        .join("etc")
        .join("hosts")
}

/// Pipes and redirected files count as piped input; the console and
/// character devices such as NUL do not.
pub fn stdin_is_piped() -> bool {
    handle_is_piped(std::io::stdin().as_raw_handle())
}

pub fn handle_is_piped(handle: RawHandle) -> bool {
    if handle.is_null() {
        return false;
    }
    // SAFETY: GetFileType only inspects the handle; an invalid handle yields FILE_TYPE_UNKNOWN.
    let file_type = unsafe { GetFileType(handle as HANDLE) };
    file_type == FILE_TYPE_PIPE || file_type == FILE_TYPE_DISK
}

/// The temp file lives in the hosts directory and inherits its ACL.
pub fn copy_ownership(_from: &Path, _to: &Path) -> Result<()> {
    Ok(())
}
