//! Unix (macOS, Linux) platform implementations.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::os::fd::AsFd;
use std::os::unix::fs::{FileTypeExt, MetadataExt};
use std::path::{Path, PathBuf};

pub fn default_hosts_path() -> PathBuf {
    PathBuf::from("/etc/hosts")
}

/// Pipes, sockets and redirected files count as piped input; ttys and
/// character devices such as /dev/null do not.
pub fn stdin_is_piped() -> bool {
    let Ok(fd) = std::io::stdin().as_fd().try_clone_to_owned() else {
        return false;
    };
    match File::from(fd).metadata() {
        Ok(meta) => {
            let ft = meta.file_type();
            ft.is_fifo() || ft.is_socket() || ft.is_file()
        }
        Err(_) => false,
    }
}

/// Give `to` the mode and owner of `from`.
pub fn copy_ownership(from: &Path, to: &Path) -> Result<()> {
    let src = fs::metadata(from).with_context(|| format!("stat {}", from.display()))?;
    fs::set_permissions(to, src.permissions())
        .with_context(|| format!("chmod {}", to.display()))?;

    let dst = fs::metadata(to).with_context(|| format!("stat {}", to.display()))?;
    if dst.uid() != src.uid() || dst.gid() != src.gid() {
        std::os::unix::fs::chown(to, Some(src.uid()), Some(src.gid()))
            .with_context(|| format!("chown {}", to.display()))?;
    }
    Ok(())
}
