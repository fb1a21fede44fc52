//! Runtime settings and hosts file path resolution.
//!
//! Supports HOSTSFILE_PATH env var override for testing.

use std::path::PathBuf;

use crate::platform;

/// Environment variable that overrides the OS default hosts file.
pub const HOSTS_PATH_ENV: &str = "HOSTSFILE_PATH";

/// Settings for one invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub hosts_file: PathBuf,
    pub dry_run: bool,
}

impl Settings {
    /// Build settings from CLI flags, falling back to env and OS defaults.
    pub fn resolve(file: Option<PathBuf>, dry_run: bool) -> Self {
        Self {
            hosts_file: file.unwrap_or_else(hosts_path),
            dry_run,
        }
    }
}

/// Hosts file path (respects HOSTSFILE_PATH).
pub fn hosts_path() -> PathBuf {
    match std::env::var_os(HOSTS_PATH_ENV) {
        Some(p) if !p.is_empty() => PathBuf::from(p),
        _ => platform::default_hosts_path(),
    }
}
