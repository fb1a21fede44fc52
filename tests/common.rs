//! Shared test helpers.

#![allow(dead_code)]

use std::net::IpAddr;
use std::path::PathBuf;
use tempfile::TempDir;

use hostsfile::HostsFile;

/// Create a temp directory for hosts files.
/// Uses current dir (workspace) so sandbox allows full access.
pub fn temp_dir() -> TempDir {
    tempfile::Builder::new()
        .prefix("hostsfile_test_")
        .tempdir_in(std::env::current_dir().unwrap_or_else(|_| std::path::Path::new(".").into()))
        .expect("temp dir")
}

/// Write `content` to `<dir>/hosts` and return its path.
pub fn hosts_file(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("hosts");
    std::fs::write(&path, content).expect("write hosts");
    path
}

pub fn ip(s: &str) -> IpAddr {
    s.parse().expect("valid ip")
}

pub fn parse(s: &str) -> HostsFile {
    s.parse().expect("valid hosts file")
}

pub fn encoded(hosts: &HostsFile) -> String {
    let mut out = Vec::new();
    hostsfile::encode(&mut out, hosts).expect("encode");
    String::from_utf8(out).expect("utf8")
}

/// Sorted hostnames of every entry, in file order.
pub fn entry_names(hosts: &HostsFile) -> Vec<(IpAddr, Vec<String>)> {
    hosts
        .entries()
        .map(|e| (e.address(), e.hostnames().map(String::from).collect()))
        .collect()
}
