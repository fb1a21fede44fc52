//! Windows stdin classification: files and pipes are input, NUL is not.

#![cfg(windows)]

mod common;

use hostsfile::platform::windows::handle_is_piped;
use std::fs::File;
use std::os::windows::io::AsRawHandle;

#[test]
fn nul_device_is_not_piped() {
    let nul = File::open("NUL").unwrap();
    assert!(!handle_is_piped(nul.as_raw_handle()));
}

#[test]
fn regular_file_is_piped() {
    let dir = common::temp_dir();
    let path = common::hosts_file(&dir, "127.0.0.1 localhost\n");
    let file = File::open(&path).unwrap();
    assert!(handle_is_piped(file.as_raw_handle()));
}

#[test]
fn null_handle_is_not_piped() {
    assert!(!handle_is_piped(std::ptr::null_mut()));
}
