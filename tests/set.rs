//! set: append, idempotence, same-family replace, dual-stack.

mod common;

use common::{encoded, entry_names, ip, parse};
use hostsfile::{Address, HostsError, HostsFile};

fn sample() -> HostsFile {
    parse("127.0.0.1 foobar\n192.168.0.1 bazbaz blahbar\n")
}

#[test]
fn new_hostname_is_appended() {
    let mut hosts = sample();
    hosts.set(ip("10.0.0.1"), "tendot").unwrap();
    assert_eq!(hosts.len(), 3);
    assert_eq!(
        encoded(&hosts),
        "127.0.0.1 foobar\n192.168.0.1 bazbaz blahbar\n10.0.0.1 tendot\n"
    );
}

#[test]
fn set_is_idempotent() {
    let mut once = sample();
    once.set(ip("10.0.0.1"), "tendot").unwrap();
    let mut twice = once.clone();
    twice.set(ip("10.0.0.1"), "tendot").unwrap();
    assert_eq!(once, twice);
    assert_eq!(twice.len(), 3);
}

#[test]
fn existing_binding_is_left_in_place() {
    let mut hosts = sample();
    hosts.set(ip("192.168.0.1"), "blahbar").unwrap();
    assert_eq!(hosts, sample());
}

#[test]
fn same_family_rebinding_replaces() {
    let mut hosts = HostsFile::new();
    hosts.set(ip("10.0.0.1"), "h").unwrap();
    hosts.set(ip("10.0.0.2"), "h").unwrap();
    assert_eq!(hosts.addresses("h"), vec![ip("10.0.0.2")]);
    assert_eq!(hosts.entries().count(), 1);
}

#[test]
fn rebinding_moves_hostname_out_of_shared_entry() {
    let mut hosts = sample();
    hosts.set(ip("192.168.3.7"), "bazbaz").unwrap();
    assert_eq!(
        entry_names(&hosts),
        vec![
            (ip("127.0.0.1"), vec!["foobar".to_string()]),
            (ip("192.168.0.1"), vec!["blahbar".to_string()]),
            (ip("192.168.3.7"), vec!["bazbaz".to_string()]),
        ]
    );
}

#[test]
fn emptied_entry_is_deleted() {
    let mut hosts = parse("# header\n127.0.0.1 foobar\n\n10.0.0.1 other\n");
    hosts.set(ip("192.168.3.7"), "foobar").unwrap();
    assert_eq!(
        encoded(&hosts),
        "# header\n\n10.0.0.1 other\n192.168.3.7 foobar\n"
    );
}

#[test]
fn dual_stack_bindings_coexist() {
    let mut hosts = HostsFile::new();
    hosts.set(ip("127.0.0.1"), "h").unwrap();
    hosts.set(ip("::1"), "h").unwrap();
    assert_eq!(hosts.entries().count(), 2);
    assert_eq!(hosts.addresses("h"), vec![ip("127.0.0.1"), ip("::1")]);

    hosts.set(ip("fe80::1"), "h").unwrap();
    assert_eq!(hosts.addresses("h"), vec![ip("127.0.0.1"), ip("fe80::1")]);
}

#[test]
fn duplicated_binding_in_file_is_collapsed() {
    let mut hosts = parse("10.0.0.1 h\n10.0.0.2 h\n10.0.0.1 h other\n");
    hosts.set(ip("10.0.0.1"), "h").unwrap();
    assert_eq!(encoded(&hosts), "10.0.0.1 h\n10.0.0.1 other\n");
}

#[test]
fn empty_hostname_is_rejected() {
    let mut hosts = sample();
    let err = hosts.set(ip("10.0.0.1"), "").unwrap_err();
    assert!(matches!(err, HostsError::EmptyHostname));
    assert!(err.is_validation());
    assert_eq!(hosts, sample());
}

#[test]
fn unencodable_hostnames_are_rejected() {
    let mut hosts = HostsFile::new();
    for bad in ["two words", "#comment", "tab\there"] {
        let err = hosts.set(ip("10.0.0.1"), bad).unwrap_err();
        assert!(matches!(err, HostsError::InvalidHostname(_)), "{bad:?}");
    }
    assert!(hosts.is_empty());
}

#[test]
fn scoped_binding_matches_only_with_same_zone() {
    let mut hosts = parse("fe80::1%lo0 localhost\n");
    hosts
        .set(Address::scoped("fe80::1".parse().unwrap(), "lo0"), "localhost")
        .unwrap();
    assert_eq!(encoded(&hosts), "fe80::1%lo0 localhost\n");

    hosts.set(ip("fe80::1"), "localhost").unwrap();
    assert_eq!(encoded(&hosts), "fe80::1 localhost\n");
}

#[test]
fn ipv4_mapped_entry_counts_as_ipv4() {
    let mut hosts = parse("::ffff:10.0.0.1 h\n::1 h\n");
    hosts.set(ip("10.0.0.1"), "h").unwrap();
    assert_eq!(encoded(&hosts), "::ffff:10.0.0.1 h\n::1 h\n");

    hosts.set(ip("10.0.0.2"), "h").unwrap();
    assert_eq!(encoded(&hosts), "::1 h\n10.0.0.2 h\n");
}
