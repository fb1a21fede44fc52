//! In-memory hosts file model: decode, set/remove, encode.
//!
//! A file is an ordered list of records, one per line. Comments and blank
//! lines are kept in place so that rewriting the file only touches the
//! entries a mutation actually changed. Inline comments after hostnames
//! (`127.0.0.1 host # note`) are dropped on decode.

use std::collections::BTreeSet;
use std::fmt;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::net::{IpAddr, Ipv6Addr};
use std::str::FromStr;

use tracing::{debug, trace};

use crate::error::{AddressError, HostsError};

/// Line terminator written after every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// IP address of an entry, with the zone of a scoped IPv6 literal (`fe80::1%lo0`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address {
    ip: IpAddr,
    zone: Option<String>,
}

impl Address {
    pub fn new(ip: IpAddr) -> Self {
        Self { ip, zone: None }
    }

    pub fn scoped(ip: Ipv6Addr, zone: impl Into<String>) -> Self {
        Self {
            ip: IpAddr::V6(ip),
            zone: Some(zone.into()),
        }
    }

    pub fn ip(&self) -> IpAddr {
        self.ip
    }

    pub fn zone(&self) -> Option<&str> {
        self.zone.as_deref()
    }

    /// IPv4-mapped IPv6 addresses count as IPv4.
    pub fn is_ipv4(&self) -> bool {
        self.ip.to_canonical().is_ipv4()
    }

    /// Same address and zone, with IPv4-mapped IPv6 equal to its IPv4 form.
    pub fn same_as(&self, other: &Address) -> bool {
        self.ip.to_canonical() == other.ip.to_canonical() && self.zone == other.zone
    }

    fn same_family(&self, other: &Address) -> bool {
        self.is_ipv4() == other.is_ipv4()
    }
}

impl From<IpAddr> for Address {
    fn from(ip: IpAddr) -> Self {
        Self::new(ip)
    }
}

impl PartialEq<IpAddr> for Address {
    fn eq(&self, other: &IpAddr) -> bool {
        self.zone.is_none() && self.ip == *other
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AddressError(s.to_string());
        match s.split_once('%') {
            None => s.parse().map(Address::new).map_err(|_| invalid()),
            Some((_, "")) => Err(invalid()),
            Some((ip, zone)) => {
                let ip: Ipv6Addr = ip.parse().map_err(|_| invalid())?;
                Ok(Address::scoped(ip, zone))
            }
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ip)?;
        if let Some(zone) = &self.zone {
            write!(f, "%{zone}")?;
        }
        Ok(())
    }
}

/// One address and the hostnames bound to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    address: Address,
    hostnames: BTreeSet<String>,
}

impl Entry {
    pub fn new(address: impl Into<Address>, hostname: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            hostnames: BTreeSet::from([hostname.into()]),
        }
    }

    pub fn address(&self) -> IpAddr {
        self.address.ip
    }

    pub fn zone(&self) -> Option<&str> {
        self.address.zone()
    }

    /// Hostnames in sorted order.
    pub fn hostnames(&self) -> impl Iterator<Item = &str> {
        self.hostnames.iter().map(String::as_str)
    }

    pub fn contains(&self, hostname: &str) -> bool {
        self.hostnames.contains(hostname)
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address)?;
        for name in &self.hostnames {
            write!(f, " {name}")?;
        }
        Ok(())
    }
}

/// A single line of the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Blank,
    /// Trimmed comment text, starting with `#`.
    Comment(String),
    Entry(Entry),
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Record::Blank => Ok(()),
            Record::Comment(text) => f.write_str(text),
            Record::Entry(entry) => fmt::Display::fmt(entry, f),
        }
    }
}

/// Parsed hosts file. Records are kept in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostsFile {
    records: Vec<Record>,
}

impl HostsFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.records.iter().filter_map(|r| match r {
            Record::Entry(e) => Some(e),
            _ => None,
        })
    }

    fn entries_mut(&mut self) -> impl Iterator<Item = &mut Entry> {
        self.records.iter_mut().filter_map(|r| match r {
            Record::Entry(e) => Some(e),
            _ => None,
        })
    }

    /// Addresses bound to `hostname`, in file order.
    pub fn addresses(&self, hostname: &str) -> Vec<Address> {
        self.entries()
            .filter(|e| e.contains(hostname))
            .map(|e| e.address.clone())
            .collect()
    }

    pub fn contains(&self, hostname: &str) -> bool {
        self.entries().any(|e| e.contains(hostname))
    }

    /// Bind `hostname` to `address`.
    ///
    /// An existing binding in the same address family is replaced; a binding
    /// in the other family is left alone so a host can keep one IPv4 and one
    /// IPv6 address. If the exact binding already exists nothing is appended.
    pub fn set(&mut self, address: impl Into<Address>, hostname: &str) -> Result<(), HostsError> {
        let address = address.into();
        validate_hostname(hostname)?;

        let mut bound = false;
        for entry in self.entries_mut() {
            if !entry.contains(hostname) {
                continue;
            }
            if entry.address.same_as(&address) && !bound {
                bound = true;
            } else if entry.address.same_family(&address) {
                trace!(%hostname, from = %entry.address, "unbinding hostname");
                entry.hostnames.remove(hostname);
            }
        }
        self.compact();

        if bound {
            debug!(%hostname, %address, "hostname already bound");
        } else {
            debug!(%hostname, %address, "binding hostname");
            self.records.push(Record::Entry(Entry::new(address, hostname)));
        }
        Ok(())
    }

    /// Remove `hostname` from every entry. Returns whether it was present.
    pub fn remove(&mut self, hostname: &str) -> bool {
        let mut found = false;
        for entry in self.entries_mut() {
            if entry.hostnames.remove(hostname) {
                trace!(%hostname, address = %entry.address, "removed hostname");
                found = true;
            }
        }
        self.compact();
        debug!(%hostname, found, "remove");
        found
    }

    /// Drop entries left without hostnames.
    fn compact(&mut self) {
        self.records
            .retain(|r| !matches!(r, Record::Entry(e) if e.hostnames.is_empty()));
    }
}

impl fmt::Display for HostsFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for record in &self.records {
            writeln!(f, "{record}")?;
        }
        Ok(())
    }
}

impl FromStr for HostsFile {
    type Err = HostsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s.as_bytes())
    }
}

fn validate_hostname(hostname: &str) -> Result<(), HostsError> {
    if hostname.is_empty() {
        return Err(HostsError::EmptyHostname);
    }
    if hostname.starts_with('#') || hostname.chars().any(char::is_whitespace) {
        return Err(HostsError::InvalidHostname(hostname.to_string()));
    }
    Ok(())
}

/// Parse a hosts file. Both `\n` and `\r\n` line endings are accepted.
pub fn decode<R: Read>(reader: R) -> Result<HostsFile, HostsError> {
    let mut records = Vec::new();
    for (idx, raw) in BufReader::new(reader).split(b'\n').enumerate() {
        let line_no = idx + 1;
        let raw = raw?;
        let line = std::str::from_utf8(&raw)
            .map_err(|_| HostsError::InvalidUtf8 { line: line_no })?
            .trim();
        records.push(parse_line(line, line_no)?);
    }
    Ok(HostsFile { records })
}

fn parse_line(line: &str, line_no: usize) -> Result<Record, HostsError> {
    if line.is_empty() {
        return Ok(Record::Blank);
    }
    if line.starts_with('#') {
        return Ok(Record::Comment(line.to_string()));
    }

    let invalid_entry = || HostsError::InvalidEntry {
        line: line_no,
        text: line.to_string(),
    };

    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 2 {
        return Err(invalid_entry());
    }
    let address: Address = tokens[0].parse().map_err(|_| HostsError::InvalidAddress {
        line: line_no,
        token: tokens[0].to_string(),
    })?;
    let hostnames: BTreeSet<String> = tokens[1..]
        .iter()
        .take_while(|t| !t.starts_with('#'))
        .map(|t| t.to_string())
        .collect();
    if hostnames.is_empty() {
        return Err(invalid_entry());
    }
    Ok(Record::Entry(Entry { address, hostnames }))
}

/// Write `hosts` with `\n` line endings.
pub fn encode<W: Write>(writer: W, hosts: &HostsFile) -> io::Result<()> {
    encode_with(writer, hosts, LineEnding::Lf)
}

/// Write `hosts`, terminating every record with `eol`.
pub fn encode_with<W: Write>(mut writer: W, hosts: &HostsFile, eol: LineEnding) -> io::Result<()> {
    for record in &hosts.records {
        write!(writer, "{record}{}", eol.as_str())?;
    }
    writer.flush()
}
