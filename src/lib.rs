//! Hostsfile - edit the entries of a hosts file while keeping its comments and layout.

pub mod cli;
pub mod config;
pub mod error;
pub mod hosts;
pub mod logging;
pub mod platform;

pub use error::{AddressError, HostsError};
pub use hosts::{decode, encode, encode_with, Address, Entry, HostsFile, LineEnding, Record};
