//! Errors raised while decoding, mutating, or encoding a hosts file.

use std::io;

use thiserror::Error;

/// Text that is not an IP address (or a scoped IPv6 address).
#[derive(Debug, Error)]
#[error("invalid IP address: {0}")]
pub struct AddressError(pub String);

#[derive(Debug, Error)]
pub enum HostsError {
    /// Entry line with no hostname after the address.
    #[error("invalid entry on line {line}: {text}")]
    InvalidEntry { line: usize, text: String },

    #[error("invalid address on line {line}: {token}")]
    InvalidAddress { line: usize, token: String },

    #[error("invalid UTF-8 on line {line}")]
    InvalidUtf8 { line: usize },

    #[error("empty hostname")]
    EmptyHostname,

    /// Hostname that would not survive a write/read cycle (whitespace, leading `#`).
    #[error("invalid hostname: {0:?}")]
    InvalidHostname(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl HostsError {
    /// True for errors raised by decode on malformed input.
    pub fn is_parse(&self) -> bool {
        matches!(
            self,
            HostsError::InvalidEntry { .. }
                | HostsError::InvalidAddress { .. }
                | HostsError::InvalidUtf8 { .. }
        )
    }

    /// True for errors raised by `set` on a bad hostname.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            HostsError::EmptyHostname | HostsError::InvalidHostname(_)
        )
    }
}
