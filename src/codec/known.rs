//! Serializable error types that an HTTP transport commonly returns.
//!
//! Every type here is registered by [`ErrorRegistry::new`], so a recording
//! that contains one of them replays with all of its fields intact.
//!
//! [`ErrorRegistry::new`]: super::ErrorRegistry::new

use std::fmt;
use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stand-in for an error whose type was not registered when it was recorded.
///
/// Only the original message survives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct FallbackError {
    pub message: String,
}

impl FallbackError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The peer spoke malformed HTTP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct ProtocolError {
    pub message: String,
}

impl ProtocolError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Name resolution failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub struct DnsError {
    pub name: String,
    pub server: Option<String>,
    pub message: String,
    pub is_timeout: bool,
    pub is_not_found: bool,
}

impl fmt::Display for DnsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lookup {}", self.name)?;
        if let Some(server) = &self.server {
            write!(f, " on {server}")?;
        }
        write!(f, ": {}", self.message)
    }
}

/// A network operation (dial, read, write) failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub struct ConnectError {
    pub op: String,
    pub network: String,
    pub addr: Option<String>,
    pub message: String,
    pub is_timeout: bool,
}

impl fmt::Display for ConnectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.op, self.network)?;
        if let Some(addr) = &self.addr {
            write!(f, " {addr}")?;
        }
        write!(f, ": {}", self.message)
    }
}

impl ConnectError {
    /// Describe a failed socket operation from the I/O error it produced.
    pub fn from_io(op: impl Into<String>, addr: Option<String>, err: &io::Error) -> Self {
        Self {
            op: op.into(),
            network: "tcp".to_string(),
            addr,
            message: err.to_string(),
            is_timeout: matches!(
                err.kind(),
                io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock
            ),
        }
    }
}

/// An address could not be used as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("address {addr}: {message}")]
pub struct AddrError {
    pub addr: String,
    pub message: String,
}

/// An operation on a URL failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{op} \"{url}\": {message}")]
pub struct UrlError {
    pub op: String,
    pub url: String,
    pub message: String,
}

impl UrlError {
    pub fn parse(url: impl Into<String>, err: url::ParseError) -> Self {
        Self {
            op: "parse".to_string(),
            url: url.into(),
            message: err.to_string(),
        }
    }
}

/// An operation did not finish within its deadline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{op} timed out after {after_ms}ms")]
pub struct TimeoutError {
    pub op: String,
    pub after_ms: u64,
}
