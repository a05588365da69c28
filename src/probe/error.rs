use std::fmt;
use std::net::SocketAddr;

use thiserror::Error;

/// Why an HTTP exchange did not produce a usable response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpFailure {
    /// The server answered with a non-success status.
    Status(u16),
    /// Connect or read deadline elapsed.
    Timeout,
    /// Connection refused, TLS failure, proxy failure and the like.
    Transport(String),
    /// The body could not be decoded.
    Decode(String),
}

impl fmt::Display for HttpFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpFailure::Status(code) => write!(f, "server responded with status {code}"),
            HttpFailure::Timeout => write!(f, "request timed out"),
            HttpFailure::Transport(reason) => write!(f, "transport error: {reason}"),
            HttpFailure::Decode(reason) => write!(f, "invalid response body: {reason}"),
        }
    }
}

impl HttpFailure {
    pub fn from_reqwest(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            HttpFailure::Timeout
        } else if let Some(status) = err.status() {
            HttpFailure::Status(status.as_u16())
        } else if err.is_decode() {
            HttpFailure::Decode(super::report(err))
        } else {
            HttpFailure::Transport(super::report(err))
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProbeError {
    #[error("failed to resolve {host}: {reason}")]
    ResolutionFailed { host: String, reason: String },

    #[error("failed to connect to {addr}: {reason}{}", os_code_suffix(.code))]
    ConnectFailed {
        addr: SocketAddr,
        code: Option<i32>,
        reason: String,
    },

    #[error("I/O after connecting to {addr} failed: {reason}")]
    IoFailed { addr: SocketAddr, reason: String },

    #[error("HTTP request failed: {0}")]
    HttpFailed(HttpFailure),

    #[error("invalid configuration: {0}")]
    Config(String),
}

fn os_code_suffix(code: &Option<i32>) -> String {
    code.map(|c| format!(" (os error {c})")).unwrap_or_default()
}
