//! Error type shared by all request operations.

use std::path::PathBuf;

/// Every operation reports failure through this type so callers can surface
/// one message per invocation regardless of which step failed.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// Malformed operator input (e.g. URL without `?`, empty hostname).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A backslash escape in the input could not be decoded.
    #[error("cannot unescape at offset {offset}: {reason}")]
    Unescape { offset: usize, reason: String },

    /// Curl reported an error (bad URL, timeout, connection refused, ...).
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: curl::Error,
    },

    /// Server answered with a non-2xx status.
    #[error("{url} returned HTTP {status}")]
    Http { url: String, status: u32 },

    /// Output file could not be removed, created or written.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Hostname resolution failed.
    #[error("cannot resolve {host}: {reason}")]
    Resolution { host: String, reason: String },
}

pub type Result<T> = std::result::Result<T, ProbeError>;

impl ProbeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ProbeError::Io {
            path: path.into(),
            source,
        }
    }
}
