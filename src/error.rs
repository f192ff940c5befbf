// src/error.rs
//
// Error taxonomy for the abfss adapter. The adapter performs no retries and
// no translation beyond narrowing "not found" into a boolean for `exists`;
// everything else is surfaced to the caller with its original cause attached.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T, E = AbfssError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum AbfssError {
    /// The input does not look like an abfss URL at all.
    #[error("abfss url '{0}' not matching the expected pattern")]
    Format(String),

    /// The remote store reported that the object does not exist.
    #[error("abfss object not found: {0}")]
    NotFound(String),

    /// A configuration setting was absent at first use.
    #[error("missing configuration setting '{0}'")]
    Config(&'static str),

    /// The operation is not part of this adapter's surface.
    #[error("operation '{0}' is not supported by the abfss adapter")]
    Unsupported(&'static str),

    /// The file handle was closed before the call.
    #[error("file handle for '{0}' is closed")]
    Closed(String),

    /// Any other failure from the underlying store client (auth, network,
    /// throttling). Never swallowed, never retried here.
    #[error("remote store error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl AbfssError {
    /// Wrap an arbitrary client-library failure as a transport error.
    pub fn transport<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        AbfssError::Transport(Box::new(err))
    }
}
