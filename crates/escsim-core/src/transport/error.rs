//! Transport errors

use thiserror::Error;

/// Errors that can occur while opening the transport or encoding a record.
///
/// Send failures are not represented: sends are fire-and-forget.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Destination host or port could not be resolved
    #[error("Could not resolve destination '{0}'")]
    Unresolvable(String),

    /// Local socket could not be bound
    #[error("Failed to bind local UDP socket: {0}")]
    Bind(#[source] std::io::Error),

    /// Encoded record exceeds one datagram
    #[error("Payload too large: {size} bytes (max {max})")]
    PayloadTooLarge {
        /// Encoded size in bytes
        size: usize,
        /// Largest allowed size
        max: usize,
    },

    /// JSON encoding or decoding failed
    #[error("Encoding error: {0}")]
    Encode(#[from] serde_json::Error),

    /// Other socket error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
