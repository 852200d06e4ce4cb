//! Datagram Transport
//!
//! Delivers encoded records over an unreliable, connectionless transport.
//!
//! Sends are fire-and-forget: [`DatagramSink::send`] never reports failure,
//! and nothing confirms delivery.

pub mod codec;
mod error;
mod udp;

pub use codec::{decode_record, encode_record};
pub use error::TransportError;
pub use udp::UdpSink;

/// Default destination address
pub const DEFAULT_ADDRESS: &str = "127.0.0.1";

/// Default destination port
pub const DEFAULT_PORT: u16 = 41234;

/// Largest UDP payload over IPv4
pub const MAX_DATAGRAM_SIZE: usize = 65_507;

/// Destination for encoded records
pub trait DatagramSink {
    /// Offer one datagram. Failures are swallowed.
    fn send(&mut self, payload: &[u8]);

    /// Release the underlying resource. Safe to call more than once.
    fn close(&mut self);

    /// Whether the sink still owns its resource
    fn is_open(&self) -> bool;
}

impl<S: DatagramSink + ?Sized> DatagramSink for Box<S> {
    fn send(&mut self, payload: &[u8]) {
        (**self).send(payload)
    }

    fn close(&mut self) {
        (**self).close()
    }

    fn is_open(&self) -> bool {
        (**self).is_open()
    }
}
