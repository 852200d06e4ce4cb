//! UDP datagram sink

use std::net::SocketAddr;

use tokio::net::{lookup_host, UdpSocket};
use tracing::{debug, info};

use super::{DatagramSink, TransportError};

/// Fire-and-forget UDP sender bound to an ephemeral local port
pub struct UdpSink {
    socket: Option<UdpSocket>,
    destination: SocketAddr,
}

impl UdpSink {
    /// Resolve the destination and bind a local socket of the same family
    pub async fn open(address: &str, port: u16) -> Result<Self, TransportError> {
        let destination = lookup_host((address, port))
            .await
            .map_err(|_| TransportError::Unresolvable(format!("{address}:{port}")))?
            .next()
            .ok_or_else(|| TransportError::Unresolvable(format!("{address}:{port}")))?;

        let bind_addr = if destination.is_ipv4() {
            "0.0.0.0:0"
        } else {
            "[::]:0"
        };
        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(TransportError::Bind)?;

        // try_send_to only succeeds once the reactor has seen the socket writable
        socket.writable().await?;

        info!(
            "UDP sink open: {} -> {}",
            socket.local_addr()?,
            destination
        );

        Ok(Self {
            socket: Some(socket),
            destination,
        })
    }

    /// Where datagrams are sent
    pub fn destination(&self) -> SocketAddr {
        self.destination
    }

    /// Local address of the socket, if still open
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.socket.as_ref().and_then(|s| s.local_addr().ok())
    }
}

impl DatagramSink for UdpSink {
    fn send(&mut self, payload: &[u8]) {
        let Some(socket) = self.socket.as_ref() else {
            debug!("Send on closed UDP sink ignored");
            return;
        };

        // Non-blocking; a full buffer or unreachable peer just drops the datagram
        if let Err(e) = socket.try_send_to(payload, self.destination) {
            debug!("Datagram to {} dropped: {}", self.destination, e);
        }
    }

    fn close(&mut self) {
        if self.socket.take().is_some() {
            info!("UDP sink closed");
        }
    }

    fn is_open(&self) -> bool {
        self.socket.is_some()
    }
}
