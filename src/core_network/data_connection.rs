//! The data channel prepared by PORT or PASV for exactly one transfer.

use log::debug;
use std::io;
use tokio::net::{TcpListener, TcpStream};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferMode {
    Active,
    Passive,
}

/// A data channel waiting for its transfer command.
///
/// Dropping the value closes whatever socket it holds, so the session
/// releases a channel simply by letting go of it.
#[derive(Debug)]
pub enum DataConnection {
    /// Outbound socket connected during PORT.
    Active(TcpStream),
    /// Listener bound during PASV; the client has not connected yet.
    Passive(TcpListener),
}

impl DataConnection {
    pub fn mode(&self) -> TransferMode {
        match self {
            DataConnection::Active(_) => TransferMode::Active,
            DataConnection::Passive(_) => TransferMode::Passive,
        }
    }

    pub fn local_port(&self) -> io::Result<u16> {
        match self {
            DataConnection::Active(stream) => Ok(stream.local_addr()?.port()),
            DataConnection::Passive(listener) => Ok(listener.local_addr()?.port()),
        }
    }

    /// Consumes the channel and yields the socket to transfer over.
    ///
    /// In passive mode this waits, without any timeout, for a single inbound
    /// connection; the listener is closed as soon as it has been accepted.
    pub async fn into_transfer_stream(self) -> io::Result<TcpStream> {
        match self {
            DataConnection::Active(stream) => Ok(stream),
            DataConnection::Passive(listener) => {
                let (stream, peer) = listener.accept().await?;
                debug!("Accepted passive data connection from {}", peer);
                Ok(stream)
            }
        }
    }
}
