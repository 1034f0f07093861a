use crate::config::SessionConfig;
use crate::constants::{PASV_BACKLOG, PASV_RETRY_DELAY};
use crate::core_network::DataConnection;
use crate::error::FtpError;
use crate::helpers::{send_response, Reply, ReplyWriter};
use crate::session::Session;
use log::{debug, info, warn};
use rand::{Rng, RngCore};
use std::io;
use std::net::{Ipv4Addr, SocketAddrV4};
use std::ops::Range;
use thiserror::Error;
use tokio::net::{TcpListener, TcpSocket};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PasvError {
    #[error("no passive port could be bound after {attempts} attempts")]
    Exhausted { attempts: u32 },
}

/// Picks passive ports at random and binds a listener on the first free one.
pub struct PassivePortAllocator {
    bind_address: Ipv4Addr,
    ports: Range<u16>,
    max_attempts: u32,
    rng: Box<dyn RngCore + Send + Sync>,
}

impl PassivePortAllocator {
    pub fn new(config: &SessionConfig, rng: Box<dyn RngCore + Send + Sync>) -> Self {
        Self {
            bind_address: config.bind_address(),
            ports: config.passive_ports(),
            max_attempts: config.max_bind_attempts(),
            rng,
        }
    }

    /// Uniform pick in `[low, high)`; an empty range always yields `low`.
    pub fn choose_port(&mut self) -> u16 {
        if self.ports.is_empty() {
            self.ports.start
        } else {
            self.rng.gen_range(self.ports.clone())
        }
    }

    /// Binds a listener, trying at most `max_attempts` candidate ports.
    pub async fn bind(&mut self) -> Result<TcpListener, PasvError> {
        for attempt in 1..=self.max_attempts {
            let port = self.choose_port();
            let addr = SocketAddrV4::new(self.bind_address, port);
            match bind_listener(addr) {
                Ok(listener) => {
                    debug!("Passive listener bound on {} (attempt {})", addr, attempt);
                    return Ok(listener);
                }
                Err(e) => {
                    warn!(
                        "Failed to bind passive socket on {}, attempt {} of {}: {}",
                        addr, attempt, self.max_attempts, e
                    );
                    if attempt < self.max_attempts {
                        tokio::time::sleep(PASV_RETRY_DELAY).await;
                    }
                }
            }
        }

        Err(PasvError::Exhausted {
            attempts: self.max_attempts,
        })
    }
}

fn bind_listener(addr: SocketAddrV4) -> io::Result<TcpListener> {
    let socket = TcpSocket::new_v4()?;
    socket.bind(addr.into())?;
    socket.listen(PASV_BACKLOG)
}

/// Formats the 227 reply for the given advertised address and port.
pub fn pasv_reply(advertised: Ipv4Addr, port: u16) -> Reply {
    let [a1, a2, a3, a4] = advertised.octets();
    Reply::new(
        227,
        format!(
            "Entering Passive Mode ({},{},{},{},{},{})",
            a1,
            a2,
            a3,
            a4,
            (port >> 8) & 0xff,
            port & 0xff
        ),
    )
}

/// Handles the PASV command.
///
/// Any data connection still held is released first; the new listener
/// waits for the next LIST or STOR to accept on it.
pub async fn handle_pasv_command(
    writer: &mut ReplyWriter,
    session: &mut Session,
    _arg: &str,
) -> Result<(), FtpError> {
    session.release_data_connection();

    match session.allocator_mut().bind().await {
        Ok(listener) => {
            let port = listener.local_addr()?.port();
            info!("Passive mode listener ready on port {}", port);
            let reply = pasv_reply(session.config().advertised_address(), port);
            session.set_data_connection(DataConnection::Passive(listener));
            send_response(writer, reply).await
        }
        Err(e) => {
            warn!("PASV failed: {}", e);
            send_response(writer, Reply::new(551, "Requested action aborted")).await
        }
    }
}
