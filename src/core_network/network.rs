use crate::config::Config;
use crate::core_network::framing::CommandCodec;
use crate::error::FtpError;
use crate::receiver::DataReceiver;
use crate::session::{ControlHandler, Session, SessionStatus};
use anyhow::{Context, Result};
use futures::StreamExt;
use log::{error, info, warn};
use std::sync::Arc;
use tokio::net::tcp::OwnedReadHalf;
use tokio::net::{TcpListener, TcpStream};
use tokio_util::codec::FramedRead;

/// Accepts control connections forever, one task and one session each.
pub async fn start_server(config: Arc<Config>, receiver: Arc<dyn DataReceiver>) -> Result<()> {
    let session_config = Arc::new(
        config
            .session_config()
            .context("Invalid server configuration")?,
    );
    let listen = config.listen_socket();
    let listener = TcpListener::bind(listen)
        .await
        .with_context(|| format!("Failed to bind control listener on {}", listen))?;
    info!("Server listening on {}", listen);

    let max_command_length = config.server.max_command_length;
    loop {
        let (socket, addr) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!("Failed to accept control connection: {}", e);
                continue;
            }
        };
        info!("New connection from {}", addr);

        let session = Session::new(Arc::clone(&session_config), Arc::clone(&receiver));
        tokio::spawn(async move {
            if let Err(e) = handle_connection(socket, session, max_command_length).await {
                error!("Connection error for {}: {}", addr, e);
            }
            info!("Connection closed for {}", addr);
        });
    }
}

/// Drives one control connection through its handler until the client
/// quits or goes away.
pub async fn handle_connection<H: ControlHandler>(
    socket: TcpStream,
    mut handler: H,
    max_command_length: usize,
) -> Result<(), FtpError> {
    let (read_half, mut write_half) = socket.into_split();
    let mut commands = FramedRead::new(read_half, CommandCodec::new(max_command_length));

    handler.on_connect(&mut write_half).await?;

    while let Some(frame) = commands.next().await {
        let line = frame?;

        // A peer gone quiet only counts as closed once nothing complete is
        // buffered and the command is blocked on its data connection.
        let watch_peer = !commands.read_buffer().contains(&b'\n')
            && handler.waits_on_data_channel(&line);
        let outcome = if watch_peer {
            // Dropping the command future releases any data socket it holds
            tokio::select! {
                outcome = handler.on_command(&mut write_half, &line) => outcome,
                _ = peer_closed(commands.get_mut()) => {
                    info!("Control connection closed while handling {:?}", line);
                    return Ok(());
                }
            }
        } else {
            handler.on_command(&mut write_half, &line).await
        };

        match outcome {
            Ok(SessionStatus::Continue) => {}
            Ok(SessionStatus::Close) => break,
            Err(fault) => handler.on_error(&mut write_half, &fault).await?,
        }
    }

    Ok(())
}

/// Resolves once the peer has closed its side of the control connection.
/// Pending input is left in place for the framing layer.
async fn peer_closed(read_half: &mut OwnedReadHalf) {
    let mut scratch = [0u8; 1];
    match read_half.peek(&mut scratch).await {
        Ok(0) | Err(_) => {}
        Ok(_) => std::future::pending::<()>().await,
    }
}
