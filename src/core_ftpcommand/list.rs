use crate::constants::EMPTY_LISTING;
use crate::core_ftpcommand::utils::take_data_connection;
use crate::core_network::DataConnection;
use crate::error::FtpError;
use crate::helpers::{file_action_aborted, send_response, Reply, ReplyWriter};
use crate::session::Session;
use log::{info, warn};
use std::io;
use tokio::io::AsyncWriteExt;

/// Handles the LIST FTP command.
///
/// There is no filesystem behind the server, so the listing sent over the
/// data connection is always empty. The data connection is consumed and
/// closed on every path.
pub async fn handle_list_command(
    writer: &mut ReplyWriter,
    session: &mut Session,
    arg: &str,
) -> Result<(), FtpError> {
    let Some(connection) = take_data_connection(writer, session).await? else {
        return Ok(());
    };

    let opening = format!("Opening binary mode data connection for LIST {}", arg);
    send_response(writer, Reply::new(150, opening.trim_end())).await?;

    match send_listing(connection).await {
        Ok(()) => {
            info!("Sent empty listing for {:?}", session.current_dir());
            send_response(writer, Reply::new(226, "Transfer complete for LIST")).await
        }
        Err(e) => {
            warn!("LIST transfer failed: {}", e);
            send_response(writer, file_action_aborted()).await
        }
    }
}

async fn send_listing(connection: DataConnection) -> io::Result<()> {
    let mut stream = connection.into_transfer_stream().await?;
    stream.write_all(EMPTY_LISTING).await?;
    stream.shutdown().await
}
