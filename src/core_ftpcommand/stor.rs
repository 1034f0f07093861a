use crate::core_ftpcommand::utils::take_data_connection;
use crate::core_network::DataConnection;
use crate::error::FtpError;
use crate::helpers::{file_action_aborted, send_response, Reply, ReplyWriter};
use crate::receiver::DataReceiver;
use crate::session::Session;
use log::{info, warn};
use std::io;

/// Handles the STOR (Store File) FTP command.
///
/// The bytes arriving on the data connection are handed to the session's
/// data receiver together with the current directory and the file name.
/// The data connection is consumed and closed on every path.
pub async fn handle_stor_command(
    writer: &mut ReplyWriter,
    session: &mut Session,
    arg: &str,
) -> Result<(), FtpError> {
    let Some(connection) = take_data_connection(writer, session).await? else {
        return Ok(());
    };

    let opening = format!("Opening binary mode data connection for STOR {}", arg);
    send_response(writer, Reply::new(150, opening.trim_end())).await?;

    let directory = session.current_dir().to_string();
    let receiver = session.receiver();
    match receive_upload(connection, receiver.as_ref(), &directory, arg).await {
        Ok(()) => {
            info!("Stored {:?} in {:?}", arg, directory);
            let complete = format!("Transfer complete for STOR {}", arg);
            send_response(writer, Reply::new(226, complete.trim_end())).await
        }
        Err(e) => {
            warn!("STOR transfer of {:?} failed: {}", arg, e);
            send_response(writer, file_action_aborted()).await
        }
    }
}

async fn receive_upload(
    connection: DataConnection,
    receiver: &dyn DataReceiver,
    directory: &str,
    name: &str,
) -> io::Result<()> {
    let mut stream = connection.into_transfer_stream().await?;
    receiver.receive(directory, name, &mut stream).await
}
