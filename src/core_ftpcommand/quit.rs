use crate::error::FtpError;
use crate::helpers::{send_response, Reply, ReplyWriter};
use log::info;

/// Handles the QUIT FTP command. The caller closes the control connection
/// once the reply is out.
pub async fn handle_quit_command(writer: &mut ReplyWriter) -> Result<(), FtpError> {
    info!("Received QUIT command. Closing connection.");
    send_response(writer, Reply::new(221, "QUIT command successful")).await
}
