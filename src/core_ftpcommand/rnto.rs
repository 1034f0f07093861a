use crate::error::FtpError;
use crate::helpers::{send_response, Reply, ReplyWriter};
use log::info;

/// Handles the RNTO (Rename To) FTP command.
pub async fn handle_rnto_command(writer: &mut ReplyWriter, arg: &str) -> Result<(), FtpError> {
    info!("Received RNTO command with argument: {}", arg);
    send_response(writer, Reply::new(250, "RNTO command successful")).await
}
