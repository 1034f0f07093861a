use crate::error::FtpError;
use crate::helpers::{send_response, Reply, ReplyWriter};
use log::info;

/// Handles the MKD (Make Directory) FTP command.
///
/// Nothing is stored, so every directory is reported as already existing.
pub async fn handle_mkd_command(writer: &mut ReplyWriter, arg: &str) -> Result<(), FtpError> {
    info!("Received MKD command with argument: {}", arg);
    send_response(writer, Reply::new(521, format!("\"{}\" directory exists", arg))).await
}
