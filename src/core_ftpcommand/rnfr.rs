use crate::error::FtpError;
use crate::helpers::{send_response, Reply, ReplyWriter};
use log::info;

/// Handles the RNFR (Rename From) FTP command.
pub async fn handle_rnfr_command(writer: &mut ReplyWriter, arg: &str) -> Result<(), FtpError> {
    info!("Received RNFR command with argument: {}", arg);
    send_response(writer, Reply::new(350, "File exists, ready for destination name")).await
}
