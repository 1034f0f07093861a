use crate::error::FtpError;
use crate::helpers::{send_response, Reply, ReplyWriter};
use log::info;

/// Handles the USER FTP command.
///
/// There is no authentication: every user name is logged in at once.
pub async fn handle_user_command(writer: &mut ReplyWriter, username: &str) -> Result<(), FtpError> {
    info!("Received USER command with username: {}", username);
    send_response(writer, Reply::new(230, "USER LOGGED IN")).await
}
