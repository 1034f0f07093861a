use crate::error::FtpError;
use crate::helpers::{send_response, Reply, ReplyWriter};
use log::debug;

/// Handles the ALLO (Allocate) FTP command.
///
/// Uploads go straight to the data receiver, so there is nothing to reserve.
pub async fn handle_allo_command(writer: &mut ReplyWriter, arg: &str) -> Result<(), FtpError> {
    debug!("Received ALLO command with argument: {}", arg);
    send_response(writer, Reply::new(202, "No storage allocation necessary")).await
}
