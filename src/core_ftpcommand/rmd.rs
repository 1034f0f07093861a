use crate::core_ftpcommand::dele::no_such_file;
use crate::error::FtpError;
use crate::helpers::{send_response, ReplyWriter};
use log::info;

/// Handles the RMD (Remove Directory) FTP command.
pub async fn handle_rmd_command(writer: &mut ReplyWriter, arg: &str) -> Result<(), FtpError> {
    info!("Received RMD command with argument: {}", arg);
    send_response(writer, no_such_file(arg)).await
}
