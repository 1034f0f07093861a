use crate::error::FtpError;
use crate::helpers::{send_response, Reply, ReplyWriter};
use log::info;

/// Handles the DELE (Delete File) FTP command.
pub async fn handle_dele_command(writer: &mut ReplyWriter, arg: &str) -> Result<(), FtpError> {
    info!("Received DELE command with argument: {}", arg);
    send_response(writer, no_such_file(arg)).await
}

/// Reply shared by DELE and RMD: nothing is ever there to remove.
pub fn no_such_file(arg: &str) -> Reply {
    Reply::new(550, format!("{}: no such file or directory", arg))
}
