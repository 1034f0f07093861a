use crate::error::FtpError;
use crate::helpers::{send_response, Reply, ReplyWriter};
use crate::session::Session;
use log::debug;

/// Handles the CWD FTP command. The argument becomes the current directory
/// as-is; nothing checks that it exists.
pub async fn handle_cwd_command(
    writer: &mut ReplyWriter,
    session: &mut Session,
    arg: &str,
) -> Result<(), FtpError> {
    session.set_current_dir(arg);
    debug!("Current directory is now {:?}", session.current_dir());
    send_response(writer, Reply::new(250, "CWD command successful")).await
}
