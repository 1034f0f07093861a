// src/core_ftpcommand/pwd.rs
use crate::error::FtpError;
use crate::helpers::{send_response, Reply, ReplyWriter};
use crate::session::Session;

pub async fn handle_pwd_command(writer: &mut ReplyWriter, session: &Session) -> Result<(), FtpError> {
    let response = format!("\"{}\" is current directory", session.current_dir());
    send_response(writer, Reply::new(257, response)).await
}
