use crate::error::FtpError;
use crate::helpers::{send_response, Reply, ReplyWriter};

pub async fn handle_noop_command(writer: &mut ReplyWriter) -> Result<(), FtpError> {
    send_response(writer, Reply::new(200, "OK")).await
}
