use crate::error::FtpError;
use crate::helpers::{send_response, Reply, ReplyWriter};

/// Handles the TYPE FTP command.
///
/// Only `I` (image) and `A` (ASCII) are accepted. Data is passed through
/// untouched either way, so the type is not remembered.
pub async fn handle_type_command(writer: &mut ReplyWriter, arg: &str) -> Result<(), FtpError> {
    let response = match arg.to_ascii_uppercase().as_str() {
        "I" => Reply::new(200, "Type set to IMAGE NONPRINT"),
        "A" => Reply::new(200, "Type set to ASCII NONPRINT"),
        _ => Reply::new(504, "Command not implemented for that parameter"),
    };
    send_response(writer, response).await
}
