use crate::error::FtpError;
use crate::helpers::{send_response, Reply, ReplyWriter};
use crate::session::Session;

/// Handles the SYST (System) FTP command.
///
/// The system type is always "UNIX"; the implementation name comes from
/// the configuration.
pub async fn handle_syst_command(writer: &mut ReplyWriter, session: &Session) -> Result<(), FtpError> {
    let system_type = format!(
        "UNIX Type: {} custom implementation",
        session.config().system_name()
    );
    send_response(writer, Reply::new(215, system_type)).await
}
