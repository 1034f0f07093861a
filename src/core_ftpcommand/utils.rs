use crate::core_network::{DataConnection, TransferMode};
use crate::core_ftpcommand::ftpcommand::FtpCommand;
use crate::error::FtpError;
use crate::helpers::{bad_sequence, send_response, ReplyWriter};
use crate::session::Session;
use log::warn;

/// Splits a trimmed command line into its upper-cased token and arguments.
///
/// Lines shorter than three characters have no token. A line of exactly
/// three characters is the token itself; otherwise the token is the first
/// word cut to four characters and the arguments are what follows it.
pub fn split_command(line: &str) -> Option<(String, &str)> {
    match line.chars().count() {
        0..=2 => None,
        3 => Some((line.to_ascii_uppercase(), "")),
        _ => {
            let word_end = line.find(char::is_whitespace).unwrap_or(line.len());
            let token: String = line[..word_end].chars().take(4).collect();
            Some((token.to_ascii_uppercase(), line[word_end..].trim_start()))
        }
    }
}

/// Takes the data connection set up by the previous command.
///
/// Replies 503 and leaves the session untouched unless the previous
/// command was PORT (with an active connection held) or PASV (with a
/// passive one).
pub async fn take_data_connection(
    writer: &mut ReplyWriter,
    session: &mut Session,
) -> Result<Option<DataConnection>, FtpError> {
    let expected = match FtpCommand::from_token(session.last_command()) {
        Some(FtpCommand::PORT) => TransferMode::Active,
        Some(FtpCommand::PASV) => TransferMode::Passive,
        _ => {
            warn!(
                "Transfer requested without PORT/PASV (last command: {:?})",
                session.last_command()
            );
            send_response(writer, bad_sequence()).await?;
            return Ok(None);
        }
    };

    if session.data_connection_mode() != Some(expected) {
        warn!("No {:?} data connection available for transfer", expected);
        send_response(writer, bad_sequence()).await?;
        return Ok(None);
    }

    Ok(session.take_data_connection())
}
