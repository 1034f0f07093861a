use crate::config::Config;
use crate::error::FtpError;
use log::{debug, info};
use std::fmt;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// The control-connection side replies are written to.
pub type ReplyWriter = dyn AsyncWrite + Send + Unpin;

/// One control-channel reply: a 3-digit code and free text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    code: u16,
    text: String,
}

impl Reply {
    pub fn new(code: u16, text: impl Into<String>) -> Self {
        Self {
            code,
            text: text.into(),
        }
    }

    /// Encodes the reply as a single CRLF-terminated ASCII line.
    ///
    /// Non-ASCII characters become `?` and embedded line breaks become spaces,
    /// so a reply can never span more than one line.
    pub fn to_line(&self) -> String {
        let text: String = self
            .text
            .chars()
            .map(|c| match c {
                '\r' | '\n' => ' ',
                c if c.is_ascii() => c,
                _ => '?',
            })
            .collect();
        format!("{:03} {}\r\n", self.code, text)
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03} {}", self.code, self.text)
    }
}

pub fn syntax_error_in_arguments() -> Reply {
    Reply::new(501, "Syntax error in parameters or arguments")
}

pub fn bad_sequence() -> Reply {
    Reply::new(503, "Bad sequence of commands")
}

pub fn file_action_aborted() -> Reply {
    Reply::new(552, "Requested file action aborted")
}

/// Sends a reply to the client.
pub async fn send_response(writer: &mut ReplyWriter, reply: Reply) -> Result<(), FtpError> {
    debug!("<- {}", reply);
    writer.write_all(reply.to_line().as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}

// Helper function to log configuration options
pub fn log_config(config: &Config) {
    let server = &config.server;
    info!("  Listen Address: {}:{}", server.listen_address, server.listen_port);
    info!("  PASV Bind Address: {}", server.pasv_address);
    info!(
        "  PASV Advertised Address: {}",
        server.pasv_advertised_address.unwrap_or(server.pasv_address)
    );
    info!(
        "  PASV Port Range: {}..{}",
        server.pasv_port_low, server.pasv_port_high
    );
    info!("  PASV Open Attempts: {}", server.pasv_open_attempts);
    info!("  Max Command Length: {} bytes", server.max_command_length);
}
