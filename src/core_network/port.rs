use crate::core_network::{DataConnection, TransferMode};
use crate::error::FtpError;
use crate::helpers::{
    bad_sequence, file_action_aborted, send_response, syntax_error_in_arguments, Reply,
    ReplyWriter,
};
use crate::session::Session;
use log::{info, trace, warn};
use std::net::{Ipv4Addr, SocketAddrV4};
use thiserror::Error;
use tokio::net::TcpStream;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PortArgError {
    #[error("expected 6 comma-separated fields, got {0}")]
    FieldCount(usize),

    #[error("field {index} is not a byte value: {value:?}")]
    InvalidByte { index: usize, value: String },
}

/// Parses `h1,h2,h3,h4,p1,p2` into an IPv4 socket address.
pub fn parse_port_args(args: &str) -> Result<SocketAddrV4, PortArgError> {
    let fields: Vec<&str> = args.split(',').collect();
    if fields.len() != 6 {
        return Err(PortArgError::FieldCount(fields.len()));
    }

    let mut bytes = [0u8; 6];
    for (index, field) in fields.iter().enumerate() {
        bytes[index] = field.parse::<u8>().map_err(|_| PortArgError::InvalidByte {
            index,
            value: field.to_string(),
        })?;
    }

    let ip = Ipv4Addr::new(bytes[0], bytes[1], bytes[2], bytes[3]);
    let port = u16::from(bytes[4]) << 8 | u16::from(bytes[5]);
    Ok(SocketAddrV4::new(ip, port))
}

/// Handles the PORT (Active Mode) FTP command.
///
/// Connects to the client right away; the connected socket is kept until
/// the next LIST or STOR consumes it.
pub async fn handle_port_command(
    writer: &mut ReplyWriter,
    session: &mut Session,
    arg: &str,
) -> Result<(), FtpError> {
    let addr = match parse_port_args(arg) {
        Ok(addr) => addr,
        Err(e) => {
            warn!("Rejected PORT arguments {:?}: {}", arg, e);
            return send_response(writer, syntax_error_in_arguments()).await;
        }
    };
    trace!("PORT target: {}", addr);

    if session.data_connection_mode() == Some(TransferMode::Active) {
        warn!("PORT received while an active data connection is still open");
        return send_response(writer, bad_sequence()).await;
    }

    match TcpStream::connect(addr).await {
        Ok(stream) => {
            info!("Active data connection established with {}", addr);
            session.set_data_connection(DataConnection::Active(stream));
            send_response(writer, Reply::new(200, "PORT command successful")).await
        }
        Err(e) => {
            warn!("Failed to open active data connection to {}: {}", addr, e);
            session.release_data_connection();
            send_response(writer, file_action_aborted()).await
        }
    }
}
