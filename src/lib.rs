//! An FTP server for receiving files.
//!
//! Each control connection gets a [`session::Session`] that speaks a subset
//! of RFC 959: active (PORT) and passive (PASV) data connections, LIST and
//! STOR. There is no filesystem behind it; uploads are handed to a
//! [`receiver::DataReceiver`] and directory commands answer with synthetic
//! replies.

pub mod config;
pub mod constants;
pub mod core_cli;
pub mod core_ftpcommand;
pub mod core_network;
pub mod error;
pub mod helpers;
pub mod receiver;
pub mod server;
pub mod session;

#[cfg(test)]
mod test_session;

pub use config::{Config, SessionConfig};
pub use error::FtpError;
pub use receiver::{DataReceiver, LogReceiver};
pub use session::{ControlHandler, Session, SessionStatus};
