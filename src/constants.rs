// src/constants.rs

use std::net::Ipv4Addr;
use std::time::Duration;

pub const DEFAULT_LISTEN_ADDRESS: Ipv4Addr = Ipv4Addr::LOCALHOST;
pub const DEFAULT_LISTEN_PORT: u16 = 2121;
pub const DEFAULT_PASV_ADDRESS: Ipv4Addr = Ipv4Addr::LOCALHOST;
pub const DEFAULT_PASV_PORT_LOW: u16 = 2122;
pub const DEFAULT_PASV_PORT_HIGH: u16 = 4242;
pub const DEFAULT_PASV_OPEN_ATTEMPTS: u32 = 10;
pub const DEFAULT_MAX_COMMAND_LENGTH: usize = 256;
pub const DEFAULT_SYSTEM_NAME: &str = "Rust";

/// Backlog of a passive listener: it only ever serves one client.
pub const PASV_BACKLOG: u32 = 1;
pub const PASV_RETRY_DELAY: Duration = Duration::from_millis(1);

/// LIST always answers with an empty directory.
pub const EMPTY_LISTING: &[u8] = b"\r\n";
