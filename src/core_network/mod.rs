pub mod data_connection;
pub mod framing;
pub mod network;
pub mod pasv;
pub mod port;

pub use data_connection::{DataConnection, TransferMode};
