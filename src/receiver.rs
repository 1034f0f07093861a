use async_trait::async_trait;
use log::info;
use std::io;
use tokio::io::AsyncRead;

/// Consumer of uploaded files.
///
/// Implementations must read `data` to its end or fail. The session closes
/// the data connection as soon as `receive` returns.
#[async_trait]
pub trait DataReceiver: Send + Sync {
    async fn receive(
        &self,
        directory: &str,
        name: &str,
        data: &mut (dyn AsyncRead + Send + Unpin),
    ) -> io::Result<()>;
}

/// Drains uploads and logs what arrived.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReceiver;

#[async_trait]
impl DataReceiver for LogReceiver {
    async fn receive(
        &self,
        directory: &str,
        name: &str,
        data: &mut (dyn AsyncRead + Send + Unpin),
    ) -> io::Result<()> {
        let size = tokio::io::copy(data, &mut tokio::io::sink()).await?;
        info!(
            "Received file [{}] in directory [{}]: {} bytes",
            name, directory, size
        );
        Ok(())
    }
}
