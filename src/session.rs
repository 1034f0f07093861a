use crate::config::SessionConfig;
use crate::core_ftpcommand::ftpcommand::FtpCommand;
use crate::core_ftpcommand::handlers::dispatch;
use crate::core_ftpcommand::utils::split_command;
use crate::core_network::pasv::PassivePortAllocator;
use crate::core_network::{DataConnection, TransferMode};
use crate::error::FtpError;
use crate::helpers::{send_response, Reply, ReplyWriter};
use crate::receiver::DataReceiver;
use async_trait::async_trait;
use log::{debug, error};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::sync::Arc;

/// What the connection should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Continue,
    Close,
}

/// Events a control connection delivers to its handler.
#[async_trait]
pub trait ControlHandler: Send {
    async fn on_connect(&mut self, writer: &mut ReplyWriter) -> Result<(), FtpError>;

    async fn on_command(
        &mut self,
        writer: &mut ReplyWriter,
        line: &str,
    ) -> Result<SessionStatus, FtpError>;

    async fn on_error(&mut self, writer: &mut ReplyWriter, fault: &FtpError)
        -> Result<(), FtpError>;

    /// Whether `line` will wait on a data connection, during which a closed
    /// control connection should abort it.
    fn waits_on_data_channel(&self, _line: &str) -> bool {
        false
    }
}

/// State of one control connection.
///
/// Owned by the task serving that connection, which hands it one command
/// at a time, so nothing here is locked.
pub struct Session {
    current_dir: String,
    last_command: String,
    data_connection: Option<DataConnection>,
    config: Arc<SessionConfig>,
    allocator: PassivePortAllocator,
    receiver: Arc<dyn DataReceiver>,
}

impl Session {
    pub fn new(config: Arc<SessionConfig>, receiver: Arc<dyn DataReceiver>) -> Self {
        Self::with_rng(config, receiver, Box::new(StdRng::from_entropy()))
    }

    /// Same as `new`, with the random source for passive ports supplied.
    pub fn with_rng(
        config: Arc<SessionConfig>,
        receiver: Arc<dyn DataReceiver>,
        rng: Box<dyn RngCore + Send + Sync>,
    ) -> Self {
        let allocator = PassivePortAllocator::new(&config, rng);
        Self {
            current_dir: String::from("/"),
            last_command: String::new(),
            data_connection: None,
            config,
            allocator,
            receiver,
        }
    }

    /// Processes one command line and updates the last-command token,
    /// whatever the outcome.
    pub async fn handle_line(
        &mut self,
        writer: &mut ReplyWriter,
        line: &str,
    ) -> Result<SessionStatus, FtpError> {
        let line = line.trim();

        let Some((token, args)) = split_command(line) else {
            debug!("-> {}", line);
            self.release_data_connection();
            self.last_command = line.to_ascii_uppercase();
            send_response(writer, Reply::new(501, "Syntax error")).await?;
            return Ok(SessionStatus::Continue);
        };
        debug!("-> {} {}", token, args);

        let command = FtpCommand::from_token(&token);
        // Only the command right after PORT/PASV may use the data connection
        if !command.is_some_and(|c| c.uses_data_connection()) {
            self.release_data_connection();
        }

        let result = dispatch(writer, self, command, args).await;
        self.last_command = token;
        result
    }

    pub fn current_dir(&self) -> &str {
        &self.current_dir
    }

    pub fn set_current_dir(&mut self, dir: &str) {
        self.current_dir = dir.to_string();
    }

    pub fn last_command(&self) -> &str {
        &self.last_command
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn receiver(&self) -> Arc<dyn DataReceiver> {
        Arc::clone(&self.receiver)
    }

    pub(crate) fn allocator_mut(&mut self) -> &mut PassivePortAllocator {
        &mut self.allocator
    }

    pub fn data_connection_mode(&self) -> Option<TransferMode> {
        self.data_connection.as_ref().map(DataConnection::mode)
    }

    pub fn data_connection_port(&self) -> Option<u16> {
        self.data_connection
            .as_ref()
            .and_then(|connection| connection.local_port().ok())
    }

    pub(crate) fn set_data_connection(&mut self, connection: DataConnection) {
        self.release_data_connection();
        self.data_connection = Some(connection);
    }

    pub(crate) fn take_data_connection(&mut self) -> Option<DataConnection> {
        self.data_connection.take()
    }

    /// Drops the held data connection, closing its socket.
    pub fn release_data_connection(&mut self) {
        if let Some(connection) = self.data_connection.take() {
            debug!("Releasing unused {:?} data connection", connection.mode());
        }
    }
}

#[async_trait]
impl ControlHandler for Session {
    async fn on_connect(&mut self, writer: &mut ReplyWriter) -> Result<(), FtpError> {
        send_response(writer, Reply::new(220, "Service ready")).await
    }

    async fn on_command(
        &mut self,
        writer: &mut ReplyWriter,
        line: &str,
    ) -> Result<SessionStatus, FtpError> {
        self.handle_line(writer, line).await
    }

    async fn on_error(
        &mut self,
        writer: &mut ReplyWriter,
        fault: &FtpError,
    ) -> Result<(), FtpError> {
        error!("Fault while handling command {:?}: {}", self.last_command, fault);
        self.release_data_connection();
        send_response(writer, Reply::new(500, format!("Unspecified error: {}", fault))).await
    }

    fn waits_on_data_channel(&self, line: &str) -> bool {
        let transfer = split_command(line.trim())
            .and_then(|(token, _)| FtpCommand::from_token(&token))
            .is_some_and(|command| matches!(command, FtpCommand::LIST | FtpCommand::STOR));
        transfer && self.data_connection.is_some()
    }
}
