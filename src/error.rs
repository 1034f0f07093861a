use crate::core_network::framing::FramingError;
use thiserror::Error;

/// Faults that escape a command handler.
///
/// Data-channel failures never show up here: handlers turn them into 55x
/// replies themselves. What is left is the control connection going away
/// or a framing violation.
#[derive(Debug, Error)]
pub enum FtpError {
    #[error("control connection I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Framing(#[from] FramingError),
}
