//! Shell-level errors.

use colorcast_core::TransferError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Transfer(#[from] TransferError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid input {input:?}: {reason}")]
    InvalidInput { input: String, reason: &'static str },

    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
