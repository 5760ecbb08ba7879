//! Channel error types

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum IpcError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Unknown route: {0}")]
    UnknownRoute(String),
}
