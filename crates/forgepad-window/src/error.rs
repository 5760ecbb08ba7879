//! Window error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WindowError {
    #[error("A window is already open")]
    AlreadyOpen,

    #[error("No live window")]
    NotOpen,

    #[error("Window operation failed: {0}")]
    Surface(String),
}
