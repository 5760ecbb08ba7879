//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] forgepad_storage::StorageError),

    #[error("Auth error: {0}")]
    Auth(#[from] forgepad_auth::AuthError),

    #[error("Window error: {0}")]
    Window(#[from] forgepad_window::WindowError),

    #[error("IPC error: {0}")]
    Ipc(#[from] forgepad_ipc::IpcError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
