//! Tauri IPC Commands
//!
//! These commands bridge the frontend to the host core.

pub mod auth;
pub mod diagnostics;
mod result;

pub use result::CommandResult;
