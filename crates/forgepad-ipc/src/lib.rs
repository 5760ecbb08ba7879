//! Forgepad Command Channel
//!
//! Closed message sets exchanged between the UI process and the host:
//! - `githubAuthenticate` (UI → host)
//! - `changeRoute` (host → UI)
//!
//! Messages are fire-and-forget; ordering per direction is the transport's job.

mod error;
mod message;
mod route;

pub use error::IpcError;
pub use message::{HostCommand, UiCommand};
pub use route::Route;

pub type Result<T> = std::result::Result<T, IpcError>;
