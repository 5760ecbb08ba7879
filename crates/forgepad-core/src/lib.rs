//! Forgepad Core
//!
//! Host-side coordination for the Forgepad desktop app: GitHub login capture
//! from the embedded view, credential persistence, and the splash-to-main
//! window lifecycle. The UI process never blocks on any of it.

mod config;
mod error;
mod host;

pub use config::Config;
pub use error::CoreError;
pub use host::Host;

// Re-export core components
pub use forgepad_auth::{
    AuthError, Exchange, GithubClient, GithubConfig, InterceptorState, NavigationInterceptor,
    NavigationOutcome,
};
pub use forgepad_ipc::{HostCommand, IpcError, Route, UiCommand};
pub use forgepad_storage::{
    read_credential, write_credential, Database, KeyValueStore, ScopedStore, SessionCredential,
    StorageError, ACCESS_TOKEN_KEY,
};
pub use forgepad_window::{
    LifecycleSettings, Point, Rect, Size, WindowController, WindowError, WindowPhase,
    WindowSurface, MAIN_SIZE, SPLASH_BACKGROUND, SPLASH_SIZE,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
