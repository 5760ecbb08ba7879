//! Application state management
use forgepad_core::{Config, Host, Result};
use std::sync::Arc;
use tokio::runtime::Handle;

/// Shared host handle, managed by Tauri
pub struct AppState {
    host: Arc<Host>,
}

impl AppState {
    pub fn new(runtime: Handle) -> Result<Self> {
        let config = Config::load(&Config::data_dir())?;
        let host = Host::new(config, runtime)?;

        Ok(Self {
            host: Arc::new(host),
        })
    }

    pub fn host(&self) -> &Arc<Host> {
        &self.host
    }
}
