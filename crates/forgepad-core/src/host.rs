//! Host coordinator
//!
//! Owns every long-lived piece of the host process: the store, the GitHub
//! client, the navigation interceptor and the window controller. The desktop
//! shell keeps one `Host` and forwards toolkit events to it.

use std::sync::Arc;
use tokio::runtime::Handle;

use forgepad_auth::{GithubClient, NavigationInterceptor, NavigationOutcome};
use forgepad_ipc::{HostCommand, Route};
use forgepad_storage::{read_credential, Database, KeyValueStore, ScopedStore};
use forgepad_window::{WindowController, WindowSurface};

use crate::config::Config;
use crate::Result;

pub struct Host {
    config: Config,
    store: Arc<dyn KeyValueStore>,
    client: Arc<GithubClient>,
    interceptor: NavigationInterceptor,
    windows: WindowController,
}

impl Host {
    /// Open the on-disk store named by `config` and wire everything to it
    pub fn new(config: Config, runtime: Handle) -> Result<Self> {
        let db = Database::open(&config.database_path)?;
        Self::with_store(config, Arc::new(ScopedStore::new(db)), runtime)
    }

    pub fn with_store(
        config: Config,
        store: Arc<dyn KeyValueStore>,
        runtime: Handle,
    ) -> Result<Self> {
        let client = Arc::new(GithubClient::new(config.github.clone())?);
        let interceptor = NavigationInterceptor::new(
            Arc::clone(&client),
            Arc::clone(&store),
            config.storage_scope.clone(),
        );
        let windows = WindowController::new(Arc::clone(&store), config.lifecycle(), runtime);

        tracing::info!(
            scope = %config.storage_scope,
            splash_delay_ms = config.splash_delay_ms,
            "Host initialized"
        );

        Ok(Self {
            config,
            store,
            client,
            interceptor,
            windows,
        })
    }

    pub fn windows(&self) -> &WindowController {
        &self.windows
    }

    pub fn interceptor(&self) -> &NavigationInterceptor {
        &self.interceptor
    }

    // === Window lifecycle ===

    /// Hand a new splash window to the host; interception starts with it.
    pub fn attach_window(&self, surface: Arc<dyn WindowSurface>) -> Result<()> {
        self.windows.attach(surface)?;
        self.interceptor.arm();
        Ok(())
    }

    pub fn content_loaded(&self) {
        self.windows.on_content_loaded();
    }

    /// Window is gone: stop intercepting and release the handle.
    pub fn window_closed(&self) -> bool {
        self.interceptor.disarm();
        self.windows.on_closed()
    }

    /// True when reactivation should build a fresh window
    pub fn needs_window(&self) -> bool {
        !self.windows.is_live()
    }

    // === Command channel ===

    /// Validate a raw channel name from the UI process and act on it
    pub fn dispatch(&self, channel: &str) -> Result<()> {
        let command = HostCommand::parse(channel)?;
        self.handle_command(command)
    }

    pub fn handle_command(&self, command: HostCommand) -> Result<()> {
        match command {
            HostCommand::GithubAuthenticate => {
                let url = self.client.authorization_url()?;
                self.windows.load_url(&url)?;
                tracing::info!("Started GitHub authentication");
            }
        }
        Ok(())
    }

    // === Navigation ===

    pub fn is_auth_redirect(&self, url: &str) -> bool {
        self.interceptor.matches(url)
    }

    /// Run the interceptor; a fresh login sends the window back to the app
    /// on the home route.
    pub async fn on_navigation(&self, url: &str) -> NavigationOutcome {
        let outcome = self.interceptor.handle(url).await;
        if outcome == NavigationOutcome::Authenticated {
            if let Err(e) = self.windows.return_to_app(Route::Home) {
                tracing::warn!(error = %e, "Could not return to app after login");
            }
        }
        outcome
    }

    /// Whether a usable credential is stored; unreadable counts as no.
    pub async fn is_authenticated(&self) -> bool {
        match read_credential(self.store.as_ref(), &self.config.storage_scope).await {
            Ok(credential) => credential.is_some_and(|c| c.is_logged_in()),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read stored credential");
                false
            }
        }
    }
}
