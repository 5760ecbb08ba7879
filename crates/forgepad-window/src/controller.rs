//! Window lifecycle controller
//!
//! Owns the single live window. The handle enters through [`WindowController::attach`]
//! and leaves only through [`WindowController::on_closed`]; nothing else keeps it.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;
use url::Url;

use forgepad_ipc::{Route, UiCommand};
use forgepad_storage::{read_credential, KeyValueStore};

use crate::error::WindowError;
use crate::geometry::MAIN_SIZE;
use crate::phase::WindowPhase;
use crate::surface::WindowSurface;
use crate::Result;

#[derive(Debug, Clone)]
pub struct LifecycleSettings {
    /// Time the splash stays up after the first content load
    pub splash_delay: Duration,
    /// Minimize instead of show once content is loaded
    pub start_minimized: bool,
    /// Store scope holding the provider credential
    pub credential_scope: String,
}

impl Default for LifecycleSettings {
    fn default() -> Self {
        Self {
            splash_delay: Duration::from_secs(6),
            start_minimized: false,
            credential_scope: "github".to_string(),
        }
    }
}

struct LiveWindow {
    generation: u64,
    surface: Arc<dyn WindowSurface>,
    phase: WindowPhase,
    /// Set once the post-splash transition is scheduled; cancelled on close
    transition: Option<CancellationToken>,
    /// Sent on the next content load
    pending_route: Option<Route>,
}

struct ControllerState {
    window: Option<LiveWindow>,
    /// Phase reported while no window is live
    idle_phase: WindowPhase,
    next_generation: u64,
}

#[derive(Clone)]
pub struct WindowController {
    state: Arc<Mutex<ControllerState>>,
    store: Arc<dyn KeyValueStore>,
    settings: Arc<LifecycleSettings>,
    runtime: Handle,
}

impl WindowController {
    pub fn new(store: Arc<dyn KeyValueStore>, settings: LifecycleSettings, runtime: Handle) -> Self {
        Self {
            state: Arc::new(Mutex::new(ControllerState {
                window: None,
                idle_phase: WindowPhase::Uninitialized,
                next_generation: 0,
            })),
            store,
            settings: Arc::new(settings),
            runtime,
        }
    }

    pub fn settings(&self) -> &LifecycleSettings {
        &self.settings
    }

    pub fn phase(&self) -> WindowPhase {
        let state = self.state.lock();
        state
            .window
            .as_ref()
            .map(|window| window.phase)
            .unwrap_or(state.idle_phase)
    }

    pub fn is_live(&self) -> bool {
        self.state.lock().window.is_some()
    }

    /// Take ownership of a freshly built splash window
    pub fn attach(&self, surface: Arc<dyn WindowSurface>) -> Result<()> {
        let mut state = self.state.lock();
        if state.window.is_some() {
            return Err(WindowError::AlreadyOpen);
        }

        let generation = state.next_generation;
        state.next_generation += 1;
        state.window = Some(LiveWindow {
            generation,
            surface,
            phase: WindowPhase::Splash,
            transition: None,
            pending_route: None,
        });

        tracing::info!(generation, "Splash window attached");
        Ok(())
    }

    /// Content finished loading: reveal the window and, the first time only,
    /// schedule the move out of the splash.
    pub fn on_content_loaded(&self) {
        let (surface, scheduled, pending_route) = {
            let mut state = self.state.lock();
            let Some(window) = state.window.as_mut() else {
                tracing::debug!("Content loaded with no live window");
                return;
            };

            let scheduled = if window.transition.is_none() {
                let token = CancellationToken::new();
                window.transition = Some(token.clone());
                Some((window.generation, token))
            } else {
                None
            };

            (
                Arc::clone(&window.surface),
                scheduled,
                window.pending_route.take(),
            )
        };

        if self.settings.start_minimized {
            log_failure("minimize", surface.minimize());
        } else {
            log_failure("show", surface.show());
            log_failure("focus", surface.focus());
        }

        if let Some(route) = pending_route {
            log_failure("send", surface.send(UiCommand::ChangeRoute(route)));
        }

        if let Some((generation, token)) = scheduled {
            let controller = self.clone();
            self.runtime.spawn(async move {
                controller.run_transition(generation, token).await;
            });
        }
    }

    /// Release the window. Returns whether a live window was dropped.
    pub fn on_closed(&self) -> bool {
        let released = {
            let mut state = self.state.lock();
            let released = state.window.take();
            if released.is_some() {
                state.idle_phase = WindowPhase::Closed;
            }
            released
        };

        match released {
            Some(window) => {
                if let Some(token) = &window.transition {
                    token.cancel();
                }
                tracing::info!(
                    generation = window.generation,
                    phase = %window.phase,
                    "Window closed"
                );
                true
            }
            None => false,
        }
    }

    /// Replace the live window's content with `url`
    pub fn load_url(&self, url: &Url) -> Result<()> {
        let surface = self.live_surface().ok_or(WindowError::NotOpen)?;
        surface.load_url(url)?;
        tracing::info!(url = %url, "Loaded URL into window");
        Ok(())
    }

    /// Leave whatever page the window shows for the app's entry page and
    /// route the UI to `route` once that page has loaded.
    pub fn return_to_app(&self, route: Route) -> Result<()> {
        let surface = {
            let mut state = self.state.lock();
            let window = state.window.as_mut().ok_or(WindowError::NotOpen)?;
            window.pending_route = Some(route);
            Arc::clone(&window.surface)
        };

        surface.load_app()?;
        tracing::info!(route = %route, "Returning to app page");
        Ok(())
    }

    fn live_surface(&self) -> Option<Arc<dyn WindowSurface>> {
        self.state
            .lock()
            .window
            .as_ref()
            .map(|window| Arc::clone(&window.surface))
    }

    async fn run_transition(&self, generation: u64, token: CancellationToken) {
        tokio::select! {
            _ = token.cancelled() => {
                tracing::debug!(generation, "Window closed before splash transition");
                return;
            }
            _ = tokio::time::sleep(self.settings.splash_delay) => {}
        }

        if self
            .advance(generation, &token, WindowPhase::Transitioning)
            .is_none()
        {
            return;
        }

        let logged_in = self.logged_in().await;

        // The credential read yields; the window may have gone meanwhile.
        let Some(surface) = self.current_surface(generation, &token) else {
            tracing::debug!(generation, "Window released during splash transition");
            return;
        };

        log_failure("set_resizable", surface.set_resizable(true));
        match surface.work_area() {
            Some(work_area) => {
                let bounds = work_area.center(MAIN_SIZE);
                log_failure("set_max_size", surface.set_max_size(work_area.size));
                log_failure("set_size", surface.set_size(bounds.size));
                log_failure("set_position", surface.set_position(bounds.origin));
            }
            None => {
                log_failure("set_size", surface.set_size(MAIN_SIZE));
                log_failure("center", surface.center());
            }
        }

        // Toolkit callbacks run concurrently and may have closed the window.
        if self.current_surface(generation, &token).is_none() {
            tracing::debug!(generation, "Window released while resizing");
            return;
        }

        let route = Route::after_splash(logged_in);
        log_failure("send", surface.send(UiCommand::ChangeRoute(route)));

        self.advance(generation, &token, WindowPhase::Main);
        tracing::info!(generation, route = %route, "Splash transition complete");
    }

    /// Move the current window to `target` if it is still the one this
    /// transition was scheduled for.
    fn advance(
        &self,
        generation: u64,
        token: &CancellationToken,
        target: WindowPhase,
    ) -> Option<Arc<dyn WindowSurface>> {
        let mut state = self.state.lock();
        let window = state.window.as_mut()?;
        if token.is_cancelled() || window.generation != generation {
            return None;
        }
        if !window.phase.can_transition_to(target) {
            tracing::warn!(from = %window.phase, to = %target, "Invalid window phase transition");
            return None;
        }

        window.phase = target;
        Some(Arc::clone(&window.surface))
    }

    fn current_surface(
        &self,
        generation: u64,
        token: &CancellationToken,
    ) -> Option<Arc<dyn WindowSurface>> {
        let state = self.state.lock();
        let window = state.window.as_ref()?;
        if token.is_cancelled() || window.generation != generation {
            return None;
        }
        Some(Arc::clone(&window.surface))
    }

    /// A failed read counts as logged out.
    async fn logged_in(&self) -> bool {
        match read_credential(self.store.as_ref(), &self.settings.credential_scope).await {
            Ok(Some(credential)) => credential.is_logged_in(),
            Ok(None) => false,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read stored credential, routing as logged out");
                false
            }
        }
    }
}

fn log_failure(operation: &str, result: Result<()>) {
    if let Err(e) = result {
        tracing::warn!(operation, error = %e, "Window operation failed");
    }
}
