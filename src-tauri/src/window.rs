//! Native window plumbing
//!
//! Builds the splash window, routes its toolkit callbacks into the [`Host`],
//! and adapts `WebviewWindow` to the host's [`WindowSurface`].

use forgepad_core::{
    Host, Point, Rect, Size, UiCommand, WindowError, WindowSurface, SPLASH_BACKGROUND,
    SPLASH_SIZE,
};
use std::sync::Arc;
use tauri::webview::PageLoadEvent;
use tauri::window::Color;
use tauri::{
    AppHandle, Emitter, LogicalPosition, LogicalSize, WebviewUrl, WebviewWindow,
    WebviewWindowBuilder, WindowEvent,
};
use url::Url;

pub const WINDOW_LABEL: &str = "main";

/// Build a fresh splash window and hand it to the host
pub fn open_splash(app: &AppHandle, host: &Arc<Host>) -> forgepad_core::Result<()> {
    let (r, g, b) = SPLASH_BACKGROUND;
    let splash = LogicalSize::new(SPLASH_SIZE.width, SPLASH_SIZE.height);

    let host_for_navigation = Arc::clone(host);
    let host_for_load = Arc::clone(host);

    let window = WebviewWindowBuilder::new(app, WINDOW_LABEL, WebviewUrl::App("index.html".into()))
        .title("Forgepad")
        .inner_size(splash.width, splash.height)
        .min_inner_size(splash.width, splash.height)
        .max_inner_size(splash.width, splash.height)
        .resizable(false)
        .decorations(false)
        .visible(false)
        .center()
        .background_color(Color(r, g, b, 255))
        .on_navigation(move |url| {
            // Never cancel: the redirect target is not served anyway.
            if host_for_navigation.is_auth_redirect(url.as_str()) {
                let host = Arc::clone(&host_for_navigation);
                let url = url.to_string();
                tauri::async_runtime::spawn(async move {
                    let outcome = host.on_navigation(&url).await;
                    tracing::debug!(?outcome, "Handled auth redirect");
                });
            }
            true
        })
        .on_page_load(move |_webview, payload| {
            if matches!(payload.event(), PageLoadEvent::Finished) {
                host_for_load.content_loaded();
            }
        })
        .build()
        .map_err(surface_error)?;

    let host_for_close = Arc::clone(host);
    window.on_window_event(move |event| {
        if let WindowEvent::Destroyed = event {
            host_for_close.window_closed();
        }
    });

    host.attach_window(Arc::new(TauriSurface::new(window)))
}

fn surface_error(e: tauri::Error) -> WindowError {
    WindowError::Surface(e.to_string())
}

pub struct TauriSurface {
    window: WebviewWindow,
    /// Entry page the window was built with
    app_url: Option<Url>,
}

impl TauriSurface {
    pub fn new(window: WebviewWindow) -> Self {
        let app_url = window.url().ok().filter(|url| url.scheme() != "about");
        Self { window, app_url }
    }
}

impl WindowSurface for TauriSurface {
    fn show(&self) -> Result<(), WindowError> {
        self.window.show().map_err(surface_error)
    }

    fn focus(&self) -> Result<(), WindowError> {
        self.window.set_focus().map_err(surface_error)
    }

    fn minimize(&self) -> Result<(), WindowError> {
        self.window.minimize().map_err(surface_error)
    }

    fn work_area(&self) -> Option<Rect> {
        let monitor = self.window.primary_monitor().ok().flatten()?;
        let scale = monitor.scale_factor();
        let area = monitor.work_area();
        let position = area.position.to_logical::<f64>(scale);
        let size = area.size.to_logical::<f64>(scale);
        Some(Rect::new(position.x, position.y, size.width, size.height))
    }

    fn set_resizable(&self, resizable: bool) -> Result<(), WindowError> {
        self.window.set_resizable(resizable).map_err(surface_error)
    }

    fn set_max_size(&self, size: Size) -> Result<(), WindowError> {
        self.window
            .set_max_size(Some(LogicalSize::new(size.width, size.height)))
            .map_err(surface_error)
    }

    fn set_size(&self, size: Size) -> Result<(), WindowError> {
        self.window
            .set_size(LogicalSize::new(size.width, size.height))
            .map_err(surface_error)
    }

    fn set_position(&self, position: Point) -> Result<(), WindowError> {
        self.window
            .set_position(LogicalPosition::new(position.x, position.y))
            .map_err(surface_error)
    }

    fn center(&self) -> Result<(), WindowError> {
        self.window.center().map_err(surface_error)
    }

    fn load_url(&self, url: &Url) -> Result<(), WindowError> {
        self.window.navigate(url.clone()).map_err(surface_error)
    }

    fn load_app(&self) -> Result<(), WindowError> {
        let url = self
            .app_url
            .clone()
            .ok_or_else(|| WindowError::Surface("app entry URL unknown".to_string()))?;
        self.window.navigate(url).map_err(surface_error)
    }

    fn send(&self, command: UiCommand) -> Result<(), WindowError> {
        self.window
            .emit(command.channel(), command.payload())
            .map_err(surface_error)
    }
}
