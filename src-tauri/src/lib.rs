//! Forgepad - Tauri Application
//!
//! One window: a splash that turns into the main view, with GitHub login
//! handled inside the embedded webview.

mod commands;
mod state;
mod window;

use forgepad_core::HostCommand;
use state::AppState;
use tauri::{AppHandle, Listener, Manager, RunEvent};

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Initialize logging
    forgepad_core::init_logging();

    let app = tauri::Builder::default()
        .setup(|app| {
            let runtime = tauri::async_runtime::handle().inner().clone();
            let state = AppState::new(runtime)?;
            let host = state.host().clone();

            // Store state in Tauri
            app.manage(state);

            let host_for_events = host.clone();
            app.listen(HostCommand::GITHUB_AUTHENTICATE, move |_event| {
                if let Err(e) = host_for_events.dispatch(HostCommand::GITHUB_AUTHENTICATE) {
                    tracing::warn!(error = %e, "Could not start GitHub authentication");
                }
            });

            window::open_splash(app.handle(), &host)?;

            tracing::info!("Forgepad started");

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Diagnostics
            commands::diagnostics::frontend_ready,
            // Auth commands
            commands::auth::github_authenticate,
            commands::auth::auth_status,
        ])
        .build(tauri::generate_context!())
        .expect("error while building Forgepad");

    app.run(on_run_event);
}

#[cfg_attr(not(target_os = "macos"), allow(unused_variables))]
fn on_run_event(app: &AppHandle, event: RunEvent) {
    match event {
        #[cfg(target_os = "macos")]
        RunEvent::Reopen { .. } => reopen(app),
        // Closing the last window quits, except on macOS where the app stays
        // resident until reactivated.
        RunEvent::ExitRequested { api, code, .. } => {
            if code.is_none() && cfg!(target_os = "macos") {
                api.prevent_exit();
            }
        }
        _ => {}
    }
}

#[cfg(target_os = "macos")]
fn reopen(app: &AppHandle) {
    let Some(state) = app.try_state::<AppState>() else {
        return;
    };
    let host = state.host().clone();
    if !host.needs_window() {
        return;
    }

    if let Err(e) = window::open_splash(app, &host) {
        tracing::error!(error = %e, "Failed to reopen window");
    }
}
