use super::CommandResult;
use crate::state::AppState;
use forgepad_core::HostCommand;
use std::sync::Arc;
use tauri::{AppHandle, Manager, State};

/// Open the GitHub login page in the app window
#[tauri::command]
pub fn github_authenticate(state: State<AppState>) -> CommandResult<()> {
    match state.host().handle_command(HostCommand::GithubAuthenticate) {
        Ok(()) => CommandResult::ok(()),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

#[tauri::command]
pub async fn auth_status(app: AppHandle) -> CommandResult<bool> {
    let host = match app.try_state::<AppState>() {
        Some(state) => Arc::clone(state.host()),
        None => return CommandResult::err("AppState not found".to_string()),
    };

    CommandResult::ok(host.is_authenticated().await)
}
