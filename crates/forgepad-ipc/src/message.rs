//! Channel messages

use serde::{Deserialize, Serialize};

use crate::error::IpcError;
use crate::route::Route;

/// Messages the UI process sends to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostCommand {
    /// Load the provider's authorization page into the window
    #[serde(rename = "githubAuthenticate")]
    GithubAuthenticate,
}

impl HostCommand {
    pub const GITHUB_AUTHENTICATE: &'static str = "githubAuthenticate";

    /// Validate a channel name arriving from the UI process
    pub fn parse(channel: &str) -> Result<Self, IpcError> {
        match channel.trim() {
            Self::GITHUB_AUTHENTICATE => Ok(HostCommand::GithubAuthenticate),
            other => Err(IpcError::UnknownCommand(other.to_string())),
        }
    }

    pub fn channel(&self) -> &'static str {
        match self {
            HostCommand::GithubAuthenticate => Self::GITHUB_AUTHENTICATE,
        }
    }
}

/// Messages the host sends to the UI process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UiCommand {
    #[serde(rename = "changeRoute")]
    ChangeRoute(Route),
}

impl UiCommand {
    pub const CHANGE_ROUTE: &'static str = "changeRoute";

    pub fn channel(&self) -> &'static str {
        match self {
            UiCommand::ChangeRoute(_) => Self::CHANGE_ROUTE,
        }
    }

    /// Payload as delivered on the channel (the route identifier string)
    pub fn payload(&self) -> serde_json::Value {
        match self {
            UiCommand::ChangeRoute(route) => serde_json::Value::from(route.as_str()),
        }
    }
}
