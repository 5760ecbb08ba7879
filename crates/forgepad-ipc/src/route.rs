//! UI destinations

use serde::{Deserialize, Serialize};

use crate::error::IpcError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Route {
    /// Logged-out landing page
    Welcome,
    /// Landing page once a credential is stored
    Home,
}

impl Route {
    /// Post-splash destination for the given login state
    pub fn after_splash(logged_in: bool) -> Self {
        if logged_in {
            Route::Home
        } else {
            Route::Welcome
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Route::Welcome => "/welcome",
            Route::Home => "/home",
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Route {
    type Err = IpcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "/welcome" => Ok(Route::Welcome),
            "/home" => Ok(Route::Home),
            _ => Err(IpcError::UnknownRoute(s.to_string())),
        }
    }
}

impl TryFrom<String> for Route {
    type Error = IpcError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Route> for String {
    fn from(route: Route) -> Self {
        route.as_str().to_string()
    }
}
