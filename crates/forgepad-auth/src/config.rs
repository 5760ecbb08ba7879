//! GitHub OAuth application settings

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    /// OAuth app client id
    pub client_id: String,
    /// OAuth app client secret
    pub client_secret: String,
    /// Provider login page
    pub authorize_url: String,
    /// Code-for-token endpoint
    pub token_url: String,
    /// Callback registered with the OAuth app
    pub redirect_uri: String,
    /// Requested OAuth scopes
    pub scopes: Vec<String>,
    /// Host the provider redirects to
    pub callback_host: String,
    /// Query marker identifying redirects meant for this app
    pub app_marker: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            authorize_url: "https://github.com/login/oauth/authorize".to_string(),
            token_url: "https://github.com/login/oauth/access_token".to_string(),
            redirect_uri: "http://localhost/callback?app=github".to_string(),
            scopes: vec!["repo".to_string(), "gist".to_string(), "read:user".to_string()],
            callback_host: "localhost".to_string(),
            app_marker: "app=github".to_string(),
        }
    }
}
