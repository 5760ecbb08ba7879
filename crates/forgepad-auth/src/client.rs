//! GitHub OAuth exchange client

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::config::GithubConfig;
use crate::error::AuthError;
use crate::Result;

const USER_AGENT: &str = concat!("Forgepad/", env!("CARGO_PKG_VERSION"));

/// Result of looking at a redirect for an authorization code
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exchange {
    /// The redirect carried a code and the provider returned a token
    Token(String),
    /// No code in the redirect; nothing to exchange
    NotAuthRedirect,
}

#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    code: &'a str,
    redirect_uri: &'a str,
}

/// GitHub answers 200 for rejected codes too, with an `error` body.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

pub struct GithubClient {
    client: Client,
    config: GithubConfig,
}

impl GithubClient {
    pub fn new(config: GithubConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &GithubConfig {
        &self.config
    }

    /// Provider login URL. Pure: the same config always yields the same URL.
    pub fn authorization_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.config.authorize_url)
            .map_err(|e| AuthError::InvalidUrl(format!("{}: {}", self.config.authorize_url, e)))?;

        url.query_pairs_mut()
            .append_pair("client_id", &self.config.client_id)
            .append_pair("redirect_uri", &self.config.redirect_uri)
            .append_pair("scope", &self.config.scopes.join(" "));

        Ok(url)
    }

    /// The non-empty `code` query parameter of a redirect, if any
    pub fn authorization_code(redirect: &str) -> Option<String> {
        let url = Url::parse(redirect).ok()?;
        url.query_pairs()
            .find(|(name, _)| name == "code")
            .map(|(_, value)| value.into_owned())
            .filter(|code| !code.trim().is_empty())
    }

    /// Exchange the code carried by `redirect` for an access token.
    ///
    /// A redirect without a code is [`Exchange::NotAuthRedirect`], not an
    /// error. One request is made; failures are returned, never retried.
    pub async fn exchange(&self, redirect: &str) -> Result<Exchange> {
        let Some(code) = Self::authorization_code(redirect) else {
            return Ok(Exchange::NotAuthRedirect);
        };

        let token = self.request_token(&code).await?;
        Ok(Exchange::Token(token))
    }

    async fn request_token(&self, code: &str) -> Result<String> {
        let request = TokenRequest {
            client_id: &self.config.client_id,
            client_secret: &self.config.client_secret,
            code,
            redirect_uri: &self.config.redirect_uri,
        };

        tracing::debug!(token_url = %self.config.token_url, "Exchanging authorization code");

        let response = self
            .client
            .post(&self.config.token_url)
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(AuthError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| AuthError::MalformedResponse(e.to_string()))?;

        if let Some(error) = parsed.error {
            return Err(AuthError::Provider {
                error,
                description: parsed.error_description,
            });
        }

        match parsed.access_token {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(AuthError::MalformedResponse(
                "missing access_token".to_string(),
            )),
        }
    }
}
