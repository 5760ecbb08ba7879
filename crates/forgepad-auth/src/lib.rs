//! Forgepad Authentication
//!
//! GitHub OAuth through the embedded view:
//! 1. The window loads [`GithubClient::authorization_url`]
//! 2. GitHub redirects to the local callback with a `code`
//! 3. [`NavigationInterceptor`] spots the redirect, exchanges the code and
//!    persists `{access_token, login: true}` under the provider scope

mod client;
mod config;
mod error;
mod interceptor;

pub use client::{Exchange, GithubClient};
pub use config::GithubConfig;
pub use error::AuthError;
pub use interceptor::{InterceptorState, NavigationInterceptor, NavigationOutcome};

pub type Result<T> = std::result::Result<T, AuthError>;
