//! Session credential record
//!
//! On-disk shape: `{"access_token": "...", "login": true}` under the
//! provider's scope and [`ACCESS_TOKEN_KEY`].

use serde::{Deserialize, Serialize};

use crate::store::KeyValueStore;
use crate::Result;

pub const ACCESS_TOKEN_KEY: &str = "accessToken";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCredential {
    pub access_token: String,
    pub login: bool,
}

impl SessionCredential {
    /// Credential produced by a successful token exchange
    pub fn authenticated(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            login: true,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.login && !self.access_token.is_empty()
    }
}

pub async fn read_credential(
    store: &dyn KeyValueStore,
    scope: &str,
) -> Result<Option<SessionCredential>> {
    match store.get(scope, ACCESS_TOKEN_KEY).await? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

pub async fn write_credential(
    store: &dyn KeyValueStore,
    scope: &str,
    credential: &SessionCredential,
) -> Result<()> {
    let value = serde_json::to_value(credential)?;
    store.set(scope, ACCESS_TOKEN_KEY, value).await
}
