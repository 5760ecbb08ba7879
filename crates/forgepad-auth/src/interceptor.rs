//! Navigation interception
//!
//! ```text
//! Idle --arm (view live)--> Armed --disarm (view closed)--> Idle
//! ```
//!
//! While armed, every navigation is tested with [`NavigationInterceptor::matches`];
//! matching ones go through [`NavigationInterceptor::handle`]. Navigation itself
//! is never held back: the caller lets it proceed and runs `handle` as a task.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use url::Url;

use forgepad_storage::{write_credential, KeyValueStore, SessionCredential};

use crate::client::{Exchange, GithubClient};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterceptorState {
    Idle,
    Armed,
}

/// What happened to one navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// Not an auth redirect (or interceptor idle); nothing touched
    PassThrough,
    /// Auth redirect without a code; nothing to do
    MissingCode,
    /// Token exchanged and stored
    Authenticated,
    /// Exchange failed; previously stored credential left as it was
    ExchangeFailed(String),
    /// Exchange succeeded but the credential could not be written
    StoreFailed(String),
}

pub struct NavigationInterceptor {
    client: Arc<GithubClient>,
    store: Arc<dyn KeyValueStore>,
    scope: String,
    armed: AtomicBool,
}

impl NavigationInterceptor {
    pub fn new(client: Arc<GithubClient>, store: Arc<dyn KeyValueStore>, scope: String) -> Self {
        Self {
            client,
            store,
            scope,
            armed: AtomicBool::new(false),
        }
    }

    pub fn arm(&self) {
        self.armed.store(true, Ordering::SeqCst);
    }

    pub fn disarm(&self) {
        self.armed.store(false, Ordering::SeqCst);
    }

    pub fn state(&self) -> InterceptorState {
        if self.armed.load(Ordering::SeqCst) {
            InterceptorState::Armed
        } else {
            InterceptorState::Idle
        }
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Does `url` look like the provider's redirect back to this app?
    pub fn matches(&self, url: &str) -> bool {
        let config = self.client.config();
        let Ok(parsed) = Url::parse(url) else {
            return false;
        };

        parsed.host_str() == Some(config.callback_host.as_str())
            && parsed
                .query()
                .is_some_and(|query| query.contains(config.app_marker.as_str()))
    }

    pub async fn handle(&self, url: &str) -> NavigationOutcome {
        if self.state() == InterceptorState::Idle || !self.matches(url) {
            return NavigationOutcome::PassThrough;
        }

        let token = match self.client.exchange(url).await {
            Ok(Exchange::Token(token)) => token,
            Ok(Exchange::NotAuthRedirect) => {
                tracing::debug!(url = %url, "Callback without authorization code");
                return NavigationOutcome::MissingCode;
            }
            Err(e) => {
                tracing::warn!(error = %e, "GitHub authentication failed");
                return NavigationOutcome::ExchangeFailed(e.to_string());
            }
        };

        let credential = SessionCredential::authenticated(token);
        match write_credential(self.store.as_ref(), &self.scope, &credential).await {
            Ok(()) => {
                tracing::info!(scope = %self.scope, "GitHub authentication succeeded");
                NavigationOutcome::Authenticated
            }
            Err(e) => {
                tracing::error!(scope = %self.scope, error = %e, "Failed to store credential");
                NavigationOutcome::StoreFailed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use forgepad_storage::{
        read_credential, Database, ScopedStore, StorageError, ACCESS_TOKEN_KEY,
    };
    use mockito::{Matcher, Server, ServerGuard};
    use parking_lot::Mutex;
    use serde_json::{json, Value};

    use crate::config::GithubConfig;

    struct ReadOnlyStore;

    #[async_trait]
    impl KeyValueStore for ReadOnlyStore {
        async fn get(&self, _scope: &str, _key: &str) -> forgepad_storage::Result<Option<Value>> {
            Ok(None)
        }

        async fn set(&self, _scope: &str, _key: &str, _value: Value) -> forgepad_storage::Result<()> {
            Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )))
        }
    }

    /// Records every `set` so tests can count writes
    #[derive(Default)]
    struct CountingStore {
        sets: Mutex<Vec<(String, String, Value)>>,
    }

    #[async_trait]
    impl KeyValueStore for CountingStore {
        async fn get(&self, _scope: &str, _key: &str) -> forgepad_storage::Result<Option<Value>> {
            Ok(None)
        }

        async fn set(&self, scope: &str, key: &str, value: Value) -> forgepad_storage::Result<()> {
            self.sets
                .lock()
                .push((scope.to_string(), key.to_string(), value));
            Ok(())
        }
    }

    fn client_for(server: &ServerGuard) -> Arc<GithubClient> {
        Arc::new(
            GithubClient::new(GithubConfig {
                client_id: "client-1".to_string(),
                client_secret: "secret-1".to_string(),
                token_url: format!("{}/token", server.url()),
                ..GithubConfig::default()
            })
            .unwrap(),
        )
    }

    fn armed(client: Arc<GithubClient>, store: Arc<dyn KeyValueStore>) -> NavigationInterceptor {
        let interceptor = NavigationInterceptor::new(client, store, "github".to_string());
        interceptor.arm();
        interceptor
    }

    #[tokio::test]
    async fn test_matches() {
        let server = Server::new_async().await;
        let store = Arc::new(ScopedStore::new(Database::open_in_memory().unwrap()));
        let interceptor = armed(client_for(&server), store);

        assert!(interceptor.matches("http://localhost/callback?app=github&code=XYZ"));
        assert!(interceptor.matches("http://localhost:1212/?app=github"));
        assert!(!interceptor.matches("https://github.com/login?app=github"));
        assert!(!interceptor.matches("http://localhost/callback?app=gitlab&code=XYZ"));
        assert!(!interceptor.matches("https://example.com/?next=localhost&app=github"));
        assert!(!interceptor.matches("file:///app.html"));
        assert!(!interceptor.matches("garbage"));
    }

    #[tokio::test]
    async fn test_non_matching_urls_pass_through_untouched() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", Matcher::Any)
            .expect(0)
            .create_async()
            .await;
        let store = ScopedStore::new(Database::open_in_memory().unwrap());
        let interceptor = armed(client_for(&server), Arc::new(store.clone()));

        for _ in 0..2 {
            assert_eq!(
                interceptor.handle("https://github.com/login/oauth/authorize").await,
                NavigationOutcome::PassThrough
            );
        }

        assert!(store.database().keys_in_scope("github").unwrap().is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_idle_interceptor_ignores_redirects() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", Matcher::Any)
            .expect(0)
            .create_async()
            .await;
        let store = Arc::new(ScopedStore::new(Database::open_in_memory().unwrap()));
        let interceptor =
            NavigationInterceptor::new(client_for(&server), store, "github".to_string());

        assert_eq!(interceptor.state(), InterceptorState::Idle);
        assert_eq!(
            interceptor
                .handle("http://localhost/callback?app=github&code=XYZ")
                .await,
            NavigationOutcome::PassThrough
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_repeated_logins_last_write_wins() {
        let mut server = Server::new_async().await;
        let first = server
            .mock("POST", "/token")
            .match_body(Matcher::UrlEncoded("code".into(), "one".into()))
            .with_body(r#"{"access_token":"tok_1"}"#)
            .expect(1)
            .create_async()
            .await;
        let second = server
            .mock("POST", "/token")
            .match_body(Matcher::UrlEncoded("code".into(), "two".into()))
            .with_body(r#"{"access_token":"tok_2"}"#)
            .expect(1)
            .create_async()
            .await;

        let store = ScopedStore::new(Database::open_in_memory().unwrap());
        let interceptor = armed(client_for(&server), Arc::new(store.clone()));

        assert_eq!(
            interceptor
                .handle("http://localhost/callback?app=github&code=one")
                .await,
            NavigationOutcome::Authenticated
        );
        assert_eq!(
            interceptor
                .handle("http://localhost/callback?app=github&code=two")
                .await,
            NavigationOutcome::Authenticated
        );

        let stored = read_credential(&store, "github").await.unwrap().unwrap();
        assert_eq!(stored, SessionCredential::authenticated("tok_2"));
        assert_eq!(
            store.database().keys_in_scope("github").unwrap(),
            vec![ACCESS_TOKEN_KEY]
        );
        first.assert_async().await;
        second.assert_async().await;
    }

    #[tokio::test]
    async fn test_failed_exchange_keeps_previous_credential() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/token")
            .with_status(500)
            .create_async()
            .await;

        let store = ScopedStore::new(Database::open_in_memory().unwrap());
        forgepad_storage::write_credential(
            &store,
            "github",
            &SessionCredential::authenticated("old"),
        )
        .await
        .unwrap();

        let interceptor = armed(client_for(&server), Arc::new(store.clone()));
        let outcome = interceptor
            .handle("http://localhost/callback?app=github&code=XYZ")
            .await;

        assert!(matches!(outcome, NavigationOutcome::ExchangeFailed(_)));
        let stored = read_credential(&store, "github").await.unwrap().unwrap();
        assert_eq!(stored.access_token, "old");
    }

    #[tokio::test]
    async fn test_missing_code_is_a_no_op() {
        let server = Server::new_async().await;
        let store = ScopedStore::new(Database::open_in_memory().unwrap());
        let interceptor = armed(client_for(&server), Arc::new(store.clone()));

        assert_eq!(
            interceptor
                .handle("http://localhost/callback?app=github")
                .await,
            NavigationOutcome::MissingCode
        );
        assert_eq!(read_credential(&store, "github").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_store_failure_is_reported() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/token")
            .with_body(r#"{"access_token":"tok_1"}"#)
            .create_async()
            .await;

        let interceptor = armed(client_for(&server), Arc::new(ReadOnlyStore));
        let outcome = interceptor
            .handle("http://localhost/callback?app=github&code=XYZ")
            .await;

        assert!(matches!(outcome, NavigationOutcome::StoreFailed(_)));
    }

    #[tokio::test]
    async fn test_one_write_per_exchanged_code() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/token")
            .with_body(r#"{"access_token":"tok_1"}"#)
            .expect(1)
            .create_async()
            .await;

        let store = Arc::new(CountingStore::default());
        let interceptor = armed(client_for(&server), store.clone());

        assert_eq!(
            interceptor
                .handle("http://localhost/callback?app=github&code=XYZ")
                .await,
            NavigationOutcome::Authenticated
        );
        assert_eq!(
            interceptor.handle("https://github.com/login").await,
            NavigationOutcome::PassThrough
        );
        assert_eq!(
            interceptor
                .handle("http://localhost/callback?app=github")
                .await,
            NavigationOutcome::MissingCode
        );

        mock.assert_async().await;
        assert_eq!(
            store.sets.lock().clone(),
            vec![(
                "github".to_string(),
                ACCESS_TOKEN_KEY.to_string(),
                json!({"access_token": "tok_1", "login": true}),
            )]
        );
    }
}
