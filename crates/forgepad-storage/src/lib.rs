//! Forgepad Storage Layer
//!
//! SQLite-backed key/value persistence partitioned by scope.
//! One scope per identity provider; keys never collide across scopes.

mod credential;
mod database;
mod error;
mod migrations;
mod store;

pub use credential::{read_credential, write_credential, SessionCredential, ACCESS_TOKEN_KEY};
pub use database::Database;
pub use error::StorageError;
pub use store::{KeyValueStore, ScopedStore};

pub type Result<T> = std::result::Result<T, StorageError>;
