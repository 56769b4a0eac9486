//! Data store seam: a path-addressed delete on the user's database.

pub mod rest;

use crate::identity::Principal;
use async_trait::async_trait;
use thiserror::Error;

pub use self::rest::RestDataStore;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct DataStoreError(pub String);

#[async_trait]
pub trait DataStore: Send + Sync {
    /// Remove everything stored at `path`, acting on behalf of `principal`.
    async fn delete_at_path(&self, principal: &Principal, path: &str)
        -> Result<(), DataStoreError>;
}
