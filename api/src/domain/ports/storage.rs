//! Object storage port
//!
//! Holds the shared site-content JSON document that mirrors the navbar. The
//! rebuild cycle is download-modify-upload; last writer wins.

use async_trait::async_trait;

use crate::error::StorageError;

#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Fetch an object's body; Ok(None) when the key does not exist
    async fn download(&self, key: &str) -> Result<Option<String>, StorageError>;

    async fn upload(&self, key: &str, body: String) -> Result<(), StorageError>;
}
