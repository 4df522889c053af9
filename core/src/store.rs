//! Object-store seam: one trait, the S3-backed implementation used in
//! production, and an in-memory store for tests and stub mode.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use lectern_storage::{S3Client, S3Config, S3Error};

use crate::config::Config;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Auth(String),

    #[error("{0}")]
    Transfer(String),
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload under `key`, overwriting any existing object.
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), StoreError>;

    /// Time-limited retrieval link for `key`.
    async fn presign_get(&self, key: &str, ttl: Duration) -> Result<String, StoreError>;
}

pub struct S3Store {
    client: S3Client,
}

impl S3Store {
    pub fn new(client: S3Client) -> Self {
        Self { client }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(S3Client::new(S3Config {
            bucket: config.bucket.clone(),
            region: config.region.clone(),
            access_key_id: config.access_key_id.clone(),
            secret_access_key: config.secret_access_key.clone(),
            endpoint: config.endpoint.clone(),
        }))
    }
}

impl From<S3Error> for StoreError {
    fn from(err: S3Error) -> Self {
        match err {
            S3Error::Auth { .. } => StoreError::Auth(err.to_string()),
            S3Error::Transfer(_) => StoreError::Transfer(err.to_string()),
        }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), StoreError> {
        self.client.put_object(key, bytes).await.map_err(StoreError::from)
    }

    async fn presign_get(&self, key: &str, ttl: Duration) -> Result<String, StoreError> {
        Ok(self.client.presigned_get_url(key, ttl))
    }
}

/// Keeps uploads in a map and hands out fake links. Used by tests and by
/// stub mode so the surface can run without credentials.
#[derive(Default)]
pub struct MemoryStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        match self.objects.lock() {
            Ok(objects) => objects.get(key).cloned(),
            Err(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        self.objects.lock().map(|o| o.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), StoreError> {
        let mut objects = self
            .objects
            .lock()
            .map_err(|_| StoreError::Transfer("memory store poisoned".to_string()))?;
        objects.insert(key.to_string(), bytes);
        Ok(())
    }

    async fn presign_get(&self, key: &str, ttl: Duration) -> Result<String, StoreError> {
        Ok(format!(
            "memory://decks/{key}?expires_in={}",
            ttl.as_secs()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_overwrites_on_key_collision() {
        let store = MemoryStore::new();
        store.put("deck.pptx", vec![1]).await.unwrap_or_else(|e| panic!("{e}"));
        store.put("deck.pptx", vec![2, 3]).await.unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("deck.pptx"), Some(vec![2, 3]));

        let url = store
            .presign_get("deck.pptx", Duration::from_secs(60))
            .await
            .unwrap_or_else(|e| panic!("{e}"));
        assert!(url.contains("expires_in=60"));
    }
}
