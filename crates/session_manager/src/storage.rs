//! Session storage trait and implementations

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{Result, SessionError};
use crate::structs::Session;

/// Where session blobs live between requests
#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Load a session, `SessionError::NotFound` if there is none
    async fn load_session(&self, session_id: &str) -> Result<Session>;

    /// Save a session
    async fn save_session(&self, session_id: &str, session: &Session) -> Result<()>;

    /// Check if a session exists
    async fn session_exists(&self, session_id: &str) -> bool;

    /// Delete a session
    async fn delete_session(&self, session_id: &str) -> Result<()>;

    /// Ids of every stored session
    async fn session_ids(&self) -> Vec<String>;
}

/// In-memory storage keeping each session as a serialized JSON blob
#[derive(Default)]
pub struct MemorySessionStorage {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStorage for MemorySessionStorage {
    async fn load_session(&self, session_id: &str) -> Result<Session> {
        let blobs = self.blobs.read().await;
        let blob = blobs.get(session_id).ok_or(SessionError::NotFound)?;
        Ok(serde_json::from_slice(blob)?)
    }

    async fn save_session(&self, session_id: &str, session: &Session) -> Result<()> {
        let blob = serde_json::to_vec(session)?;
        self.blobs.write().await.insert(session_id.to_string(), blob);
        Ok(())
    }

    async fn session_exists(&self, session_id: &str) -> bool {
        self.blobs.read().await.contains_key(session_id)
    }

    async fn delete_session(&self, session_id: &str) -> Result<()> {
        self.blobs.write().await.remove(session_id);
        Ok(())
    }

    async fn session_ids(&self) -> Vec<String> {
        self.blobs.read().await.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_storage_save_and_load() {
        let storage = MemorySessionStorage::new();

        let mut session = Session::default();
        session.store.create_list("Work").unwrap();
        session.set_success("saved");
        storage.save_session("test", &session).await.unwrap();

        let loaded = storage.load_session("test").await.unwrap();
        assert_eq!(loaded, session);
    }

    #[tokio::test]
    async fn test_memory_storage_not_found() {
        let storage = MemorySessionStorage::new();

        let result = storage.load_session("nonexistent").await;
        assert!(matches!(result, Err(SessionError::NotFound)));
    }

    #[tokio::test]
    async fn test_memory_storage_delete() {
        let storage = MemorySessionStorage::new();

        storage.save_session("test", &Session::default()).await.unwrap();
        assert!(storage.session_exists("test").await);
        assert_eq!(storage.session_ids().await, vec!["test".to_string()]);

        storage.delete_session("test").await.unwrap();

        assert!(!storage.session_exists("test").await);
        assert!(storage.session_ids().await.is_empty());
    }
}
