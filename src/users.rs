//! User management module
//!
//! Handles user storage and retrieval. Authentication lives outside the
//! core; users here are the actors referenced by content and workflows.

use crate::error::{conflict_error, invalid_reference, EngineResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Platform role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Reader,
    Author,
    Editor,
    Moderator,
    Admin,
}

/// User model
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: impl Into<String>, name: impl Into<String>, role: Role) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            name: name.into(),
            role,
            avatar_url: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// In-memory user store
pub struct UserStore {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    email_index: Arc<RwLock<HashMap<String, Uuid>>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            email_index: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a new user
    pub async fn create(&self, user: User) -> EngineResult<User> {
        let mut users = self.users.write().await;
        let mut email_index = self.email_index.write().await;

        if email_index.contains_key(&user.email) {
            return Err(conflict_error("Email already registered"));
        }

        email_index.insert(user.email.clone(), user.id);
        users.insert(user.id, user.clone());
        Ok(user)
    }

    /// Get a user by ID
    pub async fn get(&self, id: Uuid) -> EngineResult<User> {
        let users = self.users.read().await;
        users
            .get(&id)
            .cloned()
            .ok_or_else(|| invalid_reference(format!("User {} not found", id)))
    }

    /// Check whether a user exists
    pub async fn exists(&self, id: Uuid) -> bool {
        let users = self.users.read().await;
        users.contains_key(&id)
    }

    /// Find a user by email
    pub async fn find_by_email(&self, email: &str) -> Option<User> {
        let email_index = self.email_index.read().await;
        let id = email_index.get(email)?;
        let users = self.users.read().await;
        users.get(id).cloned()
    }

    /// List all users
    pub async fn list(&self) -> Vec<User> {
        let users = self.users.read().await;
        users.values().cloned().collect()
    }

    /// Delete a user
    pub async fn delete(&self, id: Uuid) -> EngineResult<()> {
        let mut users = self.users.write().await;
        let user = users
            .remove(&id)
            .ok_or_else(|| invalid_reference(format!("User {} not found", id)))?;
        let mut email_index = self.email_index.write().await;
        email_index.remove(&user.email);
        Ok(())
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_lookup() {
        let store = UserStore::new();
        let user = store
            .create(User::new("ada@example.com", "Ada", Role::Author))
            .await
            .unwrap();

        assert!(store.exists(user.id).await);
        let found = store.find_by_email("ada@example.com").await.unwrap();
        assert_eq!(found.id, user.id);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = UserStore::new();
        store
            .create(User::new("ada@example.com", "Ada", Role::Author))
            .await
            .unwrap();
        let err = store
            .create(User::new("ada@example.com", "Imposter", Role::Reader))
            .await;
        assert!(err.is_err());
    }
}
