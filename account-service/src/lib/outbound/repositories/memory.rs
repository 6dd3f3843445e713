use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::user::models::User;
use crate::user::errors::AuthError;
use crate::user::ports::UserRepository;

/// In-memory user store keyed by email.
///
/// Backs the integration test harness and local experiments. Insertion under
/// the write lock gives the same uniqueness guarantee as the database index.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let users = self
            .users
            .read()
            .map_err(|e| AuthError::Repository(e.to_string()))?;

        Ok(users.get(email).cloned())
    }

    async fn save(&self, user: User) -> Result<User, AuthError> {
        let mut users = self
            .users
            .write()
            .map_err(|e| AuthError::Repository(e.to_string()))?;

        if users.contains_key(user.email.as_str()) {
            return Err(AuthError::EmailAlreadyRegistered);
        }

        users.insert(user.email.as_str().to_string(), user.clone());
        Ok(user)
    }
}
