use async_trait::async_trait;

use crate::domain::user::models::User;
use crate::user::errors::AuthError;

/// Persistence port for the user store.
///
/// Email uniqueness is enforced by the store itself: `save` fails with
/// `EmailAlreadyRegistered` even when a concurrent registration won the race
/// after the caller's lookup. Callers must not rely on lookup-then-save.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Retrieve a user by email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `Repository` - store operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;

    /// Persist a new user.
    ///
    /// # Returns
    /// The persisted user entity
    ///
    /// # Errors
    /// * `EmailAlreadyRegistered` - the email is already taken
    /// * `Repository` - store operation failed
    async fn save(&self, user: User) -> Result<User, AuthError>;
}
