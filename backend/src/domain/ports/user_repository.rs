//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{EmailAddress, Role, User};

/// Persistence errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserPersistenceError {
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query { message: String },
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert or replace a user record keyed by email.
    async fn save(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Fetch a user by email.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Replace a user's role. Returns the updated record, or `None` when no
    /// record exists for the email.
    async fn update_role(
        &self,
        email: &EmailAddress,
        role: Role,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// All users currently holding `role`.
    async fn list_by_role(&self, role: Role) -> Result<Vec<User>, UserPersistenceError>;

    /// Total number of registered users.
    async fn count(&self) -> Result<u64, UserPersistenceError>;
}
