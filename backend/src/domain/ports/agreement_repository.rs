//! Port abstraction for agreement persistence adapters.
//!
//! The repository, not its callers, enforces the one-pending-agreement-per-
//! email uniqueness constraint so the invariant holds even under concurrent
//! submissions.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Agreement, AgreementStatus, EmailAddress};

/// Persistence errors raised by agreement repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AgreementPersistenceError {
    /// Repository connection could not be established.
    #[error("agreement repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("agreement repository query failed: {message}")]
    Query { message: String },
    /// A pending agreement already exists for this email.
    #[error("a pending agreement already exists for {email}")]
    DuplicatePending { email: String },
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AgreementRepository: Send + Sync {
    /// Insert a new agreement, enforcing the pending-uniqueness constraint.
    async fn insert(&self, agreement: &Agreement) -> Result<(), AgreementPersistenceError>;

    /// Fetch an agreement by id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Agreement>, AgreementPersistenceError>;

    /// The email's pending agreement, if one exists.
    async fn find_pending_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Agreement>, AgreementPersistenceError>;

    /// The email's accepted agreement, if one exists.
    async fn find_accepted_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Agreement>, AgreementPersistenceError>;

    /// The email's most recently submitted agreement, regardless of status.
    async fn find_latest_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Agreement>, AgreementPersistenceError>;

    /// All pending agreements, unordered.
    async fn list_pending(&self) -> Result<Vec<Agreement>, AgreementPersistenceError>;

    /// All accepted agreements, unordered. Used for occupancy stats.
    async fn list_accepted(&self) -> Result<Vec<Agreement>, AgreementPersistenceError>;

    /// Replace an agreement's status. Returns the updated record, or `None`
    /// when the id is unknown.
    async fn update_status(
        &self,
        id: Uuid,
        status: AgreementStatus,
    ) -> Result<Option<Agreement>, AgreementPersistenceError>;

    /// Delete the email's terminal (accepted or rejected) agreements,
    /// returning how many were removed. Pending agreements are untouched.
    async fn delete_terminal_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<u64, AgreementPersistenceError>;
}
