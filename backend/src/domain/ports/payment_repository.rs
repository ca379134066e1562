//! Port abstraction for the append-only payment ledger.

use async_trait::async_trait;

use crate::domain::{EmailAddress, PaymentRecord};

/// Persistence errors raised by payment repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaymentPersistenceError {
    /// Repository connection could not be established.
    #[error("payment repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("payment repository query failed: {message}")]
    Query { message: String },
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Append a settled charge. Records are never mutated or deleted.
    async fn append(&self, record: &PaymentRecord) -> Result<(), PaymentPersistenceError>;

    /// All records for a payer, oldest first.
    async fn list_by_payer(
        &self,
        payer: &EmailAddress,
    ) -> Result<Vec<PaymentRecord>, PaymentPersistenceError>;
}
