//! Port abstraction for rental unit persistence adapters.

use async_trait::async_trait;

use crate::domain::{RentalUnit, UnitId};

/// Persistence errors raised by unit repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnitPersistenceError {
    /// Repository connection could not be established.
    #[error("unit repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("unit repository query failed: {message}")]
    Query { message: String },
    /// A unit with this id is already listed.
    #[error("unit {id} is already listed")]
    DuplicateId { id: String },
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UnitRepository: Send + Sync {
    /// List a new unit. Fails with [`UnitPersistenceError::DuplicateId`] when
    /// the id is taken.
    async fn insert(&self, unit: &RentalUnit) -> Result<(), UnitPersistenceError>;

    /// Fetch a unit by id.
    async fn find_by_id(&self, id: &UnitId) -> Result<Option<RentalUnit>, UnitPersistenceError>;

    /// All listed units, unordered.
    async fn list(&self) -> Result<Vec<RentalUnit>, UnitPersistenceError>;

    /// Number of listed units.
    async fn count(&self) -> Result<u64, UnitPersistenceError>;
}
