//! Driving port for the rental unit inventory.
//!
//! Listing is a simple unpaginated read; inventory is referenced by
//! agreements but otherwise outside the core workflow.

use async_trait::async_trait;

use crate::domain::{Error, RentalUnit, UnitId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Inventory: Send + Sync {
    /// List a new unit; `Conflict` when the id is already taken.
    async fn add_unit(&self, unit: RentalUnit) -> Result<RentalUnit, Error>;

    /// All listed units.
    async fn list_units(&self) -> Result<Vec<RentalUnit>, Error>;

    /// A single unit by id; `NotFound` when absent.
    async fn get_unit(&self, id: &UnitId) -> Result<RentalUnit, Error>;
}
