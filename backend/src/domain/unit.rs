//! Rental unit inventory entity.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Validation errors for unit construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnitValidationError {
    #[error("unit id must not be empty")]
    EmptyId,
    #[error("rent must be a positive amount")]
    NonPositiveRent,
}

/// Stable identifier of a rental unit (e.g. `B2-1204`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UnitId(String);

impl UnitId {
    /// Validate and construct a [`UnitId`].
    pub fn new(id: impl AsRef<str>) -> Result<Self, UnitValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    fn from_owned(id: String) -> Result<Self, UnitValidationError> {
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(UnitValidationError::EmptyId);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for UnitId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UnitId> for String {
    fn from(value: UnitId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UnitId {
    type Error = UnitValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// A listed rental unit.
///
/// Immutable once listed; agreements snapshot the rent at submission time, so
/// the listing itself is never re-read for in-flight applications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RentalUnit {
    #[schema(value_type = String, example = "B2-1204")]
    id: UnitId,
    #[schema(example = "B2")]
    block: String,
    #[schema(example = 12)]
    floor: i32,
    /// Monthly rent in whole currency units.
    #[schema(example = 1000)]
    rent: i64,
}

impl RentalUnit {
    /// Build a validated rental unit.
    pub fn new(
        id: UnitId,
        block: impl Into<String>,
        floor: i32,
        rent: i64,
    ) -> Result<Self, UnitValidationError> {
        if rent <= 0 {
            return Err(UnitValidationError::NonPositiveRent);
        }
        Ok(Self {
            id,
            block: block.into(),
            floor,
            rent,
        })
    }

    /// Unit identifier.
    pub fn id(&self) -> &UnitId {
        &self.id
    }

    /// Building block label.
    pub fn block(&self) -> &str {
        self.block.as_str()
    }

    /// Floor number.
    pub fn floor(&self) -> i32 {
        self.floor
    }

    /// Monthly rent in whole currency units.
    pub fn rent(&self) -> i64 {
        self.rent
    }
}
