//! Promotional discount coupon.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Validation errors for coupon construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CouponValidationError {
    #[error("coupon code must not be empty")]
    EmptyCode,
    #[error("percentage must be between 0 and {max}")]
    PercentageOutOfRange { max: u8 },
}

/// Maximum discount percentage.
pub const PERCENTAGE_MAX: u8 = 100;

/// Unique coupon code (e.g. `SAVE10`). Stored uppercased so redemption is
/// case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CouponCode(String);

impl CouponCode {
    /// Validate and construct a [`CouponCode`].
    pub fn new(code: impl AsRef<str>) -> Result<Self, CouponValidationError> {
        Self::from_owned(code.as_ref().to_owned())
    }

    fn from_owned(code: String) -> Result<Self, CouponValidationError> {
        let trimmed = code.trim();
        if trimmed.is_empty() {
            return Err(CouponValidationError::EmptyCode);
        }
        Ok(Self(trimmed.to_uppercase()))
    }
}

impl AsRef<str> for CouponCode {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CouponCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<CouponCode> for String {
    fn from(value: CouponCode) -> Self {
        value.0
    }
}

impl TryFrom<String> for CouponCode {
    type Error = CouponValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// A discount code with a percentage and a monotonic expiry flag.
///
/// ## Invariants
/// - `percentage` is within `0..=100`.
/// - `expired` only ever flips false → true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    #[schema(value_type = String, example = "SAVE10")]
    code: CouponCode,
    #[schema(example = 10)]
    percentage: u8,
    expired: bool,
}

impl Coupon {
    /// Build a live (unexpired) coupon.
    pub fn new(code: CouponCode, percentage: u8) -> Result<Self, CouponValidationError> {
        if percentage > PERCENTAGE_MAX {
            return Err(CouponValidationError::PercentageOutOfRange {
                max: PERCENTAGE_MAX,
            });
        }
        Ok(Self {
            code,
            percentage,
            expired: false,
        })
    }

    /// Coupon code.
    pub fn code(&self) -> &CouponCode {
        &self.code
    }

    /// Discount percentage.
    pub fn percentage(&self) -> u8 {
        self.percentage
    }

    /// Whether the coupon has been retired.
    pub fn is_expired(&self) -> bool {
        self.expired
    }

    /// True when redeeming this coupon yields a non-zero discount.
    pub fn is_usable(&self) -> bool {
        !self.expired && self.percentage > 0
    }

    /// Retire the coupon. Monotonic: an expired coupon stays expired.
    pub fn expire(mut self) -> Self {
        self.expired = true;
        self
    }
}
