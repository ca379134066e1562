//! Port abstraction for coupon persistence adapters.

use async_trait::async_trait;

use crate::domain::{Coupon, CouponCode};

/// Persistence errors raised by coupon repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CouponPersistenceError {
    /// Repository connection could not be established.
    #[error("coupon repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("coupon repository query failed: {message}")]
    Query { message: String },
    /// A coupon with this code already exists.
    #[error("coupon {code} already exists")]
    DuplicateCode { code: String },
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CouponRepository: Send + Sync {
    /// Store a new coupon. Fails with
    /// [`CouponPersistenceError::DuplicateCode`] when the code is taken.
    async fn insert(&self, coupon: &Coupon) -> Result<(), CouponPersistenceError>;

    /// Fetch a coupon by code.
    async fn find_by_code(
        &self,
        code: &CouponCode,
    ) -> Result<Option<Coupon>, CouponPersistenceError>;

    /// Flip the coupon's expired flag to true. Returns the updated coupon, or
    /// `None` when the code is unknown. Expiry is monotonic.
    async fn mark_expired(
        &self,
        code: &CouponCode,
    ) -> Result<Option<Coupon>, CouponPersistenceError>;

    /// All coupons, unordered.
    async fn list(&self) -> Result<Vec<Coupon>, CouponPersistenceError>;
}
