//! Driving port for coupon administration and quoting.

use async_trait::async_trait;

use crate::domain::{Coupon, CouponCode, DiscountQuote, Error};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Coupons: Send + Sync {
    /// Create a live coupon; `Conflict` when the code already exists.
    async fn create(&self, coupon: Coupon) -> Result<Coupon, Error>;

    /// Retire a coupon; idempotent once expired, `NotFound` when unknown.
    async fn expire(&self, code: &CouponCode) -> Result<Coupon, Error>;

    /// All coupons, live and expired.
    async fn list(&self) -> Result<Vec<Coupon>, Error>;

    /// Preview the discount a code would yield against a rent figure.
    ///
    /// Unknown and expired codes quote a zero discount rather than failing;
    /// a non-positive rent is `InvalidRequest`.
    async fn quote(&self, code: &CouponCode, rent: i64) -> Result<DiscountQuote, Error>;
}
