//! Coupon administration and quoting domain service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{CouponPersistenceError, CouponRepository, Coupons};
use crate::domain::{resolve_discount, Coupon, CouponCode, DiscountQuote, Error};

/// Coupon service implementing the [`Coupons`] driving port.
#[derive(Clone)]
pub struct CouponService<C> {
    coupons: Arc<C>,
}

impl<C> CouponService<C> {
    /// Create a new service with the given repository.
    pub fn new(coupons: Arc<C>) -> Self {
        Self { coupons }
    }
}

impl<C> CouponService<C>
where
    C: CouponRepository,
{
    fn map_coupon_error(error: CouponPersistenceError) -> Error {
        match error {
            CouponPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("coupon repository unavailable: {message}"))
            }
            CouponPersistenceError::Query { message } => {
                Error::internal(format!("coupon repository error: {message}"))
            }
            CouponPersistenceError::DuplicateCode { code } => {
                Error::conflict(format!("coupon {code} already exists"))
            }
        }
    }
}

#[async_trait]
impl<C> Coupons for CouponService<C>
where
    C: CouponRepository,
{
    async fn create(&self, coupon: Coupon) -> Result<Coupon, Error> {
        self.coupons
            .insert(&coupon)
            .await
            .map_err(Self::map_coupon_error)?;
        tracing::info!(code = %coupon.code(), percentage = coupon.percentage(), "coupon created");
        Ok(coupon)
    }

    async fn expire(&self, code: &CouponCode) -> Result<Coupon, Error> {
        self.coupons
            .mark_expired(code)
            .await
            .map_err(Self::map_coupon_error)?
            .ok_or_else(|| Error::not_found(format!("no coupon with code {code}")))
    }

    async fn list(&self) -> Result<Vec<Coupon>, Error> {
        self.coupons.list().await.map_err(Self::map_coupon_error)
    }

    async fn quote(&self, code: &CouponCode, rent: i64) -> Result<DiscountQuote, Error> {
        if rent <= 0 {
            return Err(Error::invalid_request("rent must be a positive amount"));
        }
        let coupon = self
            .coupons
            .find_by_code(code)
            .await
            .map_err(Self::map_coupon_error)?;
        Ok(resolve_discount(coupon.as_ref(), rent))
    }
}
