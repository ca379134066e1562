//! Driving port for rent settlement.

use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{CouponCode, EmailAddress, Error, PaymentRecord};

/// Outcome of a settled charge, returned to the paying member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChargeReceipt {
    /// Accepted agreement the charge settles.
    pub agreement: Uuid,
    /// Percentage applied, zero when no usable coupon was supplied.
    pub discount: u8,
    /// Amount saved in major units, rounded half-up.
    pub saved: i64,
    /// Charged amount in minor currency units.
    pub amount_minor: i64,
    /// ISO currency code the charge was raised in.
    pub currency: String,
    /// Client handle for completing the payment.
    pub payment_handle: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Billing: Send + Sync {
    /// Raise a charge for the payer's accepted agreement.
    ///
    /// `PreconditionFailed` when no accepted agreement exists; in that case
    /// the payment collaborator is never contacted. An unusable coupon code
    /// degrades to a zero discount instead of failing the charge.
    async fn create_charge(
        &self,
        payer: &EmailAddress,
        coupon: Option<CouponCode>,
    ) -> Result<ChargeReceipt, Error>;

    /// The payer's settled charges, oldest first.
    async fn history(&self, payer: &EmailAddress) -> Result<Vec<PaymentRecord>, Error>;
}
