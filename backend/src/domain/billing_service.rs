//! Rent settlement domain service.
//!
//! Implements the [`Billing`] driving port: verifies the accepted-agreement
//! precondition before any external call, resolves an optional coupon into a
//! discount, raises the charge at the payment gateway, and appends the
//! settled record to the ledger.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::ports::{
    AgreementPersistenceError, AgreementRepository, Billing, ChargeReceipt,
    CouponPersistenceError, CouponRepository, PaymentGateway, PaymentGatewayError,
    PaymentPersistenceError, PaymentRepository,
};
use crate::domain::{resolve_discount, CouponCode, EmailAddress, Error, PaymentRecord};

/// Conversion factor from whole currency units to minor units.
const MINOR_UNITS: i64 = 100;

/// Billing service settling rent charges against accepted agreements.
#[derive(Clone)]
pub struct BillingService<A, C, P, G> {
    agreements: Arc<A>,
    coupons: Arc<C>,
    payments: Arc<P>,
    gateway: Arc<G>,
    currency: String,
}

impl<A, C, P, G> BillingService<A, C, P, G> {
    /// Create a new service charging in the given ISO currency.
    pub fn new(
        agreements: Arc<A>,
        coupons: Arc<C>,
        payments: Arc<P>,
        gateway: Arc<G>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            agreements,
            coupons,
            payments,
            gateway,
            currency: currency.into(),
        }
    }
}

impl<A, C, P, G> BillingService<A, C, P, G>
where
    A: AgreementRepository,
    C: CouponRepository,
    P: PaymentRepository,
    G: PaymentGateway,
{
    fn map_agreement_error(error: AgreementPersistenceError) -> Error {
        match error {
            AgreementPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("agreement repository unavailable: {message}"))
            }
            AgreementPersistenceError::Query { message } => {
                Error::internal(format!("agreement repository error: {message}"))
            }
            AgreementPersistenceError::DuplicatePending { email } => Error::internal(format!(
                "unexpected pending-agreement conflict for {email}"
            )),
        }
    }

    fn map_coupon_error(error: CouponPersistenceError) -> Error {
        match error {
            CouponPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("coupon repository unavailable: {message}"))
            }
            CouponPersistenceError::Query { message } => {
                Error::internal(format!("coupon repository error: {message}"))
            }
            CouponPersistenceError::DuplicateCode { code } => {
                Error::internal(format!("unexpected coupon code conflict for {code}"))
            }
        }
    }

    fn map_payment_error(error: PaymentPersistenceError) -> Error {
        match error {
            PaymentPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("payment repository unavailable: {message}"))
            }
            PaymentPersistenceError::Query { message } => {
                Error::internal(format!("payment repository error: {message}"))
            }
        }
    }

    fn map_gateway_error(error: PaymentGatewayError) -> Error {
        match error {
            PaymentGatewayError::Unavailable { message } => {
                Error::upstream_unavailable(format!("payment gateway unavailable: {message}"))
            }
            PaymentGatewayError::Rejected { message } => {
                Error::upstream_unavailable(format!("payment gateway rejected the charge: {message}"))
            }
        }
    }
}

#[async_trait]
impl<A, C, P, G> Billing for BillingService<A, C, P, G>
where
    A: AgreementRepository,
    C: CouponRepository,
    P: PaymentRepository,
    G: PaymentGateway,
{
    async fn create_charge(
        &self,
        payer: &EmailAddress,
        coupon: Option<CouponCode>,
    ) -> Result<ChargeReceipt, Error> {
        // The precondition is checked before any outbound call; a payer
        // without an accepted agreement never reaches the gateway.
        let agreement = self
            .agreements
            .find_accepted_by_email(payer)
            .await
            .map_err(Self::map_agreement_error)?
            .ok_or_else(|| {
                Error::precondition_failed(format!("no accepted agreement on file for {payer}"))
            })?;
        let coupon = match coupon {
            Some(code) => self
                .coupons
                .find_by_code(&code)
                .await
                .map_err(Self::map_coupon_error)?,
            None => None,
        };
        let quote = resolve_discount(coupon.as_ref(), agreement.rent());
        let amount_minor = agreement
            .rent()
            .saturating_sub(quote.saved)
            .saturating_mul(MINOR_UNITS);
        let intent = self
            .gateway
            .create_intent(amount_minor, &self.currency)
            .await
            .map_err(Self::map_gateway_error)?;
        let record = PaymentRecord::new(payer.clone(), amount_minor, intent.handle, Utc::now());
        self.payments
            .append(&record)
            .await
            .map_err(Self::map_payment_error)?;
        tracing::info!(
            payer = %payer,
            agreement = %agreement.id(),
            amount_minor,
            discount = quote.discount,
            "charge settled"
        );
        Ok(ChargeReceipt {
            agreement: agreement.id(),
            discount: quote.discount,
            saved: quote.saved,
            amount_minor,
            currency: self.currency.clone(),
            payment_handle: record.handle().to_owned(),
        })
    }

    async fn history(&self, payer: &EmailAddress) -> Result<Vec<PaymentRecord>, Error> {
        self.payments
            .list_by_payer(payer)
            .await
            .map_err(Self::map_payment_error)
    }
}
