//! Port abstraction for the external payment-intent collaborator.

use async_trait::async_trait;
use uuid::Uuid;

/// Opaque client handle returned by the payment collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntent {
    /// Handle the client uses to complete the payment.
    pub handle: String,
}

/// Failures at the payment collaborator boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaymentGatewayError {
    /// The collaborator did not respond within the configured timeout or the
    /// transport failed.
    #[error("payment gateway unavailable: {message}")]
    Unavailable { message: String },
    /// The collaborator responded but refused the charge.
    #[error("payment gateway rejected the charge: {message}")]
    Rejected { message: String },
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Convert an amount in minor currency units into a client-usable
    /// payment handle. Awaited with an explicit timeout by adapters; a
    /// non-responding collaborator surfaces as
    /// [`PaymentGatewayError::Unavailable`], never a hang.
    async fn create_intent(
        &self,
        amount_minor: i64,
        currency: &str,
    ) -> Result<PaymentIntent, PaymentGatewayError>;
}

/// Deterministic in-process gateway for tests and gateway-less deployments.
pub struct FixturePaymentGateway;

#[async_trait]
impl PaymentGateway for FixturePaymentGateway {
    async fn create_intent(
        &self,
        _amount_minor: i64,
        _currency: &str,
    ) -> Result<PaymentIntent, PaymentGatewayError> {
        Ok(PaymentIntent {
            handle: format!("pi_{}", Uuid::new_v4().simple()),
        })
    }
}
