//! Reqwest-backed payment gateway adapter.
//!
//! This adapter owns transport details only: request serialisation, timeout
//! and HTTP error mapping, and JSON decoding of the returned intent. A
//! non-responding collaborator surfaces as
//! [`PaymentGatewayError::Unavailable`] after the configured timeout, never a
//! hang.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{PaymentGateway, PaymentGatewayError, PaymentIntent};

/// Default wall-clock budget for one gateway call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Serialize)]
struct IntentRequestDto<'a> {
    amount: i64,
    currency: &'a str,
}

#[derive(Deserialize)]
struct IntentResponseDto {
    handle: String,
}

/// Payment gateway adapter performing HTTP POST requests against one
/// endpoint.
pub struct HttpPaymentGateway {
    client: Client,
    endpoint: Url,
}

impl HttpPaymentGateway {
    /// Build an adapter using a reqwest client with an explicit request
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }
}

fn map_transport_error(error: reqwest::Error) -> PaymentGatewayError {
    let kind = if error.is_timeout() {
        "timed out"
    } else if error.is_connect() {
        "connection failed"
    } else {
        "transport error"
    };
    PaymentGatewayError::Unavailable {
        message: format!("{kind}: {error}"),
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> PaymentGatewayError {
    let detail = String::from_utf8_lossy(body);
    let detail = detail.trim();
    let message = if detail.is_empty() {
        format!("status {status}")
    } else {
        format!("status {status}: {detail}")
    };
    if status.is_client_error() {
        PaymentGatewayError::Rejected { message }
    } else {
        PaymentGatewayError::Unavailable { message }
    }
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    async fn create_intent(
        &self,
        amount_minor: i64,
        currency: &str,
    ) -> Result<PaymentIntent, PaymentGatewayError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&IntentRequestDto {
                amount: amount_minor,
                currency,
            })
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        let decoded: IntentResponseDto =
            serde_json::from_slice(body.as_ref()).map_err(|error| {
                PaymentGatewayError::Unavailable {
                    message: format!("invalid intent payload: {error}"),
                }
            })?;
        Ok(PaymentIntent {
            handle: decoded.handle,
        })
    }
}
