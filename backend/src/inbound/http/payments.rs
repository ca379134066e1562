//! Rent settlement handlers.
//!
//! ```text
//! POST /api/v1/payments {"couponCode":"SAVE10"}
//! GET /api/v1/payments
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::ports::ChargeReceipt;
use crate::domain::{CouponCode, Error, PaymentRecord};
use crate::inbound::http::auth::AuthContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Charge payload; the payer is always the authenticated identity.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChargeRequest {
    /// Optional discount code. Unknown or expired codes degrade to a full
    /// charge rather than failing.
    pub coupon_code: Option<String>,
}

/// Charge the caller's rent for their accepted agreement.
#[utoipa::path(
    post,
    path = "/api/v1/payments",
    request_body = ChargeRequest,
    responses(
        (status = 200, description = "Charge settled", body = ChargeReceipt),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 412, description = "No accepted agreement", body = Error),
        (status = 502, description = "Payment gateway unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["payments"],
    operation_id = "createCharge"
)]
#[post("/payments")]
pub async fn create_charge(
    auth: AuthContext,
    state: web::Data<HttpState>,
    payload: web::Json<ChargeRequest>,
) -> ApiResult<web::Json<ChargeReceipt>> {
    let coupon = payload
        .into_inner()
        .coupon_code
        .map(|raw| {
            CouponCode::new(raw).map_err(|err| {
                Error::invalid_request(err.to_string())
                    .with_details(json!({ "field": "couponCode", "code": "empty_code" }))
            })
        })
        .transpose()?;
    let receipt = state.billing.create_charge(auth.email(), coupon).await?;
    Ok(web::Json(receipt))
}

/// List the caller's settled charges, oldest first.
#[utoipa::path(
    get,
    path = "/api/v1/payments",
    responses(
        (status = 200, description = "Payment history", body = [PaymentRecord]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["payments"],
    operation_id = "paymentHistory"
)]
#[get("/payments")]
pub async fn history(
    auth: AuthContext,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<PaymentRecord>>> {
    let records = state.billing.history(auth.email()).await?;
    Ok(web::Json(records))
}
