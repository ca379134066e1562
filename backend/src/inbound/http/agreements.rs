//! Agreement workflow handlers.
//!
//! ```text
//! POST /api/v1/agreements {"email":"ada@example.com","unitId":"B2-1204"}
//! GET /api/v1/agreements/pending
//! GET /api/v1/agreements/{email}
//! POST /api/v1/agreements/{id}/adjudicate {"decision":"accept"}
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::domain::{Agreement, Decision, EmailAddress, Error, Role, UnitId};
use crate::inbound::http::auth::AuthContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Application payload. The email must match the presented credential so an
/// application cannot be lodged on someone else's behalf.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    pub email: String,
    pub unit_id: String,
}

/// Submit a tenancy application.
#[utoipa::path(
    post,
    path = "/api/v1/agreements",
    request_body = SubmitRequest,
    responses(
        (status = 200, description = "Application recorded", body = Agreement),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Applicant or unit not found", body = Error),
        (status = 409, description = "Already a member or already pending", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["agreements"],
    operation_id = "submitAgreement"
)]
#[post("/agreements")]
pub async fn submit(
    auth: AuthContext,
    state: web::Data<HttpState>,
    payload: web::Json<SubmitRequest>,
) -> ApiResult<web::Json<Agreement>> {
    let payload = payload.into_inner();
    let email = EmailAddress::new(&payload.email).map_err(|err| {
        Error::invalid_request(err.to_string())
            .with_details(json!({ "field": "email", "code": "invalid_email" }))
    })?;
    auth.require_match(&email)?;
    let unit_id = UnitId::new(&payload.unit_id).map_err(|err| {
        Error::invalid_request(err.to_string())
            .with_details(json!({ "field": "unitId", "code": "invalid_unit_id" }))
    })?;
    let agreement = state.agreements.submit(email, unit_id).await?;
    Ok(web::Json(agreement))
}

/// List agreements awaiting adjudication. Admin only.
#[utoipa::path(
    get,
    path = "/api/v1/agreements/pending",
    responses(
        (status = 200, description = "Pending agreements", body = [Agreement]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["agreements"],
    operation_id = "listPendingAgreements"
)]
#[get("/agreements/pending")]
pub async fn list_pending(
    auth: AuthContext,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<Agreement>>> {
    auth.require_role(state.directory.as_ref(), Role::Admin)
        .await?;
    let pending = state.agreements.list_pending().await?;
    Ok(web::Json(pending))
}

/// Fetch the caller's most recent agreement.
#[utoipa::path(
    get,
    path = "/api/v1/agreements/{email}",
    params(("email" = String, Path, description = "Applicant email address")),
    responses(
        (status = 200, description = "Latest agreement", body = Agreement),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "No agreement on file", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["agreements"],
    operation_id = "latestAgreement"
)]
#[get("/agreements/{email}")]
pub async fn latest_for_user(
    auth: AuthContext,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Agreement>> {
    let email = EmailAddress::new(path.into_inner()).map_err(|err| {
        Error::invalid_request(err.to_string())
            .with_details(json!({ "field": "email", "code": "invalid_email" }))
    })?;
    auth.require_match(&email)?;
    let agreement = state.agreements.for_user(&email).await?;
    Ok(web::Json(agreement))
}

/// Adjudication payload.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdjudicateRequest {
    pub decision: Decision,
}

/// Adjudicate a pending agreement. Admin only.
#[utoipa::path(
    post,
    path = "/api/v1/agreements/{id}/adjudicate",
    params(("id" = Uuid, Path, description = "Agreement identifier")),
    request_body = AdjudicateRequest,
    responses(
        (status = 200, description = "Adjudicated", body = Agreement),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Unknown agreement", body = Error),
        (status = 409, description = "Already adjudicated", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["agreements"],
    operation_id = "adjudicateAgreement"
)]
#[post("/agreements/{id}/adjudicate")]
pub async fn adjudicate(
    auth: AuthContext,
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
    payload: web::Json<AdjudicateRequest>,
) -> ApiResult<web::Json<Agreement>> {
    auth.require_role(state.directory.as_ref(), Role::Admin)
        .await?;
    let agreement = state
        .agreements
        .adjudicate(path.into_inner(), payload.decision)
        .await?;
    Ok(web::Json(agreement))
}
