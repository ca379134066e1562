//! Registration, credential, and directory-administration handlers.
//!
//! ```text
//! PUT /api/v1/users {"name":"Ada Lovelace","email":"ada@example.com"}
//! POST /api/v1/auth/token {"name":"Ada Lovelace","email":"ada@example.com"}
//! GET /api/v1/users?role=member
//! DELETE /api/v1/members/{email}
//! GET /api/v1/stats
//! ```

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::auth::CredentialIssuer;
use crate::domain::ports::OccupancyStats;
use crate::domain::{DisplayName, EmailAddress, Error, Role, User, UserValidationError};
use crate::inbound::http::auth::AuthContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Identity payload shared by registration and token issuance.
///
/// Example JSON:
/// `{"name":"Ada Lovelace","email":"ada@example.com"}`
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IdentityRequest {
    pub name: String,
    pub email: String,
}

impl IdentityRequest {
    fn into_parts(self) -> Result<(DisplayName, EmailAddress), Error> {
        let name = DisplayName::new(self.name).map_err(|err| map_validation_error(&err))?;
        let email = EmailAddress::new(self.email).map_err(|err| map_validation_error(&err))?;
        Ok((name, email))
    }
}

fn map_validation_error(err: &UserValidationError) -> Error {
    let (field, code) = match err {
        UserValidationError::EmptyEmail => ("email", "empty_email"),
        UserValidationError::InvalidEmail => ("email", "invalid_email"),
        UserValidationError::EmptyDisplayName => ("name", "empty_name"),
        UserValidationError::DisplayNameTooLong { .. } => ("name", "name_too_long"),
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

/// Registration outcome with a fresh credential.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CredentialResponse {
    pub user: User,
    /// Compact JWT proving the registered identity.
    pub token: String,
    pub expires_in_secs: i64,
}

/// Register an identity (idempotently) and issue a credential.
#[utoipa::path(
    put,
    path = "/api/v1/users",
    request_body = IdentityRequest,
    responses(
        (status = 200, description = "Registered", body = CredentialResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 503, description = "Service unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "registerUser",
    security([])
)]
#[put("/users")]
pub async fn register(
    state: web::Data<HttpState>,
    issuer: web::Data<CredentialIssuer>,
    payload: web::Json<IdentityRequest>,
) -> ApiResult<web::Json<CredentialResponse>> {
    let (name, email) = payload.into_inner().into_parts()?;
    let user = state.directory.register(name, email).await?;
    let issued = issuer.issue(user.email(), user.display_name())?;
    Ok(web::Json(CredentialResponse {
        user,
        token: issued.token,
        expires_in_secs: issued.expires_in_secs,
    }))
}

/// Issue a fresh credential for an already registered identity.
#[utoipa::path(
    post,
    path = "/api/v1/auth/token",
    request_body = IdentityRequest,
    responses(
        (status = 200, description = "Credential issued", body = CredentialResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Not registered", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "issueToken",
    security([])
)]
#[post("/auth/token")]
pub async fn issue_token(
    state: web::Data<HttpState>,
    issuer: web::Data<CredentialIssuer>,
    payload: web::Json<IdentityRequest>,
) -> ApiResult<web::Json<CredentialResponse>> {
    let (name, email) = payload.into_inner().into_parts()?;
    let role = state
        .directory
        .role_of(&email)
        .await?
        .ok_or_else(|| Error::not_found(format!("no user registered as {email}")))?;
    let issued = issuer.issue(&email, &name)?;
    Ok(web::Json(CredentialResponse {
        user: User::new(email, name).with_role(role),
        token: issued.token,
        expires_in_secs: issued.expires_in_secs,
    }))
}

/// Role filter for the user listing. Defaults to members.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct RoleFilter {
    pub role: Option<Role>,
}

/// List users holding a role. Admin only.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    params(RoleFilter),
    responses(
        (status = 200, description = "Users", body = [User]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    auth: AuthContext,
    state: web::Data<HttpState>,
    filter: web::Query<RoleFilter>,
) -> ApiResult<web::Json<Vec<User>>> {
    auth.require_role(state.directory.as_ref(), Role::Admin)
        .await?;
    let role = filter.into_inner().role.unwrap_or(Role::Member);
    let users = state.directory.list_by_role(role).await?;
    Ok(web::Json(users))
}

/// Demote a member back to a plain user. Admin only.
#[utoipa::path(
    delete,
    path = "/api/v1/members/{email}",
    params(("email" = String, Path, description = "Member email address")),
    responses(
        (status = 200, description = "Demoted", body = User),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 409, description = "Not a member", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "demoteMember"
)]
#[delete("/members/{email}")]
pub async fn demote_member(
    auth: AuthContext,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<User>> {
    auth.require_role(state.directory.as_ref(), Role::Admin)
        .await?;
    let email = EmailAddress::new(path.into_inner()).map_err(|err| map_validation_error(&err))?;
    let user = state.directory.demote(&email).await?;
    Ok(web::Json(user))
}

/// Occupancy statistics. Admin only.
#[utoipa::path(
    get,
    path = "/api/v1/stats",
    responses(
        (status = 200, description = "Stats", body = OccupancyStats),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "occupancyStats"
)]
#[get("/stats")]
pub async fn stats(
    auth: AuthContext,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<OccupancyStats>> {
    auth.require_role(state.directory.as_ref(), Role::Admin)
        .await?;
    let stats = state.directory.stats().await?;
    Ok(web::Json(stats))
}
