//! Rental unit inventory handlers.
//!
//! ```text
//! GET /api/v1/units
//! GET /api/v1/units/{id}
//! POST /api/v1/units {"id":"B2-1204","block":"B2","floor":12,"rent":1000}
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{Error, RentalUnit, Role, UnitId, UnitValidationError};
use crate::inbound::http::auth::AuthContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Listing payload for a new unit.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListUnitRequest {
    pub id: String,
    pub block: String,
    pub floor: i32,
    pub rent: i64,
}

fn map_validation_error(err: &UnitValidationError) -> Error {
    let (field, code) = match err {
        UnitValidationError::EmptyId => ("id", "empty_id"),
        UnitValidationError::NonPositiveRent => ("rent", "non_positive_rent"),
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

/// Browse the full inventory. Public.
#[utoipa::path(
    get,
    path = "/api/v1/units",
    responses(
        (status = 200, description = "Listed units", body = [RentalUnit]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["units"],
    operation_id = "listUnits",
    security([])
)]
#[get("/units")]
pub async fn list_units(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<RentalUnit>>> {
    let units = state.inventory.list_units().await?;
    Ok(web::Json(units))
}

/// Fetch a single unit by id. Public.
#[utoipa::path(
    get,
    path = "/api/v1/units/{id}",
    params(("id" = String, Path, description = "Unit identifier")),
    responses(
        (status = 200, description = "Unit", body = RentalUnit),
        (status = 404, description = "Not listed", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["units"],
    operation_id = "getUnit",
    security([])
)]
#[get("/units/{id}")]
pub async fn get_unit(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<RentalUnit>> {
    let id = UnitId::new(path.into_inner()).map_err(|err| map_validation_error(&err))?;
    let unit = state.inventory.get_unit(&id).await?;
    Ok(web::Json(unit))
}

/// List a new unit. Admin only.
#[utoipa::path(
    post,
    path = "/api/v1/units",
    request_body = ListUnitRequest,
    responses(
        (status = 200, description = "Unit listed", body = RentalUnit),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 409, description = "Duplicate unit id", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["units"],
    operation_id = "addUnit"
)]
#[post("/units")]
pub async fn add_unit(
    auth: AuthContext,
    state: web::Data<HttpState>,
    payload: web::Json<ListUnitRequest>,
) -> ApiResult<web::Json<RentalUnit>> {
    auth.require_role(state.directory.as_ref(), Role::Admin)
        .await?;
    let payload = payload.into_inner();
    let id = UnitId::new(&payload.id).map_err(|err| map_validation_error(&err))?;
    let unit = RentalUnit::new(id, payload.block, payload.floor, payload.rent)
        .map_err(|err| map_validation_error(&err))?;
    let unit = state.inventory.add_unit(unit).await?;
    Ok(web::Json(unit))
}
