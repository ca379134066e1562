//! Coupon administration and quoting handlers.
//!
//! ```text
//! GET /api/v1/coupons/{code}/quote?rent=1000
//! POST /api/v1/coupons {"code":"SAVE10","percentage":10}
//! POST /api/v1/coupons/{code}/expire
//! GET /api/v1/coupons
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{
    Coupon, CouponCode, CouponValidationError, DiscountQuote, Error, Role,
};
use crate::inbound::http::auth::AuthContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Creation payload for a new coupon.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCouponRequest {
    pub code: String,
    pub percentage: u8,
}

fn map_validation_error(err: &CouponValidationError) -> Error {
    let (field, code) = match err {
        CouponValidationError::EmptyCode => ("code", "empty_code"),
        CouponValidationError::PercentageOutOfRange { .. } => ("percentage", "out_of_range"),
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

/// Rent figure to quote against.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct QuoteQuery {
    pub rent: i64,
}

/// Preview the discount a code yields against a rent figure. Public:
/// prospective tenants can check a code before applying.
#[utoipa::path(
    get,
    path = "/api/v1/coupons/{code}/quote",
    params(("code" = String, Path, description = "Coupon code"), QuoteQuery),
    responses(
        (status = 200, description = "Quote", body = DiscountQuote),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["coupons"],
    operation_id = "quoteCoupon",
    security([])
)]
#[get("/coupons/{code}/quote")]
pub async fn quote(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<QuoteQuery>,
) -> ApiResult<web::Json<DiscountQuote>> {
    let code = CouponCode::new(path.into_inner()).map_err(|err| map_validation_error(&err))?;
    let quote = state.coupons.quote(&code, query.rent).await?;
    Ok(web::Json(quote))
}

/// Create a coupon. Admin only.
#[utoipa::path(
    post,
    path = "/api/v1/coupons",
    request_body = CreateCouponRequest,
    responses(
        (status = 200, description = "Coupon created", body = Coupon),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 409, description = "Duplicate code", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["coupons"],
    operation_id = "createCoupon"
)]
#[post("/coupons")]
pub async fn create(
    auth: AuthContext,
    state: web::Data<HttpState>,
    payload: web::Json<CreateCouponRequest>,
) -> ApiResult<web::Json<Coupon>> {
    auth.require_role(state.directory.as_ref(), Role::Admin)
        .await?;
    let payload = payload.into_inner();
    let code = CouponCode::new(&payload.code).map_err(|err| map_validation_error(&err))?;
    let coupon =
        Coupon::new(code, payload.percentage).map_err(|err| map_validation_error(&err))?;
    let coupon = state.coupons.create(coupon).await?;
    Ok(web::Json(coupon))
}

/// Retire a coupon. Admin only; idempotent once expired.
#[utoipa::path(
    post,
    path = "/api/v1/coupons/{code}/expire",
    params(("code" = String, Path, description = "Coupon code")),
    responses(
        (status = 200, description = "Coupon retired", body = Coupon),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Unknown code", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["coupons"],
    operation_id = "expireCoupon"
)]
#[post("/coupons/{code}/expire")]
pub async fn expire(
    auth: AuthContext,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Coupon>> {
    auth.require_role(state.directory.as_ref(), Role::Admin)
        .await?;
    let code = CouponCode::new(path.into_inner()).map_err(|err| map_validation_error(&err))?;
    let coupon = state.coupons.expire(&code).await?;
    Ok(web::Json(coupon))
}

/// List every coupon, live and expired. Admin only.
#[utoipa::path(
    get,
    path = "/api/v1/coupons",
    responses(
        (status = 200, description = "Coupons", body = [Coupon]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["coupons"],
    operation_id = "listCoupons"
)]
#[get("/coupons")]
pub async fn list(
    auth: AuthContext,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<Coupon>>> {
    auth.require_role(state.directory.as_ref(), Role::Admin)
        .await?;
    let coupons = state.coupons.list().await?;
    Ok(web::Json(coupons))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{bearer, test_issuer, TestPorts};
    use actix_web::http::StatusCode;
    use actix_web::{test as actix_test, App};
    use mockall::predicate::eq;
    use serde_json::Value;

    fn code(value: &str) -> CouponCode {
        CouponCode::new(value).expect("code")
    }

    fn app(
        ports: TestPorts,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(test_issuer()))
            .app_data(web::Data::new(ports.into_state()))
            .service(
                web::scope("/api/v1")
                    .service(quote)
                    .service(create)
                    .service(expire)
                    .service(list),
            )
    }

    #[actix_web::test]
    async fn quoting_is_public_and_uppercases_the_code() {
        let mut ports = TestPorts::default();
        ports
            .coupons
            .expect_quote()
            .with(eq(code("SAVE10")), eq(1000))
            .returning(|_, _| {
                Ok(DiscountQuote {
                    discount: 10,
                    saved: 100,
                })
            });
        let app = actix_test::init_service(app(ports)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/coupons/save10/quote?rent=1000")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(value["discount"], 10);
        assert_eq!(value["saved"], 100);
    }

    #[actix_web::test]
    async fn quoting_zero_rent_is_a_bad_request() {
        let mut ports = TestPorts::default();
        ports
            .coupons
            .expect_quote()
            .returning(|_, _| Err(Error::invalid_request("rent must be a positive amount")));
        let app = actix_test::init_service(app(ports)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/coupons/SAVE10/quote?rent=0")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn creation_is_admin_only() {
        let mut ports = TestPorts::default();
        ports
            .directory
            .expect_role_of()
            .returning(|_| Ok(Some(Role::Member)));
        let app = actix_test::init_service(app(ports)).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/v1/coupons")
            .insert_header(bearer("ada@example.com", "Ada"))
            .set_json(CreateCouponRequest {
                code: "SAVE10".into(),
                percentage: 10,
            })
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn an_out_of_range_percentage_is_rejected() {
        let mut ports = TestPorts::default();
        ports
            .directory
            .expect_role_of()
            .returning(|_| Ok(Some(Role::Admin)));
        let app = actix_test::init_service(app(ports)).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/v1/coupons")
            .insert_header(bearer("root@example.com", "Root"))
            .set_json(CreateCouponRequest {
                code: "SAVE10".into(),
                percentage: 101,
            })
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(value["details"]["code"], "out_of_range");
    }

    #[actix_web::test]
    async fn expiring_an_unknown_code_is_not_found() {
        let mut ports = TestPorts::default();
        ports
            .directory
            .expect_role_of()
            .returning(|_| Ok(Some(Role::Admin)));
        ports
            .coupons
            .expect_expire()
            .returning(|c| Err(Error::not_found(format!("no coupon with code {c}"))));
        let app = actix_test::init_service(app(ports)).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/v1/coupons/GHOST/expire")
            .insert_header(bearer("root@example.com", "Root"))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn admins_see_expired_coupons_in_the_listing() {
        let mut ports = TestPorts::default();
        ports
            .directory
            .expect_role_of()
            .returning(|_| Ok(Some(Role::Admin)));
        ports.coupons.expect_list().returning(|| {
            Ok(vec![
                Coupon::new(code("SAVE10"), 10).expect("coupon"),
                Coupon::new(code("OLD"), 5).expect("coupon").expire(),
            ])
        });
        let app = actix_test::init_service(app(ports)).await;

        let request = actix_test::TestRequest::get()
            .uri("/api/v1/coupons")
            .insert_header(bearer("root@example.com", "Root"))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(value.as_array().expect("array").len(), 2);
        assert_eq!(value[1]["expired"], true);
    }
}
