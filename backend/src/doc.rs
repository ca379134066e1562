//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct which generates the OpenAPI specification
//! for the REST API: every HTTP endpoint from the inbound layer, the shared
//! error payload, the domain schemas, and the bearer-token security scheme.
//! The generated specification backs Swagger UI in debug builds.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::ports::{ChargeReceipt, OccupancyStats};
use crate::domain::{
    Agreement, AgreementStatus, Coupon, Decision, DiscountQuote, Error, ErrorCode, PaymentRecord,
    RentalUnit, Role, User,
};
use crate::inbound::http::agreements::{AdjudicateRequest, SubmitRequest};
use crate::inbound::http::coupons::CreateCouponRequest;
use crate::inbound::http::payments::ChargeRequest;
use crate::inbound::http::units::ListUnitRequest;
use crate::inbound::http::users::{CredentialResponse, IdentityRequest};

/// Enrich the generated document with the bearer-token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some(
                        "Credential issued by PUT /api/v1/users or POST /api/v1/auth/token.",
                    ))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Tenancy backend API",
        description = "HTTP interface for tenancy applications, membership, coupons, and rent settlement."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::issue_token,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::demote_member,
        crate::inbound::http::users::stats,
        crate::inbound::http::agreements::submit,
        crate::inbound::http::agreements::list_pending,
        crate::inbound::http::agreements::latest_for_user,
        crate::inbound::http::agreements::adjudicate,
        crate::inbound::http::units::list_units,
        crate::inbound::http::units::get_unit,
        crate::inbound::http::units::add_unit,
        crate::inbound::http::coupons::quote,
        crate::inbound::http::coupons::create,
        crate::inbound::http::coupons::expire,
        crate::inbound::http::coupons::list,
        crate::inbound::http::payments::create_charge,
        crate::inbound::http::payments::history,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        User,
        Role,
        RentalUnit,
        Agreement,
        AgreementStatus,
        Decision,
        Coupon,
        DiscountQuote,
        PaymentRecord,
        OccupancyStats,
        ChargeReceipt,
        IdentityRequest,
        CredentialResponse,
        SubmitRequest,
        AdjudicateRequest,
        ListUnitRequest,
        CreateCouponRequest,
        ChargeRequest,
    )),
    tags(
        (name = "users", description = "Registration, credentials, and directory administration"),
        (name = "agreements", description = "Tenancy applications and adjudication"),
        (name = "units", description = "Rental unit inventory"),
        (name = "coupons", description = "Discount coupons"),
        (name = "payments", description = "Rent settlement"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
