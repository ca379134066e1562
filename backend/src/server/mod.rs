//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::CredentialIssuer;
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::ports::{Billing, FixturePaymentGateway};
use crate::domain::{AgreementService, BillingService, CouponService, DirectoryService};
use crate::inbound::http::agreements::{adjudicate, latest_for_user, list_pending, submit};
use crate::inbound::http::coupons::{create, expire, list, quote};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::payments::{create_charge, history};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::units::{add_unit, get_unit, list_units};
use crate::inbound::http::users::{demote_member, issue_token, list_users, register, stats};
use crate::middleware::trace::Trace;
use crate::outbound::payments::HttpPaymentGateway;
use crate::outbound::persistence::{
    InMemoryAgreementRepository, InMemoryCouponRepository, InMemoryPaymentRepository,
    InMemoryUnitRepository, InMemoryUserRepository,
};

/// Assemble the port implementations behind the HTTP adapter.
///
/// Repositories are in-memory; the payment gateway is HTTP-backed when the
/// configuration names an endpoint and the in-process fixture otherwise.
///
/// # Errors
///
/// Returns [`std::io::Error`] when the gateway HTTP client cannot be built.
pub fn build_http_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    let users = Arc::new(InMemoryUserRepository::new());
    let units = Arc::new(InMemoryUnitRepository::new());
    let agreements = Arc::new(InMemoryAgreementRepository::new());
    let coupons = Arc::new(InMemoryCouponRepository::new());
    let payments = Arc::new(InMemoryPaymentRepository::new());

    let directory = Arc::new(DirectoryService::new(
        users.clone(),
        agreements.clone(),
        units.clone(),
    ));
    let workflow = Arc::new(AgreementService::new(
        agreements.clone(),
        users.clone(),
        units.clone(),
    ));
    let coupon_service = Arc::new(CouponService::new(coupons.clone()));
    let billing: Arc<dyn Billing> = match &config.gateway_url {
        Some(url) => {
            let gateway = HttpPaymentGateway::new(url.clone(), config.gateway_timeout)
                .map_err(|e| std::io::Error::other(format!("payment gateway client: {e}")))?;
            Arc::new(BillingService::new(
                agreements,
                coupons,
                payments,
                Arc::new(gateway),
                config.currency.clone(),
            ))
        }
        None => Arc::new(BillingService::new(
            agreements,
            coupons,
            payments,
            Arc::new(FixturePaymentGateway),
            config.currency.clone(),
        )),
    };

    Ok(HttpState {
        directory: directory.clone(),
        inventory: directory,
        agreements: workflow,
        coupons: coupon_service,
        billing,
    })
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    issuer: web::Data<CredentialIssuer>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        issuer,
    } = deps;

    // Literal routes register before their parameterised siblings so
    // `/agreements/pending` never matches as an email.
    let api = web::scope("/api/v1")
        .service(register)
        .service(issue_token)
        .service(list_users)
        .service(demote_member)
        .service(stats)
        .service(list_pending)
        .service(submit)
        .service(latest_for_user)
        .service(adjudicate)
        .service(list_units)
        .service(get_unit)
        .service(add_unit)
        .service(quote)
        .service(create)
        .service(expire)
        .service(list)
        .service(create_charge)
        .service(history);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(issuer)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when building port implementations or
/// binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: &ServerConfig,
) -> std::io::Result<Server> {
    let http_state = web::Data::new(build_http_state(config)?);
    let issuer = web::Data::new(CredentialIssuer::new(
        &config.token_secret,
        config.token_ttl_days,
    ));

    let deps = AppDependencies {
        health_state,
        http_state,
        issuer,
    };
    let server = HttpServer::new(move || build_app(deps.clone()))
        .bind(config.bind_addr)?
        .run();
    Ok(server)
}
