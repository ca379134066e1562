//! End-to-end flow over the HTTP adapter with real services and in-memory
//! repositories: registration, application, adjudication, membership,
//! coupons, settlement, and demotion.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::http::header;
use actix_web::{App, test, web};
use serde_json::{Value, json};

use tenancy_backend::Trace;
use tenancy_backend::auth::CredentialIssuer;
use tenancy_backend::domain::ports::FixturePaymentGateway;
use tenancy_backend::domain::{
    AgreementService, BillingService, CouponService, DirectoryService, DisplayName, EmailAddress,
    Role, User,
};
use tenancy_backend::inbound::http::agreements::{adjudicate, latest_for_user, list_pending, submit};
use tenancy_backend::inbound::http::coupons::{create, expire, list, quote};
use tenancy_backend::inbound::http::payments::{create_charge, history};
use tenancy_backend::inbound::http::state::HttpState;
use tenancy_backend::inbound::http::units::{add_unit, get_unit, list_units};
use tenancy_backend::inbound::http::users::{
    demote_member, issue_token, list_users, register, stats,
};
use tenancy_backend::outbound::persistence::{
    InMemoryAgreementRepository, InMemoryCouponRepository, InMemoryPaymentRepository,
    InMemoryUnitRepository, InMemoryUserRepository,
};

const ADMIN_EMAIL: &str = "root@example.com";
const TENANT_EMAIL: &str = "ada@example.com";

fn issuer() -> CredentialIssuer {
    CredentialIssuer::new(b"integration-test-secret", 50)
}

async fn seeded_state() -> HttpState {
    let users = Arc::new(InMemoryUserRepository::new());
    let units = Arc::new(InMemoryUnitRepository::new());
    let agreements = Arc::new(InMemoryAgreementRepository::new());
    let coupons = Arc::new(InMemoryCouponRepository::new());
    let payments = Arc::new(InMemoryPaymentRepository::new());

    // Admins are provisioned out of band, never via the public API.
    use tenancy_backend::domain::ports::UserRepository;
    let admin = User::new(
        EmailAddress::new(ADMIN_EMAIL).expect("admin email"),
        DisplayName::new("Root").expect("admin name"),
    )
    .with_role(Role::Admin);
    users.save(&admin).await.expect("seed admin");

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
    let billing = Arc::new(BillingService::new(
        agreements,
        coupons,
        payments,
        Arc::new(FixturePaymentGateway),
        "usd",
    ));

    HttpState {
        directory: directory.clone(),
        inventory: directory,
        agreements: workflow,
        coupons: coupon_service,
        billing,
    }
}

macro_rules! test_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(issuer()))
                .app_data(web::Data::new($state))
                .wrap(Trace)
                .service(
                    web::scope("/api/v1")
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
                        .service(history),
                ),
        )
        .await
    };
}

fn bearer(email: &str, name: &str) -> (header::HeaderName, String) {
    let issued = issuer()
        .issue(
            &EmailAddress::new(email).expect("email"),
            &DisplayName::new(name).expect("name"),
        )
        .expect("issue");
    (header::AUTHORIZATION, format!("Bearer {}", issued.token))
}

#[actix_web::test]
async fn full_tenancy_lifecycle() {
    let app = test_app!(seeded_state().await);

    // Admin lists a unit.
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/units")
            .insert_header(bearer(ADMIN_EMAIL, "Root"))
            .set_json(json!({ "id": "B2-1204", "block": "B2", "floor": 12, "rent": 1000 }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    // Prospective tenant registers and receives a credential.
    let res = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/v1/users")
            .set_json(json!({ "name": "Ada Lovelace", "email": TENANT_EMAIL }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    let tenant_token = format!("Bearer {}", body["token"].as_str().expect("token"));
    assert_eq!(body["user"]["role"], "user");

    // Tenant applies for the unit.
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/agreements")
            .insert_header((header::AUTHORIZATION, tenant_token.clone()))
            .set_json(json!({ "email": TENANT_EMAIL, "unitId": "B2-1204" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let agreement: Value = test::read_body_json(res).await;
    assert_eq!(agreement["status"], "pending");
    assert_eq!(agreement["rent"], 1000);
    let agreement_id = agreement["id"].as_str().expect("agreement id").to_owned();

    // A second application while one is pending conflicts.
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/agreements")
            .insert_header((header::AUTHORIZATION, tenant_token.clone()))
            .set_json(json!({ "email": TENANT_EMAIL, "unitId": "B2-1204" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // Admin sees it in the pending queue and accepts it.
    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/agreements/pending")
            .insert_header(bearer(ADMIN_EMAIL, "Root"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let pending: Value = test::read_body_json(res).await;
    assert_eq!(pending.as_array().expect("array").len(), 1);

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/agreements/{agreement_id}/adjudicate"))
            .insert_header(bearer(ADMIN_EMAIL, "Root"))
            .set_json(json!({ "decision": "accept" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let adjudicated: Value = test::read_body_json(res).await;
    assert_eq!(adjudicated["status"], "accepted");

    // Acceptance promoted the tenant to member.
    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/users?role=member")
            .insert_header(bearer(ADMIN_EMAIL, "Root"))
            .to_request(),
    )
    .await;
    let members: Value = test::read_body_json(res).await;
    assert_eq!(members[0]["email"], TENANT_EMAIL);

    // Adjudicating the same agreement again is refused.
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/agreements/{agreement_id}/adjudicate"))
            .insert_header(bearer(ADMIN_EMAIL, "Root"))
            .set_json(json!({ "decision": "reject" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // Members cannot apply again.
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/agreements")
            .insert_header((header::AUTHORIZATION, tenant_token.clone()))
            .set_json(json!({ "email": TENANT_EMAIL, "unitId": "B2-1204" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // Occupancy stats reflect the accepted agreement.
    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/stats")
            .insert_header(bearer(ADMIN_EMAIL, "Root"))
            .to_request(),
    )
    .await;
    let stats_body: Value = test::read_body_json(res).await;
    assert_eq!(stats_body["totalUnits"], 1);
    assert_eq!(stats_body["availableUnits"], 0);
    assert_eq!(stats_body["members"], 1);

    // Admin creates a coupon; the member settles rent with it.
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/coupons")
            .insert_header(bearer(ADMIN_EMAIL, "Root"))
            .set_json(json!({ "code": "SAVE10", "percentage": 10 }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/payments")
            .insert_header((header::AUTHORIZATION, tenant_token.clone()))
            .set_json(json!({ "couponCode": "save10" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let receipt: Value = test::read_body_json(res).await;
    assert_eq!(receipt["discount"], 10);
    assert_eq!(receipt["saved"], 100);
    assert_eq!(receipt["amountMinor"], 90_000);
    assert_eq!(receipt["currency"], "usd");

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/payments")
            .insert_header((header::AUTHORIZATION, tenant_token.clone()))
            .to_request(),
    )
    .await;
    let ledger: Value = test::read_body_json(res).await;
    assert_eq!(ledger.as_array().expect("array").len(), 1);
    assert_eq!(ledger[0]["amountMinor"], 90_000);

    // Demotion resets the role and purges terminal agreements.
    let res = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/v1/members/{TENANT_EMAIL}"))
            .insert_header(bearer(ADMIN_EMAIL, "Root"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let demoted: Value = test::read_body_json(res).await;
    assert_eq!(demoted["role"], "user");

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/agreements/{TENANT_EMAIL}"))
            .insert_header((header::AUTHORIZATION, tenant_token.clone()))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // A fresh application is possible after demotion.
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/agreements")
            .insert_header((header::AUTHORIZATION, tenant_token))
            .set_json(json!({ "email": TENANT_EMAIL, "unitId": "B2-1204" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[actix_web::test]
async fn charging_without_membership_is_refused_and_quotes_stay_public() {
    let app = test_app!(seeded_state().await);

    // Register but never apply: charging fails the precondition.
    let res = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/v1/users")
            .set_json(json!({ "name": "Grace Hopper", "email": "grace@example.com" }))
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(res).await;
    let token = format!("Bearer {}", body["token"].as_str().expect("token"));

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/payments")
            .insert_header((header::AUTHORIZATION, token))
            .set_json(json!({}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::PRECONDITION_FAILED);

    // Quotes need no credential; an expired coupon quotes zero.
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/coupons")
            .insert_header(bearer(ADMIN_EMAIL, "Root"))
            .set_json(json!({ "code": "SAVE10", "percentage": 10 }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/coupons/SAVE10/quote?rent=105")
            .to_request(),
    )
    .await;
    let value: Value = test::read_body_json(res).await;
    assert_eq!(value["saved"], 11); // 10.5 rounds half-up

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/coupons/SAVE10/expire")
            .insert_header(bearer(ADMIN_EMAIL, "Root"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/coupons/SAVE10/quote?rent=105")
            .to_request(),
    )
    .await;
    let value: Value = test::read_body_json(res).await;
    assert_eq!(value["discount"], 0);
    assert_eq!(value["saved"], 0);
}

#[actix_web::test]
async fn every_response_carries_a_trace_id() {
    let app = test_app!(seeded_state().await);

    let ok = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/units").to_request(),
    )
    .await;
    assert!(ok.headers().contains_key("trace-id"));

    let err = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/units/NOPE")
            .to_request(),
    )
    .await;
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
    let payload: Value = test::read_body_json(err).await;
    assert!(payload["traceId"].as_str().is_some());
}
