//! Shared helpers for HTTP handler tests.

use std::sync::Arc;

use actix_web::http::header;

use crate::auth::{CredentialIssuer, DEFAULT_TTL_DAYS};
use crate::domain::ports::{
    MockAgreementWorkflow, MockBilling, MockCoupons, MockDirectory, MockInventory,
};
use crate::domain::{DisplayName, EmailAddress};
use crate::inbound::http::state::HttpState;

/// Mutable bundle of port mocks, converted into an [`HttpState`] once
/// expectations are set. Unused mocks panic if a handler touches them.
pub struct TestPorts {
    pub directory: MockDirectory,
    pub inventory: MockInventory,
    pub agreements: MockAgreementWorkflow,
    pub coupons: MockCoupons,
    pub billing: MockBilling,
}

impl Default for TestPorts {
    fn default() -> Self {
        Self {
            directory: MockDirectory::new(),
            inventory: MockInventory::new(),
            agreements: MockAgreementWorkflow::new(),
            coupons: MockCoupons::new(),
            billing: MockBilling::new(),
        }
    }
}

impl TestPorts {
    pub fn into_state(self) -> HttpState {
        HttpState {
            directory: Arc::new(self.directory),
            inventory: Arc::new(self.inventory),
            agreements: Arc::new(self.agreements),
            coupons: Arc::new(self.coupons),
            billing: Arc::new(self.billing),
        }
    }
}

/// Issuer with a fixed test secret; tokens from [`bearer`] verify against it.
pub fn test_issuer() -> CredentialIssuer {
    CredentialIssuer::new(b"handler-test-secret", DEFAULT_TTL_DAYS)
}

/// `Authorization` header naming a valid credential for `email`.
pub fn bearer(email: &str, name: &str) -> (header::HeaderName, String) {
    let issued = test_issuer()
        .issue(
            &EmailAddress::new(email).expect("test email"),
            &DisplayName::new(name).expect("test name"),
        )
        .expect("issue test credential");
    (header::AUTHORIZATION, format!("Bearer {}", issued.token))
}
