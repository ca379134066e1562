//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AgreementWorkflow, Billing, Coupons, Directory, Inventory};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub directory: Arc<dyn Directory>,
    pub inventory: Arc<dyn Inventory>,
    pub agreements: Arc<dyn AgreementWorkflow>,
    pub coupons: Arc<dyn Coupons>,
    pub billing: Arc<dyn Billing>,
}
