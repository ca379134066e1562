//! Tenancy backend library modules.
//!
//! The crate follows a hexagonal layout: `domain` holds entities, services,
//! and ports; `inbound` adapts HTTP requests onto driving ports; `outbound`
//! implements driven ports (persistence and the payment gateway); `auth`
//! issues and verifies bearer credentials.

pub mod auth;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Request tracing middleware re-exported for server wiring.
pub use middleware::trace::Trace;
