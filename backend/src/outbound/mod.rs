//! Outbound adapters implementing the driven ports.

pub mod payments;
pub mod persistence;
