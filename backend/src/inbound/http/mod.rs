//! HTTP inbound adapter exposing the REST endpoints.

pub mod agreements;
pub mod auth;
pub mod coupons;
pub mod error;
pub mod health;
pub mod payments;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod units;
pub mod users;

pub use error::ApiResult;
