//! Core domain: entities, validation, services, and the ports that bound
//! them. Nothing in this module touches HTTP or storage directly.

mod agreement;
mod agreement_service;
mod billing_service;
mod coupon;
mod coupon_service;
mod directory_service;
mod discount;
mod error;
mod payment;
pub mod ports;
mod unit;
mod user;

pub use agreement::{Agreement, AgreementStatus, Decision};
pub use agreement_service::AgreementService;
pub use billing_service::BillingService;
pub use coupon::{Coupon, CouponCode, CouponValidationError};
pub use coupon_service::CouponService;
pub use directory_service::DirectoryService;
pub use discount::{resolve_discount, DiscountQuote};
pub use error::{Error, ErrorCode};
pub use payment::PaymentRecord;
pub use unit::{RentalUnit, UnitId, UnitValidationError};
pub use user::{DisplayName, EmailAddress, Role, User, UserValidationError};
