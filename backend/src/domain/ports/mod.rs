//! Ports connecting the domain to the outside world.
//!
//! Driving ports ([`Directory`], [`Inventory`], [`AgreementWorkflow`],
//! [`Coupons`], [`Billing`]) are implemented by domain services and consumed
//! by the HTTP adapter. Driven ports (the repositories and
//! [`PaymentGateway`]) are implemented by outbound adapters and consumed by
//! the services.

mod agreement_repository;
mod agreement_workflow;
mod billing;
mod coupon_repository;
mod coupons;
mod directory;
mod inventory;
mod payment_gateway;
mod payment_repository;
mod unit_repository;
mod user_repository;

pub use agreement_repository::{AgreementPersistenceError, AgreementRepository};
pub use agreement_workflow::AgreementWorkflow;
pub use billing::{Billing, ChargeReceipt};
pub use coupon_repository::{CouponPersistenceError, CouponRepository};
pub use coupons::Coupons;
pub use directory::{Directory, OccupancyStats};
pub use inventory::Inventory;
pub use payment_gateway::{FixturePaymentGateway, PaymentGateway, PaymentGatewayError, PaymentIntent};
pub use payment_repository::{PaymentPersistenceError, PaymentRepository};
pub use unit_repository::{UnitPersistenceError, UnitRepository};
pub use user_repository::{UserPersistenceError, UserRepository};

#[cfg(test)]
pub use agreement_repository::MockAgreementRepository;
#[cfg(test)]
pub use agreement_workflow::MockAgreementWorkflow;
#[cfg(test)]
pub use billing::MockBilling;
#[cfg(test)]
pub use coupon_repository::MockCouponRepository;
#[cfg(test)]
pub use coupons::MockCoupons;
#[cfg(test)]
pub use directory::MockDirectory;
#[cfg(test)]
pub use inventory::MockInventory;
#[cfg(test)]
pub use payment_gateway::MockPaymentGateway;
#[cfg(test)]
pub use payment_repository::MockPaymentRepository;
#[cfg(test)]
pub use unit_repository::MockUnitRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
