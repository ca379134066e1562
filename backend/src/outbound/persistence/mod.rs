//! Persistence adapters for the repository ports.

mod memory;

pub use memory::{
    InMemoryAgreementRepository, InMemoryCouponRepository, InMemoryPaymentRepository,
    InMemoryUnitRepository, InMemoryUserRepository,
};
