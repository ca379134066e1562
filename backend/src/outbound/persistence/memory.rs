//! In-memory repository adapters.
//!
//! Backing store for single-process deployments and tests. Each repository
//! wraps a `std::sync::RwLock`; guards are never held across an await point.
//! The agreement store enforces the one-pending-application-per-email
//! constraint inside its insert lock so concurrent submissions cannot both
//! succeed.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{
    AgreementPersistenceError, AgreementRepository, CouponPersistenceError, CouponRepository,
    PaymentPersistenceError, PaymentRepository, UnitPersistenceError, UnitRepository,
    UserPersistenceError, UserRepository,
};
use crate::domain::{
    Agreement, AgreementStatus, Coupon, CouponCode, EmailAddress, PaymentRecord, RentalUnit, Role,
    UnitId, User,
};

/// In-memory user store keyed by lowercased email.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn user_lock_poisoned() -> UserPersistenceError {
    UserPersistenceError::Query {
        message: "user store lock poisoned".into(),
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut users = self.users.write().map_err(|_| user_lock_poisoned())?;
        users.insert(user.email().to_string(), user.clone());
        Ok(())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        let users = self.users.read().map_err(|_| user_lock_poisoned())?;
        Ok(users.get(email.as_ref()).cloned())
    }

    async fn update_role(
        &self,
        email: &EmailAddress,
        role: Role,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut users = self.users.write().map_err(|_| user_lock_poisoned())?;
        let Some(user) = users.get(email.as_ref()).cloned() else {
            return Ok(None);
        };
        let updated = user.with_role(role);
        users.insert(email.to_string(), updated.clone());
        Ok(Some(updated))
    }

    async fn list_by_role(&self, role: Role) -> Result<Vec<User>, UserPersistenceError> {
        let users = self.users.read().map_err(|_| user_lock_poisoned())?;
        Ok(users
            .values()
            .filter(|user| user.role() == role)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<u64, UserPersistenceError> {
        let users = self.users.read().map_err(|_| user_lock_poisoned())?;
        Ok(users.len() as u64)
    }
}

/// In-memory rental unit store keyed by unit id.
#[derive(Default)]
pub struct InMemoryUnitRepository {
    units: RwLock<HashMap<String, RentalUnit>>,
}

impl InMemoryUnitRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn unit_lock_poisoned() -> UnitPersistenceError {
    UnitPersistenceError::Query {
        message: "unit store lock poisoned".into(),
    }
}

#[async_trait]
impl UnitRepository for InMemoryUnitRepository {
    async fn insert(&self, unit: &RentalUnit) -> Result<(), UnitPersistenceError> {
        let mut units = self.units.write().map_err(|_| unit_lock_poisoned())?;
        if units.contains_key(unit.id().as_ref()) {
            return Err(UnitPersistenceError::DuplicateId {
                id: unit.id().to_string(),
            });
        }
        units.insert(unit.id().to_string(), unit.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UnitId) -> Result<Option<RentalUnit>, UnitPersistenceError> {
        let units = self.units.read().map_err(|_| unit_lock_poisoned())?;
        Ok(units.get(id.as_ref()).cloned())
    }

    async fn list(&self) -> Result<Vec<RentalUnit>, UnitPersistenceError> {
        let units = self.units.read().map_err(|_| unit_lock_poisoned())?;
        Ok(units.values().cloned().collect())
    }

    async fn count(&self) -> Result<u64, UnitPersistenceError> {
        let units = self.units.read().map_err(|_| unit_lock_poisoned())?;
        Ok(units.len() as u64)
    }
}

/// In-memory agreement store keyed by agreement id.
#[derive(Default)]
pub struct InMemoryAgreementRepository {
    agreements: RwLock<HashMap<Uuid, Agreement>>,
}

impl InMemoryAgreementRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn agreement_lock_poisoned() -> AgreementPersistenceError {
    AgreementPersistenceError::Query {
        message: "agreement store lock poisoned".into(),
    }
}

#[async_trait]
impl AgreementRepository for InMemoryAgreementRepository {
    async fn insert(&self, agreement: &Agreement) -> Result<(), AgreementPersistenceError> {
        let mut agreements = self
            .agreements
            .write()
            .map_err(|_| agreement_lock_poisoned())?;
        // Uniqueness check and insert under one guard: two racing
        // submissions cannot both observe "no pending agreement".
        let has_pending = agreements
            .values()
            .any(|existing| existing.email() == agreement.email() && existing.status().is_pending());
        if has_pending {
            return Err(AgreementPersistenceError::DuplicatePending {
                email: agreement.email().to_string(),
            });
        }
        agreements.insert(agreement.id(), agreement.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Agreement>, AgreementPersistenceError> {
        let agreements = self
            .agreements
            .read()
            .map_err(|_| agreement_lock_poisoned())?;
        Ok(agreements.get(&id).cloned())
    }

    async fn find_pending_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Agreement>, AgreementPersistenceError> {
        let agreements = self
            .agreements
            .read()
            .map_err(|_| agreement_lock_poisoned())?;
        Ok(agreements
            .values()
            .find(|agreement| agreement.email() == email && agreement.status().is_pending())
            .cloned())
    }

    async fn find_accepted_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Agreement>, AgreementPersistenceError> {
        let agreements = self
            .agreements
            .read()
            .map_err(|_| agreement_lock_poisoned())?;
        Ok(agreements
            .values()
            .find(|agreement| {
                agreement.email() == email && agreement.status() == AgreementStatus::Accepted
            })
            .cloned())
    }

    async fn find_latest_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Agreement>, AgreementPersistenceError> {
        let agreements = self
            .agreements
            .read()
            .map_err(|_| agreement_lock_poisoned())?;
        Ok(agreements
            .values()
            .filter(|agreement| agreement.email() == email)
            .max_by_key(|agreement| agreement.requested_at())
            .cloned())
    }

    async fn list_pending(&self) -> Result<Vec<Agreement>, AgreementPersistenceError> {
        let agreements = self
            .agreements
            .read()
            .map_err(|_| agreement_lock_poisoned())?;
        Ok(agreements
            .values()
            .filter(|agreement| agreement.status().is_pending())
            .cloned()
            .collect())
    }

    async fn list_accepted(&self) -> Result<Vec<Agreement>, AgreementPersistenceError> {
        let agreements = self
            .agreements
            .read()
            .map_err(|_| agreement_lock_poisoned())?;
        Ok(agreements
            .values()
            .filter(|agreement| agreement.status() == AgreementStatus::Accepted)
            .cloned()
            .collect())
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: AgreementStatus,
    ) -> Result<Option<Agreement>, AgreementPersistenceError> {
        let mut agreements = self
            .agreements
            .write()
            .map_err(|_| agreement_lock_poisoned())?;
        let Some(agreement) = agreements.get(&id).cloned() else {
            return Ok(None);
        };
        let updated = agreement.with_status(status);
        agreements.insert(id, updated.clone());
        Ok(Some(updated))
    }

    async fn delete_terminal_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<u64, AgreementPersistenceError> {
        let mut agreements = self
            .agreements
            .write()
            .map_err(|_| agreement_lock_poisoned())?;
        let before = agreements.len();
        agreements
            .retain(|_, agreement| agreement.email() != email || agreement.status().is_pending());
        Ok((before - agreements.len()) as u64)
    }
}

/// In-memory coupon store keyed by uppercased code.
#[derive(Default)]
pub struct InMemoryCouponRepository {
    coupons: RwLock<HashMap<String, Coupon>>,
}

impl InMemoryCouponRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn coupon_lock_poisoned() -> CouponPersistenceError {
    CouponPersistenceError::Query {
        message: "coupon store lock poisoned".into(),
    }
}

#[async_trait]
impl CouponRepository for InMemoryCouponRepository {
    async fn insert(&self, coupon: &Coupon) -> Result<(), CouponPersistenceError> {
        let mut coupons = self.coupons.write().map_err(|_| coupon_lock_poisoned())?;
        if coupons.contains_key(coupon.code().as_ref()) {
            return Err(CouponPersistenceError::DuplicateCode {
                code: coupon.code().to_string(),
            });
        }
        coupons.insert(coupon.code().to_string(), coupon.clone());
        Ok(())
    }

    async fn find_by_code(
        &self,
        code: &CouponCode,
    ) -> Result<Option<Coupon>, CouponPersistenceError> {
        let coupons = self.coupons.read().map_err(|_| coupon_lock_poisoned())?;
        Ok(coupons.get(code.as_ref()).cloned())
    }

    async fn mark_expired(
        &self,
        code: &CouponCode,
    ) -> Result<Option<Coupon>, CouponPersistenceError> {
        let mut coupons = self.coupons.write().map_err(|_| coupon_lock_poisoned())?;
        let Some(coupon) = coupons.get(code.as_ref()).cloned() else {
            return Ok(None);
        };
        let expired = coupon.expire();
        coupons.insert(code.to_string(), expired.clone());
        Ok(Some(expired))
    }

    async fn list(&self) -> Result<Vec<Coupon>, CouponPersistenceError> {
        let coupons = self.coupons.read().map_err(|_| coupon_lock_poisoned())?;
        Ok(coupons.values().cloned().collect())
    }
}

/// In-memory append-only payment ledger.
#[derive(Default)]
pub struct InMemoryPaymentRepository {
    records: RwLock<Vec<PaymentRecord>>,
}

impl InMemoryPaymentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn payment_lock_poisoned() -> PaymentPersistenceError {
    PaymentPersistenceError::Query {
        message: "payment store lock poisoned".into(),
    }
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn append(&self, record: &PaymentRecord) -> Result<(), PaymentPersistenceError> {
        let mut records = self.records.write().map_err(|_| payment_lock_poisoned())?;
        records.push(record.clone());
        Ok(())
    }

    async fn list_by_payer(
        &self,
        payer: &EmailAddress,
    ) -> Result<Vec<PaymentRecord>, PaymentPersistenceError> {
        let records = self.records.read().map_err(|_| payment_lock_poisoned())?;
        Ok(records
            .iter()
            .filter(|record| record.payer() == payer)
            .cloned()
            .collect())
    }
}
