//! Agreement workflow domain service.
//!
//! Implements the [`AgreementWorkflow`] driving port: submission gates in
//! role order (registration, membership, admin, pending duplicate, unit),
//! adjudication guards the pending state, and acceptance promotes the owner
//! to member.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::ports::{
    AgreementPersistenceError, AgreementRepository, AgreementWorkflow, UnitPersistenceError,
    UnitRepository, UserPersistenceError, UserRepository,
};
use crate::domain::{Agreement, Decision, EmailAddress, Error, Role, UnitId};

/// Agreement workflow service.
#[derive(Clone)]
pub struct AgreementService<A, U, N> {
    agreements: Arc<A>,
    users: Arc<U>,
    units: Arc<N>,
}

impl<A, U, N> AgreementService<A, U, N> {
    /// Create a new service with the given repositories.
    pub fn new(agreements: Arc<A>, users: Arc<U>, units: Arc<N>) -> Self {
        Self {
            agreements,
            users,
            units,
        }
    }
}

impl<A, U, N> AgreementService<A, U, N>
where
    A: AgreementRepository,
    U: UserRepository,
    N: UnitRepository,
{
    fn map_agreement_error(error: AgreementPersistenceError) -> Error {
        match error {
            AgreementPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("agreement repository unavailable: {message}"))
            }
            AgreementPersistenceError::Query { message } => {
                Error::internal(format!("agreement repository error: {message}"))
            }
            // Lost a submission race; same outcome as the pre-check.
            AgreementPersistenceError::DuplicatePending { email } => {
                Error::conflict(format!("an application is already pending for {email}"))
            }
        }
    }

    fn map_user_error(error: UserPersistenceError) -> Error {
        match error {
            UserPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserPersistenceError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
        }
    }

    fn map_unit_error(error: UnitPersistenceError) -> Error {
        match error {
            UnitPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("unit repository unavailable: {message}"))
            }
            UnitPersistenceError::Query { message } => {
                Error::internal(format!("unit repository error: {message}"))
            }
            UnitPersistenceError::DuplicateId { id } => {
                Error::internal(format!("unexpected unit id conflict for {id}"))
            }
        }
    }
}

#[async_trait]
impl<A, U, N> AgreementWorkflow for AgreementService<A, U, N>
where
    A: AgreementRepository,
    U: UserRepository,
    N: UnitRepository,
{
    async fn submit(&self, email: EmailAddress, unit_id: UnitId) -> Result<Agreement, Error> {
        let user = self
            .users
            .find_by_email(&email)
            .await
            .map_err(Self::map_user_error)?
            .ok_or_else(|| Error::not_found(format!("no user registered as {email}")))?;
        match user.role() {
            Role::Member => {
                return Err(Error::conflict(format!("{email} is already a member")));
            }
            Role::Admin => {
                return Err(Error::conflict("administrators cannot apply for tenancy"));
            }
            Role::User => {}
        }
        if self
            .agreements
            .find_pending_by_email(&email)
            .await
            .map_err(Self::map_agreement_error)?
            .is_some()
        {
            return Err(Error::conflict(format!(
                "an application is already pending for {email}"
            )));
        }
        let unit = self
            .units
            .find_by_id(&unit_id)
            .await
            .map_err(Self::map_unit_error)?
            .ok_or_else(|| Error::not_found(format!("unit {unit_id} is not listed")))?;
        let agreement = Agreement::pending(email, unit_id, unit.rent(), Utc::now());
        self.agreements
            .insert(&agreement)
            .await
            .map_err(Self::map_agreement_error)?;
        tracing::info!(
            agreement = %agreement.id(),
            email = %agreement.email(),
            unit = %agreement.unit_id(),
            "agreement submitted"
        );
        Ok(agreement)
    }

    async fn adjudicate(&self, id: Uuid, decision: Decision) -> Result<Agreement, Error> {
        let agreement = self
            .agreements
            .find_by_id(id)
            .await
            .map_err(Self::map_agreement_error)?
            .ok_or_else(|| Error::not_found(format!("no agreement with id {id}")))?;
        if agreement.status().is_terminal() {
            return Err(Error::invalid_state(format!(
                "agreement {id} has already been adjudicated"
            )));
        }
        let updated = self
            .agreements
            .update_status(id, decision.terminal_status())
            .await
            .map_err(Self::map_agreement_error)?
            .ok_or_else(|| Error::not_found(format!("no agreement with id {id}")))?;
        if decision == Decision::Accept {
            // Promotion after the status write: the agreement stays accepted
            // even if the applicant record has vanished, and the gap is
            // surfaced rather than silently ignored.
            self.users
                .update_role(updated.email(), Role::Member)
                .await
                .map_err(Self::map_user_error)?
                .ok_or_else(|| {
                    Error::not_found(format!(
                        "applicant {} is no longer registered",
                        updated.email()
                    ))
                })?;
        }
        tracing::info!(
            agreement = %id,
            status = ?updated.status(),
            "agreement adjudicated"
        );
        Ok(updated)
    }

    async fn list_pending(&self) -> Result<Vec<Agreement>, Error> {
        self.agreements
            .list_pending()
            .await
            .map_err(Self::map_agreement_error)
    }

    async fn for_user(&self, email: &EmailAddress) -> Result<Agreement, Error> {
        self.agreements
            .find_latest_by_email(email)
            .await
            .map_err(Self::map_agreement_error)?
            .ok_or_else(|| Error::not_found(format!("no agreement on file for {email}")))
    }
}
