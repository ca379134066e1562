//! Directory and inventory domain services.
//!
//! Implements the [`Directory`] and [`Inventory`] driving ports on top of the
//! user, agreement, and unit repositories. Registration is idempotent and
//! never downgrades a role; demotion purges the member's terminal agreements
//! so a fresh application can follow.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    AgreementPersistenceError, AgreementRepository, Directory, Inventory, OccupancyStats,
    UnitPersistenceError, UnitRepository, UserPersistenceError, UserRepository,
};
use crate::domain::{DisplayName, EmailAddress, Error, RentalUnit, Role, UnitId, User};

/// Directory service implementing user registration, roles, and stats.
#[derive(Clone)]
pub struct DirectoryService<U, A, N> {
    users: Arc<U>,
    agreements: Arc<A>,
    units: Arc<N>,
}

impl<U, A, N> DirectoryService<U, A, N> {
    /// Create a new service with the given repositories.
    pub fn new(users: Arc<U>, agreements: Arc<A>, units: Arc<N>) -> Self {
        Self {
            users,
            agreements,
            units,
        }
    }
}

impl<U, A, N> DirectoryService<U, A, N>
where
    U: UserRepository,
    A: AgreementRepository,
    N: UnitRepository,
{
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

    fn map_agreement_error(error: AgreementPersistenceError) -> Error {
        match error {
            AgreementPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("agreement repository unavailable: {message}"))
            }
            AgreementPersistenceError::Query { message } => {
                Error::internal(format!("agreement repository error: {message}"))
            }
            AgreementPersistenceError::DuplicatePending { email } => Error::internal(format!(
                "unexpected pending-agreement conflict for {email}"
            )),
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
                Error::conflict(format!("unit {id} is already listed"))
            }
        }
    }
}

#[async_trait]
impl<U, A, N> Directory for DirectoryService<U, A, N>
where
    U: UserRepository,
    A: AgreementRepository,
    N: UnitRepository,
{
    async fn register(&self, name: DisplayName, email: EmailAddress) -> Result<User, Error> {
        let existing = self
            .users
            .find_by_email(&email)
            .await
            .map_err(Self::map_user_error)?;
        // Refresh the display name on re-registration but keep the earned
        // role; registration never downgrades.
        let user = match existing {
            Some(current) => User::new(email, name).with_role(current.role()),
            None => User::new(email, name),
        };
        self.users.save(&user).await.map_err(Self::map_user_error)?;
        Ok(user)
    }

    async fn role_of(&self, email: &EmailAddress) -> Result<Option<Role>, Error> {
        let user = self
            .users
            .find_by_email(email)
            .await
            .map_err(Self::map_user_error)?;
        Ok(user.map(|u| u.role()))
    }

    async fn list_by_role(&self, role: Role) -> Result<Vec<User>, Error> {
        self.users
            .list_by_role(role)
            .await
            .map_err(Self::map_user_error)
    }

    async fn demote(&self, email: &EmailAddress) -> Result<User, Error> {
        let user = self
            .users
            .find_by_email(email)
            .await
            .map_err(Self::map_user_error)?
            .ok_or_else(|| Error::not_found(format!("no user registered as {email}")))?;
        if user.role() != Role::Member {
            return Err(Error::conflict(format!("{email} is not a member")));
        }
        let demoted = self
            .users
            .update_role(email, Role::User)
            .await
            .map_err(Self::map_user_error)?
            .ok_or_else(|| Error::not_found(format!("no user registered as {email}")))?;
        // Terminal agreements go with the membership; a pending application
        // submitted after demotion must not collide with stale history.
        let purged = self
            .agreements
            .delete_terminal_by_email(email)
            .await
            .map_err(Self::map_agreement_error)?;
        tracing::info!(email = %email, purged, "member demoted");
        Ok(demoted)
    }

    async fn stats(&self) -> Result<OccupancyStats, Error> {
        let total_units = self.units.count().await.map_err(Self::map_unit_error)?;
        let accepted = self
            .agreements
            .list_accepted()
            .await
            .map_err(Self::map_agreement_error)?;
        let occupied: HashSet<&str> = accepted
            .iter()
            .map(|agreement| agreement.unit_id().as_ref())
            .collect();
        let total_users = self.users.count().await.map_err(Self::map_user_error)?;
        let members = self
            .users
            .list_by_role(Role::Member)
            .await
            .map_err(Self::map_user_error)?
            .len() as u64;
        Ok(OccupancyStats {
            total_units,
            available_units: total_units.saturating_sub(occupied.len() as u64),
            total_users,
            members,
        })
    }
}

#[async_trait]
impl<U, A, N> Inventory for DirectoryService<U, A, N>
where
    U: UserRepository,
    A: AgreementRepository,
    N: UnitRepository,
{
    async fn add_unit(&self, unit: RentalUnit) -> Result<RentalUnit, Error> {
        self.units
            .insert(&unit)
            .await
            .map_err(Self::map_unit_error)?;
        Ok(unit)
    }

    async fn list_units(&self) -> Result<Vec<RentalUnit>, Error> {
        self.units.list().await.map_err(Self::map_unit_error)
    }

    async fn get_unit(&self, id: &UnitId) -> Result<RentalUnit, Error> {
        self.units
            .find_by_id(id)
            .await
            .map_err(Self::map_unit_error)?
            .ok_or_else(|| Error::not_found(format!("unit {id} is not listed")))
    }
}
