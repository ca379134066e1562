//! Driving port for user registration, roles, and occupancy stats.
//!
//! This is the authoritative role ledger: authorization decisions re-read
//! the current role through [`Directory::role_of`] instead of trusting the
//! role a credential may carry.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{DisplayName, EmailAddress, Error, Role, User};

/// Aggregate counts used to validate system state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OccupancyStats {
    /// Units listed in the inventory.
    pub total_units: u64,
    /// Units without an accepted agreement.
    pub available_units: u64,
    /// Registered users of any role.
    pub total_users: u64,
    /// Users currently holding the member role.
    pub members: u64,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Directory: Send + Sync {
    /// Idempotent registration: creates the user with role `user` when
    /// absent, refreshes the display name when present, and never downgrades
    /// an existing role.
    async fn register(&self, name: DisplayName, email: EmailAddress) -> Result<User, Error>;

    /// Current role for the email, or `None` when unregistered.
    async fn role_of(&self, email: &EmailAddress) -> Result<Option<Role>, Error>;

    /// Users currently holding `role`.
    async fn list_by_role(&self, role: Role) -> Result<Vec<User>, Error>;

    /// Reset a member's role to `user` and purge their terminal agreements.
    async fn demote(&self, email: &EmailAddress) -> Result<User, Error>;

    /// Aggregate occupancy counts.
    async fn stats(&self) -> Result<OccupancyStats, Error>;
}
