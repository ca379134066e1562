//! Driving port for the agreement application and adjudication workflow.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Agreement, Decision, EmailAddress, Error, UnitId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AgreementWorkflow: Send + Sync {
    /// Submit a tenancy application for a unit.
    ///
    /// Members and admins cannot apply, and a second application while one is
    /// pending is refused; each case yields `Conflict` with a
    /// distinguishable message. The rent is snapshotted from the unit at
    /// submission time.
    async fn submit(&self, email: EmailAddress, unit_id: UnitId) -> Result<Agreement, Error>;

    /// Adjudicate a pending agreement.
    ///
    /// `NotFound` when the id is unknown; `InvalidState` when the agreement
    /// was already adjudicated. Accepting additionally promotes the owner to
    /// member.
    async fn adjudicate(&self, id: Uuid, decision: Decision) -> Result<Agreement, Error>;

    /// All agreements awaiting adjudication.
    async fn list_pending(&self) -> Result<Vec<Agreement>, Error>;

    /// The email's most recent agreement; `NotFound` when none exists.
    async fn for_user(&self, email: &EmailAddress) -> Result<Agreement, Error>;
}
