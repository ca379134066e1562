//! Tenancy agreement entity and its lifecycle states.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{EmailAddress, UnitId};

/// Lifecycle status of an agreement.
///
/// `Accepted` and `Rejected` are both terminal; only `Accepted` grants
/// membership. The two terminal states are kept distinct so the status field
/// alone records the adjudication outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AgreementStatus {
    /// Submitted and awaiting adjudication.
    Pending,
    /// Adjudicated in favour of the applicant; membership granted.
    Accepted,
    /// Adjudicated against the applicant; role unchanged.
    Rejected,
}

impl AgreementStatus {
    /// True while the agreement awaits adjudication.
    pub fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }

    /// True once adjudicated, in either direction.
    pub fn is_terminal(self) -> bool {
        !self.is_pending()
    }
}

/// Adjudication decision taken by an admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    /// Grant the application; the owner becomes a member.
    Accept,
    /// Refuse the application; the owner's role is unchanged.
    Reject,
}

impl Decision {
    /// Terminal status this decision produces.
    pub fn terminal_status(self) -> AgreementStatus {
        match self {
            Self::Accept => AgreementStatus::Accepted,
            Self::Reject => AgreementStatus::Rejected,
        }
    }
}

/// A tenancy application linking a user to a unit.
///
/// ## Invariants
/// - At most one pending agreement exists per email at any time (enforced by
///   the agreement repository on insert).
/// - `rent` is snapshotted from the unit at submission and never re-read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Agreement {
    #[schema(value_type = String, format = Uuid)]
    id: Uuid,
    #[schema(value_type = String, example = "ada@example.com")]
    email: EmailAddress,
    #[schema(value_type = String, example = "B2-1204")]
    unit_id: UnitId,
    /// Rent snapshot in whole currency units.
    #[schema(example = 1000)]
    rent: i64,
    status: AgreementStatus,
    requested_at: DateTime<Utc>,
}

impl Agreement {
    /// Create a fresh pending agreement with a rent snapshot.
    pub fn pending(email: EmailAddress, unit_id: UnitId, rent: i64, requested_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            unit_id,
            rent,
            status: AgreementStatus::Pending,
            requested_at,
        }
    }

    /// Agreement identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Owning user's email.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Referenced unit.
    pub fn unit_id(&self) -> &UnitId {
        &self.unit_id
    }

    /// Rent snapshot taken at submission.
    pub fn rent(&self) -> i64 {
        self.rent
    }

    /// Current lifecycle status.
    pub fn status(&self) -> AgreementStatus {
        self.status
    }

    /// Submission timestamp.
    pub fn requested_at(&self) -> DateTime<Utc> {
        self.requested_at
    }

    /// Replace the status, consuming and returning the agreement.
    ///
    /// Used by the agreement repository when applying an adjudication; the
    /// workflow service guards that the current status is pending.
    pub fn with_status(mut self, status: AgreementStatus) -> Self {
        self.status = status;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EmailAddress;

    fn sample() -> Agreement {
        Agreement::pending(
            EmailAddress::new("ada@example.com").expect("email"),
            UnitId::new("B2-1204").expect("unit"),
            1000,
            Utc::now(),
        )
    }

    #[test]
    fn new_agreements_start_pending() {
        let agreement = sample();
        assert!(agreement.status().is_pending());
        assert!(!agreement.status().is_terminal());
    }

    #[test]
    fn both_adjudicated_states_are_terminal() {
        assert!(AgreementStatus::Accepted.is_terminal());
        assert!(AgreementStatus::Rejected.is_terminal());
    }

    #[test]
    fn decisions_map_to_their_terminal_status() {
        assert_eq!(Decision::Accept.terminal_status(), AgreementStatus::Accepted);
        assert_eq!(Decision::Reject.terminal_status(), AgreementStatus::Rejected);
    }

    #[test]
    fn status_serialises_lowercase() {
        let value = serde_json::to_value(sample()).expect("serialise");
        assert_eq!(value["status"], "pending");
        assert_eq!(value["unitId"], "B2-1204");
    }
}
