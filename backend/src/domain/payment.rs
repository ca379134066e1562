//! Append-only payment records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::EmailAddress;

/// A settled charge handed to the external payment collaborator.
///
/// Records are append-only; nothing mutates or deletes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    #[schema(value_type = String, format = Uuid)]
    id: Uuid,
    #[schema(value_type = String, example = "ada@example.com")]
    payer: EmailAddress,
    /// Amount charged, in minor currency units (e.g. cents).
    #[schema(example = 90000)]
    amount_minor: i64,
    /// Opaque client handle returned by the payment collaborator.
    #[schema(example = "pi_3PqX9aF2eZvKYlo2")]
    handle: String,
    created_at: DateTime<Utc>,
}

impl PaymentRecord {
    /// Record a settled charge.
    pub fn new(
        payer: EmailAddress,
        amount_minor: i64,
        handle: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            payer,
            amount_minor,
            handle: handle.into(),
            created_at,
        }
    }

    /// Record identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Paying user's email.
    pub fn payer(&self) -> &EmailAddress {
        &self.payer
    }

    /// Amount charged in minor currency units.
    pub fn amount_minor(&self) -> i64 {
        self.amount_minor
    }

    /// Opaque handle from the payment collaborator.
    pub fn handle(&self) -> &str {
        self.handle.as_str()
    }

    /// Settlement timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
