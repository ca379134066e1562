//! Claims embedded in issued credentials.

use serde::{Deserialize, Serialize};

/// Claims carried by a tenancy credential.
///
/// The credential deliberately carries no role: authorization re-reads the
/// current role from the directory on every request, so a stale credential
/// can never grant more than the ledger allows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (lowercased email address).
    pub sub: String,
    /// Display name at issuance time.
    pub name: String,
    /// Issued at (unix timestamp).
    pub iat: i64,
    /// Expiration (unix timestamp).
    pub exp: i64,
}
