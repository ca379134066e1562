//! Transport-agnostic error payload shared by every operation boundary.
//!
//! Inbound adapters map these errors onto HTTP responses; the domain layer
//! only ever deals in [`Error`] and [`ErrorCode`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::middleware::trace::TraceId;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// The presented credential is missing a valid signature, expired, or
    /// malformed.
    InvalidCredential,
    /// No identity was presented.
    Unauthorized,
    /// Identity present but lacking the role or ownership for this action.
    Forbidden,
    /// The requested resource does not exist.
    NotFound,
    /// The request conflicts with current state (duplicate application,
    /// already a member, duplicate code).
    Conflict,
    /// A state transition was attempted from a state that does not permit it.
    InvalidState,
    /// A required precondition does not hold (e.g. charging without an
    /// accepted agreement).
    PreconditionFailed,
    /// An external collaborator did not respond or refused the call.
    UpstreamUnavailable,
    /// A backing store is unreachable; the request itself may be valid.
    ServiceUnavailable,
    /// An unexpected error occurred inside the domain.
    InternalError,
}

/// Error payload returned by domain operations.
///
/// Constructors capture the request-scoped [`TraceId`] automatically when one
/// is active, so error payloads correlate with logs without handler effort.
///
/// # Examples
/// ```
/// use tenancy_backend::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("no such agreement");
/// assert_eq!(err.code, ErrorCode::NotFound);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Error {
    /// Stable machine-readable error code.
    #[schema(example = "conflict")]
    pub code: ErrorCode,
    /// Human-readable error message.
    #[schema(example = "an application is already pending")]
    pub message: String,
    /// Correlation identifier for tracing this error across systems.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(alias = "trace_id")]
    pub trace_id: Option<String>,
    /// Supplementary structured details (field errors, conflicting ids).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl Error {
    /// Create a new error, capturing the scoped trace identifier if present.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    /// Attach a trace identifier to the error.
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Attach structured details to the error.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::InvalidCredential`].
    pub fn invalid_credential(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidCredential, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::Forbidden`].
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Convenience constructor for [`ErrorCode::InvalidState`].
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidState, message)
    }

    /// Convenience constructor for [`ErrorCode::PreconditionFailed`].
    pub fn precondition_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PreconditionFailed, message)
    }

    /// Convenience constructor for [`ErrorCode::UpstreamUnavailable`].
    pub fn upstream_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UpstreamUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn constructors_set_their_codes() {
        let cases = [
            (Error::invalid_request("m"), ErrorCode::InvalidRequest),
            (Error::invalid_credential("m"), ErrorCode::InvalidCredential),
            (Error::unauthorized("m"), ErrorCode::Unauthorized),
            (Error::forbidden("m"), ErrorCode::Forbidden),
            (Error::not_found("m"), ErrorCode::NotFound),
            (Error::conflict("m"), ErrorCode::Conflict),
            (Error::invalid_state("m"), ErrorCode::InvalidState),
            (Error::precondition_failed("m"), ErrorCode::PreconditionFailed),
            (Error::upstream_unavailable("m"), ErrorCode::UpstreamUnavailable),
            (Error::service_unavailable("m"), ErrorCode::ServiceUnavailable),
            (Error::internal("m"), ErrorCode::InternalError),
        ];
        for (err, code) in cases {
            assert_eq!(err.code, code);
        }
    }

    #[test]
    fn details_and_trace_id_round_trip_through_json() {
        let err = Error::conflict("duplicate")
            .with_trace_id("abc")
            .with_details(json!({ "reason": "duplicate_application" }));
        let value = serde_json::to_value(&err).expect("serialise");
        assert_eq!(value["code"], "conflict");
        assert_eq!(value["traceId"], "abc");
        assert_eq!(value["details"]["reason"], "duplicate_application");
    }

    #[tokio::test]
    async fn scoped_trace_id_is_captured() {
        use crate::middleware::trace::TraceId;

        let id: TraceId = "00000000-0000-0000-0000-000000000000"
            .parse()
            .expect("valid UUID");
        let err = TraceId::scope(id, async move { Error::internal("boom") }).await;
        assert_eq!(err.trace_id.as_deref(), Some(id.to_string().as_str()));
    }

    #[test]
    fn no_trace_id_outside_request_scope() {
        assert!(Error::internal("boom").trace_id.is_none());
    }
}
