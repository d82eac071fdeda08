//! Shared error type across botgate crates.

use thiserror::Error;

/// Stable reason codes surfaced to callers (stable API).
///
/// Feature handlers render user-facing text from these; the gate itself never
/// formats messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonCode {
    /// No tenant record exists for the workspace.
    NotRegistered,
    /// Entitlement window elapsed.
    EntitlementExpired,
    /// Stored registration disagrees with live workspace metadata.
    RecordDrift,
    /// Actor does not hold the required tier.
    InsufficientPermission,
    /// Tenant store or provisioner call failed.
    UpstreamUnavailable,
    /// Record already exists (create-once violated).
    Conflict,
    /// Invalid gate configuration.
    BadConfig,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal fault.
    Internal,
}

impl ReasonCode {
    /// String representation used in serialized decisions.
    pub fn as_str(self) -> &'static str {
        match self {
            ReasonCode::NotRegistered => "NOT_REGISTERED",
            ReasonCode::EntitlementExpired => "ENTITLEMENT_EXPIRED",
            ReasonCode::RecordDrift => "RECORD_DRIFT",
            ReasonCode::InsufficientPermission => "INSUFFICIENT_PERMISSION",
            ReasonCode::UpstreamUnavailable => "UPSTREAM_UNAVAILABLE",
            ReasonCode::Conflict => "CONFLICT",
            ReasonCode::BadConfig => "BAD_CONFIG",
            ReasonCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ReasonCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, GateError>;

/// Unified error type used by core and the admission engine.
#[derive(Debug, Error)]
pub enum GateError {
    #[error("workspace not registered")]
    NotRegistered,
    #[error("entitlement expired")]
    EntitlementExpired,
    #[error("stored registration drifted from live workspace state")]
    RecordDrift,
    #[error("insufficient permission")]
    InsufficientPermission,
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl GateError {
    /// Map internal error to a stable caller-facing reason code.
    pub fn reason_code(&self) -> ReasonCode {
        match self {
            GateError::NotRegistered => ReasonCode::NotRegistered,
            GateError::EntitlementExpired => ReasonCode::EntitlementExpired,
            GateError::RecordDrift => ReasonCode::RecordDrift,
            GateError::InsufficientPermission => ReasonCode::InsufficientPermission,
            GateError::UpstreamUnavailable(_) => ReasonCode::UpstreamUnavailable,
            GateError::Conflict(_) => ReasonCode::Conflict,
            GateError::BadConfig(_) => ReasonCode::BadConfig,
            GateError::UnsupportedVersion => ReasonCode::UnsupportedVersion,
            GateError::Internal(_) => ReasonCode::Internal,
        }
    }
}
