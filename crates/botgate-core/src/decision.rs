//! Admission/authorization decision type.

use serde::{Deserialize, Serialize};

use crate::error::ReasonCode;

/// Recovery affordance attached to a deny, pointing the caller at the
/// operation that can restore service. The gate never renders text for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Recovery {
    /// Entry point for redeeming a new entitlement code.
    EntitlementCodeEntry { command_key: String },
}

/// Tagged result of an admission or authorization check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Decision {
    Allow,
    Deny {
        reason: ReasonCode,
        #[serde(skip_serializing_if = "Option::is_none")]
        recovery: Option<Recovery>,
    },
}

impl Decision {
    pub fn deny(reason: ReasonCode) -> Self {
        Decision::Deny {
            reason,
            recovery: None,
        }
    }

    pub fn deny_with(reason: ReasonCode, recovery: Recovery) -> Self {
        Decision::Deny {
            reason,
            recovery: Some(recovery),
        }
    }

    pub fn is_allow(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    pub fn reason(&self) -> Option<ReasonCode> {
        match self {
            Decision::Allow => None,
            Decision::Deny { reason, .. } => Some(*reason),
        }
    }

    /// Label for metrics/logs.
    pub fn outcome_str(&self) -> &'static str {
        match self {
            Decision::Allow => "allow",
            Decision::Deny { reason, .. } => reason.as_str(),
        }
    }
}
