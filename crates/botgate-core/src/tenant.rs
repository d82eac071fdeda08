//! Tenant model: one record per installed workspace.
//!
//! The tenant store owns the persisted record; the gate and lifecycle manager
//! read-through and write-through on every decision. Nothing here caches
//! entitlement state across requests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(s: impl Into<String>) -> Self {
                Self(s.into())
            }
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

id_newtype!(
    /// Platform-assigned workspace identifier. Unique, immutable, and the sole
    /// join key to external state.
    TenantId
);
id_newtype!(
    /// Principal (user) identifier within the platform.
    PrincipalId
);
id_newtype!(
    /// Role-binding identifier within a workspace.
    RoleId
);

/// Lifecycle state derived from the record, never stored explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// No tenant record exists.
    Unregistered,
    /// Record exists; expiry absent or in the future.
    Active,
    /// Record exists; expiry elapsed.
    Expired,
}

/// Permission tiers, totally ordered: `Owner > Elevated > Standard`.
///
/// A higher tier always satisfies a lower requirement, never the reverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Standard,
    Elevated,
    Owner,
}

/// One tenant record per workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: TenantId,
    /// Human-readable workspace name; drifts with live workspace metadata.
    pub display_name: String,
    /// Owning principal; mutable if ownership transfers.
    pub owner_id: PrincipalId,
    /// Hard entitlement boundary. Absent means unlimited (never provisioned
    /// a paid window); present and in the past means expired.
    pub entitlement_expiry: Option<DateTime<Utc>>,
    /// Role binding granting the elevated tier, if configured.
    pub elevated_role_id: Option<RoleId>,
    /// Role binding granting the standard tier, if configured.
    pub standard_role_id: Option<RoleId>,
}

impl Tenant {
    /// Fresh registration: no entitlement window, no role bindings.
    pub fn new(id: TenantId, display_name: impl Into<String>, owner_id: PrincipalId) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            owner_id,
            entitlement_expiry: None,
            elevated_role_id: None,
            standard_role_id: None,
        }
    }

    /// Derive the lifecycle state at `now`. Expiry is a hard boundary:
    /// strictly past means expired, the expiry instant itself is still active.
    pub fn lifecycle_state(&self, now: DateTime<Utc>) -> LifecycleState {
        match self.entitlement_expiry {
            None => LifecycleState::Active,
            Some(expiry) if now > expiry => LifecycleState::Expired,
            Some(_) => LifecycleState::Active,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.lifecycle_state(now) == LifecycleState::Expired
    }
}

/// Partial update applied through the store's write path.
///
/// `entitlement_expiry` is double-optional: the outer `Option` selects the
/// field, the inner one clears or sets the window.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TenantPatch {
    pub display_name: Option<String>,
    pub owner_id: Option<PrincipalId>,
    pub entitlement_expiry: Option<Option<DateTime<Utc>>>,
    pub elevated_role_id: Option<Option<RoleId>>,
    pub standard_role_id: Option<Option<RoleId>>,
}

impl TenantPatch {
    pub fn expiry(expiry: Option<DateTime<Utc>>) -> Self {
        Self {
            entitlement_expiry: Some(expiry),
            ..Self::default()
        }
    }

    /// Apply the patch to a record, returning the updated copy.
    pub fn apply(&self, tenant: &Tenant) -> Tenant {
        let mut out = tenant.clone();
        if let Some(name) = &self.display_name {
            out.display_name = name.clone();
        }
        if let Some(owner) = &self.owner_id {
            out.owner_id = owner.clone();
        }
        if let Some(expiry) = &self.entitlement_expiry {
            out.entitlement_expiry = *expiry;
        }
        if let Some(role) = &self.elevated_role_id {
            out.elevated_role_id = role.clone();
        }
        if let Some(role) = &self.standard_role_id {
            out.standard_role_id = role.clone();
        }
        out
    }
}
