//! Role authorization resolver.
//!
//! Pure cascade over supplied state, called by feature handlers that declare
//! a minimum tier after the gate has admitted the request. The cascade is an
//! explicit ordered rule table so new tiers can be inserted without
//! restructuring control flow.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use botgate_core::{Decision, PrincipalId, ReasonCode, Tenant, Tier, WorkspaceSnapshot};

use crate::obs::GateMetrics;

/// Liveness flag for the originating request. The transport sets it when the
/// underlying session closes; the resolver then abstains instead of deciding
/// against a dead request.
#[derive(Debug, Clone, Default)]
pub struct RequestGuard {
    cancelled: Arc<AtomicBool>,
}

impl RequestGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Resolver outcome. `Abstained` is not a decision: no allow, no deny, no
/// side effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthzOutcome {
    Decided(Decision),
    Abstained,
}

impl AuthzOutcome {
    pub fn is_allow(&self) -> bool {
        matches!(self, AuthzOutcome::Decided(d) if d.is_allow())
    }

    pub fn is_abstained(&self) -> bool {
        matches!(self, AuthzOutcome::Abstained)
    }
}

struct AuthzInput<'a> {
    tenant: &'a Tenant,
    live: &'a WorkspaceSnapshot,
    actor: &'a PrincipalId,
    required: Tier,
    now: DateTime<Utc>,
}

type Rule = fn(&AuthzInput<'_>) -> Option<Decision>;

/// Ordered cascade, first match wins. Owner > elevated > standard; a higher
/// tier always satisfies a lower requirement.
const RULES: &[Rule] = &[rule_expired, rule_drift, rule_owner, rule_elevated, rule_standard];

fn rule_expired(input: &AuthzInput<'_>) -> Option<Decision> {
    // Re-checked here because authorization may be reached on a path that
    // bypassed the gate's own expiry check.
    if input.tenant.is_expired(input.now) {
        return Some(Decision::deny(ReasonCode::EntitlementExpired));
    }
    None
}

fn rule_drift(input: &AuthzInput<'_>) -> Option<Decision> {
    if input.tenant.display_name != input.live.display_name
        || input.tenant.owner_id != input.live.owner_id
    {
        return Some(Decision::deny(ReasonCode::RecordDrift));
    }
    None
}

fn rule_owner(input: &AuthzInput<'_>) -> Option<Decision> {
    if input.actor == &input.tenant.owner_id {
        return Some(Decision::Allow);
    }
    None
}

fn rule_elevated(input: &AuthzInput<'_>) -> Option<Decision> {
    if input.required > Tier::Elevated {
        return None;
    }
    match &input.tenant.elevated_role_id {
        Some(role) if input.live.holds(role) => Some(Decision::Allow),
        _ => None,
    }
}

fn rule_standard(input: &AuthzInput<'_>) -> Option<Decision> {
    if input.required > Tier::Standard {
        return None;
    }
    match &input.tenant.standard_role_id {
        Some(role) if input.live.holds(role) => Some(Decision::Allow),
        _ => None,
    }
}

/// Resolve the actor's permission against the stored record and live
/// workspace metadata. Pure: no side effects, no clock reads.
pub fn authorize(
    tenant: Option<&Tenant>,
    live: &WorkspaceSnapshot,
    actor: &PrincipalId,
    required: Tier,
    guard: &RequestGuard,
    now: DateTime<Utc>,
) -> AuthzOutcome {
    if guard.is_cancelled() {
        return AuthzOutcome::Abstained;
    }

    let Some(tenant) = tenant else {
        return AuthzOutcome::Decided(Decision::deny(ReasonCode::NotRegistered));
    };

    let input = AuthzInput {
        tenant,
        live,
        actor,
        required,
        now,
    };

    for rule in RULES {
        if let Some(decision) = rule(&input) {
            return AuthzOutcome::Decided(decision);
        }
    }

    AuthzOutcome::Decided(Decision::deny(ReasonCode::InsufficientPermission))
}

/// Thin wrapper recording outcomes to the observability sink.
pub struct RoleAuthorizer {
    metrics: Arc<GateMetrics>,
}

impl RoleAuthorizer {
    pub fn new(metrics: Arc<GateMetrics>) -> Self {
        Self { metrics }
    }

    pub fn authorize(
        &self,
        tenant: Option<&Tenant>,
        live: &WorkspaceSnapshot,
        actor: &PrincipalId,
        required: Tier,
        guard: &RequestGuard,
    ) -> AuthzOutcome {
        let outcome = authorize(tenant, live, actor, required, guard, Utc::now());
        let tenant_label = tenant.map(|t| t.id.as_str()).unwrap_or("-");
        match &outcome {
            AuthzOutcome::Decided(decision) => {
                self.metrics.authz_decisions_total.inc(&[
                    ("tenant", tenant_label),
                    ("outcome", decision.outcome_str()),
                ]);
                if !decision.is_allow() {
                    tracing::info!(
                        tenant = tenant_label,
                        actor = %actor,
                        required = ?required,
                        outcome = decision.outcome_str(),
                        "authorization denied"
                    );
                }
            }
            AuthzOutcome::Abstained => {
                tracing::debug!(tenant = tenant_label, actor = %actor, "request cancelled, abstaining");
            }
        }
        outcome
    }
}
