//! Entitlement gate: the admission-control middleware.
//!
//! Invoked once per inbound request, before any feature handler runs.
//! Read-only with respect to the tenant record; the only side effect is the
//! detached control-channel self-heal. Expiry verdicts are never cached, so a
//! lapsed workspace is denied on its very next request.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use botgate_core::{Decision, InboundRequest, ReasonCode, Recovery, Tenant, TenantId};

use crate::config::UnregisteredPolicy;
use crate::obs::GateMetrics;
use crate::policy::BypassRules;
use crate::provision::{spawn_ensure, ControlProvisioner};
use crate::store::TenantStore;

pub struct EntitlementGate {
    store: Arc<dyn TenantStore>,
    provisioner: Arc<dyn ControlProvisioner>,
    rules: BypassRules,
    unregistered: UnregisteredPolicy,
    metrics: Arc<GateMetrics>,
}

impl EntitlementGate {
    pub fn new(
        store: Arc<dyn TenantStore>,
        provisioner: Arc<dyn ControlProvisioner>,
        rules: BypassRules,
        unregistered: UnregisteredPolicy,
        metrics: Arc<GateMetrics>,
    ) -> Self {
        Self {
            store,
            provisioner,
            rules,
            unregistered,
            metrics,
        }
    }

    /// Admission decision against the wall clock.
    pub async fn admit(&self, request: &InboundRequest) -> Decision {
        self.admit_at(request, Utc::now()).await
    }

    /// Admission decision at an explicit instant.
    pub async fn admit_at(&self, request: &InboundRequest, now: DateTime<Utc>) -> Decision {
        let decision = self.evaluate(request, now).await;
        let tenant_label = request
            .tenant_id
            .as_ref()
            .map(TenantId::as_str)
            .unwrap_or("-");
        self.metrics.admissions_total.inc(&[
            ("tenant", tenant_label),
            ("outcome", decision.outcome_str()),
        ]);
        if !decision.is_allow() {
            tracing::info!(
                tenant = tenant_label,
                actor = %request.actor_id,
                command = %request.command_key,
                outcome = decision.outcome_str(),
                "admission denied"
            );
        }
        decision
    }

    async fn evaluate(&self, request: &InboundRequest, now: DateTime<Utc>) -> Decision {
        // 1. Only workspace-scoped interactive actions are governed.
        let Some(tenant_id) = &request.tenant_id else {
            return Decision::Allow;
        };
        if !request.kind.is_gated() {
            return Decision::Allow;
        }

        // 2. Bypass commands stay reachable even when expired or unregistered,
        //    otherwise no workspace could ever recover.
        if self.rules.is_bypass(&request.command_key) {
            return Decision::Allow;
        }

        // 3. Resolve the record. A store fault fails open: an infrastructure
        //    problem must not lock every workspace out of the bot.
        let tenant = match self.store.get(tenant_id).await {
            Ok(t) => t,
            Err(e) => {
                self.metrics
                    .fail_open_total
                    .inc(&[("tenant", tenant_id.as_str())]);
                tracing::error!(
                    tenant = %tenant_id,
                    actor = %request.actor_id,
                    error = %e,
                    "tenant store unavailable, admitting fail-open"
                );
                return Decision::Allow;
            }
        };

        let Some(tenant) = tenant else {
            return match self.unregistered {
                UnregisteredPolicy::Allow => Decision::Allow,
                UnregisteredPolicy::Deny => Decision::deny(ReasonCode::NotRegistered),
            };
        };

        // Self-heal the control channel, detached from this decision.
        self.spawn_self_heal(&tenant);

        // 4. Hard entitlement boundary, with the recovery entry point attached
        //    so the caller can present it.
        if tenant.is_expired(now) {
            return Decision::deny_with(
                ReasonCode::EntitlementExpired,
                Recovery::EntitlementCodeEntry {
                    command_key: self.rules.recovery_command().to_string(),
                },
            );
        }

        Decision::Allow
    }

    fn spawn_self_heal(&self, tenant: &Tenant) {
        spawn_ensure(
            Arc::clone(&self.provisioner),
            Arc::clone(&self.metrics),
            tenant.id.clone(),
            tenant.owner_id.clone(),
        );
    }
}
