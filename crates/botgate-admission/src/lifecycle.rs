//! Tenant lifecycle manager.
//!
//! Owns the unregistered → active → expired → active transitions for a
//! workspace. Join handling is idempotent so reinvites and near-simultaneous
//! join events never produce duplicate records; leaving retains the record so
//! a re-invitation resumes prior entitlement state.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use botgate_core::{GateError, PrincipalId, Result, Tenant, TenantId, TenantPatch};

use crate::obs::GateMetrics;
use crate::provision::{spawn_ensure, ControlProvisioner};
use crate::store::TenantStore;

pub struct LifecycleManager {
    store: Arc<dyn TenantStore>,
    provisioner: Arc<dyn ControlProvisioner>,
    metrics: Arc<GateMetrics>,
}

impl LifecycleManager {
    pub fn new(
        store: Arc<dyn TenantStore>,
        provisioner: Arc<dyn ControlProvisioner>,
        metrics: Arc<GateMetrics>,
    ) -> Self {
        Self {
            store,
            provisioner,
            metrics,
        }
    }

    /// Workspace joined the platform. Idempotent: an existing record makes
    /// this a no-op, and a concurrent-create conflict is absorbed the same
    /// way. A fresh record starts with no entitlement window.
    pub async fn on_workspace_join(
        &self,
        workspace: TenantId,
        owner: PrincipalId,
        name: &str,
    ) -> Result<()> {
        self.metrics.lifecycle_events_total.inc(&[("event", "join")]);

        if self.store.get(&workspace).await?.is_some() {
            tracing::debug!(tenant = %workspace, "join for already-registered workspace, no-op");
            return Ok(());
        }

        let tenant = Tenant::new(workspace.clone(), name, owner.clone());
        match self.store.create(tenant).await {
            Ok(_) => {
                tracing::info!(tenant = %workspace, owner = %owner, "workspace auto-registered on join");
            }
            // Lost the race against another join event; the record exists.
            Err(GateError::Conflict(_)) => {
                tracing::debug!(tenant = %workspace, "concurrent join already registered workspace");
                return Ok(());
            }
            Err(e) => return Err(e),
        }

        // Provisioning failure must not roll back registration.
        spawn_ensure(
            Arc::clone(&self.provisioner),
            Arc::clone(&self.metrics),
            workspace,
            owner,
        );
        Ok(())
    }

    /// Explicit owner-invoked registration. Create-once: an existing record
    /// surfaces as `Conflict`; amendment happens through dedicated update
    /// paths, never through re-registration.
    pub async fn register(
        &self,
        workspace: TenantId,
        name: &str,
        owner: PrincipalId,
    ) -> Result<Tenant> {
        self.metrics.lifecycle_events_total.inc(&[("event", "register")]);

        let tenant = self
            .store
            .create(Tenant::new(workspace.clone(), name, owner.clone()))
            .await?;
        tracing::info!(tenant = %workspace, owner = %owner, "workspace registered");

        spawn_ensure(
            Arc::clone(&self.provisioner),
            Arc::clone(&self.metrics),
            workspace,
            owner,
        );
        Ok(tenant)
    }

    /// Workspace left the platform. Soft retention: the record stays so that
    /// re-invitation resumes prior entitlement state.
    pub async fn on_workspace_leave(&self, workspace: TenantId) {
        self.metrics.lifecycle_events_total.inc(&[("event", "leave")]);
        tracing::info!(tenant = %workspace, "workspace left, record retained");
    }

    /// Entitlement extension write path (purchase or code redemption lands
    /// here). Moves an expired workspace back to active by pushing the
    /// window forward.
    pub async fn extend_entitlement(
        &self,
        workspace: &TenantId,
        new_expiry: DateTime<Utc>,
    ) -> Result<Tenant> {
        self.metrics.lifecycle_events_total.inc(&[("event", "extend")]);

        let updated = self
            .store
            .update(workspace, TenantPatch::expiry(Some(new_expiry)))
            .await?;
        tracing::info!(tenant = %workspace, expiry = %new_expiry, "entitlement extended");
        Ok(updated)
    }
}
