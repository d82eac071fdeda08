//! Control-resource provisioner contract.
//!
//! Every workspace is expected to carry an administrative control channel;
//! the gate and lifecycle manager self-heal it by calling `ensure` on a
//! detached task. Provisioning is best-effort relative to admission: a
//! failure is logged and counted, never surfaced to the request.

use std::sync::Arc;

use async_trait::async_trait;

use botgate_core::{PrincipalId, Result, TenantId};

use crate::obs::GateMetrics;

/// Handle to the workspace's administrative channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlChannel {
    pub id: String,
    /// True when the channel already existed and nothing was created.
    pub existed: bool,
}

/// Idempotent ensure, not create: must be safe to call when the resource
/// already exists.
#[async_trait]
pub trait ControlProvisioner: Send + Sync {
    async fn ensure_control_channel(
        &self,
        workspace: &TenantId,
        owner: &PrincipalId,
    ) -> Result<ControlChannel>;
}

/// Fire-and-forget self-heal: detach the ensure call from the request's own
/// completion and route its error channel to tracing + metrics.
pub(crate) fn spawn_ensure(
    provisioner: Arc<dyn ControlProvisioner>,
    metrics: Arc<GateMetrics>,
    workspace: TenantId,
    owner: PrincipalId,
) {
    tokio::spawn(async move {
        match provisioner.ensure_control_channel(&workspace, &owner).await {
            Ok(channel) => {
                if !channel.existed {
                    tracing::info!(tenant = %workspace, channel = %channel.id, "control channel provisioned");
                }
            }
            Err(e) => {
                metrics
                    .provision_failures_total
                    .inc(&[("tenant", workspace.as_str())]);
                tracing::warn!(tenant = %workspace, error = %e, "control channel provisioning failed");
            }
        }
    });
}
