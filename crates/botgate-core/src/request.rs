//! Inbound request shape: one ephemeral value per interaction.
//!
//! The interaction capability is a closed tagged union with an explicit
//! discriminator checked before dispatch; the gate never probes request
//! objects for methods.

use serde::{Deserialize, Serialize};

use crate::tenant::{PrincipalId, RoleId, TenantId};

/// Interaction capability discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    Command,
    Button,
    Menu,
    Modal,
    /// Join/leave and other non-interactive platform events.
    LifecycleEvent,
}

impl InteractionKind {
    /// The gate only governs workspace-scoped interactive actions.
    pub fn is_gated(self) -> bool {
        matches!(
            self,
            InteractionKind::Command
                | InteractionKind::Button
                | InteractionKind::Menu
                | InteractionKind::Modal
        )
    }
}

/// One inbound interaction, as seen by the admission gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundRequest {
    /// Absent when the interaction originated outside any workspace
    /// (direct-message style events).
    pub tenant_id: Option<TenantId>,
    pub actor_id: PrincipalId,
    /// Discriminates bypass-eligible operations.
    pub command_key: String,
    pub kind: InteractionKind,
}

impl InboundRequest {
    pub fn new(
        kind: InteractionKind,
        tenant_id: Option<TenantId>,
        actor_id: PrincipalId,
        command_key: impl Into<String>,
    ) -> Self {
        Self {
            tenant_id,
            actor_id,
            command_key: command_key.into(),
            kind,
        }
    }

    /// Command invocation inside a workspace.
    pub fn command(
        tenant_id: TenantId,
        actor_id: PrincipalId,
        command_key: impl Into<String>,
    ) -> Self {
        Self::new(InteractionKind::Command, Some(tenant_id), actor_id, command_key)
    }

    /// Command invocation with no workspace context.
    pub fn direct(actor_id: PrincipalId, command_key: impl Into<String>) -> Self {
        Self::new(InteractionKind::Command, None, actor_id, command_key)
    }
}

/// Live workspace metadata supplied alongside an authorization call.
///
/// The resolver compares this against the stored record to detect drift, and
/// reads the actor's live role holdings from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceSnapshot {
    pub display_name: String,
    pub owner_id: PrincipalId,
    /// Role bindings the acting principal currently holds in the workspace.
    pub actor_roles: Vec<RoleId>,
}

impl WorkspaceSnapshot {
    pub fn new(display_name: impl Into<String>, owner_id: PrincipalId) -> Self {
        Self {
            display_name: display_name.into(),
            owner_id,
            actor_roles: Vec::new(),
        }
    }

    pub fn with_roles(mut self, roles: Vec<RoleId>) -> Self {
        self.actor_roles = roles;
        self
    }

    pub fn holds(&self, role: &RoleId) -> bool {
        self.actor_roles.iter().any(|r| r == role)
    }
}
