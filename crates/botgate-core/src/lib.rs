//! botgate core: runtime-free domain types for the admission gate.
//!
//! This crate defines the tenant model, the inbound-request tagged union, the
//! permission tiers, the decision type, and the error surface shared by the
//! admission engine and the surrounding request pipeline. It intentionally
//! carries no async runtime or transport dependencies so it can be reused in
//! multiple contexts.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `GateError`/`Result` so a fault in the
//! gate degrades a single request instead of crashing the pipeline.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod decision;
pub mod error;
pub mod request;
pub mod tenant;

/// Shared result type.
pub use error::{GateError, ReasonCode, Result};

pub use decision::{Decision, Recovery};
pub use request::{InboundRequest, InteractionKind, WorkspaceSnapshot};
pub use tenant::{LifecycleState, PrincipalId, RoleId, Tenant, TenantId, TenantPatch, Tier};
