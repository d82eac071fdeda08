//! Tenant store contract.
//!
//! The durable record is owned by an external collaborator; the engine only
//! consumes this narrow read/write surface. All storage faults must surface
//! as `UpstreamUnavailable` so the gate can apply its fail-open policy.

pub mod memory;

use async_trait::async_trait;

use botgate_core::{Result, Tenant, TenantId, TenantPatch};

pub use memory::MemoryTenantStore;

/// Narrow read/write contract over durable tenant records.
#[async_trait]
pub trait TenantStore: Send + Sync {
    /// Look up a record. `Ok(None)` means no record exists (unregistered).
    async fn get(&self, id: &TenantId) -> Result<Option<Tenant>>;

    /// Create a record. Must enforce uniqueness on the tenant id and return
    /// `GateError::Conflict` when a record already exists, atomically with
    /// respect to concurrent creates for the same id.
    async fn create(&self, tenant: Tenant) -> Result<Tenant>;

    /// Apply a partial update. `GateError::NotRegistered` if no record exists.
    async fn update(&self, id: &TenantId, patch: TenantPatch) -> Result<Tenant>;
}
