//! In-memory tenant store (development and tests).

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use botgate_core::{GateError, Result, Tenant, TenantId, TenantPatch};

use super::TenantStore;

/// `DashMap`-backed store. Create is atomic per id, so near-simultaneous
/// join events for the same workspace resolve to exactly one record.
#[derive(Default)]
pub struct MemoryTenantStore {
    records: DashMap<TenantId, Tenant>,
}

impl MemoryTenantStore {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl TenantStore for MemoryTenantStore {
    async fn get(&self, id: &TenantId) -> Result<Option<Tenant>> {
        Ok(self.records.get(id).map(|r| r.value().clone()))
    }

    async fn create(&self, tenant: Tenant) -> Result<Tenant> {
        match self.records.entry(tenant.id.clone()) {
            Entry::Occupied(_) => Err(GateError::Conflict(format!(
                "tenant already registered: {}",
                tenant.id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(tenant.clone());
                Ok(tenant)
            }
        }
    }

    async fn update(&self, id: &TenantId, patch: TenantPatch) -> Result<Tenant> {
        let mut rec = self.records.get_mut(id).ok_or(GateError::NotRegistered)?;
        let updated = patch.apply(rec.value());
        *rec.value_mut() = updated.clone();
        Ok(updated)
    }
}
