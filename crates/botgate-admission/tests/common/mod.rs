#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use botgate_admission::config::GateConfig;
use botgate_admission::provision::{ControlChannel, ControlProvisioner};
use botgate_admission::store::{MemoryTenantStore, TenantStore};
use botgate_admission::AdmissionRuntime;
use botgate_core::{GateError, PrincipalId, Result, Tenant, TenantId, TenantPatch};

/// Counts ensure calls; flips `existed` after the first one per instance.
#[derive(Default)]
pub struct RecordingProvisioner {
    pub calls: AtomicUsize,
    pub fail: bool,
}

impl RecordingProvisioner {
    pub fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: true,
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ControlProvisioner for RecordingProvisioner {
    async fn ensure_control_channel(
        &self,
        workspace: &TenantId,
        _owner: &PrincipalId,
    ) -> Result<ControlChannel> {
        let prior = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(GateError::UpstreamUnavailable(
                "channel create rejected".into(),
            ));
        }
        Ok(ControlChannel {
            id: format!("control-{workspace}"),
            existed: prior > 0,
        })
    }
}

/// Store whose every call fails, for fail-open coverage.
pub struct BrokenStore;

#[async_trait]
impl TenantStore for BrokenStore {
    async fn get(&self, _id: &TenantId) -> Result<Option<Tenant>> {
        Err(GateError::UpstreamUnavailable("store timeout".into()))
    }

    async fn create(&self, _tenant: Tenant) -> Result<Tenant> {
        Err(GateError::UpstreamUnavailable("store timeout".into()))
    }

    async fn update(&self, _id: &TenantId, _patch: TenantPatch) -> Result<Tenant> {
        Err(GateError::UpstreamUnavailable("store timeout".into()))
    }
}

pub fn default_config() -> GateConfig {
    botgate_admission::config::load_from_str("version: 1\n").expect("default config")
}

pub fn runtime_with(
    store: Arc<dyn TenantStore>,
    provisioner: Arc<dyn ControlProvisioner>,
) -> AdmissionRuntime {
    AdmissionRuntime::new(&default_config(), store, provisioner).expect("runtime")
}

pub fn memory_runtime() -> (AdmissionRuntime, Arc<MemoryTenantStore>, Arc<RecordingProvisioner>) {
    let store = Arc::new(MemoryTenantStore::new());
    let provisioner = Arc::new(RecordingProvisioner::default());
    let runtime = runtime_with(store.clone(), provisioner.clone());
    (runtime, store, provisioner)
}

pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
