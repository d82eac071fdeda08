//! Shared wiring for the admission stack.
//!
//! Construct once at startup from validated config plus the two external
//! collaborators (tenant store, provisioner), then hand clones to the
//! request pipeline. Startup errors are explicit; bad bypass config fails
//! the boot instead of silently gating nothing.

use std::sync::Arc;

use botgate_core::Result;

use crate::authz::RoleAuthorizer;
use crate::config::GateConfig;
use crate::gate::EntitlementGate;
use crate::lifecycle::LifecycleManager;
use crate::obs::GateMetrics;
use crate::policy::BypassRules;
use crate::provision::ControlProvisioner;
use crate::store::TenantStore;

#[derive(Clone)]
pub struct AdmissionRuntime {
    gate: Arc<EntitlementGate>,
    lifecycle: Arc<LifecycleManager>,
    authorizer: Arc<RoleAuthorizer>,
    metrics: Arc<GateMetrics>,
}

impl AdmissionRuntime {
    pub fn new(
        cfg: &GateConfig,
        store: Arc<dyn TenantStore>,
        provisioner: Arc<dyn ControlProvisioner>,
    ) -> Result<Self> {
        cfg.validate()?;
        let rules = BypassRules::compile(&cfg.bypass)?;
        let metrics = Arc::new(GateMetrics::default());

        let gate = Arc::new(EntitlementGate::new(
            Arc::clone(&store),
            Arc::clone(&provisioner),
            rules,
            cfg.admission.unregistered,
            Arc::clone(&metrics),
        ));
        let lifecycle = Arc::new(LifecycleManager::new(
            store,
            provisioner,
            Arc::clone(&metrics),
        ));
        let authorizer = Arc::new(RoleAuthorizer::new(Arc::clone(&metrics)));

        Ok(Self {
            gate,
            lifecycle,
            authorizer,
            metrics,
        })
    }

    pub fn gate(&self) -> &EntitlementGate {
        &self.gate
    }

    pub fn lifecycle(&self) -> &LifecycleManager {
        &self.lifecycle
    }

    pub fn authorizer(&self) -> &RoleAuthorizer {
        &self.authorizer
    }

    pub fn metrics(&self) -> &GateMetrics {
        &self.metrics
    }
}
