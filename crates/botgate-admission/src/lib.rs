//! botgate admission engine.
//!
//! This crate wires the tenant store contract, lifecycle manager, entitlement
//! gate, role authorization resolver, and bypass policy into a cohesive
//! admission stack. It is a library-level contract consumed in-process by the
//! surrounding request pipeline; it owns no wire format.

pub mod authz;
pub mod config;
pub mod gate;
pub mod lifecycle;
pub mod obs;
pub mod policy;
pub mod provision;
pub mod runtime;
pub mod store;

pub use authz::{authorize, AuthzOutcome, RequestGuard, RoleAuthorizer};
pub use gate::EntitlementGate;
pub use lifecycle::LifecycleManager;
pub use runtime::AdmissionRuntime;
