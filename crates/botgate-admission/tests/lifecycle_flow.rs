#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod common;

use std::time::Duration;

use chrono::Utc;

use botgate_admission::store::TenantStore;
use botgate_core::{
    GateError, InboundRequest, LifecycleState, PrincipalId, ReasonCode, TenantId,
};

use common::memory_runtime;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn join_registers_with_no_expiry_and_provisions() {
    common::init_tracing();
    let (runtime, store, provisioner) = memory_runtime();

    runtime
        .lifecycle()
        .on_workspace_join(TenantId::from("w1"), PrincipalId::from("owner"), "Acme")
        .await
        .unwrap();

    let tenant = store.get(&TenantId::from("w1")).await.unwrap().unwrap();
    assert_eq!(tenant.entitlement_expiry, None);
    assert_eq!(tenant.lifecycle_state(Utc::now()), LifecycleState::Active);
    assert_eq!(tenant.display_name, "Acme");

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(provisioner.call_count(), 1);
}

#[tokio::test]
async fn join_is_idempotent() {
    let (runtime, store, _) = memory_runtime();
    let id = TenantId::from("w1");

    runtime
        .lifecycle()
        .on_workspace_join(id.clone(), PrincipalId::from("owner"), "Acme")
        .await
        .unwrap();
    runtime
        .lifecycle()
        .on_workspace_join(id.clone(), PrincipalId::from("owner"), "Acme")
        .await
        .unwrap();

    assert_eq!(store.len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_joins_produce_one_record() {
    let (runtime, store, _) = memory_runtime();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let rt = runtime.clone();
        handles.push(tokio::spawn(async move {
            rt.lifecycle()
                .on_workspace_join(TenantId::from("w1"), PrincipalId::from("owner"), "Acme")
                .await
        }));
    }
    for h in handles {
        // a lost create race must come back as a no-op, never an error
        h.await.unwrap().unwrap();
    }

    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn explicit_register_conflicts_on_existing_record() {
    let (runtime, _, _) = memory_runtime();
    let id = TenantId::from("w1");

    runtime
        .lifecycle()
        .register(id.clone(), "Acme", PrincipalId::from("owner"))
        .await
        .unwrap();

    let err = runtime
        .lifecycle()
        .register(id, "Acme Again", PrincipalId::from("owner"))
        .await
        .unwrap_err();
    assert!(matches!(err, GateError::Conflict(_)));
}

#[tokio::test]
async fn leave_retains_the_record() {
    let (runtime, store, _) = memory_runtime();
    let id = TenantId::from("w1");

    runtime
        .lifecycle()
        .on_workspace_join(id.clone(), PrincipalId::from("owner"), "Acme")
        .await
        .unwrap();
    runtime.lifecycle().on_workspace_leave(id.clone()).await;

    // re-invitation resumes prior state instead of re-registering
    assert!(store.get(&id).await.unwrap().is_some());
}

#[tokio::test]
async fn extension_moves_expired_back_to_active() {
    let (runtime, store, _) = memory_runtime();
    let id = TenantId::from("w1");

    runtime
        .lifecycle()
        .on_workspace_join(id.clone(), PrincipalId::from("owner"), "Acme")
        .await
        .unwrap();

    // lapse the workspace
    let past = Utc::now() - chrono::Duration::days(1);
    runtime.lifecycle().extend_entitlement(&id, past).await.unwrap();

    let req = InboundRequest::command(id.clone(), PrincipalId::from("u1"), "generic-feature");
    assert_eq!(
        runtime.gate().admit(&req).await.reason(),
        Some(ReasonCode::EntitlementExpired)
    );

    // redemption extends the window; same record, re-entry not re-creation
    let future = Utc::now() + chrono::Duration::days(30);
    let tenant = runtime.lifecycle().extend_entitlement(&id, future).await.unwrap();
    assert_eq!(tenant.lifecycle_state(Utc::now()), LifecycleState::Active);
    assert_eq!(store.len(), 1);

    assert!(runtime.gate().admit(&req).await.is_allow());
}

#[tokio::test]
async fn extension_for_unknown_workspace_fails() {
    let (runtime, _, _) = memory_runtime();
    let err = runtime
        .lifecycle()
        .extend_entitlement(&TenantId::from("w-unknown"), Utc::now())
        .await
        .unwrap_err();
    assert!(matches!(err, GateError::NotRegistered));
}
