//! Behavior Contract Test: Polling Resilience
//!
//! This test verifies that the polling loop outlives failing cycles.
//!
//! Constraints verified:
//! - A failing resolver does not terminate the loop
//! - A failing updater does not terminate the loop
//! - Cycles keep firing on the configured interval after failures
//! - No retry happens inside a cycle (one resolver call, at most one
//!   updater call, per cycle)
//!
//! If this test fails, someone has added:
//! - Error propagation out of the polling loop
//! - Retry or backoff logic inside a cycle

mod common;

use common::*;
use enom_ddns_core::DdnsEngine;
use std::time::Duration;

#[tokio::test]
async fn loop_survives_resolver_failures() {
    let resolver = FailingResolver::new();
    let updater = RecordingUpdater::new();

    let engine = DdnsEngine::new(
        Box::new(FailingResolver::sharing_counters_with(&resolver)),
        Box::new(RecordingUpdater::sharing_counters_with(&updater)),
        &test_config("home.example.com"),
    )
    .expect("engine construction succeeds");

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    let engine_handle =
        tokio::spawn(async move { engine.run_with_shutdown(Some(shutdown_rx)).await });

    // Long enough for several 20ms cycles
    tokio::time::sleep(Duration::from_millis(150)).await;

    shutdown_tx.send(()).unwrap();
    let engine_result = engine_handle.await.unwrap();

    assert!(
        engine_result.is_ok(),
        "failing cycles must not surface from the loop: {:?}",
        engine_result
    );
    assert!(
        resolver.resolve_call_count() >= 2,
        "loop should keep polling after failures, got {} cycles",
        resolver.resolve_call_count()
    );
    assert_eq!(
        updater.update_call_count(),
        0,
        "updater must never run while resolution fails"
    );
}

#[tokio::test]
async fn loop_survives_updater_failures() {
    let resolver = FixedResolver::new("203.0.113.5");
    let updater = FailingUpdater::new();

    let engine = DdnsEngine::new(
        Box::new(FixedResolver::sharing_counters_with(&resolver)),
        Box::new(FailingUpdater::sharing_counters_with(&updater)),
        &test_config("home.example.com"),
    )
    .expect("engine construction succeeds");

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    let engine_handle =
        tokio::spawn(async move { engine.run_with_shutdown(Some(shutdown_rx)).await });

    tokio::time::sleep(Duration::from_millis(150)).await;

    shutdown_tx.send(()).unwrap();
    let engine_result = engine_handle.await.unwrap();

    assert!(engine_result.is_ok());
    assert!(
        updater.update_call_count() >= 2,
        "loop should keep polling after rejections, got {} cycles",
        updater.update_call_count()
    );
    // One resolver call per updater call: no retries hide inside a cycle
    assert_eq!(resolver.resolve_call_count(), updater.update_call_count());
}

#[tokio::test]
async fn healthy_loop_pushes_every_cycle() {
    let resolver = FixedResolver::new("203.0.113.5");
    let updater = RecordingUpdater::new();

    let engine = DdnsEngine::new(
        Box::new(FixedResolver::sharing_counters_with(&resolver)),
        Box::new(RecordingUpdater::sharing_counters_with(&updater)),
        &test_config("home.example.com"),
    )
    .expect("engine construction succeeds");

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    let engine_handle =
        tokio::spawn(async move { engine.run_with_shutdown(Some(shutdown_rx)).await });

    tokio::time::sleep(Duration::from_millis(150)).await;

    shutdown_tx.send(()).unwrap();
    engine_handle.await.unwrap().unwrap();

    let addresses = updater.updated_addresses();
    assert!(
        addresses.len() >= 2,
        "expected repeated cycles, got {addresses:?}"
    );
    assert!(addresses.iter().all(|a| a == "203.0.113.5"));
}
