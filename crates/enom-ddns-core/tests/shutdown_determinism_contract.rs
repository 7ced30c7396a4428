//! Behavior Contract Test: Shutdown Determinism
//!
//! This test verifies that shutdown is deterministic and complete.
//!
//! Constraints verified:
//! - The polling loop terminates on shutdown signal
//! - Shutdown interrupts the inter-cycle sleep, however long it is
//! - Repeated signals are harmless
//!
//! If this test fails, someone has added:
//! - Detached background tasks
//! - Sleeps outside the select
//! - Blocking operations in the shutdown path

mod common;

use common::*;
use enom_ddns_core::DdnsEngine;
use std::time::Duration;

#[tokio::test]
async fn shutdown_signal_terminates_polling_loop() {
    let engine = DdnsEngine::new(
        Box::new(FixedResolver::new("203.0.113.5")),
        Box::new(RecordingUpdater::new()),
        &test_config("home.example.com"),
    )
    .expect("engine construction succeeds");

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    let engine_handle =
        tokio::spawn(async move { engine.run_with_shutdown(Some(shutdown_rx)).await });

    // Wait for the first cycle to complete
    tokio::time::sleep(Duration::from_millis(50)).await;

    let shutdown_result = shutdown_tx.send(());
    assert!(shutdown_result.is_ok(), "shutdown signal send succeeds");

    let result = tokio::time::timeout(Duration::from_secs(5), engine_handle).await;

    assert!(result.is_ok(), "Engine should terminate within 5 seconds");

    let engine_result = result.unwrap().unwrap();
    assert!(
        engine_result.is_ok(),
        "Engine should shut down successfully: {:?}",
        engine_result
    );
}

#[tokio::test]
async fn shutdown_interrupts_a_long_sleep() {
    // A ten minute poll interval must not delay shutdown by ten minutes.

    let config = test_config("home.example.com").with_poll_interval(Duration::from_secs(600));

    let engine = DdnsEngine::new(
        Box::new(FixedResolver::new("203.0.113.5")),
        Box::new(RecordingUpdater::new()),
        &config,
    )
    .expect("engine construction succeeds");

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    let engine_handle =
        tokio::spawn(async move { engine.run_with_shutdown(Some(shutdown_rx)).await });

    tokio::time::sleep(Duration::from_millis(50)).await;

    shutdown_tx.send(()).unwrap();

    let result = tokio::time::timeout(Duration::from_secs(5), engine_handle).await;

    assert!(
        result.is_ok(),
        "Engine should terminate promptly while mid-sleep"
    );
    assert!(result.unwrap().unwrap().is_ok());
}

#[tokio::test]
async fn exactly_one_cycle_runs_before_an_immediate_shutdown() {
    // The first cycle fires on startup, before the first sleep. With a
    // long interval and a prompt shutdown there is exactly one.

    let resolver = FixedResolver::new("203.0.113.5");
    let updater = RecordingUpdater::new();
    let config = test_config("home.example.com").with_poll_interval(Duration::from_secs(600));

    let engine = DdnsEngine::new(
        Box::new(FixedResolver::sharing_counters_with(&resolver)),
        Box::new(RecordingUpdater::sharing_counters_with(&updater)),
        &config,
    )
    .expect("engine construction succeeds");

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    let engine_handle =
        tokio::spawn(async move { engine.run_with_shutdown(Some(shutdown_rx)).await });

    tokio::time::sleep(Duration::from_millis(50)).await;

    shutdown_tx.send(()).unwrap();
    engine_handle.await.unwrap().unwrap();

    assert_eq!(resolver.resolve_call_count(), 1);
    assert_eq!(updater.update_call_count(), 1);
}

#[tokio::test]
async fn multiple_shutdown_calls_are_safe() {
    let engine = DdnsEngine::new(
        Box::new(FixedResolver::new("203.0.113.5")),
        Box::new(RecordingUpdater::new()),
        &test_config("home.example.com"),
    )
    .expect("engine construction succeeds");

    let (shutdown_tx1, shutdown_rx1) = tokio::sync::oneshot::channel();
    let (shutdown_tx2, _shutdown_rx2) = tokio::sync::oneshot::channel();

    let engine_handle =
        tokio::spawn(async move { engine.run_with_shutdown(Some(shutdown_rx1)).await });

    tokio::time::sleep(Duration::from_millis(50)).await;

    // Send first shutdown
    shutdown_tx1.send(()).unwrap();

    // Send second shutdown (should be ignored)
    let _ = shutdown_tx2.send(());

    let result = tokio::time::timeout(Duration::from_secs(5), engine_handle).await;

    assert!(
        result.is_ok(),
        "Multiple shutdown signals should not cause issues"
    );
}
