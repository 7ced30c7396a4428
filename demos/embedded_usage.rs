//! Minimal embedding example for enom-ddns-core
//!
//! This example demonstrates using enom-ddns-core as a library in a custom
//! application. The engine lifecycle is fully managed by the application.

use enom_ddns_core::{
    Config, Credentials, DdnsEngine, DomainTarget, HostUpdater, IpResolver, Result, UpdateOutcome,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Custom IP resolver for embedded usage
struct EmbeddedResolver {
    address: String,
}

#[async_trait::async_trait]
impl IpResolver for EmbeddedResolver {
    async fn resolve(&self) -> Result<String> {
        Ok(self.address.clone())
    }

    fn source_name(&self) -> &'static str {
        "embedded"
    }
}

/// Custom updater that records calls instead of talking to a registrar
struct EmbeddedUpdater {
    update_calls: Arc<AtomicUsize>,
}

impl EmbeddedUpdater {
    fn new() -> Self {
        Self {
            update_calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait::async_trait]
impl HostUpdater for EmbeddedUpdater {
    async fn update_host(&self, target: &DomainTarget, address: &str) -> Result<UpdateOutcome> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        println!("[Embedded] Updating {} -> {}", target, address);

        Ok(UpdateOutcome::Updated {
            previous: None,
            address: address.to_string(),
        })
    }

    fn strategy_name(&self) -> &'static str {
        "embedded"
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    println!("=== Embedded enom-ddns-core Example ===\n");

    // Create custom components
    let resolver = EmbeddedResolver {
        address: "203.0.113.5".to_string(),
    };
    let updater = EmbeddedUpdater::new();
    let update_calls = updater.update_calls.clone();

    // Create configuration
    let target = DomainTarget::parse("home.example.com")?;
    let config = Config::new(target, Credentials::new("demo-account", "demo-secret"))
        .with_poll_interval(Duration::from_millis(50));

    // Create engine
    println!("1. Creating engine...");
    let engine = DdnsEngine::new(Box::new(resolver), Box::new(updater), &config)?;

    // Run a single cycle first
    println!("2. Running one cycle...");
    let outcome = engine.run_once().await?;
    println!("   Outcome: {:?}\n", outcome);

    // Run the polling loop with an application-controlled shutdown
    println!("3. Starting polling loop in background...");
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
    let engine_handle =
        tokio::spawn(async move { engine.run_with_shutdown(Some(shutdown_rx)).await });

    // Let the engine poll while the application does other work
    tokio::time::sleep(Duration::from_millis(200)).await;
    println!("\n4. Engine is running. Application can do other work here.");
    println!("   (Engine lifecycle is fully managed by application)\n");

    // Stop the engine through the shutdown channel
    println!("5. Stopping engine...");
    let _ = shutdown_tx.send(());
    engine_handle.await.expect("engine task panicked")?;

    println!(
        "\n6. Engine stopped cleanly after {} update call(s).",
        update_calls.load(Ordering::SeqCst)
    );
    println!("\n=== Embedding Successful ===");
    println!("Key Points:");
    println!("- Engine lifecycle is fully controlled by application");
    println!("- Resolver and updater are custom (not the shipped defaults)");
    println!("- No global state, no reliance on process lifecycle");

    Ok(())
}
