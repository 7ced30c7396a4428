// # eNom Registrar Real Environment Validation Tool
//
// Drives the registrar client against the live eNom API with real account
// credentials. The default mode only reads; live mode writes DNS records.
//
// ## Usage
//
// ```bash
// # Read-only mode (default - safe): lists the zone and plans the update
// DDNS_DOMAIN=home.example.com \
// ENOM_UN=youraccount \
// ENOM_PW=yourpassword \
// DDNS_TEST_IP=203.0.113.5 \
// cargo run --bin registrar_validation
//
// # Live mode (makes actual changes!)
// DDNS_MODE=live \
// DDNS_DOMAIN=home.example.com \
// ENOM_UN=youraccount \
// ENOM_PW=yourpassword \
// DDNS_TEST_IP=203.0.113.5 \
// cargo run --bin registrar_validation
// ```
//
// ## Environment Variables
//
// Required:
// - `DDNS_DOMAIN`: Managed name, exactly three labels (host.sld.tld)
// - `ENOM_UN`: Registrar account name
// - `ENOM_PW`: Registrar account password
// - `DDNS_TEST_IP`: Address to write in live mode
//
// Optional:
// - `DDNS_MODE`: "read-only" or "live" (default: read-only)
// - `DDNS_INSECURE_TLS`: "1" or "true" to skip TLS verification

use enom_ddns_core::{Credentials, DomainTarget, HostUpdater, UpdateOutcome, plan_update};
use enom_ddns_registrar::{DiffReplaceUpdater, EnomClient};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    tracing::info!("=== eNom Registrar Real Environment Validation ===");

    // Read environment variables
    let domain = env::var("DDNS_DOMAIN").unwrap_or_else(|_| {
        tracing::error!("DDNS_DOMAIN environment variable is required");
        std::process::exit(1);
    });

    let username = env::var("ENOM_UN").unwrap_or_else(|_| {
        tracing::error!("ENOM_UN environment variable is required");
        std::process::exit(1);
    });

    let password = env::var("ENOM_PW").unwrap_or_else(|_| {
        tracing::error!("ENOM_PW environment variable is required");
        std::process::exit(1);
    });

    let test_ip = env::var("DDNS_TEST_IP").unwrap_or_else(|_| {
        tracing::error!("DDNS_TEST_IP environment variable is required");
        std::process::exit(1);
    });

    let mode = env::var("DDNS_MODE").unwrap_or_else(|_| "read-only".to_string());
    let live = mode.to_lowercase() == "live";

    let insecure_tls = matches!(
        env::var("DDNS_INSECURE_TLS")
            .unwrap_or_default()
            .to_lowercase()
            .as_str(),
        "1" | "true"
    );

    if live {
        tracing::warn!("Running in LIVE mode - will make actual DNS changes!");
    } else {
        tracing::warn!("Running in READ-ONLY mode - no changes will be made");
    }

    tracing::info!("Configuration:");
    tracing::info!("  Domain: {}", domain);
    tracing::info!("  Test IP: {}", test_ip);
    tracing::info!("  Mode: {}", mode);

    let target = DomainTarget::parse(&domain)?;

    // Step 1: create the client
    tracing::info!("--- Step 1: Creating Registrar Client ---");
    let client = EnomClient::new(Credentials::new(username, password), insecure_tls);
    tracing::info!("Client created (credentials not shown for security)");

    // Step 2: list the zone (read-only)
    tracing::info!("--- Step 2: Listing Zone Records ---");
    let records = match client.get_hosts(&target).await {
        Ok(records) => {
            tracing::info!(
                "✓ GetHosts succeeded: {} record(s) in {}",
                records.len(),
                target.zone()
            );
            records
        }
        Err(e) => {
            tracing::error!("✗ GetHosts failed: {}", e);
            std::process::exit(1);
        }
    };

    for record in &records {
        tracing::info!(
            "  {} {} {}",
            if record.name.is_empty() {
                "(apex)"
            } else {
                &record.name
            },
            record.record_type,
            record.address
        );
    }

    // Step 3: plan the rewrite without writing anything
    tracing::info!("--- Step 3: Planning Update ---");
    let plan = plan_update(&records, target.host(), &test_ip);
    tracing::info!("  Plan: {:?}", plan.outcome);
    if !plan.needs_write() {
        tracing::info!("✓ Record already current; a diff cycle would write nothing");
    }

    if !live {
        tracing::info!("=== READ-ONLY COMPLETE ===");
        tracing::info!("No changes were made to DNS records.");
        tracing::info!("To make actual changes, set DDNS_MODE=live");
        return Ok(());
    }

    // Step 4: live update through the diff strategy
    tracing::info!("--- Step 4: Applying Update (LIVE) ---");
    let updater = DiffReplaceUpdater::new(client);
    match updater.update_host(&target, &test_ip).await {
        Ok(outcome) => tracing::info!("✓ Update succeeded: {:?}", outcome),
        Err(e) => {
            tracing::error!("✗ Update failed: {}", e);
            std::process::exit(1);
        }
    }

    // Step 5: idempotency check (update again with the same address)
    tracing::info!("--- Step 5: Testing Idempotency ---");
    match updater.update_host(&target, &test_ip).await {
        Ok(UpdateOutcome::Unchanged { .. }) => {
            tracing::info!("✓ Idempotency verified (unchanged as expected)");
        }
        Ok(other) => {
            tracing::warn!("⚠ Second update reported {:?} (expected Unchanged)", other);
        }
        Err(e) => {
            tracing::error!("✗ Idempotency test failed: {}", e);
            std::process::exit(1);
        }
    }

    tracing::info!("=== LIVE MODE COMPLETE ===");
    tracing::info!("Verify at: https://dnschecker.org/#A/{}", target.fqdn());

    Ok(())
}
