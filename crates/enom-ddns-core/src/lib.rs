// # enom-ddns-core
//
// Core library for the eNom dynamic DNS updater.
//
// ## Architecture Overview
//
// This library provides the core functionality for keeping one host
// record pointed at the caller's current public address:
// - **IpResolver**: Trait for discovering the public address
// - **HostUpdater**: Trait for pushing it to the registrar
// - **plan_update**: Pure record-set planning for the diff strategy
// - **DdnsEngine**: Orchestrates the resolve → update cycle
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Core logic never touches HTTP, XML, or
//    the process environment; implementation crates do
// 2. **Sequential**: One cycle at a time, one request in flight at a time
// 3. **Stateless**: The registrar is the single source of truth; nothing
//    is cached or persisted between cycles
// 4. **Library-First**: The daemon is one consumer; embedding the engine
//    with custom trait implementations is equally supported

pub mod config;
pub mod engine;
pub mod error;
pub mod plan;
pub mod record;
pub mod traits;

// Re-export core types for convenience
pub use config::{Config, Credentials, DomainTarget, UpdateStrategy};
pub use engine::DdnsEngine;
pub use error::{Error, Result};
pub use plan::{PlanOutcome, UpdatePlan, plan_update};
pub use record::{DnsRecord, RECORD_TYPE_A};
pub use traits::{HostUpdater, IpResolver, UpdateOutcome};
