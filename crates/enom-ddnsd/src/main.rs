// # enom-ddnsd - eNom Dynamic DNS Daemon
//
// This daemon is a thin integration layer. It is responsible for:
// 1. Reading configuration from environment variables
// 2. Initializing logging and the runtime
// 3. Wiring the IP resolver and the configured update strategy
// 4. Running the update engine
//
// All update logic lives in enom-ddns-core and enom-ddns-registrar; this
// binary only assembles and drives it.
//
// ## Configuration
//
// All configuration is done via environment variables:
//
// ### Required
// - `DDNS_DOMAIN`: The managed name, exactly three labels (host.sld.tld)
// - `ENOM_UN`: Registrar account name (sent as `UID`)
// - `ENOM_PW`: Registrar account password (sent as `PW`)
//
// ### Optional
// - `INTERVAL`: Seconds between update cycles (default 600; unparsable
//   or zero values silently fall back to the default)
// - `DDNS_STRATEGY`: Update strategy, `blind` or `diff` (default blind)
// - `DDNS_RUN_MODE`: `loop` to poll forever, `once` for a single update
//   (default loop)
// - `DDNS_INSECURE_TLS`: `1` or `true` to skip registrar TLS certificate
//   verification (default off)
// - `DDNS_LOG_LEVEL`: trace, debug, info, warn, error (default info)
//
// ## Example
//
// ```bash
// export DDNS_DOMAIN=home.example.com
// export ENOM_UN=myaccount
// export ENOM_PW=secret
// export INTERVAL=300
// export DDNS_STRATEGY=diff
//
// enom-ddnsd
// ```

use anyhow::Result;
use enom_ddns_core::config::poll_interval_from;
use enom_ddns_core::{Credentials, DdnsEngine, DomainTarget, HostUpdater, IpResolver, UpdateStrategy};
use enom_ddns_ip_http::HttpIpResolver;
use enom_ddns_registrar::updater_from_config;
use std::env;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

/// Exit codes for different termination scenarios
///
/// These codes follow systemd conventions:
/// - 0: Clean shutdown
/// - 1: Configuration or startup error
/// - 2: Runtime error (unexpected)
#[derive(Debug, Clone, Copy)]
enum DdnsExitCode {
    /// Clean shutdown (normal exit)
    CleanShutdown = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error (unexpected failure)
    RuntimeError = 2,
}

impl From<DdnsExitCode> for ExitCode {
    fn from(code: DdnsExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// How the daemon drives the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunMode {
    /// Poll forever on the configured interval
    Loop,
    /// Run one update cycle and exit
    Once,
}

impl RunMode {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Loop => "loop",
            Self::Once => "once",
        }
    }
}

/// Application configuration
struct Config {
    domain: String,
    username: String,
    password: String,
    poll_interval: Duration,
    strategy: UpdateStrategy,
    run_mode: RunMode,
    insecure_tls: bool,
    log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        let strategy = match env::var("DDNS_STRATEGY") {
            Ok(raw) => UpdateStrategy::parse(&raw)?,
            Err(_) => UpdateStrategy::default(),
        };

        let run_mode = match env::var("DDNS_RUN_MODE")
            .unwrap_or_else(|_| "loop".to_string())
            .as_str()
        {
            "loop" => RunMode::Loop,
            "once" => RunMode::Once,
            other => anyhow::bail!(
                "DDNS_RUN_MODE '{}' is not valid. Valid modes: loop, once",
                other
            ),
        };

        let insecure_tls = matches!(
            env::var("DDNS_INSECURE_TLS")
                .unwrap_or_default()
                .to_lowercase()
                .as_str(),
            "1" | "true"
        );

        Ok(Self {
            domain: env::var("DDNS_DOMAIN").unwrap_or_default(),
            username: env::var("ENOM_UN").unwrap_or_default(),
            password: env::var("ENOM_PW").unwrap_or_default(),
            poll_interval: poll_interval_from(env::var("INTERVAL").ok().as_deref()),
            strategy,
            run_mode,
            insecure_tls,
            log_level: env::var("DDNS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        if self.domain.is_empty() {
            anyhow::bail!(
                "DDNS_DOMAIN is required. \
                Set it via: export DDNS_DOMAIN=home.example.com"
            );
        }
        DomainTarget::parse(&self.domain)?;

        if self.username.is_empty() {
            anyhow::bail!("ENOM_UN is required. Set it via: export ENOM_UN=youraccount");
        }

        if self.password.is_empty() {
            anyhow::bail!("ENOM_PW is required. Set it via: export ENOM_PW=yourpassword");
        }

        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!(
                "DDNS_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }

        Ok(())
    }

    /// Assemble the library configuration
    fn core_config(&self) -> Result<enom_ddns_core::Config> {
        let target = DomainTarget::parse(&self.domain)?;
        let credentials = Credentials::new(self.username.clone(), self.password.clone());

        Ok(enom_ddns_core::Config::new(target, credentials)
            .with_poll_interval(self.poll_interval)
            .with_strategy(self.strategy)
            .with_insecure_tls(self.insecure_tls))
    }
}

fn main() -> ExitCode {
    // Load configuration from environment
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return DdnsExitCode::ConfigError.into();
        }
    };

    // Validate configuration
    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {}", e);
        return DdnsExitCode::ConfigError.into();
    }

    // Initialize tracing
    let log_level = match config.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return DdnsExitCode::ConfigError.into();
    }

    info!("Starting enom-ddnsd");
    info!(
        "Managing {} ({} strategy, {} mode, every {}s)",
        config.domain,
        config.strategy.as_str(),
        config.run_mode.as_str(),
        config.poll_interval.as_secs()
    );

    // Enter tokio runtime
    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return DdnsExitCode::RuntimeError.into();
        }
    };

    let result = rt.block_on(async {
        match run_daemon(config).await {
            Ok(()) => DdnsExitCode::CleanShutdown,
            Err(e) => {
                error!("Daemon error: {}", e);
                match e.downcast_ref::<enom_ddns_core::Error>() {
                    Some(core_error) if core_error.is_fatal() => DdnsExitCode::ConfigError,
                    _ => DdnsExitCode::RuntimeError,
                }
            }
        }
    });

    result.into()
}

/// Wire the engine and run it in the configured mode
async fn run_daemon(config: Config) -> Result<()> {
    let core_config = config.core_config()?;

    let resolver = HttpIpResolver::new();
    let updater = updater_from_config(&core_config)?;

    info!("IP source: {}", resolver.source_name());
    info!("Update strategy: {}", updater.strategy_name());

    let engine = DdnsEngine::new(Box::new(resolver), updater, &core_config)?;

    match config.run_mode {
        RunMode::Once => {
            let outcome = engine.run_once().await?;
            info!(
                "Dynamic DNS updated. {} = {}",
                core_config.target.fqdn(),
                outcome.address()
            );
        }
        RunMode::Loop => run_polling(engine).await?,
    }

    Ok(())
}

/// Run the polling loop until SIGTERM or SIGINT arrives
#[cfg(unix)]
async fn run_polling(engine: DdnsEngine) -> Result<()> {
    let mut sigterm = signal(SignalKind::terminate())
        .map_err(|e| anyhow::anyhow!("Failed to setup SIGTERM handler: {}", e))?;
    let mut sigint = signal(SignalKind::interrupt())
        .map_err(|e| anyhow::anyhow!("Failed to setup SIGINT handler: {}", e))?;

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
    tokio::spawn(async move {
        let signal_name = tokio::select! {
            _ = sigterm.recv() => "SIGTERM",
            _ = sigint.recv() => "SIGINT",
        };
        info!("Received shutdown signal: {}", signal_name);
        let _ = shutdown_tx.send(());
    });

    engine.run_with_shutdown(Some(shutdown_rx)).await?;
    Ok(())
}

/// Run the polling loop until CTRL-C (non-Unix fallback)
#[cfg(not(unix))]
async fn run_polling(engine: DdnsEngine) -> Result<()> {
    engine.run().await?;
    Ok(())
}
