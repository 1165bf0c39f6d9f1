//! `idemp` command line
//!
//! Operator tool for inspecting and manipulating lock records in the
//! configured store, and for computing invocation keys offline.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use idemp_application::{Acquisition, FingerprintGenerator, LockCoordinator};
use idemp_domain::value_objects::{CallDescriptor, InvocationKey, LockToken};
use idemp_infrastructure::bootstrap::{connect_store, coordinator_for};
use idemp_infrastructure::config::{AppConfig, ConfigLoader};
use idemp_infrastructure::logging::init_logging;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

/// Command line interface for idemp
#[derive(Parser, Debug)]
#[command(name = "idemp")]
#[command(about = "Distributed idempotency gate - lock store tooling")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at the configured level instead of warnings only
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Acquire a lock record by its exact key and print the owner token
    Lock {
        /// Lock record key, used verbatim
        key: String,
        /// Lock lifetime in milliseconds (defaults to the configured TTL)
        #[arg(long)]
        ttl_ms: Option<u64>,
    },
    /// Print the value stored under a key
    Get {
        /// Lock record key
        key: String,
    },
    /// Delete a lock record if it still holds the given token
    Release {
        /// Lock record key
        key: String,
        /// Owner token printed by `lock`
        token: String,
    },
    /// Compute the invocation key of a call
    Fingerprint {
        /// Target identity (e.g. a fully qualified type name)
        target: String,
        /// Operation name
        operation: String,
        /// Arguments in call order, each a JSON value
        args: Vec<String>,
    },
    /// Print the effective configuration as TOML
    Config,
}

/// Run a parsed command line
///
/// Exit status 1 means the operation was refused (lock held, record
/// absent, token mismatch); errors are reported through `Err`.
pub async fn run(cli: Cli) -> Result<ExitCode> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    let config = loader.load().context("Failed to load configuration")?;

    let mut logging = config.logging.clone();
    if !cli.verbose {
        logging.level = "warn".to_string();
    }
    init_logging(logging).context("Failed to initialize logging")?;

    match cli.command {
        Command::Lock { key, ttl_ms } => {
            let ttl = ttl_ms
                .map(Duration::from_millis)
                .unwrap_or_else(|| config.lock.default_ttl());
            if ttl.is_zero() {
                bail!("--ttl-ms must be greater than 0");
            }
            let coordinator = coordinator(&config).await?;
            match coordinator.acquire(&InvocationKey::new(key), ttl).await {
                Acquisition::Acquired(token) => {
                    println!("{token}");
                    Ok(ExitCode::SUCCESS)
                }
                Acquisition::Blocked => {
                    eprintln!("lock is held");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Command::Get { key } => {
            let coordinator = coordinator(&config).await?;
            match coordinator.get(&key).await {
                Some(value) => {
                    println!("{value}");
                    Ok(ExitCode::SUCCESS)
                }
                None => {
                    eprintln!("no record");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Command::Release { key, token } => {
            let coordinator = coordinator(&config).await?;
            if coordinator
                .release(&InvocationKey::new(key), &LockToken::from(token))
                .await
            {
                println!("released");
                Ok(ExitCode::SUCCESS)
            } else {
                eprintln!("not released: record absent or held by another token");
                Ok(ExitCode::FAILURE)
            }
        }
        Command::Fingerprint {
            target,
            operation,
            args,
        } => {
            let key = fingerprint(&config, target, operation, &args)?;
            println!("{key}");
            Ok(ExitCode::SUCCESS)
        }
        Command::Config => {
            let rendered = loader
                .to_toml(&config)
                .context("Failed to render configuration")?;
            print!("{rendered}");
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Compute the key the gate would use for a call with JSON arguments
pub fn fingerprint(
    config: &AppConfig,
    target: String,
    operation: String,
    args: &[String],
) -> Result<InvocationKey> {
    let mut call = CallDescriptor::new(target, operation);
    for (index, arg) in args.iter().enumerate() {
        let value: serde_json::Value = serde_json::from_str(arg)
            .with_context(|| format!("Argument {index} is not valid JSON: {arg}"))?;
        call = call.with_value(value);
    }

    let generator = match &config.lock.namespace {
        Some(namespace) => FingerprintGenerator::with_namespace(namespace.clone()),
        None => FingerprintGenerator::new(),
    };
    Ok(generator.fingerprint(&call)?)
}

async fn coordinator(config: &AppConfig) -> Result<LockCoordinator> {
    let store = connect_store(&config.store)
        .await
        .context("Failed to connect to the lock store")?;
    Ok(coordinator_for(config, store))
}
