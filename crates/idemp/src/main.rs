//! idemp - Entry Point
//!
//! Binary entry point for the `idemp` operator tool.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `idemp lock <key> [--ttl-ms N]` | Acquire a record, print its token |
//! | `idemp get <key>` | Print a record's value |
//! | `idemp release <key> <token>` | Compare-and-delete a record |
//! | `idemp fingerprint <target> <op> [json...]` | Compute an invocation key |
//! | `idemp config` | Print the effective configuration |

use clap::Parser;
use idemp::cli::{Cli, run};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    run(cli).await
}
