//! Tagger CLI entry point

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tagger::commands::{self, CommandContext};
use tagger::{Cli, TaggerConfig, TaggerError};

fn main() -> ExitCode {
    match run() {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            if let TaggerError::PartialFailure {
                output, failures, ..
            } = &e
            {
                print!("{}", output);
                for failure in failures {
                    eprintln!("{}", failure);
                }
            }
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

fn run() -> tagger::Result<String> {
    let cli = Cli::parse();
    let operation = cli.operation()?;

    let cwd = std::env::current_dir()?;
    let root = commands::resolve_root(cli.root.as_deref(), &cwd)?;

    let mut config = TaggerConfig::load(&root)?;
    init_logging(cli.verbose, &config.logging.level);

    if let Some(policy) = cli.duplicate_override() {
        config.index.duplicates = policy;
    }
    if let Some(addr) = &cli.addr {
        config.server.addr = addr.clone();
    }

    tracing::debug!("root: {}", root.display());
    let ctx = CommandContext::new(&root, &cwd, config, cli.format, cli.verbose)?;
    commands::run_operation(&operation, &ctx)
}

/// Logs go to stderr so stdout stays parseable.
///
/// `RUST_LOG` wins, then `--verbose`, then the configured level.
fn init_logging(verbose: bool, configured: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { configured };
        EnvFilter::new(format!("tagger={},tower_http={}", level, level))
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
