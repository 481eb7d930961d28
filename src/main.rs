//! CLI entry point for the httpget tool.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use httpget_core::{determine_exit_outcome, diagnostics, driver};
use tracing::debug;

mod cli;

use cli::{Args, normalize_flag_syntax};

fn main() -> Result<ExitCode> {
    // Parse CLI arguments first (before tracing, so -h works without logs)
    let args = Args::parse_from(normalize_flag_syntax(std::env::args_os()));

    // RUST_LOG wins; otherwise only warnings. Logs go to stderr so they
    // never interleave with the response body on stdout.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");

    let mut diagnostics = diagnostics::for_verbosity(args.verbose);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let result = args.into_config().and_then(|config| {
        runtime.block_on(async {
            let mut stdout = tokio::io::stdout();
            driver::run(&config, &mut stdout, diagnostics.as_mut()).await
        })
    });

    // Errors are printed to stdout, alongside all other output.
    if let Err(error) = &result {
        diagnostics.error(error);
        println!("{error}");
    }

    Ok(determine_exit_outcome(&result).into())
}
