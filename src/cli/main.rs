// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * tokenaudit - Session Token Auditor
 * Runs the token test battery against a configured login form,
 * or calibrates the battery against random strings
 *
 * (c) 2026 Bountyy Oy
 */

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::{error, info, Level};

use session_token_auditor::adapters::random_strings::{DEFAULT_ALPHABET, DEFAULT_TOKEN_LENGTH};
use session_token_auditor::adapters::{HttpFormAdapter, RandomStringAdapter};
use session_token_auditor::config::load_config;
use session_token_auditor::engine::{AuditEngine, FaultPolicy};
use session_token_auditor::scanners::registry::CALIBRATION_TESTS;
use session_token_auditor::scanners::TestRegistry;
use session_token_auditor::types::{Credential, CredentialSet, RunSummary, Verbosity};

/// Session token weakness tests against a login-protected target
#[derive(Parser)]
#[command(name = "tokenaudit")]
#[command(author = "Bountyy Oy <info@bountyy.fi>")]
#[command(version)]
#[command(about = "Flags static, sequential, persistent, forgeable and non-random session tokens", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Console verbosity: -v shows diagnostics, -vv also shows test progress
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Also print the run summary as JSON
    #[arg(long, value_enum, default_value = "text", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the test battery against the target described by a config file
    Scan {
        /// Config file (.toml, .yaml, .json)
        #[arg(short, long, env = "AUDIT_CONFIG")]
        config: PathBuf,

        /// Keep going when a test hits an adapter fault
        #[arg(long)]
        isolate_faults: bool,

        /// Tokens collected for the randomness tests
        #[arg(long)]
        sample_size: Option<usize>,
    },

    /// Run the static, sequential and randomness tests against random strings
    Calibrate {
        /// Token length in characters
        #[arg(short, long, default_value_t = DEFAULT_TOKEN_LENGTH)]
        length: usize,

        /// Characters tokens are drawn from
        #[arg(short, long, default_value = DEFAULT_ALPHABET)]
        alphabet: String,

        /// Tokens collected for the randomness tests
        #[arg(long, default_value_t = 10)]
        sample_size: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.debug { Level::DEBUG } else { Level::WARN };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(log_level.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    // Tests are strictly sequential, a single-threaded runtime is enough
    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to start runtime: {}", e);
            std::process::exit(2);
        }
    };

    if let Err(e) = runtime.block_on(async_main(cli)) {
        error!("[Audit] Run aborted: {:#}", e);
        eprintln!("[-] {:#}", e);
        std::process::exit(1);
    }
}

async fn async_main(cli: Cli) -> Result<()> {
    let cli_verbosity = verbosity_from_flags(cli.verbose);

    let summary = match cli.command {
        Commands::Scan {
            config,
            isolate_faults,
            sample_size,
        } => {
            let config = load_config(&config)
                .with_context(|| format!("Failed to load {}", config.display()))?;

            let credentials = config.credential_set()?;
            let verbosity = config.effective_verbosity(cli_verbosity);
            let fault_policy = if isolate_faults { FaultPolicy::Isolate } else { config.fault_policy };

            info!("[Audit] Target {}", config.target.base_url());
            let adapter = HttpFormAdapter::new(config.target.clone())?;

            AuditEngine::new(adapter, credentials, verbosity)
                .with_registry(TestRegistry::default_battery().without(&config.disabled_tests))
                .with_fault_policy(fault_policy)
                .with_sample_size(sample_size.unwrap_or(config.sample_size))
                .run()
                .await?
        }

        Commands::Calibrate {
            length,
            alphabet,
            sample_size,
        } => {
            let adapter = RandomStringAdapter::new(&alphabet, length)?;
            let credentials = CredentialSet::new(vec![Credential::new()])?;

            AuditEngine::new(adapter, credentials, cli_verbosity.unwrap_or(Verbosity::High))
                .with_registry(TestRegistry::default_battery().only(CALIBRATION_TESTS))
                .with_sample_size(sample_size)
                .run()
                .await?
        }
    };

    if let OutputFormat::Json = cli.output {
        print_json(&summary)?;
    }

    Ok(())
}

/// `-v` shows diagnostics, `-vv` and beyond also progress; no flag defers to the config
fn verbosity_from_flags(count: u8) -> Option<Verbosity> {
    (count > 0).then(|| Verbosity::from_level(count.saturating_add(1)))
}

fn print_json(summary: &RunSummary) -> Result<()> {
    let json = serde_json::to_string_pretty(summary).context("Failed to serialize run summary")?;
    println!("{}", json);
    Ok(())
}
