//! AuthProbe CLI - Main Entry Point
//!
//! Generates test identities, provisions accounts against the application
//! under test and prints the outcome a login attempt is expected to show.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod output;

use authprobe_common::HarnessConfig;
use commands::{expect, generate, init, provision, status};

/// AuthProbe CLI - login-flow test accounts and expected outcomes
#[derive(Parser)]
#[command(name = "authprobe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file
    #[arg(short, long, default_value_os_t = authprobe_common::default_config_path(), global = true)]
    config: PathBuf,

    /// Base URL of the application under test (overrides the config file)
    #[arg(long, env = "AUTHPROBE_BASE_URL", global = true)]
    base_url: Option<String>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print fresh identities without registering them
    Generate(generate::GenerateArgs),

    /// Register a fresh account with the given status
    Provision(provision::ProvisionArgs),

    /// Print the outcome a login attempt is expected to show
    Expect(expect::ExpectArgs),

    /// Check that the application under test is answering
    Status,

    /// Write the effective configuration to the config file
    Init(init::InitArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut config = HarnessConfig::load(&cli.config)?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }

    match cli.command {
        Commands::Generate(args) => generate::execute(args, &config, cli.format)?,
        Commands::Provision(args) => provision::execute(args, &config, cli.format).await?,
        Commands::Expect(args) => expect::execute(args, &config, cli.format)?,
        Commands::Status => {
            if !status::execute(&config, cli.format).await? {
                std::process::exit(1);
            }
        }
        Commands::Init(args) => init::execute(args, &config, &cli.config)?,
    }

    Ok(())
}
