//! PayPal Merchant CLI
//!
//! Command-line interface for preparing and sending PayPal Merchant API calls.
//!
//! # Usage
//!
//! ```bash
//! # List the accounts in the configuration file
//! paypal-merchant --config sdk_config.toml accounts
//!
//! # Show the headers and endpoint for a call, credentials masked
//! paypal-merchant prepare --request GetBalanceReq.xml
//!
//! # Send a call on behalf of a third party
//! paypal-merchant send --request GetBalanceReq.xml --token TOKEN --token-secret SECRET
//! ```

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use commands::{CallArgs, OutputFormat};

#[derive(Parser)]
#[command(name = "paypal-merchant")]
#[command(about = "Prepare and send PayPal Merchant API calls")]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to sdk_config.toml in the platform config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List configured accounts
    Accounts,

    /// Assemble a call and print it without sending
    Prepare {
        #[command(flatten)]
        call: CallArgs,

        /// Output format (text, json)
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Print credential values and the SOAP payload unmasked
        #[arg(long)]
        show_secrets: bool,
    },

    /// Assemble a call and send it
    Send {
        #[command(flatten)]
        call: CallArgs,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Accounts => {
            println!("{}", commands::list_accounts(&config));
        }
        Commands::Prepare {
            call,
            format,
            show_secrets,
        } => {
            let body = commands::read_request(call.request.as_deref())?;
            let prepared = commands::prepare_call(&config, &call, &body)?;
            println!("{}", commands::render_call(&prepared, format, show_secrets)?);
        }
        Commands::Send { call } => {
            let body = commands::read_request(call.request.as_deref())?;
            let prepared = commands::prepare_call(&config, &call, &body)?;
            info!("Sending call to {}", prepared.endpoint);
            let response = commands::send_call(&prepared).await?;
            println!("{}", response);
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
