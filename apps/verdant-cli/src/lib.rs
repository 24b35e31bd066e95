//! # Verdant CLI Library
//!
//! Thin shell around `verdant-core`: it sets up logging, reads configuration,
//! owns the cart behind a mutex and turns command-line operations into cart
//! commands.
//!
//! ## Module Organization
//! ```text
//! verdant_cli_lib/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cart.rs     ◄─── SharedCart (Arc<Mutex<CartStore>>)
//! │   └── config.rs   ◄─── AppConfig from VERDANT_* variables
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   └── cart.rs     ◄─── Cart commands & operation scripts
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod state;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use verdant_core::CostPolicy;

use commands::cart::{apply, get_cart, load_cart, parse_operations, CartResponse};
use error::ApiError;
use state::{AppConfig, SharedCart};

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "verdant")]
#[command(about = "Inspect and change a shopping cart, printing the result as JSON")]
pub struct Args {
    /// Cart file: a JSON array of {name, image, cost, quantity}
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Malformed cost handling: "propagate" or "exclude" (overrides VERDANT_COST_POLICY)
    #[arg(short, long)]
    pub policy: Option<CostPolicy>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Operations applied in order: inc NAME, dec NAME, rm NAME, set NAME QTY, clear
    pub operations: Vec<String>,
}

/// Runs the CLI.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Parse arguments                                                     │
/// │  2. Initialize logging (stderr, RUST_LOG or --verbose)                  │
/// │  3. Load AppConfig from the environment                                 │
/// │  4. Create SharedCart (uninitialized)                                   │
/// │  5. Load the cart file, if given                                        │
/// │  6. Apply operations, print the final CartResponse                      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match execute(&args) {
        Ok(response) => match serde_json::to_string_pretty(&response) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                error!(error = %err, "failed to serialize cart response");
                ExitCode::FAILURE
            }
        },
        Err(err) => {
            error!(code = ?err.code, "{}", err.message);
            if let Ok(json) = serde_json::to_string(&err) {
                eprintln!("{json}");
            }
            ExitCode::FAILURE
        }
    }
}

/// Executes the arguments against a fresh cart.
pub fn execute(args: &Args) -> Result<CartResponse, ApiError> {
    let mut config = AppConfig::from_env()?;
    if let Some(policy) = args.policy {
        config.cost_policy = policy;
    }

    let operations = parse_operations(&args.operations)?;
    let cart = SharedCart::new(config.limits);

    let mut response = match &args.file {
        Some(path) => {
            let json = std::fs::read_to_string(path).map_err(|err| {
                ApiError::internal(format!("cannot read {}: {err}", path.display()))
            })?;
            let response = load_cart(&cart, &config, &json)?;
            info!(path = %path.display(), items = response.items.len(), "cart file loaded");
            response
        }
        None => get_cart(&cart, &config)?,
    };

    for operation in &operations {
        response = apply(&cart, &config, operation)?;
    }

    Ok(response)
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=verdant=trace` - Show cost parsing for verdant crates only
/// - Default: WARN, INFO for verdant crates; `--verbose` raises verdant to DEBUG
///
/// Logs go to stderr so stdout stays valid JSON.
fn init_tracing(verbose: bool) {
    let default_directives = if verbose {
        "warn,verdant=debug"
    } else {
        "warn,verdant=info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
