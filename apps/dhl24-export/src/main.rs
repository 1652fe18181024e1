use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dhl24_shipping::contract::client::WebClient;
use dhl24_shipping::contract::model::Shipment;
use dhl24_shipping::Dhl24Shipping;
use mimalloc::MiMalloc;
use runtime::{AppConfig, CliArgs};
use std::path::{Path, PathBuf};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// DHL24 shipment export - creates shipments at the DHL24 carrier
#[derive(Parser)]
#[command(name = "dhl24-export")]
#[command(about = "DHL24 shipment export - creates shipments at the DHL24 carrier")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the carrier configuration
    Check,
    /// Print the createShipment request without sending it
    Preview {
        /// Shipment document (JSON)
        #[arg(short, long)]
        shipment: PathBuf,
    },
    /// Create the shipment at the carrier
    Send {
        /// Shipment document (JSON)
        #[arg(short, long)]
        shipment: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs { verbose: cli.verbose };

    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    let logging_config = config.logging.as_ref().cloned().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.home_dir));
    tracing::info!("dhl24-export starting");

    if cli.print_config {
        println!("{}", config.redacted().to_yaml()?);
        return Ok(());
    }

    let module = Dhl24Shipping::init(&config)?;

    match cli.command.unwrap_or(Commands::Check) {
        Commands::Check => {
            println!(
                "Configuration OK (endpoint: {})",
                module.config().endpoint()
            );
            Ok(())
        }
        Commands::Preview { shipment } => preview(&module, &shipment),
        Commands::Send { shipment } => send(&module, &shipment).await,
    }
}

fn load_shipment(path: &Path) -> Result<Shipment> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read shipment file '{}'", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Invalid shipment document '{}'", path.display()))
}

fn preview(module: &Dhl24Shipping, path: &Path) -> Result<()> {
    let mut client = module.web_client();
    client.set_shipment(load_shipment(path)?);

    let request = client.preview()?;
    println!("{}", serde_json::to_string_pretty(&request.redacted())?);
    Ok(())
}

async fn send(module: &Dhl24Shipping, path: &Path) -> Result<()> {
    let mut client = module.web_client();
    client.set_shipment(load_shipment(path)?);

    let response = client.create_shipment().await?;
    tracing::info!(status = response.status, "Shipment created");
    println!("{}", response.body);
    Ok(())
}
