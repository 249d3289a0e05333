//! Barton Pagos terminal.
//!
//! A thin front-end over the payment flow: code verification, pending
//! payments, simulated gateway and confirmation.

mod app;
mod config;
mod screens;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use config::ConfigLoader;
use pagos_core::events::flow_event_channel;
use pagos_core::flow::PaymentFlow;
use pagos_core::gateway::SimulatedGateway;
use pagos_sdk::client::PagosClient;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

/// Colegio Barton - consulta y pago de pensiones
#[derive(Parser, Debug)]
#[command(name = "pagos-cli")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "./pagos-config.toml")]
    config: PathBuf,

    /// Override the backend base URL
    #[arg(short, long)]
    base_url: Option<Url>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = Args::parse();

    tracing::info!("Starting pagos-cli v{}", env!("CARGO_PKG_VERSION"));

    let loader = ConfigLoader::new(&args.config, args.base_url);
    let config = loader.load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        e
    })?;
    tracing::info!(backend = %config.backend.base_url, "Configuration loaded");

    let client = PagosClient::new(config.backend.base_url.clone());
    let gateway = SimulatedGateway::new(Duration::from_millis(config.gateway.settle_delay_ms));
    let (events_tx, mut events_rx) = flow_event_channel();

    // Rendering subscribes to flow events; here the subscriber is a
    // structured log of every transition.
    tokio::spawn(async move {
        while let Some(event) = events_rx.recv().await {
            tracing::debug!(?event, "flow event");
        }
    });

    let flow = PaymentFlow::new(Box::new(client), Box::new(gateway), events_tx);
    app::run(flow).await
}

/// Initialize the tracing subscriber with environment-based filtering.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
