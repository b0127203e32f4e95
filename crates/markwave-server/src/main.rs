//! Markwave referral backend server.
//!
//! Opens the Neo4j connection once at startup, initializes schema
//! constraints, and serves the HTTP API until shutdown.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use markwave_core::ReferralStore;
use markwave_graph::{GraphClient, GraphConfig, GraphStore};

#[derive(Parser)]
#[command(name = "markwave-server", about = "Markwave referral management backend")]
struct Cli {
    /// Port to listen on.
    #[arg(long, default_value_t = 8000)]
    port: u16,

    /// Neo4j bolt URI.
    #[arg(long, env = "NEO4J_URI", default_value = "bolt://localhost:7687")]
    uri: String,

    /// Neo4j user.
    #[arg(long, env = "NEO4J_USER", default_value = "neo4j")]
    user: String,

    /// Neo4j password.
    #[arg(long, env = "NEO4J_PASSWORD")]
    password: String,
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "markwave=info,tower_http=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    tracing::info!(port = cli.port, "starting markwave-server");

    let config = GraphConfig {
        uri: cli.uri,
        user: cli.user,
        password: cli.password,
    };

    let client = GraphClient::connect(&config).await?;
    markwave_graph::initialize_schema(&client).await?;

    let store: Arc<dyn ReferralStore> = Arc::new(GraphStore::new(client));
    markwave_web::run_server(store, cli.port).await
}
