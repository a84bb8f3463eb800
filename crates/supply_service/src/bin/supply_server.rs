use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use supply_core::{DecisionEngine, EngineConfig};
use supply_service::{build_risk_service, create_router, AppState, PredictorKind};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "supply_server",
    about = "HTTP API for order pooling, distributor ranking and restock simulation"
)]
struct Cli {
    /// Address to listen on
    #[arg(long, env = "SUPPLY_BIND", default_value = "0.0.0.0:8000")]
    bind: SocketAddr,
    /// JSON engine configuration (defaults are used when omitted)
    #[arg(long, env = "SUPPLY_CONFIG")]
    config: Option<PathBuf>,
    /// Risk predictor backing /recommend_distributor and /simulate
    #[arg(long, value_enum, env = "SUPPLY_PREDICTOR", default_value_t = PredictorKind::Heuristic)]
    predictor: PredictorKind,
    /// Weights file for the logistic predictor
    #[arg(long, env = "SUPPLY_RISK_MODEL")]
    risk_model: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => EngineConfig::default(),
    };

    let risk = build_risk_service(cli.predictor, cli.risk_model.as_deref(), &config);
    info!(
        predictor = risk.predictor_name().unwrap_or("fallback"),
        distributors = config.distributors.len(),
        "engine ready"
    );

    let app = create_router(AppState::new(DecisionEngine::new(config, risk)));
    let listener = tokio::net::TcpListener::bind(cli.bind)
        .await
        .with_context(|| format!("binding {}", cli.bind))?;
    info!(addr = %cli.bind, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
