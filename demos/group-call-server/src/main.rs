use anyhow::{Context, Result};
use axum::{Router, routing::get};
use clap::Parser;
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use trellis::server::{RelayDispatcher, ws_handler};

#[derive(Parser)]
#[command(name = "group-call-server")]
#[command(about = "Signaling relay for trellis group calls")]
struct Args {
    /// Address to listen on.
    #[arg(long, default_value = "0.0.0.0:4000")]
    bind: SocketAddr,

    /// Log filter, e.g. "info" or "trellis_server=debug".
    #[arg(long, default_value = "info")]
    log: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&args.log).context("invalid log filter")?)
        .init();

    let dispatcher = RelayDispatcher::new();

    // Browser clients connect from another origin, so CORS stays open.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/ws/{connection}", get(ws_handler))
        .layer(cors)
        .with_state(dispatcher);

    info!("signaling server listening on http://{}", args.bind);
    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("failed to bind {}", args.bind))?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
