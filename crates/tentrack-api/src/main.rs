//! tentrack API server
//!
//! Serves the tent inventory REST API.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use tentrack_api::routes::{AppState, build_router};
use tentrack_api::storage::TentDatabase;
use tentrack_core::tracing_init::init_tracing;

#[derive(Parser, Debug)]
#[command(name = "tentrack-api")]
#[command(version, about = "tentrack REST API - tent inventory backend")]
struct Args {
    /// Address to bind to.
    #[arg(long, default_value = "127.0.0.1", env = "BIND_HOST")]
    host: IpAddr,

    /// Port to listen on.
    #[arg(long, default_value_t = 4000, env = "PORT")]
    port: u16,

    /// Path to SQLite database file.
    #[arg(long, env = "DATABASE_PATH")]
    db_path: Option<PathBuf>,

    /// Insert the example tents if the database is empty.
    #[arg(long)]
    seed: bool,

    /// Output logs as JSON (for structured log aggregation).
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing("tentrack_api=info,tower_http=info", args.log_json);

    let addr = SocketAddr::new(args.host, args.port);
    info!(
        version = env!("CARGO_PKG_VERSION"),
        addr = %addr,
        "Starting tentrack-api"
    );

    let db_path = match args.db_path {
        Some(path) => path,
        None => default_db_path()?,
    };
    info!(path = %db_path.display(), "Opening tent database");
    let db = TentDatabase::open(&db_path).await?;

    if args.seed {
        db.seed_if_empty().await?;
    }

    let app = build_router(AppState { db });
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %addr, "API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Received shutdown signal");
        })
        .await?;

    info!("API stopped");
    Ok(())
}

fn default_db_path() -> anyhow::Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(home.join(".tentrack").join("tents.db"))
}
