//! gigboard-web - Listings service for venues, artists, and shows
//!
//! Serves the JSON API and the embedded HTML index over a local SQLite
//! database, creating the database on first run.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use gigboard_common::{config, db};
use gigboard_web::{build_router, AppState};

#[derive(Debug, Parser)]
#[command(name = "gigboard-web", version, about = "Venue/artist/show listings service")]
struct Args {
    /// Data folder holding the database (overrides env and config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// TCP port to listen on
    #[arg(long, env = "GIGBOARD_PORT", default_value_t = config::DEFAULT_PORT)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber before anything else
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting gigboard-web v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let data_folder = config::resolve_data_folder(args.data_dir.as_deref());
    config::ensure_data_folder(&data_folder)?;

    let db_path = config::database_path(&data_folder);
    info!("Database path: {}", db_path.display());

    let pool = db::init_database(&db_path).await?;

    let state = AppState::new(pool);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", args.port)).await?;
    info!("gigboard-web listening on http://127.0.0.1:{}", args.port);

    axum::serve(listener, app).await?;

    Ok(())
}
