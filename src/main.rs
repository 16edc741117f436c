//! roster - member/team query service
//!
//! Serves member search at /v1, /v2 and /v3 plus health checks.

use std::net::SocketAddr;

use roster::app::{AppState, build_app};
use roster::cli::CliOptions;
use roster::config::Config;
use roster::db::Database;
use roster::db::schema_sync::sync_all_entity_schemas;
use roster::db::seed::run_seeds;
use roster::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let mut config = Config::from_env()?;

    let cli = CliOptions::from_args();
    if let Some(profile) = cli.profile_override {
        config.profile = profile;
    }

    logging::init(config.log_format);
    tracing::info!(profile = %config.profile, "Starting roster");

    let db = Database::connect(&config.database_url, config.database_max_connections).await?;

    let sync = sync_all_entity_schemas(db.pool()).await;
    if !sync.is_ok() {
        anyhow::bail!("Schema sync failed: {}", sync.errors.join("; "));
    }
    if !sync.tables_created.is_empty() || !sync.columns_added.is_empty() {
        tracing::info!(
            tables = ?sync.tables_created,
            columns = ?sync.columns_added,
            "Schema synchronized"
        );
    }

    let seeds = run_seeds(&db, config.profile).await;
    for error in &seeds.errors {
        tracing::warn!(error = %error, "Seed error");
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let app = build_app(AppState::new(config, db.clone()));

    tracing::info!("Server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    db.close().await;
    Ok(())
}
