use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use webstat_server::state::AppState;

/// `webstat health` — liveness probe for container health checks.
///
/// Calls `GET http://localhost:$WEBSTAT_PORT/health`.
/// Exits 0 if the server responds with HTTP 200, exits 1 otherwise.
fn run_health_check() -> ! {
    let port = std::env::var("WEBSTAT_PORT").unwrap_or_else(|_| "3000".to_string());
    let url = format!("http://localhost:{}/health", port);
    match ureq::get(&url).call() {
        Ok(resp) if resp.status() == 200 => std::process::exit(0),
        _ => std::process::exit(1),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.get(1).map(|s| s.as_str()) == Some("health") {
        run_health_check();
    }
    // Structured JSON logging. Level controlled via RUST_LOG.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("webstat=info".parse()?),
        )
        .json()
        .init();

    let cfg = webstat_core::config::Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    std::fs::create_dir_all(&cfg.data_dir)?;
    let db_path = format!("{}/webstat.db", cfg.data_dir);
    let db = webstat_duckdb::DuckDbBackend::open(&db_path, &cfg.duckdb_memory_limit)?;

    match db.ensure_jwt_secret().await {
        Ok(_) => info!("JWT secret ready"),
        Err(e) => tracing::error!(error = %e, "Failed to ensure JWT secret"),
    }

    let state = Arc::new(AppState::new(db, cfg.clone()));
    let addr = format!("0.0.0.0:{}", cfg.port);
    let app = webstat_server::app::build_app(state);

    info!(
        port = cfg.port,
        grace_ms = cfg.fetch_grace_ms,
        "webstat listening on {}",
        addr
    );

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            tokio::signal::ctrl_c().await.ok();
        })
        .await?;

    Ok(())
}
