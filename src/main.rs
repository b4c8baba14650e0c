// Week Calendar Server
// Main entry point

use std::path::PathBuf;

use anyhow::{Context, Result};
use week_calendar::api::{self, AppState, CalendarSettings};
use week_calendar::config::AppConfig;
use week_calendar::services::database::Database;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = AppConfig::load(config_path.as_deref())?;

    let db_path = config.database_path();
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create data directory {}", parent.display()))?;
    }

    let db = Database::new(&db_path.to_string_lossy())?;
    db.initialize_schema()?;
    log::info!("Using database at {}", db_path.display());

    let settings = CalendarSettings::from_config(&config.calendar)?;
    log::info!(
        "Display zone {}, grid {}:00-{}:00",
        settings.tz,
        settings.window.start_hour(),
        settings.window.end_hour()
    );

    let app = api::router(AppState::new(db, settings))
        .layer(api::cors_layer(&config.server.cors_origin)?);

    let address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    log::info!("Listening on http://{}", address);
    log::info!("CORS enabled for {}", config.server.cors_origin);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
