mod agent;
mod config;
mod julep;
mod models;
mod research;
mod routes;
mod state;

use anyhow::Result;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use config::Settings;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Optional local .env for development.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter("research_backend=debug,tower_http=debug")
        .init();

    let settings = Settings::load()?;
    info!(
        "Starting {} v{} - {}",
        settings.api_title, settings.api_version, settings.api_description
    );

    let addr = format!("{}:{}", settings.host, settings.port);
    let app_state = AppState::new(&settings);

    let app = Router::new()
        .merge(routes::create_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    info!("Starting server on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
