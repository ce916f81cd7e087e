use product_catalog_rust::cache::spawn_purge_task;
use product_catalog_rust::catalog::handlers::PRODUCT_LIST_TTL;
use product_catalog_rust::catalog::AppState;
use product_catalog_rust::config::ServerConfig;
use product_catalog_rust::error::ServerError;
use product_catalog_rust::router::create_app_router;
use product_catalog_rust::telemetry;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    telemetry::init();

    let config = ServerConfig::from_env()?;

    // Initialize application state
    let state = Arc::new(AppState::new());

    // Drop stale cache entries in the background
    spawn_purge_task(state.output_cache.clone(), PRODUCT_LIST_TTL);

    // Build application router with all routes and middleware
    let app = create_app_router(state);

    // Start the server
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!("Server running on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
