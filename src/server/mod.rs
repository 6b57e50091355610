mod handlers;
mod state;

use axum::Router;
use axum::routing::{get, post};
use state::AppState;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::error::GeotagError;
use crate::location::{LocationSource, RecordingPlatform, SourceOptions};

pub fn build_router(options: SourceOptions) -> Router {
    let state = Arc::new(AppState {
        source: LocationSource::new(RecordingPlatform::new(), options),
    });

    Router::new()
        .route("/api/authorization", post(handlers::authorization))
        .route("/api/locations", post(handlers::locations))
        .route("/api/metadata", get(handlers::metadata))
        .route("/api/status", get(handlers::status))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start(host: &str, port: u16, options: SourceOptions) -> Result<(), GeotagError> {
    let app = build_router(options);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| GeotagError::Bind { addr: addr.clone(), source })?;

    info!("geotag host listening on http://{}", addr);
    info!("press Ctrl+C to stop");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
    Ok(())
}
