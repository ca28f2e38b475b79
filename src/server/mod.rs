pub mod handlers;
pub mod types;

use crate::{Result, config::Config, llm::GeminiClient};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{
        HeaderValue,
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN,
        },
    },
};
use handlers::AppState;
use std::{net::SocketAddr, sync::Arc};
use tower::ServiceBuilder;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{info, warn};

/// Builds the relay router. Every path and method lands on [`handlers::relay`],
/// and every response carries the CORS headers.
pub fn router(state: AppState) -> Router {
    Router::new()
        .fallback(handlers::relay)
        // The handler enforces its own cap after the method and credential checks.
        .layer(DefaultBodyLimit::disable())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(SetResponseHeaderLayer::overriding(
                    ACCESS_CONTROL_ALLOW_ORIGIN,
                    HeaderValue::from_static("*"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    ACCESS_CONTROL_ALLOW_METHODS,
                    HeaderValue::from_static("POST, OPTIONS"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    ACCESS_CONTROL_ALLOW_HEADERS,
                    HeaderValue::from_static("Content-Type"),
                )),
        )
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    if config.upstream.credential().is_none() {
        warn!("GEMINI_KEY not configured; POST requests will fail until it is set");
    }

    let client = GeminiClient::new(&config.upstream);

    let app_state = AppState {
        client: Arc::new(client),
        upstream: Arc::new(config.upstream.clone()),
        max_prompt_chars: config.server.max_prompt_chars,
        max_body_bytes: config.server.max_body_bytes,
    };

    let app = router(app_state);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
