//! HTTP API and web UI
//!
//! REST endpoints over the inventory, catalog and orders tables, plus the
//! want-list match endpoint used by the single-page UI.

mod error;
mod matcher;
mod orders;
mod resources;

use axum::{
    body::Bytes,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::config::Resource;
use crate::store::AirtableClient;

pub use error::ApiError;
pub use matcher::{MatchRequest, MatchResponse};

/// Header carrying the admin key for inventory and catalog edits
pub const ADMIN_KEY_HEADER: &str = "x-admin-key";

/// Shared application state (store client + optional admin key)
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<AirtableClient>,
    pub admin_key: Option<Arc<str>>,
}

impl AppState {
    pub fn new(store: AirtableClient, admin_key: Option<String>) -> Self {
        Self {
            store: Arc::new(store),
            admin_key: admin_key.map(Arc::from),
        }
    }
}

/// Decodes a JSON request body; an empty body gives the default value
pub(crate) fn parse_body<T: DeserializeOwned + Default>(body: &Bytes) -> Result<T, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|e| ApiError::BadRequest(format!("invalid JSON body: {e}")))
}

/// 405 with the verbs the route does support
pub(crate) fn method_not_allowed(allow: &'static str) -> Response {
    (StatusCode::METHOD_NOT_ALLOWED, [(header::ALLOW, allow)]).into_response()
}

/// GET / - Serve the web UI (single HTML page)
async fn index_handler() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}

/// GET /wantlist_template.csv
async fn template_handler() -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"pokeset_wantlist_template.csv\"",
            ),
        ],
        include_str!("../../static/wantlist_template.csv"),
    )
        .into_response()
}

/// Build the web server router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/wantlist_template.csv", get(template_handler))
        .route("/api/inventory", resources::collection_routes(Resource::Inventory))
        .route("/api/inventory/{id}", resources::record_routes(Resource::Inventory))
        .route("/api/catalog", resources::collection_routes(Resource::Catalog))
        .route("/api/catalog/{id}", resources::record_routes(Resource::Catalog))
        .route(
            "/api/orders",
            post(orders::create_order).fallback(|| async { method_not_allowed("POST") }),
        )
        .route(
            "/api/match",
            post(matcher::match_want_list).fallback(|| async { method_not_allowed("POST") }),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the web server (async)
///
/// Binds to 0.0.0.0 (all interfaces) to work with Docker port mapping and
/// stops on Ctrl-C.
pub async fn serve(state: AppState, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);
    let addr = format!("0.0.0.0:{}", port);

    log::info!("Web UI listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                log::error!("Failed to listen for shutdown signal: {}", e);
            }
            log::info!("Shutting down web server");
        })
        .await?;

    Ok(())
}
