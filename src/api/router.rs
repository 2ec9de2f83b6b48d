//! Dashboard API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Report and admin routes are nested under `/api/`; everything else falls
//! through to the static dashboard assets.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::api::endpoints;
use crate::api::types::ApiContext;
use crate::config;

/// Build the dashboard router.
///
/// Endpoint handlers use `State<ApiContext>`. The body limit leaves headroom
/// over the upload cap for multipart framing; the upload handler enforces
/// the exact cap on the file itself.
pub fn dashboard_router(ctx: ApiContext) -> Router {
    let api = Router::new()
        .route("/dashboard/overview", get(endpoints::dashboard::overview))
        .route("/dashboard/financial", get(endpoints::dashboard::financial))
        .route("/dashboard/operations", get(endpoints::dashboard::operations))
        .route("/dashboard/quality", get(endpoints::dashboard::quality))
        .route("/dashboard/staff", get(endpoints::dashboard::staff))
        .route("/dashboard/strategic", get(endpoints::dashboard::strategic))
        .route("/reload-data", post(endpoints::admin::reload))
        .route("/data-status", get(endpoints::admin::status))
        .route("/upload-excel", post(endpoints::admin::upload))
        .layer(DefaultBodyLimit::max(config::MAX_UPLOAD_BYTES + 16 * 1024))
        .with_state(ctx);

    Router::new()
        .nest("/api", api)
        .fallback_service(ServeDir::new(config::public_dir()))
        .layer(CorsLayer::permissive())
}
