use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
///
/// `/media/search` is a static route, so it wins over `/media/:id` no matter
/// the registration order.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/media", get(handlers::list_media))
        .route("/media", post(handlers::create_media))
        .route("/media/search", get(handlers::search_media))
        .route("/media/:id", get(handlers::get_media))
        .route("/media/:id", put(handlers::update_media))
        .route("/media/:id", delete(handlers::delete_media))
        .route("/media/:id/ai-recommendation", post(handlers::ai_recommendation))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
