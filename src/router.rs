//! HTTP routes.

use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::paths;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
  Router::new()
    .route("/", get(handlers::index))
    .route("/health", get(handlers::health))
    .route("/lessons/{id}", get(handlers::lesson_start))
    .route("/lessons/{id}/content.json", get(handlers::lesson_content))
    .route("/lesson/next", post(handlers::next_moment))
    .route("/lesson/guide", post(handlers::toggle_guide))
    .route("/exercise/place", post(handlers::place))
    .route("/exercise/remove", post(handlers::remove))
    .route("/exercise/drag", post(handlers::begin_drag))
    .route("/exercise/hover", post(handlers::hover))
    .route("/exercise/drop-blank", post(handlers::drop_on_blank))
    .route("/exercise/drop-pool", post(handlers::drop_on_pool))
    .route("/exercise/end-drag", post(handlers::end_drag))
    .nest_service("/static", ServeDir::new(paths::STATIC_DIR))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}
