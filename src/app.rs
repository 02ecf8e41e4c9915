use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, patch},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::database::MatchRepository;
use crate::handlers::{self, matches, stats};
use crate::middleware::cors_middleware;

/// Shared handler state. The repository owns the connection pool.
#[derive(Clone)]
pub struct AppState {
    pub matches: Arc<dyn MatchRepository>,
}

impl AppState {
    pub fn new(matches: Arc<dyn MatchRepository>) -> Self {
        Self { matches }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .merge(match_routes())
        // Global middleware
        .layer(middleware::from_fn(cors_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn match_routes() -> Router<AppState> {
    Router::new()
        .route("/api/matches", get(matches::list).post(matches::create))
        .route(
            "/api/matches/:id",
            get(matches::get)
                .put(matches::replace)
                .delete(matches::delete),
        )
        // Counter updates
        .route("/api/matches/:id/goals", patch(stats::goals))
        .route("/api/matches/:id/yellowcards", patch(stats::yellow_cards))
        .route("/api/matches/:id/redcards", patch(stats::red_cards))
        .route("/api/matches/:id/extratime", patch(stats::extra_time))
}
