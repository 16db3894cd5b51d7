use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::api::handlers::{
    AppState,
    matches::report_match,
    matchmaking::{get_compare, get_opponents},
    players::{get_player_detail, get_players},
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/players", get(get_players))
        .route("/api/player/:id", get(get_player_detail))
        .route("/api/player/:id/opponents", get(get_opponents))
        .route("/api/compare/:first_id/:second_id", get(get_compare))
        .route("/api/matches", post(report_match))
        .with_state(state)
}
