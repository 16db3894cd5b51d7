use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use crate::api::models::{CompareResponse, CompareSide, OpponentCandidate, OpponentsResponse};
use crate::database::{self, models::Player};
use crate::rating::{self, RatingRecord, TierTable};

use super::{AppState, OpponentParams};

pub async fn get_opponents(
    State(state): State<Arc<AppState>>,
    Path(player_id): Path<i64>,
    Query(params): Query<OpponentParams>,
) -> impl IntoResponse {
    let window = params.window.unwrap_or(state.config.matchmaking.window).max(0);
    let limit = params
        .limit
        .unwrap_or(state.config.matchmaking.max_candidates);

    let conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    let requester = match database::players::find_by_id(&conn, player_id) {
        Ok(Some(player)) => player,
        Ok(None) => return StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e))
                .into_response();
        }
    };

    let candidates = match database::players::list_candidates(
        &conn,
        requester.rating - window,
        requester.rating + window,
        requester.id,
    ) {
        Ok(rows) => rows,
        Err(e) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e))
                .into_response();
        }
    };

    let pool: Vec<RatingRecord> = match snapshot_pool(&candidates) {
        Ok(pool) => pool,
        Err(e) => return (StatusCode::INTERNAL_SERVER_ERROR, e).into_response(),
    };

    let ranked = rating::rank_opponents(requester.rating, window, &pool);
    let tiers = TierTable::default();

    let items: Vec<OpponentCandidate> = ranked
        .iter()
        .take(limit)
        .map(|record| {
            let handle = candidates
                .iter()
                .find(|p| p.id == record.player_id)
                .map(|p| p.handle.clone())
                .unwrap_or_default();
            OpponentCandidate {
                player_id: record.player_id,
                handle,
                rating: record.rating,
                tier: tiers.classify(record.rating).as_str().to_string(),
                rating_distance: (record.rating - requester.rating).abs(),
                win_ratio: record.win_ratio(),
            }
        })
        .collect();

    Json(OpponentsResponse { items, window }).into_response()
}

pub async fn get_compare(
    State(state): State<Arc<AppState>>,
    Path((first_id, second_id)): Path<(i64, i64)>,
) -> impl IntoResponse {
    let conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    let first = match database::players::find_by_id(&conn, first_id) {
        Ok(Some(player)) => player,
        Ok(None) => {
            return (StatusCode::NOT_FOUND, format!("Player {} not found", first_id))
                .into_response();
        }
        Err(e) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e))
                .into_response();
        }
    };
    let second = match database::players::find_by_id(&conn, second_id) {
        Ok(Some(player)) => player,
        Ok(None) => {
            return (StatusCode::NOT_FOUND, format!("Player {} not found", second_id))
                .into_response();
        }
        Err(e) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e))
                .into_response();
        }
    };

    let head_to_head = match database::matches::list_between_players(&conn, first.id, second.id) {
        Ok(rows) => rows.iter().map(super::to_match_summary).collect(),
        Err(e) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e))
                .into_response();
        }
    };

    let expected_first = rating::expected_score(first.rating, second.rating);

    Json(CompareResponse {
        first: compare_side(&first, expected_first),
        second: compare_side(&second, 1.0 - expected_first),
        head_to_head,
    })
    .into_response()
}

fn compare_side(player: &Player, expected_score: f64) -> CompareSide {
    CompareSide {
        player_id: player.id,
        handle: player.handle.clone(),
        rating: player.rating,
        tier: player.tier.clone(),
        expected_score,
    }
}

fn snapshot_pool(candidates: &[Player]) -> Result<Vec<RatingRecord>, String> {
    candidates
        .iter()
        .map(|player| {
            player
                .rating_record()
                .map_err(|e| format!("Corrupted player row: {}", e))
        })
        .collect()
}
