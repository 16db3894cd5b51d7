use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use crate::api::models::{LeaderboardEntry, LeaderboardResponse, MatchSummary, PlayerDetailResponse};
use crate::database::{
    self,
    models::{LeaderboardFilter, SortColumn, SortOrder},
};

use super::{AppState, LeaderboardParams};

pub async fn get_players(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LeaderboardParams>,
) -> impl IntoResponse {
    let page = params.page.unwrap_or(1).max(1);
    let page_size = params
        .page_size
        .unwrap_or(state.config.server.default_page_size)
        .clamp(1, state.config.server.max_page_size);
    let offset = (page - 1) * page_size;

    let sort_by = match params.sort_by.as_deref() {
        Some("handle") => SortColumn::Handle,
        Some("totalMatches") => SortColumn::TotalMatches,
        _ => SortColumn::Rating,
    };
    let sort_order = match params.order.as_deref() {
        Some("asc") => SortOrder::Asc,
        _ => SortOrder::Desc,
    };

    let conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    let filter = LeaderboardFilter {
        handle_contains: params.filter,
        sort_by,
        sort_order,
        limit: page_size,
        offset,
    };

    let (rows, total) = match database::players::list_leaderboard(&conn, &filter) {
        Ok(result) => result,
        Err(e) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e))
                .into_response();
        }
    };

    let items: Vec<LeaderboardEntry> = rows
        .into_iter()
        .enumerate()
        .map(|(i, player)| {
            let win_ratio = player
                .rating_record()
                .map(|r| r.win_ratio())
                .unwrap_or(0.0);
            LeaderboardEntry {
                rank: offset + i + 1,
                player_id: player.id,
                handle: player.handle,
                rating: player.rating,
                tier: player.tier,
                wins: player.wins,
                losses: player.losses,
                draws: player.draws,
                total_matches: player.total_matches,
                win_ratio,
            }
        })
        .collect();

    Json(LeaderboardResponse {
        items,
        total,
        page,
        page_size,
    })
    .into_response()
}

pub async fn get_player_detail(
    State(state): State<Arc<AppState>>,
    Path(player_id): Path<i64>,
) -> impl IntoResponse {
    let conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    let player = match database::players::find_by_id(&conn, player_id) {
        Ok(Some(player)) => player,
        Ok(None) => return StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e))
                .into_response();
        }
    };

    let recent = match database::matches::list_recent_for_player(
        &conn,
        player.id,
        state.config.server.recent_matches,
    ) {
        Ok(rows) => rows,
        Err(e) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e))
                .into_response();
        }
    };

    let win_ratio = player
        .rating_record()
        .map(|r| r.win_ratio())
        .unwrap_or(0.0);
    let recent_matches: Vec<MatchSummary> = recent.iter().map(super::to_match_summary).collect();

    Json(PlayerDetailResponse {
        player_id: player.id,
        handle: player.handle,
        rating: player.rating,
        tier: player.tier,
        wins: player.wins,
        losses: player.losses,
        draws: player.draws,
        total_matches: player.total_matches,
        win_ratio,
        recent_matches,
    })
    .into_response()
}
