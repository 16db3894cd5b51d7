use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::Utc;
use std::sync::Arc;

use crate::api::models::{MatchReportRequest, MatchReportResponse, RatingChangeBody};
use crate::database;
use crate::rating::{MatchOutcome, MatchResult, RatingError, TierTable};
use crate::services::matches::{ApplyOutcome, RatingChange, apply_outcome};

use super::AppState;

pub async fn report_match(
    State(state): State<Arc<AppState>>,
    Json(body): Json<MatchReportRequest>,
) -> impl IntoResponse {
    let Some(result) = MatchResult::parse(&body.result) else {
        return (
            StatusCode::BAD_REQUEST,
            format!("Unknown result '{}'", body.result),
        )
            .into_response();
    };

    let outcome = MatchOutcome {
        match_id: body.match_id,
        first_player_id: body.first_player_id,
        second_player_id: body.second_player_id,
        result,
    };

    let mut conn = match state.pool.get() {
        Ok(conn) => conn,
        Err(_) => return (StatusCode::INTERNAL_SERVER_ERROR, "DB Connection Error").into_response(),
    };

    for player_id in [outcome.first_player_id, outcome.second_player_id] {
        match database::players::find_by_id(&conn, player_id) {
            Ok(Some(_)) => {}
            Ok(None) => {
                return (StatusCode::NOT_FOUND, format!("Player {} not found", player_id))
                    .into_response();
            }
            Err(e) => {
                return (StatusCode::INTERNAL_SERVER_ERROR, format!("Query Error: {}", e))
                    .into_response();
            }
        }
    }

    let applied = apply_outcome(
        &mut conn,
        &outcome,
        Utc::now().naive_utc(),
        &state.config.rating,
        &TierTable::default(),
    );

    match applied {
        Ok(ApplyOutcome::Applied { first, second }) => Json(MatchReportResponse {
            match_id: outcome.match_id,
            first: change_body(first),
            second: change_body(second),
        })
        .into_response(),
        Ok(ApplyOutcome::Duplicate) => (
            StatusCode::CONFLICT,
            format!("Match {} already recorded", outcome.match_id),
        )
            .into_response(),
        Err(e) => match e.downcast_ref::<RatingError>() {
            Some(rating_error) => {
                (StatusCode::BAD_REQUEST, rating_error.to_string()).into_response()
            }
            None => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Update Error: {}", e)).into_response()
            }
        },
    }
}

fn change_body(change: RatingChange) -> RatingChangeBody {
    RatingChangeBody {
        player_id: change.player_id,
        rating_before: change.rating_before,
        rating_after: change.rating_after,
        tier: change.tier.as_str().to_string(),
    }
}
