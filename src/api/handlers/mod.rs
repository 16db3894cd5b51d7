use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use serde::Deserialize;

use crate::api::models::MatchSummary;
use crate::config::settings::AppConfig;
use crate::database::models::MatchRow;

pub mod matches;
pub mod matchmaking;
pub mod players;

pub(crate) fn to_match_summary(row: &MatchRow) -> MatchSummary {
    MatchSummary {
        match_id: row.match_id,
        first_player_id: row.first_player_id,
        second_player_id: row.second_player_id,
        result: row.result.clone(),
        first_rating_after: row.first_rating_after,
        second_rating_after: row.second_rating_after,
        played_at: row.played_at.to_string(),
    }
}

pub struct AppState {
    pub pool: Pool<SqliteConnectionManager>,
    pub config: AppConfig,
}

#[derive(Deserialize)]
pub struct LeaderboardParams {
    pub page: Option<usize>,
    pub page_size: Option<usize>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub filter: Option<String>,
}

#[derive(Deserialize)]
pub struct OpponentParams {
    pub window: Option<i32>,
    pub limit: Option<usize>,
}
