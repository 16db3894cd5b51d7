use serde::{Deserialize, Serialize};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub player_id: i64,
    pub handle: String,
    pub rating: i32,
    pub tier: String,
    pub wins: i32,
    pub losses: i32,
    pub draws: i32,
    pub total_matches: i32,
    pub win_ratio: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardResponse {
    pub items: Vec<LeaderboardEntry>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    pub match_id: i64,
    pub first_player_id: i64,
    pub second_player_id: i64,
    pub result: String,
    pub first_rating_after: i32,
    pub second_rating_after: i32,
    pub played_at: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDetailResponse {
    pub player_id: i64,
    pub handle: String,
    pub rating: i32,
    pub tier: String,
    pub wins: i32,
    pub losses: i32,
    pub draws: i32,
    pub total_matches: i32,
    pub win_ratio: f64,
    pub recent_matches: Vec<MatchSummary>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpponentCandidate {
    pub player_id: i64,
    pub handle: String,
    pub rating: i32,
    pub tier: String,
    pub rating_distance: i32,
    pub win_ratio: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpponentsResponse {
    pub items: Vec<OpponentCandidate>,
    pub window: i32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareSide {
    pub player_id: i64,
    pub handle: String,
    pub rating: i32,
    pub tier: String,
    pub expected_score: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareResponse {
    pub first: CompareSide,
    pub second: CompareSide,
    pub head_to_head: Vec<MatchSummary>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchReportRequest {
    pub match_id: i64,
    pub first_player_id: i64,
    pub second_player_id: i64,
    pub result: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingChangeBody {
    pub player_id: i64,
    pub rating_before: i32,
    pub rating_after: i32,
    pub tier: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchReportResponse {
    pub match_id: i64,
    pub first: RatingChangeBody,
    pub second: RatingChangeBody,
}
