use chrono::NaiveDateTime;

use crate::rating::{RatingError, RatingRecord};

#[derive(Debug, Clone)]
pub struct Player {
    pub id: i64,
    pub handle: String,
    pub rating: i32,
    pub wins: i32,
    pub losses: i32,
    pub draws: i32,
    pub total_matches: i32,
    pub tier: String,
    pub created_at: Option<NaiveDateTime>,
}

impl Player {
    /// Immutable snapshot for the rating engine. Fails on a corrupted row.
    pub fn rating_record(&self) -> Result<RatingRecord, RatingError> {
        RatingRecord::from_parts(
            self.id,
            self.rating,
            self.wins,
            self.losses,
            self.draws,
            self.total_matches,
        )
    }
}

#[derive(Debug, Clone)]
pub struct MatchRow {
    pub id: i64,
    pub match_id: i64,
    pub first_player_id: i64,
    pub second_player_id: i64,
    pub result: String,
    pub first_rating_before: i32,
    pub first_rating_after: i32,
    pub second_rating_before: i32,
    pub second_rating_after: i32,
    pub played_at: NaiveDateTime,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone)]
pub enum SortColumn {
    Handle,
    Rating,
    TotalMatches,
}

#[derive(Debug, Clone)]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone)]
pub struct LeaderboardFilter {
    pub handle_contains: Option<String>,
    pub sort_by: SortColumn,
    pub sort_order: SortOrder,
    pub limit: usize,
    pub offset: usize,
}
