use thiserror::Error;

pub type PlayerId = i64;
pub type MatchId = i64;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RatingError {
    #[error("invalid rating record for player {player_id}: {reason}")]
    InvalidRecord { player_id: PlayerId, reason: String },
    #[error("invalid match outcome {match_id}: {reason}")]
    InvalidOutcome { match_id: MatchId, reason: String },
    #[error("invalid tier table: {0}")]
    InvalidTierTable(String),
}

/// Snapshot of a player's competitive standing. The persistence layer owns
/// the mutable row; everything in this module operates on copies of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingRecord {
    pub player_id: PlayerId,
    pub rating: i32,
    pub wins: i32,
    pub losses: i32,
    pub draws: i32,
    pub total_matches: i32,
}

impl RatingRecord {
    /// Fresh record for a player who has not competed yet.
    pub fn new(player_id: PlayerId, rating: i32) -> Self {
        Self {
            player_id,
            rating,
            wins: 0,
            losses: 0,
            draws: 0,
            total_matches: 0,
        }
    }

    pub fn from_parts(
        player_id: PlayerId,
        rating: i32,
        wins: i32,
        losses: i32,
        draws: i32,
        total_matches: i32,
    ) -> Result<Self, RatingError> {
        let record = Self {
            player_id,
            rating,
            wins,
            losses,
            draws,
            total_matches,
        };
        record.validate()?;
        Ok(record)
    }

    /// Counters must be non-negative and sum to `total_matches`.
    pub fn validate(&self) -> Result<(), RatingError> {
        if self.wins < 0 || self.losses < 0 || self.draws < 0 {
            return Err(self.invalid("negative match counter"));
        }
        if self.wins + self.losses + self.draws != self.total_matches {
            return Err(self.invalid("counters do not sum to total_matches"));
        }
        Ok(())
    }

    pub fn win_ratio(&self) -> f64 {
        self.wins as f64 / self.total_matches.max(1) as f64
    }

    fn invalid(&self, reason: &str) -> RatingError {
        RatingError::InvalidRecord {
            player_id: self.player_id,
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    FirstPlayer,
    SecondPlayer,
    Draw,
}

impl MatchResult {
    pub fn as_str(&self) -> &str {
        match self {
            MatchResult::FirstPlayer => "first",
            MatchResult::SecondPlayer => "second",
            MatchResult::Draw => "draw",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "first" => Some(MatchResult::FirstPlayer),
            "second" => Some(MatchResult::SecondPlayer),
            "draw" => Some(MatchResult::Draw),
            _ => None,
        }
    }
}

/// A completed match between exactly two players. Immutable once recorded;
/// drives exactly one rating update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    pub match_id: MatchId,
    pub first_player_id: PlayerId,
    pub second_player_id: PlayerId,
    pub result: MatchResult,
}

impl MatchOutcome {
    /// The outcome must reference the two supplied records, in order.
    pub fn validate_for(
        &self,
        first: &RatingRecord,
        second: &RatingRecord,
    ) -> Result<(), RatingError> {
        if self.first_player_id == self.second_player_id {
            return Err(self.invalid("both sides reference the same player"));
        }
        if self.first_player_id != first.player_id || self.second_player_id != second.player_id {
            return Err(self.invalid("outcome does not reference the supplied records"));
        }
        Ok(())
    }

    fn invalid(&self, reason: &str) -> RatingError {
        RatingError::InvalidOutcome {
            match_id: self.match_id,
            reason: reason.to_string(),
        }
    }
}
