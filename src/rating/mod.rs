pub mod elo;
pub mod matchmaking;
pub mod model;
pub mod tiers;

pub use elo::{expected_score, update_ratings};
pub use matchmaking::rank_opponents;
pub use model::{MatchId, MatchOutcome, MatchResult, PlayerId, RatingError, RatingRecord};
pub use tiers::{Tier, TierTable};
