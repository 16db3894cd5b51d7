use crate::config::settings::RatingSettings;

use super::model::{MatchOutcome, MatchResult, RatingError, RatingRecord};

/// Probability that a player at `rating` beats an opponent at
/// `opponent_rating` under the Elo model.
pub fn expected_score(rating: i32, opponent_rating: i32) -> f64 {
    1.0 / (1.0 + 10f64.powf((opponent_rating - rating) as f64 / 400.0))
}

/// Applies a match outcome to the two referenced records and returns the
/// updated pair. Pure and deterministic; the caller persists the results.
pub fn update_ratings(
    first: &RatingRecord,
    second: &RatingRecord,
    outcome: &MatchOutcome,
    settings: &RatingSettings,
) -> Result<(RatingRecord, RatingRecord), RatingError> {
    first.validate()?;
    second.validate()?;
    outcome.validate_for(first, second)?;

    let (score_first, score_second) = actual_scores(outcome.result);
    let expected_first = expected_score(first.rating, second.rating);
    let expected_second = expected_score(second.rating, first.rating);

    let new_first = updated_record(
        first,
        settings.k_factor * (score_first - expected_first),
        score_first,
        settings.rating_floor,
    );
    let new_second = updated_record(
        second,
        settings.k_factor * (score_second - expected_second),
        score_second,
        settings.rating_floor,
    );

    Ok((new_first, new_second))
}

fn actual_scores(result: MatchResult) -> (f64, f64) {
    match result {
        MatchResult::FirstPlayer => (1.0, 0.0),
        MatchResult::SecondPlayer => (0.0, 1.0),
        MatchResult::Draw => (0.5, 0.5),
    }
}

fn updated_record(record: &RatingRecord, delta: f64, score: f64, floor: i32) -> RatingRecord {
    let mut updated = record.clone();
    updated.rating = apply_delta(record.rating, delta, floor);
    if score > 0.75 {
        updated.wins += 1;
    } else if score < 0.25 {
        updated.losses += 1;
    } else {
        updated.draws += 1;
    }
    updated.total_matches += 1;
    updated
}

fn apply_delta(rating: i32, delta: f64, floor: i32) -> i32 {
    round_half_up(rating as f64 + delta).max(floor)
}

// Round-half-up, not Rust's round-half-away-from-zero. The two differ on
// negative midpoints (-0.5 rounds to 0 here, -1 there).
fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> RatingSettings {
        RatingSettings::default()
    }

    fn outcome(result: MatchResult) -> MatchOutcome {
        MatchOutcome {
            match_id: 1,
            first_player_id: 1,
            second_player_id: 2,
            result,
        }
    }

    fn record(player_id: i64, rating: i32) -> RatingRecord {
        RatingRecord::new(player_id, rating)
    }

    #[test]
    fn evenly_matched_winner_gains_sixteen() {
        let (winner, loser) = update_ratings(
            &record(1, 1200),
            &record(2, 1200),
            &outcome(MatchResult::FirstPlayer),
            &settings(),
        )
        .unwrap();

        assert_eq!(winner.rating, 1216);
        assert_eq!(loser.rating, 1184);
        assert_eq!(winner.wins, 1);
        assert_eq!(loser.losses, 1);
        assert_eq!(winner.total_matches, 1);
        assert_eq!(loser.total_matches, 1);
    }

    #[test]
    fn expected_loss_costs_little() {
        // 1000 losing to 1400 is close to the predicted result.
        let (underdog, favorite) = update_ratings(
            &record(1, 1000),
            &record(2, 1400),
            &outcome(MatchResult::SecondPlayer),
            &settings(),
        )
        .unwrap();

        assert_eq!(underdog.rating, 997);
        assert_eq!(favorite.rating, 1403);
    }

    #[test]
    fn draw_between_equals_changes_nothing() {
        let (first, second) = update_ratings(
            &record(1, 1200),
            &record(2, 1200),
            &outcome(MatchResult::Draw),
            &settings(),
        )
        .unwrap();

        assert_eq!(first.rating, 1200);
        assert_eq!(second.rating, 1200);
        assert_eq!(first.draws, 1);
        assert_eq!(second.draws, 1);
    }

    #[test]
    fn draw_transfers_points_toward_the_underdog() {
        let (favorite, underdog) = update_ratings(
            &record(1, 1400),
            &record(2, 1000),
            &outcome(MatchResult::Draw),
            &settings(),
        )
        .unwrap();

        assert!(favorite.rating < 1400);
        assert!(underdog.rating > 1000);
    }

    #[test]
    fn winner_never_drops_and_loser_never_gains() {
        for (a, b) in [(800, 2100), (1200, 1200), (1900, 300), (0, 50)] {
            let (winner, loser) = update_ratings(
                &record(1, a),
                &record(2, b),
                &outcome(MatchResult::FirstPlayer),
                &settings(),
            )
            .unwrap();
            assert!(winner.rating >= a, "winner dropped from {a} to {}", winner.rating);
            assert!(loser.rating <= b, "loser rose from {b} to {}", loser.rating);
        }
    }

    #[test]
    fn rounding_drift_is_at_most_one_point() {
        for (a, b) in [(1200, 1200), (1000, 1400), (1550, 1490), (123, 2045)] {
            let (winner, loser) = update_ratings(
                &record(1, a),
                &record(2, b),
                &outcome(MatchResult::FirstPlayer),
                &settings(),
            )
            .unwrap();
            let drift = (winner.rating - a) + (loser.rating - b);
            assert!(drift.abs() <= 1, "drift {drift} for pair ({a}, {b})");
        }
    }

    #[test]
    fn midpoint_deltas_round_up() {
        // An odd K against equal ratings produces an exact .5 delta.
        let odd_k = RatingSettings {
            k_factor: 31.0,
            ..RatingSettings::default()
        };
        let (winner, loser) = update_ratings(
            &record(1, 1200),
            &record(2, 1200),
            &outcome(MatchResult::FirstPlayer),
            &odd_k,
        )
        .unwrap();

        // 1215.5 rounds up; 1184.5 rounds up as well.
        assert_eq!(winner.rating, 1216);
        assert_eq!(loser.rating, 1185);
    }

    #[test]
    fn ratings_never_fall_below_the_floor() {
        let (loser, winner) = update_ratings(
            &record(1, 5),
            &record(2, 5),
            &outcome(MatchResult::SecondPlayer),
            &settings(),
        )
        .unwrap();

        assert_eq!(loser.rating, 0);
        assert!(winner.rating > 5);
    }

    #[test]
    fn update_is_deterministic() {
        let first = record(1, 1337);
        let second = record(2, 1205);
        let out = outcome(MatchResult::FirstPlayer);

        let once = update_ratings(&first, &second, &out, &settings()).unwrap();
        let twice = update_ratings(&first, &second, &out, &settings()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn rejects_outcome_for_other_players() {
        let bad = MatchOutcome {
            match_id: 9,
            first_player_id: 5,
            second_player_id: 6,
            result: MatchResult::Draw,
        };
        let result = update_ratings(&record(1, 1200), &record(2, 1200), &bad, &settings());
        assert!(matches!(result, Err(RatingError::InvalidOutcome { .. })));
    }

    #[test]
    fn rejects_malformed_records() {
        let mut broken = record(1, 1200);
        broken.wins = 3; // total_matches stays 0
        let result = update_ratings(
            &broken,
            &record(2, 1200),
            &outcome(MatchResult::FirstPlayer),
            &settings(),
        );
        assert!(matches!(result, Err(RatingError::InvalidRecord { .. })));
    }

    #[test]
    fn expected_scores_sum_to_one() {
        for (a, b) in [(1200, 1200), (1000, 1400), (600, 2200)] {
            let sum = expected_score(a, b) + expected_score(b, a);
            assert!((sum - 1.0).abs() < 1e-12);
        }
    }
}
