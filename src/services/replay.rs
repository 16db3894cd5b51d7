use anyhow::{Context, Result, anyhow};
use log::info;

use crate::config::settings::AppConfig;
use crate::database::{self, DbConn};
use crate::rating::{self, MatchOutcome, MatchResult, TierTable};

/// Rebuilds every rating record from the chronological match log. The match
/// log is the source of truth; stored records and per-match snapshots are
/// derived data and safe to regenerate.
pub struct ReplayService {
    config: AppConfig,
}

impl ReplayService {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn run(&self) -> Result<()> {
        let db_path =
            std::env::var("DATABASE_PATH").unwrap_or_else(|_| "arena_rating.db".to_string());

        let pool = database::create_pool(&db_path)?;
        let mut conn = database::get_connection(&pool)?;

        info!("=== Replaying match log from {db_path} ===");
        let applied = replay_log(&mut conn, &self.config)?;
        info!("=== Replay complete: {applied} matches applied ===");

        Ok(())
    }
}

/// Resets all records to the starting rating and re-applies the whole match
/// log inside one transaction.
pub fn replay_log(conn: &mut DbConn, config: &AppConfig) -> Result<usize> {
    let tiers = TierTable::default();
    let default_tier = tiers.classify(config.rating.default_rating);

    let tx = conn
        .transaction()
        .context("Failed to begin replay transaction")?;

    let reset = database::players::reset_all_records(
        &tx,
        config.rating.default_rating,
        default_tier.as_str(),
    )?;
    info!("Reset {reset} player records to {}", config.rating.default_rating);

    let log = database::matches::list_chronological(&tx)?;
    let total = log.len();

    for (idx, row) in log.iter().enumerate() {
        let result = MatchResult::parse(&row.result)
            .ok_or_else(|| anyhow!("Match {} has unknown result '{}'", row.match_id, row.result))?;
        let outcome = MatchOutcome {
            match_id: row.match_id,
            first_player_id: row.first_player_id,
            second_player_id: row.second_player_id,
            result,
        };

        let first = database::players::find_by_id(&tx, row.first_player_id)?
            .ok_or_else(|| anyhow!("Player {} missing from match {}", row.first_player_id, row.match_id))?
            .rating_record()?;
        let second = database::players::find_by_id(&tx, row.second_player_id)?
            .ok_or_else(|| anyhow!("Player {} missing from match {}", row.second_player_id, row.match_id))?
            .rating_record()?;

        let (new_first, new_second) =
            rating::update_ratings(&first, &second, &outcome, &config.rating)?;

        database::players::update_rating_record(
            &tx,
            &new_first,
            tiers.classify(new_first.rating).as_str(),
        )?;
        database::players::update_rating_record(
            &tx,
            &new_second,
            tiers.classify(new_second.rating).as_str(),
        )?;
        database::matches::update_snapshots(
            &tx,
            row.id,
            first.rating,
            new_first.rating,
            second.rating,
            new_second.rating,
        )?;

        if (idx + 1) % 100 == 0 || idx + 1 == total {
            info!("  Replayed {}/{} matches", idx + 1, total);
        }
    }

    tx.commit().context("Failed to commit replay transaction")?;
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::setup;
    use crate::rating::RatingRecord;
    use crate::services::matches::apply_outcome;
    use chrono::Utc;

    fn test_conn() -> DbConn {
        let pool = database::create_memory_pool().unwrap();
        let conn = database::get_connection(&pool).unwrap();
        setup::reset_database(&conn).unwrap();
        conn
    }

    #[test]
    fn replay_restores_records_from_the_log() {
        let mut conn = test_conn();
        let config = AppConfig::new();
        let tiers = TierTable::default();

        let a = database::players::create_player(&conn, "a", 1200, "pulsar").unwrap();
        let b = database::players::create_player(&conn, "b", 1200, "pulsar").unwrap();

        for (match_id, result) in [
            (1, crate::rating::MatchResult::FirstPlayer),
            (2, crate::rating::MatchResult::FirstPlayer),
            (3, crate::rating::MatchResult::Draw),
        ] {
            apply_outcome(
                &mut conn,
                &MatchOutcome {
                    match_id,
                    first_player_id: a.id,
                    second_player_id: b.id,
                    result,
                },
                Utc::now().naive_utc(),
                &config.rating,
                &tiers,
            )
            .unwrap();
        }

        let before_a = database::players::find_by_id(&conn, a.id).unwrap().unwrap();
        let before_b = database::players::find_by_id(&conn, b.id).unwrap().unwrap();

        // Corrupt both records; replay must reconstruct them exactly.
        let bogus = RatingRecord::from_parts(a.id, 9000, 40, 2, 1, 43).unwrap();
        database::players::update_rating_record(&conn, &bogus, "celestia").unwrap();

        let applied = replay_log(&mut conn, &config).unwrap();
        assert_eq!(applied, 3);

        let after_a = database::players::find_by_id(&conn, a.id).unwrap().unwrap();
        let after_b = database::players::find_by_id(&conn, b.id).unwrap().unwrap();
        assert_eq!(after_a.rating, before_a.rating);
        assert_eq!(after_a.wins, before_a.wins);
        assert_eq!(after_a.draws, before_a.draws);
        assert_eq!(after_a.tier, before_a.tier);
        assert_eq!(after_b.rating, before_b.rating);
        assert_eq!(after_b.losses, before_b.losses);
    }

    #[test]
    fn replay_of_an_empty_log_just_resets() {
        let mut conn = test_conn();
        let config = AppConfig::new();

        database::players::create_player(&conn, "lone", 1777, "quasar").unwrap();

        let applied = replay_log(&mut conn, &config).unwrap();
        assert_eq!(applied, 0);

        let player = database::players::find_by_handle(&conn, "lone").unwrap().unwrap();
        assert_eq!(player.rating, config.rating.default_rating);
        assert_eq!(player.tier, "pulsar");
        assert_eq!(player.total_matches, 0);
    }
}
