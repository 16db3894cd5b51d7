use anyhow::{Context, Result, anyhow};
use chrono::NaiveDateTime;
use log::info;
use rusqlite::Connection;

use crate::config::settings::RatingSettings;
use crate::database::{self, DbConn};
use crate::rating::{self, MatchOutcome, PlayerId, RatingRecord, Tier, TierTable};

#[derive(Debug, Clone)]
pub struct RatingChange {
    pub player_id: PlayerId,
    pub rating_before: i32,
    pub rating_after: i32,
    pub tier: Tier,
}

#[derive(Debug)]
pub enum ApplyOutcome {
    Applied {
        first: RatingChange,
        second: RatingChange,
    },
    /// The match id was seen before; nothing was written.
    Duplicate,
}

/// Applies one match outcome: duplicate check, rating update and the match
/// log entry all commit in a single transaction, so a match is applied at
/// most once and both players' records move together.
pub fn apply_outcome(
    conn: &mut DbConn,
    outcome: &MatchOutcome,
    played_at: NaiveDateTime,
    settings: &RatingSettings,
    tiers: &TierTable,
) -> Result<ApplyOutcome> {
    let tx = conn
        .transaction()
        .context("Failed to begin match transaction")?;

    if database::matches::match_exists(&tx, outcome.match_id)? {
        return Ok(ApplyOutcome::Duplicate);
    }

    let first = fetch_record(&tx, outcome.first_player_id)?;
    let second = fetch_record(&tx, outcome.second_player_id)?;

    let (new_first, new_second) = rating::update_ratings(&first, &second, outcome, settings)?;

    let first_change = store_record(&tx, &first, &new_first, tiers)?;
    let second_change = store_record(&tx, &second, &new_second, tiers)?;

    database::matches::insert_match(
        &tx,
        outcome.match_id,
        outcome.first_player_id,
        outcome.second_player_id,
        outcome.result.as_str(),
        first_change.rating_before,
        first_change.rating_after,
        second_change.rating_before,
        second_change.rating_after,
        played_at,
    )?;

    tx.commit().context("Failed to commit match transaction")?;

    info!(
        "Match {} applied: player {} {} -> {}, player {} {} -> {}",
        outcome.match_id,
        first_change.player_id,
        first_change.rating_before,
        first_change.rating_after,
        second_change.player_id,
        second_change.rating_before,
        second_change.rating_after,
    );

    Ok(ApplyOutcome::Applied {
        first: first_change,
        second: second_change,
    })
}

fn fetch_record(conn: &Connection, player_id: PlayerId) -> Result<RatingRecord> {
    let player = database::players::find_by_id(conn, player_id)?
        .ok_or_else(|| anyhow!("Player {player_id} not found"))?;
    Ok(player.rating_record()?)
}

fn store_record(
    conn: &Connection,
    before: &RatingRecord,
    after: &RatingRecord,
    tiers: &TierTable,
) -> Result<RatingChange> {
    let tier = tiers.classify(after.rating);
    database::players::update_rating_record(conn, after, tier.as_str())?;
    Ok(RatingChange {
        player_id: after.player_id,
        rating_before: before.rating,
        rating_after: after.rating,
        tier,
    })
}
