use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};

use crate::rating::RatingRecord;

use super::models::{LeaderboardFilter, Player, SortColumn, SortOrder};

const PLAYER_COLUMNS: &str =
    "id, handle, rating, wins, losses, draws, total_matches, tier, created_at";

pub fn create_player(conn: &Connection, handle: &str, rating: i32, tier: &str) -> Result<Player> {
    let sql = format!(
        "INSERT INTO players (handle, rating, tier) VALUES (?1, ?2, ?3) RETURNING {PLAYER_COLUMNS}"
    );

    conn.query_row(&sql, params![handle, rating, tier], parse_player_row)
        .with_context(|| format!("Failed to insert player '{handle}'"))
}

pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<Player>> {
    let sql = format!("SELECT {PLAYER_COLUMNS} FROM players WHERE id = ?1");

    conn.query_row(&sql, params![id], parse_player_row)
        .optional()
        .context("Failed to query player by id")
}

pub fn find_by_handle(conn: &Connection, handle: &str) -> Result<Option<Player>> {
    let sql = format!("SELECT {PLAYER_COLUMNS} FROM players WHERE handle = ?1");

    conn.query_row(&sql, params![handle], parse_player_row)
        .optional()
        .context("Failed to query player by handle")
}

pub fn list_all(conn: &Connection) -> Result<Vec<Player>> {
    let sql = format!("SELECT {PLAYER_COLUMNS} FROM players ORDER BY id");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], parse_player_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

/// Matchmaking pool prefilter: everyone inside the rating window except the
/// requester. Ordering is left to the pure ranker.
pub fn list_candidates(
    conn: &Connection,
    min_rating: i32,
    max_rating: i32,
    exclude_id: i64,
) -> Result<Vec<Player>> {
    let sql = format!(
        "SELECT {PLAYER_COLUMNS} FROM players WHERE rating BETWEEN ?1 AND ?2 AND id != ?3"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![min_rating, max_rating, exclude_id], parse_player_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

/// Writes rating, counters and the derived tier together so the stored tier
/// can never disagree with the stored rating.
pub fn update_rating_record(
    conn: &Connection,
    record: &RatingRecord,
    tier: &str,
) -> Result<Player> {
    let sql = format!(
        "UPDATE players SET rating = ?1, wins = ?2, losses = ?3, draws = ?4, total_matches = ?5, tier = ?6 WHERE id = ?7 RETURNING {PLAYER_COLUMNS}"
    );

    conn.query_row(
        &sql,
        params![
            record.rating,
            record.wins,
            record.losses,
            record.draws,
            record.total_matches,
            tier,
            record.player_id
        ],
        parse_player_row,
    )
    .with_context(|| format!("Failed to update rating record for player {}", record.player_id))
}

/// Puts every player back to the starting record. Used by replay before the
/// match log is re-applied.
pub fn reset_all_records(conn: &Connection, rating: i32, tier: &str) -> Result<usize> {
    let sql = "UPDATE players SET rating = ?1, wins = 0, losses = 0, draws = 0, total_matches = 0, tier = ?2";

    conn.execute(sql, params![rating, tier])
        .context("Failed to reset player records")
}

pub fn list_leaderboard(
    conn: &Connection,
    filter: &LeaderboardFilter,
) -> Result<(Vec<Player>, usize)> {
    let order_column = match filter.sort_by {
        SortColumn::Handle => "handle",
        SortColumn::Rating => "rating",
        SortColumn::TotalMatches => "total_matches",
    };
    let order_direction = match filter.sort_order {
        SortOrder::Asc => "ASC",
        SortOrder::Desc => "DESC",
    };

    let pattern = filter
        .handle_contains
        .as_deref()
        .map(|needle| format!("%{needle}%"))
        .unwrap_or_else(|| "%".to_string());

    let total: usize = conn
        .query_row(
            "SELECT COUNT(*) FROM players WHERE handle LIKE ?1",
            params![pattern],
            |row| row.get::<_, i64>(0),
        )
        .context("Failed to count leaderboard players")? as usize;

    let sql = format!(
        "SELECT {PLAYER_COLUMNS} FROM players WHERE handle LIKE ?1 ORDER BY {order_column} {order_direction}, id ASC LIMIT ?2 OFFSET ?3"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(
            params![pattern, filter.limit as i64, filter.offset as i64],
            parse_player_row,
        )?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok((rows, total))
}

fn parse_player_row(row: &rusqlite::Row) -> rusqlite::Result<Player> {
    Ok(Player {
        id: row.get(0)?,
        handle: row.get(1)?,
        rating: row.get(2)?,
        wins: row.get(3)?,
        losses: row.get(4)?,
        draws: row.get(5)?,
        total_matches: row.get(6)?,
        tier: row.get(7)?,
        created_at: row.get(8)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{self, setup};

    fn test_conn() -> database::DbConn {
        let pool = database::create_memory_pool().unwrap();
        let conn = database::get_connection(&pool).unwrap();
        setup::reset_database(&conn).unwrap();
        conn
    }

    #[test]
    fn create_and_find_player() {
        let conn = test_conn();
        let created = create_player(&conn, "ada", 1200, "pulsar").unwrap();

        let found = find_by_id(&conn, created.id).unwrap().unwrap();
        assert_eq!(found.handle, "ada");
        assert_eq!(found.rating, 1200);
        assert_eq!(found.tier, "pulsar");
        assert_eq!(found.total_matches, 0);

        assert!(find_by_handle(&conn, "ada").unwrap().is_some());
        assert!(find_by_id(&conn, 999).unwrap().is_none());
    }

    #[test]
    fn update_rewrites_counters_and_tier_together() {
        let conn = test_conn();
        let player = create_player(&conn, "bob", 1200, "pulsar").unwrap();

        let record = RatingRecord::from_parts(player.id, 1510, 3, 1, 0, 4).unwrap();
        let updated = update_rating_record(&conn, &record, "quasar").unwrap();

        assert_eq!(updated.rating, 1510);
        assert_eq!(updated.wins, 3);
        assert_eq!(updated.tier, "quasar");
    }

    #[test]
    fn candidate_query_excludes_requester_and_out_of_window() {
        let conn = test_conn();
        let requester = create_player(&conn, "me", 1200, "pulsar").unwrap();
        create_player(&conn, "near", 1150, "comet").unwrap();
        create_player(&conn, "far", 1600, "quasar").unwrap();

        let pool = list_candidates(&conn, 900, 1500, requester.id).unwrap();
        let handles: Vec<_> = pool.iter().map(|p| p.handle.as_str()).collect();
        assert_eq!(handles, vec!["near"]);
    }

    #[test]
    fn leaderboard_sorts_and_counts() {
        let conn = test_conn();
        create_player(&conn, "low", 1000, "comet").unwrap();
        create_player(&conn, "high", 1700, "quasar").unwrap();
        create_player(&conn, "mid", 1300, "pulsar").unwrap();

        let filter = LeaderboardFilter {
            handle_contains: None,
            sort_by: SortColumn::Rating,
            sort_order: SortOrder::Desc,
            limit: 2,
            offset: 0,
        };
        let (rows, total) = list_leaderboard(&conn, &filter).unwrap();

        assert_eq!(total, 3);
        let handles: Vec<_> = rows.iter().map(|p| p.handle.as_str()).collect();
        assert_eq!(handles, vec!["high", "mid"]);
    }
}
