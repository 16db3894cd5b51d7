use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use rusqlite::{Connection, params};

use super::models::MatchRow;

const MATCH_COLUMNS: &str = "id, match_id, first_player_id, second_player_id, result, \
     first_rating_before, first_rating_after, second_rating_before, second_rating_after, \
     played_at, created_at";

#[allow(clippy::too_many_arguments)]
pub fn insert_match(
    conn: &Connection,
    match_id: i64,
    first_player_id: i64,
    second_player_id: i64,
    result: &str,
    first_rating_before: i32,
    first_rating_after: i32,
    second_rating_before: i32,
    second_rating_after: i32,
    played_at: NaiveDateTime,
) -> Result<MatchRow> {
    let sql = format!(
        "INSERT INTO matches (match_id, first_player_id, second_player_id, result, \
         first_rating_before, first_rating_after, second_rating_before, second_rating_after, \
         played_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9) RETURNING {MATCH_COLUMNS}"
    );

    conn.query_row(
        &sql,
        params![
            match_id,
            first_player_id,
            second_player_id,
            result,
            first_rating_before,
            first_rating_after,
            second_rating_before,
            second_rating_after,
            played_at
        ],
        parse_match_row,
    )
    .with_context(|| format!("Failed to insert match {match_id}"))
}

pub fn match_exists(conn: &Connection, match_id: i64) -> Result<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM matches WHERE match_id = ?1)",
        params![match_id],
        |row| row.get(0),
    )
    .context("Failed to check for existing match")
}

pub fn list_recent_for_player(
    conn: &Connection,
    player_id: i64,
    limit: usize,
) -> Result<Vec<MatchRow>> {
    let sql = format!(
        "SELECT {MATCH_COLUMNS} FROM matches \
         WHERE first_player_id = ?1 OR second_player_id = ?1 \
         ORDER BY played_at DESC, id DESC LIMIT ?2"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![player_id, limit as i64], parse_match_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

/// Full match log in application order, for replay.
pub fn list_chronological(conn: &Connection) -> Result<Vec<MatchRow>> {
    let sql = format!("SELECT {MATCH_COLUMNS} FROM matches ORDER BY played_at ASC, id ASC");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], parse_match_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn list_between_players(
    conn: &Connection,
    first_player_id: i64,
    second_player_id: i64,
) -> Result<Vec<MatchRow>> {
    let sql = format!(
        "SELECT {MATCH_COLUMNS} FROM matches \
         WHERE (first_player_id = ?1 AND second_player_id = ?2) \
            OR (first_player_id = ?2 AND second_player_id = ?1) \
         ORDER BY played_at DESC, id DESC"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![first_player_id, second_player_id], parse_match_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

/// Rewrites the stored snapshots for one match row during replay.
pub fn update_snapshots(
    conn: &Connection,
    row_id: i64,
    first_rating_before: i32,
    first_rating_after: i32,
    second_rating_before: i32,
    second_rating_after: i32,
) -> Result<()> {
    let sql = "UPDATE matches SET first_rating_before = ?1, first_rating_after = ?2, \
               second_rating_before = ?3, second_rating_after = ?4 WHERE id = ?5";

    conn.execute(
        sql,
        params![
            first_rating_before,
            first_rating_after,
            second_rating_before,
            second_rating_after,
            row_id
        ],
    )
    .with_context(|| format!("Failed to update snapshots for match row {row_id}"))
    .map(|_| ())
}

fn parse_match_row(row: &rusqlite::Row) -> rusqlite::Result<MatchRow> {
    Ok(MatchRow {
        id: row.get(0)?,
        match_id: row.get(1)?,
        first_player_id: row.get(2)?,
        second_player_id: row.get(3)?,
        result: row.get(4)?,
        first_rating_before: row.get(5)?,
        first_rating_after: row.get(6)?,
        second_rating_before: row.get(7)?,
        second_rating_after: row.get(8)?,
        played_at: row.get(9)?,
        created_at: row.get(10)?,
    })
}
