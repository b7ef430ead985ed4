//! Forward-only schema migrations for the `games` table.
//!
//! The applied version lives in `PRAGMA user_version`. Every migration after
//! the first only adds columns with a fixed default, so rows written by an
//! older schema stay readable.

use rusqlite::Connection;
use tracing::{debug, info};

use super::normalize::normalize_search_name;
use super::CatalogError;

/// Version that introduced `search_name`.
const SEARCH_NAME_VERSION: u32 = 2;

/// Ordered migrations; entry `i` upgrades the schema from version `i` to `i + 1`.
const MIGRATIONS: &[&str] = &[
    // 1: base table
    r#"
    CREATE TABLE IF NOT EXISTS games (
        game_id TEXT PRIMARY KEY,
        game_name TEXT NOT NULL,
        player_count INTEGER NOT NULL DEFAULT 0,
        last_updated INTEGER NOT NULL DEFAULT 0
    );
    CREATE INDEX IF NOT EXISTS idx_games_player_count ON games(player_count DESC);
    "#,
    // 2: search key
    r#"
    ALTER TABLE games ADD COLUMN search_name TEXT NOT NULL DEFAULT '';
    CREATE INDEX IF NOT EXISTS idx_games_search_name ON games(search_name);
    "#,
    // 3: header image
    r#"
    ALTER TABLE games ADD COLUMN header_image TEXT NOT NULL DEFAULT 'No URL';
    "#,
    // 4: store metadata
    r#"
    ALTER TABLE games ADD COLUMN price_us TEXT NOT NULL DEFAULT '$0.0';
    ALTER TABLE games ADD COLUMN discount INTEGER NOT NULL DEFAULT 0;
    ALTER TABLE games ADD COLUMN short_description TEXT NOT NULL DEFAULT 'None';
    "#,
    // 5: review score
    r#"
    ALTER TABLE games ADD COLUMN review_score INTEGER NOT NULL DEFAULT 0;
    "#,
];

/// Latest schema version.
pub const SCHEMA_VERSION: u32 = MIGRATIONS.len() as u32;

/// Current schema version of the database.
pub fn schema_version(conn: &Connection) -> Result<u32, CatalogError> {
    let version: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    Ok(version)
}

/// Bring the schema up to [`SCHEMA_VERSION`], one transaction per step.
///
/// Returns the number of migrations applied.
pub fn migrate(conn: &mut Connection) -> Result<u32, CatalogError> {
    let current = schema_version(conn)?;
    if current > SCHEMA_VERSION {
        return Err(CatalogError::Internal(format!(
            "database schema version {} is newer than supported version {}",
            current, SCHEMA_VERSION
        )));
    }

    let mut applied = 0;
    for (index, sql) in MIGRATIONS.iter().enumerate().skip(current as usize) {
        let version = index as u32 + 1;
        debug!("Applying games schema migration {}", version);

        let tx = conn.transaction()?;
        tx.execute_batch(sql)?;
        if version == SEARCH_NAME_VERSION {
            backfill_search_names(&tx)?;
        }
        tx.pragma_update(None, "user_version", version)?;
        tx.commit()?;

        applied += 1;
    }

    if applied > 0 {
        info!(
            "Games schema migrated from version {} to {}",
            current, SCHEMA_VERSION
        );
    }

    Ok(applied)
}

/// Derive `search_name` for rows stored before the column existed.
fn backfill_search_names(conn: &Connection) -> Result<(), CatalogError> {
    let rows: Vec<(String, String)> = {
        let mut stmt = conn.prepare("SELECT game_id, game_name FROM games")?;
        let rows = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<Result<Vec<_>, rusqlite::Error>>()?;
        rows
    };

    let mut update = conn.prepare("UPDATE games SET search_name = ?1 WHERE game_id = ?2")?;
    for (game_id, game_name) in &rows {
        update.execute(rusqlite::params![normalize_search_name(game_name), game_id])?;
    }

    if !rows.is_empty() {
        debug!("Backfilled search names for {} games", rows.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrate_fresh_database() {
        let mut conn = Connection::open_in_memory().unwrap();
        assert_eq!(schema_version(&conn).unwrap(), 0);

        let applied = migrate(&mut conn).unwrap();
        assert_eq!(applied, 5);
        assert_eq!(schema_version(&conn).unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn test_migrate_is_noop_when_current() {
        let mut conn = Connection::open_in_memory().unwrap();
        migrate(&mut conn).unwrap();

        assert_eq!(migrate(&mut conn).unwrap(), 0);
    }

    #[test]
    fn test_migrate_from_version_one_keeps_rows_and_fills_defaults() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(MIGRATIONS[0]).unwrap();
        conn.pragma_update(None, "user_version", 1).unwrap();
        conn.execute(
            "INSERT INTO games (game_id, game_name, player_count, last_updated) VALUES ('730', 'Counter-Strike 2', 42, 0)",
            [],
        )
        .unwrap();

        let applied = migrate(&mut conn).unwrap();
        assert_eq!(applied, 4);

        let row: (String, String, i64, String, String, i64, String, i64) = conn
            .query_row(
                "SELECT game_name, search_name, player_count, header_image, price_us, discount, short_description, review_score
                 FROM games WHERE game_id = '730'",
                [],
                |row| {
                    Ok((
                        row.get(0)?,
                        row.get(1)?,
                        row.get(2)?,
                        row.get(3)?,
                        row.get(4)?,
                        row.get(5)?,
                        row.get(6)?,
                        row.get(7)?,
                    ))
                },
            )
            .unwrap();

        assert_eq!(
            row,
            (
                "Counter-Strike 2".to_string(),
                "counterstrike 2".to_string(),
                42,
                "No URL".to_string(),
                "$0.0".to_string(),
                0,
                "None".to_string(),
                0
            )
        );
    }

    #[test]
    fn test_migrate_rejects_newer_schema() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.pragma_update(None, "user_version", SCHEMA_VERSION + 1)
            .unwrap();

        assert!(matches!(
            migrate(&mut conn),
            Err(CatalogError::Internal(_))
        ));
    }
}
