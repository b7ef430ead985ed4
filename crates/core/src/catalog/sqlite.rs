//! SQLite-backed game catalog implementation.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use super::migrations;
use super::{CatalogError, Game, GameStore, StorePatch};

const GAME_COLUMNS: &str = "game_id, game_name, search_name, player_count, header_image, \
     price_us, discount, short_description, review_score, last_updated";

/// SQLite-backed game catalog.
pub struct SqliteGameStore {
    conn: Mutex<Connection>,
}

impl SqliteGameStore {
    /// Open (or create) the database file and bring its schema up to date.
    pub fn new(path: &Path) -> Result<Self, CatalogError> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Create an in-memory SQLite catalog (useful for testing).
    pub fn in_memory() -> Result<Self, CatalogError> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn)
    }

    fn from_connection(mut conn: Connection) -> Result<Self, CatalogError> {
        migrations::migrate(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, CatalogError> {
        self.conn
            .lock()
            .map_err(|_| CatalogError::Internal("catalog connection lock poisoned".to_string()))
    }

    fn insert_games(conn: &Connection, games: &[Game]) -> Result<(), CatalogError> {
        let mut stmt = conn.prepare_cached(&format!(
            "INSERT OR REPLACE INTO games ({GAME_COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"
        ))?;

        for game in games {
            stmt.execute(params![
                &game.game_id,
                &game.game_name,
                &game.search_name,
                game.player_count,
                &game.header_image,
                &game.price_us,
                game.discount,
                &game.short_description,
                game.review_score,
                game.last_updated.timestamp_millis(),
            ])?;
        }

        Ok(())
    }

    fn query_games(
        conn: &Connection,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> Result<Vec<Game>, CatalogError> {
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map(params, Self::row_to_game)?;

        let mut games = Vec::new();
        for row in rows {
            games.push(row?);
        }
        Ok(games)
    }

    fn row_to_game(row: &rusqlite::Row) -> rusqlite::Result<Game> {
        let last_updated_ms: i64 = row.get(9)?;

        Ok(Game {
            game_id: row.get(0)?,
            game_name: row.get(1)?,
            search_name: row.get(2)?,
            player_count: row.get(3)?,
            header_image: row.get(4)?,
            price_us: row.get(5)?,
            discount: row.get(6)?,
            short_description: row.get(7)?,
            review_score: row.get(8)?,
            last_updated: DateTime::from_timestamp_millis(last_updated_ms).unwrap_or_default(),
        })
    }
}

impl GameStore for SqliteGameStore {
    fn upsert_all(&self, games: &[Game]) -> Result<(), CatalogError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        Self::insert_games(&tx, games)?;
        tx.commit()?;
        Ok(())
    }

    fn replace_all(&self, games: &[Game]) -> Result<(), CatalogError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM games", [])?;
        Self::insert_games(&tx, games)?;
        tx.commit()?;
        Ok(())
    }

    fn clear(&self) -> Result<(), CatalogError> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM games", [])?;
        Ok(())
    }

    fn get_all(&self) -> Result<Vec<Game>, CatalogError> {
        let conn = self.conn()?;
        Self::query_games(&conn, &format!("SELECT {GAME_COLUMNS} FROM games"), [])
    }

    fn get_by_id(&self, game_id: &str) -> Result<Option<Game>, CatalogError> {
        let conn = self.conn()?;
        let game = conn
            .query_row(
                &format!("SELECT {GAME_COLUMNS} FROM games WHERE game_id = ?"),
                params![game_id],
                Self::row_to_game,
            )
            .optional()?;
        Ok(game)
    }

    fn count(&self) -> Result<u64, CatalogError> {
        let conn = self.conn()?;
        let count: u64 = conn.query_row("SELECT COUNT(*) FROM games", [], |row| row.get(0))?;
        Ok(count)
    }

    fn update_player_count(&self, game_id: &str, player_count: u32) -> Result<bool, CatalogError> {
        let conn = self.conn()?;
        let rows = conn.execute(
            "UPDATE games SET player_count = ?2 WHERE game_id = ?1",
            params![game_id, player_count],
        )?;
        Ok(rows > 0)
    }

    fn update_enrichment(
        &self,
        game_id: &str,
        patch: &StorePatch,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, CatalogError> {
        let conn = self.conn()?;
        let rows = conn.execute(
            "UPDATE games SET
                header_image = COALESCE(?2, header_image),
                price_us = ?3,
                discount = ?4,
                short_description = COALESCE(?5, short_description),
                last_updated = MAX(last_updated, ?6)
             WHERE game_id = ?1",
            params![
                game_id,
                &patch.header_image,
                &patch.price_us,
                patch.discount,
                &patch.short_description,
                updated_at.timestamp_millis(),
            ],
        )?;
        Ok(rows > 0)
    }

    fn update_review_score(&self, game_id: &str, review_score: i32) -> Result<bool, CatalogError> {
        let conn = self.conn()?;
        let rows = conn.execute(
            "UPDATE games SET review_score = ?2 WHERE game_id = ?1",
            params![game_id, review_score],
        )?;
        Ok(rows > 0)
    }

    fn search(&self, pattern: &str) -> Result<Vec<Game>, CatalogError> {
        let conn = self.conn()?;
        Self::query_games(
            &conn,
            &format!("SELECT {GAME_COLUMNS} FROM games WHERE search_name LIKE ?1"),
            params![pattern],
        )
    }

    fn top_n(&self, limit: u32) -> Result<Vec<Game>, CatalogError> {
        let conn = self.conn()?;
        Self::query_games(
            &conn,
            &format!(
                "SELECT {GAME_COLUMNS} FROM games
                 ORDER BY player_count DESC, game_id ASC
                 LIMIT ?1"
            ),
            params![limit],
        )
    }
}
