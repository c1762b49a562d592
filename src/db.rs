//! SQLite connection and schema management for the tracker
//!
//! Manages the `~/.lifequest/tracker.db` database with automatic schema
//! migration. One database holds the quest collection, the singleton profile
//! row, and the achievement and mood history tables.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Database wrapper shared by the stores
#[derive(Clone)]
pub struct TrackerDb {
    pub(crate) conn: Arc<Mutex<Connection>>,
}

impl TrackerDb {
    /// Open or create the tracker database at the default location
    /// (`~/.lifequest/tracker.db`)
    pub fn open_default() -> Result<Self> {
        Self::open(&default_db_path())
    }

    /// Open or create the tracker database at a specific path
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data dir: {}", parent.display()))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open tracker db: {}", path.display()))?;

        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.init_schema()?;
        Ok(db)
    }

    /// Get a reference to the connection
    pub(crate) fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().expect("Tracker DB lock poisoned")
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.conn();
        conn.execute_batch(SCHEMA_SQL)?;
        drop(conn);
        self.run_migrations()?;
        Ok(())
    }

    /// Run any pending migrations
    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn();

        let version: i32 = conn
            .query_row(
                "SELECT COALESCE(MAX(version), 0) FROM schema_version",
                [],
                |r| r.get(0),
            )
            .unwrap_or(0);

        // Migration 2: quests gained a mood column once mood tracking landed
        if version < 2 {
            let has_mood: bool = conn
                .prepare("SELECT COUNT(*) FROM pragma_table_info('quests') WHERE name = 'mood'")
                .and_then(|mut s| s.query_row([], |r| r.get::<_, i32>(0)))
                .map(|c| c > 0)
                .unwrap_or(false);

            if !has_mood {
                conn.execute_batch("ALTER TABLE quests ADD COLUMN mood TEXT;")?;
            }

            conn.execute("INSERT OR REPLACE INTO schema_version VALUES (2)", [])?;
        }

        Ok(())
    }

    /// Delete all quests, achievements, and mood history and reset the
    /// profile row to its defaults
    pub fn reset_all(&self) -> Result<()> {
        let conn = self.conn();
        conn.execute_batch(
            r#"
            DELETE FROM quests;
            DELETE FROM achievements;
            DELETE FROM mood_history;
            UPDATE profile SET
                exp = 0, level = 1, total_quests_completed = 0,
                current_streak = 0, longest_streak = 0, last_completion_date = NULL,
                motivation_mode = 'warrior', daily_goal = 3, weekly_goal = 15
            WHERE id = 1;
            "#,
        )?;
        Ok(())
    }
}

/// Default database location under the user's home directory
fn default_db_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".lifequest")
        .join("tracker.db")
}

/// SQL schema for the tracker database
const SCHEMA_SQL: &str = r#"
-- Quest collection, keyed by id
CREATE TABLE IF NOT EXISTS quests (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    category TEXT NOT NULL,
    priority TEXT NOT NULL,
    status TEXT NOT NULL,
    exp INTEGER NOT NULL DEFAULT 0,
    date_created TEXT NOT NULL,
    date_completed TEXT,
    mood TEXT
);
CREATE INDEX IF NOT EXISTS idx_quests_status ON quests(status);
CREATE INDEX IF NOT EXISTS idx_quests_date_completed ON quests(date_completed);

-- Progression ledger (singleton row)
CREATE TABLE IF NOT EXISTS profile (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    exp INTEGER DEFAULT 0,
    level INTEGER DEFAULT 1,
    total_quests_completed INTEGER DEFAULT 0,
    current_streak INTEGER DEFAULT 0,
    longest_streak INTEGER DEFAULT 0,
    last_completion_date TEXT,
    motivation_mode TEXT DEFAULT 'warrior',
    daily_goal INTEGER DEFAULT 3,
    weekly_goal INTEGER DEFAULT 15
);
INSERT OR IGNORE INTO profile (id) VALUES (1);

-- Unlocked achievements, at most one row per id
CREATE TABLE IF NOT EXISTS achievements (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    description TEXT NOT NULL,
    icon TEXT NOT NULL,
    category TEXT NOT NULL,
    unlocked_at INTEGER NOT NULL
);

-- Mood entries in creation order
CREATE TABLE IF NOT EXISTS mood_history (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    date TEXT NOT NULL,
    mood TEXT NOT NULL,
    quest_id TEXT NOT NULL,
    quest_title TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_mood_quest ON mood_history(quest_id);

-- Schema version
CREATE TABLE IF NOT EXISTS schema_version (version INTEGER PRIMARY KEY);
INSERT OR IGNORE INTO schema_version VALUES (2);
"#;
