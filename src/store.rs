//! Quest record store
//!
//! CRUD over quest entities. The store owns identity and field storage only;
//! progression rules live in the ledger and tracker. The trait is the seam
//! the core depends on, with the SQLite implementation as the default
//! collaborator.

use anyhow::Result;
use chrono::NaiveDate;

use crate::db::TrackerDb;
use crate::models::{Mood, Quest, QuestCategory, QuestPriority, QuestStatus};

/// Storage contract for quest records
pub trait QuestStore {
    fn get_all(&self) -> Result<Vec<Quest>>;
    fn get_by_id(&self, id: &str) -> Result<Option<Quest>>;
    /// Upsert by id
    fn save(&self, quest: &Quest) -> Result<()>;
    fn delete(&self, id: &str) -> Result<()>;
}

/// SQLite-backed quest store
#[derive(Clone)]
pub struct SqliteQuestStore {
    db: TrackerDb,
}

impl SqliteQuestStore {
    pub fn new(db: TrackerDb) -> Self {
        Self { db }
    }
}

const QUEST_COLUMNS: &str =
    "id, title, description, category, priority, status, exp, date_created, date_completed, mood";

type QuestRow = (
    String,
    String,
    String,
    String,
    String,
    String,
    u32,
    String,
    Option<String>,
    Option<String>,
);

/// Rebuild a quest from its raw row; `None` drops rows with unparseable fields
fn row_to_quest(row: QuestRow) -> Option<Quest> {
    let (id, title, description, category, priority, status, exp, created, completed, mood) = row;
    Some(Quest {
        id,
        title,
        description,
        category: QuestCategory::from_str(&category)?,
        priority: QuestPriority::from_str(&priority)?,
        status: QuestStatus::from_str(&status)?,
        exp,
        date_created: parse_date(&created)?,
        date_completed: match completed {
            Some(d) => Some(parse_date(&d)?),
            None => None,
        },
        mood: match mood {
            Some(m) => Mood::from_str(&m),
            None => None,
        },
    })
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

fn date_string(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

impl QuestStore for SqliteQuestStore {
    fn get_all(&self) -> Result<Vec<Quest>> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {QUEST_COLUMNS} FROM quests ORDER BY date_created, id"
        ))?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get(0)?,
                row.get(1)?,
                row.get(2)?,
                row.get(3)?,
                row.get(4)?,
                row.get(5)?,
                row.get(6)?,
                row.get(7)?,
                row.get(8)?,
                row.get(9)?,
            ))
        })?;
        Ok(rows
            .filter_map(|r| r.ok())
            .filter_map(row_to_quest)
            .collect())
    }

    fn get_by_id(&self, id: &str) -> Result<Option<Quest>> {
        let conn = self.db.conn();
        let mut stmt =
            conn.prepare(&format!("SELECT {QUEST_COLUMNS} FROM quests WHERE id = ?1"))?;
        let mut rows = stmt.query_map([id], |row| {
            Ok((
                row.get(0)?,
                row.get(1)?,
                row.get(2)?,
                row.get(3)?,
                row.get(4)?,
                row.get(5)?,
                row.get(6)?,
                row.get(7)?,
                row.get(8)?,
                row.get(9)?,
            ))
        })?;
        Ok(rows.next().transpose()?.and_then(row_to_quest))
    }

    fn save(&self, quest: &Quest) -> Result<()> {
        let conn = self.db.conn();
        conn.execute(
            r#"INSERT OR REPLACE INTO quests
               (id, title, description, category, priority, status, exp,
                date_created, date_completed, mood)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"#,
            rusqlite::params![
                quest.id,
                quest.title,
                quest.description,
                quest.category.as_str(),
                quest.priority.as_str(),
                quest.status.as_str(),
                quest.exp,
                date_string(quest.date_created),
                quest.date_completed.map(date_string),
                quest.mood.map(|m| m.as_str()),
            ],
        )?;
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<()> {
        let conn = self.db.conn();
        conn.execute("DELETE FROM quests WHERE id = ?1", [id])?;
        Ok(())
    }
}
