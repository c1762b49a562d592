//! Profile persistence
//!
//! Loads and saves the singleton progression ledger. The in-memory `Profile`
//! embeds its achievements and mood history; this store materializes them
//! from their tables in insertion order and writes them back row by row.

use anyhow::Result;
use chrono::NaiveDate;

use crate::db::TrackerDb;
use crate::models::{Achievement, AchievementCategory, Mood, MoodEntry, MotivationMode, Profile};

/// SQLite-backed persistence for the progression ledger
#[derive(Clone)]
pub struct ProfileStore {
    db: TrackerDb,
}

impl ProfileStore {
    pub fn new(db: TrackerDb) -> Self {
        Self { db }
    }

    /// Load the profile, assembling the embedded achievement and mood lists
    pub fn load(&self) -> Result<Profile> {
        let conn = self.db.conn();

        let mut profile = conn.query_row(
            r#"SELECT exp, level, total_quests_completed, current_streak, longest_streak,
                      last_completion_date, motivation_mode, daily_goal, weekly_goal
               FROM profile WHERE id = 1"#,
            [],
            |r| {
                Ok(Profile {
                    exp: r.get(0)?,
                    level: r.get(1)?,
                    total_quests_completed: r.get(2)?,
                    current_streak: r.get(3)?,
                    longest_streak: r.get(4)?,
                    last_completion_date: r
                        .get::<_, Option<String>>(5)?
                        .and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()),
                    motivation_mode: r
                        .get::<_, String>(6)
                        .map(|s| MotivationMode::from_str(&s).unwrap_or(MotivationMode::Warrior))?,
                    daily_goal: r.get(7)?,
                    weekly_goal: r.get(8)?,
                    achievements: Vec::new(),
                    mood_history: Vec::new(),
                })
            },
        )?;

        let mut stmt = conn.prepare(
            "SELECT id, name, description, icon, category, unlocked_at
             FROM achievements ORDER BY rowid",
        )?;
        profile.achievements = stmt
            .query_map([], |r| {
                Ok((
                    r.get::<_, String>(0)?,
                    r.get::<_, String>(1)?,
                    r.get::<_, String>(2)?,
                    r.get::<_, String>(3)?,
                    r.get::<_, String>(4)?,
                    r.get::<_, i64>(5)?,
                ))
            })?
            .filter_map(|r| r.ok())
            .map(|(id, name, description, icon, category, unlocked_at)| Achievement {
                id,
                name,
                description,
                icon,
                unlocked_at,
                category: AchievementCategory::from_str(&category)
                    .unwrap_or(AchievementCategory::Special),
            })
            .collect();

        let mut stmt = conn.prepare(
            "SELECT date, mood, quest_id, quest_title FROM mood_history ORDER BY id",
        )?;
        profile.mood_history = stmt
            .query_map([], |r| {
                Ok((
                    r.get::<_, String>(0)?,
                    r.get::<_, String>(1)?,
                    r.get::<_, String>(2)?,
                    r.get::<_, String>(3)?,
                ))
            })?
            .filter_map(|r| r.ok())
            .filter_map(|(date, mood, quest_id, quest_title)| {
                Some(MoodEntry {
                    date: NaiveDate::parse_from_str(&date, "%Y-%m-%d").ok()?,
                    mood: Mood::from_str(&mood)?,
                    quest_id,
                    quest_title,
                })
            })
            .collect();

        Ok(profile)
    }

    /// Persist the ledger's scalar fields (counters, streaks, goals, mode)
    pub fn save(&self, profile: &Profile) -> Result<()> {
        let conn = self.db.conn();
        conn.execute(
            r#"UPDATE profile SET
                   exp = ?1, level = ?2, total_quests_completed = ?3,
                   current_streak = ?4, longest_streak = ?5, last_completion_date = ?6,
                   motivation_mode = ?7, daily_goal = ?8, weekly_goal = ?9
               WHERE id = 1"#,
            rusqlite::params![
                profile.exp,
                profile.level,
                profile.total_quests_completed,
                profile.current_streak,
                profile.longest_streak,
                profile
                    .last_completion_date
                    .map(|d| d.format("%Y-%m-%d").to_string()),
                profile.motivation_mode.as_str(),
                profile.daily_goal,
                profile.weekly_goal,
            ],
        )?;
        Ok(())
    }

    /// Persist an unlocked achievement; a second insert for the same id is
    /// ignored, so unlocks stay idempotent across restarts
    pub fn insert_achievement(&self, achievement: &Achievement) -> Result<()> {
        let conn = self.db.conn();
        conn.execute(
            r#"INSERT OR IGNORE INTO achievements
               (id, name, description, icon, category, unlocked_at)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6)"#,
            rusqlite::params![
                achievement.id,
                achievement.name,
                achievement.description,
                achievement.icon,
                achievement.category.as_str(),
                achievement.unlocked_at,
            ],
        )?;
        Ok(())
    }

    /// Append a mood entry
    pub fn insert_mood_entry(&self, entry: &MoodEntry) -> Result<()> {
        let conn = self.db.conn();
        conn.execute(
            "INSERT INTO mood_history (date, mood, quest_id, quest_title)
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![
                entry.date.format("%Y-%m-%d").to_string(),
                entry.mood.as_str(),
                entry.quest_id,
                entry.quest_title,
            ],
        )?;
        Ok(())
    }

    /// Delete every mood entry referencing the given quest
    pub fn delete_mood_for_quest(&self, quest_id: &str) -> Result<usize> {
        let conn = self.db.conn();
        let deleted = conn.execute("DELETE FROM mood_history WHERE quest_id = ?1", [quest_id])?;
        Ok(deleted)
    }
}
