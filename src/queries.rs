//! Aggregate queries for goal tracking
//!
//! Read-only daily and weekly rollups computed from the database, used by the
//! progression display to show goal progress.

use anyhow::Result;
use chrono::{Days, NaiveDate};

use crate::db::TrackerDb;
use crate::models::{DailySummary, Mood, WeeklySummary};

/// Query interface over the tracker database
#[derive(Clone)]
pub struct TrackerQuery {
    db: TrackerDb,
}

impl TrackerQuery {
    pub fn new(db: TrackerDb) -> Self {
        Self { db }
    }

    /// Completions and EXP gained on `today`, against the daily goal
    pub fn daily_summary(&self, today: NaiveDate) -> Result<DailySummary> {
        let conn = self.db.conn();
        let day = today.format("%Y-%m-%d").to_string();

        let (quests_completed, exp_gained): (u32, u32) = conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(exp), 0) FROM quests
             WHERE status = 'completed' AND date_completed = ?1",
            [&day],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )?;

        let daily_goal: u32 =
            conn.query_row("SELECT daily_goal FROM profile WHERE id = 1", [], |r| {
                r.get(0)
            })?;

        Ok(DailySummary {
            date: today,
            quests_completed,
            exp_gained,
            daily_goal,
        })
    }

    /// Rollup of the trailing 7 days ending on `today`
    pub fn weekly_summary(&self, today: NaiveDate) -> Result<WeeklySummary> {
        let conn = self.db.conn();
        let week_start = today - Days::new(6);
        let start = week_start.format("%Y-%m-%d").to_string();

        let (completed_quests, total_exp): (u32, u32) = conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(exp), 0) FROM quests
             WHERE status = 'completed' AND date_completed >= ?1",
            [&start],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )?;

        let total_quests: u32 =
            conn.query_row("SELECT COUNT(*) FROM quests", [], |r| r.get(0))?;

        let (current_streak, weekly_goal): (u32, u32) = conn.query_row(
            "SELECT current_streak, weekly_goal FROM profile WHERE id = 1",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )?;

        // Mood uses the same trailing window as the weekly mood average
        let mut stmt = conn.prepare("SELECT date, mood FROM mood_history")?;
        let week_ago = today - Days::new(7);
        let scores: Vec<u32> = stmt
            .query_map([], |r| Ok((r.get::<_, String>(0)?, r.get::<_, String>(1)?)))?
            .filter_map(|r| r.ok())
            .filter_map(|(date, mood)| {
                let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d").ok()?;
                let mood = Mood::from_str(&mood)?;
                (date >= week_ago).then(|| mood.score())
            })
            .collect();
        let average_mood = if scores.is_empty() {
            0.0
        } else {
            scores.iter().sum::<u32>() as f64 / scores.len() as f64
        };

        Ok(WeeklySummary {
            week_start,
            total_quests,
            completed_quests,
            total_exp,
            average_mood,
            streak_days: current_streak,
            weekly_goal,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Quest, QuestCategory, QuestPriority, QuestStatus};
    use crate::store::{QuestStore, SqliteQuestStore};
    use tempfile::tempdir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn completed_quest(exp: u32, day: NaiveDate) -> Quest {
        let mut quest = Quest::new(
            "q",
            "",
            QuestCategory::Work,
            QuestPriority::Medium,
            exp,
            day,
        );
        quest.status = QuestStatus::Completed;
        quest.date_completed = Some(day);
        quest
    }

    #[test]
    fn test_daily_summary() {
        let dir = tempdir().unwrap();
        let db = TrackerDb::open(&dir.path().join("test_tracker.db")).unwrap();
        let store = SqliteQuestStore::new(db.clone());
        let today = date(2025, 3, 14);

        store.save(&completed_quest(50, today)).unwrap();
        store.save(&completed_quest(60, today)).unwrap();
        store.save(&completed_quest(70, date(2025, 3, 13))).unwrap();
        store
            .save(&Quest::new(
                "pending",
                "",
                QuestCategory::Home,
                QuestPriority::Low,
                40,
                today,
            ))
            .unwrap();

        let summary = TrackerQuery::new(db).daily_summary(today).unwrap();
        assert_eq!(summary.quests_completed, 2);
        assert_eq!(summary.exp_gained, 110);
        assert_eq!(summary.daily_goal, 3);
        assert!(!summary.goal_met());
    }

    #[test]
    fn test_weekly_summary_window() {
        let dir = tempdir().unwrap();
        let db = TrackerDb::open(&dir.path().join("test_tracker.db")).unwrap();
        let store = SqliteQuestStore::new(db.clone());
        let today = date(2025, 3, 14);

        store.save(&completed_quest(50, today)).unwrap();
        store.save(&completed_quest(60, date(2025, 3, 8))).unwrap(); // inside window
        store.save(&completed_quest(70, date(2025, 3, 1))).unwrap(); // outside window

        let summary = TrackerQuery::new(db).weekly_summary(today).unwrap();
        assert_eq!(summary.week_start, date(2025, 3, 8));
        assert_eq!(summary.completed_quests, 2);
        assert_eq!(summary.total_exp, 110);
        assert_eq!(summary.total_quests, 3);
        assert_eq!(summary.average_mood, 0.0);
    }
}
