//! LifeQuest - gamified productivity tracker core
//!
//! Turns task completion into a progression game: quests award EXP, EXP
//! drives a quadratic level curve, consecutive completion days build a
//! streak, and rule-based achievements unlock along the way. Moods can be
//! recorded per completion and averaged over the week. State lives in a
//! SQLite database (`~/.lifequest/tracker.db`).
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐      ┌──────────────────┐
//! │   Quest Store    │      │ Progression      │
//! │   (CRUD by id)   │      │ Ledger (profile) │
//! └────────┬─────────┘      └────────┬─────────┘
//!          │                         │
//!          └─────────┬───────────────┘
//!                    ▼
//!             QuestTracker ──▶ observers (quests / profile /
//!                               achievements / mood signals)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let mut tracker = QuestTracker::new()?;
//! tracker.subscribe(Box::new(|event: &TrackerEvent| println!("{event:?}")));
//! tracker.startup()?;
//!
//! let quest = tracker.create_quest(draft)?;
//! tracker.cycle_status(&quest.id)?; // pending -> in-progress
//! tracker.cycle_status(&quest.id)?; // in-progress -> completed, EXP awarded
//! tracker.record_mood(&quest.id, Mood::Fired)?;
//! ```

pub mod achievements;
pub mod db;
pub mod events;
pub mod ledger;
pub mod levels;
pub mod models;
pub mod mood;
pub mod motivation;
pub mod profile;
pub mod queries;
pub mod store;
pub mod streaks;
pub mod tracker;

pub use db::TrackerDb;
pub use events::{Observer, TrackerEvent};
pub use levels::{LevelInfo, exp_to_next_level, level_for_exp, level_info};
pub use models::{
    Achievement, AchievementCategory, DailySummary, Mood, MoodEntry, MotivationMode, Profile,
    Quest, QuestCategory, QuestPriority, QuestStatus, WeeklySummary,
};
pub use profile::ProfileStore;
pub use queries::TrackerQuery;
pub use store::{QuestStore, SqliteQuestStore};
pub use tracker::{QuestDraft, QuestTracker};
