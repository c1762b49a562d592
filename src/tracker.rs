//! Quest tracker facade
//!
//! Coordinates the quest store, progression ledger, achievement engine, and
//! mood ledger, and emits change signals after every mutation. All operations
//! run synchronously on the caller's thread; the profile is loaded per
//! operation, mutated through ledger functions, and written back before
//! observers are notified.

use std::collections::HashSet;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::achievements::{self, AchievementId};
use crate::db::TrackerDb;
use crate::events::{Broadcast, Observer, TrackerEvent};
use crate::ledger::{self, LevelUp};
use crate::levels::{self, LevelInfo};
use crate::models::{
    Achievement, Mood, MoodEntry, MotivationMode, Profile, Quest, QuestCategory, QuestPriority,
    QuestStatus,
};
use crate::mood;
use crate::motivation;
use crate::profile::ProfileStore;
use crate::queries::TrackerQuery;
use crate::store::{QuestStore, SqliteQuestStore};
use crate::streaks;

/// Editable quest fields, as collected by a quest form
#[derive(Debug, Clone)]
pub struct QuestDraft {
    pub title: String,
    pub description: String,
    pub category: QuestCategory,
    pub priority: QuestPriority,
    pub exp: u32,
}

/// Central coordinator for the tracker
///
/// Owns the database handle and the observer list. Presentation layers call
/// into it and re-read state when notified.
pub struct QuestTracker {
    db: TrackerDb,
    quests: SqliteQuestStore,
    profiles: ProfileStore,
    broadcast: Broadcast,
}

impl QuestTracker {
    /// Open the tracker over the default database location
    pub fn new() -> Result<Self> {
        Ok(Self::from_db(TrackerDb::open_default()?))
    }

    /// Open the tracker over a specific database path
    pub fn with_path(path: &Path) -> Result<Self> {
        Ok(Self::from_db(TrackerDb::open(path)?))
    }

    fn from_db(db: TrackerDb) -> Self {
        Self {
            quests: SqliteQuestStore::new(db.clone()),
            profiles: ProfileStore::new(db.clone()),
            broadcast: Broadcast::new(),
            db,
        }
    }

    /// Register an observer for change signals
    pub fn subscribe(&mut self, observer: Box<dyn Observer>) {
        self.broadcast.subscribe(observer);
    }

    /// Startup healing: purge mood entries whose quest no longer exists
    ///
    /// Safe to run repeatedly. Returns how many entries were removed.
    pub fn startup(&self) -> Result<usize> {
        let mut profile = self.profiles.load()?;
        let live: HashSet<String> = self.quests.get_all()?.into_iter().map(|q| q.id).collect();

        let orphan_ids: HashSet<String> = profile
            .mood_history
            .iter()
            .filter(|e| !live.contains(&e.quest_id))
            .map(|e| e.quest_id.clone())
            .collect();

        let removed = mood::cleanup_invalid(&mut profile, &live);
        for id in &orphan_ids {
            self.profiles.delete_mood_for_quest(id)?;
        }

        if removed > 0 {
            tracing::debug!("Removed {removed} orphaned mood entries");
            self.broadcast.emit(TrackerEvent::MoodChanged);
        }
        Ok(removed)
    }

    /// Get a query interface for aggregate views
    pub fn query(&self) -> TrackerQuery {
        TrackerQuery::new(self.db.clone())
    }

    // ========================================
    // READ OPERATIONS
    // ========================================

    pub fn quest(&self, id: &str) -> Result<Option<Quest>> {
        self.quests.get_by_id(id)
    }

    pub fn quests(&self) -> Result<Vec<Quest>> {
        self.quests.get_all()
    }

    pub fn profile(&self) -> Result<Profile> {
        self.profiles.load()
    }

    /// Level band snapshot for the current EXP total
    pub fn level_info(&self) -> Result<LevelInfo> {
        Ok(levels::level_info(self.profiles.load()?.exp))
    }

    /// Average mood over the last 7 days (0 when no entries)
    pub fn weekly_mood(&self) -> Result<f64> {
        let profile = self.profiles.load()?;
        Ok(mood::weekly_average(
            &profile.mood_history,
            streaks::today_local(),
        ))
    }

    /// A motivation message for the current profile state
    pub fn motivation_message(&self, seed: usize) -> Result<&'static str> {
        Ok(motivation::pick(&self.profiles.load()?, seed))
    }

    // ========================================
    // QUEST LIFECYCLE
    // ========================================

    /// Create a new pending quest dated today
    pub fn create_quest(&self, draft: QuestDraft) -> Result<Quest> {
        let quest = Quest::new(
            draft.title,
            draft.description,
            draft.category,
            draft.priority,
            draft.exp,
            streaks::today_local(),
        );
        self.quests.save(&quest)?;
        tracing::debug!("Created quest {} ({} exp)", quest.id, quest.exp);
        self.broadcast.emit(TrackerEvent::QuestsChanged);
        Ok(quest)
    }

    /// Apply edited fields to an existing quest
    ///
    /// Status, creation date, completion date, and mood are preserved. When
    /// the quest is already completed, the ledger absorbs the EXP delta; a
    /// non-completed quest's EXP edit never touches the ledger.
    pub fn update_quest(&self, id: &str, draft: QuestDraft) -> Result<Option<Quest>> {
        let Some(existing) = self.quests.get_by_id(id)? else {
            return Ok(None);
        };

        let mut ledger_changed = false;
        let mut unlocked = Vec::new();
        if existing.is_completed() && draft.exp != existing.exp {
            let mut profile = self.profiles.load()?;
            let level_up = ledger::apply_exp_edit(&mut profile, existing.exp, draft.exp);
            if let Some(up) = level_up {
                unlocked.extend(self.unlock_level_up(&mut profile, up)?);
                // level-based rules can cross their threshold on an upward edit
                let ids: Vec<String> =
                    profile.achievements.iter().map(|a| a.id.clone()).collect();
                for id in achievements::check_levels(profile.level, &ids) {
                    if let Some(a) =
                        achievements::unlock_default(&mut profile, id, achievements::now_ms())
                    {
                        self.profiles.insert_achievement(&a)?;
                        unlocked.push(a);
                    }
                }
            }
            self.profiles.save(&profile)?;
            ledger_changed = true;
            tracing::debug!(
                "Adjusted ledger for quest {} exp edit: {} -> {}",
                id,
                existing.exp,
                draft.exp
            );
        }

        let updated = Quest {
            title: draft.title,
            description: draft.description,
            category: draft.category,
            priority: draft.priority,
            exp: draft.exp,
            ..existing
        };
        self.quests.save(&updated)?;

        self.broadcast.emit(TrackerEvent::QuestsChanged);
        if ledger_changed {
            self.broadcast.emit(TrackerEvent::ProfileChanged);
        }
        for _ in &unlocked {
            self.broadcast.emit(TrackerEvent::AchievementUnlocked);
        }
        Ok(Some(updated))
    }

    /// Advance a quest along `pending -> in-progress -> completed`
    ///
    /// Completed is terminal for the cycle: the call leaves the quest
    /// untouched and reports `completed` back. Returns `None` for an unknown
    /// id.
    pub fn cycle_status(&self, id: &str) -> Result<Option<QuestStatus>> {
        let Some(quest) = self.quests.get_by_id(id)? else {
            return Ok(None);
        };

        let Some(next) = quest.status.next_in_cycle() else {
            return Ok(Some(QuestStatus::Completed));
        };

        if next == QuestStatus::Completed {
            let completed = self.complete(quest)?;
            return Ok(Some(completed.status));
        }

        // No progression side effects outside the completed transition
        let mut quest = quest;
        quest.status = next;
        self.quests.save(&quest)?;
        self.broadcast.emit(TrackerEvent::QuestsChanged);
        Ok(Some(next))
    }

    /// Record the user's mood for a (conventionally just-completed) quest
    pub fn record_mood(&self, id: &str, mood_value: Mood) -> Result<Option<MoodEntry>> {
        let Some(mut quest) = self.quests.get_by_id(id)? else {
            return Ok(None);
        };

        quest.mood = Some(mood_value);
        self.quests.save(&quest)?;

        let mut profile = self.profiles.load()?;
        let entry = mood::add_entry(
            &mut profile,
            &quest.id,
            &quest.title,
            Some(mood_value),
            streaks::today_local(),
        )
        .expect("mood is present");
        self.profiles.insert_mood_entry(&entry)?;

        self.broadcast.emit(TrackerEvent::QuestsChanged);
        self.broadcast.emit(TrackerEvent::MoodChanged);
        Ok(Some(entry))
    }

    /// Delete a quest, reversing its ledger contribution when it was
    /// completed and purging its mood entries
    ///
    /// Returns false for an unknown id.
    pub fn delete_quest(&self, id: &str) -> Result<bool> {
        let Some(quest) = self.quests.get_by_id(id)? else {
            return Ok(false);
        };

        let was_completed = quest.is_completed();
        if was_completed {
            let mut profile = self.profiles.load()?;
            ledger::remove_completed_quest(&mut profile, quest.exp);
            mood::remove_for_quest(&mut profile, id);
            self.profiles.save(&profile)?;
        }

        self.profiles.delete_mood_for_quest(id)?;
        self.quests.delete(id)?;
        tracing::debug!("Deleted quest {id} (completed: {was_completed})");

        self.broadcast.emit(TrackerEvent::QuestsChanged);
        self.broadcast.emit(TrackerEvent::MoodChanged);
        if was_completed {
            self.broadcast.emit(TrackerEvent::ProfileChanged);
        }
        Ok(true)
    }

    /// Completed transition: stamp the date, award EXP, update the streak,
    /// and re-evaluate achievement rules
    fn complete(&self, mut quest: Quest) -> Result<Quest> {
        let today = streaks::today_local();
        quest.status = QuestStatus::Completed;
        quest.date_completed = Some(today);
        self.quests.save(&quest)?;

        let mut profile = self.profiles.load()?;
        let mut unlocked = Vec::new();

        if let Some(up) = ledger::add_exp(&mut profile, quest.exp) {
            unlocked.extend(self.unlock_level_up(&mut profile, up)?);
        }

        ledger::record_completion(&mut profile, today);

        let all_quests = self.quests.get_all()?;
        for id in achievements::evaluate(&profile, &all_quests) {
            if let Some(a) = achievements::unlock_default(&mut profile, id, achievements::now_ms())
            {
                self.profiles.insert_achievement(&a)?;
                unlocked.push(a);
            }
        }

        self.profiles.save(&profile)?;
        tracing::debug!(
            "Completed quest {} (+{} exp, streak {})",
            quest.id,
            quest.exp,
            profile.current_streak
        );

        self.broadcast.emit(TrackerEvent::QuestsChanged);
        self.broadcast.emit(TrackerEvent::ProfileChanged);
        for _ in &unlocked {
            self.broadcast.emit(TrackerEvent::AchievementUnlocked);
        }
        Ok(quest)
    }

    /// Unlock the shared level-up achievement for a level increase
    ///
    /// A single id covers every level-up, so only the first increase in the
    /// profile's lifetime produces a record.
    fn unlock_level_up(&self, profile: &mut Profile, up: LevelUp) -> Result<Option<Achievement>> {
        let name = format!("Level {} Achieved!", up.new_level);
        let Some(achievement) =
            achievements::unlock(profile, AchievementId::LevelUp, name, achievements::now_ms())
        else {
            return Ok(None);
        };
        self.profiles.insert_achievement(&achievement)?;
        Ok(Some(achievement))
    }

    // ========================================
    // PROFILE SETTINGS
    // ========================================

    /// Update the daily and weekly completion targets
    pub fn update_goals(&self, daily_goal: u32, weekly_goal: u32) -> Result<Profile> {
        let mut profile = self.profiles.load()?;
        ledger::update_goals(&mut profile, daily_goal, weekly_goal);
        self.profiles.save(&profile)?;
        self.broadcast.emit(TrackerEvent::ProfileChanged);
        Ok(profile)
    }

    /// Change the motivation flavor preference
    pub fn set_motivation_mode(&self, mode: MotivationMode) -> Result<Profile> {
        let mut profile = self.profiles.load()?;
        ledger::set_motivation_mode(&mut profile, mode);
        self.profiles.save(&profile)?;
        self.broadcast.emit(TrackerEvent::ProfileChanged);
        Ok(profile)
    }

    /// Zero the current streak (longest is untouched)
    pub fn reset_streak(&self) -> Result<Profile> {
        let mut profile = self.profiles.load()?;
        ledger::reset_streak(&mut profile);
        self.profiles.save(&profile)?;
        self.broadcast.emit(TrackerEvent::ProfileChanged);
        Ok(profile)
    }

    // ========================================
    // PREVIEW CHANNEL
    // ========================================

    /// Publish the hypothetical ledger delta of an in-flight EXP edit
    ///
    /// For a completed quest the delta is `new_exp - current exp`; for a
    /// not-yet-completed (or new) quest it is the full prospective reward.
    /// Nothing is mutated.
    pub fn preview_exp_change(&self, quest_id: Option<&str>, new_exp: u32) -> Result<i64> {
        let delta = match quest_id {
            Some(id) => match self.quests.get_by_id(id)? {
                Some(quest) if quest.is_completed() => new_exp as i64 - quest.exp as i64,
                _ => new_exp as i64,
            },
            None => new_exp as i64,
        };
        self.broadcast.emit(TrackerEvent::ExpPreview(delta));
        Ok(delta)
    }

    /// Cancel the hypothetical EXP view
    pub fn clear_exp_preview(&self) {
        self.broadcast.emit(TrackerEvent::ExpPreviewCleared);
    }

    // ========================================
    // MAINTENANCE
    // ========================================

    /// Delete all data and restore the profile defaults
    pub fn reset_all(&self) -> Result<()> {
        self.db.reset_all()?;
        tracing::debug!("Reset all tracker data");
        self.broadcast.emit(TrackerEvent::QuestsChanged);
        self.broadcast.emit(TrackerEvent::ProfileChanged);
        self.broadcast.emit(TrackerEvent::AchievementUnlocked);
        self.broadcast.emit(TrackerEvent::MoodChanged);
        Ok(())
    }

    /// Serialize the full data set (profile and quests) as a JSON document
    pub fn export_json(&self) -> Result<String> {
        #[derive(Serialize)]
        struct ExportData {
            profile: Profile,
            quests: Vec<Quest>,
        }

        let data = ExportData {
            profile: self.profiles.load()?,
            quests: self.quests.get_all()?,
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }
}
