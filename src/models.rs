//! Core data models for the quest tracker
//!
//! These structures represent the data stored in and loaded from the tracker
//! database. JSON field names follow the persisted camelCase layout.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a quest
///
/// Quests cycle `pending -> in-progress -> completed`; completed is terminal
/// with respect to the cycle (only deletion or a direct edit moves a quest
/// out of it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestStatus {
    Pending,
    InProgress,
    Completed,
}

impl QuestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "in-progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    /// Next state on the cycle button; `None` once completed
    pub fn next_in_cycle(&self) -> Option<Self> {
        match self {
            Self::Pending => Some(Self::InProgress),
            Self::InProgress => Some(Self::Completed),
            Self::Completed => None,
        }
    }
}

/// Fixed quest category set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestCategory {
    Learning,
    Work,
    Health,
    Social,
    Hobby,
    Home,
    Other,
}

impl QuestCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Learning => "learning",
            Self::Work => "work",
            Self::Health => "health",
            Self::Social => "social",
            Self::Hobby => "hobby",
            Self::Home => "home",
            Self::Other => "other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "learning" => Some(Self::Learning),
            "work" => Some(Self::Work),
            "health" => Some(Self::Health),
            "social" => Some(Self::Social),
            "hobby" => Some(Self::Hobby),
            "home" => Some(Self::Home),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    pub fn all() -> &'static [QuestCategory] {
        &[
            Self::Learning,
            Self::Work,
            Self::Health,
            Self::Social,
            Self::Hobby,
            Self::Home,
            Self::Other,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Learning => "Learning",
            Self::Work => "Work",
            Self::Health => "Health",
            Self::Social => "Social",
            Self::Hobby => "Hobby",
            Self::Home => "Home",
            Self::Other => "Other",
        }
    }
}

/// Quest priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestPriority {
    Low,
    Medium,
    High,
}

impl QuestPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// Mood reported after completing a quest
///
/// Serialized as the emoji itself, which is also the persisted form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mood {
    #[serde(rename = "😊")]
    Happy,
    #[serde(rename = "😐")]
    Neutral,
    #[serde(rename = "😔")]
    Sad,
    #[serde(rename = "🤔")]
    Thoughtful,
    #[serde(rename = "😴")]
    Tired,
    #[serde(rename = "🔥")]
    Fired,
    #[serde(rename = "💪")]
    Strong,
    #[serde(rename = "🎯")]
    Focused,
}

impl Mood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Happy => "😊",
            Self::Neutral => "😐",
            Self::Sad => "😔",
            Self::Thoughtful => "🤔",
            Self::Tired => "😴",
            Self::Fired => "🔥",
            Self::Strong => "💪",
            Self::Focused => "🎯",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "😊" => Some(Self::Happy),
            "😐" => Some(Self::Neutral),
            "😔" => Some(Self::Sad),
            "🤔" => Some(Self::Thoughtful),
            "😴" => Some(Self::Tired),
            "🔥" => Some(Self::Fired),
            "💪" => Some(Self::Strong),
            "🎯" => Some(Self::Focused),
            _ => None,
        }
    }

    /// Numeric value used for weekly mood averages
    pub fn score(&self) -> u32 {
        match self {
            Self::Sad => 1,
            Self::Neutral => 2,
            Self::Tired => 2,
            Self::Thoughtful => 3,
            Self::Happy => 4,
            Self::Focused => 4,
            Self::Fired => 5,
            Self::Strong => 5,
        }
    }

    pub fn all() -> &'static [Mood] {
        &[
            Self::Happy,
            Self::Neutral,
            Self::Sad,
            Self::Thoughtful,
            Self::Tired,
            Self::Fired,
            Self::Strong,
            Self::Focused,
        ]
    }
}

/// A unit of work with a reward value
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quest {
    /// Opaque unique identifier, immutable after creation
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: QuestCategory,
    pub priority: QuestPriority,
    pub status: QuestStatus,
    /// EXP reward, validated to [10, 500] by the form layer
    pub exp: u32,
    pub date_created: NaiveDate,
    /// Set when the quest first transitions to completed; never cleared
    pub date_completed: Option<NaiveDate>,
    /// Mood reported after completion, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<Mood>,
}

impl Quest {
    /// Create a new pending quest dated `today`
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category: QuestCategory,
        priority: QuestPriority,
        exp: u32,
        today: NaiveDate,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            description: description.into(),
            category,
            priority,
            status: QuestStatus::Pending,
            exp,
            date_created: today,
            date_completed: None,
            mood: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == QuestStatus::Completed
    }
}

/// Motivation flavor preference; does not affect any rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MotivationMode {
    Warrior,
    Healer,
    Rogue,
}

impl MotivationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warrior => "warrior",
            Self::Healer => "healer",
            Self::Rogue => "rogue",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "warrior" => Some(Self::Warrior),
            "healer" => Some(Self::Healer),
            "rogue" => Some(Self::Rogue),
            _ => None,
        }
    }
}

/// Achievement grouping for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementCategory {
    Productivity,
    Consistency,
    Milestone,
    Special,
}

impl AchievementCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Productivity => "productivity",
            Self::Consistency => "consistency",
            Self::Milestone => "milestone",
            Self::Special => "special",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "productivity" => Some(Self::Productivity),
            "consistency" => Some(Self::Consistency),
            "milestone" => Some(Self::Milestone),
            "special" => Some(Self::Special),
            _ => None,
        }
    }
}

/// An unlocked achievement record, immutable once created
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    /// Unlock timestamp, epoch milliseconds
    pub unlocked_at: i64,
    pub category: AchievementCategory,
}

/// A mood report tied to a specific completion event
///
/// Holds a non-owning back-reference to the quest; entries whose quest was
/// deleted are purged from the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    pub date: NaiveDate,
    pub mood: Mood,
    pub quest_id: String,
    /// Title snapshot at the time of the entry
    pub quest_title: String,
}

/// The progression ledger: cumulative EXP, derived level, streaks, goals,
/// and the embedded achievement and mood histories
///
/// One profile per installation. `level` is a cached projection of `exp`
/// and is recomputed after every EXP mutation, never assigned independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub exp: u32,
    pub level: u32,
    pub total_quests_completed: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    /// Local calendar date of the last day with a recorded completion
    pub last_completion_date: Option<NaiveDate>,
    pub motivation_mode: MotivationMode,
    pub daily_goal: u32,
    pub weekly_goal: u32,
    /// Unlocked achievements in unlock order
    pub achievements: Vec<Achievement>,
    /// Mood entries in creation order
    pub mood_history: Vec<MoodEntry>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            exp: 0,
            level: 1,
            total_quests_completed: 0,
            current_streak: 0,
            longest_streak: 0,
            last_completion_date: None,
            motivation_mode: MotivationMode::Warrior,
            daily_goal: 3,
            weekly_goal: 15,
            achievements: Vec::new(),
            mood_history: Vec::new(),
        }
    }
}

impl Profile {
    /// Whether an achievement with this id has already been unlocked
    pub fn has_achievement(&self, id: &str) -> bool {
        self.achievements.iter().any(|a| a.id == id)
    }
}

/// Aggregated view of a single day against the daily goal
#[derive(Debug, Clone)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub quests_completed: u32,
    pub exp_gained: u32,
    pub daily_goal: u32,
}

impl DailySummary {
    pub fn goal_met(&self) -> bool {
        self.quests_completed >= self.daily_goal
    }
}

impl Default for DailySummary {
    fn default() -> Self {
        Self {
            date: NaiveDate::default(),
            quests_completed: 0,
            exp_gained: 0,
            daily_goal: 3,
        }
    }
}

/// Aggregated view of the trailing 7 days against the weekly goal
#[derive(Debug, Clone, Default)]
pub struct WeeklySummary {
    /// First day of the 7-day window (today - 6 days)
    pub week_start: NaiveDate,
    pub total_quests: u32,
    pub completed_quests: u32,
    pub total_exp: u32,
    pub average_mood: f64,
    pub streak_days: u32,
    pub weekly_goal: u32,
}

impl WeeklySummary {
    pub fn goal_met(&self) -> bool {
        self.completed_quests >= self.weekly_goal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_cycle_blocked_at_completed() {
        assert_eq!(
            QuestStatus::Pending.next_in_cycle(),
            Some(QuestStatus::InProgress)
        );
        assert_eq!(
            QuestStatus::InProgress.next_in_cycle(),
            Some(QuestStatus::Completed)
        );
        assert_eq!(QuestStatus::Completed.next_in_cycle(), None);
    }

    #[test]
    fn test_status_serializes_kebab_case() {
        let json = serde_json::to_string(&QuestStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
        let back: QuestStatus = serde_json::from_str("\"in-progress\"").unwrap();
        assert_eq!(back, QuestStatus::InProgress);
    }

    #[test]
    fn test_mood_scores() {
        assert_eq!(Mood::Sad.score(), 1);
        assert_eq!(Mood::Neutral.score(), 2);
        assert_eq!(Mood::Tired.score(), 2);
        assert_eq!(Mood::Thoughtful.score(), 3);
        assert_eq!(Mood::Happy.score(), 4);
        assert_eq!(Mood::Focused.score(), 4);
        assert_eq!(Mood::Fired.score(), 5);
        assert_eq!(Mood::Strong.score(), 5);
    }

    #[test]
    fn test_mood_roundtrip() {
        for mood in Mood::all() {
            assert_eq!(Mood::from_str(mood.as_str()), Some(*mood));
        }
    }

    #[test]
    fn test_quest_json_shape() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let quest = Quest::new(
            "Read a chapter",
            "One chapter of the borrow checker book",
            QuestCategory::Learning,
            QuestPriority::Medium,
            50,
            today,
        );
        let value: serde_json::Value = serde_json::to_value(&quest).unwrap();
        assert_eq!(value["status"], "pending");
        assert_eq!(value["dateCreated"], "2025-03-14");
        assert!(value["dateCompleted"].is_null());
        assert!(value.get("mood").is_none());
    }

    #[test]
    fn test_default_profile() {
        let profile = Profile::default();
        assert_eq!(profile.exp, 0);
        assert_eq!(profile.level, 1);
        assert_eq!(profile.daily_goal, 3);
        assert_eq!(profile.weekly_goal, 15);
        assert_eq!(profile.motivation_mode, MotivationMode::Warrior);
        assert!(profile.achievements.is_empty());
    }

    #[test]
    fn test_seven_categories() {
        assert_eq!(QuestCategory::all().len(), 7);
        for c in QuestCategory::all() {
            assert_eq!(QuestCategory::from_str(c.as_str()), Some(*c));
        }
    }
}
