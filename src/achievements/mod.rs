//! Achievement engine
//!
//! Evaluates rule conditions against the progression ledger and quest
//! collection and unlocks achievements idempotently: at most one record per
//! id ever exists in a profile.

mod checker;
mod definitions;

pub use checker::{check_category_diversity, check_levels, check_milestones, check_streaks};
pub use definitions::{AchievementDef, AchievementId, DEFINITIONS};

use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::models::{Achievement, Profile, Quest};

/// Current timestamp in milliseconds
pub(crate) fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}

/// Unlock an achievement into the ledger
///
/// No-op when an achievement with this id already exists. On success the new
/// record is appended to the profile's list (unlock order = insertion order)
/// and returned so the caller can persist and notify.
pub fn unlock(
    profile: &mut Profile,
    id: AchievementId,
    name: impl Into<String>,
    unlocked_at: i64,
) -> Option<Achievement> {
    if profile.has_achievement(id.as_str()) {
        return None;
    }

    let def = AchievementDef::get(id);
    let achievement = Achievement {
        id: id.as_str().to_string(),
        name: name.into(),
        description: def.description.to_string(),
        icon: def.icon.to_string(),
        unlocked_at,
        category: def.category,
    };
    profile.achievements.push(achievement.clone());
    Some(achievement)
}

/// Unlock an achievement under its catalog display name
pub fn unlock_default(
    profile: &mut Profile,
    id: AchievementId,
    unlocked_at: i64,
) -> Option<Achievement> {
    let name = AchievementDef::get(id).name;
    unlock(profile, id, name, unlocked_at)
}

/// Evaluate every rule against the current state
///
/// Returns the ids that newly qualify, in no particular order. The level-up
/// rule is excluded; it fires from EXP gains directly.
pub fn evaluate(profile: &Profile, quests: &[Quest]) -> Vec<AchievementId> {
    let unlocked: Vec<String> = profile.achievements.iter().map(|a| a.id.clone()).collect();

    let mut newly_unlocked = Vec::new();
    newly_unlocked.extend(check_milestones(profile.total_quests_completed, &unlocked));
    newly_unlocked.extend(check_streaks(profile.current_streak, &unlocked));
    newly_unlocked.extend(check_levels(profile.level, &unlocked));

    let categories: HashSet<_> = quests.iter().map(|q| q.category).collect();
    newly_unlocked.extend(check_category_diversity(categories.len(), &unlocked));

    newly_unlocked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{QuestCategory, QuestPriority};
    use chrono::NaiveDate;

    #[test]
    fn test_unlock_is_idempotent() {
        let mut profile = Profile::default();
        let first = unlock_default(&mut profile, AchievementId::FirstTen, 1000);
        assert!(first.is_some());
        assert_eq!(profile.achievements.len(), 1);

        let second = unlock_default(&mut profile, AchievementId::FirstTen, 2000);
        assert!(second.is_none());
        assert_eq!(profile.achievements.len(), 1);
        assert_eq!(profile.achievements[0].unlocked_at, 1000);
    }

    #[test]
    fn test_unlock_with_display_name() {
        let mut profile = Profile::default();
        let unlocked =
            unlock(&mut profile, AchievementId::LevelUp, "Level 2 Achieved!", 1000).unwrap();
        assert_eq!(unlocked.name, "Level 2 Achieved!");
        assert_eq!(unlocked.id, "level_up");
        assert_eq!(unlocked.icon, "⬆️");
    }

    #[test]
    fn test_evaluate_uses_all_quest_categories() {
        let mut profile = Profile::default();
        let today = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let categories = [
            QuestCategory::Learning,
            QuestCategory::Work,
            QuestCategory::Health,
            QuestCategory::Social,
            QuestCategory::Hobby,
        ];
        let quests: Vec<Quest> = categories
            .iter()
            .map(|c| Quest::new("q", "", *c, QuestPriority::Low, 10, today))
            .collect();

        // Diversity counts quests regardless of status
        let ids = evaluate(&profile, &quests);
        assert_eq!(ids, vec![AchievementId::DiverseQuests]);

        // Once unlocked the rule stays quiet
        unlock_default(&mut profile, AchievementId::DiverseQuests, 1000);
        assert!(evaluate(&profile, &quests).is_empty());
    }

    #[test]
    fn test_evaluate_combined_rules() {
        let mut profile = Profile::default();
        profile.total_quests_completed = 10;
        profile.current_streak = 7;
        profile.level = 5;

        let mut ids = evaluate(&profile, &[]);
        ids.sort_by_key(|id| id.as_str());
        assert_eq!(
            ids,
            vec![
                AchievementId::FirstTen,
                AchievementId::LevelFive,
                AchievementId::WeekStreak,
            ]
        );
    }
}
