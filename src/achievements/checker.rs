//! Achievement checking logic
//!
//! Independent predicates over the ledger and quest collection. Each function
//! returns the ids that newly qualify; evaluation order across rules does not
//! matter. The level-up achievement is not checked here; it is triggered
//! directly by EXP gains that cross a level threshold.

use super::definitions::AchievementId;

/// Check completion-count milestones
pub fn check_milestones(total_completed: u32, unlocked: &[String]) -> Vec<AchievementId> {
    let mut newly_unlocked = Vec::new();

    let milestones = [(10, AchievementId::FirstTen)];

    for (threshold, id) in milestones {
        if total_completed >= threshold && !unlocked.contains(&id.as_str().to_string()) {
            newly_unlocked.push(id);
        }
    }

    newly_unlocked
}

/// Check streak milestones
pub fn check_streaks(current_streak: u32, unlocked: &[String]) -> Vec<AchievementId> {
    let mut newly_unlocked = Vec::new();

    let milestones = [(7, AchievementId::WeekStreak)];

    for (threshold, id) in milestones {
        if current_streak >= threshold && !unlocked.contains(&id.as_str().to_string()) {
            newly_unlocked.push(id);
        }
    }

    newly_unlocked
}

/// Check level milestones
pub fn check_levels(level: u32, unlocked: &[String]) -> Vec<AchievementId> {
    let mut newly_unlocked = Vec::new();

    let milestones = [(5, AchievementId::LevelFive)];

    for (threshold, id) in milestones {
        if level >= threshold && !unlocked.contains(&id.as_str().to_string()) {
            newly_unlocked.push(id);
        }
    }

    newly_unlocked
}

/// Check category diversity across all quests (not only completed ones)
pub fn check_category_diversity(unique_categories: usize, unlocked: &[String]) -> Vec<AchievementId> {
    let mut newly_unlocked = Vec::new();

    if unique_categories >= 5
        && !unlocked.contains(&AchievementId::DiverseQuests.as_str().to_string())
    {
        newly_unlocked.push(AchievementId::DiverseQuests);
    }

    newly_unlocked
}
