//! Progression ledger operations
//!
//! Every mutation of the profile's EXP, counters, or streak flows through the
//! functions here. They operate on an explicit `&mut Profile` with the
//! completion date injected by the caller, and they uphold the ledger
//! invariants: `level` is recomputed after every EXP change, counters clamp
//! at zero, and `longest_streak >= current_streak` after any update.

use chrono::NaiveDate;

use crate::levels::level_for_exp;
use crate::models::{MotivationMode, Profile};
use crate::streaks::{self, StreakDecision};

/// A level increase produced by an EXP gain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    pub old_level: u32,
    pub new_level: u32,
}

/// Add EXP and recompute the level
///
/// Returns the level-up event when the new level exceeds the old one, so the
/// caller can unlock the level-up achievement and notify observers.
pub fn add_exp(profile: &mut Profile, amount: u32) -> Option<LevelUp> {
    let old_level = profile.level;
    profile.exp += amount;
    profile.level = level_for_exp(profile.exp);

    if profile.level > old_level {
        Some(LevelUp {
            old_level,
            new_level: profile.level,
        })
    } else {
        None
    }
}

/// Subtract EXP, clamped at zero, and recompute the level
///
/// Used when an already-completed quest's reward is edited downward. Does not
/// touch the completion counter.
pub fn subtract_exp(profile: &mut Profile, amount: u32) {
    profile.exp = profile.exp.saturating_sub(amount);
    profile.level = level_for_exp(profile.exp);
}

/// Reverse a completed quest's contribution when it is deleted
///
/// Removes its EXP and decrements the completion counter, both clamped at
/// zero, then recomputes the level.
pub fn remove_completed_quest(profile: &mut Profile, exp: u32) {
    profile.exp = profile.exp.saturating_sub(exp);
    profile.total_quests_completed = profile.total_quests_completed.saturating_sub(1);
    profile.level = level_for_exp(profile.exp);
}

/// Apply the EXP delta of editing a completed quest's reward
///
/// `diff > 0` adds, `diff < 0` subtracts, `diff == 0` is a no-op. The caller
/// is responsible for only invoking this for completed quests.
pub fn apply_exp_edit(profile: &mut Profile, old_exp: u32, new_exp: u32) -> Option<LevelUp> {
    if new_exp > old_exp {
        add_exp(profile, new_exp - old_exp)
    } else {
        if new_exp < old_exp {
            subtract_exp(profile, old_exp - new_exp);
        }
        None
    }
}

/// Record a quest completion on `today`: bump the counter and update the streak
///
/// The counter always increments; the streak changes at most once per calendar
/// day. Returns the new streak count when it changed, `None` when today was
/// already counted.
pub fn record_completion(profile: &mut Profile, today: NaiveDate) -> Option<u32> {
    profile.total_quests_completed += 1;

    match streaks::evaluate(profile.last_completion_date, today) {
        StreakDecision::AlreadyCountedToday => return None,
        StreakDecision::Extended => profile.current_streak += 1,
        StreakDecision::Restarted => profile.current_streak = 1,
    }

    profile.last_completion_date = Some(today);
    profile.longest_streak = profile.longest_streak.max(profile.current_streak);
    Some(profile.current_streak)
}

/// Reset the current streak to zero (longest is untouched)
pub fn reset_streak(profile: &mut Profile) {
    profile.current_streak = 0;
}

/// Update the daily and weekly completion targets
pub fn update_goals(profile: &mut Profile, daily_goal: u32, weekly_goal: u32) {
    profile.daily_goal = daily_goal;
    profile.weekly_goal = weekly_goal;
}

/// Change the motivation flavor preference
pub fn set_motivation_mode(profile: &mut Profile, mode: MotivationMode) {
    profile.motivation_mode = mode;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_add_exp_levels_up() {
        let mut profile = Profile::default();
        assert_eq!(add_exp(&mut profile, 50), None);
        assert_eq!(profile.exp, 50);
        assert_eq!(profile.level, 1);

        let up = add_exp(&mut profile, 60).expect("should level up at 110 exp");
        assert_eq!(up.old_level, 1);
        assert_eq!(up.new_level, 2);
        assert_eq!(profile.level, 2);
    }

    #[test]
    fn test_subtract_exp_floors_at_zero() {
        let mut profile = Profile::default();
        add_exp(&mut profile, 150);
        subtract_exp(&mut profile, 10_000);
        assert_eq!(profile.exp, 0);
        assert_eq!(profile.level, 1);
    }

    #[test]
    fn test_remove_completed_quest_reverses() {
        let mut profile = Profile::default();
        add_exp(&mut profile, 50);
        record_completion(&mut profile, date(2025, 3, 14));
        assert_eq!(profile.total_quests_completed, 1);

        remove_completed_quest(&mut profile, 50);
        assert_eq!(profile.exp, 0);
        assert_eq!(profile.total_quests_completed, 0);
        assert_eq!(profile.level, 1);
    }

    #[test]
    fn test_remove_completed_quest_clamps_counter() {
        let mut profile = Profile::default();
        remove_completed_quest(&mut profile, 999);
        assert_eq!(profile.exp, 0);
        assert_eq!(profile.total_quests_completed, 0);
    }

    #[test]
    fn test_apply_exp_edit_delta() {
        let mut profile = Profile::default();
        add_exp(&mut profile, 50);

        // 50 -> 80: +30
        apply_exp_edit(&mut profile, 50, 80);
        assert_eq!(profile.exp, 80);

        // 80 -> 50: -30
        apply_exp_edit(&mut profile, 80, 50);
        assert_eq!(profile.exp, 50);

        // equal: no-op
        apply_exp_edit(&mut profile, 50, 50);
        assert_eq!(profile.exp, 50);
    }

    #[test]
    fn test_completion_streak_sequence() {
        let mut profile = Profile::default();

        // day one
        assert_eq!(record_completion(&mut profile, date(2025, 3, 14)), Some(1));
        assert_eq!(profile.current_streak, 1);
        assert_eq!(profile.total_quests_completed, 1);

        // second completion same day: counter up, streak untouched
        assert_eq!(record_completion(&mut profile, date(2025, 3, 14)), None);
        assert_eq!(profile.current_streak, 1);
        assert_eq!(profile.total_quests_completed, 2);

        // next day: extends
        assert_eq!(record_completion(&mut profile, date(2025, 3, 15)), Some(2));
        assert_eq!(profile.current_streak, 2);
        assert_eq!(profile.longest_streak, 2);

        // two-day gap: restarts, longest preserved
        assert_eq!(record_completion(&mut profile, date(2025, 3, 18)), Some(1));
        assert_eq!(profile.current_streak, 1);
        assert_eq!(profile.longest_streak, 2);
    }

    #[test]
    fn test_longest_streak_invariant() {
        let mut profile = Profile::default();
        let days = [
            date(2025, 3, 10),
            date(2025, 3, 11),
            date(2025, 3, 12),
            date(2025, 3, 15),
            date(2025, 3, 16),
        ];
        for day in days {
            record_completion(&mut profile, day);
            assert!(profile.longest_streak >= profile.current_streak);
        }
        assert_eq!(profile.longest_streak, 3);
        assert_eq!(profile.current_streak, 2);
    }

    #[test]
    fn test_reset_streak() {
        let mut profile = Profile::default();
        record_completion(&mut profile, date(2025, 3, 14));
        reset_streak(&mut profile);
        assert_eq!(profile.current_streak, 0);
        assert_eq!(profile.longest_streak, 1);
    }
}
