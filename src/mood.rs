//! Mood ledger
//!
//! Append-only history of mood entries tied to quest completions, with a
//! derived weekly average. Entries hold a non-owning back-reference to their
//! quest; entries whose quest was deleted are purged.

use std::collections::HashSet;

use chrono::{Days, NaiveDate};

use crate::models::{Mood, MoodEntry, Profile};

/// Append a mood entry for a completion; no-op when no mood was reported
///
/// Returns the new entry so the caller can persist and notify.
pub fn add_entry(
    profile: &mut Profile,
    quest_id: &str,
    quest_title: &str,
    mood: Option<Mood>,
    today: NaiveDate,
) -> Option<MoodEntry> {
    let mood = mood?;
    let entry = MoodEntry {
        date: today,
        mood,
        quest_id: quest_id.to_string(),
        quest_title: quest_title.to_string(),
    };
    profile.mood_history.push(entry.clone());
    Some(entry)
}

/// Average mood score over entries dated within the last 7 days
///
/// Returns 0 when there are no recent entries.
pub fn weekly_average(history: &[MoodEntry], today: NaiveDate) -> f64 {
    let week_ago = today - Days::new(7);
    let recent: Vec<u32> = history
        .iter()
        .filter(|e| e.date >= week_ago)
        .map(|e| e.mood.score())
        .collect();

    if recent.is_empty() {
        return 0.0;
    }
    recent.iter().sum::<u32>() as f64 / recent.len() as f64
}

/// Remove every entry referencing the given quest
///
/// Returns how many entries were dropped.
pub fn remove_for_quest(profile: &mut Profile, quest_id: &str) -> usize {
    let before = profile.mood_history.len();
    profile.mood_history.retain(|e| e.quest_id != quest_id);
    before - profile.mood_history.len()
}

/// Remove entries whose quest id is not in the live quest set
///
/// Idempotent; returns how many entries were dropped.
pub fn cleanup_invalid(profile: &mut Profile, live_quest_ids: &HashSet<String>) -> usize {
    let before = profile.mood_history.len();
    profile
        .mood_history
        .retain(|e| live_quest_ids.contains(&e.quest_id));
    before - profile.mood_history.len()
}
