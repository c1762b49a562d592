//! Integration tests for EXP accounting and achievement unlocks

use tempfile::TempDir;

use lifequest::{QuestCategory, QuestDraft, QuestPriority, QuestTracker};

fn tracker_in(dir: &TempDir) -> QuestTracker {
    QuestTracker::with_path(&dir.path().join("tracker.db")).expect("open tracker")
}

fn draft(title: &str, category: QuestCategory, exp: u32) -> QuestDraft {
    QuestDraft {
        title: title.to_string(),
        description: String::new(),
        category,
        priority: QuestPriority::Low,
        exp,
    }
}

fn complete(tracker: &QuestTracker, category: QuestCategory, exp: u32) -> String {
    let quest = tracker.create_quest(draft("quest", category, exp)).unwrap();
    tracker.cycle_status(&quest.id).unwrap();
    tracker.cycle_status(&quest.id).unwrap();
    quest.id
}

#[test]
fn test_deletion_restores_ledger() {
    let dir = TempDir::new().unwrap();
    let tracker = tracker_in(&dir);

    let id = complete(&tracker, QuestCategory::Work, 50);
    let profile = tracker.profile().unwrap();
    assert_eq!(profile.exp, 50);
    assert_eq!(profile.total_quests_completed, 1);

    tracker.delete_quest(&id).unwrap();
    let profile = tracker.profile().unwrap();
    assert_eq!(profile.exp, 0);
    assert_eq!(profile.total_quests_completed, 0);
    assert_eq!(profile.level, 1);
}

#[test]
fn test_edit_delta_for_completed_quest() {
    let dir = TempDir::new().unwrap();
    let tracker = tracker_in(&dir);

    let id = complete(&tracker, QuestCategory::Work, 50);

    // 50 -> 80: ledger gains exactly the difference
    tracker
        .update_quest(&id, draft("quest", QuestCategory::Work, 80))
        .unwrap();
    assert_eq!(tracker.profile().unwrap().exp, 80);

    // 80 -> 50: ledger loses exactly the difference
    tracker
        .update_quest(&id, draft("quest", QuestCategory::Work, 50))
        .unwrap();
    assert_eq!(tracker.profile().unwrap().exp, 50);

    // unchanged exp: no ledger movement
    tracker
        .update_quest(&id, draft("renamed", QuestCategory::Work, 50))
        .unwrap();
    let profile = tracker.profile().unwrap();
    assert_eq!(profile.exp, 50);
    assert_eq!(profile.total_quests_completed, 1);
    assert_eq!(tracker.quest(&id).unwrap().unwrap().title, "renamed");
}

#[test]
fn test_edit_pending_quest_never_touches_ledger() {
    let dir = TempDir::new().unwrap();
    let tracker = tracker_in(&dir);

    let quest = tracker
        .create_quest(draft("later", QuestCategory::Hobby, 50))
        .unwrap();
    tracker
        .update_quest(&quest.id, draft("later", QuestCategory::Hobby, 500))
        .unwrap();

    assert_eq!(tracker.profile().unwrap().exp, 0);
    assert_eq!(tracker.quest(&quest.id).unwrap().unwrap().exp, 500);
}

#[test]
fn test_edit_preserves_completion_fields() {
    let dir = TempDir::new().unwrap();
    let tracker = tracker_in(&dir);

    let id = complete(&tracker, QuestCategory::Work, 50);
    let before = tracker.quest(&id).unwrap().unwrap();

    tracker
        .update_quest(&id, draft("retitled", QuestCategory::Learning, 60))
        .unwrap();
    let after = tracker.quest(&id).unwrap().unwrap();

    assert_eq!(after.status, before.status);
    assert_eq!(after.date_created, before.date_created);
    // never cleared, even by later edits
    assert_eq!(after.date_completed, before.date_completed);
}

#[test]
fn test_edit_unknown_quest_is_none() {
    let dir = TempDir::new().unwrap();
    let tracker = tracker_in(&dir);
    let result = tracker
        .update_quest("missing", draft("x", QuestCategory::Other, 10))
        .unwrap();
    assert!(result.is_none());
}

#[test]
fn test_first_ten_unlocks_exactly_once() {
    let dir = TempDir::new().unwrap();
    let tracker = tracker_in(&dir);

    for _ in 0..9 {
        complete(&tracker, QuestCategory::Work, 10);
    }
    assert!(!tracker.profile().unwrap().has_achievement("first_10"));

    complete(&tracker, QuestCategory::Work, 10);
    let profile = tracker.profile().unwrap();
    assert!(profile.has_achievement("first_10"));

    // an eleventh completion must not add a second record
    complete(&tracker, QuestCategory::Work, 10);
    let profile = tracker.profile().unwrap();
    let count = profile
        .achievements
        .iter()
        .filter(|a| a.id == "first_10")
        .count();
    assert_eq!(count, 1);
}

#[test]
fn test_diverse_quests_counts_all_categories() {
    let dir = TempDir::new().unwrap();
    let tracker = tracker_in(&dir);

    // four categories exist only as pending quests
    for category in [
        QuestCategory::Learning,
        QuestCategory::Health,
        QuestCategory::Social,
        QuestCategory::Hobby,
    ] {
        tracker.create_quest(draft("pending", category, 10)).unwrap();
    }

    // the fifth category arrives with a completion, which triggers evaluation
    complete(&tracker, QuestCategory::Work, 10);

    let profile = tracker.profile().unwrap();
    assert!(profile.has_achievement("diverse_quests"));
}

#[test]
fn test_level_rises_with_exp() {
    let dir = TempDir::new().unwrap();
    let tracker = tracker_in(&dir);

    complete(&tracker, QuestCategory::Work, 50);
    let profile = tracker.profile().unwrap();
    assert_eq!(profile.level, 1, "50 exp is still level 1");

    complete(&tracker, QuestCategory::Work, 60);
    let profile = tracker.profile().unwrap();
    assert_eq!(profile.exp, 110);
    assert_eq!(profile.level, 2);
    assert!(profile.has_achievement("level_up"));

    let info = tracker.level_info().unwrap();
    assert_eq!(info.level, 2);
    assert_eq!(info.exp_to_next, 290);
}

#[test]
fn test_level_up_record_is_shared_across_levels() {
    let dir = TempDir::new().unwrap();
    let tracker = tracker_in(&dir);

    complete(&tracker, QuestCategory::Work, 150); // level 1 -> 2
    complete(&tracker, QuestCategory::Work, 300); // 450 exp, level 2 -> 3

    let profile = tracker.profile().unwrap();
    assert_eq!(profile.level, 3);
    let level_ups: Vec<_> = profile
        .achievements
        .iter()
        .filter(|a| a.id == "level_up")
        .collect();
    assert_eq!(level_ups.len(), 1);
    assert_eq!(level_ups[0].name, "Level 2 Achieved!");
}

#[test]
fn test_exp_floor_on_downward_edit() {
    let dir = TempDir::new().unwrap();
    let tracker = tracker_in(&dir);

    let id = complete(&tracker, QuestCategory::Work, 20);
    tracker
        .update_quest(&id, draft("quest", QuestCategory::Work, 10))
        .unwrap();
    assert_eq!(tracker.profile().unwrap().exp, 10);

    // deleting the last completed quest lands exactly on zero, never below
    tracker.delete_quest(&id).unwrap();
    let profile = tracker.profile().unwrap();
    assert_eq!(profile.exp, 0);
    assert_eq!(profile.total_quests_completed, 0);
    assert_eq!(profile.level, 1);
}
