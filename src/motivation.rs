//! Motivation messages
//!
//! Message pools per motivation mode, plus contextual entries earned by the
//! profile's progress. Selection is deterministic given a seed; callers that
//! want variety pass a random or rotating seed.

use crate::models::{MotivationMode, Profile};

static WARRIOR_MESSAGES: &[&str] = &[
    "⚔️ Time to conquer your quests! No mercy for unfinished tasks!",
    "🔥 Your determination burns bright! Show those quests who's boss!",
    "💪 Every completed quest makes you stronger! Keep pushing forward!",
    "⚡ Strike while the iron is hot! Your quests await your command!",
    "🎯 Focus like a warrior! Your targets are within reach!",
];

static HEALER_MESSAGES: &[&str] = &[
    "💚 Take it one quest at a time. You're doing great!",
    "🌸 Remember to be kind to yourself. Progress, not perfection!",
    "🌱 Every small step counts. You're growing stronger each day!",
    "💫 You've got this! Trust in your ability to complete your quests!",
    "🕊️ Breathe deeply and tackle your quests with calm determination!",
];

static ROGUE_MESSAGES: &[&str] = &[
    "😏 Sneaky quest completion mode activated! Let's do this quietly!",
    "🎭 Time to put on your quest-completing mask and show off!",
    "🦹 Stealth mode: complete quests before anyone notices!",
    "🎪 Life's a stage, and you're the star of your own quest show!",
    "🃏 Deal yourself a winning hand with these quests!",
];

/// All messages currently applicable to the profile
///
/// The base pool follows the motivation mode; contextual messages join the
/// pool once the profile earns them.
pub fn candidates(profile: &Profile) -> Vec<&'static str> {
    let mut messages: Vec<&'static str> = match profile.motivation_mode {
        MotivationMode::Warrior => WARRIOR_MESSAGES.to_vec(),
        MotivationMode::Healer => HEALER_MESSAGES.to_vec(),
        MotivationMode::Rogue => ROGUE_MESSAGES.to_vec(),
    };

    if profile.current_streak >= 3 {
        messages.push("🔥 Your streak is on fire! Keep the momentum going!");
    }
    if profile.level >= 5 {
        messages.push("⭐ You're becoming a quest master! Level up your game!");
    }
    if profile.total_quests_completed >= 10 {
        messages.push("🏆 Quest completion champion! You're unstoppable!");
    }

    messages
}

/// Pick a message deterministically by seed
pub fn pick(profile: &Profile, seed: usize) -> &'static str {
    let messages = candidates(profile);
    messages[seed % messages.len()]
}
