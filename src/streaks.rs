//! Daily streak tracking
//!
//! A streak counts consecutive local calendar days with at least one quest
//! completion. Dates are compared as year-month-day in the local timezone,
//! never as timestamps. There is no reset sweep: a missed day is only noticed
//! at the next completion, which restarts the streak at 1.

use chrono::{Days, Local, NaiveDate};

use crate::models::Profile;

/// Outcome of comparing a completion date against the last recorded one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakDecision {
    /// A completion was already counted today; the streak is unchanged
    AlreadyCountedToday,
    /// The last completion was yesterday; the streak extends by one
    Extended,
    /// Gap of two or more days, or no prior completion; the streak restarts at 1
    Restarted,
}

/// Decide how a completion on `today` affects the streak
pub fn evaluate(last_completion: Option<NaiveDate>, today: NaiveDate) -> StreakDecision {
    let Some(last) = last_completion else {
        return StreakDecision::Restarted;
    };

    if last == today {
        return StreakDecision::AlreadyCountedToday;
    }

    let yesterday = today - Days::new(1);
    if last == yesterday {
        StreakDecision::Extended
    } else {
        StreakDecision::Restarted
    }
}

/// Today as a local calendar date
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

/// Whether the streak is still alive (a completion today or yesterday)
pub fn streak_active(profile: &Profile, today: NaiveDate) -> bool {
    let Some(last) = profile.last_completion_date else {
        return false;
    };
    let days_since = (today - last).num_days();
    (0..=1).contains(&days_since)
}

/// Whether a completion today would extend or restart the streak
/// (false only when today was already counted)
pub fn can_extend(profile: &Profile, today: NaiveDate) -> bool {
    match profile.last_completion_date {
        Some(last) => last < today,
        None => true,
    }
}
