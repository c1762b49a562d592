//! Notification fan-out
//!
//! The core emits a typed signal after each state mutation so presentation
//! layers can re-read the relevant store or ledger. Signals carry no payload
//! (pull-based refresh) except the EXP preview delta. Dispatch is
//! fire-and-forget after the mutation completes; observers see the
//! post-mutation state.

/// Signals emitted by the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerEvent {
    /// The quest collection changed; re-read the store
    QuestsChanged,
    /// The progression ledger changed; re-read the profile
    ProfileChanged,
    /// An achievement was unlocked; check the list's last entry
    AchievementUnlocked,
    /// The mood history changed; re-read it
    MoodChanged,
    /// A live EXP edit would change the ledger by this delta if saved.
    /// Purely hypothetical; nothing has been mutated.
    ExpPreview(i64),
    /// The hypothetical EXP view was cancelled
    ExpPreviewCleared,
}

/// Receives tracker signals
pub trait Observer: Send {
    fn notify(&self, event: &TrackerEvent);
}

impl<F> Observer for F
where
    F: Fn(&TrackerEvent) + Send,
{
    fn notify(&self, event: &TrackerEvent) {
        self(event)
    }
}

/// Observer list owned by the tracker
#[derive(Default)]
pub struct Broadcast {
    observers: Vec<Box<dyn Observer>>,
}

impl Broadcast {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: Box<dyn Observer>) {
        self.observers.push(observer);
    }

    pub fn emit(&self, event: TrackerEvent) {
        for observer in &self.observers {
            observer.notify(&event);
        }
    }
}
