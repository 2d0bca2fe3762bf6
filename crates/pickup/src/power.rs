//! Power controller interface and the timed wake lock

use parking_lot::Mutex;
use pickup_core::Timestamp;
use std::time::{Duration, Instant};

/// Why the device is being woken
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WakeReason {
    /// A user gesture (pickup) triggered the wake
    Gesture,
}

impl WakeReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gesture => "gesture",
        }
    }
}

/// Platform power management
pub trait PowerController: Send + Sync {
    /// Wake the device
    fn wake(&self, now: Timestamp, reason: WakeReason);

    /// Keep the device awake for at most `duration`
    fn acquire_for(&self, duration: Duration);
}

/// Exclusive hold that expires on its own
///
/// Acquiring while held extends the hold to whichever deadline is later.
/// Expiry is the normal way for the hold to end; `release` only cuts it short.
#[derive(Debug, Default)]
pub struct TimedLock {
    deadline: Mutex<Option<Instant>>,
}

impl TimedLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold the lock for `duration` from now
    pub fn acquire_for(&self, duration: Duration) {
        let until = Instant::now() + duration;
        let mut deadline = self.deadline.lock();
        *deadline = match *deadline {
            Some(current) if current > until => Some(current),
            _ => Some(until),
        };
    }

    /// Whether the hold is still in effect
    pub fn is_held(&self) -> bool {
        self.remaining().is_some()
    }

    /// Time left before the hold expires
    pub fn remaining(&self) -> Option<Duration> {
        let mut deadline = self.deadline.lock();
        let now = Instant::now();
        match *deadline {
            Some(until) if until > now => Some(until - now),
            Some(_) => {
                *deadline = None;
                None
            }
            None => None,
        }
    }

    /// Drop the hold early
    pub fn release(&self) {
        *self.deadline.lock() = None;
    }
}
