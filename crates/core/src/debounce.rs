//! Pickup gesture debouncing
//!
//! Rate-limits motion samples and gates them on the proximity-derived pocket
//! flag before turning them into a wake or pulse action.

use crate::config::GestureConfig;
use crate::sample::{MotionCode, SensorSample, Timestamp};
use std::time::Duration;
use tracing::debug;

/// Minimum spacing between accepted samples when raise-to-wake is on
pub const MIN_WAKEUP_INTERVAL: Duration = Duration::from_millis(100);

/// Minimum spacing between accepted samples in pulse mode
pub const MIN_PULSE_INTERVAL: Duration = Duration::from_millis(200);

/// How long the wake lock is held after a raise-to-wake gesture
pub const WAKELOCK_TIMEOUT: Duration = Duration::from_millis(2500);

/// Decision produced for a motion sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Nothing to do (debounced, suppressed, or informational)
    None,
    /// Fully wake the device
    RaiseWake,
    /// Pulse the ambient display
    DozePulse,
}

/// Per-session debounce state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceState {
    /// Timestamp of the last sample that passed the debounce gate
    pub last_fire: Timestamp,
    /// Last proximity verdict
    pub inside_pocket: bool,
}

impl DebounceState {
    fn new(now: Timestamp) -> Self {
        Self {
            last_fire: now,
            inside_pocket: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Session {
    Disabled,
    Enabled(DebounceState),
}

/// Turns raw pickup/proximity samples into gated actions
///
/// State only exists while a session is enabled; a new session never carries
/// over anything from the previous one.
#[derive(Debug)]
pub struct GestureDebouncer {
    session: Session,
}

impl Default for GestureDebouncer {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureDebouncer {
    /// Create a disabled debouncer
    pub fn new() -> Self {
        Self {
            session: Session::Disabled,
        }
    }

    /// Start a fresh session
    pub fn enable(&mut self, now: Timestamp) {
        if self.is_enabled() {
            debug!("Restarting enabled session at {}", now);
        }
        self.session = Session::Enabled(DebounceState::new(now));
    }

    /// End the session and discard its state. Safe to call repeatedly.
    pub fn disable(&mut self) {
        self.session = Session::Disabled;
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self.session, Session::Enabled(_))
    }

    /// Current session state, `None` while disabled
    pub fn state(&self) -> Option<&DebounceState> {
        match &self.session {
            Session::Enabled(state) => Some(state),
            Session::Disabled => None,
        }
    }

    /// Process a pickup sample against a fresh config snapshot
    pub fn on_motion_sample(&mut self, sample: &SensorSample, config: &GestureConfig) -> Action {
        let Session::Enabled(state) = &mut self.session else {
            debug!("Ignoring motion sample while disabled");
            return Action::None;
        };

        let now = sample.timestamp;
        if now.saturating_since(state.last_fire) < config.required_interval() {
            return Action::None;
        }

        state.last_fire = now;

        if !config.pocket_gate_active() {
            state.inside_pocket = false;
        }

        match sample.motion_code() {
            MotionCode::Detected if !state.inside_pocket => {
                if config.raise_to_wake {
                    Action::RaiseWake
                } else {
                    debug!("Motion detected");
                    Action::DozePulse
                }
            }
            MotionCode::Detected => {
                debug!("Motion detected inside pocket, suppressing");
                Action::None
            }
            MotionCode::Waiting => {
                debug!("Waiting for motion detection");
                Action::None
            }
            MotionCode::Unknown => Action::None,
        }
    }

    /// Track the pocket gate from a proximity reading
    pub fn on_proximity_sample(&mut self, sample: &SensorSample, max_range: f32) {
        if let Session::Enabled(state) = &mut self.session {
            state.inside_pocket = sample.value < max_range;
        }
    }
}
