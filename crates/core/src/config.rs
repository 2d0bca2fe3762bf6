//! Gesture configuration snapshot

use crate::debounce::{MIN_PULSE_INTERVAL, MIN_WAKEUP_INTERVAL};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// User-facing gesture toggles, read fresh for every decision
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// A pickup fully wakes the device instead of pulsing the ambient display
    pub raise_to_wake: bool,
    /// Suppress pickups while the proximity sensor reports the device covered
    pub pocket_gesture: bool,
}

impl GestureConfig {
    /// Minimum time between two accepted motion samples
    pub fn required_interval(&self) -> Duration {
        if self.raise_to_wake {
            MIN_WAKEUP_INTERVAL
        } else {
            MIN_PULSE_INTERVAL
        }
    }

    /// Whether proximity readings may suppress a gesture
    pub fn pocket_gate_active(&self) -> bool {
        self.raise_to_wake || self.pocket_gesture
    }
}
