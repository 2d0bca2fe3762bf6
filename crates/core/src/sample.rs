//! Sensor samples and monotonic timestamps

use std::fmt;
use std::time::Duration;

/// Sensor stream a sample belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Pickup/motion gesture sensor
    Motion,
    /// Proximity sensor used as the pocket gate
    Proximity,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Motion => "motion",
            Self::Proximity => "proximity",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Monotonic clock reading in milliseconds
///
/// Readings only make sense relative to other readings from the same clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp(0);

    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    pub const fn as_millis(&self) -> u64 {
        self.0
    }

    /// Time elapsed since `earlier`, zero if `earlier` is in the future
    pub fn saturating_since(&self, earlier: Timestamp) -> Duration {
        Duration::from_millis(self.0.saturating_sub(earlier.0))
    }

    pub fn saturating_add(&self, delta: Duration) -> Self {
        let ms = u64::try_from(delta.as_millis()).unwrap_or(u64::MAX);
        Self(self.0.saturating_add(ms))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// A single reading delivered by the sensor source
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorSample {
    /// Stream the reading came from
    pub channel: Channel,
    /// Raw value (motion code or proximity distance)
    pub value: f32,
    /// When the reading was taken
    pub timestamp: Timestamp,
}

impl SensorSample {
    pub fn motion(value: f32, timestamp: Timestamp) -> Self {
        Self {
            channel: Channel::Motion,
            value,
            timestamp,
        }
    }

    pub fn proximity(value: f32, timestamp: Timestamp) -> Self {
        Self {
            channel: Channel::Proximity,
            value,
            timestamp,
        }
    }

    /// Interpret the value as a motion code
    pub fn motion_code(&self) -> MotionCode {
        MotionCode::from_value(self.value)
    }
}

/// Coarse codes reported by the pickup sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionCode {
    /// Sensor is armed and waiting for a gesture (1)
    Waiting,
    /// Pickup motion detected (2)
    Detected,
    /// Anything else; ignored
    Unknown,
}

impl MotionCode {
    pub fn from_value(value: f32) -> Self {
        if value == 2.0 {
            Self::Detected
        } else if value == 1.0 {
            Self::Waiting
        } else {
            Self::Unknown
        }
    }
}
