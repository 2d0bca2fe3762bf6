//! Core gesture logic for the pickup sensor
//!
//! This crate provides:
//! - Sensor sample types (channel, value, monotonic timestamp)
//! - Gesture configuration snapshots
//! - The debouncer state machine deciding wake vs. pulse vs. suppress
//!
//! Nothing here spawns threads or performs I/O; the runtime lives in the
//! `pickup` crate.

pub mod config;
pub mod debounce;
pub mod error;
pub mod sample;

// Re-exports
pub use config::GestureConfig;
pub use debounce::{
    Action, DebounceState, GestureDebouncer, MIN_PULSE_INTERVAL, MIN_WAKEUP_INTERVAL,
    WAKELOCK_TIMEOUT,
};
pub use error::{Error, Result};
pub use sample::{Channel, MotionCode, SensorSample, Timestamp};
