//! Pickup gesture service
//!
//! This crate wires the core debouncer to its collaborators:
//! - Sensor source delivering motion and proximity samples
//! - Config source with the raise-to-wake / pocket toggles
//! - Power controller (wake + timed wake lock) and pulse trigger
//! - A single worker thread that owns all debounce state

pub mod clock;
pub mod power;
pub mod pulse;
pub mod sensor;
pub mod settings;
pub mod source;
mod worker;

// Re-exports
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use pickup_core::{Action, Channel, GestureConfig, SensorSample, Timestamp};
pub use power::{PowerController, TimedLock, WakeReason};
pub use pulse::PulseTrigger;
pub use sensor::{Collaborators, PickupSensor};
pub use settings::{ConfigSource, SensorSettings, Settings, SettingsFile, SharedConfig};
pub use source::{SampleSink, SamplingRate, SensorInfo, SensorSource};
