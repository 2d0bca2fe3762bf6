//! Sensor source interface
//!
//! The source owns the real sensors. It hands readings to the service through
//! a [`SampleSink`], which stamps them with the service clock and only
//! enqueues them for the worker thread; no processing ever happens on the
//! source's own threads.

use crate::clock::Clock;
use crate::worker::Command;
use crossbeam_channel::Sender;
use pickup_core::{Channel, SensorSample};
use std::sync::Arc;
use tracing::debug;

/// A sensor discovered on the source
#[derive(Debug, Clone, PartialEq)]
pub struct SensorInfo {
    /// Vendor/platform name (e.g. "qti.sensor.amd")
    pub name: String,
    /// Stream this sensor feeds
    pub channel: Channel,
    /// Largest value the sensor reports. Proximity readings below this
    /// mean something is covering the sensor.
    pub max_range: f32,
}

impl SensorInfo {
    pub fn new(name: impl Into<String>, channel: Channel, max_range: f32) -> Self {
        Self {
            name: name.into(),
            channel,
            max_range,
        }
    }
}

/// Requested delivery rate for a listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SamplingRate {
    /// Platform default rate, suitable for UI-level gestures
    #[default]
    Normal,
}

/// Where a source delivers readings for one registered listener
#[derive(Clone)]
pub struct SampleSink {
    tx: Sender<Command>,
    channel: Channel,
    clock: Arc<dyn Clock>,
}

impl SampleSink {
    pub(crate) fn new(tx: Sender<Command>, channel: Channel, clock: Arc<dyn Clock>) -> Self {
        Self { tx, channel, clock }
    }

    /// Stream this sink was registered for
    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Stamp a reading with the service clock and hand it to the worker
    ///
    /// Returns false once the service has shut down; the source should then
    /// drop this sink.
    pub fn deliver(&self, value: f32) -> bool {
        let sample = SensorSample {
            channel: self.channel,
            value,
            timestamp: self.clock.now(),
        };
        if self.tx.send(Command::Sample(sample)).is_err() {
            debug!("Dropping {} sample, worker is gone", self.channel);
            return false;
        }
        true
    }
}

/// Platform sensor manager
pub trait SensorSource: Send + Sync {
    /// Look a sensor up by its platform name
    fn find_sensor(&self, name: &str) -> Option<SensorInfo>;

    /// Default sensor for a channel, if the device has one
    fn default_sensor(&self, channel: Channel) -> Option<SensorInfo>;

    /// Start delivering samples from `sensor` into `sink`
    ///
    /// Returns false if the platform refused the registration.
    fn register(&self, sensor: &SensorInfo, sink: SampleSink, rate: SamplingRate) -> bool;

    /// Stop delivering samples from `sensor`
    fn unregister(&self, sensor: &SensorInfo);
}
