//! Fake collaborators for integration tests

#![allow(dead_code)]

use parking_lot::Mutex;
use pickup::{
    Channel, Clock, Collaborators, ConfigSource, GestureConfig, ManualClock, PickupSensor,
    PowerController, PulseTrigger, SampleSink, SamplingRate, SensorInfo, SensorSettings,
    SensorSource, SharedConfig, TimedLock, Timestamp, WakeReason,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub const PROXIMITY_MAX_RANGE: f32 = 5.0;

/// Sensor source whose samples are pushed by the test
pub struct FakeSensorSource {
    sensors: Vec<SensorInfo>,
    refuse_registration: bool,
    active: Mutex<HashMap<Channel, SampleSink>>,
    /// Every sink ever handed out, including unregistered ones
    retained: Mutex<HashMap<Channel, SampleSink>>,
    registrations: Mutex<Vec<(Channel, SamplingRate)>>,
    unregistrations: Mutex<Vec<Channel>>,
}

impl FakeSensorSource {
    pub fn new(sensors: Vec<SensorInfo>) -> Self {
        Self {
            sensors,
            refuse_registration: false,
            active: Mutex::new(HashMap::new()),
            retained: Mutex::new(HashMap::new()),
            registrations: Mutex::new(Vec::new()),
            unregistrations: Mutex::new(Vec::new()),
        }
    }

    /// Pickup sensor plus proximity sensor
    pub fn full() -> Self {
        Self::new(vec![
            SensorInfo::new("qti.sensor.amd", Channel::Motion, 2.0),
            SensorInfo::new("proximity", Channel::Proximity, PROXIMITY_MAX_RANGE),
        ])
    }

    pub fn refusing(mut self) -> Self {
        self.refuse_registration = true;
        self
    }

    /// Deliver through the currently registered listener, if any
    pub fn push(&self, channel: Channel, value: f32) -> bool {
        let sink = self.active.lock().get(&channel).cloned();
        match sink {
            Some(sink) => sink.deliver(value),
            None => false,
        }
    }

    /// Deliver through a sink even after it was unregistered
    pub fn push_stale(&self, channel: Channel, value: f32) -> bool {
        let sink = self.retained.lock().get(&channel).cloned();
        match sink {
            Some(sink) => sink.deliver(value),
            None => false,
        }
    }

    fn lookup(&self, matches: impl Fn(&SensorInfo) -> bool) -> Option<SensorInfo> {
        self.sensors.iter().find(|info| matches(info)).cloned()
    }

    pub fn is_registered(&self, channel: Channel) -> bool {
        self.active.lock().contains_key(&channel)
    }

    pub fn registrations(&self) -> Vec<(Channel, SamplingRate)> {
        self.registrations.lock().clone()
    }

    pub fn unregistrations(&self) -> Vec<Channel> {
        self.unregistrations.lock().clone()
    }
}

impl SensorSource for FakeSensorSource {
    fn find_sensor(&self, name: &str) -> Option<SensorInfo> {
        self.lookup(|info| info.name == name)
    }

    fn default_sensor(&self, channel: Channel) -> Option<SensorInfo> {
        self.lookup(|info| info.channel == channel)
    }

    fn register(&self, sensor: &SensorInfo, sink: SampleSink, rate: SamplingRate) -> bool {
        assert_eq!(sink.channel(), sensor.channel);
        self.registrations.lock().push((sensor.channel, rate));
        if self.refuse_registration {
            return false;
        }
        let channel = sink.channel();
        self.retained.lock().insert(channel, sink.clone());
        self.active.lock().insert(channel, sink);
        true
    }

    fn unregister(&self, sensor: &SensorInfo) {
        self.unregistrations.lock().push(sensor.channel);
        self.active.lock().remove(&sensor.channel);
    }
}

/// Power controller that records every call
#[derive(Default)]
pub struct RecordingPower {
    pub lock: TimedLock,
    wakes: Mutex<Vec<(Timestamp, WakeReason)>>,
    holds: Mutex<Vec<Duration>>,
}

impl RecordingPower {
    pub fn wakes(&self) -> Vec<(Timestamp, WakeReason)> {
        self.wakes.lock().clone()
    }

    pub fn holds(&self) -> Vec<Duration> {
        self.holds.lock().clone()
    }
}

impl PowerController for RecordingPower {
    fn wake(&self, now: Timestamp, reason: WakeReason) {
        self.wakes.lock().push((now, reason));
    }

    fn acquire_for(&self, duration: Duration) {
        self.holds.lock().push(duration);
        self.lock.acquire_for(duration);
    }
}

/// Pulse trigger counting launches
#[derive(Default)]
pub struct RecordingPulse {
    count: AtomicUsize,
}

impl RecordingPulse {
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl PulseTrigger for RecordingPulse {
    fn launch_pulse(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}

/// All fakes wired together
pub struct Harness {
    pub source: Arc<FakeSensorSource>,
    pub config: Arc<SharedConfig>,
    pub power: Arc<RecordingPower>,
    pub pulse: Arc<RecordingPulse>,
    pub clock: Arc<ManualClock>,
}

impl Harness {
    pub fn new(source: FakeSensorSource, config: GestureConfig) -> Self {
        Self {
            source: Arc::new(source),
            config: Arc::new(SharedConfig::new(config)),
            power: Arc::new(RecordingPower::default()),
            pulse: Arc::new(RecordingPulse::default()),
            clock: Arc::new(ManualClock::new(Timestamp::ZERO)),
        }
    }

    pub fn collaborators(&self) -> Collaborators {
        self.collaborators_with_config(self.config.clone())
    }

    pub fn collaborators_with_config(&self, config: Arc<dyn ConfigSource>) -> Collaborators {
        Collaborators {
            source: self.source.clone(),
            config,
            power: self.power.clone(),
            pulse: self.pulse.clone(),
            clock: self.clock.clone(),
        }
    }

    /// Same fakes, driven by a different clock
    pub fn collaborators_with_clock(&self, clock: Arc<dyn Clock>) -> Collaborators {
        Collaborators {
            clock,
            ..self.collaborators()
        }
    }

    pub fn sensor(&self) -> PickupSensor {
        PickupSensor::new(self.collaborators(), &SensorSettings::default())
    }

    /// Move the clock to `ms`, push a reading and wait for the worker
    pub fn deliver_at(&self, sensor: &PickupSensor, channel: Channel, value: f32, ms: u64) {
        self.clock.set(Timestamp::from_millis(ms));
        let delivered = self.source.push(channel, value);
        assert!(delivered, "{} listener is not registered", channel);
        sensor.sync();
    }

    pub fn motion(&self, sensor: &PickupSensor, value: f32, ms: u64) {
        self.deliver_at(sensor, Channel::Motion, value, ms);
    }

    pub fn proximity(&self, sensor: &PickupSensor, value: f32, ms: u64) {
        self.deliver_at(sensor, Channel::Proximity, value, ms);
    }
}

pub const PULSE_MODE: GestureConfig = GestureConfig {
    raise_to_wake: false,
    pocket_gesture: false,
};

pub const POCKET_MODE: GestureConfig = GestureConfig {
    raise_to_wake: false,
    pocket_gesture: true,
};

pub const WAKE_MODE: GestureConfig = GestureConfig {
    raise_to_wake: true,
    pocket_gesture: false,
};
