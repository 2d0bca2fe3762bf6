//! Single worker owning the debouncer
//!
//! Every enable/disable request and every sensor sample goes through one
//! queue and is applied here in order, so the debounce state needs no locks.

use crate::power::WakeReason;
use crate::sensor::Collaborators;
use crate::source::{SampleSink, SamplingRate, SensorInfo};
use crossbeam_channel::{Receiver, Sender};
use pickup_core::{Action, Channel, GestureDebouncer, SensorSample, WAKELOCK_TIMEOUT};
use tracing::{debug, warn};

/// Work items for the worker thread
#[derive(Debug)]
pub(crate) enum Command {
    Enable,
    Disable,
    Sample(SensorSample),
    /// Reply once everything queued before this has been applied
    Sync(Sender<()>),
    Shutdown,
}

pub(crate) struct Worker {
    collab: Collaborators,
    debouncer: GestureDebouncer,
    motion: SensorInfo,
    proximity: Option<SensorInfo>,
    motion_registered: bool,
    proximity_registered: bool,
    /// Used to hand out sinks on registration
    tx: Sender<Command>,
}

impl Worker {
    pub(crate) fn new(
        collab: Collaborators,
        motion: SensorInfo,
        proximity: Option<SensorInfo>,
        tx: Sender<Command>,
    ) -> Self {
        Self {
            collab,
            debouncer: GestureDebouncer::new(),
            motion,
            proximity,
            motion_registered: false,
            proximity_registered: false,
            tx,
        }
    }

    /// Process commands until shutdown, then drop any registrations
    pub(crate) fn run(mut self, rx: Receiver<Command>) {
        for command in rx.iter() {
            match command {
                Command::Enable => self.enable(),
                Command::Disable => self.disable(),
                Command::Sample(sample) => self.handle_sample(sample),
                Command::Sync(reply) => {
                    let _ = reply.send(());
                }
                Command::Shutdown => break,
            }
        }

        self.disable();
        debug!("Pickup worker stopped");
    }

    fn enable(&mut self) {
        if self.debouncer.is_enabled() {
            self.disable();
        }

        let config = self.collab.config.gesture_config();

        self.motion_registered = self.register(&self.motion);

        if config.raise_to_wake {
            match &self.proximity {
                Some(proximity) => self.proximity_registered = self.register(proximity),
                None => warn!("Proximity sensor is not detected, pocket gate unavailable"),
            }
        }

        self.debouncer.enable(self.collab.clock.now());
        debug!(
            "Pickup enabled (raise_to_wake: {}, pocket gate listener: {})",
            config.raise_to_wake, self.proximity_registered
        );
    }

    fn disable(&mut self) {
        if !self.debouncer.is_enabled() {
            debug!("Pickup already disabled");
            return;
        }

        if self.motion_registered {
            self.collab.source.unregister(&self.motion);
            self.motion_registered = false;
        }

        // Torn down based on what this session registered, not on the
        // current raise-to-wake value
        if self.proximity_registered {
            if let Some(proximity) = &self.proximity {
                self.collab.source.unregister(proximity);
            }
            self.proximity_registered = false;
        }

        self.debouncer.disable();
        debug!("Pickup disabled");
    }

    fn register(&self, sensor: &SensorInfo) -> bool {
        let clock = self.collab.clock.clone();
        let sink = SampleSink::new(self.tx.clone(), sensor.channel, clock);
        let source = &self.collab.source;
        let registered = source.register(sensor, sink, SamplingRate::Normal);
        if !registered {
            let SensorInfo { name, channel, .. } = sensor;
            warn!("Failed to register {} listener on {}", channel, name);
        }
        registered
    }

    fn handle_sample(&mut self, sample: SensorSample) {
        match sample.channel {
            Channel::Motion => {
                debug!("Got motion sample: {}", sample.value);
                let config = self.collab.config.gesture_config();
                match self.debouncer.on_motion_sample(&sample, &config) {
                    Action::RaiseWake => {
                        let now = self.collab.clock.now();
                        let reason = WakeReason::Gesture;
                        debug!("Waking device at {} ({})", now, reason.as_str());
                        let power = &self.collab.power;
                        power.acquire_for(WAKELOCK_TIMEOUT);
                        power.wake(now, reason);
                    }
                    Action::DozePulse => self.collab.pulse.launch_pulse(),
                    Action::None => {}
                }
            }
            Channel::Proximity => {
                if !self.proximity_registered {
                    return;
                }
                if let Some(proximity) = &self.proximity {
                    let max_range = proximity.max_range;
                    self.debouncer.on_proximity_sample(&sample, max_range);
                }
            }
        }
    }
}
