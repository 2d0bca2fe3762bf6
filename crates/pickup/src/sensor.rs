//! Pickup sensor service handle
//!
//! Owns the worker thread. `enable`/`disable` are fire-and-forget: they only
//! queue a command, and commands are applied in submission order.

use crate::clock::Clock;
use crate::power::PowerController;
use crate::pulse::PulseTrigger;
use crate::settings::{ConfigSource, SensorSettings};
use crate::source::{SensorInfo, SensorSource};
use crate::worker::{Command, Worker};
use crossbeam_channel::Sender;
use pickup_core::{Channel, Error, Result};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, info, warn};

/// External services the pickup sensor talks to
#[derive(Clone)]
pub struct Collaborators {
    pub source: Arc<dyn SensorSource>,
    pub config: Arc<dyn ConfigSource>,
    pub power: Arc<dyn PowerController>,
    pub pulse: Arc<dyn PulseTrigger>,
    pub clock: Arc<dyn Clock>,
}

struct Running {
    tx: Sender<Command>,
    handle: Option<JoinHandle<()>>,
}

/// Debounced pickup gesture detector
///
/// If the device has no pickup sensor the handle is inert: `enable` and
/// `disable` do nothing.
pub struct PickupSensor {
    running: Option<Running>,
}

impl PickupSensor {
    /// Discover sensors and start the worker
    pub fn new(collab: Collaborators, settings: &SensorSettings) -> Self {
        let motion = match discover_motion(collab.source.as_ref(), settings) {
            Ok(sensor) => sensor,
            Err(e) => {
                info!("Pickup disabled: {}", e);
                return Self { running: None };
            }
        };

        let proximity = collab.source.default_sensor(Channel::Proximity);
        if proximity.is_none() {
            warn!("{}", Error::SensorNotPresent(Channel::Proximity));
        }

        let (tx, rx) = crossbeam_channel::unbounded();
        let worker = Worker::new(collab, motion, proximity, tx.clone());

        let handle = thread::Builder::new()
            .name("pickup-worker".to_string())
            .spawn(move || worker.run(rx));

        match handle {
            Ok(handle) => Self {
                running: Some(Running {
                    tx,
                    handle: Some(handle),
                }),
            },
            Err(e) => {
                warn!("Failed to spawn pickup worker: {}", e);
                Self { running: None }
            }
        }
    }

    /// Whether a pickup sensor was found and the worker is running
    pub fn is_available(&self) -> bool {
        self.running.is_some()
    }

    /// Start listening for pickup gestures
    pub fn enable(&self) {
        debug!("Enabling");
        self.submit_logged(Command::Enable);
    }

    /// Stop listening for pickup gestures
    pub fn disable(&self) {
        debug!("Disabling");
        self.submit_logged(Command::Disable);
    }

    /// Block until every command submitted before this call has been applied
    pub fn sync(&self) {
        let (reply_tx, reply_rx) = crossbeam_channel::bounded(1);
        if self.submit(Command::Sync(reply_tx)).is_ok() {
            let _ = reply_rx.recv();
        }
    }

    fn submit(&self, command: Command) -> Result<()> {
        let Some(running) = &self.running else {
            return Ok(());
        };
        running.tx.send(command).map_err(|_| Error::WorkerGone)
    }

    fn submit_logged(&self, command: Command) {
        if let Err(e) = self.submit(command) {
            warn!("Dropping pickup request: {}", e);
        }
    }
}

impl Drop for PickupSensor {
    fn drop(&mut self) {
        if let Some(running) = &mut self.running {
            let _ = running.tx.send(Command::Shutdown);
            if let Some(handle) = running.handle.take() {
                if handle.join().is_err() {
                    warn!("Pickup worker panicked");
                }
            }
        }
    }
}

/// Find the pickup sensor by its configured name, then by channel default
fn discover_motion(source: &dyn SensorSource, settings: &SensorSettings) -> Result<SensorInfo> {
    source
        .find_sensor(&settings.motion_sensor)
        .filter(|sensor| sensor.channel == Channel::Motion)
        .or_else(|| source.default_sensor(Channel::Motion))
        .ok_or(Error::SensorNotPresent(Channel::Motion))
}
