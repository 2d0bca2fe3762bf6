//! Gesture settings and config sources
//!
//! Settings live in a small TOML file:
//! ```toml
//! [gesture]
//! raise_to_wake = false
//! pocket_gesture = false
//!
//! [sensors]
//! motion_sensor = "qti.sensor.amd"
//! ```

use anyhow::{Context, Result};
use parking_lot::RwLock;
use pickup_core::GestureConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Platform name of the pickup sensor on supported devices
pub const DEFAULT_MOTION_SENSOR: &str = "qti.sensor.amd";

/// Synchronous read of the gesture toggles
///
/// Called on every motion sample, so implementations must be cheap and must
/// not block on the worker.
pub trait ConfigSource: Send + Sync {
    fn gesture_config(&self) -> GestureConfig;
}

/// Full settings file contents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub gesture: GestureConfig,
    pub sensors: SensorSettings,
}

/// Sensor discovery settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorSettings {
    /// Name of the pickup sensor; the source's default motion sensor is used
    /// when no sensor carries this name
    pub motion_sensor: String,
}

impl Default for SensorSettings {
    fn default() -> Self {
        Self {
            motion_sensor: DEFAULT_MOTION_SENSOR.to_string(),
        }
    }
}

impl Settings {
    /// Load settings, falling back to defaults if the file does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        let settings = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse settings file {}", path.display()))?;
        Ok(settings)
    }

    /// Write settings as TOML, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create settings directory")?;
        }

        let serialized = toml::to_string_pretty(self).context("Failed to serialize settings")?;
        std::fs::write(path, serialized)
            .with_context(|| format!("Failed to write settings file {}", path.display()))?;
        Ok(())
    }
}

/// In-memory toggles that can be flipped at runtime
#[derive(Debug, Default)]
pub struct SharedConfig {
    inner: RwLock<GestureConfig>,
}

impl SharedConfig {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            inner: RwLock::new(config),
        }
    }

    pub fn set(&self, config: GestureConfig) {
        *self.inner.write() = config;
    }

    pub fn set_raise_to_wake(&self, enabled: bool) {
        self.inner.write().raise_to_wake = enabled;
    }

    pub fn set_pocket_gesture(&self, enabled: bool) {
        self.inner.write().pocket_gesture = enabled;
    }
}

impl ConfigSource for SharedConfig {
    fn gesture_config(&self) -> GestureConfig {
        *self.inner.read()
    }
}

/// Config source backed by a settings file, re-read on every call
///
/// A missing file yields the defaults. An unreadable or malformed file is
/// logged and also yields the defaults (both gestures off).
#[derive(Debug, Clone)]
pub struct SettingsFile {
    path: PathBuf,
}

impl SettingsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ConfigSource for SettingsFile {
    fn gesture_config(&self) -> GestureConfig {
        match Settings::load(&self.path) {
            Ok(settings) => settings.gesture,
            Err(e) => {
                warn!("Using default gesture config: {:#}", e);
                GestureConfig::default()
            }
        }
    }
}
