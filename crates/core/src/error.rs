//! Error types for pickup operations

use crate::sample::Channel;
use thiserror::Error;

/// Result type for pickup operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failures that can occur around the gesture pipeline
///
/// None of these reach the callers of `enable`/`disable`; they are logged
/// where they happen and the pipeline degrades to inaction.
#[derive(Debug, Error)]
pub enum Error {
    /// The sensor source has no sensor for the requested channel
    #[error("{0} sensor is not present")]
    SensorNotPresent(Channel),

    /// The worker thread has exited and can no longer accept commands
    #[error("pickup worker is gone")]
    WorkerGone,
}
