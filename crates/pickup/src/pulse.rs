//! Ambient display pulse trigger

/// Starts the ambient-display pulse animation
///
/// Fire-and-forget: implementations must not block the worker.
pub trait PulseTrigger: Send + Sync {
    fn launch_pulse(&self);
}

impl<F> PulseTrigger for F
where
    F: Fn() + Send + Sync,
{
    fn launch_pulse(&self) {
        self()
    }
}
