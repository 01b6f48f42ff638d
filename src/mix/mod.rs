//! The shared output bus.

use std::sync::atomic::{AtomicUsize, Ordering};

use atomic_float::AtomicF32;

/// Single routing target every channel plays into.
///
/// One bus exists per manager; the manager builder hands it to each channel
/// exactly once during startup wiring. Master volume is an atomic so the
/// audio side can read it per block without locking.
#[derive(Debug)]
pub struct MixBus {
    volume: AtomicF32,
    attached: AtomicUsize,
}

impl MixBus {
    /// Bus at unity gain.
    pub fn new() -> Self {
        Self::with_volume(1.0)
    }

    /// Bus with an initial master volume (clamped to be non-negative).
    pub fn with_volume(volume: f32) -> Self {
        Self {
            volume: AtomicF32::new(volume.max(0.0)),
            attached: AtomicUsize::new(0),
        }
    }

    /// Current master volume. 1.0 is unity, 0.0 is silence.
    pub fn volume(&self) -> f32 {
        self.volume.load(Ordering::Relaxed)
    }

    /// Set the master volume. Negative values clamp to 0.0; values above
    /// 1.0 amplify.
    pub fn set_volume(&self, volume: f32) {
        self.volume.store(volume.max(0.0), Ordering::Relaxed);
    }

    /// Record that a channel took a reference to this bus.
    ///
    /// Called by [`Channel::attach_bus`](crate::channel::Channel::attach_bus)
    /// implementations when they accept the bus.
    pub fn register_attachment(&self) {
        self.attached.fetch_add(1, Ordering::Relaxed);
    }

    /// How many channels have attached so far. After a successful manager
    /// build this equals the pool size.
    pub fn attached_channels(&self) -> usize {
        self.attached.load(Ordering::Relaxed)
    }
}

impl Default for MixBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unity_gain_by_default() {
        let bus = MixBus::new();
        assert_eq!(bus.volume(), 1.0);
        assert_eq!(bus.attached_channels(), 0);
    }

    #[test]
    fn volume_clamps_at_zero() {
        let bus = MixBus::new();
        bus.set_volume(-0.5);
        assert_eq!(bus.volume(), 0.0);

        let bus = MixBus::with_volume(-3.0);
        assert_eq!(bus.volume(), 0.0);
    }

    #[test]
    fn volume_round_trips() {
        let bus = MixBus::with_volume(0.25);
        assert_eq!(bus.volume(), 0.25);
        bus.set_volume(1.5);
        assert_eq!(bus.volume(), 1.5);
    }

    #[test]
    fn attachments_accumulate() {
        let bus = MixBus::new();
        bus.register_attachment();
        bus.register_attachment();
        assert_eq!(bus.attached_channels(), 2);
    }
}
