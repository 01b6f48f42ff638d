//! Playback channels and the fixed pool the allocator scans.

use std::sync::Arc;

use crate::catalog::Clip;
use crate::mix::MixBus;

/// One playback slot, seen from the control side.
///
/// All methods take `&self`: a channel is a control surface over whatever
/// actually produces sound, and implementations are expected to signal the
/// playback side rather than do the work in place. Busy-to-idle transitions
/// are driven by the playback side when a clip runs out, never by the
/// allocator.
pub trait Channel: Send + Sync {
    /// Point this channel at a clip. Replaces whatever was bound before,
    /// including a clip that is still playing.
    fn bind(&self, clip: &Clip);

    /// Play the bound clip from the beginning.
    ///
    /// Implementations must report busy from the moment this returns, so a
    /// caller that starts a channel and immediately asks [`is_busy`]
    /// observes the playback it just requested.
    ///
    /// [`is_busy`]: Channel::is_busy
    fn start(&self);

    /// Whether this channel is currently occupied by a playback.
    fn is_busy(&self) -> bool;

    /// Hand this channel its output bus. Called exactly once per channel,
    /// during startup wiring; implementations call
    /// [`MixBus::register_attachment`] when they take the reference.
    fn attach_bus(&self, bus: &Arc<MixBus>);
}

/// Fixed, ordered set of channels.
///
/// Created once at startup and never resized. Channel index is position in
/// the construction order, and the allocation policy is nothing more than
/// a scan over that order.
#[derive(Clone)]
pub struct ChannelPool {
    channels: Vec<Arc<dyn Channel>>,
}

impl ChannelPool {
    pub fn new(channels: Vec<Arc<dyn Channel>>) -> Self {
        Self { channels }
    }

    /// First channel (in construction order) not currently busy.
    pub fn first_idle(&self) -> Option<(usize, &Arc<dyn Channel>)> {
        let index = self.channels.iter().position(|ch| !ch.is_busy())?;
        Some((index, &self.channels[index]))
    }

    /// True if at least one channel is busy. Recomputed on every call.
    pub fn any_busy(&self) -> bool {
        self.channels.iter().any(|ch| ch.is_busy())
    }

    /// Number of busy channels right now.
    pub fn busy_count(&self) -> usize {
        self.channels.iter().filter(|ch| ch.is_busy()).count()
    }

    pub fn get(&self, index: usize) -> Option<&Arc<dyn Channel>> {
        self.channels.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Channel>> {
        self.channels.iter()
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}


#[cfg(test)]
mod tests {
    use super::fake::{pool_of, FakeChannel};
    use super::*;

    #[test]
    fn first_idle_prefers_lowest_index() {
        let (pool, _fakes) = pool_of(3);

        let (index, _) = pool.first_idle().unwrap();
        assert_eq!(index, 0);
    }

    #[test]
    fn first_idle_skips_busy_channels() {
        let (pool, fakes) = pool_of(3);
        fakes[0].start();
        fakes[1].start();

        let (index, _) = pool.first_idle().unwrap();
        assert_eq!(index, 2);
    }

    #[test]
    fn first_idle_returns_none_when_exhausted() {
        let (pool, fakes) = pool_of(2);
        for ch in &fakes {
            ch.start();
        }

        assert!(pool.first_idle().is_none());
    }

    #[test]
    fn released_channel_becomes_selectable_again() {
        let (pool, fakes) = pool_of(2);
        fakes[0].start();
        fakes[1].start();
        fakes[0].finish();

        let (index, _) = pool.first_idle().unwrap();
        assert_eq!(index, 0);
    }

    #[test]
    fn any_busy_recomputes_from_channels() {
        let (pool, fakes) = pool_of(2);
        assert!(!pool.any_busy());

        fakes[1].start();
        assert!(pool.any_busy());
        assert_eq!(pool.busy_count(), 1);

        fakes[1].finish();
        assert!(!pool.any_busy());
        assert_eq!(pool.busy_count(), 0);
    }

    #[test]
    fn empty_pool_is_never_busy() {
        let pool = ChannelPool::new(Vec::new());
        assert!(pool.first_idle().is_none());
        assert!(!pool.any_busy());
        assert!(pool.is_empty());
    }

    #[test]
    fn pool_order_is_construction_order() {
        let a = FakeChannel::idle();
        let b = FakeChannel::busy();
        let pool = ChannelPool::new(vec![
            a.clone() as Arc<dyn Channel>,
            b.clone() as Arc<dyn Channel>,
        ]);

        assert_eq!(pool.len(), 2);
        assert!(!pool.get(0).unwrap().is_busy());
        assert!(pool.get(1).unwrap().is_busy());
    }
}
