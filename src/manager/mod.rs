//! Voice allocation over a fixed channel pool.
//!
//! [`AudioManager`] is the control surface of the crate: it owns the clip
//! catalog, the channel pool and the shared mix bus, and decides where a
//! play request lands. The policy is a single rule: take the first idle
//! channel in pool order, or drop the request when there is none.
//!
//! Construction goes through [`AudioManager::builder`], which refuses an
//! empty pool or catalog and wires every channel to the bus exactly once.
//! The manager is plain data owned by the application; embedders that need
//! it in several places wrap it in their own `Arc`.

use std::sync::Arc;

use log::{debug, info};

use crate::catalog::{CatalogError, Clip, ClipCatalog};
use crate::channel::{Channel, ChannelPool};
use crate::mix::MixBus;

mod silence;
pub use silence::Silence;

/// Clip playback front end: catalog lookup, voice allocation, silence wait.
pub struct AudioManager {
    catalog: ClipCatalog,
    pool: ChannelPool,
    bus: Arc<MixBus>,
}

impl AudioManager {
    /// Start building a manager.
    pub fn builder() -> AudioManagerBuilder {
        AudioManagerBuilder {
            catalog: None,
            channels: Vec::new(),
            bus: None,
        }
    }

    /// Play a clip on the first idle channel.
    ///
    /// Returns `Ok(Some(Voice))` when a channel was bound and started,
    /// and `Ok(None)` when every channel is busy: an exhausted pool drops
    /// the request without touching any channel, and without error. A clip
    /// that refers to nothing (empty id) is rejected as an error before
    /// the pool is consulted; an unplayable clip is a caller bug, an
    /// exhausted pool is an expected runtime outcome.
    pub fn play(&self, clip: &Clip) -> Result<Option<Voice>, PlayError> {
        if clip.id().is_empty() {
            return Err(PlayError::EmptyClip);
        }

        let Some((index, channel)) = self.pool.first_idle() else {
            debug!("all {} channels busy, dropping {:?}", self.pool.len(), clip.name());
            return Ok(None);
        };

        channel.bind(clip);
        channel.start();
        debug!("{:?} -> channel {}", clip.name(), index);

        Ok(Some(Voice {
            index,
            channel: channel.clone(),
        }))
    }

    /// Resolve a clip by display name, then [`play`](AudioManager::play) it.
    pub fn play_by_name(&self, name: &str) -> Result<Option<Voice>, PlayError> {
        let clip = self.catalog.resolve_by_name(name)?;
        self.play(clip)
    }

    /// Resolve a clip by catalog index, then [`play`](AudioManager::play) it.
    pub fn play_by_index(&self, index: usize) -> Result<Option<Voice>, PlayError> {
        let clip = self.catalog.resolve_by_index(index)?;
        self.play(clip)
    }

    /// Whether any channel is busy. Recomputed from the pool on every call;
    /// nothing is cached.
    pub fn is_playing(&self) -> bool {
        self.pool.any_busy()
    }

    /// Wait until every channel is idle.
    ///
    /// The returned [`Silence`] future yields at least once before its
    /// first check and then re-checks the pool once per poll. It never
    /// blocks a thread, takes no locks, and dropping it has no side
    /// effects. Callers that want a bound on the wait compose their own,
    /// e.g. `tokio::time::timeout(limit, manager.until_silent())`.
    pub fn until_silent(&self) -> Silence {
        Silence::new(self.pool.clone())
    }

    pub fn catalog(&self) -> &ClipCatalog {
        &self.catalog
    }

    pub fn pool(&self) -> &ChannelPool {
        &self.pool
    }

    pub fn bus(&self) -> &Arc<MixBus> {
        &self.bus
    }
}

/// Handle to one started playback.
///
/// Holds the channel the clip landed on; the playback itself keeps running
/// whether or not the handle is kept.
pub struct Voice {
    index: usize,
    channel: Arc<dyn Channel>,
}

impl Voice {
    /// Index of the channel this playback landed on.
    pub fn channel_index(&self) -> usize {
        self.index
    }

    /// Whether the channel is still playing. Once the clip runs out the
    /// channel goes idle and may be re-used by later plays, so a stale
    /// handle can observe an unrelated playback.
    pub fn is_busy(&self) -> bool {
        self.channel.is_busy()
    }
}

impl std::fmt::Debug for Voice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Voice")
            .field("channel_index", &self.index)
            .finish_non_exhaustive()
    }
}

/// Builder for [`AudioManager`].
///
/// Collects the catalog, the channels and (optionally) a pre-configured
/// bus, then validates and wires everything in [`build`].
///
/// [`build`]: AudioManagerBuilder::build
pub struct AudioManagerBuilder {
    catalog: Option<ClipCatalog>,
    channels: Vec<Arc<dyn Channel>>,
    bus: Option<Arc<MixBus>>,
}

impl AudioManagerBuilder {
    pub fn catalog(mut self, catalog: ClipCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Append one channel. Pool order is the order of these calls.
    pub fn channel(mut self, channel: Arc<dyn Channel>) -> Self {
        self.channels.push(channel);
        self
    }

    /// Append several channels at once.
    pub fn channels(mut self, channels: impl IntoIterator<Item = Arc<dyn Channel>>) -> Self {
        self.channels.extend(channels);
        self
    }

    /// Use this bus instead of a fresh one at unity gain.
    pub fn bus(mut self, bus: Arc<MixBus>) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Validate the setup and wire the bus.
    ///
    /// A manager with no channels or no clips cannot do its job, so both
    /// are refused here rather than surfacing later as odd play failures.
    /// On success every channel has been attached to the bus exactly once.
    pub fn build(self) -> Result<AudioManager, SetupError> {
        if self.channels.is_empty() {
            return Err(SetupError::EmptyPool);
        }

        let catalog = self.catalog.unwrap_or_default();
        if catalog.is_empty() {
            return Err(SetupError::EmptyCatalog);
        }

        let bus = self.bus.unwrap_or_default();
        let pool = ChannelPool::new(self.channels);
        for channel in pool.iter() {
            channel.attach_bus(&bus);
        }

        info!(
            "audio manager ready: {} clips, {} channels",
            catalog.len(),
            pool.len()
        );

        Ok(AudioManager { catalog, pool, bus })
    }
}

/// Errors from the play entry points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayError {
    /// The clip handle refers to nothing (empty id).
    EmptyClip,
    /// The catalog could not resolve the request.
    Catalog(CatalogError),
}

impl From<CatalogError> for PlayError {
    fn from(err: CatalogError) -> Self {
        PlayError::Catalog(err)
    }
}

impl std::fmt::Display for PlayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayError::EmptyClip => write!(f, "refusing to play a clip with an empty id"),
            PlayError::Catalog(_) => write!(f, "clip lookup failed"),
        }
    }
}

impl std::error::Error for PlayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlayError::Catalog(err) => Some(err),
            PlayError::EmptyClip => None,
        }
    }
}

/// Fatal construction errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    /// The channel pool has no channels.
    EmptyPool,
    /// The clip catalog has no clips.
    EmptyCatalog,
}

impl std::fmt::Display for SetupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SetupError::EmptyPool => {
                write!(f, "channel pool is empty: at least one channel is required")
            }
            SetupError::EmptyCatalog => {
                write!(f, "clip catalog is empty: at least one clip is required")
            }
        }
    }
}

impl std::error::Error for SetupError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::fake::{pool_of, FakeChannel};

    fn demo_catalog() -> ClipCatalog {
        ClipCatalog::builder()
            .clip(Clip::new("kick_01", "Kick"))
            .clip(Clip::new("snare_01", "Snare"))
            .build()
            .unwrap()
    }

    fn demo_manager(n: usize) -> (AudioManager, Vec<Arc<FakeChannel>>) {
        let (pool, fakes) = pool_of(n);
        let manager = AudioManager::builder()
            .catalog(demo_catalog())
            .channels(pool.iter().cloned())
            .build()
            .unwrap();
        (manager, fakes)
    }

    #[test]
    fn build_rejects_empty_pool() {
        let result = AudioManager::builder().catalog(demo_catalog()).build();
        assert!(matches!(result, Err(SetupError::EmptyPool)));
    }

    #[test]
    fn build_rejects_empty_catalog() {
        let (pool, _fakes) = pool_of(2);
        let result = AudioManager::builder().channels(pool.iter().cloned()).build();
        assert!(matches!(result, Err(SetupError::EmptyCatalog)));

        // An explicitly empty catalog is just as fatal
        let result = AudioManager::builder()
            .catalog(ClipCatalog::builder().build().unwrap())
            .channels(pool.iter().cloned())
            .build();
        assert!(matches!(result, Err(SetupError::EmptyCatalog)));
    }

    #[test]
    fn build_attaches_bus_to_every_channel_once() {
        let (pool, fakes) = pool_of(3);
        let bus = Arc::new(MixBus::new());
        let manager = AudioManager::builder()
            .catalog(demo_catalog())
            .channels(pool.iter().cloned())
            .bus(bus.clone())
            .build()
            .unwrap();

        assert_eq!(bus.attached_channels(), 3);
        for ch in &fakes {
            assert_eq!(ch.attach_count(), 1);
        }
        assert!(Arc::ptr_eq(manager.bus(), &bus));
    }

    #[test]
    fn play_takes_first_idle_channel_in_order() {
        let (manager, fakes) = demo_manager(3);
        let kick = manager.catalog().resolve_by_name("Kick").unwrap().clone();

        for expected in 0..3 {
            let voice = manager.play(&kick).unwrap().expect("idle channel");
            assert_eq!(voice.channel_index(), expected);
        }

        for ch in &fakes {
            assert_eq!(ch.bind_count(), 1);
            assert_eq!(ch.start_count(), 1);
            assert_eq!(ch.bound_clip().unwrap().name(), "Kick");
        }
    }

    #[test]
    fn play_binds_before_starting() {
        let (manager, fakes) = demo_manager(1);
        manager.play_by_name("Snare").unwrap().expect("idle channel");

        // The clip must already be bound when playback begins
        assert_eq!(fakes[0].bound_clip().unwrap().id(), "snare_01");
        assert_eq!(fakes[0].start_count(), 1);
    }

    #[test]
    fn exhausted_pool_drops_the_request() {
        let (manager, fakes) = demo_manager(2);
        let kick = Clip::new("kick_01", "Kick");

        assert!(manager.play(&kick).unwrap().is_some());
        assert!(manager.play(&kick).unwrap().is_some());

        // Third request: no error, no voice, no channel touched
        assert!(manager.play(&kick).unwrap().is_none());
        assert!(manager.play(&kick).unwrap().is_none());
        for ch in &fakes {
            assert_eq!(ch.bind_count(), 1);
            assert_eq!(ch.start_count(), 1);
        }
    }

    #[test]
    fn busy_channel_is_never_rebound() {
        let (manager, fakes) = demo_manager(2);
        fakes[0].start();

        let voice = manager.play_by_name("Kick").unwrap().expect("idle channel");
        assert_eq!(voice.channel_index(), 1);
        assert_eq!(fakes[0].bind_count(), 0);
    }

    #[test]
    fn released_channel_is_reused_first() {
        let (manager, fakes) = demo_manager(3);
        for _ in 0..3 {
            manager.play_by_name("Kick").unwrap().expect("idle channel");
        }

        fakes[1].finish();
        let voice = manager.play_by_name("Snare").unwrap().expect("idle channel");
        assert_eq!(voice.channel_index(), 1);
        assert_eq!(fakes[1].bound_clip().unwrap().name(), "Snare");
    }

    #[test]
    fn empty_clip_is_an_error_even_with_idle_channels() {
        let (manager, fakes) = demo_manager(2);

        let result = manager.play(&Clip::new("", "Ghost"));
        assert!(matches!(result, Err(PlayError::EmptyClip)));
        assert_eq!(fakes[0].bind_count(), 0);
        assert_eq!(fakes[0].start_count(), 0);
    }

    #[test]
    fn empty_clip_beats_exhaustion() {
        let (manager, _fakes) = demo_manager(1);
        manager.play_by_name("Kick").unwrap().expect("idle channel");

        // A bad clip stays a hard failure even when it would be dropped anyway
        let result = manager.play(&Clip::new("", "Ghost"));
        assert!(matches!(result, Err(PlayError::EmptyClip)));
    }

    #[test]
    fn unknown_name_is_a_hard_failure() {
        let (manager, fakes) = demo_manager(2);

        let result = manager.play_by_name("Cowbell");
        assert!(matches!(
            result,
            Err(PlayError::Catalog(CatalogError::NotFound { ref name })) if name == "Cowbell"
        ));
        assert_eq!(fakes[0].bind_count(), 0);
    }

    #[test]
    fn out_of_range_index_is_a_hard_failure() {
        let (manager, _fakes) = demo_manager(2);

        let result = manager.play_by_index(5);
        assert!(matches!(
            result,
            Err(PlayError::Catalog(CatalogError::OutOfRange { index: 5, len: 2 }))
        ));
    }

    #[test]
    fn play_by_index_uses_catalog_order() {
        let (manager, fakes) = demo_manager(1);
        manager.play_by_index(1).unwrap().expect("idle channel");
        assert_eq!(fakes[0].bound_clip().unwrap().name(), "Snare");
    }

    #[test]
    fn is_playing_tracks_the_pool() {
        let (manager, fakes) = demo_manager(2);
        assert!(!manager.is_playing());

        let voice = manager.play_by_name("Kick").unwrap().expect("idle channel");
        assert!(manager.is_playing());
        assert!(voice.is_busy());

        fakes[0].finish();
        assert!(!manager.is_playing());
        assert!(!voice.is_busy());
    }

    #[test]
    fn catalog_errors_chain_as_sources() {
        use std::error::Error as _;

        let err = PlayError::from(CatalogError::NotFound {
            name: "Cowbell".into(),
        });
        let source = err.source().expect("catalog source");
        assert!(source.to_string().contains("Cowbell"));
    }
}
