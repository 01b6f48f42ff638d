pub mod catalog;
pub mod channel; // Playback seam and the fixed pool
pub mod config;
pub mod manager; // Voice allocation, silence wait
pub mod mix;
#[cfg(feature = "rtrb")]
pub mod pcm; // Sample playback over SPSC command rings
pub mod tones;

pub use catalog::{CatalogError, Clip, ClipCatalog};
pub use channel::{Channel, ChannelPool};
pub use config::{AudioConfig, ClipEntry};
pub use manager::{AudioManager, AudioManagerBuilder, PlayError, SetupError, Silence, Voice};
pub use mix::MixBus;

pub const MAX_BLOCK_SIZE: usize = 2048;
