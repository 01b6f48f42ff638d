//! Declarative setup descriptors.
//!
//! Plain data describing a manager setup, kept separate from the runtime
//! types so embedders can ship clip sets as static data or load them from
//! disk (enable the `serde` feature for derives).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogError, Clip, ClipCatalog};

/// One clip in a config: bank id plus the display name lookups use.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone)]
pub struct ClipEntry {
    pub id: String,
    pub name: String,
}

impl ClipEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Everything a manager setup needs: the clip set, the pool size and the
/// initial master volume.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone)]
pub struct AudioConfig {
    pub clips: Vec<ClipEntry>,
    pub channels: usize,
    pub master_volume: f32,
}

impl AudioConfig {
    pub const DEFAULT_CHANNELS: usize = 8;

    /// Build the clip catalog described by this config, in entry order.
    pub fn catalog(&self) -> Result<ClipCatalog, CatalogError> {
        let mut builder = ClipCatalog::builder();
        for entry in &self.clips {
            builder = builder.clip(Clip::new(&entry.id, &entry.name));
        }
        builder.build()
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            clips: Vec::new(),
            channels: Self::DEFAULT_CHANNELS,
            master_volume: 1.0,
        }
    }
}
