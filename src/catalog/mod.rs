//! Clip identity and lookup.
//!
//! A [`ClipCatalog`] is an ordered, immutable list of clips fixed at
//! startup. Lookups resolve by display name (exact, case-sensitive) or by
//! position; both return the same `&Clip` that playback is later bound to.

/// A named reference to playable audio.
///
/// The `id` is the key a playback backend resolves (e.g. a sample bank
/// entry); the `name` is what user-facing lookup goes through. The two
/// often coincide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clip {
    id: String,
    name: String,
}

impl Clip {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Clip whose id and name are the same string.
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            name,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Ordered, immutable clip list.
///
/// Built once through [`ClipCatalog::builder`]; the index of a clip is its
/// insertion position and never changes afterwards.
#[derive(Debug, Clone, Default)]
pub struct ClipCatalog {
    clips: Vec<Clip>,
}

impl ClipCatalog {
    /// Start building a catalog.
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder { clips: Vec::new() }
    }

    /// Find a clip by display name (exact, case-sensitive).
    pub fn resolve_by_name(&self, name: &str) -> Result<&Clip, CatalogError> {
        self.clips
            .iter()
            .find(|clip| clip.name() == name)
            .ok_or_else(|| CatalogError::NotFound {
                name: name.to_string(),
            })
    }

    /// Find a clip by its position in the catalog.
    pub fn resolve_by_index(&self, index: usize) -> Result<&Clip, CatalogError> {
        self.clips.get(index).ok_or(CatalogError::OutOfRange {
            index,
            len: self.clips.len(),
        })
    }

    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}

/// Builder for [`ClipCatalog`].
///
/// Clip order in the finished catalog is the order of `clip` calls.
pub struct CatalogBuilder {
    clips: Vec<Clip>,
}

impl CatalogBuilder {
    /// Append a clip. Its index will be the current catalog length.
    pub fn clip(mut self, clip: Clip) -> Self {
        self.clips.push(clip);
        self
    }

    /// Build the catalog.
    ///
    /// Fails if two clips share a display name, since name lookup must be
    /// unambiguous.
    pub fn build(self) -> Result<ClipCatalog, CatalogError> {
        for (i, clip) in self.clips.iter().enumerate() {
            if self.clips[..i].iter().any(|c| c.name() == clip.name()) {
                return Err(CatalogError::DuplicateName {
                    name: clip.name().to_string(),
                });
            }
        }

        Ok(ClipCatalog { clips: self.clips })
    }
}

/// Errors from catalog construction and lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Two clips were registered under the same display name.
    DuplicateName { name: String },
    /// No clip carries the requested name.
    NotFound { name: String },
    /// The requested index is outside the catalog.
    OutOfRange { index: usize, len: usize },
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::DuplicateName { name } => {
                write!(f, "duplicate clip name {:?} in catalog", name)
            }
            CatalogError::NotFound { name } => {
                write!(f, "no clip named {:?} in catalog", name)
            }
            CatalogError::OutOfRange { index, len } => {
                write!(
                    f,
                    "clip index {} out of range for catalog of {} clips",
                    index, len
                )
            }
        }
    }
}

impl std::error::Error for CatalogError {}
