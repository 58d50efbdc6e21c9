//! Clip catalog: the ordered clip metadata baked alongside a vertex animation texture.

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// A named frame range inside the baked texture.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Clip {
    pub name: String,
    #[serde(default)]
    pub frame_start: i32,
    #[serde(default = "default_frame_end")]
    pub frame_end: i32,
    #[serde(default = "default_framerate")]
    pub framerate: f32,
    #[serde(default = "default_looping")]
    pub looping: bool,
}

fn default_frame_end() -> i32 {
    30
}

fn default_framerate() -> f32 {
    30.0
}

fn default_looping() -> bool {
    true
}

impl Clip {
    pub fn new(
        name: impl Into<String>,
        frame_start: i32,
        frame_end: i32,
        framerate: f32,
        looping: bool,
    ) -> Self {
        Self {
            name: name.into(),
            frame_start,
            frame_end,
            framerate,
            looping,
        }
    }

    /// Number of frames spanned, inclusive of both ends.
    #[inline]
    pub fn frame_count(&self) -> i64 {
        i64::from(self.frame_end) - i64::from(self.frame_start) + 1
    }

    /// Seconds to play from `frame_start` to `frame`.
    #[inline]
    pub fn seconds_to(&self, frame: i32) -> f32 {
        (i64::from(frame) - i64::from(self.frame_start)) as f32 / self.framerate
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.frame_end < self.frame_start {
            return Err(CatalogError::InvalidFrameRange {
                name: self.name.clone(),
                start: self.frame_start,
                end: self.frame_end,
            });
        }
        if !self.framerate.is_finite() || self.framerate <= 0.0 {
            return Err(CatalogError::InvalidFramerate {
                name: self.name.clone(),
                framerate: self.framerate,
            });
        }
        Ok(())
    }
}

/// Ordered, immutable list of clips. Indices into it are what play commands address.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "RawCatalog", into = "RawCatalog")]
pub struct ClipCatalog {
    clips: Vec<Clip>,
}

impl ClipCatalog {
    /// Build a catalog, validating every clip.
    pub fn new(clips: Vec<Clip>) -> Result<Self, CatalogError> {
        for clip in &clips {
            clip.validate()?;
        }
        Ok(Self { clips })
    }

    /// Parse a catalog from JSON. Accepts a bare clip array or `{ "animations": [...] }`.
    pub fn from_json(s: &str) -> Result<Self, CatalogError> {
        let raw: RawCatalog = serde_json::from_str(s)?;
        Self::try_from(raw)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.clips.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Clip> {
        self.clips.get(index)
    }

    /// Index of the first clip whose name matches exactly.
    pub fn find(&self, name: &str) -> Option<usize> {
        self.clips.iter().position(|c| c.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Clip> {
        self.clips.iter()
    }

    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }
}

impl std::ops::Index<usize> for ClipCatalog {
    type Output = Clip;

    fn index(&self, index: usize) -> &Clip {
        &self.clips[index]
    }
}

/// Public API: parse catalog JSON into a validated [`ClipCatalog`].
pub fn parse_catalog_json(s: &str) -> Result<ClipCatalog, CatalogError> {
    ClipCatalog::from_json(s)
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawCatalog {
    List(Vec<Clip>),
    Wrapped { animations: Vec<Clip> },
}

impl TryFrom<RawCatalog> for ClipCatalog {
    type Error = CatalogError;

    fn try_from(raw: RawCatalog) -> Result<Self, Self::Error> {
        match raw {
            RawCatalog::Wrapped { animations } => ClipCatalog::new(animations),
            RawCatalog::List(clips) => ClipCatalog::new(clips),
        }
    }
}

impl From<ClipCatalog> for RawCatalog {
    fn from(catalog: ClipCatalog) -> Self {
        RawCatalog::Wrapped {
            animations: catalog.clips,
        }
    }
}
