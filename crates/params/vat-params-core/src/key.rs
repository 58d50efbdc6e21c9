//! Parameter keys.
//!
//! The vocabulary is closed: seven per-track parameters for each of the two
//! playback slots plus four shared blend/mode parameters. Keys format as the
//! shader property names the VAT material reads, e.g. `_FrameStartA` or
//! `_BlendDuration`, and parse back from the same strings.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of keys in the closed vocabulary.
pub const VOCABULARY_LEN: usize = 2 * TrackParam::ALL.len() + SharedParam::ALL.len();

/// One of the two parallel playback slots.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    A,
    B,
}

impl Slot {
    pub const BOTH: [Slot; 2] = [Slot::A, Slot::B];

    /// The opposite slot.
    #[inline]
    pub fn other(self) -> Slot {
        match self {
            Slot::A => Slot::B,
            Slot::B => Slot::A,
        }
    }

    /// Position of this slot in a two-element track array.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Slot::A => 0,
            Slot::B => 1,
        }
    }

    #[inline]
    pub fn suffix(self) -> &'static str {
        match self {
            Slot::A => "A",
            Slot::B => "B",
        }
    }
}

/// Parameters published once per track.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TrackParam {
    FrameStart,
    FrameEnd,
    Framerate,
    Loop,
    /// Absolute time the track started; the shader subtracts it from its clock.
    TimeOffset,
    /// First frame of the first clip of a sequence, `-1` when unused.
    SequenceStart,
    UseSequence,
}

impl TrackParam {
    pub const ALL: [TrackParam; 7] = [
        TrackParam::FrameStart,
        TrackParam::FrameEnd,
        TrackParam::Framerate,
        TrackParam::Loop,
        TrackParam::TimeOffset,
        TrackParam::SequenceStart,
        TrackParam::UseSequence,
    ];

    fn stem(self) -> &'static str {
        match self {
            TrackParam::FrameStart => "_FrameStart",
            TrackParam::FrameEnd => "_FrameEnd",
            TrackParam::Framerate => "_FPS",
            TrackParam::Loop => "_Loop",
            TrackParam::TimeOffset => "_TimeOffset",
            TrackParam::SequenceStart => "_SeqStart",
            TrackParam::UseSequence => "_UseSeq",
        }
    }
}

/// Parameters shared by both tracks.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SharedParam {
    BlendStartTime,
    BlendDuration,
    /// `1` blends A toward B, `0` blends B toward A.
    BlendDirection,
    /// `1` selects the time-evaluated shader path.
    GpuTimeline,
}

impl SharedParam {
    pub const ALL: [SharedParam; 4] = [
        SharedParam::BlendStartTime,
        SharedParam::BlendDuration,
        SharedParam::BlendDirection,
        SharedParam::GpuTimeline,
    ];

    fn name(self) -> &'static str {
        match self {
            SharedParam::BlendStartTime => "_BlendStartTime",
            SharedParam::BlendDuration => "_BlendDuration",
            SharedParam::BlendDirection => "_BlendDirection",
            SharedParam::GpuTimeline => "_UseGpuTimeline",
        }
    }
}

/// A key in the closed parameter vocabulary.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ParamKey {
    Track(Slot, TrackParam),
    Shared(SharedParam),
}

impl ParamKey {
    /// Every key of the vocabulary in publication order: track A, track B, shared.
    pub fn vocabulary() -> impl Iterator<Item = ParamKey> {
        Slot::BOTH
            .into_iter()
            .flat_map(|slot| {
                TrackParam::ALL
                    .into_iter()
                    .map(move |p| ParamKey::Track(slot, p))
            })
            .chain(SharedParam::ALL.into_iter().map(ParamKey::Shared))
    }

    /// Parse a shader property name such as `_FrameEndB`.
    pub fn parse(s: &str) -> Result<Self, ParamError> {
        if let Some(shared) = SharedParam::ALL.into_iter().find(|p| p.name() == s) {
            return Ok(ParamKey::Shared(shared));
        }
        let (stem, slot) = if let Some(stem) = s.strip_suffix('A') {
            (stem, Slot::A)
        } else if let Some(stem) = s.strip_suffix('B') {
            (stem, Slot::B)
        } else {
            return Err(ParamError::UnknownKey(s.to_string()));
        };
        TrackParam::ALL
            .into_iter()
            .find(|p| p.stem() == stem)
            .map(|p| ParamKey::Track(slot, p))
            .ok_or_else(|| ParamError::UnknownKey(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    #[error("unknown parameter key '{0}'")]
    UnknownKey(String),
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamKey::Track(slot, p) => write!(f, "{}{}", p.stem(), slot.suffix()),
            ParamKey::Shared(p) => f.write_str(p.name()),
        }
    }
}

impl FromStr for ParamKey {
    type Err = ParamError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParamKey::parse(s)
    }
}

impl Serialize for ParamKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ParamKey {
    fn deserialize<D>(deserializer: D) -> Result<ParamKey, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ParamKey::parse(&s).map_err(de::Error::custom)
    }
}
