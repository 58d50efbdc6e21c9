//! Parameter writes published to a render target.
//!
//! ParamWrite serializes to JSON as:
//!   { "key": "_FrameStartA", "value": { "type": "int", "data": 0 } }
//!
//! ParamBatch is a Vec<ParamWrite> applied by the target in one call.

use crate::{ParamKey, ParamValue};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParamWrite {
    pub key: ParamKey,
    pub value: ParamValue,
}

impl ParamWrite {
    pub fn new(key: ParamKey, value: ParamValue) -> Self {
        Self { key, value }
    }
}

/// A batch of parameter writes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParamBatch(pub Vec<ParamWrite>);

impl ParamBatch {
    pub fn new() -> Self {
        ParamBatch(Vec::new())
    }

    pub fn with_capacity(n: usize) -> Self {
        ParamBatch(Vec::with_capacity(n))
    }

    pub fn push(&mut self, key: ParamKey, value: ParamValue) {
        self.0.push(ParamWrite::new(key, value));
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParamWrite> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Last value written for `key`, if any.
    pub fn get(&self, key: ParamKey) -> Option<ParamValue> {
        self.0.iter().rev().find(|w| w.key == key).map(|w| w.value)
    }

    pub fn into_vec(self) -> Vec<ParamWrite> {
        self.0
    }
}

impl fmt::Display for ParamWrite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            ParamValue::Int(i) => write!(f, "{} = {}", self.key, i),
            ParamValue::Float(v) => write!(f, "{} = {:.4}", self.key, v),
        }
    }
}
