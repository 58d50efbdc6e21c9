//! vat-params-core: the closed shader parameter vocabulary published by VAT
//! playback, and the batched write model render targets consume.

pub mod key;
pub mod value;
pub mod write_ops;

pub use key::{ParamError, ParamKey, SharedParam, Slot, TrackParam, VOCABULARY_LEN};
pub use value::ParamValue;
pub use write_ops::{ParamBatch, ParamWrite};
