//! ParamValue: the two scalar kinds a VAT material property accepts.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum ParamValue {
    /// Integer property (frame bounds).
    Int(i32),
    /// Float property (times, rates, 0/1 toggles).
    Float(f32),
}

impl ParamValue {
    /// Encode a flag the way the shader reads it.
    #[inline]
    pub fn flag(on: bool) -> Self {
        ParamValue::Float(if on { 1.0 } else { 0.0 })
    }

    #[inline]
    pub fn as_f32(&self) -> f32 {
        match *self {
            ParamValue::Int(i) => i as f32,
            ParamValue::Float(f) => f,
        }
    }

    /// Integers compare exactly, floats within `eps`. Mixed kinds never match.
    pub fn approx_eq(&self, other: &ParamValue, eps: f32) -> bool {
        match (self, other) {
            (ParamValue::Int(a), ParamValue::Int(b)) => a == b,
            (ParamValue::Float(a), ParamValue::Float(b)) => (a - b).abs() < eps,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_shape_is_tagged() {
        let s = serde_json::to_string(&ParamValue::Int(12)).unwrap();
        assert_eq!(s, r#"{"type":"int","data":12}"#);
        let f: ParamValue = serde_json::from_str(r#"{"type":"float","data":0.5}"#).unwrap();
        assert_eq!(f, ParamValue::Float(0.5));
    }

    #[test]
    fn approx_eq_rules() {
        assert!(ParamValue::Float(1.0).approx_eq(&ParamValue::Float(1.00005), 1e-4));
        assert!(!ParamValue::Float(1.0).approx_eq(&ParamValue::Float(1.001), 1e-4));
        assert!(!ParamValue::Int(1).approx_eq(&ParamValue::Float(1.0), 1e-4));
        assert_eq!(ParamValue::flag(true).as_f32(), 1.0);
    }
}
