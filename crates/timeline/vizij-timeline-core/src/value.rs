//! Sampled curve values delivered to track output bindings.

use serde::{Deserialize, Serialize};

use crate::data::TrackKind;

/// A value sampled from a curve resource at one instant.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Value {
    Scalar(f32),
    Vector([f32; 3]),
    Color([f32; 4]),
}

impl Value {
    /// Build a value from per-channel samples: 3 channels make a vector,
    /// 4 make a color, anything else collapses to the first channel.
    pub fn from_channels(channels: &[f32]) -> Self {
        match *channels {
            [x, y, z] => Value::Vector([x, y, z]),
            [r, g, b, a] => Value::Color([r, g, b, a]),
            [] => Value::Scalar(0.0),
            [s, ..] => Value::Scalar(s),
        }
    }

    pub fn channels(&self) -> &[f32] {
        match self {
            Value::Scalar(s) => std::slice::from_ref(s),
            Value::Vector(v) => v,
            Value::Color(c) => c,
        }
    }

    /// The track kind whose bindings receive this shape of value.
    pub fn track_kind(&self) -> TrackKind {
        match self {
            Value::Scalar(_) => TrackKind::Scalar,
            Value::Vector(_) => TrackKind::Vector,
            Value::Color(_) => TrackKind::Color,
        }
    }

    pub fn as_scalar(&self) -> Option<f32> {
        match self {
            Value::Scalar(s) => Some(*s),
            _ => None,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Scalar(0.0)
    }
}
