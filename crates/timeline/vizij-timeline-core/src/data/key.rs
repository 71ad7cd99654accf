use serde::{Deserialize, Serialize};

use crate::resource::{NativeInterp, NativeKey, TangentMode};

/// Interpolation tag cached on each key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterpMode {
    Constant,
    Linear,
    CurveAuto,
    CurveUser,
    CurveBreak,
    #[default]
    Unknown,
}

impl InterpMode {
    /// Translate a resource key's interpolation and tangent mode.
    pub fn from_native(interp: NativeInterp, tangent: TangentMode) -> Self {
        match (interp, tangent) {
            (NativeInterp::Constant, _) => InterpMode::Constant,
            (NativeInterp::Linear, _) => InterpMode::Linear,
            (NativeInterp::Cubic, TangentMode::Auto) => InterpMode::CurveAuto,
            (NativeInterp::Cubic, TangentMode::User) => InterpMode::CurveUser,
            (NativeInterp::Cubic, TangentMode::Break) => InterpMode::CurveBreak,
        }
    }

    pub fn is_cubic(self) -> bool {
        matches!(
            self,
            InterpMode::CurveAuto | InterpMode::CurveUser | InterpMode::CurveBreak
        )
    }
}

/// One cached keyframe.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Key {
    pub id: String,
    pub time: f32,
    pub value: f32,
    /// Curve channel the key came from (0 for scalar/event curves).
    #[serde(default)]
    pub channel: usize,
    #[serde(default)]
    pub arrive_tangent: f32,
    #[serde(default)]
    pub leave_tangent: f32,
    #[serde(default)]
    pub interp: InterpMode,
    /// Event tracks only: callback fired when playback crosses this key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
}

impl Key {
    pub fn from_native(id: String, channel: usize, native: &NativeKey) -> Self {
        Self {
            id,
            time: native.time,
            value: native.value,
            channel,
            arrive_tangent: native.arrive_tangent,
            leave_tangent: native.leave_tangent,
            interp: InterpMode::from_native(native.interp, native.tangent_mode),
            event: None,
        }
    }
}
