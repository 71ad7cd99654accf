#![allow(dead_code)]
//! Curve resources: the time -> value collaborator behind every track.
//!
//! The engine never evaluates splines itself. It asks a [`CurveResource`] for
//! its native keys (to build the cached key list) and for a sampled value at
//! a given time. [`RichCurve`] is the built-in implementation:
//! - one key list per channel (1 = scalar/event, 3 = vector, 4 = color)
//! - times outside the key range hold the first/last value
//! - Constant holds the left key, Linear lerps, Cubic is a Hermite segment
//!   built from the left key's leave tangent and the right key's arrive tangent

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Interpolation used from a native key to the next one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NativeInterp {
    Constant,
    #[default]
    Linear,
    Cubic,
}

/// How a cubic key's tangents were authored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TangentMode {
    #[default]
    Auto,
    User,
    Break,
}

/// One key as stored by the curve resource.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NativeKey {
    pub time: f32,
    #[serde(default)]
    pub value: f32,
    #[serde(default)]
    pub interp: NativeInterp,
    #[serde(default)]
    pub tangent_mode: TangentMode,
    #[serde(default)]
    pub arrive_tangent: f32,
    #[serde(default)]
    pub leave_tangent: f32,
}

impl NativeKey {
    pub fn linear(time: f32, value: f32) -> Self {
        Self {
            time,
            value,
            ..Self::default()
        }
    }

    pub fn constant(time: f32, value: f32) -> Self {
        Self {
            time,
            value,
            interp: NativeInterp::Constant,
            ..Self::default()
        }
    }

    pub fn cubic(time: f32, value: f32, arrive: f32, leave: f32, mode: TangentMode) -> Self {
        Self {
            time,
            value,
            interp: NativeInterp::Cubic,
            tangent_mode: mode,
            arrive_tangent: arrive,
            leave_tangent: leave,
        }
    }
}

/// Sampling capability the engine consumes.
pub trait CurveResource: fmt::Debug + Send + Sync {
    fn channel_count(&self) -> usize;

    /// Native keys of one channel, ordered by time. Out-of-range channels are empty.
    fn channel_keys(&self, channel: usize) -> &[NativeKey];

    /// Value at `time`, shaped by the channel count (see [`Value::from_channels`]).
    fn sample(&self, time: f32) -> Value;

    fn native_key_count(&self) -> usize {
        (0..self.channel_count())
            .map(|c| self.channel_keys(c).len())
            .sum()
    }
}

/// Shared handle; several tracks may point at one resource.
pub type SharedCurve = Arc<dyn CurveResource>;

/// Keyed multi-channel curve with constant/linear/cubic segments.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RichCurve {
    channels: Vec<Vec<NativeKey>>,
}

impl RichCurve {
    /// Keys are sorted by time per channel; equal times keep their order.
    pub fn new(channels: Vec<Vec<NativeKey>>) -> Self {
        let channels = channels
            .into_iter()
            .map(|mut keys| {
                keys.sort_by(|a, b| a.time.total_cmp(&b.time));
                keys
            })
            .collect();
        Self { channels }
    }

    pub fn scalar(keys: Vec<NativeKey>) -> Self {
        Self::new(vec![keys])
    }

    pub fn vector(x: Vec<NativeKey>, y: Vec<NativeKey>, z: Vec<NativeKey>) -> Self {
        Self::new(vec![x, y, z])
    }

    pub fn color(
        r: Vec<NativeKey>,
        g: Vec<NativeKey>,
        b: Vec<NativeKey>,
        a: Vec<NativeKey>,
    ) -> Self {
        Self::new(vec![r, g, b, a])
    }

    /// Event curve: one channel of constant keys at the given times.
    pub fn events(times: &[f32]) -> Self {
        Self::scalar(times.iter().map(|t| NativeKey::constant(*t, 0.0)).collect())
    }

    pub fn shared(self) -> SharedCurve {
        Arc::new(self)
    }

    pub fn sample_channel(&self, channel: usize, time: f32) -> f32 {
        self.channels
            .get(channel)
            .map(|keys| sample_keys(keys, time))
            .unwrap_or(0.0)
    }
}

impl CurveResource for RichCurve {
    fn channel_count(&self) -> usize {
        self.channels.len()
    }

    fn channel_keys(&self, channel: usize) -> &[NativeKey] {
        self.channels.get(channel).map(Vec::as_slice).unwrap_or(&[])
    }

    fn sample(&self, time: f32) -> Value {
        let samples: Vec<f32> = self
            .channels
            .iter()
            .map(|keys| sample_keys(keys, time))
            .collect();
        Value::from_channels(&samples)
    }
}

/// Find the segment [i, i+1] containing `time` and the local parameter in [0, 1].
/// Before the first key returns (0, 0, 0); after the last returns (last, last, 0).
fn find_segment(keys: &[NativeKey], time: f32) -> (usize, usize, f32) {
    let n = keys.len();
    if n == 0 || n == 1 || time <= keys[0].time {
        return (0, 0, 0.0);
    }
    if time >= keys[n - 1].time {
        return (n - 1, n - 1, 0.0);
    }
    for i in 0..(n - 1) {
        let t0 = keys[i].time;
        let t1 = keys[i + 1].time;
        if time >= t0 && time < t1 {
            let denom = (t1 - t0).max(f32::EPSILON);
            return (i, i + 1, ((time - t0) / denom).clamp(0.0, 1.0));
        }
    }
    (n - 1, n - 1, 0.0)
}

fn sample_keys(keys: &[NativeKey], time: f32) -> f32 {
    if keys.is_empty() {
        return 0.0;
    }
    let (i0, i1, u) = find_segment(keys, time);
    let left = &keys[i0];
    if i0 == i1 {
        return left.value;
    }
    let right = &keys[i1];
    match left.interp {
        NativeInterp::Constant => left.value,
        NativeInterp::Linear => lerp_f32(left.value, right.value, u),
        NativeInterp::Cubic => {
            let span = right.time - left.time;
            hermite(
                left.value,
                left.leave_tangent * span,
                right.value,
                right.arrive_tangent * span,
                u,
            )
        }
    }
}

#[inline]
fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Cubic Hermite basis with tangents already scaled to the segment length.
#[inline]
fn hermite(p0: f32, m0: f32, p1: f32, m1: f32, t: f32) -> f32 {
    let t2 = t * t;
    let t3 = t2 * t;
    (2.0 * t3 - 3.0 * t2 + 1.0) * p0
        + (t3 - 2.0 * t2 + t) * m0
        + (-2.0 * t3 + 3.0 * t2) * p1
        + (t3 - t2) * m1
}
