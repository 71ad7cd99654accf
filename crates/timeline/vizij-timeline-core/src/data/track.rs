use std::fmt;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::data::Curve;
use crate::resource::SharedCurve;

/// The four track families a timeline holds.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum TrackKind {
    Event,
    Scalar,
    Vector,
    Color,
}

impl TrackKind {
    pub const ALL: [TrackKind; 4] = [
        TrackKind::Event,
        TrackKind::Scalar,
        TrackKind::Vector,
        TrackKind::Color,
    ];

    /// Curve channels a resource must provide for this kind.
    pub fn channel_count(self) -> usize {
        match self {
            TrackKind::Event | TrackKind::Scalar => 1,
            TrackKind::Vector => 3,
            TrackKind::Color => 4,
        }
    }

    /// Value tracks are sampled on every seek; event tracks fire on crossings.
    pub fn is_value(self) -> bool {
        !matches!(self, TrackKind::Event)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TrackKind::Event => "event",
            TrackKind::Scalar => "scalar",
            TrackKind::Vector => "vector",
            TrackKind::Color => "color",
        }
    }
}

impl fmt::Display for TrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One channel of a timeline.
///
/// `binding` names the output callback for sampled values (value tracks) or
/// the fallback event callback for keys without their own (event tracks).
/// A track without a curve is inert.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub kind: TrackKind,
    #[serde(default)]
    pub binding: String,
    #[serde(default)]
    pub curve: Option<Curve>,
}

impl Track {
    pub fn key_count(&self) -> usize {
        self.curve.as_ref().map_or(0, |c| c.keys.len())
    }

    pub fn last_key_time(&self) -> Option<f32> {
        self.curve.as_ref().and_then(Curve::last_key_time)
    }

    pub fn first_key_time(&self) -> Option<f32> {
        self.curve.as_ref().and_then(Curve::first_key_time)
    }
}

/// Caller-side description of a track to add; ids are generated on insert.
#[derive(Clone, Debug)]
pub struct TrackDesc {
    pub kind: TrackKind,
    pub name: String,
    pub binding: String,
    pub curve: Option<SharedCurve>,
}

impl TrackDesc {
    pub fn new(kind: TrackKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            binding: String::new(),
            curve: None,
        }
    }

    pub fn scalar(name: impl Into<String>, binding: impl Into<String>, curve: SharedCurve) -> Self {
        Self::new(TrackKind::Scalar, name)
            .with_binding(binding)
            .with_curve(curve)
    }

    pub fn vector(name: impl Into<String>, binding: impl Into<String>, curve: SharedCurve) -> Self {
        Self::new(TrackKind::Vector, name)
            .with_binding(binding)
            .with_curve(curve)
    }

    pub fn color(name: impl Into<String>, binding: impl Into<String>, curve: SharedCurve) -> Self {
        Self::new(TrackKind::Color, name)
            .with_binding(binding)
            .with_curve(curve)
    }

    pub fn event(name: impl Into<String>, binding: impl Into<String>, curve: SharedCurve) -> Self {
        Self::new(TrackKind::Event, name)
            .with_binding(binding)
            .with_curve(curve)
    }

    pub fn with_binding(mut self, binding: impl Into<String>) -> Self {
        self.binding = binding.into();
        self
    }

    pub fn with_curve(mut self, curve: SharedCurve) -> Self {
        self.curve = Some(curve);
        self
    }
}

/// A timeline's tracks, one unordered map per kind keyed by track id.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TrackSet {
    #[serde(default)]
    pub event: HashMap<String, Track>,
    #[serde(default)]
    pub scalar: HashMap<String, Track>,
    #[serde(default)]
    pub vector: HashMap<String, Track>,
    #[serde(default)]
    pub color: HashMap<String, Track>,
}

impl TrackSet {
    pub fn of_kind(&self, kind: TrackKind) -> &HashMap<String, Track> {
        match kind {
            TrackKind::Event => &self.event,
            TrackKind::Scalar => &self.scalar,
            TrackKind::Vector => &self.vector,
            TrackKind::Color => &self.color,
        }
    }

    pub fn of_kind_mut(&mut self, kind: TrackKind) -> &mut HashMap<String, Track> {
        match kind {
            TrackKind::Event => &mut self.event,
            TrackKind::Scalar => &mut self.scalar,
            TrackKind::Vector => &mut self.vector,
            TrackKind::Color => &mut self.color,
        }
    }

    /// All tracks, event tracks first, then scalar, vector, color.
    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        TrackKind::ALL
            .into_iter()
            .flat_map(move |kind| self.of_kind(kind).values())
    }

    pub fn get(&self, id: &str) -> Option<&Track> {
        TrackKind::ALL
            .into_iter()
            .find_map(|kind| self.of_kind(kind).get(id))
    }

    pub fn get_in(&self, kind: TrackKind, id: &str) -> Option<&Track> {
        self.of_kind(kind).get(id)
    }

    pub fn get_in_mut(&mut self, kind: TrackKind, id: &str) -> Option<&mut Track> {
        self.of_kind_mut(kind).get_mut(id)
    }

    pub fn insert(&mut self, track: Track) -> Option<Track> {
        self.of_kind_mut(track.kind).insert(track.id.clone(), track)
    }

    pub fn remove(&mut self, kind: TrackKind, id: &str) -> Option<Track> {
        self.of_kind_mut(kind).remove(id)
    }

    pub fn len(&self) -> usize {
        TrackKind::ALL
            .into_iter()
            .map(|kind| self.of_kind(kind).len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        for kind in TrackKind::ALL {
            self.of_kind_mut(kind).clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare(id: &str, kind: TrackKind) -> Track {
        Track {
            id: id.into(),
            name: id.into(),
            kind,
            binding: String::new(),
            curve: None,
        }
    }

    #[test]
    fn tracks_land_in_their_kind_map() {
        let mut set = TrackSet::default();
        set.insert(bare("a", TrackKind::Scalar));
        set.insert(bare("b", TrackKind::Color));
        set.insert(bare("c", TrackKind::Event));
        assert_eq!(set.len(), 3);
        assert!(set.get_in(TrackKind::Scalar, "a").is_some());
        assert!(set.get_in(TrackKind::Vector, "a").is_none());
        assert_eq!(set.get("b").map(|t| t.kind), Some(TrackKind::Color));
        assert!(set.remove(TrackKind::Color, "b").is_some());
        assert_eq!(set.iter().count(), 2);
        set.clear();
        assert!(set.is_empty());
    }

    #[test]
    fn channel_counts_match_value_shapes() {
        assert_eq!(TrackKind::Vector.channel_count(), 3);
        assert_eq!(TrackKind::Color.channel_count(), 4);
        assert_eq!(TrackKind::Event.channel_count(), 1);
        assert!(!TrackKind::Event.is_value());
    }
}
