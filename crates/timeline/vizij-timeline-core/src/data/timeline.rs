use serde::{Deserialize, Serialize};

use crate::data::TrackSet;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayStatus {
    ForwardPlaying,
    ReversePlaying,
    Paused,
    #[default]
    Stopped,
}

impl PlayStatus {
    #[inline]
    pub fn is_playing(self) -> bool {
        matches!(self, PlayStatus::ForwardPlaying | PlayStatus::ReversePlaying)
    }

    #[inline]
    pub fn is_reverse(self) -> bool {
        matches!(self, PlayStatus::ReversePlaying)
    }
}

/// A playback instance: tracks, position and status, bound to one setting.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Timeline {
    pub id: String,
    pub name: String,
    pub setting_id: String,
    #[serde(default)]
    pub tracks: TrackSet,
    /// Seconds.
    #[serde(default)]
    pub position: f32,
    #[serde(default)]
    pub status: PlayStatus,
}

impl Timeline {
    pub fn new(id: String, name: impl Into<String>, setting_id: String) -> Self {
        Self {
            id,
            name: name.into(),
            setting_id,
            ..Self::default()
        }
    }

    /// Latest key time over every track; 0 when nothing is keyed.
    pub fn keyframe_length(&self) -> f32 {
        self.tracks
            .iter()
            .filter_map(|t| t.last_key_time())
            .fold(0.0, f32::max)
    }

    /// Earliest key time over every track; 0 when nothing is keyed.
    pub fn first_keyframe_time(&self) -> f32 {
        self.tracks
            .iter()
            .filter_map(|t| t.first_key_time())
            .reduce(f32::min)
            .unwrap_or(0.0)
    }
}
