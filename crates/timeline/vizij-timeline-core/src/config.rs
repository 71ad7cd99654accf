//! Core configuration for vizij-timeline-core.

use serde::{Deserialize, Serialize};

use crate::data::SettingCfg;
use crate::error::Result;

/// Engine-wide knobs. Per-timeline playback lives in [`SettingCfg`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Keep at least one timeline around: seed one at construction and
    /// after `clear_timelines`.
    pub seed_default_timeline: bool,

    /// Boundary nudge for event windows ending at the timeline length
    /// (forward) or starting at 0 (reverse).
    pub boundary_epsilon: f32,

    /// Host time dilation applied to tick deltas unless a setting opts out.
    pub time_dilation: f32,

    /// Setting used for generated default timelines.
    pub default_setting: SettingCfg,

    /// Name given to generated default timelines.
    pub default_timeline_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed_default_timeline: true,
            boundary_epsilon: 1.0e-4,
            time_dilation: 1.0,
            default_setting: SettingCfg::default(),
            default_timeline_name: "DefaultTimeline".to_string(),
        }
    }
}

impl Config {
    /// Parse a JSON config; missing fields take their defaults.
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// No seeded timeline; the store starts empty.
    pub fn unseeded() -> Self {
        Self {
            seed_default_timeline: false,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::LengthMode;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = Config::from_json(r#"{ "time_dilation": 0.5 }"#).unwrap();
        assert_eq!(cfg.time_dilation, 0.5);
        assert!(cfg.seed_default_timeline);
        assert_eq!(cfg.boundary_epsilon, 1.0e-4);
        assert_eq!(cfg.default_setting.length_mode, LengthMode::Keyframe);
        assert_eq!(cfg.default_setting.play_rate, 1.0);
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        let err = Config::from_json("{").unwrap_err();
        assert_eq!(err.category(), "serialization");
    }
}
