use serde::{Deserialize, Serialize};

/// How a timeline's playback length is derived.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LengthMode {
    /// Latest key time across every track.
    #[default]
    Keyframe,
    /// The setting's explicit `length`.
    Custom,
}

/// How `play` positions the timeline before it starts ticking.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayMethod {
    /// Forward from the current position.
    #[default]
    Play,
    /// Seek to 0, then forward.
    PlayOnStart,
    /// Backward from the current position.
    Reverse,
    /// Seek to the end, then backward.
    ReverseOnEnd,
}

/// Shared playback configuration; many timelines may reference one setting.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Setting {
    pub id: String,
    pub name: String,
    /// Magnitude only; direction comes from the play status.
    pub play_rate: f32,
    pub is_loop: bool,
    pub ignore_time_dilation: bool,
    pub length_mode: LengthMode,
    /// Used when `length_mode` is `Custom`.
    pub length: f32,
    #[serde(default)]
    pub update_callback: String,
    #[serde(default)]
    pub finished_callback: String,
    #[serde(default)]
    pub play_method: PlayMethod,
}

impl Setting {
    /// Rate keeps its magnitude and length is clamped to >= 0, as the setters do.
    pub fn from_cfg(id: String, cfg: SettingCfg) -> Self {
        Self {
            id,
            name: cfg.name,
            play_rate: cfg.play_rate.abs(),
            is_loop: cfg.is_loop,
            ignore_time_dilation: cfg.ignore_time_dilation,
            length_mode: cfg.length_mode,
            length: cfg.length.max(0.0),
            update_callback: cfg.update_callback,
            finished_callback: cfg.finished_callback,
            play_method: cfg.play_method,
        }
    }
}

/// Configuration for adding a setting.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingCfg {
    pub name: String,
    pub play_rate: f32,
    pub is_loop: bool,
    pub ignore_time_dilation: bool,
    pub length_mode: LengthMode,
    pub length: f32,
    pub update_callback: String,
    pub finished_callback: String,
    pub play_method: PlayMethod,
}

impl Default for SettingCfg {
    fn default() -> Self {
        Self {
            name: "DefaultSetting".to_string(),
            play_rate: 1.0,
            is_loop: false,
            ignore_time_dilation: false,
            length_mode: LengthMode::Keyframe,
            length: 0.0,
            update_callback: String::new(),
            finished_callback: String::new(),
            play_method: PlayMethod::Play,
        }
    }
}

impl SettingCfg {
    /// Custom-length setting, the common shape in tests and tools.
    pub fn custom(length: f32, is_loop: bool) -> Self {
        Self {
            length_mode: LengthMode::Custom,
            length,
            is_loop,
            ..Self::default()
        }
    }

    pub fn with_callbacks(mut self, update: impl Into<String>, finished: impl Into<String>) -> Self {
        self.update_callback = update.into();
        self.finished_callback = finished.into();
        self
    }

    pub fn with_play_rate(mut self, play_rate: f32) -> Self {
        self.play_rate = play_rate;
        self
    }
}
