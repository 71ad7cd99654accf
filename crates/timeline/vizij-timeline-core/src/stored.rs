//! Stored timeline projects (JSON) and loading them into an [`Engine`].
//!
//! Shape:
//! ```json
//! {
//!   "settings": [{ "name": "loop", "is_loop": true, "length_mode": "Custom", "length": 10 }],
//!   "timelines": [{
//!     "name": "door",
//!     "setting": "loop",
//!     "tracks": [{
//!       "kind": "Scalar", "name": "open", "binding": "door.open",
//!       "channels": [[{ "time": 0, "value": 0 }, { "time": 2, "value": 1, "interp": "Cubic" }]]
//!     }]
//!   }]
//! }
//! ```
//! Timelines name their setting by its stored `name`. Channel keys must be in
//! non-decreasing time order. Event keys may carry an `event` callback.
//! Loading goes through the ordinary `add_*` operations, so every record gets
//! a fresh id; [`LoadedProject`] maps stored names to those ids.

use hashbrown::HashMap;
use serde::Deserialize;

use crate::data::{SettingCfg, TrackDesc, TrackKind};
use crate::engine::Engine;
use crate::error::{Result, TimelineError};
use crate::outputs::CallbackSink;
use crate::resource::{NativeKey, RichCurve};

/// Parsed, checked stored project.
#[derive(Clone, Debug, Deserialize)]
pub struct StoredProject {
    #[serde(default)]
    pub settings: Vec<StoredSetting>,
    #[serde(default)]
    pub timelines: Vec<StoredTimeline>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct StoredSetting {
    pub name: String,
    #[serde(flatten)]
    pub cfg: StoredSettingFields,
}

/// Setting fields; anything omitted takes the [`SettingCfg`] default.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct StoredSettingFields {
    pub play_rate: Option<f32>,
    pub is_loop: Option<bool>,
    pub ignore_time_dilation: Option<bool>,
    pub length_mode: Option<crate::data::LengthMode>,
    pub length: Option<f32>,
    pub update_callback: Option<String>,
    pub finished_callback: Option<String>,
    pub play_method: Option<crate::data::PlayMethod>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct StoredTimeline {
    pub name: String,
    pub setting: String,
    #[serde(default)]
    pub tracks: Vec<StoredTrack>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct StoredTrack {
    pub kind: TrackKind,
    pub name: String,
    #[serde(default)]
    pub binding: String,
    /// One key list per curve channel; empty means an inert track.
    #[serde(default)]
    pub channels: Vec<Vec<StoredKey>>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct StoredKey {
    #[serde(flatten)]
    pub native: NativeKey,
    #[serde(default)]
    pub event: Option<String>,
}

/// Ids generated while loading, keyed by stored names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadedProject {
    pub settings: HashMap<String, String>,
    pub timelines: HashMap<String, String>,
    /// Keyed by `"<timeline>/<track>"`.
    pub tracks: HashMap<String, String>,
}

impl LoadedProject {
    pub fn track(&self, timeline: &str, track: &str) -> Option<&str> {
        self.tracks
            .get(&format!("{timeline}/{track}"))
            .map(String::as_str)
    }
}

fn bad(reason: String) -> TimelineError {
    TimelineError::Serialization { reason }
}

impl StoredSettingFields {
    fn to_cfg(&self, name: &str) -> SettingCfg {
        let d = SettingCfg::default();
        SettingCfg {
            name: name.to_string(),
            play_rate: self.play_rate.unwrap_or(d.play_rate),
            is_loop: self.is_loop.unwrap_or(d.is_loop),
            ignore_time_dilation: self.ignore_time_dilation.unwrap_or(d.ignore_time_dilation),
            length_mode: self.length_mode.unwrap_or(d.length_mode),
            length: self.length.unwrap_or(d.length),
            update_callback: self.update_callback.clone().unwrap_or(d.update_callback),
            finished_callback: self.finished_callback.clone().unwrap_or(d.finished_callback),
            play_method: self.play_method.unwrap_or(d.play_method),
        }
    }
}

impl StoredProject {
    /// Structural checks: unique names, resolvable settings, channel counts,
    /// ordered keys.
    pub fn validate(&self) -> Result<()> {
        let mut setting_names = hashbrown::HashSet::new();
        for s in &self.settings {
            if s.name.is_empty() {
                return Err(bad("setting with an empty name".into()));
            }
            if !setting_names.insert(s.name.as_str()) {
                return Err(bad(format!("duplicate setting name '{}'", s.name)));
            }
        }
        let mut timeline_names = hashbrown::HashSet::new();
        for tl in &self.timelines {
            if !timeline_names.insert(tl.name.as_str()) {
                return Err(bad(format!("duplicate timeline name '{}'", tl.name)));
            }
            if !setting_names.contains(tl.setting.as_str()) {
                return Err(bad(format!(
                    "timeline '{}' references unknown setting '{}'",
                    tl.name, tl.setting
                )));
            }
            let mut track_names = hashbrown::HashSet::new();
            for track in &tl.tracks {
                if !track_names.insert(track.name.as_str()) {
                    return Err(bad(format!(
                        "duplicate track name '{}' in timeline '{}'",
                        track.name, tl.name
                    )));
                }
                track.validate(&tl.name)?;
            }
        }
        Ok(())
    }
}

impl StoredTrack {
    fn validate(&self, timeline: &str) -> Result<()> {
        let expected = self.kind.channel_count();
        if !self.channels.is_empty() && self.channels.len() != expected {
            return Err(bad(format!(
                "track '{timeline}/{}': {} track needs {expected} channel(s), found {}",
                self.name,
                self.kind,
                self.channels.len()
            )));
        }
        for keys in &self.channels {
            if keys.windows(2).any(|w| w[1].native.time < w[0].native.time) {
                return Err(bad(format!(
                    "track '{timeline}/{}': key times must be non-decreasing",
                    self.name
                )));
            }
            if keys.iter().any(|k| !k.native.time.is_finite()) {
                return Err(bad(format!(
                    "track '{timeline}/{}': key times must be finite",
                    self.name
                )));
            }
        }
        if self.kind != TrackKind::Event && self.channels.iter().flatten().any(|k| k.event.is_some())
        {
            return Err(bad(format!(
                "track '{timeline}/{}': only event tracks carry key events",
                self.name
            )));
        }
        Ok(())
    }

    fn resource(&self) -> Option<RichCurve> {
        if self.channels.is_empty() {
            return None;
        }
        Some(RichCurve::new(
            self.channels
                .iter()
                .map(|keys| keys.iter().map(|k| k.native).collect())
                .collect(),
        ))
    }
}

/// Parse and check stored project JSON.
pub fn parse_stored_project_json(s: &str) -> Result<StoredProject> {
    let project: StoredProject = serde_json::from_str(s)?;
    project.validate()?;
    Ok(project)
}

impl<S: CallbackSink> Engine<S> {
    /// Add every setting, timeline and track of `project`.
    pub fn load_stored(&mut self, project: &StoredProject) -> Result<LoadedProject> {
        project.validate()?;
        let mut loaded = LoadedProject::default();
        for s in &project.settings {
            let id = self.add_setting(s.cfg.to_cfg(&s.name))?;
            loaded.settings.insert(s.name.clone(), id);
        }
        for tl in &project.timelines {
            let setting_id = loaded
                .settings
                .get(&tl.setting)
                .cloned()
                .ok_or_else(|| bad(format!("unknown setting '{}'", tl.setting)))?;
            let timeline_id = self.add_timeline(&tl.name, &setting_id)?;
            for track in &tl.tracks {
                let mut desc =
                    TrackDesc::new(track.kind, track.name.clone()).with_binding(track.binding.clone());
                if let Some(resource) = track.resource() {
                    desc = desc.with_curve(resource.shared());
                }
                let track_id = self.add_track(&timeline_id, desc)?;
                self.bind_stored_events(&track_id, track)?;
                loaded
                    .tracks
                    .insert(format!("{}/{}", tl.name, track.name), track_id);
            }
            loaded.timelines.insert(tl.name.clone(), timeline_id);
        }
        Ok(loaded)
    }

    /// Parse `json` and load it.
    pub fn load_stored_json(&mut self, json: &str) -> Result<LoadedProject> {
        let project = parse_stored_project_json(json)?;
        self.load_stored(&project)
    }

    /// Cached keys follow the stored order (channel by channel), so stored
    /// key `i` maps to cached key `i`.
    fn bind_stored_events(&mut self, track_id: &str, stored: &StoredTrack) -> Result<()> {
        let events: Vec<(String, String)> = {
            let (_, track) = self.track(track_id)?;
            let Some(curve) = &track.curve else {
                return Ok(());
            };
            stored
                .channels
                .iter()
                .flatten()
                .zip(&curve.keys)
                .filter_map(|(sk, key)| sk.event.clone().map(|cb| (key.id.clone(), cb)))
                .collect()
        };
        for (key_id, callback) in events {
            self.set_key_event(&key_id, &callback)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_setting_is_rejected() {
        let json = r#"{ "settings": [], "timelines": [{ "name": "a", "setting": "nope" }] }"#;
        let err = parse_stored_project_json(json).unwrap_err();
        assert_eq!(err.category(), "serialization");
        assert!(err.to_string().contains("unknown setting"));
    }

    #[test]
    fn channel_count_must_match_kind() {
        let json = r#"{
            "settings": [{ "name": "s" }],
            "timelines": [{ "name": "a", "setting": "s", "tracks": [
                { "kind": "Vector", "name": "pos", "channels": [[{ "time": 0, "value": 1 }]] }
            ]}]
        }"#;
        assert!(parse_stored_project_json(json).is_err());
    }

    #[test]
    fn unordered_keys_are_rejected() {
        let json = r#"{
            "settings": [{ "name": "s" }],
            "timelines": [{ "name": "a", "setting": "s", "tracks": [
                { "kind": "Scalar", "name": "x", "channels": [[
                    { "time": 2, "value": 1 }, { "time": 1, "value": 0 }
                ]] }
            ]}]
        }"#;
        assert!(parse_stored_project_json(json).is_err());
    }

    #[test]
    fn omitted_setting_fields_take_defaults() {
        let json = r#"{ "settings": [{ "name": "s", "is_loop": true }] }"#;
        let project = parse_stored_project_json(json).unwrap();
        let cfg = project.settings[0].cfg.to_cfg("s");
        assert!(cfg.is_loop);
        assert_eq!(cfg.play_rate, 1.0);
        assert_eq!(cfg.name, "s");
    }
}
