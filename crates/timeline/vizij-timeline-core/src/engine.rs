#![allow(dead_code)]
//! Engine: owns the store, the id generator and the callback sink, and
//! exposes the id-addressed operation surface.
//!
//! Every public operation resolves its ids through the store, re-validates
//! the records it touches, and returns a [`Result`]. Failures are logged once
//! here, keyed by operation name, and handed back to the caller; nothing in
//! the engine panics or aborts the host.
//!
//! Methods, by group:
//! - create: add_setting, add_timeline, add_timeline_with_setting, add_default_timeline, add_track
//! - mutate: change_track_curve, reset_track, clear_timeline_tracks, reset_timeline, del_track,
//!   del_timeline, apply_setting_to_timeline, clear_timelines, clear_settings, set_*, rename_*
//! - playback: play, play_default, stop, set_playback_position, seek, tick_timeline, tick
//! - query: timeline, setting, track, curve, key, playback_position, timeline_length, ...

use log::{debug, warn};

use crate::config::Config;
use crate::data::{
    Curve, Key, LengthMode, PlayMethod, PlayStatus, Setting, SettingCfg, Timeline, Track,
    TrackDesc, TrackKind,
};
use crate::error::{Result, TimelineError};
use crate::ids::{IdGenerator, RecordKind, UuidIds};
use crate::outputs::{CallbackSink, Outputs};
use crate::playback::{self, SeekOpts, TickOutcome};
use crate::resource::{CurveResource, SharedCurve};
use crate::store::Store;
use crate::validate;

/// Timeline engine, generic over where callbacks go.
#[derive(Debug)]
pub struct Engine<S: CallbackSink = Outputs> {
    cfg: Config,
    ids: Box<dyn IdGenerator>,
    store: Store,
    sink: S,
}

impl Default for Engine<Outputs> {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Engine<Outputs> {
    /// Engine recording dispatches into [`Outputs`].
    pub fn new(cfg: Config) -> Self {
        Self::with_sink(cfg, Outputs::default())
    }

    /// Dispatches recorded since the last drain.
    pub fn outputs(&self) -> &Outputs {
        &self.sink
    }

    pub fn take_outputs(&mut self) -> Outputs {
        std::mem::take(&mut self.sink)
    }

    pub fn clear_outputs(&mut self) {
        self.sink.clear();
    }
}

/// Timeline + setting, both re-validated.
fn resolve<'a>(store: &'a mut Store, timeline_id: &str) -> Result<(&'a mut Timeline, &'a Setting)> {
    let (tl, setting) = store.find_pair_mut(timeline_id)?;
    validate::check_timeline(tl)?;
    validate::check_setting(setting)?;
    Ok((tl, setting))
}

fn check_channels(kind: TrackKind, resource: &dyn CurveResource) -> Result<()> {
    let actual = resource.channel_count();
    if actual != kind.channel_count() {
        return Err(TimelineError::ChannelMismatch {
            kind,
            expected: kind.channel_count(),
            actual,
        });
    }
    Ok(())
}

fn check_finite(kind: RecordKind, id: &str, what: &str, v: f32) -> Result<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(TimelineError::invalid(kind, id, format!("{what} must be finite, got {v}")))
    }
}

impl<S: CallbackSink> Engine<S> {
    /// Engine with uuid ids dispatching into `sink`.
    pub fn with_sink(cfg: Config, sink: S) -> Self {
        Self::with_ids(cfg, sink, UuidIds)
    }

    /// Engine with a caller-supplied id generator.
    pub fn with_ids(cfg: Config, sink: S, ids: impl IdGenerator + 'static) -> Self {
        let mut engine = Self {
            cfg,
            ids: Box::new(ids),
            store: Store::new(),
            sink,
        };
        if engine.cfg.seed_default_timeline {
            // Errors are already logged by the operation.
            let _ = engine.add_default_timeline();
        }
        engine
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Change the host time dilation applied by `tick`/`tick_timeline`.
    pub fn set_time_dilation(&mut self, dilation: f32) -> Result<()> {
        self.logged("set_time_dilation", |e| {
            if !dilation.is_finite() || dilation < 0.0 {
                return Err(TimelineError::invalid(
                    RecordKind::Setting,
                    "",
                    format!("time dilation must be finite and >= 0, got {dilation}"),
                ));
            }
            e.cfg.time_dilation = dilation;
            Ok(())
        })
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn logged<T>(&mut self, op: &'static str, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let result = f(self);
        if let Err(err) = &result {
            warn!(target: "vizij_timeline", "{op} failed [{}]: {err}", err.category());
        }
        result
    }

    fn query<'a, T>(&'a self, op: &'static str, f: impl FnOnce(&'a Self) -> Result<T>) -> Result<T> {
        let result = f(self);
        if let Err(err) = &result {
            warn!(target: "vizij_timeline", "{op} failed [{}]: {err}", err.category());
        }
        result
    }

    fn pair(&self, timeline_id: &str) -> Result<(&Timeline, &Setting)> {
        let (tl, setting) = self.store.find_pair(timeline_id)?;
        validate::check_timeline(tl)?;
        validate::check_setting(setting)?;
        Ok((tl, setting))
    }

    fn update_setting(
        &mut self,
        op: &'static str,
        timeline_id: &str,
        f: impl FnOnce(&mut Setting) -> Result<()>,
    ) -> Result<()> {
        self.logged(op, |e| {
            validate::check_timeline(e.store.find_timeline(timeline_id)?)?;
            let setting = e.store.setting_of_mut(timeline_id)?;
            validate::check_setting(setting)?;
            f(setting)
        })
    }

    // ---- create ----

    /// Add a setting; returns its id.
    pub fn add_setting(&mut self, cfg: SettingCfg) -> Result<String> {
        self.logged("add_setting", |e| {
            check_finite(RecordKind::Setting, "", "play rate", cfg.play_rate)?;
            check_finite(RecordKind::Setting, "", "length", cfg.length)?;
            let id = e.ids.next_id(RecordKind::Setting);
            e.store.insert_setting(Setting::from_cfg(id.clone(), cfg))?;
            Ok(id)
        })
    }

    /// Add an empty timeline bound to an existing setting; returns its id.
    pub fn add_timeline(&mut self, name: &str, setting_id: &str) -> Result<String> {
        self.logged("add_timeline", |e| {
            validate::check_setting(e.store.find_setting(setting_id)?)?;
            let id = e.ids.next_id(RecordKind::Timeline);
            e.store
                .insert_timeline(Timeline::new(id.clone(), name, setting_id.to_string()))?;
            debug!(target: "vizij_timeline", "added timeline '{name}' ({id})");
            Ok(id)
        })
    }

    /// Add a setting and a timeline bound to it; returns (timeline id, setting id).
    pub fn add_timeline_with_setting(
        &mut self,
        name: &str,
        cfg: SettingCfg,
    ) -> Result<(String, String)> {
        let setting_id = self.add_setting(cfg)?;
        match self.add_timeline(name, &setting_id) {
            Ok(timeline_id) => Ok((timeline_id, setting_id)),
            Err(err) => {
                let _ = self.store.remove_setting(&setting_id);
                Err(err)
            }
        }
    }

    /// Add a timeline with the configured default setting; returns its id.
    pub fn add_default_timeline(&mut self) -> Result<String> {
        let name = self.cfg.default_timeline_name.clone();
        let cfg = self.cfg.default_setting.clone();
        self.add_timeline_with_setting(&name, cfg).map(|(tl, _)| tl)
    }

    /// Add a track; when it carries a curve resource the cached key list is
    /// built from the resource's native keys. Returns the track id.
    pub fn add_track(&mut self, timeline_id: &str, desc: TrackDesc) -> Result<String> {
        self.logged("add_track", |e| {
            validate::check_timeline(e.store.find_timeline(timeline_id)?)?;
            let curve = match desc.curve {
                Some(resource) => {
                    check_channels(desc.kind, resource.as_ref())?;
                    let curve_id = e.ids.next_id(RecordKind::Curve);
                    let curve = Curve::materialize(curve_id, desc.kind, resource, e.ids.as_mut());
                    validate::check_curve(&curve)?;
                    Some(curve)
                }
                None => None,
            };
            let id = e.ids.next_id(RecordKind::Track);
            let track = Track {
                id: id.clone(),
                name: desc.name,
                kind: desc.kind,
                binding: desc.binding,
                curve,
            };
            e.store.insert_track(timeline_id, track)?;
            Ok(id)
        })
    }

    // ---- mutate ----

    /// Swap a track's curve resource. The cached keys are dropped and rebuilt
    /// from the new resource; the curve keeps its id.
    pub fn change_track_curve(&mut self, track_id: &str, resource: SharedCurve) -> Result<()> {
        self.logged("change_track_curve", |e| {
            let (_, track) = e.store.find_track(track_id)?;
            validate::check_track(track)?;
            check_channels(track.kind, resource.as_ref())?;
            let kind = track.kind;
            let curve_id = match &track.curve {
                Some(curve) => curve.id.clone(),
                None => e.ids.next_id(RecordKind::Curve),
            };
            let curve = Curve::materialize(curve_id, kind, resource, e.ids.as_mut());
            validate::check_curve(&curve)?;
            e.store.replace_curve(track_id, Some(curve))?;
            Ok(())
        })
    }

    /// Drop a track's curve; the track stays, inert.
    pub fn reset_track(&mut self, track_id: &str) -> Result<()> {
        self.logged("reset_track", |e| {
            validate::check_track(e.store.find_track(track_id)?.1)?;
            e.store.replace_curve(track_id, None)?;
            Ok(())
        })
    }

    /// Remove every track of a timeline; returns how many were removed.
    pub fn clear_timeline_tracks(&mut self, timeline_id: &str) -> Result<usize> {
        self.logged("clear_timeline_tracks", |e| {
            validate::check_timeline(e.store.find_timeline(timeline_id)?)?;
            e.store.clear_tracks(timeline_id)
        })
    }

    /// Remove every track and rewind: position 0, `Stopped`.
    pub fn reset_timeline(&mut self, timeline_id: &str) -> Result<()> {
        self.logged("reset_timeline", |e| {
            validate::check_timeline(e.store.find_timeline(timeline_id)?)?;
            e.store.clear_tracks(timeline_id)?;
            let tl = e.store.find_timeline_mut(timeline_id)?;
            tl.position = 0.0;
            tl.status = PlayStatus::Stopped;
            Ok(())
        })
    }

    /// Remove a track; returns it.
    pub fn del_track(&mut self, track_id: &str) -> Result<Track> {
        self.logged("del_track", |e| e.store.remove_track(track_id))
    }

    /// Remove a timeline. Refuses to remove the last one. With
    /// `delete_setting`, its setting goes too unless another timeline uses it.
    pub fn del_timeline(&mut self, timeline_id: &str, delete_setting: bool) -> Result<()> {
        self.logged("del_timeline", |e| {
            let setting_id = e.store.find_timeline(timeline_id)?.setting_id.clone();
            if e.store.timeline_count() <= 1 {
                return Err(TimelineError::AlreadyAtBoundary {
                    op: "del_timeline".to_string(),
                    reason: "cannot delete the last timeline".to_string(),
                });
            }
            e.store.remove_timeline(timeline_id)?;
            if delete_setting
                && !e.store.is_setting_referenced(&setting_id)
                && e.store.find_setting(&setting_id).is_ok()
            {
                e.store.remove_setting(&setting_id)?;
            }
            Ok(())
        })
    }

    /// Rebind a timeline to another setting. Returns the setting it was bound
    /// to before, if that still resolves.
    pub fn apply_setting_to_timeline(
        &mut self,
        setting_id: &str,
        timeline_id: &str,
    ) -> Result<Option<Setting>> {
        self.logged("apply_setting_to_timeline", |e| {
            validate::check_setting(e.store.find_setting(setting_id)?)?;
            let tl = e.store.find_timeline(timeline_id)?;
            validate::check_timeline(tl)?;
            let previous = e.store.find_setting(&tl.setting_id).ok().cloned();
            e.store.find_timeline_mut(timeline_id)?.setting_id = setting_id.to_string();
            Ok(previous)
        })
    }

    /// Remove every timeline, re-seeding a default one when configured.
    /// Returns how many were removed.
    pub fn clear_timelines(&mut self) -> Result<usize> {
        let removed = self.store.clear_timelines();
        debug!(target: "vizij_timeline", "cleared {removed} timeline(s)");
        if self.cfg.seed_default_timeline {
            self.add_default_timeline()?;
        }
        Ok(removed)
    }

    /// Remove every setting no timeline references; returns how many.
    pub fn clear_settings(&mut self) -> usize {
        self.store.retain_referenced_settings()
    }

    // ---- setting fields, addressed by timeline ----

    pub fn set_length(&mut self, timeline_id: &str, length: f32) -> Result<()> {
        self.update_setting("set_length", timeline_id, |s| {
            check_finite(RecordKind::Setting, &s.id, "length", length)?;
            s.length = length.max(0.0);
            Ok(())
        })
    }

    pub fn set_length_mode(&mut self, timeline_id: &str, mode: LengthMode) -> Result<()> {
        self.update_setting("set_length_mode", timeline_id, |s| {
            s.length_mode = mode;
            Ok(())
        })
    }

    pub fn set_loop(&mut self, timeline_id: &str, is_loop: bool) -> Result<()> {
        self.update_setting("set_loop", timeline_id, |s| {
            s.is_loop = is_loop;
            Ok(())
        })
    }

    /// Only the magnitude is kept; use `play` with a reverse method to go backward.
    pub fn set_play_rate(&mut self, timeline_id: &str, play_rate: f32) -> Result<()> {
        self.update_setting("set_play_rate", timeline_id, |s| {
            check_finite(RecordKind::Setting, &s.id, "play rate", play_rate)?;
            s.play_rate = play_rate.abs();
            Ok(())
        })
    }

    pub fn set_ignore_time_dilation(&mut self, timeline_id: &str, ignore: bool) -> Result<()> {
        self.update_setting("set_ignore_time_dilation", timeline_id, |s| {
            s.ignore_time_dilation = ignore;
            Ok(())
        })
    }

    pub fn set_play_method(&mut self, timeline_id: &str, method: PlayMethod) -> Result<()> {
        self.update_setting("set_play_method", timeline_id, |s| {
            s.play_method = method;
            Ok(())
        })
    }

    pub fn set_update_callback(&mut self, timeline_id: &str, callback: &str) -> Result<()> {
        self.update_setting("set_update_callback", timeline_id, |s| {
            s.update_callback = callback.to_string();
            Ok(())
        })
    }

    pub fn set_finished_callback(&mut self, timeline_id: &str, callback: &str) -> Result<()> {
        self.update_setting("set_finished_callback", timeline_id, |s| {
            s.finished_callback = callback.to_string();
            Ok(())
        })
    }

    // ---- names and bindings ----

    pub fn rename_timeline(&mut self, timeline_id: &str, name: &str) -> Result<()> {
        self.logged("rename_timeline", |e| {
            let tl = e.store.find_timeline_mut(timeline_id)?;
            validate::check_timeline(tl)?;
            tl.name = name.to_string();
            Ok(())
        })
    }

    pub fn rename_setting(&mut self, setting_id: &str, name: &str) -> Result<()> {
        self.logged("rename_setting", |e| {
            let setting = e.store.find_setting_mut(setting_id)?;
            validate::check_setting(setting)?;
            setting.name = name.to_string();
            Ok(())
        })
    }

    pub fn rename_track(&mut self, track_id: &str, name: &str) -> Result<()> {
        self.logged("rename_track", |e| {
            let track = e.store.find_track_mut(track_id)?;
            validate::check_track(track)?;
            track.name = name.to_string();
            Ok(())
        })
    }

    /// Output callback of a value track, or fallback event callback of an event track.
    pub fn set_track_binding(&mut self, track_id: &str, binding: &str) -> Result<()> {
        self.logged("set_track_binding", |e| {
            let track = e.store.find_track_mut(track_id)?;
            validate::check_track(track)?;
            track.binding = binding.to_string();
            Ok(())
        })
    }

    /// Bind the callback fired when playback crosses an event key.
    pub fn set_key_event(&mut self, key_id: &str, callback: &str) -> Result<()> {
        self.logged("set_key_event", |e| {
            let (kind, key) = e.store.find_key_mut(key_id)?;
            if kind != TrackKind::Event {
                return Err(TimelineError::invalid(
                    RecordKind::Key,
                    key_id,
                    format!("key belongs to a {kind} track, not an event track"),
                ));
            }
            validate::check_key(key)?;
            key.event = Some(callback.to_string());
            Ok(())
        })
    }

    // ---- playback ----

    /// Start a timeline. `PlayOnStart` rewinds to 0 and `ReverseOnEnd` jumps to
    /// the end first, both firing events.
    pub fn play(&mut self, timeline_id: &str, method: PlayMethod) -> Result<()> {
        self.logged("play", |e| {
            let eps = e.cfg.boundary_epsilon;
            let (tl, setting) = resolve(&mut e.store, timeline_id)?;
            playback::play(tl, setting, method, eps, &mut e.sink);
            debug!(target: "vizij_timeline", "timeline '{timeline_id}' {:?} via {method:?}", tl.status);
            Ok(())
        })
    }

    /// Start a timeline with the play method stored in its setting.
    pub fn play_default(&mut self, timeline_id: &str) -> Result<()> {
        let method = self.play_method(timeline_id)?;
        self.play(timeline_id, method)
    }

    /// Pause in place, or rewind to 0 (firing events) and stop.
    pub fn stop(&mut self, timeline_id: &str, is_pause: bool) -> Result<()> {
        self.logged("stop", |e| {
            let eps = e.cfg.boundary_epsilon;
            let (tl, setting) = resolve(&mut e.store, timeline_id)?;
            playback::stop(tl, setting, is_pause, eps, &mut e.sink);
            debug!(target: "vizij_timeline", "timeline '{timeline_id}' {:?}", tl.status);
            Ok(())
        })
    }

    /// Move a timeline to `time`. Values are always sampled; events and the
    /// update callback fire on request. With `keep_playing == false` a playing
    /// timeline is paused afterwards.
    pub fn set_playback_position(
        &mut self,
        timeline_id: &str,
        time: f32,
        fire_events: bool,
        fire_update: bool,
        keep_playing: bool,
    ) -> Result<()> {
        self.logged("set_playback_position", |e| {
            check_finite(RecordKind::Timeline, timeline_id, "position", time)?;
            let eps = e.cfg.boundary_epsilon;
            let (tl, setting) = resolve(&mut e.store, timeline_id)?;
            let opts = SeekOpts::jump(tl.position, time, fire_events, fire_update, eps);
            playback::seek(tl, setting, time, opts, &mut e.sink);
            if !keep_playing && tl.status.is_playing() {
                tl.status = PlayStatus::Paused;
            }
            Ok(())
        })
    }

    pub fn seek(
        &mut self,
        timeline_id: &str,
        time: f32,
        fire_events: bool,
        fire_update: bool,
    ) -> Result<()> {
        self.set_playback_position(timeline_id, time, fire_events, fire_update, true)
    }

    /// Advance one timeline by `dt` seconds of host time.
    pub fn tick_timeline(&mut self, timeline_id: &str, dt: f32) -> Result<TickOutcome> {
        self.logged("tick_timeline", |e| {
            check_finite(RecordKind::Timeline, timeline_id, "delta time", dt)?;
            let eps = e.cfg.boundary_epsilon;
            let dilation = e.cfg.time_dilation;
            let (tl, setting) = resolve(&mut e.store, timeline_id)?;
            let delta = if setting.ignore_time_dilation {
                dt
            } else {
                dt * dilation
            };
            Ok(playback::advance(tl, setting, delta, eps, &mut e.sink))
        })
    }

    /// Advance every playing timeline; returns how many advanced. Failures
    /// are logged and skipped.
    pub fn tick(&mut self, dt: f32) -> usize {
        let playing: Vec<String> = self
            .store
            .timelines()
            .filter(|tl| tl.status.is_playing())
            .map(|tl| tl.id.clone())
            .collect();
        playing
            .iter()
            .filter(|id| self.tick_timeline(id, dt).is_ok())
            .count()
    }

    /// True while any timeline is playing; hosts stop ticking otherwise.
    pub fn wants_tick(&self) -> bool {
        self.store.timelines().any(|tl| tl.status.is_playing())
    }

    // ---- query ----

    pub fn timeline(&self, timeline_id: &str) -> Result<&Timeline> {
        self.query("timeline", |e| e.store.find_timeline(timeline_id))
    }

    pub fn setting(&self, setting_id: &str) -> Result<&Setting> {
        self.query("setting", |e| e.store.find_setting(setting_id))
    }

    /// The setting a timeline is bound to.
    pub fn setting_of(&self, timeline_id: &str) -> Result<&Setting> {
        self.query("setting_of", |e| e.pair(timeline_id).map(|(_, s)| s))
    }

    /// A track and the timeline that owns it.
    pub fn track(&self, track_id: &str) -> Result<(&Timeline, &Track)> {
        self.query("track", |e| e.store.find_track(track_id))
    }

    pub fn curve(&self, curve_id: &str) -> Result<&Curve> {
        self.query("curve", |e| e.store.find_curve(curve_id).map(|(_, c)| c))
    }

    /// A key and the track that owns it.
    pub fn key(&self, key_id: &str) -> Result<(&Track, &Key)> {
        self.query("key", |e| e.store.find_key(key_id))
    }

    pub fn playback_position(&self, timeline_id: &str) -> Result<f32> {
        self.query("playback_position", |e| {
            e.pair(timeline_id).map(|(tl, _)| tl.position)
        })
    }

    pub fn play_status(&self, timeline_id: &str) -> Result<PlayStatus> {
        self.query("play_status", |e| e.pair(timeline_id).map(|(tl, _)| tl.status))
    }

    /// Forward or reverse.
    pub fn is_playing(&self, timeline_id: &str) -> Result<bool> {
        self.play_status(timeline_id).map(PlayStatus::is_playing)
    }

    pub fn is_paused(&self, timeline_id: &str) -> Result<bool> {
        self.play_status(timeline_id)
            .map(|s| s == PlayStatus::Paused)
    }

    pub fn is_stopped(&self, timeline_id: &str) -> Result<bool> {
        self.play_status(timeline_id)
            .map(|s| s == PlayStatus::Stopped)
    }

    pub fn play_rate(&self, timeline_id: &str) -> Result<f32> {
        self.setting_of(timeline_id).map(|s| s.play_rate)
    }

    pub fn is_loop(&self, timeline_id: &str) -> Result<bool> {
        self.setting_of(timeline_id).map(|s| s.is_loop)
    }

    pub fn length_mode(&self, timeline_id: &str) -> Result<LengthMode> {
        self.setting_of(timeline_id).map(|s| s.length_mode)
    }

    pub fn ignore_time_dilation(&self, timeline_id: &str) -> Result<bool> {
        self.setting_of(timeline_id).map(|s| s.ignore_time_dilation)
    }

    pub fn play_method(&self, timeline_id: &str) -> Result<PlayMethod> {
        self.setting_of(timeline_id).map(|s| s.play_method)
    }

    /// Length under the setting's length mode.
    pub fn timeline_length(&self, timeline_id: &str) -> Result<f32> {
        self.query("timeline_length", |e| {
            e.pair(timeline_id)
                .map(|(tl, s)| playback::timeline_length(tl, s))
        })
    }

    /// Earliest key time over every track; 0 when nothing is keyed.
    pub fn min_keyframe_time(&self, timeline_id: &str) -> Result<f32> {
        self.query("min_keyframe_time", |e| {
            e.pair(timeline_id).map(|(tl, _)| tl.first_keyframe_time())
        })
    }

    /// Latest key time over every track; 0 when nothing is keyed.
    pub fn max_keyframe_time(&self, timeline_id: &str) -> Result<f32> {
        self.query("max_keyframe_time", |e| {
            e.pair(timeline_id).map(|(tl, _)| tl.keyframe_length())
        })
    }

    /// Tracks of one kind, in no particular order.
    pub fn tracks_of_kind(&self, timeline_id: &str, kind: TrackKind) -> Result<Vec<&Track>> {
        self.query("tracks_of_kind", |e| {
            let (tl, _) = e.pair(timeline_id)?;
            Ok(tl.tracks.of_kind(kind).values().collect())
        })
    }

    pub fn track_count(&self, timeline_id: &str) -> Result<usize> {
        self.query("track_count", |e| {
            e.pair(timeline_id).map(|(tl, _)| tl.tracks.len())
        })
    }

    pub fn timeline_ids(&self) -> Vec<String> {
        self.store.timelines().map(|tl| tl.id.clone()).collect()
    }

    pub fn setting_ids(&self) -> Vec<String> {
        self.store.settings().map(|s| s.id.clone()).collect()
    }

    pub fn timeline_count(&self) -> usize {
        self.store.timeline_count()
    }

    pub fn setting_count(&self) -> usize {
        self.store.setting_count()
    }
}
