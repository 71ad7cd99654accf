//! Playback core: length rule, seek/dispatch, and the per-tick advance.
//!
//! These functions operate on an already-resolved and validated
//! timeline + setting pair; the engine does the lookup and validation.
//!
//! Tick algorithm (one timeline, one host tick):
//! 1. Only `ForwardPlaying`/`ReversePlaying` timelines move.
//! 2. `delta * play_rate`, negated when playing in reverse.
//! 3. Overflow past `length` (forward) or below 0 (reverse):
//!    - looping: seek to the boundary firing events, seek to the opposite
//!      boundary without events, then wrap the target back into range
//!      (0 when `length <= 0`)
//!    - not looping: clamp to the boundary and finish
//! 4. Seek to the target firing events.
//! 5. Finished timelines become `Stopped` and fire the finished callback.

use crate::data::{LengthMode, PlayMethod, PlayStatus, Setting, Timeline, TrackKind};
use crate::outputs::{CallbackSink, Dispatch, Signal};

/// Playback length of `timeline` under its setting's length mode.
pub fn timeline_length(timeline: &Timeline, setting: &Setting) -> f32 {
    match setting.length_mode {
        LengthMode::Custom => setting.length,
        LengthMode::Keyframe => timeline.keyframe_length(),
    }
}

/// Span of time an event-firing seek traverses.
///
/// Forward windows are `[min, max)`, reverse windows `(min, max]`, so a key
/// at the turnaround instant fires once. A forward window ending exactly at
/// `length`, or a reverse one starting exactly at 0, is widened by `epsilon`
/// so keys sitting on the boundary still fire.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EventWindow {
    pub min: f32,
    pub max: f32,
    pub reverse: bool,
}

impl EventWindow {
    pub fn new(old: f32, new: f32, length: f32, reverse: bool, epsilon: f32) -> Self {
        let (mut min, mut max) = if reverse { (new, old) } else { (old, new) };
        if !reverse && max == length {
            max += epsilon;
        }
        if reverse && min == 0.0 {
            min -= epsilon;
        }
        Self { min, max, reverse }
    }

    #[inline]
    pub fn contains(&self, t: f32) -> bool {
        if self.reverse {
            t > self.min && t <= self.max
        } else {
            t >= self.min && t < self.max
        }
    }
}

/// Flags for one seek.
#[derive(Clone, Copy, Debug)]
pub struct SeekOpts {
    pub fire_events: bool,
    pub fire_update: bool,
    /// Direction used for the event window.
    pub reverse: bool,
    pub epsilon: f32,
}

impl SeekOpts {
    /// Explicit jump from `from` to `to`: the event window follows the
    /// direction of travel, whatever the play status.
    pub fn jump(from: f32, to: f32, fire_events: bool, fire_update: bool, epsilon: f32) -> Self {
        Self {
            fire_events,
            fire_update,
            reverse: to < from,
            epsilon,
        }
    }
}

/// Move `timeline` to `new_time` and dispatch, in order: sampled values of
/// every bound value track, crossed event keys (if `fire_events`), then the
/// update callback (if `fire_update`).
pub fn seek<S: CallbackSink + ?Sized>(
    timeline: &mut Timeline,
    setting: &Setting,
    new_time: f32,
    opts: SeekOpts,
    sink: &mut S,
) {
    let old = timeline.position;
    timeline.position = new_time;

    for kind in [TrackKind::Scalar, TrackKind::Vector, TrackKind::Color] {
        for track in timeline.tracks.of_kind(kind).values() {
            if track.binding.is_empty() {
                continue;
            }
            let Some(resource) = track.curve.as_ref().and_then(|c| c.resource.as_ref()) else {
                continue;
            };
            sink.invoke(&Dispatch {
                timeline: timeline.id.clone(),
                callback: track.binding.clone(),
                signal: Signal::Value {
                    track: track.id.clone(),
                    value: resource.sample(new_time),
                },
            });
        }
    }

    if opts.fire_events {
        let length = timeline_length(timeline, setting);
        let window = EventWindow::new(old, new_time, length, opts.reverse, opts.epsilon);
        for track in timeline.tracks.event.values() {
            let Some(curve) = &track.curve else { continue };
            for key in curve.keys.iter().filter(|k| window.contains(k.time)) {
                let callback = match key.event.as_deref() {
                    Some(cb) if !cb.is_empty() => cb,
                    _ => track.binding.as_str(),
                };
                if callback.is_empty() {
                    continue;
                }
                log::trace!(target: "vizij_timeline", "event '{callback}' at t={}", key.time);
                sink.invoke(&Dispatch {
                    timeline: timeline.id.clone(),
                    callback: callback.to_string(),
                    signal: Signal::Event {
                        track: track.id.clone(),
                        key: key.id.clone(),
                        time: key.time,
                    },
                });
            }
        }
    }

    if opts.fire_update && !setting.update_callback.is_empty() {
        sink.invoke(&Dispatch {
            timeline: timeline.id.clone(),
            callback: setting.update_callback.clone(),
            signal: Signal::Update { position: new_time },
        });
    }
}

/// Result of one [`advance`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickOutcome {
    pub position: f32,
    /// The timeline crossed a boundary and wrapped around.
    pub wrapped: bool,
    /// The timeline hit a boundary without looping and stopped.
    pub finished: bool,
}

/// Advance a playing timeline by `delta` seconds (already dilated).
pub fn advance<S: CallbackSink + ?Sized>(
    timeline: &mut Timeline,
    setting: &Setting,
    delta: f32,
    epsilon: f32,
    sink: &mut S,
) -> TickOutcome {
    let mut outcome = TickOutcome {
        position: timeline.position,
        ..TickOutcome::default()
    };
    if !timeline.status.is_playing() {
        return outcome;
    }

    let reverse = timeline.status.is_reverse();
    let step = delta * setting.play_rate * if reverse { -1.0 } else { 1.0 };
    let length = timeline_length(timeline, setting);
    let mut target = timeline.position + step;
    let opts = |fire_events| SeekOpts {
        fire_events,
        fire_update: true,
        reverse,
        epsilon,
    };

    if step > 0.0 && target > length {
        if setting.is_loop {
            seek(timeline, setting, length, opts(true), sink);
            seek(timeline, setting, 0.0, opts(false), sink);
            target = if length > 0.0 { wrap_down(target, length) } else { 0.0 };
            outcome.wrapped = true;
        } else {
            target = length;
            outcome.finished = true;
        }
    } else if step <= 0.0 && target < 0.0 {
        if setting.is_loop {
            seek(timeline, setting, 0.0, opts(true), sink);
            seek(timeline, setting, length, opts(false), sink);
            target = if length > 0.0 { wrap_up(target, length) } else { 0.0 };
            outcome.wrapped = true;
        } else {
            target = 0.0;
            outcome.finished = true;
        }
    }

    seek(timeline, setting, target, opts(true), sink);
    outcome.position = target;

    if outcome.finished {
        timeline.status = PlayStatus::Stopped;
        log::debug!(target: "vizij_timeline", "timeline '{}' finished at {target}", timeline.id);
        if !setting.finished_callback.is_empty() {
            sink.invoke(&Dispatch {
                timeline: timeline.id.clone(),
                callback: setting.finished_callback.clone(),
                signal: Signal::Finished { position: target },
            });
        }
    } else if outcome.wrapped {
        log::debug!(target: "vizij_timeline", "timeline '{}' wrapped to {target}", timeline.id);
    }
    outcome
}

/// Subtract whole lengths until `t <= length`.
fn wrap_down(t: f32, length: f32) -> f32 {
    let laps = ((t - length) / length).ceil().max(0.0);
    let mut t = t - laps * length;
    while t > length {
        t -= length;
    }
    t
}

/// Add whole lengths until `t >= 0`.
fn wrap_up(t: f32, length: f32) -> f32 {
    let laps = (-t / length).ceil().max(0.0);
    let mut t = t + laps * length;
    while t < 0.0 {
        t += length;
    }
    t
}

/// Position the timeline per `method` and start it.
pub fn play<S: CallbackSink + ?Sized>(
    timeline: &mut Timeline,
    setting: &Setting,
    method: PlayMethod,
    epsilon: f32,
    sink: &mut S,
) {
    let from = timeline.position;
    timeline.status = match method {
        PlayMethod::Play => PlayStatus::ForwardPlaying,
        PlayMethod::PlayOnStart => {
            let opts = SeekOpts::jump(from, 0.0, true, true, epsilon);
            seek(timeline, setting, 0.0, opts, sink);
            PlayStatus::ForwardPlaying
        }
        PlayMethod::Reverse => PlayStatus::ReversePlaying,
        PlayMethod::ReverseOnEnd => {
            let length = timeline_length(timeline, setting);
            let opts = SeekOpts::jump(from, length, true, true, epsilon);
            seek(timeline, setting, length, opts, sink);
            PlayStatus::ReversePlaying
        }
    };
}

/// Pause in place, or rewind to 0 (firing events) and stop.
pub fn stop<S: CallbackSink + ?Sized>(
    timeline: &mut Timeline,
    setting: &Setting,
    is_pause: bool,
    epsilon: f32,
    sink: &mut S,
) {
    if is_pause {
        timeline.status = PlayStatus::Paused;
        return;
    }
    let opts = SeekOpts::jump(timeline.position, 0.0, true, true, epsilon);
    seek(timeline, setting, 0.0, opts, sink);
    timeline.status = PlayStatus::Stopped;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_window_is_half_open_with_end_nudge() {
        let w = EventWindow::new(2.0, 4.0, 10.0, false, 1e-4);
        assert!(w.contains(2.0));
        assert!(w.contains(3.9));
        assert!(!w.contains(4.0));

        let w = EventWindow::new(8.0, 10.0, 10.0, false, 1e-4);
        assert!(w.contains(10.0));
    }

    #[test]
    fn reverse_window_is_half_open_with_start_nudge() {
        let w = EventWindow::new(4.5, 3.5, 5.0, true, 1e-4);
        assert!(!w.contains(3.5));
        assert!(w.contains(4.5));

        let w = EventWindow::new(1.0, 0.0, 5.0, true, 1e-4);
        assert!(w.contains(0.0));
        assert!(!w.contains(-0.5));
    }

    #[test]
    fn wraps_match_repeated_subtraction() {
        assert_eq!(wrap_down(12.0, 10.0), 2.0);
        assert_eq!(wrap_down(20.0, 10.0), 10.0);
        assert!((wrap_down(30.5, 10.0) - 0.5).abs() < 1e-5);
        assert_eq!(wrap_up(-3.0, 10.0), 7.0);
        assert_eq!(wrap_up(-20.0, 10.0), 0.0);
    }
}
