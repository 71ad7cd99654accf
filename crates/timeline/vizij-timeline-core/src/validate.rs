//! Structural checks run before a record is used.
//!
//! The `valid_*` predicates are pure and compose bottom-up. The `check_*`
//! variants return the first failure as [`TimelineError::InvalidStructure`]
//! so operations can report why a record was rejected. Nothing is cached:
//! records are mutable between calls, so callers re-check on every use.

use crate::data::{Curve, Key, Setting, Timeline, Track};
use crate::error::{Result, TimelineError};
use crate::ids::RecordKind;

pub fn valid_key(key: &Key) -> bool {
    !key.id.is_empty()
}

pub fn valid_curve(curve: &Curve) -> bool {
    check_curve(curve).is_ok()
}

/// Curve and binding may be absent: an inert track is still valid.
pub fn valid_track(track: &Track) -> bool {
    !track.id.is_empty()
}

pub fn valid_setting(setting: &Setting) -> bool {
    !setting.id.is_empty()
}

pub fn valid_timeline(timeline: &Timeline) -> bool {
    check_timeline(timeline).is_ok()
}

pub fn check_key(key: &Key) -> Result<()> {
    if valid_key(key) {
        Ok(())
    } else {
        Err(TimelineError::invalid(RecordKind::Key, &key.id, "empty id"))
    }
}

pub fn check_curve(curve: &Curve) -> Result<()> {
    if curve.id.is_empty() {
        return Err(TimelineError::invalid(RecordKind::Curve, "", "empty id"));
    }
    if curve.resource.is_none() {
        return Err(TimelineError::invalid(
            RecordKind::Curve,
            &curve.id,
            "no curve resource",
        ));
    }
    if let Some(bad) = curve.keys.iter().find(|k| !valid_key(k)) {
        return Err(TimelineError::invalid(
            RecordKind::Curve,
            &curve.id,
            format!("cached key at t={} has an empty id", bad.time),
        ));
    }
    Ok(())
}

pub fn check_track(track: &Track) -> Result<()> {
    if valid_track(track) {
        Ok(())
    } else {
        Err(TimelineError::invalid(
            RecordKind::Track,
            "",
            format!("track '{}' has an empty id", track.name),
        ))
    }
}

pub fn check_setting(setting: &Setting) -> Result<()> {
    if valid_setting(setting) {
        Ok(())
    } else {
        Err(TimelineError::invalid(
            RecordKind::Setting,
            "",
            format!("setting '{}' has an empty id", setting.name),
        ))
    }
}

pub fn check_timeline(timeline: &Timeline) -> Result<()> {
    if timeline.id.is_empty() {
        return Err(TimelineError::invalid(
            RecordKind::Timeline,
            "",
            format!("timeline '{}' has an empty id", timeline.name),
        ));
    }
    if timeline.setting_id.is_empty() {
        return Err(TimelineError::invalid(
            RecordKind::Timeline,
            &timeline.id,
            "no setting reference",
        ));
    }
    for track in timeline.tracks.iter() {
        check_track(track).map_err(|_| {
            TimelineError::invalid(
                RecordKind::Timeline,
                &timeline.id,
                format!("track '{}' has an empty id", track.name),
            )
        })?;
    }
    Ok(())
}
