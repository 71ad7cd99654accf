#![allow(dead_code)]
//! Timeline/setting store and the id index behind every lookup.
//!
//! Timelines and settings live in id-keyed maps. Tracks, curves and keys
//! are owned by their timeline; the [`Index`] maps their ids to the owning
//! track so lookups never scan every timeline. Every mutation that adds or
//! removes a track, curve or key goes through the store so the index stays
//! in step. Lookups fail closed: an empty id or an empty collection returns
//! an error without probing the maps.

use hashbrown::HashMap;

use crate::data::{Curve, Key, Setting, Timeline, Track, TrackKind};
use crate::error::{Result, TimelineError};
use crate::ids::RecordKind;

/// Where a track lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackSlot {
    pub timeline: String,
    pub kind: TrackKind,
}

/// Id -> owner maps for tracks, curves and keys.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Index {
    tracks: HashMap<String, TrackSlot>,
    /// curve id -> track id
    curves: HashMap<String, String>,
    /// key id -> track id
    keys: HashMap<String, String>,
}

impl Index {
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    pub fn curve_count(&self) -> usize {
        self.curves.len()
    }

    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    pub fn slot(&self, track_id: &str) -> Option<&TrackSlot> {
        self.tracks.get(track_id)
    }

    fn clear(&mut self) {
        self.tracks.clear();
        self.curves.clear();
        self.keys.clear();
    }

    /// First id of `track` (its own, its curve's, or a key's) already indexed.
    fn collision(&self, track: &Track) -> Option<(RecordKind, String)> {
        if self.tracks.contains_key(&track.id) {
            return Some((RecordKind::Track, track.id.clone()));
        }
        let curve = track.curve.as_ref()?;
        if self.curves.contains_key(&curve.id) {
            return Some((RecordKind::Curve, curve.id.clone()));
        }
        self.curve_collision(curve)
    }

    fn curve_collision(&self, curve: &Curve) -> Option<(RecordKind, String)> {
        let mut seen = hashbrown::HashSet::with_capacity(curve.keys.len());
        curve
            .keys
            .iter()
            .find(|k| self.keys.contains_key(&k.id) || !seen.insert(k.id.as_str()))
            .map(|k| (RecordKind::Key, k.id.clone()))
    }

    fn add_track(&mut self, timeline: &str, track: &Track) {
        self.tracks.insert(
            track.id.clone(),
            TrackSlot {
                timeline: timeline.to_string(),
                kind: track.kind,
            },
        );
        if let Some(curve) = &track.curve {
            self.add_curve(&track.id, curve);
        }
    }

    fn add_curve(&mut self, track_id: &str, curve: &Curve) {
        self.curves.insert(curve.id.clone(), track_id.to_string());
        for key in &curve.keys {
            self.keys.insert(key.id.clone(), track_id.to_string());
        }
    }

    fn drop_track(&mut self, track: &Track) {
        self.tracks.remove(&track.id);
        if let Some(curve) = &track.curve {
            self.drop_curve(curve);
        }
    }

    fn drop_curve(&mut self, curve: &Curve) {
        self.curves.remove(&curve.id);
        for key in &curve.keys {
            self.keys.remove(&key.id);
        }
    }
}

/// Owner of every timeline and setting.
///
/// Mutable record access is crate-private: ids and curves only change
/// through operations that also update the index.
#[derive(Clone, Debug, Default)]
pub struct Store {
    timelines: HashMap<String, Timeline>,
    settings: HashMap<String, Setting>,
    index: Index,
}

fn guard(op: &str, id: &str, kind: RecordKind, is_empty: bool) -> Result<()> {
    if id.is_empty() {
        return Err(TimelineError::empty(op));
    }
    if is_empty {
        return Err(TimelineError::not_found(kind, id));
    }
    Ok(())
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn timelines(&self) -> impl Iterator<Item = &Timeline> {
        self.timelines.values()
    }

    pub fn settings(&self) -> impl Iterator<Item = &Setting> {
        self.settings.values()
    }

    pub fn timeline_count(&self) -> usize {
        self.timelines.len()
    }

    pub fn setting_count(&self) -> usize {
        self.settings.len()
    }

    // ---- lookup ----

    pub fn find_timeline(&self, id: &str) -> Result<&Timeline> {
        guard("find_timeline", id, RecordKind::Timeline, self.timelines.is_empty())?;
        self.timelines
            .get(id)
            .ok_or_else(|| TimelineError::not_found(RecordKind::Timeline, id))
    }

    pub(crate) fn find_timeline_mut(&mut self, id: &str) -> Result<&mut Timeline> {
        guard("find_timeline", id, RecordKind::Timeline, self.timelines.is_empty())?;
        self.timelines
            .get_mut(id)
            .ok_or_else(|| TimelineError::not_found(RecordKind::Timeline, id))
    }

    pub fn find_setting(&self, id: &str) -> Result<&Setting> {
        guard("find_setting", id, RecordKind::Setting, self.settings.is_empty())?;
        self.settings
            .get(id)
            .ok_or_else(|| TimelineError::not_found(RecordKind::Setting, id))
    }

    pub(crate) fn find_setting_mut(&mut self, id: &str) -> Result<&mut Setting> {
        guard("find_setting", id, RecordKind::Setting, self.settings.is_empty())?;
        self.settings
            .get_mut(id)
            .ok_or_else(|| TimelineError::not_found(RecordKind::Setting, id))
    }

    /// Timeline plus the setting it references.
    pub fn find_pair(&self, timeline_id: &str) -> Result<(&Timeline, &Setting)> {
        let tl = self.find_timeline(timeline_id)?;
        let setting = self.find_setting(&tl.setting_id)?;
        Ok((tl, setting))
    }

    /// Disjoint borrows: the timeline mutably, its setting shared.
    pub(crate) fn find_pair_mut(&mut self, timeline_id: &str) -> Result<(&mut Timeline, &Setting)> {
        guard("find_timeline", timeline_id, RecordKind::Timeline, self.timelines.is_empty())?;
        let tl = self
            .timelines
            .get_mut(timeline_id)
            .ok_or_else(|| TimelineError::not_found(RecordKind::Timeline, timeline_id))?;
        guard("find_setting", &tl.setting_id, RecordKind::Setting, self.settings.is_empty())?;
        let setting = self
            .settings
            .get(&tl.setting_id)
            .ok_or_else(|| TimelineError::not_found(RecordKind::Setting, &tl.setting_id))?;
        Ok((tl, setting))
    }

    /// The setting bound to `timeline_id`, mutably.
    pub(crate) fn setting_of_mut(&mut self, timeline_id: &str) -> Result<&mut Setting> {
        let setting_id = self.find_timeline(timeline_id)?.setting_id.clone();
        self.find_setting_mut(&setting_id)
    }

    pub fn locate_track(&self, id: &str) -> Result<&TrackSlot> {
        guard("find_track", id, RecordKind::Track, self.index.tracks.is_empty())?;
        self.index
            .tracks
            .get(id)
            .ok_or_else(|| TimelineError::not_found(RecordKind::Track, id))
    }

    /// Track plus its owning timeline.
    pub fn find_track(&self, id: &str) -> Result<(&Timeline, &Track)> {
        let slot = self.locate_track(id)?;
        let tl = self
            .timelines
            .get(&slot.timeline)
            .ok_or_else(|| TimelineError::not_found(RecordKind::Timeline, &slot.timeline))?;
        let track = tl
            .tracks
            .get_in(slot.kind, id)
            .ok_or_else(|| TimelineError::not_found(RecordKind::Track, id))?;
        Ok((tl, track))
    }

    pub(crate) fn find_track_mut(&mut self, id: &str) -> Result<&mut Track> {
        let slot = self.locate_track(id)?.clone();
        self.timelines
            .get_mut(&slot.timeline)
            .and_then(|tl| tl.tracks.get_in_mut(slot.kind, id))
            .ok_or_else(|| TimelineError::not_found(RecordKind::Track, id))
    }

    /// Curve plus the id of the track that owns it.
    pub fn find_curve(&self, id: &str) -> Result<(&str, &Curve)> {
        guard("find_curve", id, RecordKind::Curve, self.index.curves.is_empty())?;
        let track_id = self
            .index
            .curves
            .get(id)
            .ok_or_else(|| TimelineError::not_found(RecordKind::Curve, id))?;
        let (_, track) = self.find_track(track_id)?;
        track
            .curve
            .as_ref()
            .filter(|c| c.id == id)
            .map(|c| (track.id.as_str(), c))
            .ok_or_else(|| TimelineError::not_found(RecordKind::Curve, id))
    }

    /// Key plus the owning track.
    pub fn find_key(&self, id: &str) -> Result<(&Track, &Key)> {
        guard("find_key", id, RecordKind::Key, self.index.keys.is_empty())?;
        let track_id = self
            .index
            .keys
            .get(id)
            .ok_or_else(|| TimelineError::not_found(RecordKind::Key, id))?;
        let (_, track) = self.find_track(track_id)?;
        track
            .curve
            .as_ref()
            .and_then(|c| c.key(id))
            .map(|k| (track, k))
            .ok_or_else(|| TimelineError::not_found(RecordKind::Key, id))
    }

    /// Key mutably, with the kind of its owning track.
    pub(crate) fn find_key_mut(&mut self, id: &str) -> Result<(TrackKind, &mut Key)> {
        guard("find_key", id, RecordKind::Key, self.index.keys.is_empty())?;
        let track_id = self
            .index
            .keys
            .get(id)
            .cloned()
            .ok_or_else(|| TimelineError::not_found(RecordKind::Key, id))?;
        let track = self.find_track_mut(&track_id)?;
        let kind = track.kind;
        track
            .curve
            .as_mut()
            .and_then(|c| c.key_mut(id))
            .map(|k| (kind, k))
            .ok_or_else(|| TimelineError::not_found(RecordKind::Key, id))
    }

    // ---- insertion ----

    pub fn insert_setting(&mut self, setting: Setting) -> Result<()> {
        crate::validate::check_setting(&setting)?;
        if self.settings.contains_key(&setting.id) {
            return Err(TimelineError::DuplicateId {
                kind: RecordKind::Setting,
                id: setting.id,
            });
        }
        self.settings.insert(setting.id.clone(), setting);
        Ok(())
    }

    /// Insert a timeline (tracks included); every contained id must be new.
    pub fn insert_timeline(&mut self, timeline: Timeline) -> Result<()> {
        crate::validate::check_timeline(&timeline)?;
        if self.timelines.contains_key(&timeline.id) {
            return Err(TimelineError::DuplicateId {
                kind: RecordKind::Timeline,
                id: timeline.id,
            });
        }
        let mut staged = Index::default();
        for track in timeline.tracks.iter() {
            if let Some((kind, id)) = self.index.collision(track).or_else(|| staged.collision(track))
            {
                return Err(TimelineError::DuplicateId { kind, id });
            }
            staged.add_track(&timeline.id, track);
        }
        for track in timeline.tracks.iter() {
            self.index.add_track(&timeline.id, track);
        }
        self.timelines.insert(timeline.id.clone(), timeline);
        Ok(())
    }

    pub fn insert_track(&mut self, timeline_id: &str, track: Track) -> Result<()> {
        crate::validate::check_track(&track)?;
        if let Some((kind, id)) = self.index.collision(&track) {
            return Err(TimelineError::DuplicateId { kind, id });
        }
        let owner = self.find_timeline(timeline_id)?.id.clone();
        self.index.add_track(&owner, &track);
        if let Some(tl) = self.timelines.get_mut(&owner) {
            tl.tracks.insert(track);
        }
        Ok(())
    }

    /// Swap a track's curve, re-indexing the old and new curve ids and keys.
    /// Returns the previous curve.
    pub fn replace_curve(&mut self, track_id: &str, curve: Option<Curve>) -> Result<Option<Curve>> {
        if let Some(new) = &curve {
            let current = self.find_track(track_id)?.1.curve.as_ref();
            let same_id = current.is_some_and(|c| c.id == new.id);
            if !same_id && self.index.curves.contains_key(&new.id) {
                return Err(TimelineError::DuplicateId {
                    kind: RecordKind::Curve,
                    id: new.id.clone(),
                });
            }
            if let Some((kind, id)) = self.index.curve_collision(new) {
                let owned_by_current = current.is_some_and(|c| c.key(&id).is_some());
                if !owned_by_current {
                    return Err(TimelineError::DuplicateId { kind, id });
                }
            }
        }
        let track = self.find_track_mut(track_id)?;
        let previous = track.curve.take();
        let owner = track.id.clone();
        if let Some(old) = &previous {
            self.index.drop_curve(old);
        }
        if let Some(new) = &curve {
            self.index.add_curve(&owner, new);
        }
        self.find_track_mut(&owner)?.curve = curve;
        Ok(previous)
    }

    // ---- removal ----

    pub fn remove_track(&mut self, id: &str) -> Result<Track> {
        let slot = self.locate_track(id)?.clone();
        let track = self
            .timelines
            .get_mut(&slot.timeline)
            .and_then(|tl| tl.tracks.remove(slot.kind, id))
            .ok_or_else(|| TimelineError::not_found(RecordKind::Track, id))?;
        self.index.drop_track(&track);
        Ok(track)
    }

    /// Empty a timeline's four track maps.
    pub fn clear_tracks(&mut self, timeline_id: &str) -> Result<usize> {
        let tl = self.find_timeline_mut(timeline_id)?;
        let mut removed: Vec<Track> = Vec::with_capacity(tl.tracks.len());
        for kind in TrackKind::ALL {
            removed.extend(tl.tracks.of_kind_mut(kind).drain().map(|(_, t)| t));
        }
        for track in &removed {
            self.index.drop_track(track);
        }
        Ok(removed.len())
    }

    pub fn remove_timeline(&mut self, id: &str) -> Result<Timeline> {
        self.find_timeline(id)?;
        let tl = self
            .timelines
            .remove(id)
            .ok_or_else(|| TimelineError::not_found(RecordKind::Timeline, id))?;
        for track in tl.tracks.iter() {
            self.index.drop_track(track);
        }
        Ok(tl)
    }

    pub fn remove_setting(&mut self, id: &str) -> Result<Setting> {
        self.find_setting(id)?;
        self.settings
            .remove(id)
            .ok_or_else(|| TimelineError::not_found(RecordKind::Setting, id))
    }

    pub fn clear_timelines(&mut self) -> usize {
        let n = self.timelines.len();
        self.timelines.clear();
        self.index.clear();
        n
    }

    pub fn is_setting_referenced(&self, setting_id: &str) -> bool {
        self.timelines.values().any(|tl| tl.setting_id == setting_id)
    }

    /// Remove every setting no timeline references.
    pub fn retain_referenced_settings(&mut self) -> usize {
        let before = self.settings.len();
        let timelines = &self.timelines;
        self.settings
            .retain(|id, _| timelines.values().any(|tl| &tl.setting_id == id));
        before - self.settings.len()
    }

    /// Rebuild the index from the timelines by a full scan.
    pub fn rebuild_index(&mut self) {
        self.index.clear();
        for tl in self.timelines.values() {
            for track in tl.tracks.iter() {
                self.index.add_track(&tl.id, track);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SettingCfg;
    use crate::ids::{IdGenerator, SequentialIds};
    use crate::resource::RichCurve;

    fn seeded() -> (Store, SequentialIds) {
        let mut ids = SequentialIds::new();
        let mut store = Store::new();
        let sid = ids.next_id(RecordKind::Setting);
        store
            .insert_setting(Setting::from_cfg(sid.clone(), SettingCfg::default()))
            .unwrap();
        let tid = ids.next_id(RecordKind::Timeline);
        store
            .insert_timeline(Timeline::new(tid, "main", sid))
            .unwrap();
        (store, ids)
    }

    fn event_track(ids: &mut SequentialIds, times: &[f32]) -> Track {
        let curve = Curve::materialize(
            ids.next_id(RecordKind::Curve),
            TrackKind::Event,
            RichCurve::events(times).shared(),
            ids,
        );
        Track {
            id: ids.next_id(RecordKind::Track),
            name: "cues".into(),
            kind: TrackKind::Event,
            binding: "cue".into(),
            curve: Some(curve),
        }
    }

    #[test]
    fn lookups_fail_closed() {
        let store = Store::new();
        assert!(matches!(
            store.find_timeline(""),
            Err(TimelineError::EmptyIdentifier { .. })
        ));
        assert!(matches!(
            store.find_track("track-0"),
            Err(TimelineError::NotFound {
                kind: RecordKind::Track,
                ..
            })
        ));
        assert!(matches!(
            store.find_key(""),
            Err(TimelineError::EmptyIdentifier { .. })
        ));
    }

    #[test]
    fn index_resolves_track_curve_and_key() {
        let (mut store, mut ids) = seeded();
        let track = event_track(&mut ids, &[1.0, 2.0]);
        let key_id = track.curve.as_ref().unwrap().keys[1].id.clone();
        store.insert_track("timeline-0", track).unwrap();

        let (tl, t) = store.find_track("track-0").unwrap();
        assert_eq!(tl.id, "timeline-0");
        assert_eq!(t.kind, TrackKind::Event);
        let (owner, curve) = store.find_curve("curve-0").unwrap();
        assert_eq!(owner, "track-0");
        assert_eq!(curve.keys.len(), 2);
        let (_, key) = store.find_key(&key_id).unwrap();
        assert_eq!(key.time, 2.0);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let (mut store, mut ids) = seeded();
        let track = event_track(&mut ids, &[1.0]);
        store.insert_track("timeline-0", track.clone()).unwrap();
        let err = store.insert_track("timeline-0", track).unwrap_err();
        assert!(matches!(
            err,
            TimelineError::DuplicateId {
                kind: RecordKind::Track,
                ..
            }
        ));
        let dup = Setting::from_cfg("setting-0".into(), SettingCfg::default());
        assert!(store.insert_setting(dup).is_err());
    }

    #[test]
    fn removal_keeps_index_in_step() {
        let (mut store, mut ids) = seeded();
        store
            .insert_track("timeline-0", event_track(&mut ids, &[1.0, 2.0]))
            .unwrap();
        store
            .insert_track("timeline-0", event_track(&mut ids, &[3.0]))
            .unwrap();
        assert_eq!(store.index().key_count(), 3);

        store.remove_track("track-0").unwrap();
        assert_eq!(store.index().track_count(), 1);
        assert_eq!(store.index().key_count(), 1);

        let mut rebuilt = store.clone();
        rebuilt.rebuild_index();
        assert_eq!(rebuilt.index(), store.index());

        assert_eq!(store.clear_tracks("timeline-0").unwrap(), 1);
        assert_eq!(store.index().track_count(), 0);
        assert_eq!(store.index().curve_count(), 0);
    }

    #[test]
    fn replace_curve_reindexes_keys() {
        let (mut store, mut ids) = seeded();
        let track = event_track(&mut ids, &[1.0, 2.0]);
        let old_key = track.curve.as_ref().unwrap().keys[0].id.clone();
        store.insert_track("timeline-0", track).unwrap();

        let mut curve = store.find_curve("curve-0").unwrap().1.clone();
        curve.swap_resource(RichCurve::events(&[5.0]).shared(), &mut ids);
        let previous = store.replace_curve("track-0", Some(curve)).unwrap();
        assert_eq!(previous.map(|c| c.keys.len()), Some(2));
        assert!(store.find_key(&old_key).is_err());
        assert_eq!(store.index().key_count(), 1);
    }

    #[test]
    fn unreferenced_settings_are_pruned() {
        let (mut store, _) = seeded();
        store
            .insert_setting(Setting::from_cfg("spare".into(), SettingCfg::default()))
            .unwrap();
        assert_eq!(store.retain_referenced_settings(), 1);
        assert!(store.find_setting("setting-0").is_ok());
    }
}
