use vizij_timeline_core::validate::{valid_timeline, valid_track};
use vizij_timeline_core::{
    Config, Engine, NativeKey, Outputs, RichCurve, SequentialIds, SettingCfg, Store, Timeline,
    TrackDesc, TrackKind,
};

fn populated() -> (Engine, Vec<String>) {
    let mut e = Engine::with_ids(Config::unseeded(), Outputs::default(), SequentialIds::new());
    let mut timelines = Vec::new();
    for n in 0..3 {
        let (tl, _) = e
            .add_timeline_with_setting(&format!("tl{n}"), SettingCfg::default())
            .unwrap();
        let k = |v: f32| vec![NativeKey::linear(0.0, v), NativeKey::linear(1.0 + n as f32, v)];
        e.add_track(&tl, TrackDesc::scalar("s", "s", RichCurve::scalar(k(1.0)).shared()))
            .unwrap();
        e.add_track(
            &tl,
            TrackDesc::vector("v", "v", RichCurve::vector(k(1.0), k(2.0), k(3.0)).shared()),
        )
        .unwrap();
        e.add_track(
            &tl,
            TrackDesc::color("c", "c", RichCurve::color(k(1.0), k(1.0), k(1.0), k(1.0)).shared()),
        )
        .unwrap();
        e.add_track(&tl, TrackDesc::event("e", "e", RichCurve::events(&[0.5]).shared()))
            .unwrap();
        e.add_track(&tl, TrackDesc::new(TrackKind::Scalar, "inert"))
            .unwrap();
        timelines.push(tl);
    }
    (e, timelines)
}

/// Full scan over every timeline and every kind.
fn scan_track<'a>(store: &'a Store, id: &str) -> Option<(&'a Timeline, TrackKind)> {
    store.timelines().find_map(|tl| {
        TrackKind::ALL
            .into_iter()
            .find(|kind| tl.tracks.of_kind(*kind).contains_key(id))
            .map(|kind| (tl, kind))
    })
}

/// it should resolve every track, curve and key through the index exactly as a full scan would
#[test]
fn index_agrees_with_linear_scan() {
    let (e, _) = populated();
    let store = e.store();
    let mut tracks = 0;
    let mut keys = 0;
    for tl in store.timelines() {
        for track in tl.tracks.iter() {
            tracks += 1;
            let (owner, kind) = scan_track(store, &track.id).unwrap();
            let (found_tl, found) = store.find_track(&track.id).unwrap();
            assert_eq!(found_tl.id, owner.id);
            assert_eq!(found.kind, kind);

            if let Some(curve) = &track.curve {
                let (owner_track, c) = store.find_curve(&curve.id).unwrap();
                assert_eq!(owner_track, track.id);
                assert_eq!(c.keys.len(), curve.keys.len());
                for key in &curve.keys {
                    keys += 1;
                    let (t, k) = store.find_key(&key.id).unwrap();
                    assert_eq!(t.id, track.id);
                    assert_eq!(k.time, key.time);
                }
            }
        }
    }
    assert_eq!(store.index().track_count(), tracks);
    assert_eq!(store.index().key_count(), keys);

    let mut rebuilt = store.clone();
    rebuilt.rebuild_index();
    assert_eq!(rebuilt.index(), store.index());
}

/// it should keep ids globally unique across timelines
#[test]
fn ids_are_globally_unique() {
    let (e, _) = populated();
    let mut seen = std::collections::HashSet::new();
    for tl in e.store().timelines() {
        assert!(seen.insert(tl.id.clone()));
        for track in tl.tracks.iter() {
            assert!(seen.insert(track.id.clone()));
            if let Some(curve) = &track.curve {
                assert!(seen.insert(curve.id.clone()));
                for key in &curve.keys {
                    assert!(seen.insert(key.id.clone()));
                }
            }
        }
    }
}

/// it should flip timeline validity when any one reachable track loses its id
#[test]
fn validator_is_monotone_over_tracks() {
    let (e, timelines) = populated();
    let pristine = e.timeline(&timelines[1]).unwrap().clone();
    assert!(valid_timeline(&pristine));
    assert!(pristine.tracks.iter().all(valid_track));

    for kind in TrackKind::ALL {
        let Some(id) = pristine.tracks.of_kind(kind).keys().next().cloned() else {
            continue;
        };
        let mut corrupted = pristine.clone();
        if let Some(track) = corrupted.tracks.get_in_mut(kind, &id) {
            track.id.clear();
        }
        assert!(!valid_timeline(&corrupted), "{kind} track corruption went unnoticed");
    }
}

/// it should refuse to insert a timeline whose track ids collide with indexed ones
#[test]
fn store_rejects_colliding_timeline() {
    let (e, timelines) = populated();
    let mut store = e.store().clone();
    let mut copy = store.find_timeline(&timelines[0]).unwrap().clone();
    copy.id = "fresh".into();
    let before = store.timeline_count();
    assert!(store.insert_timeline(copy).is_err());
    assert_eq!(store.timeline_count(), before);
}

/// it should report the min and max key times per timeline
#[test]
fn keyframe_bounds_per_timeline() {
    let (e, timelines) = populated();
    for (n, tl) in timelines.iter().enumerate() {
        assert_eq!(e.min_keyframe_time(tl).unwrap(), 0.0);
        assert_eq!(e.max_keyframe_time(tl).unwrap(), 1.0 + n as f32);
    }
}

/// it should keep the index in step with the records across every engine mutation
#[test]
fn engine_mutations_keep_index_consistent() {
    let (mut e, timelines) = populated();
    let tl = &timelines[0];
    let event_track = e.tracks_of_kind(tl, TrackKind::Event).unwrap()[0].id.clone();
    let scalar_track = e.tracks_of_kind(tl, TrackKind::Scalar).unwrap()[0].id.clone();
    let key = e.track(&event_track).unwrap().1.curve.as_ref().unwrap().keys[0].id.clone();

    e.rename_track(&event_track, "renamed").unwrap();
    e.set_track_binding(&scalar_track, "elsewhere").unwrap();
    e.set_key_event(&key, "ding").unwrap();
    e.change_track_curve(&event_track, RichCurve::events(&[0.1, 0.2]).shared())
        .unwrap();
    e.reset_track(&scalar_track).unwrap();
    e.del_timeline(&timelines[2], true).unwrap();

    let mut rebuilt = e.store().clone();
    rebuilt.rebuild_index();
    assert_eq!(rebuilt.index(), e.store().index());
    assert!(e.key(&key).is_err());
}
