use serde::{Deserialize, Serialize};

use crate::data::{Key, TrackKind};
use crate::ids::{IdGenerator, RecordKind};
use crate::resource::SharedCurve;

/// A track's curve: the resource handle plus keys cached from it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Curve {
    pub id: String,
    pub kind: TrackKind,
    #[serde(skip)]
    pub resource: Option<SharedCurve>,
    #[serde(default)]
    pub keys: Vec<Key>,
}

impl Curve {
    /// Wrap `resource` and cache its native keys, channel by channel,
    /// each under a fresh key id.
    pub fn materialize(
        id: String,
        kind: TrackKind,
        resource: SharedCurve,
        ids: &mut dyn IdGenerator,
    ) -> Self {
        let mut curve = Self {
            id,
            kind,
            resource: None,
            keys: Vec::new(),
        };
        curve.swap_resource(resource, ids);
        curve
    }

    /// Replace the resource; the old cached keys are dropped before the new
    /// ones are generated.
    pub fn swap_resource(&mut self, resource: SharedCurve, ids: &mut dyn IdGenerator) {
        self.keys.clear();
        self.keys.reserve(resource.native_key_count());
        for channel in 0..resource.channel_count() {
            for native in resource.channel_keys(channel) {
                self.keys
                    .push(Key::from_native(ids.next_id(RecordKind::Key), channel, native));
            }
        }
        self.resource = Some(resource);
    }

    /// Latest cached key time across every channel.
    pub fn last_key_time(&self) -> Option<f32> {
        self.keys.iter().map(|k| k.time).reduce(f32::max)
    }

    pub fn first_key_time(&self) -> Option<f32> {
        self.keys.iter().map(|k| k.time).reduce(f32::min)
    }

    pub fn key(&self, id: &str) -> Option<&Key> {
        self.keys.iter().find(|k| k.id == id)
    }

    pub fn key_mut(&mut self, id: &str) -> Option<&mut Key> {
        self.keys.iter_mut().find(|k| k.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::InterpMode;
    use crate::ids::SequentialIds;
    use crate::resource::{NativeKey, RichCurve, TangentMode};

    #[test]
    fn materialize_caches_every_channel() {
        let mut ids = SequentialIds::new();
        let res = RichCurve::vector(
            vec![NativeKey::linear(0.0, 0.0), NativeKey::linear(3.0, 1.0)],
            vec![NativeKey::cubic(1.0, 0.0, 0.0, 0.0, TangentMode::User)],
            vec![NativeKey::constant(5.0, 2.0)],
        )
        .shared();
        let curve = Curve::materialize("curve-x".into(), TrackKind::Vector, res, &mut ids);
        assert_eq!(curve.keys.len(), 4);
        assert_eq!(curve.keys[0].id, "key-0");
        assert_eq!(curve.keys[2].channel, 1);
        assert_eq!(curve.keys[2].interp, InterpMode::CurveUser);
        assert_eq!(curve.last_key_time(), Some(5.0));
        assert_eq!(curve.first_key_time(), Some(0.0));
    }

    #[test]
    fn swap_drops_stale_keys() {
        let mut ids = SequentialIds::new();
        let a = RichCurve::events(&[1.0, 2.0, 3.0]).shared();
        let b = RichCurve::events(&[4.0]).shared();
        let mut curve = Curve::materialize("c".into(), TrackKind::Event, a, &mut ids);
        curve.swap_resource(b, &mut ids);
        assert_eq!(curve.keys.len(), 1);
        assert_eq!(curve.keys[0].id, "key-3");
        assert_eq!(curve.last_key_time(), Some(4.0));
    }
}
