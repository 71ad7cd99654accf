#![allow(dead_code)]
//! Identifiers and generators for timeline records.
//!
//! Every record (timeline, setting, track, curve, key) is addressed by an
//! opaque string id. The engine asks an [`IdGenerator`] for a fresh one on
//! every `add_*` call; hosts pick uuid ids or deterministic sequential ids.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The collection an identifier belongs to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Timeline,
    Setting,
    Track,
    Curve,
    Key,
}

impl RecordKind {
    pub const ALL: [RecordKind; 5] = [
        RecordKind::Timeline,
        RecordKind::Setting,
        RecordKind::Track,
        RecordKind::Curve,
        RecordKind::Key,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::Timeline => "timeline",
            RecordKind::Setting => "setting",
            RecordKind::Track => "track",
            RecordKind::Curve => "curve",
            RecordKind::Key => "key",
        }
    }

    fn slot(self) -> usize {
        match self {
            RecordKind::Timeline => 0,
            RecordKind::Setting => 1,
            RecordKind::Track => 2,
            RecordKind::Curve => 3,
            RecordKind::Key => 4,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source of fresh, unique ids.
pub trait IdGenerator: fmt::Debug {
    fn next_id(&mut self, kind: RecordKind) -> String;
}

/// Random v4 uuids; the default generator.
#[derive(Default, Debug, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self, _kind: RecordKind) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Monotonic per-kind counters rendered as `"<kind>-<n>"`.
/// Deterministic, so tests can name ids up front.
#[derive(Default, Debug, Clone)]
pub struct SequentialIds {
    next: [u32; 5],
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self, kind: RecordKind) -> String {
        let slot = &mut self.next[kind.slot()];
        let id = format!("{}-{}", kind.as_str(), *slot);
        *slot = slot.wrapping_add(1);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_ids_are_monotonic_per_kind() {
        let mut ids = SequentialIds::new();
        assert_eq!(ids.next_id(RecordKind::Timeline), "timeline-0");
        assert_eq!(ids.next_id(RecordKind::Timeline), "timeline-1");
        assert_eq!(ids.next_id(RecordKind::Key), "key-0");
        assert_eq!(ids.next_id(RecordKind::Track), "track-0");
        ids.reset();
        assert_eq!(ids.next_id(RecordKind::Timeline), "timeline-0");
    }

    #[test]
    fn uuid_ids_do_not_repeat() {
        let mut ids = UuidIds;
        let a = ids.next_id(RecordKind::Curve);
        let b = ids.next_id(RecordKind::Curve);
        assert_ne!(a, b);
        assert!(Uuid::parse_str(&a).is_ok());
    }

    #[test]
    fn every_kind_has_a_distinct_name() {
        let names: std::collections::HashSet<_> =
            RecordKind::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(names.len(), RecordKind::ALL.len());
    }
}
