//! Timeline data model: keys, curves, tracks, settings and timelines.
//!
//! Pure data plus identity. Behavior lives in `validate`, `store`,
//! `playback` and `engine`.

pub mod curve;
pub mod key;
pub mod setting;
pub mod timeline;
pub mod track;

pub use curve::Curve;
pub use key::{InterpMode, Key};
pub use setting::{LengthMode, PlayMethod, Setting, SettingCfg};
pub use timeline::{PlayStatus, Timeline};
pub use track::{Track, TrackDesc, TrackKind, TrackSet};
