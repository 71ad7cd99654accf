#![allow(dead_code)]
//! Vizij Timeline Core (engine-agnostic)
//!
//! Keyframed timelines with scalar, vector, color and event tracks, advanced
//! by a host tick. This crate defines the data model, id generation, the
//! store with its id index, validation, the playback state machine (seek,
//! loop/clamp, event windows) and the callback dispatch contract. Curve
//! evaluation is delegated to [`CurveResource`] implementations; host
//! scheduling and UI live outside.

pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod ids;
pub mod outputs;
pub mod playback;
pub mod resource;
pub mod store;
pub mod stored;
pub mod validate;
pub mod value;

// Re-exports for consumers (adapters)
pub use config::Config;
pub use data::{
    Curve, InterpMode, Key, LengthMode, PlayMethod, PlayStatus, Setting, SettingCfg, Timeline,
    Track, TrackDesc, TrackKind, TrackSet,
};
pub use engine::Engine;
pub use error::{Result, TimelineError};
pub use ids::{IdGenerator, RecordKind, SequentialIds, UuidIds};
pub use outputs::{CallbackRegistry, CallbackSink, Dispatch, Outputs, Signal};
pub use playback::{EventWindow, TickOutcome};
pub use resource::{CurveResource, NativeInterp, NativeKey, RichCurve, SharedCurve, TangentMode};
pub use store::Store;
pub use stored::{parse_stored_project_json, LoadedProject, StoredProject};
pub use value::Value;
