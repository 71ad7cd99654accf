#![allow(dead_code)]
//! Output contracts from the timeline engine.
//!
//! The engine only stores callback ids. Whenever a seek samples a value,
//! crosses an event key, or a timeline updates/finishes, it hands a
//! [`Dispatch`] to a [`CallbackSink`], synchronously and in firing order.
//! [`Outputs`] records dispatches for the host to drain after a tick;
//! [`CallbackRegistry`] invokes bound closures directly.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::value::Value;

/// What triggered a callback.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Signal {
    /// A value track was sampled.
    Value { track: String, value: Value },
    /// Playback crossed an event key.
    Event { track: String, key: String, time: f32 },
    /// The setting's update callback after a seek.
    Update { position: f32 },
    /// A non-looping timeline reached its boundary.
    Finished { position: f32 },
}

/// One callback invocation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dispatch {
    pub timeline: String,
    pub callback: String,
    pub signal: Signal,
}

/// Host-side capability: resolve `dispatch.callback` and run it.
pub trait CallbackSink {
    fn invoke(&mut self, dispatch: &Dispatch);
}

impl<S: CallbackSink + ?Sized> CallbackSink for &mut S {
    fn invoke(&mut self, dispatch: &Dispatch) {
        (**self).invoke(dispatch)
    }
}

impl<S: CallbackSink + ?Sized> CallbackSink for Box<S> {
    fn invoke(&mut self, dispatch: &Dispatch) {
        (**self).invoke(dispatch)
    }
}

/// Recording sink; the engine default.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub dispatches: Vec<Dispatch>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.dispatches.clear();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dispatches.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.dispatches.len()
    }

    pub fn for_callback<'a>(&'a self, callback: &'a str) -> impl Iterator<Item = &'a Dispatch> {
        self.dispatches.iter().filter(move |d| d.callback == callback)
    }

    /// Event key times in firing order.
    pub fn event_times(&self) -> Vec<f32> {
        self.dispatches
            .iter()
            .filter_map(|d| match d.signal {
                Signal::Event { time, .. } => Some(time),
                _ => None,
            })
            .collect()
    }

    /// Positions reported by update callbacks, in order.
    pub fn update_positions(&self) -> Vec<f32> {
        self.dispatches
            .iter()
            .filter_map(|d| match d.signal {
                Signal::Update { position } => Some(position),
                _ => None,
            })
            .collect()
    }

    pub fn finished_count(&self) -> usize {
        self.dispatches
            .iter()
            .filter(|d| matches!(d.signal, Signal::Finished { .. }))
            .count()
    }

    /// Last value delivered to `callback`, if any.
    pub fn last_value(&self, callback: &str) -> Option<Value> {
        self.for_callback(callback)
            .filter_map(|d| match &d.signal {
                Signal::Value { value, .. } => Some(*value),
                _ => None,
            })
            .last()
    }
}

impl CallbackSink for Outputs {
    fn invoke(&mut self, dispatch: &Dispatch) {
        self.dispatches.push(dispatch.clone());
    }
}

pub type Handler = Box<dyn FnMut(&Dispatch)>;

/// Multicast dispatcher: any number of handlers per callback id.
/// Dispatches to unbound ids are dropped.
#[derive(Default)]
pub struct CallbackRegistry {
    handlers: HashMap<String, Vec<Handler>>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, callback: impl Into<String>, handler: impl FnMut(&Dispatch) + 'static) {
        self.handlers
            .entry(callback.into())
            .or_default()
            .push(Box::new(handler));
    }

    /// Remove every handler of `callback`; returns how many were bound.
    pub fn unbind_all(&mut self, callback: &str) -> usize {
        self.handlers.remove(callback).map_or(0, |h| h.len())
    }

    pub fn handler_count(&self, callback: &str) -> usize {
        self.handlers.get(callback).map_or(0, Vec::len)
    }

    pub fn is_bound(&self, callback: &str) -> bool {
        self.handler_count(callback) > 0
    }
}

impl std::fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.handlers.iter().map(|(k, v)| (k, v.len())))
            .finish()
    }
}

impl CallbackSink for CallbackRegistry {
    fn invoke(&mut self, dispatch: &Dispatch) {
        if let Some(handlers) = self.handlers.get_mut(&dispatch.callback) {
            for handler in handlers.iter_mut() {
                handler(dispatch);
            }
        }
    }
}
