//! Error types for timeline operations.

use serde::{Deserialize, Serialize};

use crate::data::TrackKind;
use crate::ids::RecordKind;

/// Every failure a public timeline operation can report.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum TimelineError {
    /// An identifier argument was empty.
    #[error("{op}: empty identifier")]
    EmptyIdentifier { op: String },

    /// The identifier does not resolve in its collection.
    #[error("{kind} not found: {id}")]
    NotFound { kind: RecordKind, id: String },

    /// The record fails a structural check.
    #[error("invalid {kind} '{id}': {reason}")]
    InvalidStructure {
        kind: RecordKind,
        id: String,
        reason: String,
    },

    /// The identifier is already taken in its collection.
    #[error("duplicate {kind} id: {id}")]
    DuplicateId { kind: RecordKind, id: String },

    /// The operation would leave the store in a forbidden state.
    #[error("{op}: {reason}")]
    AlreadyAtBoundary { op: String, reason: String },

    /// A curve resource does not carry the channel count its track kind needs.
    #[error("{kind} track expects {expected} curve channel(s), resource has {actual}")]
    ChannelMismatch {
        kind: TrackKind,
        expected: usize,
        actual: usize,
    },

    /// Stored project parsing failed.
    #[error("Serialization error: {reason}")]
    Serialization { reason: String },
}

impl TimelineError {
    pub(crate) fn empty(op: &str) -> Self {
        Self::EmptyIdentifier { op: op.to_string() }
    }

    pub(crate) fn not_found(kind: RecordKind, id: &str) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub(crate) fn invalid(kind: RecordKind, id: &str, reason: impl Into<String>) -> Self {
        Self::InvalidStructure {
            kind,
            id: id.to_string(),
            reason: reason.into(),
        }
    }

    /// Check if the caller can fix the failure by re-issuing with corrected input.
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::EmptyIdentifier { .. } | Self::NotFound { .. } | Self::ChannelMismatch { .. }
        )
    }

    /// Get error category for logging.
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::EmptyIdentifier { .. } | Self::NotFound { .. } => "lookup",
            Self::InvalidStructure { .. }
            | Self::DuplicateId { .. }
            | Self::ChannelMismatch { .. } => "validation",
            Self::AlreadyAtBoundary { .. } => "boundary",
            Self::Serialization { .. } => "serialization",
        }
    }
}

impl From<serde_json::Error> for TimelineError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            reason: err.to_string(),
        }
    }
}

pub type Result<T> = core::result::Result<T, TimelineError>;
