//! Error kinds shared by the builder, the map, the detector and the stepper.
//!
//! Only `AmbiguousTransition` is recoverable: the stepper consumes it by
//! bisecting. Everything else ends the trajectory.

use serde::{Deserialize, Serialize};

use crate::transition::ChangeSummary;

/// Result type alias for the evasion engine.
pub type Result<T> = std::result::Result<T, EvasionError>;

/// Errors raised while building or tracking the topology of a sensor network.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EvasionError {
    /// Degenerate point input or an unusable fence. Fatal to the run.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    /// A successor chain did not close. Indicates a builder bug.
    #[error("malformed boundary: {reason}")]
    MalformedBoundary { reason: String },

    /// The change between two complexes is not a single atomic move.
    #[error("ambiguous transition: {change}")]
    AmbiguousTransition { change: ChangeSummary },

    /// Bisection hit the depth limit before every sub-step became atomic.
    #[error(
        "unresolved transition at depth {depth} between t={t_start:.6} and t={t_end:.6}: {change}"
    )]
    UnresolvedTransition {
        depth: u32,
        t_start: f64,
        t_end: f64,
        change: ChangeSummary,
    },
}

/// Discriminant of [`EvasionError`], used in reports and CSV tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    InvalidConfiguration,
    MalformedBoundary,
    AmbiguousTransition,
    UnresolvedTransition,
}

impl EvasionError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedBoundary {
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidConfiguration { .. } => ErrorKind::InvalidConfiguration,
            Self::MalformedBoundary { .. } => ErrorKind::MalformedBoundary,
            Self::AmbiguousTransition { .. } => ErrorKind::AmbiguousTransition,
            Self::UnresolvedTransition { .. } => ErrorKind::UnresolvedTransition,
        }
    }

    /// True for the only kind the stepper is allowed to recover from.
    #[inline]
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Self::AmbiguousTransition { .. })
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::InvalidConfiguration => "invalid_configuration",
            Self::MalformedBoundary => "malformed_boundary",
            Self::AmbiguousTransition => "ambiguous_transition",
            Self::UnresolvedTransition => "unresolved_transition",
        };
        f.write_str(s)
    }
}
