//! Error types shared by every planner.

use crate::instance::AttractionId;

/// Errors raised while building an instance, validating a configuration,
/// or running a planner.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("duplicate attraction id {0}")]
    DuplicateAttraction(AttractionId),

    #[error("invalid attraction {id}: {reason}")]
    InvalidAttraction { id: AttractionId, reason: String },

    #[error("hotel location must be finite, got ({x}, {y})")]
    InvalidHotel { x: f64, y: f64 },

    #[error("budget must be non-negative, got {0}")]
    NegativeBudget(i64),

    #[error("unknown attraction id {0}")]
    UnknownAttraction(AttractionId),

    #[error("attraction {0} appears more than once in route")]
    RepeatedStop(AttractionId),

    #[error("invalid clock time {0:?}, expected HH:MM")]
    InvalidClock(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An operator produced a child that is not a permutation of the
    /// instance. Always a bug in the operator, never a user error.
    #[error("permutation invariant broken: {0}")]
    PermutationBreach(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
