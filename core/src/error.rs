//! Error types surfaced by board generation, movement, and configuration.

use thiserror::Error;

use crate::ActorId;

/// Failures raised while laying out a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// More placements were requested than interior cells exist.
    #[error("requested {requested} placements but only {available} interior cells exist")]
    PoolExhausted {
        /// Number of placements the layout asked for.
        requested: usize,
        /// Number of cells the pool held after reset.
        available: usize,
    },
}

/// Move requests rejected before any state changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MoveError {
    /// The step was diagonal, idle, or longer than one cell.
    #[error("step ({dx}, {dy}) must move exactly one cell along one axis")]
    InvalidDirection {
        /// Requested horizontal component.
        dx: i32,
        /// Requested vertical component.
        dy: i32,
    },
    /// The actor is still sliding from its previous move.
    #[error("{0:?} already has a move in flight")]
    ActorAlreadyBusy(ActorId),
    /// The actor does not exist in the current level.
    #[error("{0:?} is not part of the current level")]
    UnknownActor(ActorId),
}

/// Configuration values outside their accepted bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The grid leaves no interior cell for placements.
    #[error("grid {columns}x{rows} is too small; both dimensions must be at least 3")]
    GridTooSmall {
        /// Configured column count.
        columns: u32,
        /// Configured row count.
        rows: u32,
    },
    /// The grid exceeds the largest supported board.
    #[error("grid {columns}x{rows} is too large; both dimensions must be at most 64")]
    GridTooLarge {
        /// Configured column count.
        columns: u32,
        /// Configured row count.
        rows: u32,
    },
    /// A count range has its bounds swapped.
    #[error("{field} minimum {minimum} exceeds maximum {maximum}")]
    InvertedRange {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Configured minimum.
        minimum: u32,
        /// Configured maximum.
        maximum: u32,
    },
    /// A value that must be strictly positive was zero or negative.
    #[error("{field} must be positive")]
    NotPositive {
        /// Dotted path of the offending field.
        field: &'static str,
    },
    /// A value that must not be negative was negative.
    #[error("{field} must not be negative")]
    Negative {
        /// Dotted path of the offending field.
        field: &'static str,
    },
    /// A value exceeded its upper bound.
    #[error("{field} must be at most {maximum}")]
    TooLarge {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Largest accepted value.
        maximum: u32,
    },
}

/// Failures surfaced by the turn controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum TurnError {
    /// The next level could not be laid out.
    #[error("failed to generate level")]
    Generation(#[from] GenerationError),
    /// A move request was rejected by the world.
    #[error("move rejected")]
    Move(#[from] MoveError),
    /// The configuration handed to the controller is invalid.
    #[error("invalid configuration")]
    Config(#[from] ConfigError),
    /// The run ended; only a restart may begin a new one.
    #[error("the run is over")]
    RunOver,
}
