#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Scavenger engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Systems submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then reports [`Event`] values describing what
//! actually happened. Presentation collaborators observe those events through
//! the [`PresentationSink`] trait and never feed back into game state.

use std::time::Duration;

use serde::{Deserialize, Serialize};

mod config;
mod error;
mod layout;
mod sink;

pub use config::{BoardConfig, CountRange, EnemyConfig, GameConfig, PacingConfig, PlayerConfig};
pub use error::{ConfigError, GenerationError, MoveError, TurnError};
pub use layout::{BoardLayout, EnemyPlacement};
pub use sink::{NullSink, PresentationSink};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Scavenger.";

/// Food spent by the player for every turn taken, regardless of outcome.
pub const MOVE_COST: i32 = 1;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Discards the current level and installs a freshly generated layout.
    LoadLevel {
        /// Layout produced by the board generator.
        layout: BoardLayout,
        /// Food carried over into the level by the player.
        food: i32,
    },
    /// Requests that an actor step one cell along a single axis.
    StepActor {
        /// Actor attempting to move.
        actor: ActorId,
        /// Horizontal component of the step.
        dx: i32,
        /// Vertical component of the step.
        dy: i32,
    },
    /// Deducts the per-turn cost from the player's food.
    SpendFood {
        /// Amount of food to deduct.
        amount: i32,
    },
    /// Advances presentation time, draining per-actor motion timers.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
}

/// Events reported by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Announces that a new level layout was installed.
    BoardGenerated {
        /// Layout that now backs the world.
        layout: BoardLayout,
    },
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that an actor relocated between two cells.
    ActorMoved {
        /// Actor that moved.
        actor: ActorId,
        /// Cell the actor occupied before moving.
        from: CellCoord,
        /// Cell the actor occupies after moving.
        to: CellCoord,
        /// Duration presentation layers may spend interpolating the move.
        duration: Duration,
    },
    /// Reports that a move attempt was blocked.
    MoveBlocked {
        /// Actor whose move was blocked.
        actor: ActorId,
        /// What stood in the destination cell.
        obstruction: Obstruction,
    },
    /// Reports that an obstacle took damage but still stands.
    ObstacleDamaged {
        /// Cell holding the obstacle.
        cell: CellCoord,
        /// Hit points left on the obstacle.
        remaining: u32,
    },
    /// Reports that an obstacle was destroyed and its cell reverted to floor.
    ObstacleDestroyed {
        /// Cell that held the obstacle.
        cell: CellCoord,
    },
    /// Reports that the player consumed an item.
    ConsumablePicked {
        /// Cell that held the item.
        cell: CellCoord,
        /// Kind of item consumed.
        kind: ConsumableKind,
        /// Player food after consumption.
        total: i32,
    },
    /// Reports that an enemy hit the player.
    PlayerHit {
        /// Enemy that delivered the blow.
        enemy: EnemyId,
        /// Food removed by the hit.
        amount: i32,
        /// Player food after the hit.
        total: i32,
    },
    /// Reports that the per-turn cost was deducted.
    FoodSpent {
        /// Food removed.
        amount: i32,
        /// Player food after the deduction.
        total: i32,
    },
    /// Reports that the player stepped onto the exit.
    ExitReached {
        /// Exit cell.
        cell: CellCoord,
    },
}

/// Location of a single grid cell expressed as column and row coordinates.
///
/// Coordinates are signed because the barrier ring sits at column and row `-1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: i32,
    row: i32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Column index of the cell.
    #[must_use]
    pub const fn column(&self) -> i32 {
        self.column
    }

    /// Row index of the cell. Rows grow upward.
    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }

    /// Returns the cell displaced by the provided deltas.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.column + dx, self.row + dy)
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column.abs_diff(other.column) + self.row.abs_diff(other.row)
    }
}

/// Cardinal movement directions available to actors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward increasing row indices.
    Up,
    /// Movement toward decreasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Unit displacement `(dx, dy)` associated with the direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, 1),
            Self::Down => (0, -1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Converts a raw displacement into a direction.
    ///
    /// Exactly one axis must be nonzero and its magnitude must be one; anything
    /// else is rejected with [`MoveError::InvalidDirection`].
    pub fn from_delta(dx: i32, dy: i32) -> Result<Self, MoveError> {
        match (dx, dy) {
            (0, 1) => Ok(Self::Up),
            (0, -1) => Ok(Self::Down),
            (-1, 0) => Ok(Self::Left),
            (1, 0) => Ok(Self::Right),
            _ => Err(MoveError::InvalidDirection { dx, dy }),
        }
    }

    /// Resolves raw input axes into at most one direction.
    ///
    /// Horizontal input wins when both axes are active. Only the sign of each
    /// axis matters.
    #[must_use]
    pub fn from_axes(horizontal: i32, vertical: i32) -> Option<Self> {
        match (horizontal.signum(), vertical.signum()) {
            (1, _) => Some(Self::Right),
            (-1, _) => Some(Self::Left),
            (_, 1) => Some(Self::Up),
            (_, -1) => Some(Self::Down),
            _ => None,
        }
    }
}

/// Unique identifier assigned to an enemy within a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Identity of a mobile actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ActorId {
    /// The single player-controlled actor.
    Player,
    /// An enemy from the level roster.
    Enemy(EnemyId),
}

impl ActorId {
    /// Side the actor fights for.
    #[must_use]
    pub const fn faction(self) -> Faction {
        match self {
            Self::Player => Faction::Player,
            Self::Enemy(_) => Faction::Enemy,
        }
    }
}

/// Side an actor belongs to when resolving blocked moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Faction {
    /// The player.
    Player,
    /// Enemies hunting the player.
    Enemy,
}

/// Enemy variants; each deals a different amount of damage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Enemy with the lighter hit.
    Prowler,
    /// Enemy with the heavier hit.
    Brute,
}

impl EnemyKind {
    /// Every enemy kind, in the order the board generator draws from.
    pub const ALL: [EnemyKind; 2] = [EnemyKind::Prowler, EnemyKind::Brute];
}

/// Single-use pickups that restore the player's food.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConsumableKind {
    /// Regular food ration.
    Food,
    /// Soda can, worth more than food.
    Soda,
}

impl ConsumableKind {
    /// Every consumable kind, in the order the board generator draws from.
    pub const ALL: [ConsumableKind; 2] = [ConsumableKind::Food, ConsumableKind::Soda];
}

/// Static classification of a single board cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    /// Walkable floor.
    Floor,
    /// Indestructible outer wall.
    Barrier,
    /// Destructible wall that the player can chop down.
    Obstacle {
        /// Hit points left before the obstacle is destroyed.
        hit_points: u32,
    },
    /// Pickup lying on the floor.
    Consumable(ConsumableKind),
    /// Cell that completes the level when the player enters it.
    Exit,
}

/// Observable classification of a cell combining tiles and actors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Occupancy {
    /// Floor with nothing on it.
    Empty,
    /// Indestructible outer wall.
    Barrier,
    /// Destructible wall.
    Obstacle,
    /// Unclaimed pickup.
    Consumable,
    /// Level exit.
    Exit,
    /// Cell currently holding an actor.
    Actor(ActorId),
}

/// What stopped a move, tagged for interaction dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Obstruction {
    /// Outer wall or anything outside the board.
    Barrier,
    /// Destructible wall at the provided cell.
    Obstacle(CellCoord),
    /// Actor of the other faction.
    OpposingActor(ActorId),
    /// Actor of the mover's own faction.
    AlliedActor(ActorId),
}

/// Result of a move attempt that passed validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveOutcome {
    /// The actor relocated into the destination cell.
    Moved,
    /// The actor stayed put; any interaction has already been applied.
    Blocked(Obstruction),
    /// The enemy sat this call out because it acted on the previous one.
    Skipped,
}

/// Phases of the turn state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TurnPhase {
    /// Level is being laid out; input is ignored.
    Setup,
    /// Waiting for the player's single directional input.
    PlayerTurn,
    /// Enemies act in roster order.
    EnemyTurn,
    /// Player reached the exit; the next level follows after a delay.
    LevelComplete,
    /// Player ran out of food. Terminal.
    GameOver,
}

#[cfg(test)]
mod tests {
    use super::{ActorId, CellCoord, Direction, EnemyId, Faction, MoveError};

    #[test]
    fn manhattan_distance_matches_expectation() {
        let origin = CellCoord::new(-1, 1);
        let destination = CellCoord::new(4, 3);
        assert_eq!(origin.manhattan_distance(destination), 7);
        assert_eq!(destination.manhattan_distance(origin), 7);
    }

    #[test]
    fn from_delta_rejects_diagonal_and_idle_steps() {
        assert_eq!(
            Direction::from_delta(1, 1),
            Err(MoveError::InvalidDirection { dx: 1, dy: 1 })
        );
        assert_eq!(
            Direction::from_delta(0, 0),
            Err(MoveError::InvalidDirection { dx: 0, dy: 0 })
        );
        assert_eq!(
            Direction::from_delta(2, 0),
            Err(MoveError::InvalidDirection { dx: 2, dy: 0 })
        );
    }

    #[test]
    fn from_delta_inverts_delta() {
        for direction in [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ] {
            let (dx, dy) = direction.delta();
            assert_eq!(Direction::from_delta(dx, dy), Ok(direction));
        }
    }

    #[test]
    fn horizontal_axis_takes_priority() {
        assert_eq!(Direction::from_axes(1, 1), Some(Direction::Right));
        assert_eq!(Direction::from_axes(-3, -1), Some(Direction::Left));
        assert_eq!(Direction::from_axes(0, -1), Some(Direction::Down));
        assert_eq!(Direction::from_axes(0, 0), None);
    }

    #[test]
    fn actor_faction_follows_identity() {
        assert_eq!(ActorId::Player.faction(), Faction::Player);
        assert_eq!(ActorId::Enemy(EnemyId::new(3)).faction(), Faction::Enemy);
    }
}
