//! Tunable game parameters and their validation.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, ConsumableKind, EnemyKind};

/// Inclusive `[minimum, maximum]` range used for randomized placement counts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRange {
    /// Smallest count that may be drawn.
    pub minimum: u32,
    /// Largest count that may be drawn.
    pub maximum: u32,
}

impl CountRange {
    /// Creates a new inclusive range.
    #[must_use]
    pub const fn new(minimum: u32, maximum: u32) -> Self {
        Self { minimum, maximum }
    }

    /// Reports whether the provided count lies within the range.
    #[must_use]
    pub const fn contains(&self, count: u32) -> bool {
        count >= self.minimum && count <= self.maximum
    }

    fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        if self.minimum > self.maximum {
            return Err(ConfigError::InvertedRange {
                field,
                minimum: self.minimum,
                maximum: self.maximum,
            });
        }
        Ok(())
    }
}

/// Complete configuration surface of the game.
///
/// Every section falls back to its defaults when omitted, so a configuration
/// file only needs to list the values it overrides.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board dimensions and placement counts.
    pub board: BoardConfig,
    /// Player resource and damage tuning.
    pub player: PlayerConfig,
    /// Enemy damage tuning.
    pub enemies: EnemyConfig,
    /// Presentation pacing.
    pub pacing: PacingConfig,
}

impl GameConfig {
    /// Checks every bounded value, reporting the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.board.validate()?;
        self.player.validate()?;
        self.enemies.validate()
    }
}

/// Board dimensions and randomized placement counts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Number of playable columns.
    pub columns: u32,
    /// Number of playable rows.
    pub rows: u32,
    /// Range of destructible walls placed per level.
    pub walls: CountRange,
    /// Range of consumables placed per level.
    pub food: CountRange,
    /// Hit points every destructible wall starts with.
    pub wall_hit_points: u32,
}

impl BoardConfig {
    /// Smallest accepted column or row count; leaves one interior cell.
    pub const MIN_DIMENSION: u32 = 3;
    /// Largest accepted column or row count.
    pub const MAX_DIMENSION: u32 = 64;
    /// Largest accepted hit point total for a destructible wall.
    pub const MAX_WALL_HIT_POINTS: u32 = 5;

    /// Number of cells the free-cell pool holds for these dimensions.
    #[must_use]
    pub fn interior_cells(&self) -> usize {
        let columns = self.columns.saturating_sub(2) as usize;
        let rows = self.rows.saturating_sub(2) as usize;
        columns * rows
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.columns < Self::MIN_DIMENSION || self.rows < Self::MIN_DIMENSION {
            return Err(ConfigError::GridTooSmall {
                columns: self.columns,
                rows: self.rows,
            });
        }
        if self.columns > Self::MAX_DIMENSION || self.rows > Self::MAX_DIMENSION {
            return Err(ConfigError::GridTooLarge {
                columns: self.columns,
                rows: self.rows,
            });
        }
        self.walls.validate("board.walls")?;
        self.food.validate("board.food")?;
        if self.wall_hit_points == 0 {
            return Err(ConfigError::NotPositive {
                field: "board.wall_hit_points",
            });
        }
        at_most(
            "board.wall_hit_points",
            self.wall_hit_points.into(),
            Self::MAX_WALL_HIT_POINTS,
        )
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            columns: 8,
            rows: 8,
            walls: CountRange::new(5, 9),
            food: CountRange::new(1, 5),
            wall_hit_points: 3,
        }
    }
}

/// Player food economy and attack strength.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Food the player starts the first level with.
    pub starting_food: i32,
    /// Food restored by a food ration.
    pub food_value: i32,
    /// Food restored by a soda.
    pub soda_value: i32,
    /// Damage dealt to a destructible wall per chop.
    pub wall_damage: u32,
}

impl PlayerConfig {
    /// Largest accepted starting food.
    pub const MAX_STARTING_FOOD: u32 = 1_000;
    /// Largest accepted food restored by a single consumable.
    pub const MAX_ITEM_VALUE: u32 = 100;
    /// Largest accepted damage per chop.
    pub const MAX_WALL_DAMAGE: u32 = 10;

    /// Food restored by the provided consumable.
    #[must_use]
    pub const fn value_of(&self, kind: ConsumableKind) -> i32 {
        match kind {
            ConsumableKind::Food => self.food_value,
            ConsumableKind::Soda => self.soda_value,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.starting_food <= 0 {
            return Err(ConfigError::NotPositive {
                field: "player.starting_food",
            });
        }
        if self.food_value <= 0 {
            return Err(ConfigError::NotPositive {
                field: "player.food_value",
            });
        }
        if self.soda_value <= 0 {
            return Err(ConfigError::NotPositive {
                field: "player.soda_value",
            });
        }
        if self.wall_damage == 0 {
            return Err(ConfigError::NotPositive {
                field: "player.wall_damage",
            });
        }
        at_most(
            "player.starting_food",
            self.starting_food.into(),
            Self::MAX_STARTING_FOOD,
        )?;
        at_most("player.food_value", self.food_value.into(), Self::MAX_ITEM_VALUE)?;
        at_most("player.soda_value", self.soda_value.into(), Self::MAX_ITEM_VALUE)?;
        at_most(
            "player.wall_damage",
            self.wall_damage.into(),
            Self::MAX_WALL_DAMAGE,
        )
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            starting_food: 100,
            food_value: 10,
            soda_value: 20,
            wall_damage: 1,
        }
    }
}

/// Food removed from the player by each enemy kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    /// Damage dealt by [`EnemyKind::Prowler`].
    pub prowler_damage: i32,
    /// Damage dealt by [`EnemyKind::Brute`].
    pub brute_damage: i32,
}

impl EnemyConfig {
    /// Largest accepted damage per enemy hit.
    pub const MAX_DAMAGE: u32 = 100;

    /// Damage dealt by the provided enemy kind.
    #[must_use]
    pub const fn damage_of(&self, kind: EnemyKind) -> i32 {
        match kind {
            EnemyKind::Prowler => self.prowler_damage,
            EnemyKind::Brute => self.brute_damage,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.prowler_damage < 0 {
            return Err(ConfigError::Negative {
                field: "enemies.prowler_damage",
            });
        }
        if self.brute_damage < 0 {
            return Err(ConfigError::Negative {
                field: "enemies.brute_damage",
            });
        }
        at_most(
            "enemies.prowler_damage",
            self.prowler_damage.into(),
            Self::MAX_DAMAGE,
        )?;
        at_most(
            "enemies.brute_damage",
            self.brute_damage.into(),
            Self::MAX_DAMAGE,
        )
    }
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            prowler_damage: 10,
            brute_damage: 20,
        }
    }
}

fn at_most(field: &'static str, value: i64, maximum: u32) -> Result<(), ConfigError> {
    if value > i64::from(maximum) {
        return Err(ConfigError::TooLarge { field, maximum });
    }
    Ok(())
}

/// Presentation pacing, expressed in milliseconds of simulated time.
///
/// None of these values influence game outcomes; a headless run may set them
/// all to zero.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Pause between generating a level and the first player turn.
    pub level_start_delay_ms: u64,
    /// Pause between the player's move and the enemy turn.
    pub turn_delay_ms: u64,
    /// Time an actor spends sliding between two cells.
    pub move_time_ms: u64,
    /// Pause between reaching the exit and generating the next level.
    pub restart_delay_ms: u64,
}

impl PacingConfig {
    /// Pacing with every delay set to zero.
    #[must_use]
    pub const fn immediate() -> Self {
        Self {
            level_start_delay_ms: 0,
            turn_delay_ms: 0,
            move_time_ms: 0,
            restart_delay_ms: 0,
        }
    }

    /// Pause between generating a level and the first player turn.
    #[must_use]
    pub const fn level_start_delay(&self) -> Duration {
        Duration::from_millis(self.level_start_delay_ms)
    }

    /// Pause between the player's move and the enemy turn.
    #[must_use]
    pub const fn turn_delay(&self) -> Duration {
        Duration::from_millis(self.turn_delay_ms)
    }

    /// Time an actor spends sliding between two cells.
    #[must_use]
    pub const fn move_time(&self) -> Duration {
        Duration::from_millis(self.move_time_ms)
    }

    /// Pause between reaching the exit and generating the next level.
    #[must_use]
    pub const fn restart_delay(&self) -> Duration {
        Duration::from_millis(self.restart_delay_ms)
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            level_start_delay_ms: 2_000,
            turn_delay_ms: 100,
            move_time_ms: 100,
            restart_delay_ms: 1_000,
        }
    }
}
