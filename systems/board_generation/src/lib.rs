#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic board generation for Scavenger levels.
//!
//! Every level is laid out from a seed derived from the run seed and the
//! level number, so the same run seed replays the same sequence of boards.

use log::{debug, info, warn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use scavenger_core::{
    BoardConfig, BoardLayout, ConsumableKind, CountRange, EnemyKind, GenerationError, Tile,
};
use sha2::{Digest, Sha256};

mod allocator;

pub use allocator::GridAllocator;

const LEVEL_STREAM_LABEL: &str = "scavenger/level";

/// Number of enemies placed on the provided level: `floor(log2(level))`.
#[must_use]
pub fn enemy_count_for_level(level: u32) -> u32 {
    level.checked_ilog2().unwrap_or(0)
}

/// Lays out levels from the board configuration and a run seed.
#[derive(Clone, Debug)]
pub struct BoardGenerator {
    config: BoardConfig,
    run_seed: u64,
}

impl BoardGenerator {
    /// Creates a generator for the provided board configuration and run seed.
    #[must_use]
    pub fn new(config: BoardConfig, run_seed: u64) -> Self {
        Self { config, run_seed }
    }

    /// Seed of the random stream used for the provided level.
    #[must_use]
    pub fn level_seed(&self, level: u32) -> u64 {
        derive_level_seed(self.run_seed, level)
    }

    /// Board configuration the generator lays levels out with.
    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Generates the layout for the provided level.
    ///
    /// Walls, consumables, and enemies are drawn in that order from the
    /// free-cell pool; the exit is stamped last. If the drawn counts exceed the
    /// interior, generation aborts with [`GenerationError::PoolExhausted`]
    /// before any cell is drawn.
    pub fn generate(&self, level: u32) -> Result<BoardLayout, GenerationError> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.level_seed(level));
        let mut layout = BoardLayout::new(level, self.config.columns, self.config.rows);
        let mut allocator = GridAllocator::new(self.config.columns, self.config.rows);
        allocator.reset();

        let wall_count = draw_count(self.config.walls, &mut rng);
        let consumable_count = draw_count(self.config.food, &mut rng);
        let enemy_count = enemy_count_for_level(level);
        let requested = [wall_count, consumable_count, enemy_count]
            .iter()
            .map(|count| *count as usize)
            .sum::<usize>();
        let available = self.config.interior_cells();
        if requested > available {
            return Err(GenerationError::PoolExhausted {
                requested,
                available,
            });
        }

        for _ in 0..wall_count {
            let cell = allocator.take_random(&mut rng)?;
            layout.set_tile(
                cell,
                Tile::Obstacle {
                    hit_points: self.config.wall_hit_points,
                },
            );
        }

        for _ in 0..consumable_count {
            let cell = allocator.take_random(&mut rng)?;
            let kind = ConsumableKind::ALL[rng.gen_range(0..ConsumableKind::ALL.len())];
            layout.set_tile(cell, Tile::Consumable(kind));
        }

        for _ in 0..enemy_count {
            let cell = allocator.take_random(&mut rng)?;
            let kind = EnemyKind::ALL[rng.gen_range(0..EnemyKind::ALL.len())];
            let _ = layout.push_enemy(cell, kind);
        }

        debug!("level {level} left {} interior cells free", allocator.remaining());
        if layout.stamp_exit() {
            warn!("level {level} placement on the exit corner was overwritten");
        }

        info!(
            "generated level {level}: {wall_count} walls, {consumable_count} consumables, {enemy_count} enemies"
        );
        Ok(layout)
    }
}

fn draw_count(range: CountRange, rng: &mut ChaCha8Rng) -> u32 {
    if range.minimum >= range.maximum {
        return range.minimum;
    }
    rng.gen_range(range.minimum..=range.maximum)
}

fn derive_level_seed(run_seed: u64, level: u32) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(run_seed.to_le_bytes());
    hasher.update(LEVEL_STREAM_LABEL.as_bytes());
    hasher.update(level.to_le_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}
