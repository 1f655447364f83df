//! Free-cell pool handing out random interior cells without replacement.

use rand::Rng;
use scavenger_core::{CellCoord, GenerationError};

/// Pool of interior cells still available for random placement.
///
/// Interior cells sit one step in from the playable edge, so the player start
/// in the lower-left corner and the exit in the upper-right corner are never
/// handed out.
#[derive(Clone, Debug)]
pub struct GridAllocator {
    columns: u32,
    rows: u32,
    cells: Vec<CellCoord>,
    capacity: usize,
}

impl GridAllocator {
    /// Creates an empty allocator for a grid of the provided dimensions.
    ///
    /// Call [`GridAllocator::reset`] before drawing cells.
    #[must_use]
    pub fn new(columns: u32, rows: u32) -> Self {
        Self {
            columns,
            rows,
            cells: Vec::new(),
            capacity: 0,
        }
    }

    /// Refills the pool with every interior cell exactly once, row by row.
    pub fn reset(&mut self) {
        self.cells.clear();
        let last_column = i32::try_from(self.columns).unwrap_or(i32::MAX) - 1;
        let last_row = i32::try_from(self.rows).unwrap_or(i32::MAX) - 1;
        for row in 1..last_row {
            for column in 1..last_column {
                self.cells.push(CellCoord::new(column, row));
            }
        }
        self.capacity = self.cells.len();
    }

    /// Removes a uniformly random cell from the pool and returns it.
    pub fn take_random<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<CellCoord, GenerationError> {
        if self.cells.is_empty() {
            return Err(GenerationError::PoolExhausted {
                requested: self.capacity + 1,
                available: self.capacity,
            });
        }

        let index = rng.gen_range(0..self.cells.len());
        Ok(self.cells.remove(index))
    }

    /// Number of cells still available.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cells.len()
    }

}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use scavenger_core::BoardConfig;

    use super::*;

    #[test]
    fn reset_lists_interior_cells_in_row_major_order() {
        let mut allocator = GridAllocator::new(4, 4);
        allocator.reset();

        assert_eq!(allocator.remaining(), 4);
        assert_eq!(
            allocator.cells,
            vec![
                CellCoord::new(1, 1),
                CellCoord::new(2, 1),
                CellCoord::new(1, 2),
                CellCoord::new(2, 2),
            ]
        );
    }

    #[test]
    fn smallest_grid_has_one_interior_cell() {
        let mut allocator = GridAllocator::new(3, 3);
        allocator.reset();
        assert_eq!(allocator.remaining(), 1);
        assert_eq!(allocator.cells, vec![CellCoord::new(1, 1)]);
    }

    #[test]
    fn draws_without_replacement_until_exhausted() {
        let mut allocator = GridAllocator::new(5, 5);
        allocator.reset();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut seen = HashSet::new();

        for _ in 0..9 {
            let cell = allocator.take_random(&mut rng).expect("cell available");
            assert!(seen.insert(cell), "cell {cell:?} handed out twice");
            assert!(!allocator.cells.contains(&cell));
        }

        assert_eq!(
            allocator.take_random(&mut rng),
            Err(GenerationError::PoolExhausted {
                requested: 10,
                available: 9
            })
        );
    }

    #[test]
    fn pool_size_matches_configured_interior() {
        let board = BoardConfig {
            columns: 7,
            rows: 5,
            ..BoardConfig::default()
        };
        let mut allocator = GridAllocator::new(board.columns, board.rows);
        allocator.reset();
        assert_eq!(allocator.remaining(), board.interior_cells());
        assert_eq!(allocator.remaining(), 15);
    }

    #[test]
    fn reset_restores_drawn_cells() {
        let mut allocator = GridAllocator::new(6, 6);
        allocator.reset();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let _ = allocator.take_random(&mut rng).expect("cell available");
        assert_eq!(allocator.remaining(), 15);

        allocator.reset();
        assert_eq!(allocator.remaining(), 16);
    }

    #[test]
    fn same_seed_draws_same_sequence() {
        let draw = |seed| {
            let mut allocator = GridAllocator::new(8, 8);
            allocator.reset();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            (0..10)
                .map(|_| allocator.take_random(&mut rng).expect("cell available"))
                .collect::<Vec<_>>()
        };

        assert_eq!(draw(99), draw(99));
    }
}
