//! Static description of a generated level.

use crate::{CellCoord, ConsumableKind, EnemyId, EnemyKind, Tile};

/// Enemy recorded by the board generator, in roster order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EnemyPlacement {
    /// Identifier assigned to the enemy for the level.
    pub id: EnemyId,
    /// Cell the enemy starts on.
    pub cell: CellCoord,
    /// Kind of enemy placed.
    pub kind: EnemyKind,
}

/// Tile map and roster for a single level.
///
/// The map covers the playable grid plus its one-cell barrier ring, i.e.
/// `[-1, columns] × [-1, rows]`. Later writes to a cell replace earlier ones.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardLayout {
    level: u32,
    columns: u32,
    rows: u32,
    tiles: Vec<Tile>,
    enemies: Vec<EnemyPlacement>,
}

impl BoardLayout {
    /// Creates a layout with a barrier ring around plain floor.
    #[must_use]
    pub fn new(level: u32, columns: u32, rows: u32) -> Self {
        let stride = columns as usize + 2;
        let height = rows as usize + 2;
        let mut tiles = vec![Tile::Floor; stride * height];
        for (index, tile) in tiles.iter_mut().enumerate() {
            let column = index % stride;
            let row = index / stride;
            if column == 0 || row == 0 || column == stride - 1 || row == height - 1 {
                *tile = Tile::Barrier;
            }
        }

        Self {
            level,
            columns,
            rows,
            tiles,
            enemies: Vec::new(),
        }
    }

    /// Level number the layout was generated for.
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Number of playable columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of playable rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Far interior corner holding the exit.
    #[must_use]
    pub const fn exit(&self) -> CellCoord {
        CellCoord::new(self.columns as i32 - 1, self.rows as i32 - 1)
    }

    /// Cell the player enters every level on.
    #[must_use]
    pub const fn player_start(&self) -> CellCoord {
        CellCoord::new(0, 0)
    }

    /// Reports whether the cell lies within `[0, columns) × [0, rows)`.
    #[must_use]
    pub fn is_playable(&self, cell: CellCoord) -> bool {
        cell.column() >= 0
            && cell.row() >= 0
            && (cell.column() as u32) < self.columns
            && (cell.row() as u32) < self.rows
    }

    /// Tile stored at the cell; anything beyond the barrier ring is barrier.
    #[must_use]
    pub fn tile(&self, cell: CellCoord) -> Tile {
        self.index(cell)
            .and_then(|index| self.tiles.get(index).copied())
            .unwrap_or(Tile::Barrier)
    }

    /// Overwrites the tile at the cell. Writes outside the map are ignored.
    pub fn set_tile(&mut self, cell: CellCoord, tile: Tile) {
        if let Some(index) = self.index(cell) {
            if let Some(slot) = self.tiles.get_mut(index) {
                *slot = tile;
            }
        }
    }

    /// Appends an enemy to the roster and returns the identifier it received.
    pub fn push_enemy(&mut self, cell: CellCoord, kind: EnemyKind) -> EnemyId {
        let id = EnemyId::new(self.enemies.len() as u32);
        self.enemies.push(EnemyPlacement { id, cell, kind });
        id
    }

    /// Stamps the exit onto its corner, discarding whatever was recorded there.
    ///
    /// Returns `true` when a tile or enemy was overwritten.
    pub fn stamp_exit(&mut self) -> bool {
        let exit = self.exit();
        let overwrote_tile = self.tile(exit) != Tile::Floor;
        let before = self.enemies.len();
        self.enemies.retain(|enemy| enemy.cell != exit);
        let overwrote_enemy = self.enemies.len() != before;
        self.set_tile(exit, Tile::Exit);
        overwrote_tile || overwrote_enemy
    }

    /// Enemies in roster order.
    #[must_use]
    pub fn enemies(&self) -> &[EnemyPlacement] {
        &self.enemies
    }

    /// Iterates every cell of the map, barrier ring included, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (CellCoord, Tile)> + '_ {
        let stride = self.columns as usize + 2;
        self.tiles.iter().enumerate().map(move |(index, tile)| {
            let column = (index % stride) as i32 - 1;
            let row = (index / stride) as i32 - 1;
            (CellCoord::new(column, row), *tile)
        })
    }

    /// Iterates destructible walls with their hit points.
    pub fn obstacles(&self) -> impl Iterator<Item = (CellCoord, u32)> + '_ {
        self.cells().filter_map(|(cell, tile)| match tile {
            Tile::Obstacle { hit_points } => Some((cell, hit_points)),
            _ => None,
        })
    }

    /// Iterates consumables lying on the board.
    pub fn consumables(&self) -> impl Iterator<Item = (CellCoord, ConsumableKind)> + '_ {
        self.cells().filter_map(|(cell, tile)| match tile {
            Tile::Consumable(kind) => Some((cell, kind)),
            _ => None,
        })
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        let column = usize::try_from(cell.column().checked_add(1)?).ok()?;
        let row = usize::try_from(cell.row().checked_add(1)?).ok()?;
        let stride = self.columns as usize + 2;
        let height = self.rows as usize + 2;
        if column < stride && row < height {
            Some(row * stride + column)
        } else {
            None
        }
    }
}
