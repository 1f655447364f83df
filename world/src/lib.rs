#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative level state for Scavenger.
//!
//! The world owns the tile layer, the occupancy grid, and every actor. It only
//! changes in response to [`Command`] values passed to [`apply`], and it
//! reports what happened through [`Event`] values. Move resolution lives in
//! [`movement`].

use std::time::Duration;

use log::{info, warn};
use scavenger_core::{
    ActorId, BoardLayout, CellCoord, Command, EnemyConfig, EnemyId, EnemyKind, Event, GameConfig,
    MoveError, PlayerConfig, WELCOME_BANNER,
};

pub mod movement;

/// Represents the authoritative Scavenger world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    rules: Rules,
    board: BoardLayout,
    occupancy: OccupancyGrid,
    player: Player,
    enemies: Vec<Enemy>,
}

impl World {
    /// Creates an empty world that follows the provided rules.
    ///
    /// The world holds a bare board until a [`Command::LoadLevel`] arrives.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        let board = BoardLayout::new(0, config.board.columns, config.board.rows);
        let occupancy = OccupancyGrid::new(board.columns(), board.rows());
        let player = Player::new(board.player_start(), config.player.starting_food);
        let mut world = Self {
            banner: WELCOME_BANNER,
            rules: Rules::from_config(config),
            board,
            occupancy,
            player,
            enemies: Vec::new(),
        };
        world.occupancy.occupy(ActorId::Player, world.player.cell);
        world
    }

    fn load_level(&mut self, layout: BoardLayout, food: i32, out_events: &mut Vec<Event>) {
        self.occupancy = OccupancyGrid::new(layout.columns(), layout.rows());
        self.player = Player::new(layout.player_start(), food);
        self.occupancy.occupy(ActorId::Player, self.player.cell);

        self.enemies.clear();
        for placement in layout.enemies() {
            if !self.occupancy.is_free(placement.cell) || !layout.is_playable(placement.cell) {
                warn!(
                    "dropping enemy {} placed on unavailable cell {:?}",
                    placement.id.get(),
                    placement.cell
                );
                continue;
            }
            self.occupancy
                .occupy(ActorId::Enemy(placement.id), placement.cell);
            self.enemies.push(Enemy::from_placement(
                placement.id,
                placement.kind,
                placement.cell,
            ));
        }

        info!(
            "level {} loaded with {} enemies and {} food",
            layout.level(),
            self.enemies.len(),
            food
        );
        self.board = layout.clone();
        out_events.push(Event::BoardGenerated { layout });
    }

    fn enemy(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.iter().find(|enemy| enemy.id == id)
    }

    fn enemy_mut(&mut self, id: EnemyId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|enemy| enemy.id == id)
    }

    fn motion_mut(&mut self, actor: ActorId) -> Option<&mut Duration> {
        match actor {
            ActorId::Player => Some(&mut self.player.motion),
            ActorId::Enemy(id) => self.enemy_mut(id).map(|enemy| &mut enemy.motion),
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Only [`Command::StepActor`] can fail; a failed step leaves the world
/// untouched.
pub fn apply(
    world: &mut World,
    command: Command,
    out_events: &mut Vec<Event>,
) -> Result<(), MoveError> {
    match command {
        Command::LoadLevel { layout, food } => world.load_level(layout, food, out_events),
        Command::StepActor { actor, dx, dy } => {
            let _ = movement::attempt_move(world, actor, dx, dy, out_events)?;
        }
        Command::SpendFood { amount } => {
            world.player.food = world.player.food.saturating_sub(amount);
            out_events.push(Event::FoodSpent {
                amount,
                total: world.player.food,
            });
        }
        Command::Tick { dt } => {
            world.player.motion = world.player.motion.saturating_sub(dt);
            for enemy in &mut world.enemies {
                enemy.motion = enemy.motion.saturating_sub(dt);
            }
            out_events.push(Event::TimeAdvanced { dt });
        }
    }
    Ok(())
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use scavenger_core::{ActorId, BoardLayout, CellCoord, EnemyId, EnemyKind, Occupancy, Tile};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Level number of the installed board; zero before the first load.
    #[must_use]
    pub fn level(world: &World) -> u32 {
        world.board.level()
    }

    /// Current tile layer, reflecting destroyed walls and consumed items.
    ///
    /// The layout's enemy list records spawn placements; live positions come
    /// from [`enemy_view`].
    #[must_use]
    pub fn board(world: &World) -> &BoardLayout {
        &world.board
    }

    /// Static tile at the provided cell.
    #[must_use]
    pub fn tile(world: &World, cell: CellCoord) -> Tile {
        world.board.tile(cell)
    }

    /// Observable classification of a cell, actors taking precedence.
    #[must_use]
    pub fn occupancy(world: &World, cell: CellCoord) -> Occupancy {
        if let Some(actor) = world.occupancy.occupant(cell) {
            return Occupancy::Actor(actor);
        }

        match world.board.tile(cell) {
            Tile::Floor => Occupancy::Empty,
            Tile::Barrier => Occupancy::Barrier,
            Tile::Obstacle { .. } => Occupancy::Obstacle,
            Tile::Consumable(_) => Occupancy::Consumable,
            Tile::Exit => Occupancy::Exit,
        }
    }

    /// Actor standing on the provided cell, if any.
    #[must_use]
    pub fn occupant(world: &World, cell: CellCoord) -> Option<ActorId> {
        world.occupancy.occupant(cell)
    }

    /// Cell currently occupied by the player.
    #[must_use]
    pub fn player_cell(world: &World) -> CellCoord {
        world.player.cell
    }

    /// Player's current food total.
    #[must_use]
    pub fn player_food(world: &World) -> i32 {
        world.player.food
    }

    /// Reports whether the player has food left.
    #[must_use]
    pub fn player_alive(world: &World) -> bool {
        world.player.food > 0
    }

    /// Reports whether the player stepped onto the exit this level.
    #[must_use]
    pub fn exit_reached(world: &World) -> bool {
        world.player.exit_reached
    }

    /// Cell occupied by the provided actor, if it is part of the level.
    #[must_use]
    pub fn actor_cell(world: &World, actor: ActorId) -> Option<CellCoord> {
        match actor {
            ActorId::Player => Some(world.player.cell),
            ActorId::Enemy(id) => world.enemy(id).map(|enemy| enemy.cell),
        }
    }

    /// Reports whether the actor is still sliding from its previous move.
    #[must_use]
    pub fn is_busy(world: &World, actor: ActorId) -> bool {
        match actor {
            ActorId::Player => !world.player.motion.is_zero(),
            ActorId::Enemy(id) => world
                .enemy(id)
                .is_some_and(|enemy| !enemy.motion.is_zero()),
        }
    }

    /// Reports whether every actor finished moving.
    #[must_use]
    pub fn is_settled(world: &World) -> bool {
        world.player.motion.is_zero() && world.enemies.iter().all(|enemy| enemy.motion.is_zero())
    }

    /// Captures a read-only view of the enemy roster in roster order.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        let snapshots = world
            .enemies
            .iter()
            .map(|enemy| EnemySnapshot {
                id: enemy.id,
                kind: enemy.kind,
                cell: enemy.cell,
                skip_next: enemy.skip_next,
            })
            .collect();
        EnemyView { snapshots }
    }

    /// Read-only snapshot of the enemy roster.
    #[derive(Clone, Debug, Default)]
    pub struct EnemyView {
        snapshots: Vec<EnemySnapshot>,
    }

    impl EnemyView {
        /// Iterator over the captured enemies in roster order.
        pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
            self.snapshots.iter()
        }

        /// Number of enemies on the board.
        #[must_use]
        pub fn len(&self) -> usize {
            self.snapshots.len()
        }

        /// Reports whether the roster is empty.
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.snapshots.is_empty()
        }
    }

    /// Immutable representation of a single enemy's state.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct EnemySnapshot {
        /// Identifier assigned to the enemy.
        pub id: EnemyId,
        /// Kind of enemy.
        pub kind: EnemyKind,
        /// Cell currently occupied by the enemy.
        pub cell: CellCoord,
        /// Indicates whether the enemy sits out its next move call.
        pub skip_next: bool,
    }
}

#[derive(Clone, Debug)]
struct Rules {
    player: PlayerConfig,
    enemies: EnemyConfig,
    move_time: Duration,
}

impl Rules {
    fn from_config(config: &GameConfig) -> Self {
        Self {
            player: config.player.clone(),
            enemies: config.enemies.clone(),
            move_time: config.pacing.move_time(),
        }
    }
}

#[derive(Clone, Debug)]
struct Player {
    cell: CellCoord,
    food: i32,
    motion: Duration,
    exit_reached: bool,
}

impl Player {
    fn new(cell: CellCoord, food: i32) -> Self {
        Self {
            cell,
            food,
            motion: Duration::ZERO,
            exit_reached: false,
        }
    }
}

/// Enemies cannot be harmed; the roster only changes when a level loads.
#[derive(Clone, Debug)]
struct Enemy {
    id: EnemyId,
    kind: EnemyKind,
    cell: CellCoord,
    motion: Duration,
    skip_next: bool,
}

impl Enemy {
    fn from_placement(id: EnemyId, kind: EnemyKind, cell: CellCoord) -> Self {
        Self {
            id,
            kind,
            cell,
            motion: Duration::ZERO,
            skip_next: false,
        }
    }
}

#[derive(Clone, Debug)]
struct OccupancyGrid {
    columns: u32,
    rows: u32,
    cells: Vec<Option<ActorId>>,
}

impl OccupancyGrid {
    fn new(columns: u32, rows: u32) -> Self {
        let capacity_u64 = u64::from(columns) * u64::from(rows);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            columns,
            rows,
            cells: vec![None; capacity],
        }
    }

    fn occupant(&self, cell: CellCoord) -> Option<ActorId> {
        self.index(cell)
            .and_then(|index| self.cells.get(index).copied().flatten())
    }

    fn is_free(&self, cell: CellCoord) -> bool {
        self.occupant(cell).is_none()
    }

    fn occupy(&mut self, actor: ActorId, cell: CellCoord) {
        if let Some(index) = self.index(cell) {
            if let Some(slot) = self.cells.get_mut(index) {
                *slot = Some(actor);
            }
        }
    }

    fn vacate(&mut self, cell: CellCoord) {
        if let Some(index) = self.index(cell) {
            if let Some(slot) = self.cells.get_mut(index) {
                *slot = None;
            }
        }
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        let column = u32::try_from(cell.column()).ok()?;
        let row = u32::try_from(cell.row()).ok()?;
        if column < self.columns && row < self.rows {
            let row = usize::try_from(row).ok()?;
            let column = usize::try_from(column).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}
