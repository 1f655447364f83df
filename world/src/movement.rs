//! Grid movement and collision resolution shared by every actor.
//!
//! A move is validated, classified against the destination cell, and then
//! either committed (relocation plus pickup or exit effects) or turned into a
//! blocked-interaction dispatch. All state changes happen before this module
//! returns; the reported move duration only paces presentation.

use log::debug;
use scavenger_core::{
    ActorId, CellCoord, Direction, EnemyId, Event, Faction, MoveError, MoveOutcome, Obstruction,
    Tile,
};

use crate::{query, World};

/// Attempts to move `actor` one cell by `(dx, dy)`.
///
/// The step must be a unit step along exactly one axis. Requests for unknown
/// actors, for actors still sliding from their previous move, or with an
/// invalid step are rejected before anything changes. Enemies alternate
/// between acting and idling: the call after any attempt returns
/// [`MoveOutcome::Skipped`].
pub fn attempt_move(
    world: &mut World,
    actor: ActorId,
    dx: i32,
    dy: i32,
    out_events: &mut Vec<Event>,
) -> Result<MoveOutcome, MoveError> {
    let _ = Direction::from_delta(dx, dy)?;
    let origin = query::actor_cell(world, actor).ok_or(MoveError::UnknownActor(actor))?;
    if query::is_busy(world, actor) {
        return Err(MoveError::ActorAlreadyBusy(actor));
    }

    if let ActorId::Enemy(id) = actor {
        if take_skip(world, id) {
            debug!("enemy {} skips this move", id.get());
            return Ok(MoveOutcome::Skipped);
        }
    }

    let destination = origin.offset(dx, dy);
    let outcome = match obstruction_at(world, actor, destination) {
        Some(obstruction) => {
            dispatch_blocked(world, actor, obstruction, out_events);
            out_events.push(Event::MoveBlocked { actor, obstruction });
            MoveOutcome::Blocked(obstruction)
        }
        None => {
            relocate(world, actor, origin, destination, out_events);
            MoveOutcome::Moved
        }
    };

    if let ActorId::Enemy(id) = actor {
        if let Some(enemy) = world.enemy_mut(id) {
            enemy.skip_next = true;
        }
    }

    Ok(outcome)
}

fn take_skip(world: &mut World, id: EnemyId) -> bool {
    match world.enemy_mut(id) {
        Some(enemy) if enemy.skip_next => {
            enemy.skip_next = false;
            true
        }
        _ => false,
    }
}

fn obstruction_at(world: &World, mover: ActorId, cell: CellCoord) -> Option<Obstruction> {
    match world.board.tile(cell) {
        Tile::Barrier => return Some(Obstruction::Barrier),
        Tile::Obstacle { .. } => return Some(Obstruction::Obstacle(cell)),
        Tile::Floor | Tile::Consumable(_) | Tile::Exit => {}
    }

    if !world.board.is_playable(cell) {
        return Some(Obstruction::Barrier);
    }

    world.occupancy.occupant(cell).map(|occupant| {
        if occupant.faction() == mover.faction() {
            Obstruction::AlliedActor(occupant)
        } else {
            Obstruction::OpposingActor(occupant)
        }
    })
}

fn dispatch_blocked(
    world: &mut World,
    mover: ActorId,
    obstruction: Obstruction,
    out_events: &mut Vec<Event>,
) {
    match (mover, obstruction) {
        (ActorId::Player, Obstruction::Obstacle(cell)) => damage_obstacle(world, cell, out_events),
        (ActorId::Enemy(id), Obstruction::OpposingActor(ActorId::Player)) => {
            hit_player(world, id, out_events);
        }
        _ => debug!("{mover:?} blocked by {obstruction:?}"),
    }
}

fn damage_obstacle(world: &mut World, cell: CellCoord, out_events: &mut Vec<Event>) {
    let Tile::Obstacle { hit_points } = world.board.tile(cell) else {
        return;
    };

    let remaining = hit_points.saturating_sub(world.rules.player.wall_damage);
    if remaining == 0 {
        world.board.set_tile(cell, Tile::Floor);
        debug!("obstacle at {cell:?} destroyed");
        out_events.push(Event::ObstacleDestroyed { cell });
    } else {
        world
            .board
            .set_tile(cell, Tile::Obstacle { hit_points: remaining });
        out_events.push(Event::ObstacleDamaged { cell, remaining });
    }
}

fn hit_player(world: &mut World, enemy: EnemyId, out_events: &mut Vec<Event>) {
    let Some(kind) = world.enemy(enemy).map(|enemy| enemy.kind) else {
        return;
    };

    let amount = world.rules.enemies.damage_of(kind);
    world.player.food = world.player.food.saturating_sub(amount);
    debug!(
        "enemy {} hits player for {amount}, food now {}",
        enemy.get(),
        world.player.food
    );
    out_events.push(Event::PlayerHit {
        enemy,
        amount,
        total: world.player.food,
    });
}

fn relocate(
    world: &mut World,
    actor: ActorId,
    from: CellCoord,
    to: CellCoord,
    out_events: &mut Vec<Event>,
) {
    let duration = world.rules.move_time;
    world.occupancy.vacate(from);
    world.occupancy.occupy(actor, to);
    match actor {
        ActorId::Player => world.player.cell = to,
        ActorId::Enemy(id) => {
            if let Some(enemy) = world.enemy_mut(id) {
                enemy.cell = to;
            }
        }
    }
    if let Some(motion) = world.motion_mut(actor) {
        *motion = duration;
    }
    out_events.push(Event::ActorMoved {
        actor,
        from,
        to,
        duration,
    });

    if actor.faction() == Faction::Player {
        collect_at(world, to, out_events);
    }
}

fn collect_at(world: &mut World, cell: CellCoord, out_events: &mut Vec<Event>) {
    match world.board.tile(cell) {
        Tile::Consumable(kind) => {
            world.player.food = world
                .player
                .food
                .saturating_add(world.rules.player.value_of(kind));
            world.board.set_tile(cell, Tile::Floor);
            out_events.push(Event::ConsumablePicked {
                cell,
                kind,
                total: world.player.food,
            });
        }
        Tile::Exit => {
            world.player.exit_reached = true;
            out_events.push(Event::ExitReached { cell });
        }
        Tile::Floor | Tile::Barrier | Tile::Obstacle { .. } => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apply;
    use scavenger_core::{
        BoardLayout, Command, ConsumableKind, EnemyKind, GameConfig, Occupancy, PacingConfig,
    };

    fn world_with(layout: BoardLayout, food: i32) -> World {
        let config = GameConfig {
            pacing: PacingConfig::immediate(),
            ..GameConfig::default()
        };
        let mut world = World::new(&config);
        let mut events = Vec::new();
        apply(&mut world, Command::LoadLevel { layout, food }, &mut events).expect("load");
        world
    }

    #[test]
    fn barrier_blocks_without_interaction() {
        let mut world = world_with(BoardLayout::new(1, 5, 5), 50);
        let mut events = Vec::new();

        let outcome =
            attempt_move(&mut world, ActorId::Player, -1, 0, &mut events).expect("valid step");

        assert_eq!(outcome, MoveOutcome::Blocked(Obstruction::Barrier));
        assert_eq!(query::player_cell(&world), CellCoord::new(0, 0));
        assert_eq!(query::player_food(&world), 50);
        assert_eq!(
            events,
            vec![Event::MoveBlocked {
                actor: ActorId::Player,
                obstruction: Obstruction::Barrier,
            }]
        );
    }

    #[test]
    fn invalid_step_changes_nothing() {
        let mut world = world_with(BoardLayout::new(1, 5, 5), 50);
        let mut events = Vec::new();

        assert_eq!(
            attempt_move(&mut world, ActorId::Player, 1, 1, &mut events),
            Err(MoveError::InvalidDirection { dx: 1, dy: 1 })
        );
        assert_eq!(
            attempt_move(&mut world, ActorId::Player, 0, 0, &mut events),
            Err(MoveError::InvalidDirection { dx: 0, dy: 0 })
        );
        assert!(events.is_empty());
        assert_eq!(query::player_cell(&world), CellCoord::new(0, 0));
    }

    #[test]
    fn unknown_enemy_is_rejected() {
        let mut world = world_with(BoardLayout::new(1, 5, 5), 50);
        let mut events = Vec::new();
        let ghost = ActorId::Enemy(EnemyId::new(9));

        assert_eq!(
            attempt_move(&mut world, ghost, 1, 0, &mut events),
            Err(MoveError::UnknownActor(ghost))
        );
    }

    #[test]
    fn enemy_walks_over_consumables_without_eating() {
        let mut layout = BoardLayout::new(2, 5, 5);
        let id = layout.push_enemy(CellCoord::new(2, 2), EnemyKind::Prowler);
        layout.set_tile(CellCoord::new(3, 2), Tile::Consumable(ConsumableKind::Soda));
        let mut world = world_with(layout, 50);
        let mut events = Vec::new();

        let outcome =
            attempt_move(&mut world, ActorId::Enemy(id), 1, 0, &mut events).expect("valid step");

        assert_eq!(outcome, MoveOutcome::Moved);
        assert_eq!(
            query::tile(&world, CellCoord::new(3, 2)),
            Tile::Consumable(ConsumableKind::Soda)
        );
        assert_eq!(
            query::occupancy(&world, CellCoord::new(3, 2)),
            Occupancy::Actor(ActorId::Enemy(id))
        );
        assert_eq!(query::player_food(&world), 50);
    }

    #[test]
    fn enemy_does_not_chop_obstacles() {
        let mut layout = BoardLayout::new(2, 5, 5);
        let id = layout.push_enemy(CellCoord::new(2, 2), EnemyKind::Brute);
        layout.set_tile(CellCoord::new(2, 3), Tile::Obstacle { hit_points: 1 });
        let mut world = world_with(layout, 50);
        let mut events = Vec::new();

        let outcome =
            attempt_move(&mut world, ActorId::Enemy(id), 0, 1, &mut events).expect("valid step");

        assert_eq!(
            outcome,
            MoveOutcome::Blocked(Obstruction::Obstacle(CellCoord::new(2, 3)))
        );
        assert_eq!(
            query::tile(&world, CellCoord::new(2, 3)),
            Tile::Obstacle { hit_points: 1 }
        );
    }

    #[test]
    fn enemies_block_each_other_without_interaction() {
        let mut layout = BoardLayout::new(4, 5, 5);
        let first = layout.push_enemy(CellCoord::new(1, 1), EnemyKind::Prowler);
        let second = layout.push_enemy(CellCoord::new(2, 1), EnemyKind::Prowler);
        let mut world = world_with(layout, 50);
        let mut events = Vec::new();

        let outcome = attempt_move(&mut world, ActorId::Enemy(first), 1, 0, &mut events)
            .expect("valid step");

        assert_eq!(
            outcome,
            MoveOutcome::Blocked(Obstruction::AlliedActor(ActorId::Enemy(second)))
        );
        assert_eq!(query::player_food(&world), 50);
    }

    #[test]
    fn player_bumping_enemy_has_no_effect() {
        let mut layout = BoardLayout::new(2, 5, 5);
        let id = layout.push_enemy(CellCoord::new(1, 0), EnemyKind::Brute);
        let mut world = world_with(layout, 50);
        let mut events = Vec::new();

        let outcome =
            attempt_move(&mut world, ActorId::Player, 1, 0, &mut events).expect("valid step");

        assert_eq!(
            outcome,
            MoveOutcome::Blocked(Obstruction::OpposingActor(ActorId::Enemy(id)))
        );
        assert_eq!(query::player_food(&world), 50);
        assert_eq!(
            query::actor_cell(&world, ActorId::Enemy(id)),
            Some(CellCoord::new(1, 0))
        );
    }

    #[test]
    fn brute_hits_harder_than_prowler() {
        let mut layout = BoardLayout::new(4, 5, 5);
        let prowler = layout.push_enemy(CellCoord::new(1, 0), EnemyKind::Prowler);
        let brute = layout.push_enemy(CellCoord::new(0, 1), EnemyKind::Brute);
        let mut world = world_with(layout, 50);
        let mut events = Vec::new();

        let _ = attempt_move(&mut world, ActorId::Enemy(prowler), -1, 0, &mut events)
            .expect("valid step");
        assert_eq!(query::player_food(&world), 40);
        let _ = attempt_move(&mut world, ActorId::Enemy(brute), 0, -1, &mut events)
            .expect("valid step");
        assert_eq!(query::player_food(&world), 20);
    }

    #[test]
    fn exit_marks_level_complete() {
        let mut layout = BoardLayout::new(1, 3, 3);
        let _ = layout.stamp_exit();
        let mut world = world_with(layout, 50);
        let mut events = Vec::new();

        for (dx, dy) in [(1, 0), (1, 0), (0, 1)] {
            let _ = attempt_move(&mut world, ActorId::Player, dx, dy, &mut events)
                .expect("valid step");
        }
        assert!(!query::exit_reached(&world));

        let outcome =
            attempt_move(&mut world, ActorId::Player, 0, 1, &mut events).expect("valid step");
        assert_eq!(outcome, MoveOutcome::Moved);
        assert!(query::exit_reached(&world));
        assert_eq!(
            events.last(),
            Some(&Event::ExitReached {
                cell: CellCoord::new(2, 2)
            })
        );
    }
}
