#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pursuit rule that steers every enemy one cell toward the player.

use log::trace;
use scavenger_core::{ActorId, CellCoord, Command, Direction};
use scavenger_world::query::EnemyView;

/// Stateless system that turns the enemy roster into step commands.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnemyBrain;

impl EnemyBrain {
    /// Chooses the step an enemy at `enemy` takes toward the player at `player`.
    ///
    /// An enemy sharing the player's column closes the vertical gap; every other
    /// enemy closes the horizontal gap first.
    #[must_use]
    pub fn decide(enemy: CellCoord, player: CellCoord) -> Direction {
        if enemy.column() == player.column() {
            if player.row() > enemy.row() {
                Direction::Up
            } else {
                Direction::Down
            }
        } else if player.column() > enemy.column() {
            Direction::Right
        } else {
            Direction::Left
        }
    }

    /// Emits one step command per enemy, in roster order.
    ///
    /// Decisions depend only on each enemy's own cell and the player's cell,
    /// so planning the whole roster up front matches deciding one enemy at a
    /// time as long as the commands are applied in the emitted order.
    pub fn handle(&self, enemies: &EnemyView, player: CellCoord, out: &mut Vec<Command>) {
        for enemy in enemies.iter() {
            let direction = Self::decide(enemy.cell, player);
            let (dx, dy) = direction.delta();
            trace!(
                "enemy {} at {:?} heads {:?}",
                enemy.id.get(),
                enemy.cell,
                direction
            );
            out.push(Command::StepActor {
                actor: ActorId::Enemy(enemy.id),
                dx,
                dy,
            });
        }
    }
}
