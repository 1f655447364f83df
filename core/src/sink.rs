//! Notification surface for presentation collaborators.

use crate::{ActorId, BoardLayout, CellCoord, ConsumableKind};

/// Receives notifications about gameplay for rendering, audio, or UI.
///
/// Every method is a pure notification; implementations must not feed
/// anything back into the simulation. All methods default to doing nothing so
/// implementors only override what they present.
pub trait PresentationSink {
    /// A new level layout was generated and installed.
    fn on_board_generated(&mut self, _layout: &BoardLayout) {}

    /// An actor relocated between two cells.
    fn on_actor_moved(&mut self, _actor: ActorId, _from: CellCoord, _to: CellCoord) {}

    /// A destructible wall was hit but still stands.
    fn on_obstacle_damaged(&mut self, _cell: CellCoord, _remaining_hp: u32) {}

    /// A destructible wall fell.
    fn on_obstacle_destroyed(&mut self, _cell: CellCoord) {}

    /// The player consumed an item.
    fn on_consumable_picked(&mut self, _cell: CellCoord, _kind: ConsumableKind, _new_total: i32) {}

    /// An enemy hit the player.
    fn on_player_hit(&mut self, _amount: i32, _new_total: i32) {}

    /// The per-turn food cost was paid.
    fn on_food_spent(&mut self, _amount: i32, _new_total: i32) {}

    /// The player starved.
    fn on_game_over(&mut self, _level_reached: u32) {}

    /// The player reached the exit.
    fn on_level_complete(&mut self, _level_reached: u32) {}
}

impl<S: PresentationSink + ?Sized> PresentationSink for &mut S {
    fn on_board_generated(&mut self, layout: &BoardLayout) {
        (**self).on_board_generated(layout);
    }

    fn on_actor_moved(&mut self, actor: ActorId, from: CellCoord, to: CellCoord) {
        (**self).on_actor_moved(actor, from, to);
    }

    fn on_obstacle_damaged(&mut self, cell: CellCoord, remaining_hp: u32) {
        (**self).on_obstacle_damaged(cell, remaining_hp);
    }

    fn on_obstacle_destroyed(&mut self, cell: CellCoord) {
        (**self).on_obstacle_destroyed(cell);
    }

    fn on_consumable_picked(&mut self, cell: CellCoord, kind: ConsumableKind, new_total: i32) {
        (**self).on_consumable_picked(cell, kind, new_total);
    }

    fn on_player_hit(&mut self, amount: i32, new_total: i32) {
        (**self).on_player_hit(amount, new_total);
    }

    fn on_food_spent(&mut self, amount: i32, new_total: i32) {
        (**self).on_food_spent(amount, new_total);
    }

    fn on_game_over(&mut self, level_reached: u32) {
        (**self).on_game_over(level_reached);
    }

    fn on_level_complete(&mut self, level_reached: u32) {
        (**self).on_level_complete(level_reached);
    }
}

/// Sink that discards every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl PresentationSink for NullSink {}
