//! Plain-text board renderer.

use std::collections::HashMap;

use scavenger_core::{ActorId, CellCoord, ConsumableKind, EnemyId, EnemyKind, Tile};
use scavenger_world::{query, World};

/// Renders the board including its barrier ring, top row first.
///
/// Legend: `@` player, `p`/`B` prowler and brute, `#` barrier, digits are
/// destructible walls showing their hit points, `f`/`s` food and soda, `E`
/// exit, `.` floor.
pub(crate) fn render(world: &World) -> String {
    let board = query::board(world);
    let columns = i32::try_from(board.columns()).unwrap_or(i32::MAX);
    let rows = i32::try_from(board.rows()).unwrap_or(i32::MAX);
    let kinds: HashMap<EnemyId, EnemyKind> = query::enemy_view(world)
        .iter()
        .map(|enemy| (enemy.id, enemy.kind))
        .collect();

    let mut out = String::new();
    for row in (-1..=rows).rev() {
        for column in -1..=columns {
            let cell = CellCoord::new(column, row);
            out.push(glyph(world, cell, &kinds));
        }
        out.push('\n');
    }
    out
}

fn glyph(world: &World, cell: CellCoord, kinds: &HashMap<EnemyId, EnemyKind>) -> char {
    match query::occupant(world, cell) {
        Some(ActorId::Player) => return '@',
        Some(ActorId::Enemy(id)) => {
            return match kinds.get(&id) {
                Some(EnemyKind::Brute) => 'B',
                _ => 'p',
            }
        }
        None => {}
    }

    match query::tile(world, cell) {
        Tile::Floor => '.',
        Tile::Barrier => '#',
        Tile::Obstacle { hit_points } => char::from_digit(hit_points.min(9), 10).unwrap_or('W'),
        Tile::Consumable(ConsumableKind::Food) => 'f',
        Tile::Consumable(ConsumableKind::Soda) => 's',
        Tile::Exit => 'E',
    }
}

#[cfg(test)]
mod tests {
    use scavenger_core::{BoardLayout, Command, GameConfig};
    use scavenger_world::apply;

    use super::*;

    #[test]
    fn renders_every_layer() {
        let mut world = World::new(&GameConfig::default());
        let mut layout = BoardLayout::new(2, 3, 3);
        layout.set_tile(CellCoord::new(1, 0), Tile::Obstacle { hit_points: 3 });
        layout.set_tile(CellCoord::new(0, 2), Tile::Consumable(ConsumableKind::Soda));
        let _ = layout.push_enemy(CellCoord::new(1, 1), EnemyKind::Brute);
        let _ = layout.stamp_exit();
        let mut events = Vec::new();
        apply(&mut world, Command::LoadLevel { layout, food: 10 }, &mut events)
            .expect("level loads");

        assert_eq!(
            render(&world),
            "#####\n#s.E#\n#.B.#\n#@3.#\n#####\n"
        );
    }
}
