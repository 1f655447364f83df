//! Line-oriented terminal session driving the turn controller.

use std::{
    io::{BufRead, Write},
    time::Duration,
};

use anyhow::{bail, Context, Result};
use log::warn;
use scavenger_core::{
    BoardLayout, CellCoord, ConsumableKind, Direction, PresentationSink, TurnPhase,
};
use scavenger_system_turns::{InputOutcome, TurnController};

use crate::render::render;

/// Simulated time fed to the controller per frame while waiting for input.
const FRAME: Duration = Duration::from_millis(16);
const MAX_FRAMES_PER_TURN: usize = 100_000;

/// Single action decoded from user input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Input {
    Move(Direction),
    Restart,
    Quit,
}

/// Input axes `(horizontal, vertical)` bound to a movement key.
fn key_axes(key: char) -> Option<(i32, i32)> {
    match key {
        'w' => Some((0, 1)),
        'a' => Some((-1, 0)),
        's' => Some((0, -1)),
        'd' => Some((1, 0)),
        _ => None,
    }
}

/// Decodes every recognised character in `line`; `w`/`a`/`s`/`d` move,
/// `r` restarts after a game over, `q` quits.
pub(crate) fn parse_line(line: &str) -> Vec<Input> {
    line.chars()
        .filter(|character| !character.is_whitespace())
        .map(|character| character.to_ascii_lowercase())
        .filter_map(|key| {
            if let Some(direction) = key_axes(key)
                .and_then(|(horizontal, vertical)| Direction::from_axes(horizontal, vertical))
            {
                return Some(Input::Move(direction));
            }
            match key {
                'r' => Some(Input::Restart),
                'q' => Some(Input::Quit),
                other => {
                    warn!("ignoring unknown input {other:?}");
                    None
                }
            }
        })
        .collect()
}

/// Presentation sink that turns notifications into terminal messages.
#[derive(Debug, Default)]
pub(crate) struct TerminalSink {
    messages: Vec<String>,
    food: Option<i32>,
}

impl TerminalSink {
    /// Removes and returns the messages gathered since the last call.
    pub(crate) fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.messages)
    }
}

impl PresentationSink for TerminalSink {
    fn on_board_generated(&mut self, layout: &BoardLayout) {
        self.messages.push(format!("Day {}", layout.level()));
    }

    fn on_obstacle_damaged(&mut self, _cell: CellCoord, remaining_hp: u32) {
        self.messages
            .push(format!("You chop at the wall ({remaining_hp} left)."));
    }

    fn on_obstacle_destroyed(&mut self, _cell: CellCoord) {
        self.messages.push("The wall crumbles.".to_owned());
    }

    fn on_consumable_picked(&mut self, _cell: CellCoord, kind: ConsumableKind, new_total: i32) {
        let item = match kind {
            ConsumableKind::Food => "food",
            ConsumableKind::Soda => "soda",
        };
        let gained = self.food.map_or(0, |food| new_total - food);
        self.food = Some(new_total);
        self.messages
            .push(format!("You found {item}: +{gained} Food: {new_total}"));
    }

    fn on_player_hit(&mut self, amount: i32, new_total: i32) {
        self.food = Some(new_total);
        self.messages.push(format!("-{amount} Food: {new_total}"));
    }

    fn on_food_spent(&mut self, _amount: i32, new_total: i32) {
        self.food = Some(new_total);
    }

    fn on_game_over(&mut self, level_reached: u32) {
        self.messages
            .push(format!("After {level_reached} days, you starved."));
    }

    fn on_level_complete(&mut self, level_reached: u32) {
        self.messages
            .push(format!("You survived day {level_reached}."));
    }
}

/// Plays a run, reading inputs line by line until `q` or end of input.
pub(crate) fn run<R: BufRead, W: Write>(
    controller: &mut TurnController<TerminalSink>,
    input: R,
    out: &mut W,
) -> Result<()> {
    controller.start().context("failed to start the run")?;
    settle(controller)?;
    draw(controller, out)?;

    for line in input.lines() {
        let line = line.context("failed to read input")?;
        for action in parse_line(&line) {
            match action {
                Input::Quit => return finish(controller, out),
                Input::Restart => {
                    if controller.phase() != TurnPhase::GameOver {
                        continue;
                    }
                    controller.restart().context("failed to restart the run")?;
                }
                Input::Move(direction) => {
                    let outcome = controller
                        .submit_input(Some(direction))
                        .context("player turn failed")?;
                    if outcome == InputOutcome::Ignored {
                        continue;
                    }
                }
            }
            settle(controller)?;
            draw(controller, out)?;
        }
    }

    finish(controller, out)
}

fn settle(controller: &mut TurnController<TerminalSink>) -> Result<()> {
    for _ in 0..MAX_FRAMES_PER_TURN {
        if matches!(
            controller.phase(),
            TurnPhase::PlayerTurn | TurnPhase::GameOver
        ) {
            return Ok(());
        }
        controller.advance(FRAME).context("turn processing failed")?;
    }
    bail!(
        "controller stuck in {:?} after {MAX_FRAMES_PER_TURN} frames",
        controller.phase()
    )
}

fn draw<W: Write>(controller: &mut TurnController<TerminalSink>, out: &mut W) -> Result<()> {
    for message in controller.sink_mut().drain() {
        writeln!(out, "{message}")?;
    }
    write!(out, "{}", render(controller.world()))?;
    writeln!(out, "{}", controller.status_line())?;
    out.flush().context("failed to flush output")
}

fn finish<W: Write>(controller: &mut TurnController<TerminalSink>, out: &mut W) -> Result<()> {
    for message in controller.sink_mut().drain() {
        writeln!(out, "{message}")?;
    }
    writeln!(out, "Final: day {}, {}", controller.level(), controller.status_line())?;
    out.flush().context("failed to flush output")
}

#[cfg(test)]
mod tests {
    use scavenger_core::{BoardConfig, CountRange, GameConfig, PacingConfig};

    use super::*;

    fn tiny_controller(starting_food: i32) -> TurnController<TerminalSink> {
        let mut config = GameConfig {
            pacing: PacingConfig::immediate(),
            ..GameConfig::default()
        };
        config.board = BoardConfig {
            columns: 3,
            rows: 3,
            walls: CountRange::new(0, 0),
            food: CountRange::new(0, 0),
            wall_hit_points: 3,
        };
        config.player.starting_food = starting_food;
        TurnController::new(config, 5, TerminalSink::default()).expect("valid config")
    }

    fn play(controller: &mut TurnController<TerminalSink>, script: &str) -> String {
        let mut out = Vec::new();
        run(controller, script.as_bytes(), &mut out).expect("session runs");
        String::from_utf8(out).expect("utf-8 output")
    }

    #[test]
    fn parses_movement_and_control_keys() {
        assert_eq!(
            parse_line("W a s\td x R q"),
            vec![
                Input::Move(Direction::Up),
                Input::Move(Direction::Left),
                Input::Move(Direction::Down),
                Input::Move(Direction::Right),
                Input::Restart,
                Input::Quit,
            ]
        );
    }

    #[test]
    fn movement_keys_match_their_step_deltas() {
        for key in ['w', 'a', 's', 'd'] {
            let (horizontal, vertical) = key_axes(key).expect("movement key");
            assert_eq!(
                parse_line(&key.to_string()),
                vec![Input::Move(
                    Direction::from_delta(horizontal, vertical).expect("unit step")
                )]
            );
        }
        assert_eq!(parse_line("x?"), Vec::new());
    }

    #[test]
    fn scripted_walk_reaches_the_next_day() {
        let mut controller = tiny_controller(100);
        let output = play(&mut controller, "ddww\n");

        assert!(output.starts_with("Day 1\n"));
        assert!(output.contains("You survived day 1."));
        assert!(output.contains("Day 2\n"));
        assert_eq!(controller.level(), 2);
    }

    #[test]
    fn starving_prints_the_final_message_and_ignores_moves() {
        let mut controller = tiny_controller(1);
        let output = play(&mut controller, "d\nddd\n");

        assert!(output.contains("After 1 days, you starved."));
        assert_eq!(controller.phase(), TurnPhase::GameOver);
        assert!(output.ends_with("Final: day 1, After 1 days, you starved.\n"));
    }

    #[test]
    fn restart_begins_a_new_run_after_game_over() {
        let mut controller = tiny_controller(1);
        let _ = play(&mut controller, "d r");

        assert_eq!(controller.phase(), TurnPhase::PlayerTurn);
        assert_eq!(controller.level(), 1);
    }

    #[test]
    fn quit_stops_reading_input() {
        let mut controller = tiny_controller(100);
        let _ = play(&mut controller, "dq\ndww\n");

        assert_eq!(controller.level(), 1);
        assert_eq!(
            scavenger_world::query::player_cell(controller.world()),
            CellCoord::new(1, 0)
        );
    }
}
