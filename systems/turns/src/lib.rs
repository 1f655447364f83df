#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Turn state machine that sequences level setup, player input, and enemy
//! phases.
//!
//! The controller owns the world and drives it exclusively through
//! [`scavenger_world::apply`]. Time only moves when [`TurnController::advance`]
//! is called, so tests and replays can feed simulated time deterministically.

use std::time::Duration;

use log::{debug, info};
use scavenger_core::{
    ActorId, Command, Direction, Event, GameConfig, MoveOutcome, PresentationSink, TurnError,
    TurnPhase, MOVE_COST,
};
use scavenger_system_board_generation::BoardGenerator;
use scavenger_system_enemy_ai::EnemyBrain;
use scavenger_world::{self as world, query, World};

/// Result of handing a directional input to the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputOutcome {
    /// The input arrived outside the player's turn or carried no direction.
    Ignored,
    /// The player's turn was taken and resolved with the provided outcome.
    Resolved(MoveOutcome),
}

/// Orchestrates a run of Scavenger levels.
#[derive(Debug)]
pub struct TurnController<S> {
    config: GameConfig,
    world: World,
    generator: BoardGenerator,
    brain: EnemyBrain,
    sink: S,
    phase: TurnPhase,
    phase_clock: Duration,
    enemies_acted: bool,
    started: bool,
    events: Vec<Event>,
}

impl<S: PresentationSink> TurnController<S> {
    /// Creates a controller for the provided configuration and run seed.
    ///
    /// The configuration is validated up front. No level exists until
    /// [`TurnController::start`] is called.
    pub fn new(config: GameConfig, seed: u64, sink: S) -> Result<Self, TurnError> {
        let generator = BoardGenerator::new(config.board.clone(), seed);
        Self::with_generator(config, generator, sink)
    }

    /// Creates a controller around an explicitly constructed board generator.
    ///
    /// The generator's board configuration takes the place of `config.board`
    /// and the combined configuration is validated before use.
    pub fn with_generator(
        mut config: GameConfig,
        generator: BoardGenerator,
        sink: S,
    ) -> Result<Self, TurnError> {
        config.board = generator.config().clone();
        config.validate()?;
        Ok(Self {
            world: World::new(&config),
            config,
            generator,
            brain: EnemyBrain,
            sink,
            phase: TurnPhase::Setup,
            phase_clock: Duration::ZERO,
            enemies_acted: false,
            started: false,
            events: Vec::new(),
        })
    }

    /// Begins a run on level 1 with the configured starting food.
    pub fn start(&mut self) -> Result<(), TurnError> {
        info!("{}", query::welcome_banner(&self.world));
        self.load_level(1, self.config.player.starting_food)
    }

    /// Begins a fresh run, typically after the game ended.
    pub fn restart(&mut self) -> Result<(), TurnError> {
        self.start()
    }

    /// Discards the current level and lays out `level`, keeping the player's
    /// current food.
    ///
    /// A finished run has no food left to carry, so this is rejected with
    /// [`TurnError::RunOver`] once the game is over; use
    /// [`TurnController::restart`] instead. On failure the previous level stays
    /// installed and the phase is unchanged.
    pub fn reset_level(&mut self, level: u32) -> Result<(), TurnError> {
        if self.phase == TurnPhase::GameOver {
            return Err(TurnError::RunOver);
        }
        let food = query::player_food(&self.world);
        self.load_level(level, food)
    }

    /// Current phase of the state machine.
    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Level currently installed, or zero before the run started.
    #[must_use]
    pub fn level(&self) -> u32 {
        query::level(&self.world)
    }

    /// Read-only access to the world for rendering and queries.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Shared access to the injected presentation sink.
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Exclusive access to the injected presentation sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consumes the controller, returning the presentation sink.
    #[must_use]
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Status text for the current phase.
    #[must_use]
    pub fn status_line(&self) -> String {
        let level = self.level();
        match self.phase {
            TurnPhase::Setup => format!("Day {level}"),
            TurnPhase::GameOver => format!("After {level} days, you starved."),
            TurnPhase::PlayerTurn | TurnPhase::EnemyTurn | TurnPhase::LevelComplete => {
                format!("Food: {}", query::player_food(&self.world))
            }
        }
    }

    /// Takes the player's turn with the provided input.
    ///
    /// Input is only accepted during [`TurnPhase::PlayerTurn`] once every
    /// actor has settled; anything else, including `None`, is ignored.
    pub fn submit_input(&mut self, input: Option<Direction>) -> Result<InputOutcome, TurnError> {
        let Some(direction) = input else {
            return Ok(InputOutcome::Ignored);
        };
        if !self.started
            || self.phase != TurnPhase::PlayerTurn
            || !query::is_settled(&self.world)
        {
            debug!("ignoring {direction:?} during {:?}", self.phase);
            return Ok(InputOutcome::Ignored);
        }

        self.execute(Command::SpendFood { amount: MOVE_COST })?;
        let (dx, dy) = direction.delta();
        self.events.clear();
        let outcome = world::movement::attempt_move(
            &mut self.world,
            ActorId::Player,
            dx,
            dy,
            &mut self.events,
        )?;
        self.dispatch_events();

        if !query::player_alive(&self.world) {
            self.enter_game_over();
        } else if query::exit_reached(&self.world) {
            info!("level {} complete", self.level());
            self.sink.on_level_complete(self.level());
            self.enter(TurnPhase::LevelComplete);
        } else {
            self.enter(TurnPhase::EnemyTurn);
        }

        Ok(InputOutcome::Resolved(outcome))
    }

    /// Advances simulated time by `dt`, progressing any timed transitions.
    ///
    /// A single call keeps stepping the state machine until it has to wait,
    /// so zero delays resolve whole enemy phases and level transitions at
    /// once. Nothing happens after the game is over.
    pub fn advance(&mut self, dt: Duration) -> Result<(), TurnError> {
        if !self.started || self.phase == TurnPhase::GameOver {
            return Ok(());
        }

        self.execute(Command::Tick { dt })?;
        self.phase_clock = self.phase_clock.saturating_add(dt);

        while self.step()? {}
        Ok(())
    }

    fn step(&mut self) -> Result<bool, TurnError> {
        match self.phase {
            TurnPhase::Setup => {
                if self.phase_clock < self.config.pacing.level_start_delay() {
                    return Ok(false);
                }
                self.enter(TurnPhase::PlayerTurn);
                Ok(true)
            }
            TurnPhase::PlayerTurn | TurnPhase::GameOver => Ok(false),
            TurnPhase::EnemyTurn => {
                if !query::is_settled(&self.world) {
                    return Ok(false);
                }
                if self.enemies_acted {
                    self.enter(TurnPhase::PlayerTurn);
                    return Ok(true);
                }
                if self.phase_clock < self.config.pacing.turn_delay() {
                    return Ok(false);
                }
                self.run_enemies()?;
                Ok(true)
            }
            TurnPhase::LevelComplete => {
                if self.phase_clock < self.config.pacing.restart_delay() {
                    return Ok(false);
                }
                let next = self.level().saturating_add(1);
                self.reset_level(next)?;
                Ok(true)
            }
        }
    }

    fn run_enemies(&mut self) -> Result<(), TurnError> {
        let mut commands = Vec::new();
        self.brain.handle(
            &query::enemy_view(&self.world),
            query::player_cell(&self.world),
            &mut commands,
        );

        for command in commands {
            self.execute(command)?;
        }
        self.enemies_acted = true;

        if !query::player_alive(&self.world) {
            self.enter_game_over();
        }
        Ok(())
    }

    fn load_level(&mut self, level: u32, food: i32) -> Result<(), TurnError> {
        let layout = self.generator.generate(level)?;
        self.execute(Command::LoadLevel { layout, food })?;
        self.started = true;
        info!("Day {level}");
        self.enter(TurnPhase::Setup);
        Ok(())
    }

    fn execute(&mut self, command: Command) -> Result<(), TurnError> {
        self.events.clear();
        world::apply(&mut self.world, command, &mut self.events)?;
        self.dispatch_events();
        Ok(())
    }

    fn dispatch_events(&mut self) {
        for event in self.events.drain(..) {
            match event {
                Event::BoardGenerated { layout } => self.sink.on_board_generated(&layout),
                Event::ActorMoved {
                    actor, from, to, ..
                } => self.sink.on_actor_moved(actor, from, to),
                Event::ObstacleDamaged { cell, remaining } => {
                    self.sink.on_obstacle_damaged(cell, remaining);
                }
                Event::ObstacleDestroyed { cell } => self.sink.on_obstacle_destroyed(cell),
                Event::ConsumablePicked { cell, kind, total } => {
                    self.sink.on_consumable_picked(cell, kind, total);
                }
                Event::PlayerHit { amount, total, .. } => self.sink.on_player_hit(amount, total),
                Event::FoodSpent { amount, total } => self.sink.on_food_spent(amount, total),
                Event::TimeAdvanced { .. }
                | Event::MoveBlocked { .. }
                | Event::ExitReached { .. } => {}
            }
        }
    }

    fn enter_game_over(&mut self) {
        info!("player starved on level {}", self.level());
        self.sink.on_game_over(self.level());
        self.enter(TurnPhase::GameOver);
    }

    fn enter(&mut self, phase: TurnPhase) {
        debug!("{:?} -> {:?}", self.phase, phase);
        self.phase = phase;
        self.phase_clock = Duration::ZERO;
        self.enemies_acted = false;
    }
}
