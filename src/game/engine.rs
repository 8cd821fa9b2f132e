use std::collections::HashSet;

use tracing::{debug, info, warn};

use super::{
    action::{Action, Direction},
    config::GameConfig,
    error::{GameError, GameResult},
    evaluator::{self, TickOutcome},
    geometry::{random_cell, random_free_cell, random_snake, SPAWN_HEADING},
    rng::GameRng,
    scheduler::{IntentOutcome, MovementScheduler, SchedulerState, TimerHandle},
    sink::{RenderSink, FOOD_COLOR, SNAKE_COLOR, STROKE_COLOR},
    speed::SpeedController,
    state::{Board, Cell, GameStatus, Snake},
    store::GameStore,
};

/// One game session: store, scheduler, food and randomness behind the
/// player-facing operations
pub struct GameEngine {
    config: GameConfig,
    board: Board,
    speed: SpeedController,
    store: GameStore,
    scheduler: MovementScheduler,
    food: Cell,
    rng: GameRng,
}

impl GameEngine {
    /// Create a new engine; the RNG comes from `config.seed` when present
    pub fn new(config: GameConfig) -> GameResult<Self> {
        let rng = config
            .seed
            .map(GameRng::new)
            .unwrap_or_else(GameRng::from_entropy);
        Self::with_rng(config, rng)
    }

    pub fn with_rng(config: GameConfig, mut rng: GameRng) -> GameResult<Self> {
        config.validate()?;
        let board = config.board();

        // Food first, then a snake spawned clear of it
        let food = random_cell(board.width, board.height, board.cell_size, &mut rng)?;
        let mut store = GameStore::new();
        store.ensure_snake(|| {
            random_snake(board.width, board.height, board.cell_size, Some(food), &mut rng)
        })?;

        info!(
            columns = config.columns,
            rows = config.rows,
            seed = rng.seed(),
            "new session"
        );

        Ok(Self {
            speed: SpeedController::new(&config),
            config,
            board,
            store,
            scheduler: MovementScheduler::new(),
            food,
            rng,
        })
    }

    pub fn apply(&mut self, action: Action) -> IntentOutcome {
        match action {
            Action::Move(direction) => self.request_direction(direction),
            Action::Pause => {
                if self.pause() {
                    IntentOutcome::Accepted
                } else {
                    IntentOutcome::Ignored
                }
            }
            Action::Resume => self.resume(),
        }
    }

    /// Ask the snake to travel in `direction`
    ///
    /// Before any travel direction is established the spawn orientation
    /// decides: the body lies to the left of the head, so Left is refused.
    pub fn request_direction(&mut self, direction: Direction) -> IntentOutcome {
        let forbidden = self
            .store
            .forbidden_direction()
            .or(Some(SPAWN_HEADING.opposite()));
        let interval_ms = self.tick_interval_ms();

        let outcome = self.scheduler.request(direction, forbidden, interval_ms);
        if outcome.is_accepted() {
            self.store.set_forbidden_direction(Some(direction.opposite()));
            debug!(?direction, interval_ms, "direction accepted");
        }
        outcome
    }

    /// Stop moving; returns false if nothing was running
    pub fn pause(&mut self) -> bool {
        let paused = self.scheduler.pause();
        if paused {
            debug!(score = self.store.score(), "paused");
        }
        paused
    }

    /// Continue in the committed direction, or make the first move
    pub fn resume(&mut self) -> IntentOutcome {
        if self.scheduler.is_ended() {
            return IntentOutcome::Ignored;
        }
        let direction = self.store.travel_direction().unwrap_or(SPAWN_HEADING);
        self.request_direction(direction)
    }

    pub fn toggle_pause(&mut self) -> IntentOutcome {
        if self.scheduler.is_running() {
            self.apply(Action::Pause)
        } else {
            self.resume()
        }
    }

    /// Fresh snake and food, score zero, timer stopped
    ///
    /// Nothing changes if a new snake or food cannot be placed.
    pub fn reset(&mut self) -> GameResult<()> {
        let (snake, food) = Self::spawn(self.board, &mut self.rng)?;
        self.commit_reset(snake, food);
        Ok(())
    }

    /// Switch to a new configuration and start over
    ///
    /// An invalid configuration leaves the running session untouched.
    pub fn reconfigure(&mut self, config: GameConfig) -> GameResult<()> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) if seed != self.rng.seed() => GameRng::new(seed),
            _ => self.rng.clone(),
        };
        let board = config.board();
        let (snake, food) = Self::spawn(board, &mut rng)?;

        info!(columns = config.columns, rows = config.rows, "reconfigured");
        self.speed = SpeedController::new(&config);
        self.config = config;
        self.board = board;
        self.rng = rng;
        self.commit_reset(snake, food);
        Ok(())
    }

    fn spawn(board: Board, rng: &mut GameRng) -> GameResult<(Snake, Cell)> {
        let snake = random_snake(board.width, board.height, board.cell_size, None, rng)?;
        let occupied: HashSet<Cell> = snake.cells().iter().copied().collect();
        let food = random_free_cell(board.width, board.height, board.cell_size, &occupied, rng)?;
        Ok((snake, food))
    }

    fn commit_reset(&mut self, snake: Snake, food: Cell) {
        self.scheduler.reset();
        self.store.reset(snake);
        self.store.reset_score();
        self.food = food;
        info!(food = %self.food, head = ?self.store.head(), "game reset");
    }

    /// Advance one tick of the running timer
    pub fn tick(&mut self) -> GameResult<TickOutcome> {
        let Some(direction) = self.scheduler.running_direction() else {
            return Ok(TickOutcome::Skipped);
        };

        let outcome = match evaluator::run_tick(
            &mut self.store,
            &mut self.food,
            direction,
            self.board,
            &mut self.rng,
        ) {
            Ok(outcome) => outcome,
            Err(err) => {
                if err == GameError::BoardExhausted {
                    warn!(score = self.store.score(), "no free cell left for food");
                }
                self.scheduler.end();
                return Err(err);
            }
        };

        match outcome {
            TickOutcome::Collided(kind) => {
                self.scheduler.end();
                info!(?kind, score = self.store.score(), "game over");
            }
            TickOutcome::Ate { score } => {
                let interval_ms = self.speed.interval_for(score);
                if self.scheduler.restart_at(interval_ms) {
                    info!(score, interval_ms, "speed up");
                }
            }
            TickOutcome::Moved | TickOutcome::Skipped => {}
        }
        Ok(outcome)
    }

    /// Paint the board: clear, snake, then food
    pub fn draw<S: RenderSink + ?Sized>(&self, sink: &mut S) {
        sink.clear(self.board.width, self.board.height);
        sink.draw_cells(
            self.store.snake().cells(),
            SNAKE_COLOR,
            self.board.cell_size,
            STROKE_COLOR,
        );
        sink.draw_cells(&[self.food], FOOD_COLOR, self.board.cell_size, STROKE_COLOR);
    }

    pub fn status(&self) -> GameStatus {
        match self.scheduler.state() {
            SchedulerState::Ended => GameStatus::GameOver,
            SchedulerState::Running { .. } => GameStatus::Playing,
            SchedulerState::Idle => GameStatus::Paused,
        }
    }

    pub fn score(&self) -> u32 {
        self.store.score()
    }

    /// Interval the timer runs at for the current score
    pub fn tick_interval_ms(&self) -> u64 {
        self.speed.interval_for(self.store.score())
    }

    pub fn timer(&self) -> Option<TimerHandle> {
        self.scheduler.timer()
    }

    pub fn snake(&self) -> &Snake {
        self.store.snake()
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    pub fn forbidden_direction(&self) -> Option<Direction> {
        self.store.forbidden_direction()
    }

    pub fn board(&self) -> Board {
        self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }
}
