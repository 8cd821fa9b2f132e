//! Game state store: snake, direction and score behind a closed set of
//! transitions

use super::action::Direction;
use super::error::GameResult;
use super::state::{Cell, Snake};

/// A transition the store knows how to apply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreAction {
    /// Replace the snake and clear the direction; score is untouched
    Reset(Snake),
    ResetScore,
    /// Translate the snake by one step
    Advance { dx: i32, dy: i32 },
    /// Replace the snake with a strictly longer one
    Grow(Snake),
    IncrementScore,
    /// Record the direction the snake must not be turned into
    SetForbiddenDirection(Option<Direction>),
}

/// Immutable view of the store after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSnapshot {
    pub snake: Snake,
    pub travel_direction: Option<Direction>,
    pub score: u32,
}

impl StoreSnapshot {
    pub fn forbidden_direction(&self) -> Option<Direction> {
        self.travel_direction.map(|d| d.opposite())
    }
}

/// Owner of the snake, its travel direction and the score
///
/// The forbidden direction is not stored; it is always the opposite of the
/// travel direction.
#[derive(Debug, Clone, Default)]
pub struct GameStore {
    snake: Snake,
    travel_direction: Option<Direction>,
    score: u32,
}

impl GameStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one transition and return the resulting state
    pub fn dispatch(&mut self, action: StoreAction) -> StoreSnapshot {
        match action {
            StoreAction::Reset(snake) => self.reset(snake),
            StoreAction::ResetScore => self.reset_score(),
            StoreAction::Advance { dx, dy } => self.advance(dx, dy),
            StoreAction::Grow(snake) => {
                self.grow(snake);
            }
            StoreAction::IncrementScore => self.increment_score(),
            StoreAction::SetForbiddenDirection(direction) => {
                self.set_forbidden_direction(direction)
            }
        }
        self.snapshot()
    }

    pub fn reset(&mut self, snake: Snake) {
        self.snake = snake;
        self.travel_direction = None;
    }

    pub fn reset_score(&mut self) {
        self.score = 0;
    }

    /// New head at (head.x + dx, head.y + dy), tail dropped
    pub fn advance(&mut self, dx: i32, dy: i32) {
        self.snake.advance(dx, dy);
    }

    /// Replace the snake with `snake` if it is strictly longer
    ///
    /// Returns false and leaves the store untouched otherwise.
    pub fn grow(&mut self, snake: Snake) -> bool {
        if snake.len() <= self.snake.len() {
            return false;
        }
        self.snake = snake;
        true
    }

    pub fn increment_score(&mut self) {
        self.score = self.score.saturating_add(1);
    }

    pub fn set_forbidden_direction(&mut self, direction: Option<Direction>) {
        self.travel_direction = direction.map(|d| d.opposite());
    }

    /// Fill an empty snake from `spawn` before anything else touches it
    pub fn ensure_snake<F>(&mut self, spawn: F) -> GameResult<()>
    where
        F: FnOnce() -> GameResult<Snake>,
    {
        if self.snake.is_empty() {
            self.snake = spawn()?;
        }
        Ok(())
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn head(&self) -> Option<Cell> {
        self.snake.head()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn travel_direction(&self) -> Option<Direction> {
        self.travel_direction
    }

    pub fn forbidden_direction(&self) -> Option<Direction> {
        self.travel_direction.map(|d| d.opposite())
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            snake: self.snake.clone(),
            travel_direction: self.travel_direction,
            score: self.score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::error::GameError;

    fn spawned() -> GameStore {
        let mut store = GameStore::new();
        store.reset(Snake::horizontal(Cell::new(20, 20), 20, 4));
        store
    }

    #[test]
    fn test_advance_preserves_length() {
        let mut store = spawned();
        for _ in 0..5 {
            let snapshot = store.dispatch(StoreAction::Advance { dx: 20, dy: 0 });
            assert_eq!(snapshot.snake.len(), 4);
        }
        assert_eq!(store.head(), Some(Cell::new(180, 20)));
    }

    #[test]
    fn test_grow_adds_exactly_one() {
        let mut store = spawned();
        let longer = store.snake().extended();
        let snapshot = store.dispatch(StoreAction::Grow(longer));
        assert_eq!(snapshot.snake.len(), 5);
    }

    #[test]
    fn test_grow_refuses_shorter_snake() {
        let mut store = spawned();
        let before = store.snapshot();
        assert!(!store.grow(Snake::horizontal(Cell::new(0, 0), 20, 4)));
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_forbidden_direction_is_opposite_of_travel() {
        let mut store = spawned();
        assert_eq!(store.forbidden_direction(), None);

        let snapshot = store.dispatch(StoreAction::SetForbiddenDirection(Some(Direction::Left)));
        assert_eq!(snapshot.travel_direction, Some(Direction::Right));
        assert_eq!(snapshot.forbidden_direction(), Some(Direction::Left));
        assert_eq!(store.forbidden_direction(), Some(Direction::Left));
    }

    #[test]
    fn test_reset_clears_direction_but_not_score() {
        let mut store = spawned();
        store.set_forbidden_direction(Some(Direction::Up));
        store.increment_score();

        store.dispatch(StoreAction::Reset(Snake::horizontal(Cell::new(40, 40), 20, 4)));
        assert_eq!(store.forbidden_direction(), None);
        assert_eq!(store.score(), 1);

        let snapshot = store.dispatch(StoreAction::ResetScore);
        assert_eq!(snapshot.score, 0);
    }

    #[test]
    fn test_score_bookkeeping() {
        let mut store = spawned();
        store.dispatch(StoreAction::IncrementScore);
        let snapshot = store.dispatch(StoreAction::IncrementScore);
        assert_eq!(snapshot.score, 2);
    }

    #[test]
    fn test_ensure_snake_heals_empty_store() {
        let mut store = GameStore::new();
        assert_eq!(store.head(), None);

        store
            .ensure_snake(|| Ok(Snake::horizontal(Cell::new(20, 20), 20, 4)))
            .unwrap();
        assert_eq!(store.snake().len(), 4);

        // A populated store keeps its snake
        store
            .ensure_snake(|| Err(GameError::BoardExhausted))
            .unwrap();
        assert_eq!(store.head(), Some(Cell::new(80, 20)));
    }
}
