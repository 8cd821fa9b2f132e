//! Per-tick movement, collision and food consumption

use std::collections::HashSet;

use super::action::Direction;
use super::error::GameResult;
use super::geometry::{has_boundary_collision, has_self_collision, random_free_cell};
use super::rng::GameRng;
use super::state::{Board, Cell, CollisionType};
use super::store::GameStore;

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No timer was running
    Skipped,
    /// Ordinary step
    Moved,
    /// The snake ate and grew; `score` is the new score
    Ate { score: u32 },
    /// The game is over
    Collided(CollisionType),
}

impl TickOutcome {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TickOutcome::Collided(_))
    }
}

/// Move the snake one cell in `direction` and evaluate the result
///
/// The boundary is checked against the head before it moves, in the same
/// direction the move uses, and the next head must stay on the board. A wall
/// hit leaves the snake where it is.
pub fn run_tick(
    store: &mut GameStore,
    food: &mut Cell,
    direction: Direction,
    board: Board,
    rng: &mut GameRng,
) -> GameResult<TickOutcome> {
    let Some(head) = store.head() else {
        return Ok(TickOutcome::Skipped);
    };
    let (dx, dy) = direction.delta(board.cell_size);
    if has_boundary_collision(head, direction, board.width, board.height, board.cell_size)
        || !on_board(head.moved_by(dx, dy), board)
    {
        return Ok(TickOutcome::Collided(CollisionType::Wall));
    }

    store.advance(dx, dy);
    evaluate(store, food, board, rng)
}

fn on_board(cell: Cell, board: Board) -> bool {
    (0..board.width).contains(&cell.x) && (0..board.height).contains(&cell.y)
}

/// Inspect the post-move state: self collision, then food
///
/// On a grab the next food cell is chosen before the grown snake is
/// committed, so a full board leaves snake, score and food untouched.
pub fn evaluate(
    store: &mut GameStore,
    food: &mut Cell,
    board: Board,
    rng: &mut GameRng,
) -> GameResult<TickOutcome> {
    if has_self_collision(store.snake()) {
        return Ok(TickOutcome::Collided(CollisionType::SelfCollision));
    }
    if store.head() != Some(*food) {
        return Ok(TickOutcome::Moved);
    }

    let grown = store.snake().extended();
    let occupied: HashSet<Cell> = grown.cells().iter().copied().collect();
    let next_food = random_free_cell(board.width, board.height, board.cell_size, &occupied, rng)?;

    store.grow(grown);
    store.increment_score();
    *food = next_food;
    Ok(TickOutcome::Ate {
        score: store.score(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::error::GameError;
    use crate::game::state::Snake;

    const BOARD: Board = Board {
        width: 200,
        height: 200,
        cell_size: 20,
    };

    fn store_with(snake: Snake) -> GameStore {
        let mut store = GameStore::new();
        store.reset(snake);
        store
    }

    #[test]
    fn test_plain_move() {
        let mut store = store_with(Snake::horizontal(Cell::new(20, 20), 20, 4));
        let mut food = Cell::new(180, 180);
        let mut rng = GameRng::new(1);

        let outcome = run_tick(&mut store, &mut food, Direction::Right, BOARD, &mut rng).unwrap();
        assert_eq!(outcome, TickOutcome::Moved);
        assert_eq!(store.head(), Some(Cell::new(100, 20)));
        assert_eq!(store.snake().len(), 4);
        assert_eq!(food, Cell::new(180, 180));
    }

    #[test]
    fn test_eating_food_ahead() {
        let mut store = store_with(Snake::horizontal(Cell::new(20, 20), 20, 4));
        let mut food = Cell::new(100, 20);
        let mut rng = GameRng::new(2);

        let outcome = run_tick(&mut store, &mut food, Direction::Right, BOARD, &mut rng).unwrap();
        assert_eq!(outcome, TickOutcome::Ate { score: 1 });
        assert_eq!(store.snake().len(), 5);
        assert_eq!(store.score(), 1);
        assert_eq!(store.snake().tail(), Some(Cell::new(20, 20)));
        assert!(!store.snake().contains(food));
    }

    #[test]
    fn test_wall_stops_snake_in_place() {
        let mut store = store_with(Snake::horizontal(Cell::new(0, 0), 20, 4));
        store.set_forbidden_direction(Some(Direction::Down));
        let mut food = Cell::new(180, 180);
        let mut rng = GameRng::new(3);

        let outcome = run_tick(&mut store, &mut food, Direction::Up, BOARD, &mut rng).unwrap();
        assert_eq!(outcome, TickOutcome::Collided(CollisionType::Wall));
        assert_eq!(store.head(), Some(Cell::new(60, 0)));
    }

    #[test]
    fn test_every_edge_stops_snake_on_board() {
        // Head in the last column heading right
        let mut store = store_with(Snake::horizontal(Cell::new(120, 40), 20, 4));
        let mut food = Cell::new(0, 0);
        let mut rng = GameRng::new(6);
        let outcome = run_tick(&mut store, &mut food, Direction::Right, BOARD, &mut rng).unwrap();
        assert_eq!(outcome, TickOutcome::Collided(CollisionType::Wall));
        assert_eq!(store.head(), Some(Cell::new(180, 40)));

        // Head in the last row heading down
        let mut store = store_with(Snake::new(vec![
            Cell::new(40, 180),
            Cell::new(40, 160),
            Cell::new(40, 140),
            Cell::new(40, 120),
        ]));
        let outcome = run_tick(&mut store, &mut food, Direction::Down, BOARD, &mut rng).unwrap();
        assert_eq!(outcome, TickOutcome::Collided(CollisionType::Wall));
        assert_eq!(store.head(), Some(Cell::new(40, 180)));
    }

    #[test]
    fn test_self_collision_ends() {
        // Head at (40,40) moving up into (40,20), which is part of the body
        let snake = Snake::new(vec![
            Cell::new(40, 40),
            Cell::new(60, 40),
            Cell::new(60, 20),
            Cell::new(40, 20),
            Cell::new(20, 20),
        ]);
        let mut store = store_with(snake);
        let mut food = Cell::new(180, 180);
        let mut rng = GameRng::new(4);

        let outcome = run_tick(&mut store, &mut food, Direction::Up, BOARD, &mut rng).unwrap();
        assert_eq!(outcome, TickOutcome::Collided(CollisionType::SelfCollision));
        assert!(outcome.is_terminal());
    }

    #[test]
    fn test_full_board_keeps_state() {
        // 6x1 board: the grown snake would cover every cell
        let board = Board {
            width: 120,
            height: 20,
            cell_size: 20,
        };
        let mut store = store_with(Snake::horizontal(Cell::new(20, 0), 20, 5));
        let mut food = Cell::new(100, 0);
        let mut rng = GameRng::new(5);

        let result = evaluate(&mut store, &mut food, board, &mut rng);
        assert_eq!(result, Err(GameError::BoardExhausted));
        assert_eq!(store.snake().len(), 5);
        assert_eq!(store.score(), 0);
        assert_eq!(food, Cell::new(100, 0));
    }
}
