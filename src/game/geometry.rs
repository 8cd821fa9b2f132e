//! Grid geometry: random placement and collision predicates
//!
//! All functions work in surface units. A board of `width × height` with a
//! given `cell_size` has `width / cell_size` columns and `height / cell_size`
//! rows; a trailing strip narrower than one cell is never used.

use std::collections::HashSet;

use super::action::Direction;
use super::error::{GameError, GameResult};
use super::rng::GameRng;
use super::state::{Cell, Snake};

/// Length of a freshly spawned snake
pub const SPAWN_LENGTH: usize = 4;

/// Direction a freshly spawned snake faces (head on the right)
pub const SPAWN_HEADING: Direction = Direction::Right;

fn grid_dimensions(width: i32, height: i32, cell_size: i32) -> GameResult<(i32, i32)> {
    if cell_size <= 0 {
        return Err(GameError::InvalidConfiguration(format!(
            "cell size must be positive, got {cell_size}"
        )));
    }
    if width < cell_size || height < cell_size {
        return Err(GameError::InvalidConfiguration(format!(
            "board {width}x{height} cannot hold a single {cell_size} cell"
        )));
    }
    Ok((width / cell_size, height / cell_size))
}

/// Random cell fully inside the board
///
/// Column and row indices are drawn uniformly from `0..columns` and
/// `0..rows` and scaled by `cell_size`, so every grid cell is equally likely
/// and the edges are not under-represented.
pub fn random_cell(
    width: i32,
    height: i32,
    cell_size: i32,
    rng: &mut GameRng,
) -> GameResult<Cell> {
    let (columns, rows) = grid_dimensions(width, height, cell_size)?;
    Ok(Cell::new(
        rng.range(0..columns) * cell_size,
        rng.range(0..rows) * cell_size,
    ))
}

/// Random cell not present in `occupied`
///
/// Fails with [`GameError::BoardExhausted`] when `occupied` already covers
/// every cell of the grid.
pub fn random_free_cell(
    width: i32,
    height: i32,
    cell_size: i32,
    occupied: &HashSet<Cell>,
    rng: &mut GameRng,
) -> GameResult<Cell> {
    let (columns, rows) = grid_dimensions(width, height, cell_size)?;
    let on_grid = occupied
        .iter()
        .filter(|c| {
            c.x >= 0
                && c.y >= 0
                && c.x % cell_size == 0
                && c.y % cell_size == 0
                && c.x / cell_size < columns
                && c.y / cell_size < rows
        })
        .count();
    if on_grid as i64 >= columns as i64 * rows as i64 {
        return Err(GameError::BoardExhausted);
    }

    loop {
        let cell = random_cell(width, height, cell_size, rng)?;
        if !occupied.contains(&cell) {
            return Ok(cell);
        }
    }
}

/// Random horizontal spawn snake, head on the right, one cell of margin
/// from every edge, with no cell equal to `avoid`
///
/// The tail anchor is drawn uniformly and redrawn while the snake would
/// cover `avoid`. At most `SPAWN_LENGTH` anchors can cover one cell, so the
/// blocked anchors are counted up front and a board where every anchor is
/// blocked fails instead of looping.
pub fn random_snake(
    width: i32,
    height: i32,
    cell_size: i32,
    avoid: Option<Cell>,
    rng: &mut GameRng,
) -> GameResult<Snake> {
    let (columns, rows) = grid_dimensions(width, height, cell_size)?;
    let span = SPAWN_LENGTH as i32;
    // margin + snake + margin horizontally, margin + row + margin vertically
    if columns < span + 2 || rows < 3 {
        return Err(GameError::InvalidConfiguration(format!(
            "board of {columns}x{rows} cells is too small to spawn a snake"
        )));
    }

    let anchor_columns = 1..=columns - span - 1;
    let anchor_rows = 1..=rows - 2;
    let covers = |column: i32, row: i32| match avoid {
        Some(avoid) => {
            avoid.y == row * cell_size
                && avoid.x >= column * cell_size
                && avoid.x < (column + span) * cell_size
        }
        None => false,
    };

    let blocked = match avoid {
        Some(avoid) => {
            let row = avoid.y.div_euclid(cell_size);
            let last = avoid.x.div_euclid(cell_size);
            if anchor_rows.contains(&row) {
                (last - span + 1..=last)
                    .filter(|column| anchor_columns.contains(column) && covers(*column, row))
                    .count() as i64
            } else {
                0
            }
        }
        None => 0,
    };
    let anchors = (rows - 2) as i64 * (columns - span - 1) as i64;
    if blocked >= anchors {
        return Err(GameError::BoardExhausted);
    }

    loop {
        let column = rng.range(anchor_columns.clone());
        let row = rng.range(anchor_rows.clone());
        if !covers(column, row) {
            let anchor = Cell::new(column * cell_size, row * cell_size);
            return Ok(Snake::horizontal(anchor, cell_size, SPAWN_LENGTH));
        }
    }
}

/// True iff the snake crosses itself: the head sits on a body cell, or any
/// cell is occupied twice
pub fn has_self_collision(snake: &Snake) -> bool {
    let mut seen = HashSet::with_capacity(snake.len());
    snake.cells().iter().any(|cell| !seen.insert(*cell))
}

/// True iff the head cannot continue in `direction` without leaving the
/// board on that axis
///
/// Toward the low edges the check looks one cell ahead of `head`; toward the
/// high edges it checks whether the head cell already overruns the edge.
pub fn has_boundary_collision(
    head: Cell,
    direction: Direction,
    width: i32,
    height: i32,
    cell_size: i32,
) -> bool {
    match direction {
        Direction::Up => head.y - cell_size < 0,
        Direction::Down => head.y + cell_size > height,
        Direction::Left => head.x - cell_size < 0,
        Direction::Right => head.x + cell_size > width,
    }
}
