use std::fmt;

/// A grid-aligned position on the drawing surface
///
/// Coordinates are in surface units (pixels); a cell occupies
/// `[x, x + cell_size) × [y, y + cell_size)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move cell by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Board extent in surface units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    pub width: i32,
    pub height: i32,
    pub cell_size: i32,
}

impl Board {
    pub fn columns(&self) -> i32 {
        self.width / self.cell_size
    }

    pub fn rows(&self) -> i32 {
        self.height / self.cell_size
    }
}

/// The snake's body, head first
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snake {
    body: Vec<Cell>,
}

impl Snake {
    pub fn new(body: Vec<Cell>) -> Self {
        Self { body }
    }

    /// Snake laid out horizontally with its tail at `tail` and head to the right
    pub fn horizontal(tail: Cell, cell_size: i32, length: usize) -> Self {
        let body = (0..length as i32)
            .rev()
            .map(|i| tail.moved_by(i * cell_size, 0))
            .collect();
        Self { body }
    }

    /// Get the head position; `None` for an empty snake
    pub fn head(&self) -> Option<Cell> {
        self.body.first().copied()
    }

    pub fn tail(&self) -> Option<Cell> {
        self.body.last().copied()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.body
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Translate the snake one step: new head in front, tail dropped
    pub(crate) fn advance(&mut self, dx: i32, dy: i32) {
        let Some(head) = self.head() else {
            return;
        };
        let new_head = head.moved_by(dx, dy);
        self.body.insert(0, new_head);
        self.body.pop();
    }

    /// Copy of the snake one cell longer, the new cell collinear with the
    /// tail's last segment
    ///
    /// A single-cell snake has no segment to follow and repeats its tail.
    pub fn extended(&self) -> Snake {
        let mut body = self.body.clone();
        let n = body.len();
        let new_tail = match n {
            0 => return Snake { body },
            1 => body[0],
            _ => {
                let last = body[n - 1];
                let before = body[n - 2];
                last.moved_by(last.x - before.x, last.y - before.y)
            }
        };
        body.push(new_tail);
        Snake { body }
    }
}

/// Type of collision that ended a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit the board edge
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Status of a session as shown to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Paused,
    Playing,
    GameOver,
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GameStatus::Paused => "Paused",
            GameStatus::Playing => "Playing",
            GameStatus::GameOver => "Game Over",
        };
        f.write_str(label)
    }
}
