/// Direction the snake can travel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Returns the pixel delta (dx, dy) of one step in this direction
    pub fn delta(&self, cell_size: i32) -> (i32, i32) {
        match self {
            Direction::Up => (0, -cell_size),
            Direction::Down => (0, cell_size),
            Direction::Left => (-cell_size, 0),
            Direction::Right => (cell_size, 0),
        }
    }
}

/// Action a player can request from the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Travel in a specific direction
    Move(Direction),
    /// Stop the movement timer
    Pause,
    /// Continue in the committed direction
    Resume,
}
