use std::collections::HashMap;

use crate::game::{Cell, RenderSink, Rgb};

/// Paint applied to one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paint {
    pub fill: Rgb,
    pub stroke: Rgb,
}

/// Grid-backed drawing surface
///
/// Keeps the last frame the game drew, one paint per grid cell, for the
/// terminal renderer to read back. Cells that are off the surface or not
/// aligned to the grid are dropped.
#[derive(Debug, Clone)]
pub struct BoardCanvas {
    width: i32,
    height: i32,
    cell_size: i32,
    painted: HashMap<(i32, i32), Paint>,
}

impl BoardCanvas {
    pub fn new(cell_size: i32) -> Self {
        Self {
            width: 0,
            height: 0,
            cell_size: cell_size.max(1),
            painted: HashMap::new(),
        }
    }

    pub fn columns(&self) -> i32 {
        self.width / self.cell_size
    }

    pub fn rows(&self) -> i32 {
        self.height / self.cell_size
    }

    pub fn paint_at(&self, column: i32, row: i32) -> Option<Paint> {
        self.painted.get(&(column, row)).copied()
    }

    pub fn painted_cells(&self) -> usize {
        self.painted.len()
    }
}

impl RenderSink for BoardCanvas {
    fn clear(&mut self, width: i32, height: i32) {
        self.width = width.max(0);
        self.height = height.max(0);
        self.painted.clear();
    }

    fn draw_cells(&mut self, cells: &[Cell], fill: Rgb, cell_size: i32, stroke: Rgb) {
        if cell_size <= 0 {
            return;
        }
        self.cell_size = cell_size;
        let (columns, rows) = (self.columns(), self.rows());
        for cell in cells {
            if cell.x % cell_size != 0 || cell.y % cell_size != 0 {
                continue;
            }
            let (column, row) = (cell.x / cell_size, cell.y / cell_size);
            if (0..columns).contains(&column) && (0..rows).contains(&row) {
                self.painted.insert((column, row), Paint { fill, stroke });
            }
        }
    }
}
