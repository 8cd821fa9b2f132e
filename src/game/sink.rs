use super::state::Cell;

/// 24-bit color for the draw primitives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const SNAKE_COLOR: Rgb = Rgb(0x44, 0x6c, 0xeb);
pub const FOOD_COLOR: Rgb = Rgb(0x67, 0x6f, 0xa3);
pub const STROKE_COLOR: Rgb = Rgb(0x2f, 0x2b, 0x2b);

/// Drawing surface the game paints onto
pub trait RenderSink {
    /// Wipe the whole `width × height` surface
    fn clear(&mut self, width: i32, height: i32);

    /// Fill each cell as a `cell_size` square outlined with `stroke`
    fn draw_cells(&mut self, cells: &[Cell], fill: Rgb, cell_size: i32, stroke: Rgb);
}
