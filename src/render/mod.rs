//! Terminal rendering of the board

pub mod canvas;
pub mod renderer;

pub use canvas::{BoardCanvas, Paint};
pub use renderer::Renderer;
