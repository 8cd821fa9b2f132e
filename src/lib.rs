//! Grid Snake - a timer-driven snake game on a pixel grid
//!
//! This library provides:
//! - Core game logic: store, movement scheduler, tick evaluation (game module)
//! - A terminal canvas and ratatui renderer (render module)
//! - Keyboard mapping (input module)
//! - Session statistics (metrics module)
//! - The interactive tokio play loop (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
