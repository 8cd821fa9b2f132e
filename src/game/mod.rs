//! Game simulation core
//!
//! Everything here is pure state and transitions: no terminal, no clock, no
//! I/O. The play mode drives it with real timers and draws it through
//! [`RenderSink`].

pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod geometry;
pub mod rng;
pub mod scheduler;
pub mod sink;
pub mod speed;
pub mod state;
pub mod store;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::GameConfig;
pub use engine::GameEngine;
pub use error::{GameError, GameResult};
pub use evaluator::TickOutcome;
pub use geometry::{
    has_boundary_collision, has_self_collision, random_cell, random_free_cell, random_snake,
};
pub use rng::GameRng;
pub use scheduler::{IntentOutcome, MovementScheduler, RejectReason, SchedulerState, TimerHandle};
pub use sink::{RenderSink, Rgb};
pub use speed::{tick_interval, SpeedController};
pub use state::{Board, Cell, CollisionType, GameStatus, Snake};
pub use store::{GameStore, StoreAction, StoreSnapshot};
