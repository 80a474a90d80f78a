//! Frame-stepped simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per displayed frame, velocities in pixels per frame
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod geom;
pub mod state;
pub mod tick;

pub use collision::{
    CollisionResult, clamp_slope, paddle_response, resolve_paddle_collision,
    resolve_wall_collision,
};
pub use geom::{Body, Line, Point, Rect, Side};
pub use state::{Ball, GameEvent, GamePhase, GameState, Paddle, Player};
pub use tick::{TickInput, tick};
