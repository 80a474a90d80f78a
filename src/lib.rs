//! Swept Pong - a two-player Pong with continuous collision detection
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (geometry, swept collisions, match state)
//! - `renderer`: Vertex generation for whatever draws the frame
//! - `settings`: Physics tuning, loadable from JSON

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
///
/// The physics is tuned for one simulation step per displayed frame, so all
/// speeds below are in pixels per frame.
pub mod consts {
    /// Display refresh rate the physics is tuned for (vsync-locked)
    pub const FRAME_RATE: u32 = 60;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Starting positions (top-left corners)
    pub const P1_START_X: f32 = 75.0;
    pub const P1_START_Y: f32 = 250.0;
    pub const P2_START_X: f32 = 700.0;
    pub const P2_START_Y: f32 = 250.0;
    pub const BALL_START_X: f32 = 390.0;
    pub const BALL_START_Y: f32 = 290.0;

    /// Body extents
    pub const BALL_SIZE: f32 = 20.0;
    pub const PADDLE_WIDTH: f32 = 25.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;

    /// Horizontal serve speed
    pub const BALL_SPEED: f32 = 5.0;
    /// Vertical serve speed before the random factor is applied
    pub const SERVE_DY: f32 = 3.0;
    pub const PADDLE_SPEED: f32 = 8.0;

    /// Horizontal speed gained on every paddle return
    pub const PADDLE_ACCEL: f32 = 0.5;
    /// Offset from paddle center is divided by this to get the added spin
    pub const SPIN_DIVISOR: f32 = 5.0;
    /// |vy| may never exceed this multiple of |vx| after a paddle hit
    pub const MAX_SLOPE: f32 = 3.0;
    /// Gap left between the ball and the floor/ceiling after a bounce
    pub const WALL_EPSILON: f32 = 0.1;

    /// Points needed to win a match
    pub const WIN_SCORE: u32 = 9;
    /// Countdown after the confirm key before the first serve
    pub const START_DELAY_SECS: f32 = 3.0;
    /// Pause between a point and the next serve
    pub const ROUND_DELAY_SECS: f32 = 1.0;
}
