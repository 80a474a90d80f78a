//! Physics tuning
//!
//! Every constant the simulation reads lives here so a match can be replayed
//! with different tuning. Missing fields in a JSON file fall back to the
//! defaults in [`crate::consts`].

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Game settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,

    // === Bodies ===
    pub ball_size: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Top-left corner of the ball at every serve
    pub ball_start: Vec2,
    /// Top-left corners of player 1 and player 2 paddles at every serve
    pub paddle_starts: [Vec2; 2],

    // === Speeds (per frame) ===
    pub ball_speed: f32,
    pub serve_dy: f32,
    pub paddle_speed: f32,

    // === Paddle response ===
    pub paddle_accel: f32,
    pub spin_divisor: f32,
    pub max_slope: f32,
    pub wall_epsilon: f32,

    // === Match flow ===
    pub win_score: u32,
    pub frame_rate: u32,
    pub start_delay_secs: f32,
    pub round_delay_secs: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,

            ball_size: BALL_SIZE,
            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            ball_start: Vec2::new(BALL_START_X, BALL_START_Y),
            paddle_starts: [
                Vec2::new(P1_START_X, P1_START_Y),
                Vec2::new(P2_START_X, P2_START_Y),
            ],

            ball_speed: BALL_SPEED,
            serve_dy: SERVE_DY,
            paddle_speed: PADDLE_SPEED,

            paddle_accel: PADDLE_ACCEL,
            spin_divisor: SPIN_DIVISOR,
            max_slope: MAX_SLOPE,
            wall_epsilon: WALL_EPSILON,

            win_score: WIN_SCORE,
            frame_rate: FRAME_RATE,
            start_delay_secs: START_DELAY_SECS,
            round_delay_secs: ROUND_DELAY_SECS,
        }
    }
}

impl Settings {
    /// Arena extents as a vector (width, height)
    pub fn arena(&self) -> Vec2 {
        Vec2::new(self.arena_width, self.arena_height)
    }

    pub fn paddle_size(&self) -> Vec2 {
        Vec2::new(self.paddle_width, self.paddle_height)
    }

    /// Countdown before the first serve, in simulation ticks
    pub fn start_delay_ticks(&self) -> u32 {
        self.secs_to_ticks(self.start_delay_secs)
    }

    /// Pause between a point and the next serve, in simulation ticks
    pub fn round_delay_ticks(&self) -> u32 {
        self.secs_to_ticks(self.round_delay_secs)
    }

    fn secs_to_ticks(&self, secs: f32) -> u32 {
        (secs.max(0.0) * self.frame_rate as f32).round() as u32
    }

    /// Check that the values describe a playable match
    pub fn validate(&self) -> Result<(), String> {
        let positive = [
            ("arena_width", self.arena_width),
            ("arena_height", self.arena_height),
            ("ball_size", self.ball_size),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(format!("{name} must be positive, got {value}"));
            }
        }

        let non_negative = [
            ("ball_speed", self.ball_speed),
            ("paddle_speed", self.paddle_speed),
            ("max_slope", self.max_slope),
            ("wall_epsilon", self.wall_epsilon),
            ("start_delay_secs", self.start_delay_secs),
            ("round_delay_secs", self.round_delay_secs),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(format!("{name} must not be negative, got {value}"));
            }
        }

        if !self.serve_dy.is_finite() || !self.paddle_accel.is_finite() {
            return Err("serve_dy and paddle_accel must be finite".into());
        }
        if !(self.spin_divisor.is_finite() && self.spin_divisor != 0.0) {
            return Err(format!("spin_divisor must be non-zero, got {}", self.spin_divisor));
        }
        if self.frame_rate == 0 {
            return Err("frame_rate must be at least 1".into());
        }
        if self.win_score == 0 {
            return Err("win_score must be at least 1".into());
        }
        if self.paddle_height > self.arena_height {
            return Err("paddle_height must fit inside the arena".into());
        }
        Ok(())
    }

    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        use serde::de::Error as _;

        let settings: Self = serde_json::from_str(json)?;
        settings.validate().map_err(serde_json::Error::custom)?;
        Ok(settings)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {e} - using defaults", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read {}: {e} - using defaults", path.display());
                Self::default()
            }
        }
    }
}
