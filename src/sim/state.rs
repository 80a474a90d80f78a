//! Game state and core simulation types
//!
//! The whole match lives in one [`GameState`] value that the tick function
//! owns for the duration of a frame.

use std::cmp::Ordering;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geom::{Body, Side};
use crate::settings::Settings;

/// One of the two players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// Left paddle (W/S)
    One,
    /// Right paddle (Up/Down)
    Two,
}

impl Player {
    pub const fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// 1-based player number for display
    pub const fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    const fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }
}

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the confirm key
    Idle,
    /// Countdown to the first serve
    Starting { ticks: u32 },
    /// Ball in play
    Playing,
    /// A point was just scored; countdown to the next serve
    RoundEnd { ticks: u32 },
}

/// Something the surrounding game layer may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Confirm pressed, countdown running
    MatchStarting,
    /// Countdown finished, scores reset, first serve
    MatchStarted,
    PaddleHit { player: Player, side: Side },
    /// Ball bounced off the floor or ceiling
    WallBounce { side: Side },
    /// Ball left the arena horizontally
    PointScored { scorer: Player, score: (u32, u32) },
    /// Positions reset and the ball served again after a point
    RoundRestarted,
    MatchOver { winner: Player },
}

/// The ball: a square of fixed size with a per-frame velocity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Top-left corner
    pub pos: Vec2,
    /// Displacement per frame
    pub vel: Vec2,
    pub size: f32,
}

impl Ball {
    pub fn new(pos: Vec2, size: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
        }
    }

    /// Move by one full frame of velocity
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }
}

impl Body for Ball {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn size(&self) -> Vec2 {
        Vec2::splat(self.size)
    }
}

/// A player's paddle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub player: Player,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub score: u32,
}

impl Paddle {
    pub fn new(player: Player, pos: Vec2, size: Vec2) -> Self {
        Self {
            player,
            pos,
            size,
            score: 0,
        }
    }

    /// Apply held movement keys for one frame, staying inside the arena
    ///
    /// Returns the direction the paddle actually moved: -1 up, 1 down, 0 if
    /// it stayed put (no keys, both keys, or pinned against the arena edge).
    pub fn steer(&mut self, up: bool, down: bool, speed: f32, arena_height: f32) -> i8 {
        let start = self.pos.y;
        if up {
            self.pos.y = (self.pos.y - speed).max(0.0);
        }
        if down {
            self.pos.y = (self.pos.y + speed).min(arena_height - self.size.y);
        }
        match self.pos.y.partial_cmp(&start) {
            Some(Ordering::Less) => -1,
            Some(Ordering::Greater) => 1,
            _ => 0,
        }
    }
}

impl Body for Paddle {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn size(&self) -> Vec2 {
        self.size
    }
}

/// Complete match state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the serve RNG was created from
    pub seed: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub ball: Ball,
    /// Player 1 then player 2
    pub paddles: [Paddle; 2],
    pub settings: Settings,
    /// Events raised since the last [`GameState::drain_events`]
    pub events: Vec<GameEvent>,
    rng: Pcg32,
}

impl GameState {
    /// Create an idle match with bodies at their starting positions
    pub fn new(seed: u64, settings: Settings) -> Self {
        let paddle_size = settings.paddle_size();
        Self {
            seed,
            time_ticks: 0,
            phase: GamePhase::Idle,
            ball: Ball::new(settings.ball_start, settings.ball_size),
            paddles: [
                Paddle::new(Player::One, settings.paddle_starts[0], paddle_size),
                Paddle::new(Player::Two, settings.paddle_starts[1], paddle_size),
            ],
            settings,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn paddle(&self, player: Player) -> &Paddle {
        &self.paddles[player.index()]
    }

    pub fn paddle_mut(&mut self, player: Player) -> &mut Paddle {
        &mut self.paddles[player.index()]
    }

    /// (player 1, player 2)
    pub fn scores(&self) -> (u32, u32) {
        (self.paddles[0].score, self.paddles[1].score)
    }

    /// The player whose paddle the ball is travelling toward
    pub fn heading(&self) -> Player {
        if self.ball.vel.x >= 0.0 {
            Player::Two
        } else {
            Player::One
        }
    }

    /// First player at or past the winning score (player 1 wins ties)
    pub fn winner(&self) -> Option<Player> {
        let (p1, p2) = self.scores();
        let target = self.settings.win_score;
        if p1.max(p2) < target {
            None
        } else if p1 >= p2 {
            Some(Player::One)
        } else {
            Some(Player::Two)
        }
    }

    /// Put the ball and both paddles back at their starting positions
    pub fn reset_positions(&mut self) {
        self.ball.pos = self.settings.ball_start;
        for paddle in &mut self.paddles {
            paddle.pos = self.settings.paddle_starts[paddle.player.index()];
        }
    }

    /// Give the ball a random serve velocity
    ///
    /// Horizontal direction is a coin flip; vertical speed is `serve_dy`
    /// scaled by a random factor in (-0.9, 1.1).
    pub fn serve(&mut self) {
        let mut vel = Vec2::new(self.settings.ball_speed, self.settings.serve_dy);
        if self.rng.random_bool(0.5) {
            vel.x = -vel.x;
        }
        let sign = if self.rng.random_bool(0.5) { -1.0 } else { 1.0 };
        vel.y *= self.rng.random::<f32>() * sign + 0.1;
        self.ball.vel = vel;
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events raised so far
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
