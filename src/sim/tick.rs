//! Per-frame simulation tick
//!
//! One call to [`tick`] is one displayed frame. The match state machine runs
//! here; while the ball is in play the frame integration step moves paddles,
//! resolves swept collisions and advances the ball.

use super::collision::{paddle_response, resolve_paddle_collision, resolve_wall_collision};
use super::geom::{Body, Side};
use super::state::{GameEvent, GamePhase, GameState, Player};

/// Key state sampled once per frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Player 1 up (W)
    pub p1_up: bool,
    /// Player 1 down (S)
    pub p1_down: bool,
    /// Player 2 up (Up arrow)
    pub p2_up: bool,
    /// Player 2 down (Down arrow)
    pub p2_down: bool,
    /// Start a match (Return)
    pub confirm: bool,
}

impl TickInput {
    /// Demo-mode input: both paddles chase the ball when it heads their way
    ///
    /// A dead zone around the paddle center keeps the paddles from jittering
    /// and lets fast, steep shots get past. Confirm is held so an idle match
    /// starts on its own.
    pub fn autopilot(state: &GameState) -> Self {
        const DEAD_ZONE: f32 = 20.0;

        let ball_y = state.ball.center().y;
        let heading = state.heading();
        let chase = |player: Player| {
            if player != heading {
                return (false, false);
            }
            let offset = ball_y - state.paddle(player).center().y;
            (offset < -DEAD_ZONE, offset > DEAD_ZONE)
        };
        let (p1_up, p1_down) = chase(Player::One);
        let (p2_up, p2_down) = chase(Player::Two);

        Self {
            p1_up,
            p1_down,
            p2_up,
            p2_down,
            confirm: true,
        }
    }
}

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.time_ticks += 1;

    match state.phase {
        GamePhase::Idle => {
            if input.confirm {
                let ticks = state.settings.start_delay_ticks();
                log::info!("Starting the game in {} seconds...", state.settings.start_delay_secs);
                state.phase = GamePhase::Starting { ticks };
                state.push_event(GameEvent::MatchStarting);
            }
        }

        GamePhase::Starting { ticks } => {
            let remaining = ticks.saturating_sub(1);
            if remaining == 0 {
                start_match(state);
            } else {
                state.phase = GamePhase::Starting { ticks: remaining };
            }
        }

        GamePhase::Playing => step(state, input),

        GamePhase::RoundEnd { ticks } => {
            let remaining = ticks.saturating_sub(1);
            if remaining == 0 {
                state.reset_positions();
                state.serve();
                state.phase = GamePhase::Playing;
                state.push_event(GameEvent::RoundRestarted);
                log::debug!("Round restarted, serve {:?}", state.ball.vel);
            } else {
                state.phase = GamePhase::RoundEnd { ticks: remaining };
            }
        }
    }
}

fn start_match(state: &mut GameState) {
    state.reset_positions();
    for paddle in &mut state.paddles {
        paddle.score = 0;
    }
    state.serve();
    state.phase = GamePhase::Playing;
    state.push_event(GameEvent::MatchStarted);
    log::info!("Match started (seed {}), serve {:?}", state.seed, state.ball.vel);
}

/// Frame integration while the ball is in play
fn step(state: &mut GameState, input: &TickInput) {
    let settings = state.settings;

    let p1_dir = state.paddles[0].steer(
        input.p1_up,
        input.p1_down,
        settings.paddle_speed,
        settings.arena_height,
    );
    let p2_dir = state.paddles[1].steer(
        input.p2_up,
        input.p2_down,
        settings.paddle_speed,
        settings.arena_height,
    );

    let heading = state.heading();
    let paddle = *state.paddle(heading);
    let dir = f32::from(match heading {
        Player::One => p1_dir,
        Player::Two => p2_dir,
    });

    // A moving paddle that swept into the ball drags it along
    if dir != 0.0 && state.ball.overlaps(&paddle) {
        state.ball.vel.y = state.ball.vel.y.abs() * dir + dir * settings.paddle_speed;
    }

    let paddle_hit = resolve_paddle_collision(&state.ball, &paddle);
    let wall_hit = resolve_wall_collision(&state.ball, settings.arena());

    if let Some(hit) = paddle_hit {
        state.ball.vel = paddle_response(&state.ball, &hit, &paddle, &settings);
        state.ball.pos = hit.rest_position;
        log::debug!(
            "Player {} paddle hit on {:?}, velocity now {:?}",
            heading.number(),
            hit.side,
            state.ball.vel
        );
        state.push_event(GameEvent::PaddleHit {
            player: heading,
            side: hit.side,
        });
    } else if let Some(hit) = wall_hit {
        match hit.side {
            Side::Top | Side::Bottom => {
                state.ball.vel.y = -state.ball.vel.y;
                state.ball.pos = hit.rest_position;
                state.ball.pos.y += if hit.side == Side::Top {
                    settings.wall_epsilon
                } else {
                    -settings.wall_epsilon
                };
                log::debug!("Wall bounce on {:?}", hit.side);
                state.push_event(GameEvent::WallBounce { side: hit.side });
            }
            Side::Left | Side::Right => {
                let defender = if hit.side == Side::Left {
                    Player::One
                } else {
                    Player::Two
                };
                award_point(state, defender.opponent());
            }
        }
    } else {
        state.ball.advance();
    }

    // Guard against float drift past the floor or ceiling
    let ball = &mut state.ball;
    if ball.pos.y <= 0.0 {
        ball.pos.y = settings.wall_epsilon;
    } else if ball.pos.y >= settings.arena_height {
        ball.pos.y = settings.arena_height - ball.size - settings.wall_epsilon;
    }
}

/// The ball left the arena: score, then either end the match or pause the round
fn award_point(state: &mut GameState, scorer: Player) {
    state.paddle_mut(scorer).score += 1;
    let score = state.scores();
    log::info!("Score is: {} to {}", score.0, score.1);
    state.push_event(GameEvent::PointScored { scorer, score });

    if let Some(winner) = state.winner() {
        log::info!("Player {} wins!", winner.number());
        state.phase = GamePhase::Idle;
        state.push_event(GameEvent::MatchOver { winner });
    } else {
        state.phase = GamePhase::RoundEnd {
            ticks: state.settings.round_delay_ticks(),
        };
    }
}
