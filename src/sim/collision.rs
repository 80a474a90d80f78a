//! Swept collision detection and response
//!
//! The tricky part of the game: a fast ball can pass clean through a 25px
//! paddle between two frames, so instead of testing overlap at the end of a
//! frame each leading vertex of the ball is swept along the frame's velocity
//! as a line segment, and the exact crossing with the target edge is solved.
//!
//! Both resolvers are pure functions of the current state. A hit carries the
//! top-left position that rests the ball exactly on the contact point.

use glam::Vec2;

use super::geom::{Body, Line, Point, Side, corner};
use super::state::{Ball, Paddle};
use crate::settings::Settings;

/// A swept contact against a paddle or arena boundary
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    /// Contact point on the struck edge
    pub point: Point,
    /// Struck side of the paddle, or the arena boundary that was crossed
    pub side: Side,
    /// Ball vertex that made contact
    pub vertex: usize,
    /// Ball top-left position with `vertex` resting on `point`
    pub rest_position: Vec2,
}

/// The path of one ball vertex over a frame
#[derive(Debug, Clone, Copy)]
struct Sweep {
    path: Line,
    slope: f32,
    /// y-intercept of the infinite line through the path
    intercept: f32,
}

impl Sweep {
    fn new(start: Point, vel: Vec2, slope: f32) -> Self {
        Self {
            path: Line::new(start, start + vel),
            slope,
            intercept: start.y - start.x * slope,
        }
    }

    fn start(&self) -> Point {
        self.path.a
    }

    /// Where the path line crosses the vertical line `x`
    fn y_at(&self, x: f32) -> f32 {
        x * self.slope + self.intercept
    }

    /// Where the path line crosses the horizontal line `y`; slope must be non-zero
    fn x_at(&self, y: f32) -> f32 {
        (y - self.intercept) / self.slope
    }
}

/// dy/dx of the velocity, or `None` for a purely vertical path
///
/// A vertical path has no slope to intersect with, so it is reported as no
/// collision rather than producing an infinite slope.
fn path_slope(vel: Vec2) -> Option<f32> {
    if vel.x == 0.0 {
        None
    } else {
        Some(vel.y / vel.x)
    }
}

/// Prefer `a` only when strictly nearer its own starting vertex
fn nearer(a: (Point, CollisionResult), b: (Point, CollisionResult)) -> CollisionResult {
    if a.0.distance(a.1.point) < b.0.distance(b.1.point) {
        a.1
    } else {
        b.1
    }
}

/// Earliest contact between the ball's swept path and one paddle
///
/// LEFT/RIGHT paddle edges are tested with the ball's two leading vertices in
/// x, TOP/BOTTOM edges with the two leading vertices in y. When both axes
/// report a hit the one nearer its starting vertex wins, which approximates
/// the earlier time of impact.
pub fn resolve_paddle_collision(ball: &Ball, paddle: &Paddle) -> Option<CollisionResult> {
    let slope = path_slope(ball.vel)?;

    // Pick the candidate faces, bailing out if the ball is already past them
    let (face_x, leading_x) = if ball.vel.x >= 0.0 {
        if ball.bound(Side::Left) > paddle.bound(Side::Right) {
            return None;
        }
        (Side::Left, [1, 2])
    } else {
        if ball.bound(Side::Right) < paddle.bound(Side::Left) {
            return None;
        }
        (Side::Right, [0, 3])
    };

    let (face_y, leading_y) = if ball.vel.y >= 0.0 {
        if ball.bound(Side::Top) > paddle.bound(Side::Bottom) {
            return None;
        }
        (Side::Top, [2, 3])
    } else {
        if ball.bound(Side::Bottom) < paddle.bound(Side::Top) {
            return None;
        }
        (Side::Bottom, [0, 1])
    };

    let make_hit = |vertex: usize, point: Point, side: Side| CollisionResult {
        point,
        side,
        vertex,
        rest_position: ball.position_with_vertex_at(vertex, point),
    };

    // Horizontal motion into a LEFT/RIGHT face
    let paddle_x = paddle.bound(face_x);
    let horizontal = leading_x.into_iter().find_map(|vertex| {
        let sweep = Sweep::new(ball.vertex(vertex), ball.vel, slope);
        if !sweep.path.spans_x(paddle_x) {
            return None;
        }
        let y = sweep.y_at(paddle_x);
        let within = y >= paddle.bound(Side::Top) && y <= paddle.bound(Side::Bottom);
        within.then(|| (sweep.start(), make_hit(vertex, Vec2::new(paddle_x, y), face_x)))
    });

    // Vertical motion into a TOP/BOTTOM face; a flat path never crosses one
    let paddle_y = paddle.bound(face_y);
    let vertical = if slope == 0.0 {
        None
    } else {
        leading_y.into_iter().find_map(|vertex| {
            let sweep = Sweep::new(ball.vertex(vertex), ball.vel, slope);
            if !sweep.path.spans_y(paddle_y) {
                return None;
            }
            let x = sweep.x_at(paddle_y);
            let within = x >= paddle.bound(Side::Left) && x <= paddle.bound(Side::Right);
            within.then(|| (sweep.start(), make_hit(vertex, Vec2::new(x, paddle_y), face_y)))
        })
    };

    match (horizontal, vertical) {
        (Some(h), Some(v)) => Some(nearer(h, v)),
        (Some((_, hit)), None) | (None, Some((_, hit))) => Some(hit),
        (None, None) => None,
    }
}

/// Earliest contact between the ball's swept path and the arena boundaries
///
/// Only the single vertex leading in both axes is swept. A LEFT/RIGHT result
/// means the ball left the arena; its rest position is still reported but the
/// caller treats it as a point scored rather than a bounce.
pub fn resolve_wall_collision(ball: &Ball, arena: Vec2) -> Option<CollisionResult> {
    let (side_x, bound_x) = if ball.vel.x >= 0.0 {
        (Side::Right, arena.x)
    } else {
        (Side::Left, 0.0)
    };
    let (side_y, bound_y) = if ball.vel.y >= 0.0 {
        (Side::Bottom, arena.y)
    } else {
        (Side::Top, 0.0)
    };

    let vertex = corner(side_x, side_y);
    let slope = path_slope(ball.vel)?;
    let sweep = Sweep::new(ball.vertex(vertex), ball.vel, slope);

    let make_hit = |point: Point, side: Side| {
        (
            sweep.start(),
            CollisionResult {
                point,
                side,
                vertex,
                rest_position: ball.position_with_vertex_at(vertex, point),
            },
        )
    };

    let horizontal = sweep
        .path
        .spans_x(bound_x)
        .then(|| make_hit(Vec2::new(bound_x, sweep.y_at(bound_x)), side_x));
    let vertical = (slope != 0.0 && sweep.path.spans_y(bound_y))
        .then(|| make_hit(Vec2::new(sweep.x_at(bound_y), bound_y), side_y));

    match (horizontal, vertical) {
        (Some(h), Some(v)) => Some(nearer(h, v)),
        (Some((_, hit)), None) | (None, Some((_, hit))) => Some(hit),
        (None, None) => None,
    }
}

/// Ball velocity after a paddle hit
///
/// Face hits (LEFT/RIGHT) reverse x and speed it up by `paddle_accel`, and
/// add spin proportional to how far from the paddle's center the ball struck.
/// TOP/BOTTOM hits only invert y. The result is clamped so |vy| never exceeds
/// `max_slope * |vx|`.
pub fn paddle_response(
    ball: &Ball,
    hit: &CollisionResult,
    paddle: &Paddle,
    settings: &Settings,
) -> Vec2 {
    let mut vel = ball.vel;
    let spin = || {
        let ball_center_y = hit.rest_position.y + ball.size * 0.5;
        (ball_center_y - paddle.center().y) / settings.spin_divisor
    };

    match hit.side {
        Side::Left => {
            vel.x = -vel.x - settings.paddle_accel;
            vel.y += spin();
        }
        Side::Right => {
            vel.x = -vel.x + settings.paddle_accel;
            vel.y += spin();
        }
        Side::Top | Side::Bottom => vel.y = -vel.y,
    }

    clamp_slope(vel, settings.max_slope)
}

/// Limit |vy| to `max_slope * |vx|`
///
/// A negative or NaN limit flattens the path to vy = 0.
#[inline]
pub fn clamp_slope(vel: Vec2, max_slope: f32) -> Vec2 {
    let limit = (vel.x.abs() * max_slope).max(0.0);
    Vec2::new(vel.x, vel.y.max(-limit).min(limit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geom::Rect;
    use crate::sim::state::Player;
    use proptest::prelude::*;

    const ARENA: Vec2 = Vec2::new(800.0, 600.0);

    fn ball(x: f32, y: f32, vx: f32, vy: f32) -> Ball {
        Ball {
            pos: Vec2::new(x, y),
            vel: Vec2::new(vx, vy),
            size: 20.0,
        }
    }

    fn paddle_one() -> Paddle {
        Paddle::new(Player::One, Vec2::new(75.0, 250.0), Vec2::new(25.0, 100.0))
    }

    fn paddle_two() -> Paddle {
        Paddle::new(Player::Two, Vec2::new(700.0, 250.0), Vec2::new(25.0, 100.0))
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_free_flight_no_collision() {
        let b = ball(390.0, 290.0, 5.0, 3.0);
        assert!(resolve_paddle_collision(&b, &paddle_two()).is_none());
        assert!(resolve_wall_collision(&b, ARENA).is_none());
    }

    #[test]
    fn test_vertical_path_never_collides() {
        let b = ball(700.0, 225.0, 0.0, 10.0);
        assert!(resolve_paddle_collision(&b, &paddle_two()).is_none());
        let b = ball(400.0, 585.0, 0.0, 10.0);
        assert!(resolve_wall_collision(&b, ARENA).is_none());
    }

    #[test]
    fn test_paddle_left_face_hit() {
        let b = ball(678.0, 290.0, 5.0, 0.0);
        let hit = resolve_paddle_collision(&b, &paddle_two()).unwrap();
        assert_eq!(hit.side, Side::Left);
        assert_eq!(hit.vertex, 1);
        assert_eq!(hit.point, Vec2::new(700.0, 290.0));
        assert_eq!(hit.rest_position, Vec2::new(680.0, 290.0));
    }

    #[test]
    fn test_paddle_right_face_hit() {
        let b = ball(102.0, 290.0, -5.0, 0.0);
        let hit = resolve_paddle_collision(&b, &paddle_one()).unwrap();
        assert_eq!(hit.side, Side::Right);
        assert_eq!(hit.vertex, 0);
        assert_eq!(hit.rest_position, Vec2::new(100.0, 290.0));
    }

    #[test]
    fn test_paddle_top_face_hit() {
        // Dropping steeply onto the top of the right paddle
        let b = ball(705.0, 225.0, 1.0, 8.0);
        let hit = resolve_paddle_collision(&b, &paddle_two()).unwrap();
        assert_eq!(hit.side, Side::Top);
        assert_eq!(hit.vertex, 3);
        assert!(approx(hit.point.x, 705.625));
        assert_eq!(hit.point.y, 250.0);
        assert!(approx(hit.rest_position.x, 705.625));
        assert!(approx(hit.rest_position.y, 230.0));
    }

    #[test]
    fn test_paddle_bottom_face_hit() {
        let b = ball(705.0, 355.0, 1.0, -8.0);
        let hit = resolve_paddle_collision(&b, &paddle_two()).unwrap();
        assert_eq!(hit.side, Side::Bottom);
        assert_eq!(hit.point.y, 350.0);
        assert!(approx(hit.rest_position.y, 350.0));
    }

    #[test]
    fn test_paddle_top_and_bottom_rest_is_not_hit_again() {
        let paddle = paddle_two();
        for (start, vel) in [
            (Vec2::new(705.0, 225.0), Vec2::new(1.0, 8.0)),
            (Vec2::new(705.0, 355.0), Vec2::new(1.0, -8.0)),
        ] {
            let hit = resolve_paddle_collision(&ball(start.x, start.y, vel.x, vel.y), &paddle)
                .unwrap();
            let rest = hit.rest_position;

            // Sliding along the face or leaving after the bounce
            let flat = ball(rest.x, rest.y, vel.x, 0.0);
            assert!(resolve_paddle_collision(&flat, &paddle).is_none());
            let bounced = ball(rest.x, rest.y, vel.x, -vel.y);
            assert!(resolve_paddle_collision(&bounced, &paddle).is_none());
        }
    }

    #[test]
    fn test_fast_ball_does_not_tunnel() {
        // End-of-frame rectangle is already past the paddle
        let b = ball(650.0, 290.0, 80.0, 0.0);
        let end = Rect::new(b.pos + b.vel, Vec2::splat(20.0));
        assert!(!end.overlaps(&paddle_two()));

        let hit = resolve_paddle_collision(&b, &paddle_two()).unwrap();
        assert_eq!(hit.side, Side::Left);
        assert_eq!(hit.rest_position, Vec2::new(680.0, 290.0));
    }

    #[test]
    fn test_broad_phase_rejects_ball_already_past() {
        // Vertically level with the paddle but already beyond its right edge
        let b = ball(730.0, 290.0, 5.0, 0.0);
        assert!(resolve_paddle_collision(&b, &paddle_two()).is_none());
        let b = ball(50.0, 290.0, -5.0, 0.0);
        assert!(resolve_paddle_collision(&b, &paddle_one()).is_none());
    }

    #[test]
    fn test_miss_above_paddle() {
        let b = ball(678.0, 200.0, 5.0, 0.0);
        assert!(resolve_paddle_collision(&b, &paddle_two()).is_none());
    }

    #[test]
    fn test_paddle_corner_prefers_nearer_contact() {
        // Both the LEFT face and the TOP face are crossed by vertex 2 at the
        // same point; a tie goes to the vertical (TOP) result.
        let b = ball(675.0, 225.0, 5.0, 5.0);
        let hit = resolve_paddle_collision(&b, &paddle_two()).unwrap();
        assert_eq!(hit.side, Side::Top);
        assert_eq!(hit.point, Vec2::new(700.0, 250.0));
    }

    #[test]
    fn test_wall_left_is_reported_on_boundary() {
        let b = ball(2.0, 300.0, -5.0, -3.0);
        let hit = resolve_wall_collision(&b, ARENA).unwrap();
        assert_eq!(hit.side, Side::Left);
        assert_eq!(hit.vertex, 0);
        assert_eq!(hit.point.x, 0.0);
        assert!(approx(hit.point.y, 298.8));
    }

    #[test]
    fn test_wall_top_contact() {
        let b = ball(400.0, 2.0, 5.0, -3.0);
        let hit = resolve_wall_collision(&b, ARENA).unwrap();
        assert_eq!(hit.side, Side::Top);
        assert_eq!(hit.vertex, 1);
        assert_eq!(hit.point.y, 0.0);
        assert!(approx(hit.point.x, 423.333));
        assert_eq!(hit.rest_position.y, 0.0);
        assert!(approx(hit.rest_position.x, 403.333));
    }

    #[test]
    fn test_wall_bottom_contact() {
        let b = ball(400.0, 578.0, 5.0, 3.0);
        let hit = resolve_wall_collision(&b, ARENA).unwrap();
        assert_eq!(hit.side, Side::Bottom);
        assert_eq!(hit.vertex, 2);
        assert_eq!(hit.point.y, 600.0);
        assert!(approx(hit.rest_position.y, 580.0));
    }

    #[test]
    fn test_wall_corner_picks_nearer_boundary() {
        // Leading vertex at (798, 597): the bottom is 3px away vertically but
        // the right wall is crossed after only 2px horizontally.
        let b = ball(778.0, 577.0, 10.0, 10.0);
        let hit = resolve_wall_collision(&b, ARENA).unwrap();
        assert_eq!(hit.side, Side::Right);
        assert_eq!(hit.point, Vec2::new(800.0, 599.0));
    }

    #[test]
    fn test_face_hit_response_reverses_and_accelerates() {
        let settings = Settings::default();
        let b = ball(678.0, 290.0, 5.0, 0.0);
        let hit = resolve_paddle_collision(&b, &paddle_two()).unwrap();
        assert_eq!(paddle_response(&b, &hit, &paddle_two(), &settings), Vec2::new(-5.5, 0.0));
    }

    #[test]
    fn test_face_hit_adds_spin_from_offset() {
        let settings = Settings::default();
        // Ball center lands 30px below the paddle's center
        let b = ball(678.0, 320.0, 5.0, 0.0);
        let hit = resolve_paddle_collision(&b, &paddle_two()).unwrap();
        let vel = paddle_response(&b, &hit, &paddle_two(), &settings);
        assert_eq!(vel.x, -5.5);
        assert!(approx(vel.y, 6.0));
    }

    #[test]
    fn test_top_hit_inverts_and_clamps() {
        let settings = Settings::default();
        let b = ball(705.0, 225.0, 1.0, 8.0);
        let hit = resolve_paddle_collision(&b, &paddle_two()).unwrap();
        let vel = paddle_response(&b, &hit, &paddle_two(), &settings);
        // -8 is clamped to 3 * |1|
        assert_eq!(vel, Vec2::new(1.0, -3.0));
    }

    #[test]
    fn test_clamp_slope() {
        assert_eq!(clamp_slope(Vec2::new(-5.5, 20.0), 3.0), Vec2::new(-5.5, 16.5));
        assert_eq!(clamp_slope(Vec2::new(2.0, -7.0), 3.0), Vec2::new(2.0, -6.0));
        assert_eq!(clamp_slope(Vec2::new(2.0, 1.0), 3.0), Vec2::new(2.0, 1.0));
        assert_eq!(clamp_slope(Vec2::new(-5.5, 4.0), -1.0), Vec2::new(-5.5, 0.0));
        assert_eq!(clamp_slope(Vec2::new(5.0, -4.0), f32::NAN), Vec2::new(5.0, 0.0));
    }

    proptest! {
        #[test]
        fn prop_wall_contact_lies_on_boundary(
            x in 30.0f32..750.0,
            y in 30.0f32..550.0,
            vx in prop_oneof![-40.0f32..-0.5, 0.5f32..40.0],
            vy in -40.0f32..40.0,
        ) {
            let b = ball(x, y, vx, vy);
            let vertex = corner(
                if vx >= 0.0 { Side::Right } else { Side::Left },
                if vy >= 0.0 { Side::Bottom } else { Side::Top },
            );
            let start = b.vertex(vertex);
            let end = start + b.vel;
            let crosses_x = if vx >= 0.0 { end.x >= ARENA.x } else { end.x <= 0.0 };
            let crosses_y = vy != 0.0 && if vy >= 0.0 { end.y >= ARENA.y } else { end.y <= 0.0 };

            match resolve_wall_collision(&b, ARENA) {
                Some(hit) => {
                    prop_assert!(crosses_x || crosses_y);
                    prop_assert_eq!(hit.vertex, vertex);
                    let on_boundary = match hit.side {
                        Side::Left => hit.point.x == 0.0,
                        Side::Right => hit.point.x == ARENA.x,
                        Side::Top => hit.point.y == 0.0,
                        Side::Bottom => hit.point.y == ARENA.y,
                    };
                    prop_assert!(on_boundary, "{:?} not on its boundary", hit);
                }
                None => {
                    prop_assert!(!crosses_x && !crosses_y);
                }
            }
        }

        #[test]
        fn prop_snap_to_floor_or_ceiling_is_idempotent(
            x in 60.0f32..700.0,
            vx in prop_oneof![-20.0f32..-0.5, 0.5f32..20.0],
            vy in 0.5f32..20.0,
            top in any::<bool>(),
        ) {
            let (y, vy) = if top { (vy * 0.5, -vy) } else { (580.0 - vy * 0.5, vy) };
            let b = ball(x, y, vx, vy);
            let hit = resolve_wall_collision(&b, ARENA).unwrap();
            prop_assert!(hit.side.is_horizontal());

            let rested = ball(hit.rest_position.x, hit.rest_position.y, vx, 0.0);
            let again = resolve_wall_collision(&rested, ARENA);
            prop_assert!(again.is_none_or(|h| h.side != hit.side));
        }

        #[test]
        fn prop_face_hits_are_mirrored(
            vx in 1.0f32..15.0,
            offset in 0.0f32..79.0,
        ) {
            let settings = Settings::default();
            let y = 250.0 + offset;

            let from_left = ball(700.0 - 20.0 - vx * 0.5, y, vx, 0.0);
            let left_hit = resolve_paddle_collision(&from_left, &paddle_two()).unwrap();
            prop_assert_eq!(left_hit.side, Side::Left);

            let from_right = ball(100.0 + vx * 0.5, y, -vx, 0.0);
            let right_hit = resolve_paddle_collision(&from_right, &paddle_one()).unwrap();
            prop_assert_eq!(right_hit.side, Side::Right);

            let left_vel = paddle_response(&from_left, &left_hit, &paddle_two(), &settings);
            let right_vel = paddle_response(&from_right, &right_hit, &paddle_one(), &settings);
            prop_assert!(left_vel.x < 0.0 && right_vel.x > 0.0);
            prop_assert!(approx(left_vel.x, -right_vel.x));
            prop_assert!(approx(left_vel.y, right_vel.y));
        }
    }
}
