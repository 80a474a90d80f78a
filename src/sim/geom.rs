//! Axis-aligned square body geometry
//!
//! Vertices are numbered clockwise from the visual top-left corner:
//!
//! ```text
//! 0--1
//! |  |
//! 3--2
//! ```
//!
//! Every vertex, edge and bound is derived from a body's position (top-left)
//! and size, never stored.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A 2D coordinate in arena space (y grows downward)
pub type Point = Vec2;

/// One edge of a body, or one boundary of the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    /// The two vertex indices bounding this side, in clockwise order
    pub const fn vertices(self) -> [usize; 2] {
        match self {
            Side::Top => [0, 1],
            Side::Right => [1, 2],
            Side::Bottom => [2, 3],
            Side::Left => [3, 0],
        }
    }

    /// TOP and BOTTOM lie along the x axis
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Side::Top | Side::Bottom)
    }
}

/// The vertex shared by a vertical side (LEFT/RIGHT) and a horizontal side
/// (TOP/BOTTOM)
pub fn corner(vertical: Side, horizontal: Side) -> usize {
    match (vertical, horizontal) {
        (Side::Left, Side::Top) => 0,
        (Side::Right, Side::Top) => 1,
        (Side::Right, Side::Bottom) => 2,
        (Side::Left, Side::Bottom) => 3,
        _ => panic!("{vertical:?} and {horizontal:?} do not share a corner"),
    }
}

/// An ordered pair of points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub a: Point,
    pub b: Point,
}

impl Line {
    pub const fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    /// Whether `x` lies within the segment's x-range (inclusive)
    #[inline]
    pub fn spans_x(&self, x: f32) -> bool {
        x >= self.a.x.min(self.b.x) && x <= self.a.x.max(self.b.x)
    }

    /// Whether `y` lies within the segment's y-range (inclusive)
    #[inline]
    pub fn spans_y(&self, y: f32) -> bool {
        y >= self.a.y.min(self.b.y) && y <= self.a.y.max(self.b.y)
    }
}

/// Anything that occupies an axis-aligned rectangle
///
/// Implementors supply position and size; all geometry queries are shared.
pub trait Body {
    /// Top-left corner
    fn position(&self) -> Vec2;
    /// Width and height
    fn size(&self) -> Vec2;

    /// Absolute coordinate of vertex `index` (0..=3, clockwise from top-left)
    ///
    /// # Panics
    /// If `index > 3`.
    fn vertex(&self, index: usize) -> Point {
        let p = self.position();
        let s = self.size();
        match index {
            0 => p,
            1 => Vec2::new(p.x + s.x, p.y),
            2 => p + s,
            3 => Vec2::new(p.x, p.y + s.y),
            _ => panic!("vertex index {index} out of range 0..=3"),
        }
    }

    /// The edge on the given side
    fn side(&self, side: Side) -> Line {
        let [a, b] = side.vertices();
        Line::new(self.vertex(a), self.vertex(b))
    }

    /// Extent on the given side: y for TOP/BOTTOM, x for LEFT/RIGHT
    fn bound(&self, side: Side) -> f32 {
        let p = self.position();
        let s = self.size();
        match side {
            Side::Top => p.y,
            Side::Right => p.x + s.x,
            Side::Bottom => p.y + s.y,
            Side::Left => p.x,
        }
    }

    fn center(&self) -> Point {
        self.position() + self.size() * 0.5
    }

    /// Strict rectangle overlap (touching edges do not count)
    fn overlaps(&self, other: &dyn Body) -> bool {
        self.bound(Side::Left) < other.bound(Side::Right)
            && other.bound(Side::Left) < self.bound(Side::Right)
            && self.bound(Side::Top) < other.bound(Side::Bottom)
            && other.bound(Side::Top) < self.bound(Side::Bottom)
    }

    /// Top-left position that would put vertex `index` exactly on `point`
    fn position_with_vertex_at(&self, index: usize, point: Point) -> Vec2 {
        point - (self.vertex(index) - self.position())
    }
}

/// A free-standing rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }
}

impl Body for Rect {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn size(&self) -> Vec2 {
        self.size
    }
}
