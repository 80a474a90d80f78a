//! Shape generation for 2D primitives

use super::vertex::Vertex;
use crate::sim::Body;

/// Two triangles covering a body's rectangle
///
/// Built from the body's own vertices so what is drawn always matches what
/// the collision engine tests against.
pub fn rect(body: &dyn Body, color: [f32; 4]) -> [Vertex; 6] {
    let corner = |i: usize| {
        let p = body.vertex(i);
        Vertex::new(p.x, p.y, color)
    };

    [
        corner(0),
        corner(1),
        corner(2),
        corner(2),
        corner(3),
        corner(0),
    ]
}
