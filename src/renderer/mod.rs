//! Rendering data
//!
//! Turns the current game state into a flat triangle list. Window creation
//! and the actual draw calls belong to whatever backend hosts the game; it
//! only needs to upload [`as_bytes`] of [`frame_vertices`] each frame.

pub mod shapes;
pub mod vertex;

pub use vertex::{Vertex, colors};

use crate::sim::GameState;

/// Triangles for one frame: paddle 1, paddle 2, then the ball
pub fn frame_vertices(state: &GameState) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(18);
    vertices.extend(shapes::rect(&state.paddles[0], colors::PADDLE_ONE));
    vertices.extend(shapes::rect(&state.paddles[1], colors::PADDLE_TWO));
    vertices.extend(shapes::rect(&state.ball, colors::BALL));
    vertices
}

/// Raw bytes for a vertex buffer upload
pub fn as_bytes(vertices: &[Vertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;

    #[test]
    fn test_frame_vertices_layout() {
        let state = GameState::new(1, Settings::default());
        let vertices = frame_vertices(&state);
        assert_eq!(vertices.len(), 18);
        assert_eq!(vertices[0].color, colors::PADDLE_ONE);
        assert_eq!(vertices[6].color, colors::PADDLE_TWO);
        assert_eq!(vertices[12].position, [390.0, 290.0]);
        assert_eq!(vertices[14].position, [410.0, 310.0]);
    }

    #[test]
    fn test_as_bytes_length() {
        let state = GameState::new(1, Settings::default());
        let vertices = frame_vertices(&state);
        assert_eq!(as_bytes(&vertices).len(), 18 * std::mem::size_of::<Vertex>());
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
    }
}
