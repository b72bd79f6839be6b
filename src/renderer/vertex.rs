//! Vertex format and palette
//!
//! Positions stay in viewport pixels; the shader maps them to clip space.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

pub type Rgba = [f32; 4];

/// Flat-colored 2D vertex
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: Rgba,
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    pub fn at(point: Vec2, color: Rgba) -> Self {
        Self {
            position: point.to_array(),
            color,
        }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

pub mod colors {
    use super::Rgba;

    pub const BACKGROUND: Rgba = [0.05, 0.07, 0.16, 1.0];
    pub const BACKGROUND_STRIPE: Rgba = [0.09, 0.12, 0.26, 1.0];
    pub const OBSTACLE_FRAME: Rgba = [1.0, 0.0, 0.0, 1.0];
    /// Duck yellow
    pub const PLAYER_BODY: Rgba = [1.0, 0.84, 0.2, 1.0];
    pub const PLAYER_BODY_HIT: Rgba = [1.0, 0.25, 0.2, 1.0];
    pub const PLAYER_BOX: Rgba = [1.0, 1.0, 1.0, 1.0];
    pub const PLAYER_BOX_HIT: Rgba = [1.0, 0.0, 0.0, 1.0];
    pub const GAME_OVER_OVERLAY: Rgba = [0.0, 0.0, 0.0, 0.6];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_matches_struct() {
        let layout = Vertex::layout();
        assert_eq!(layout.array_stride, 24);
        assert_eq!(layout.attributes[1].offset, 8);
    }
}
