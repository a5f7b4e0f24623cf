//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for field elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.04, 0.12, 0.06, 1.0];
    pub const OUTFIELD: [f32; 4] = [0.16, 0.55, 0.24, 1.0];
    pub const INFIELD: [f32; 4] = [0.2, 0.62, 0.28, 1.0];
    pub const BOUNDARY_ROPE: [f32; 4] = [0.95, 0.95, 0.9, 1.0];
    pub const PITCH: [f32; 4] = [0.78, 0.68, 0.46, 1.0];
    pub const CREASE: [f32; 4] = [1.0, 1.0, 1.0, 0.9];
    pub const STUMPS: [f32; 4] = [0.95, 0.85, 0.55, 1.0];
    pub const BALL: [f32; 4] = [0.85, 0.1, 0.1, 1.0];
    pub const BALL_SHADOW: [f32; 4] = [0.0, 0.0, 0.0, 0.25];
    pub const BATSMAN: [f32; 4] = [0.2, 0.45, 0.95, 1.0];
    pub const BOWLER: [f32; 4] = [0.95, 0.35, 0.2, 1.0];
    pub const FIELDER: [f32; 4] = [0.95, 0.95, 0.95, 1.0];
    /// Pose highlight while a player is animated
    pub const POSE_GLOW: [f32; 4] = [1.0, 0.85, 0.2, 0.6];
    pub const CATCH_ZONE: [f32; 4] = [1.0, 1.0, 1.0, 0.12];
    pub const RING_SIX: [f32; 4] = [1.0, 0.8, 0.2, 0.35];
    pub const RING_FOUR: [f32; 4] = [0.3, 0.9, 0.5, 0.35];
}
