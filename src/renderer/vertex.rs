//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

use crate::sim::Rgb;

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

/// Opaque RGBA from an RGB triple
pub const fn opaque(rgb: Rgb) -> [f32; 4] {
    [rgb[0], rgb[1], rgb[2], 1.0]
}

/// Colors for game elements
pub mod colors {
    use crate::sim::Rgb;

    pub const PADDLE: Rgb = [1.0, 1.0, 1.0];
    pub const BALL: Rgb = [1.0, 1.0, 1.0];
    pub const TEXT: Rgb = [1.0, 1.0, 1.0];
    pub const GAME_OVER: Rgb = [1.0, 0.0, 0.0];
    pub const LEVEL_COMPLETE: Rgb = [0.0, 1.0, 0.0];
    pub const BACKGROUND: Rgb = [0.0, 0.0, 0.0];
}
