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

/// Colors for game elements
pub mod colors {
    pub const SKY: [f32; 4] = [0.75, 0.85, 0.95, 1.0];
    pub const PLATFORM: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const HERO: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const STICK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const PERFECT_MARKER: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const TREE_TRUNK: [f32; 4] = [0.45, 0.3, 0.2, 1.0];
    pub const TREE_OLIVE: [f32; 4] = [0.43, 0.53, 0.13, 1.0]; // #6D8821
    pub const TREE_PLUM: [f32; 4] = [0.56, 0.27, 0.68, 1.0]; // #8E44AD
    pub const TREE_LAVENDER: [f32; 4] = [0.61, 0.35, 0.71, 1.0]; // #9B59B6

    /// High contrast palette
    pub const HC_BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const HC_FOREGROUND: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
}
