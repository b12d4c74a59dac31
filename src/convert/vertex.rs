use std::mem;

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

/// Boundary vertex record consumed by the rendering backend.
///
/// Texture coordinates are quantized to unorm16 per channel and colors to
/// unorm8x4; byte-exact packing only matters at this boundary, converters
/// work in f32 throughout.
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable, Debug, PartialEq)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [u16; 2],
    pub color: [u8; 4],
}

impl Vertex {
    pub const ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x3,
        2 => Unorm16x2,
        3 => Unorm8x4
    ];

    pub fn layout<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }

    pub fn new(position: Vec3, normal: Vec3, uv: Vec2, color: [u8; 4]) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            uv: [pack_unorm16(uv.x), pack_unorm16(uv.y)],
            color,
        }
    }
}

/// Shorthand constructor, mirroring how primitive emitters build vertices.
#[inline]
pub fn v(position: Vec3, normal: Vec3, uv: Vec2, color: [u8; 4]) -> Vertex {
    Vertex::new(position, normal, uv, color)
}

#[inline]
fn pack_unorm16(value: f32) -> u16 {
    (value.clamp(0.0, 1.0) * u16::MAX as f32).round() as u16
}
