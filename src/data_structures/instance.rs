//! Per-region transformation and tint data for GPU rendering.
//!
//! Every region mesh is drawn as exactly one instance. Its instance buffer
//! carries the model matrix (the vertical lift of the hover animation) and
//! the region's current material colour, so each region effectively owns a
//! clone of the shared base material.

use cgmath::Vector3;

use crate::data_structures::model;

/// Translation and linear RGB colour of one region.
#[derive(Clone, Debug, PartialEq)]
pub struct Instance {
    pub position: Vector3<f32>,
    pub color: Vector3<f32>,
}

impl Instance {
    pub fn new(color: Vector3<f32>) -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            color,
        }
    }

    /// A region lifted `offset` units above its rest position.
    pub fn lifted(offset: f32, color: Vector3<f32>) -> Self {
        Self {
            position: Vector3::new(0.0, offset, 0.0),
            color,
        }
    }

    pub fn to_matrix(&self) -> cgmath::Matrix4<f32> {
        cgmath::Matrix4::from_translation(self.position)
    }

    pub fn to_raw(&self) -> InstanceRaw {
        InstanceRaw {
            model: self.to_matrix().into(),
            color: [self.color.x, self.color.y, self.color.z, 1.0],
        }
    }
}

/**
 * The raw instance is the actual data stored on the GPU
 */
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw {
    model: [[f32; 4]; 4],
    color: [f32; 4],
}

/**
 * Stride layout: the model matrix as four vec4 columns followed by the colour.
 *
 * Locations 0..5 are reserved for the per-vertex attributes.
 */
impl model::Vertex for InstanceRaw {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<InstanceRaw>() as wgpu::BufferAddress,
            // Advance once per instance instead of once per vertex
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 5,
                    format: wgpu::VertexFormat::Float32x4,
                },
                // A mat4 takes up 4 vertex slots as it is technically 4 vec4s.
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 4]>() as wgpu::BufferAddress,
                    shader_location: 6,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 8]>() as wgpu::BufferAddress,
                    shader_location: 7,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 12]>() as wgpu::BufferAddress,
                    shader_location: 8,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 16]>() as wgpu::BufferAddress,
                    shader_location: 9,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}
