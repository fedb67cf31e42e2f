//! Region geometry on the CPU and on the GPU.
//!
//! Loading produces a [`RegionGeometry`] (plain vectors, safe to move across
//! threads and through the event loop). The render thread uploads it into a
//! [`RegionMesh`] which owns the vertex, index and instance buffers.

use cgmath::{Point3, Vector3};
use wgpu::util::DeviceExt;

use crate::{
    animation::LIFT_HEIGHT,
    data_structures::{
        bounds::Aabb,
        instance::{Instance, InstanceRaw},
    },
};

pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RegionVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex for RegionVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<RegionVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// World-space triangle list of one region, ready for upload.
#[derive(Clone, Debug)]
pub struct RegionGeometry {
    pub vertices: Vec<RegionVertex>,
    pub indices: Vec<u32>,
    pub bounds: Aabb,
}

impl RegionGeometry {
    /// `None` when there is nothing to draw.
    pub fn new(vertices: Vec<RegionVertex>, indices: Vec<u32>) -> Option<Self> {
        if indices.is_empty() {
            return None;
        }
        let bounds = Aabb::from_points(vertices.iter().map(|v| Point3::from(v.position)))?;
        Some(Self {
            vertices,
            indices,
            bounds,
        })
    }

    /// The bounds shifted up to where the mesh sits when fully lifted.
    ///
    /// The camera frames a hovered region against this box, so the framing
    /// already matches the region's eventual resting height.
    pub fn framing_bounds(&self) -> Aabb {
        self.bounds.translated(Vector3::new(0.0, LIFT_HEIGHT, 0.0))
    }
}

/// A region uploaded to the GPU. Drawn as a single instance.
#[derive(Debug)]
pub struct RegionMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub instance_buffer: wgpu::Buffer,
    pub num_elements: u32,
}

impl RegionMesh {
    pub fn new(
        device: &wgpu::Device,
        name: &str,
        geometry: &RegionGeometry,
        color: Vector3<f32>,
    ) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Vertex Buffer", name)),
            contents: bytemuck::cast_slice(&geometry.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Index Buffer", name)),
            contents: bytemuck::cast_slice(&geometry.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Instance Buffer", name)),
            contents: bytemuck::cast_slice(&[Instance::new(color).to_raw()]),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        Self {
            vertex_buffer,
            index_buffer,
            instance_buffer,
            num_elements: geometry.indices.len() as u32,
        }
    }

    pub fn write_instance(&self, queue: &wgpu::Queue, instance: &Instance) {
        let raw: [InstanceRaw; 1] = [instance.to_raw()];
        queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&raw));
    }
}

pub trait DrawRegion<'a> {
    fn draw_region(&mut self, mesh: &'a RegionMesh);
}

impl<'a, 'b> DrawRegion<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_region(&mut self, mesh: &'b RegionMesh) {
        self.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        self.set_vertex_buffer(1, mesh.instance_buffer.slice(..));
        self.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..mesh.num_elements, 0, 0..1);
    }
}
