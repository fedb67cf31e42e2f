use cgmath::{EuclideanSpace, InnerSpace, Matrix4, MetricSpace, Point3, Vector3};
use wgpu::util::DeviceExt;

use crate::{
    camera::OPENGL_TO_WGPU_MATRIX,
    config::{Fog, Lighting},
    data_structures::texture::Texture,
};

/// Everything the shaders know about light and atmosphere.
///
/// All members are vec4 so the Rust and WGSL layouts agree without padding
/// fields.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    view_proj: [[f32; 4]; 4],
    // xyz: unit vector towards the light, w: intensity
    direction: [f32; 4],
    color: [f32; 4],
    // rgb: colour, w: intensity
    ambient: [f32; 4],
    fog_color: [f32; 4],
    // x: near, y: far
    fog_range: [f32; 4],
}

impl LightUniform {
    pub fn new(lighting: &Lighting, fog: &Fog) -> Self {
        let direction = light_direction(lighting);
        Self {
            view_proj: light_view_proj(lighting).into(),
            direction: [direction.x, direction.y, direction.z, lighting.sun_intensity],
            color: lighting.sun_color.extend(1.0).into(),
            ambient: lighting
                .ambient_color
                .extend(lighting.ambient_intensity)
                .into(),
            fog_color: fog.color.extend(1.0).into(),
            fog_range: [fog.near, fog.far, 0.0, 0.0],
        }
    }
}

/// Unit vector pointing from the light's target towards the light.
pub fn light_direction(lighting: &Lighting) -> Vector3<f32> {
    let direction = lighting.sun_position - lighting.sun_target;
    if direction.magnitude2() <= f32::EPSILON {
        Vector3::unit_y()
    } else {
        direction.normalize()
    }
}

/// Orthographic view-projection of the directional light used for shadows.
pub fn light_view_proj(lighting: &Lighting) -> Matrix4<f32> {
    let extent = lighting.shadow_extent;
    let distance = lighting.sun_position.distance(lighting.sun_target);
    let eye = Point3::from_vec(lighting.sun_target.to_vec() + light_direction(lighting) * distance);
    let view = Matrix4::look_at_rh(eye, lighting.sun_target, Vector3::unit_y());
    let proj = cgmath::ortho(-extent, extent, -extent, extent, 0.1, distance + extent * 2.0);
    OPENGL_TO_WGPU_MATRIX * proj * view
}

#[derive(Debug)]
pub struct LightResources {
    pub buffer: wgpu::Buffer,
    pub shadow_map: Texture,
    /// Uniform, shadow map and comparison sampler for the lit pass.
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
    /// Uniform only. The shadow pass writes the shadow map and cannot bind it.
    pub shadow_bind_group: wgpu::BindGroup,
    pub shadow_bind_group_layout: wgpu::BindGroupLayout,
}

impl LightResources {
    pub fn new(
        device: &wgpu::Device,
        lighting: &Lighting,
        fog: &Fog,
        shadow_map_size: u32,
    ) -> anyhow::Result<Self> {
        let uniform = LightUniform::new(lighting, fog);
        let buffer = mk_buffer(device, uniform);
        let shadow_map = Texture::create_shadow_map(device, shadow_map_size);
        let sampler = shadow_map
            .sampler
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("shadow map was created without a sampler"))?;

        let bind_group_layout = mk_bind_group_layout(device);
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&shadow_map.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
            label: Some("light_bind_group"),
        });

        let shadow_bind_group_layout = mk_uniform_layout(device);
        let shadow_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &shadow_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("shadow_bind_group"),
        });

        Ok(Self {
            buffer,
            shadow_map,
            bind_group,
            bind_group_layout,
            shadow_bind_group,
            shadow_bind_group_layout,
        })
    }
}

pub fn mk_buffer(device: &wgpu::Device, light_uniform: LightUniform) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Light Uniform Buffer"),
        contents: bytemuck::cast_slice(&[light_uniform]),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    })
}

fn uniform_entry() -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding: 0,
        visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

pub fn mk_uniform_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[uniform_entry()],
        label: Some("shadow_bind_group_layout"),
    })
}

pub fn mk_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[
            uniform_entry(),
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Depth,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Comparison),
                count: None,
            },
        ],
        label: Some("light_bind_group_layout"),
    })
}
