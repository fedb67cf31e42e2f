//! Render pipelines and lighting setup.
//!
//! - `light` holds the light/fog uniform, the shadow map and their bind groups
//! - `basic` builds the lit region pipeline and the shared pipeline builder
//! - `shadow` builds the depth-only pipeline that fills the shadow map

pub mod basic;
pub mod light;
pub mod shadow;

/// All pipelines the viewer renders with, created once with the context.
#[derive(Debug)]
pub struct Pipelines {
    pub region: wgpu::RenderPipeline,
    pub shadow: wgpu::RenderPipeline,
}

impl Pipelines {
    pub fn new(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
        light: &light::LightResources,
    ) -> Self {
        Self {
            region: basic::mk_region_pipeline(
                device,
                config,
                camera_bind_group_layout,
                &light.bind_group_layout,
            ),
            shadow: shadow::mk_shadow_pipeline(device, &light.shadow_bind_group_layout),
        }
    }
}
