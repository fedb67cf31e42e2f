use crate::{
    data_structures::{
        instance::InstanceRaw,
        model::{RegionVertex, Vertex},
        texture::Texture,
    },
    pipelines::basic::mk_render_pipeline,
};

/// Depth-only pipeline rendering the regions from the light's point of view.
pub fn mk_shadow_pipeline(
    device: &wgpu::Device,
    shadow_bind_group_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Shadow Pipeline Layout"),
        bind_group_layouts: &[shadow_bind_group_layout],
        push_constant_ranges: &[],
    });
    let shader = wgpu::ShaderModuleDescriptor {
        label: Some("Shadow Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("shadow.wgsl").into()),
    };
    mk_render_pipeline(
        device,
        &layout,
        None,
        None,
        Some(Texture::DEPTH_FORMAT),
        // Pushes stored depth away from the light to avoid shadow acne
        wgpu::DepthBiasState {
            constant: 2,
            slope_scale: 2.0,
            clamp: 0.0,
        },
        &[RegionVertex::desc(), InstanceRaw::desc()],
        shader,
    )
}
