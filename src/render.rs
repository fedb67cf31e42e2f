//! Per-frame render passes.
//!
//! Every frame draws the loaded regions twice: once from the sun into the
//! shadow map, then lit from the camera into the surface.

use std::iter;

use crate::{
    context::Context,
    data_structures::model::{DrawRegion, RegionMesh},
    registry::RegionSlots,
};

fn shadow_pass(
    ctx: &Context,
    encoder: &mut wgpu::CommandEncoder,
    meshes: &RegionSlots<RegionMesh>,
) {
    let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("Shadow Pass"),
        color_attachments: &[],
        depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
            view: &ctx.light.shadow_map.view,
            depth_ops: Some(wgpu::Operations {
                load: wgpu::LoadOp::Clear(1.0),
                store: wgpu::StoreOp::Store,
            }),
            stencil_ops: None,
        }),
        occlusion_query_set: None,
        timestamp_writes: None,
    });
    pass.set_pipeline(&ctx.pipelines.shadow);
    pass.set_bind_group(0, &ctx.light.shadow_bind_group, &[]);
    for (_, mesh) in meshes.loaded() {
        pass.draw_region(mesh);
    }
}

fn main_pass(
    ctx: &Context,
    encoder: &mut wgpu::CommandEncoder,
    view: &wgpu::TextureView,
    meshes: &RegionSlots<RegionMesh>,
) {
    let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("Render Pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view,
            resolve_target: None,
            depth_slice: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(ctx.clear_colour),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
            view: &ctx.depth_texture.view,
            depth_ops: Some(wgpu::Operations {
                load: wgpu::LoadOp::Clear(1.0),
                store: wgpu::StoreOp::Store,
            }),
            stencil_ops: None,
        }),
        occlusion_query_set: None,
        timestamp_writes: None,
    });
    pass.set_pipeline(&ctx.pipelines.region);
    pass.set_bind_group(0, &ctx.camera.bind_group, &[]);
    pass.set_bind_group(1, &ctx.light.bind_group, &[]);
    for (_, mesh) in meshes.loaded() {
        pass.draw_region(mesh);
    }
}

/// Renders one frame and presents it.
pub fn render_frame(
    ctx: &Context,
    meshes: &RegionSlots<RegionMesh>,
) -> Result<(), wgpu::SurfaceError> {
    let output = ctx.surface.get_current_texture()?;
    let view = output
        .texture
        .create_view(&wgpu::TextureViewDescriptor::default());

    let mut encoder = ctx
        .device
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Render Encoder"),
        });

    shadow_pass(ctx, &mut encoder, meshes);
    main_pass(ctx, &mut encoder, &view, meshes);

    ctx.queue.submit(iter::once(encoder.finish()));
    output.present();
    Ok(())
}
