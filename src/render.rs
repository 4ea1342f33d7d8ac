//! Rendering logic
//!
//! Per-frame driver: advance the time uniform, then draw the rain quad.

use anyhow::{Context, Result};
use rain_config::Config;
use rain_core::{FrameClock, MeshPlacement, QuadGeometry, RainMaterial};
use rain_renderer::{AtlasImage, GlyphTexture, RainPipeline};

use crate::gpu::GpuState;

/// Everything drawn each frame
pub struct RainScene {
    pub material: RainMaterial,
    pub clock: FrameClock,
    pub pipeline: RainPipeline,
    /// Quad placement, computed once for the startup surface size
    pub placement: MeshPlacement,
    /// Surface size at startup
    pub canvas_size: (u32, u32),
    /// Kept alive for the bind group
    _texture: GlyphTexture,
}

impl RainScene {
    /// Load the atlas and wire material, geometry and pipeline together
    pub fn new(gpu: &GpuState, config: &Config) -> Result<Self> {
        let canvas_size = (gpu.config.width, gpu.config.height);
        let (width, height) = (canvas_size.0 as f32, canvas_size.1 as f32);

        let image =
            AtlasImage::from_path(&config.atlas.path).context("Failed to load glyph atlas")?;
        let (atlas_w, atlas_h) = image.dimensions();
        if [atlas_w as f32, atlas_h as f32] != config.atlas.texture_size {
            log::warn!(
                "Atlas is {}x{} but the shader assumes {}x{}",
                atlas_w,
                atlas_h,
                config.atlas.texture_size[0],
                config.atlas.texture_size[1]
            );
        }
        let texture = GlyphTexture::new(&gpu.device, &gpu.queue, &image);

        let params = config.rain_params();
        log::info!("Rain params: trail {:.3}, speed {:.3}", params.trail, params.speed);
        let material = RainMaterial::new(params);

        let geometry = QuadGeometry::new();
        let placement = MeshPlacement::centered(width, height, config.effect.quad_scale);
        let transform = placement.clip_transform(width, height);

        let pipeline = RainPipeline::new(
            &gpu.device,
            gpu.format(),
            &texture,
            &geometry,
            &material,
            transform,
        );

        Ok(Self {
            material,
            clock: FrameClock::start(),
            pipeline,
            placement,
            canvas_size,
            _texture: texture,
        })
    }

    /// Write this tick's elapsed time into the material
    pub fn tick(&mut self) {
        self.material.set_time(self.clock.elapsed_secs());
    }
}

/// Render a single frame
pub fn render_frame(gpu: &GpuState, scene: &mut RainScene) {
    scene.tick();
    scene.pipeline.update_uniforms(&gpu.queue, &scene.material);

    let frame = match gpu.surface.get_current_texture() {
        Ok(f) => f,
        Err(e @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
            log::warn!("Surface {:?}, reconfiguring", e);
            gpu.reconfigure();
            return;
        }
        Err(e) => {
            log::warn!("Failed to get surface texture: {:?}", e);
            return;
        }
    };
    let frame_view = frame.texture.create_view(&Default::default());

    let mut encoder = gpu.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("Rain Encoder"),
    });

    {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Rain Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &frame_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        scene.pipeline.render(&mut pass);
    }

    gpu.queue.submit(std::iter::once(encoder.finish()));
    frame.present();
}
