//! WGPU-based rendering engine
//!
//! Owns the surface, device, depth buffer, the four vertex stream buffers and
//! the global uniform block, and issues one unindexed triangle-list draw per
//! frame covering every uploaded vertex.

use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::gfx::{
    resources::{
        global_bindings::{update_global_ubo, GlobalBindings, GlobalUBO, LightConfig},
        texture_resource::TextureResource,
    },
    scene::{FrameStreams, FrameUpdate, Scene},
};
use crate::wgpu_utils::VertexStreamBuffer;

use super::pipeline_manager::{create_render_pipeline, PipelineConfig};

/// GPU buffers for the four per-vertex attribute streams, in slot order
struct StreamBuffers {
    positions: VertexStreamBuffer<f32>,
    colors: VertexStreamBuffer<f32>,
    normals: VertexStreamBuffer<f32>,
    specular: VertexStreamBuffer<f32>,
}

impl StreamBuffers {
    fn new(device: &wgpu::Device) -> Self {
        Self {
            positions: VertexStreamBuffer::new(device, "positions"),
            colors: VertexStreamBuffer::new(device, "colors"),
            normals: VertexStreamBuffer::new(device, "normals"),
            specular: VertexStreamBuffer::new(device, "specular"),
        }
    }

    fn upload_geometry(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, streams: &FrameStreams) {
        self.positions.upload(device, queue, &streams.positions);
        self.normals.upload(device, queue, &streams.normals);
        self.specular.upload(device, queue, &streams.specular);
    }

    fn upload_colors(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, streams: &FrameStreams) {
        self.colors.upload(device, queue, &streams.colors);
    }
}

/// Core rendering engine managing GPU resources and the draw call
///
/// The RenderEngine handles:
/// - Surface and device management
/// - Pipeline creation with logged shader diagnostics
/// - Depth buffer handling
/// - Change-driven vertex stream uploads
/// - Per-frame uniform updates
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    pipeline: Option<wgpu::RenderPipeline>,
    global_ubo: GlobalUBO,
    global_bindings: GlobalBindings,
    buffers: StreamBuffers,
    streams: FrameStreams,
    light: LightConfig,
    clear_color: wgpu::Color,
}

impl RenderEngine {
    /// Creates a new render engine for the given window
    ///
    /// # Arguments
    /// * `window` - Window surface target for rendering
    /// * `width` - Initial surface width in pixels
    /// * `height` - Initial surface height in pixels
    /// * `render_config` - Clear color and lighting constants
    ///
    /// # Errors
    /// Fails if no surface, adapter or device can be created. A shader
    /// that does not compile is not an error here: it is logged and every
    /// later [`RenderEngine::render_frame`] returns [`RenderError::NoPipeline`].
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        render_config: &RenderConfig,
    ) -> Result<RenderEngine, RenderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("using adapter {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits::downlevel_defaults(),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .ok_or(RenderError::NoSurfaceFormat)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_capabilities
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture =
            TextureResource::create_depth_texture(&device, &config, "depth_texture");

        let global_ubo = GlobalUBO::new(&device);
        let global_bindings = GlobalBindings::new(&device, &global_ubo);

        let pipeline = create_render_pipeline(
            &device,
            &PipelineConfig::default().with_color_format(format),
            include_str!("shader.wgsl"),
            &[global_bindings.bind_group_layout()],
        );
        if pipeline.is_none() {
            log::error!("render pipeline unavailable, frames will not be drawn");
        }

        let buffers = StreamBuffers::new(&device);
        let clear = render_config.clear_color;

        Ok(RenderEngine {
            surface,
            device,
            queue,
            config,
            depth_texture,
            pipeline,
            global_ubo,
            global_bindings,
            buffers,
            streams: FrameStreams::default(),
            light: LightConfig::from(render_config),
            clear_color: wgpu::Color {
                r: clear.r as f64,
                g: clear.g as f64,
                b: clear.b as f64,
                a: clear.a as f64,
            },
        })
    }

    /// Gathers and uploads all four streams from scratch
    pub fn upload_scene(&mut self, scene: &Scene) -> Result<(), RenderError> {
        self.streams = scene.streams()?;
        self.buffers
            .upload_geometry(&self.device, &self.queue, &self.streams);
        self.buffers
            .upload_colors(&self.device, &self.queue, &self.streams);
        log::debug!("uploaded {} vertices", self.streams.vertex_count());
        Ok(())
    }

    /// Re-uploads only the streams a tick reported as changed
    pub fn apply_update(&mut self, scene: &Scene, update: FrameUpdate) -> Result<(), RenderError> {
        scene.refresh_streams(&mut self.streams, update)?;
        if update.geometry_changed {
            self.buffers
                .upload_geometry(&self.device, &self.queue, &self.streams);
        }
        if update.colors_changed {
            self.buffers
                .upload_colors(&self.device, &self.queue, &self.streams);
        }
        Ok(())
    }

    /// Writes this frame's uniforms and draws the uploaded streams
    ///
    /// # Errors
    /// [`RenderError::NoPipeline`] when the shader failed to build, or a
    /// surface error when the swap chain image cannot be acquired.
    pub fn render_frame(&mut self, scene: &Scene) -> Result<(), RenderError> {
        let pipeline = self.pipeline.as_ref().ok_or(RenderError::NoPipeline)?;

        update_global_ubo(&self.global_ubo, &self.queue, scene, self.light);

        let surface_texture = self.surface.get_current_texture()?;
        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_pipeline(pipeline);
            render_pass.set_bind_group(0, self.global_bindings.bind_group(), &[]);
            render_pass.set_vertex_buffer(0, self.buffers.positions.slice());
            render_pass.set_vertex_buffer(1, self.buffers.colors.slice());
            render_pass.set_vertex_buffer(2, self.buffers.normals.slice());
            render_pass.set_vertex_buffer(3, self.buffers.specular.slice());
            render_pass.draw(0..self.streams.vertex_count(), 0..1);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }

    /// Resizes the surface and recreates the depth texture
    ///
    /// Zero-sized requests (minimized windows) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
    }

    /// Reconfigures the surface at its current size, e.g. after it was lost
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn vertex_count(&self) -> u32 {
        self.streams.vertex_count()
    }
}
