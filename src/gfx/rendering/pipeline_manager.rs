//! Render pipeline creation with shader diagnostics
//!
//! Compiles the WGSL source, reports every compiler message through `log`,
//! and returns no pipeline when compilation or validation fails so the
//! engine can keep running and report [`RenderError::NoPipeline`] per frame.
//!
//! [`RenderError::NoPipeline`]: crate::error::RenderError::NoPipeline

use wgpu::*;

use crate::gfx::{resources::TextureResource, scene::vertex::stream_layouts};

/// Configuration for creating the render pipeline
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub label: String,
    pub primitive_topology: PrimitiveTopology,
    pub cull_mode: Option<Face>,
    pub depth_format: Option<TextureFormat>,
    pub color_format: TextureFormat,
    pub blend: Option<BlendState>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            label: "Phong Pipeline".to_string(),
            primitive_topology: PrimitiveTopology::TriangleList,
            cull_mode: None,
            depth_format: Some(TextureResource::DEPTH_FORMAT),
            color_format: TextureFormat::Bgra8Unorm,
            blend: Some(Self::PREMULTIPLIED_OVER),
        }
    }
}

impl PipelineConfig {
    /// Source factor one, destination factor one minus source alpha
    pub const PREMULTIPLIED_OVER: BlendState = BlendState {
        color: BlendComponent {
            src_factor: BlendFactor::One,
            dst_factor: BlendFactor::OneMinusSrcAlpha,
            operation: BlendOperation::Add,
        },
        alpha: BlendComponent {
            src_factor: BlendFactor::One,
            dst_factor: BlendFactor::OneMinusSrcAlpha,
            operation: BlendOperation::Add,
        },
    };

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_owned();
        self
    }

    pub fn with_cull_mode(mut self, face: Option<Face>) -> Self {
        self.cull_mode = face;
        self
    }

    /// Sets the surface format the pipeline renders into (builder pattern)
    pub fn with_color_format(mut self, format: TextureFormat) -> Self {
        self.color_format = format;
        self
    }

    pub fn with_blend(mut self, blend: Option<BlendState>) -> Self {
        self.blend = blend;
        self
    }

    /// Disables depth testing (builder pattern)
    pub fn without_depth(mut self) -> Self {
        self.depth_format = None;
        self
    }
}

/// Compiles `source` and builds the pipeline described by `config`.
///
/// Returns `None` if the shader fails to compile or the pipeline fails
/// validation; the reasons are logged.
pub fn create_render_pipeline(
    device: &Device,
    config: &PipelineConfig,
    source: &str,
    bind_group_layouts: &[&BindGroupLayout],
) -> Option<RenderPipeline> {
    device.push_error_scope(ErrorFilter::Validation);

    let module = device.create_shader_module(ShaderModuleDescriptor {
        label: Some(&config.label),
        source: ShaderSource::Wgsl(source.into()),
    });

    let info = pollster::block_on(module.get_compilation_info());
    let mut compiled = true;
    for message in &info.messages {
        let location = message
            .location
            .as_ref()
            .map(|l| format!("{}:{}", l.line_number, l.line_position))
            .unwrap_or_else(|| "?".to_string());
        match message.message_type {
            CompilationMessageType::Error => {
                compiled = false;
                log::error!("shader '{}' {}: {}", config.label, location, message.message);
            }
            CompilationMessageType::Warning => {
                log::warn!("shader '{}' {}: {}", config.label, location, message.message);
            }
            CompilationMessageType::Info => {
                log::info!("shader '{}' {}: {}", config.label, location, message.message);
            }
        }
    }

    let layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
        label: Some(&format!("{} Layout", config.label)),
        bind_group_layouts,
        push_constant_ranges: &[],
    });

    let buffers = stream_layouts();
    let pipeline = device.create_render_pipeline(&RenderPipelineDescriptor {
        label: Some(&config.label),
        layout: Some(&layout),
        vertex: VertexState {
            module: &module,
            entry_point: Some("vs_main"),
            buffers: &buffers,
            compilation_options: PipelineCompilationOptions::default(),
        },
        fragment: Some(FragmentState {
            module: &module,
            entry_point: Some("fs_main"),
            targets: &[Some(ColorTargetState {
                format: config.color_format,
                blend: config.blend,
                write_mask: ColorWrites::ALL,
            })],
            compilation_options: PipelineCompilationOptions::default(),
        }),
        primitive: PrimitiveState {
            topology: config.primitive_topology,
            strip_index_format: None,
            front_face: FrontFace::Ccw,
            cull_mode: config.cull_mode,
            unclipped_depth: false,
            polygon_mode: PolygonMode::Fill,
            conservative: false,
        },
        depth_stencil: config.depth_format.map(|format| DepthStencilState {
            format,
            depth_write_enabled: true,
            depth_compare: CompareFunction::Less,
            stencil: StencilState::default(),
            bias: DepthBiasState::default(),
        }),
        multisample: MultisampleState::default(),
        multiview: None,
        cache: None,
    });

    if let Some(error) = pollster::block_on(device.pop_error_scope()) {
        log::error!("pipeline '{}' failed validation: {}", config.label, error);
        return None;
    }
    if !compiled {
        return None;
    }

    log::info!("created pipeline '{}'", config.label);
    Some(pipeline)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.primitive_topology, PrimitiveTopology::TriangleList);
        assert_eq!(config.cull_mode, None);
        assert_eq!(config.depth_format, Some(TextureFormat::Depth32Float));
        assert_eq!(config.blend, Some(PipelineConfig::PREMULTIPLIED_OVER));
    }

    #[test]
    fn test_builder() {
        let config = PipelineConfig::default()
            .with_label("test")
            .with_color_format(TextureFormat::Rgba8Unorm)
            .with_cull_mode(Some(Face::Back))
            .without_depth();
        assert_eq!(config.label, "test");
        assert_eq!(config.color_format, TextureFormat::Rgba8Unorm);
        assert_eq!(config.cull_mode, Some(Face::Back));
        assert!(config.depth_format.is_none());
    }

    #[test]
    fn test_shader_declares_the_stream_entry_points() {
        let source = include_str!("shader.wgsl");
        assert!(source.contains("fn vs_main"));
        assert!(source.contains("fn fs_main"));
        for location in 0..4 {
            assert!(source.contains(&format!("@location({location})")));
        }
    }
}
