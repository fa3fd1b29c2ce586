//! Window, input and frame loop
//!
//! Maps keyboard and mouse input onto [`SceneCommand`]s, and per redraw
//! ticks the scene, re-uploads changed streams, then renders.

use std::sync::Arc;

use anyhow::Context;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{ElementState, KeyEvent, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::gfx::{
    geometry::Point3,
    rendering::RenderEngine,
    scene::{Scene, SceneCommand},
};

/// Translates a pressed key into a scene command.
///
/// W/S move the light along y, A/D pan the camera along x, Enter toggles
/// the world rotation.
pub fn command_for_key(key: KeyCode, config: &RenderConfig) -> Option<SceneCommand> {
    match key {
        KeyCode::KeyW => Some(SceneCommand::MoveLight(Point3::new(
            0.0,
            config.movement_speed,
            0.0,
        ))),
        KeyCode::KeyS => Some(SceneCommand::MoveLight(Point3::new(
            0.0,
            -config.movement_speed,
            0.0,
        ))),
        KeyCode::KeyA => Some(SceneCommand::PanCamera(-config.camera_pan_step)),
        KeyCode::KeyD => Some(SceneCommand::PanCamera(config.camera_pan_step)),
        KeyCode::Enter | KeyCode::NumpadEnter => Some(SceneCommand::ToggleWorldRotation),
        _ => None,
    }
}

pub struct RevolveApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct AppState {
    config: RenderConfig,
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    scene: Scene,
    pipeline_reported: bool,
    fatal: Option<anyhow::Error>,
}

impl RevolveApp {
    /// Create the application around an already populated scene
    pub fn new(config: RenderConfig, scene: Scene) -> anyhow::Result<Self> {
        let event_loop = EventLoop::new().context("failed to create event loop")?;

        Ok(Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                config,
                window: None,
                render_engine: None,
                scene,
                pipeline_reported: false,
                fatal: None,
            },
        })
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.app_state.scene
    }

    /// Run the application (consumes self and starts the event loop)
    pub fn run(mut self) -> anyhow::Result<()> {
        let event_loop = self
            .event_loop
            .take()
            .context("event loop already consumed")?;
        event_loop.set_control_flow(ControlFlow::Poll);

        event_loop
            .run_app(&mut self.app_state)
            .context("event loop terminated with an error")?;

        match self.app_state.fatal.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

/// Initializes logging and runs `scene` until the window closes.
///
/// Logging honours `RUST_LOG` and defaults to `info`.
pub fn run(config: RenderConfig, scene: Scene) -> anyhow::Result<()> {
    let env = env_logger::Env::default().default_filter_or("info");
    if let Err(e) = env_logger::Builder::from_env(env).try_init() {
        eprintln!("Warning: could not initialize logger: {}", e);
    }
    log::info!("starting {}", config.title);
    RevolveApp::new(config, scene)?.run()
}

impl AppState {
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{:#}", error);
        self.fatal = Some(error);
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(render_engine) = self.render_engine.as_mut() else {
            return;
        };

        let update = self.scene.tick();
        if let Err(error) = render_engine.apply_update(&self.scene, update) {
            self.fail(event_loop, anyhow::Error::new(error).context("failed to refresh vertex streams"));
            return;
        }

        match render_engine.render_frame(&self.scene) {
            Ok(()) => {}
            Err(RenderError::NoPipeline) => {
                if !self.pipeline_reported {
                    log::error!("{}", RenderError::NoPipeline);
                    self.pipeline_reported = true;
                }
            }
            Err(RenderError::Surface(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                log::warn!("surface lost, reconfiguring");
                render_engine.reconfigure();
            }
            Err(RenderError::Surface(wgpu::SurfaceError::Timeout)) => {
                log::warn!("timed out acquiring the next frame");
            }
            Err(error) => self.fail(event_loop, anyhow::Error::new(error).context("failed to render frame")),
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let (width, height) = self.config.window_size;
        let attributes = WindowAttributes::default()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(width, height));

        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(error) => {
                self.fail(event_loop, anyhow::Error::new(error).context("failed to create window"));
                return;
            }
        };
        self.window = Some(window.clone());

        let size = window.inner_size();
        let result = pollster::block_on(RenderEngine::new(
            window,
            size.width,
            size.height,
            &self.config,
        ));

        let mut renderer = match result {
            Ok(renderer) => renderer,
            Err(error) => {
                self.fail(event_loop, anyhow::Error::new(error).context("failed to initialize renderer"));
                return;
            }
        };

        if let Err(error) = renderer.upload_scene(&self.scene) {
            self.fail(event_loop, anyhow::Error::new(error).context("invalid scene geometry"));
            return;
        }
        log::info!("scene ready with {} vertices", renderer.vertex_count());
        self.render_engine = Some(renderer);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key_code),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                if key_code == KeyCode::Escape {
                    event_loop.exit();
                } else if let Some(command) = command_for_key(key_code, &self.config) {
                    self.scene.push_command(command);
                }
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                self.scene.push_command(SceneCommand::ToggleRandomColors);
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                if let Some(render_engine) = self.render_engine.as_mut() {
                    render_engine.resize(width, height);
                }
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => (),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_bindings() {
        let config = RenderConfig::default();
        assert_eq!(
            command_for_key(KeyCode::KeyW, &config),
            Some(SceneCommand::MoveLight(Point3::new(0.0, 0.05, 0.0)))
        );
        assert_eq!(
            command_for_key(KeyCode::KeyS, &config),
            Some(SceneCommand::MoveLight(Point3::new(0.0, -0.05, 0.0)))
        );
        assert_eq!(
            command_for_key(KeyCode::KeyA, &config),
            Some(SceneCommand::PanCamera(-0.01))
        );
        assert_eq!(
            command_for_key(KeyCode::KeyD, &config),
            Some(SceneCommand::PanCamera(0.01))
        );
        assert_eq!(
            command_for_key(KeyCode::Enter, &config),
            Some(SceneCommand::ToggleWorldRotation)
        );
        assert_eq!(command_for_key(KeyCode::KeyQ, &config), None);
    }

    #[test]
    fn test_key_bindings_follow_config() {
        let config = RenderConfig::default()
            .with_movement_speed(0.5)
            .with_camera_pan_step(0.2);
        assert_eq!(
            command_for_key(KeyCode::KeyW, &config),
            Some(SceneCommand::MoveLight(Point3::new(0.0, 0.5, 0.0)))
        );
        assert_eq!(
            command_for_key(KeyCode::KeyA, &config),
            Some(SceneCommand::PanCamera(-0.2))
        );
    }
}
