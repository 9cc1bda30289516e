//! Window creation and the per-frame loop.
//!
//! [`AppState`] implements winit's [`ApplicationHandler`]. Each redraw advances
//! the simulated clock by one step, recomputes the three model matrices, draws,
//! and, once the capture key went down, reads the next drawn frame back and
//! writes it to disk.

use std::sync::Arc;

use glam::{Mat4, Vec3};
use orrery_capture::CaptureSession;
use orrery_config::Config;
use orrery_render::{
    Camera, FrameOutcome, RenderContext, RenderError, SceneRenderer, ShaderLibrary, SurfaceError,
    init_render_context_blocking,
};
use orrery_sim::{BodyKind, SimulationClock, SolarSystem, SystemTransforms};
use tracing::{debug, error, info, instrument, warn};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::error::AppError;
use crate::input::{KeyBindings, KeyboardState};

/// Window attributes for the configured title and size.
pub fn window_attributes_from_config(config: &Config) -> WindowAttributes {
    WindowAttributes::default()
        .with_title(config.window.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(
            config.window.width as f64,
            config.window.height as f64,
        ))
}

/// Camera described by the `render` section, aspect from the window size.
pub fn camera_from_config(config: &Config) -> Camera {
    let render = &config.render;
    let mut camera = Camera {
        eye: Vec3::from_array(render.camera_eye),
        target: Vec3::from_array(render.camera_target),
        up: Vec3::Y,
        fov_y: render.fov_y_degrees.to_radians(),
        near: render.near,
        far: render.far,
        ..Camera::default()
    };
    camera.set_aspect_ratio(config.window.width, config.window.height);
    camera
}

pub fn clear_color_from_config(config: &Config) -> wgpu::Color {
    let [r, g, b] = config.render.clear_color;
    wgpu::Color { r, g, b, a: 1.0 }
}

/// Model matrices in draw order, matching [`BodyKind::ALL`].
pub fn body_models(transforms: &SystemTransforms) -> [Mat4; 3] {
    BodyKind::ALL.map(|kind| transforms.get(kind))
}

/// A requested capture survives frames that were skipped or lost before
/// drawing; a read-back frame or a failed readback settles it.
fn capture_still_pending(pending: bool, result: &Result<FrameOutcome, RenderError>) -> bool {
    match result {
        Ok(FrameOutcome::Captured(_) | FrameOutcome::Presented)
        | Err(RenderError::Readback(_)) => false,
        Ok(FrameOutcome::Skipped) | Err(RenderError::Surface(_)) => pending,
    }
}

/// GPU-side state, created once the window exists.
struct Graphics {
    window: Arc<Window>,
    ctx: RenderContext,
    renderer: SceneRenderer,
}

/// Application state: simulation, input, capture session and graphics.
pub struct AppState {
    config: Config,
    bindings: KeyBindings,
    system: SolarSystem,
    clock: SimulationClock,
    captures: CaptureSession,
    keyboard: KeyboardState,
    /// Set by the capture key, cleared once a frame was read back or failed.
    pending_capture: bool,
    graphics: Option<Graphics>,
    fatal: Option<AppError>,
}

impl AppState {
    /// Build the state from a resolved config. Fails on unknown key names.
    pub fn new(config: Config) -> Result<Self, AppError> {
        let bindings = KeyBindings::from_config(&config.input)?;
        let clock = SimulationClock::new(config.simulation.day_step);
        let captures = CaptureSession::new(
            config.capture.output_dir.clone(),
            config.capture.prefix.clone(),
            config.capture.numbered_filenames,
        );

        Ok(Self {
            config,
            bindings,
            system: SolarSystem::default(),
            clock,
            captures,
            keyboard: KeyboardState::new(),
            pending_capture: false,
            graphics: None,
            fatal: None,
        })
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn bindings(&self) -> KeyBindings {
        self.bindings
    }

    /// The error that stopped the event loop, if any.
    pub fn take_error(&mut self) -> Option<AppError> {
        self.fatal.take()
    }

    fn init_graphics(&self, event_loop: &ActiveEventLoop) -> Result<Graphics, AppError> {
        let window = Arc::new(event_loop.create_window(window_attributes_from_config(&self.config))?);
        let ctx = init_render_context_blocking(window.clone(), self.config.window.vsync)?;

        let mut shaders = ShaderLibrary::new();
        if let Some(dir) = &self.config.render.shader_dir {
            shaders = shaders.with_shader_dir(dir);
        }
        let shader = shaders.load_unlit(&ctx.device)?;

        let mut renderer = SceneRenderer::new(
            &ctx,
            &shader,
            camera_from_config(&self.config),
            clear_color_from_config(&self.config),
        );
        for body in self.system.bodies() {
            renderer.add_cube(&ctx, body.kind.label(), body.size(), body.color);
        }

        let (width, height) = ctx.size();
        info!(
            "Rendering {} bodies at {width}x{height}",
            renderer.drawable_count()
        );
        Ok(Graphics {
            window,
            ctx,
            renderer,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: AppError) {
        error!("{err}");
        self.fatal = Some(err);
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        if self.bindings.quit_requested(&self.keyboard) {
            info!("Quit key pressed, shutting down");
            event_loop.exit();
            return;
        }
        self.pending_capture |= self.bindings.capture_requested(&self.keyboard);
        self.keyboard.clear_transients();

        let Some(graphics) = self.graphics.as_mut() else {
            return;
        };

        let day = self.clock.advance();
        let transforms = SystemTransforms::compute(&self.system, day);
        let every = self.config.debug.log_positions_every;
        if every > 0 && self.clock.frame_count() % every == 0 {
            debug!(
                day,
                earth = %transforms.position(BodyKind::Earth),
                moon = %transforms.position(BodyKind::Moon),
                "Body positions"
            );
        }

        let result = graphics
            .renderer
            .render(&graphics.ctx, &body_models(&transforms), self.pending_capture);
        self.pending_capture = capture_still_pending(self.pending_capture, &result);

        match result {
            Ok(FrameOutcome::Captured(frame)) => match self.captures.save(&frame) {
                Ok(path) => info!("Saved capture to {}", path.display()),
                Err(e) => error!("Capture failed: {e}"),
            },
            Ok(FrameOutcome::Presented | FrameOutcome::Skipped) => {}
            Err(RenderError::Readback(e)) => error!("Capture failed: {e}"),
            Err(RenderError::Surface(SurfaceError::Lost)) => {
                let size = graphics.window.inner_size();
                graphics.ctx.resize(size.width, size.height);
                graphics.renderer.resize(&graphics.ctx);
            }
            Err(RenderError::Surface(SurfaceError::OutOfMemory)) => {
                error!("GPU out of memory");
                event_loop.exit();
                return;
            }
            Err(RenderError::Surface(SurfaceError::Timeout)) => {
                warn!("Surface timeout, skipping frame");
            }
        }

        graphics.window.request_redraw();
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.graphics.is_some() {
            return;
        }
        match self.init_graphics(event_loop) {
            Ok(graphics) => {
                graphics.window.request_redraw();
                self.graphics = Some(graphics);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(graphics) = self.graphics.as_mut() {
                    graphics.ctx.resize(size.width, size.height);
                    graphics.renderer.resize(&graphics.ctx);
                    info!("Window resized to {}x{}", size.width, size.height);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.keyboard.process_event(&event);
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}

/// Create the event loop and run until the window closes.
#[instrument(skip_all)]
pub fn run(config: Config) -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;
    let mut app = AppState::new(config)?;
    event_loop.run_app(&mut app)?;
    match app.take_error() {
        Some(e) => Err(e),
        None => {
            info!(
                "Exited after {} frames ({:.2} simulated days)",
                app.clock().frame_count(),
                app.clock().day()
            );
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_render::ReadbackError;
    use winit::keyboard::KeyCode;

    #[test]
    fn test_window_attributes_use_config() {
        let attrs = window_attributes_from_config(&Config::default());
        assert_eq!(attrs.title, "Solar System");
        let size = attrs.inner_size.unwrap();
        let logical: winit::dpi::LogicalSize<f64> = size.to_logical(1.0);
        assert_eq!(logical.width, 1024.0);
        assert_eq!(logical.height, 576.0);
    }

    #[test]
    fn test_camera_from_default_config() {
        let camera = camera_from_config(&Config::default());
        assert_eq!(camera.eye, Vec3::new(30.0, 20.0, 90.0));
        assert_eq!(camera.target, Vec3::ZERO);
        assert!((camera.fov_y - 45f32.to_radians()).abs() < 1e-6);
        assert!((camera.aspect_ratio - 1024.0 / 576.0).abs() < 1e-6);
        assert_eq!((camera.near, camera.far), (0.1, 1000.0));
    }

    #[test]
    fn test_clear_color_from_config() {
        let color = clear_color_from_config(&Config::default());
        assert_eq!(
            color,
            wgpu::Color {
                r: 0.3,
                g: 0.4,
                b: 0.5,
                a: 1.0
            }
        );
    }

    #[test]
    fn test_body_models_in_draw_order() {
        let system = SolarSystem::default();
        let transforms = SystemTransforms::compute(&system, 2.0);
        let models = body_models(&transforms);
        assert_eq!(models[0], transforms.sun);
        assert_eq!(models[1], transforms.earth);
        assert_eq!(models[2], transforms.moon);
    }

    #[test]
    fn test_state_uses_configured_keys_and_step() {
        let mut config = Config::default();
        config.input.capture_key = "F12".to_string();
        config.simulation.day_step = 0.5;

        let state = AppState::new(config).unwrap();
        assert_eq!(state.bindings().capture, KeyCode::F12);
        assert_eq!(state.clock().step(), 0.5);
        assert_eq!(state.clock().frame_count(), 0);
    }

    #[test]
    fn test_capture_survives_skipped_and_lost_frames() {
        assert!(capture_still_pending(true, &Ok(FrameOutcome::Skipped)));
        assert!(capture_still_pending(
            true,
            &Err(RenderError::Surface(SurfaceError::Timeout))
        ));
        assert!(capture_still_pending(
            true,
            &Err(RenderError::Surface(SurfaceError::Lost))
        ));
        assert!(!capture_still_pending(false, &Ok(FrameOutcome::Skipped)));
    }

    #[test]
    fn test_capture_settles_once_read_back_or_failed() {
        let frame = orrery_capture::CapturedFrame::solid(1, 1, [0, 0, 0]).unwrap();
        assert!(!capture_still_pending(true, &Ok(FrameOutcome::Captured(frame))));
        assert!(!capture_still_pending(
            true,
            &Err(RenderError::Readback(ReadbackError::Cancelled))
        ));
        assert!(!capture_still_pending(false, &Ok(FrameOutcome::Presented)));
    }

    #[test]
    fn test_state_rejects_unknown_key() {
        let mut config = Config::default();
        config.input.quit_key = "Esc".to_string();
        assert!(matches!(
            AppState::new(config),
            Err(AppError::UnknownKey { binding: "quit_key", .. })
        ));
    }
}
