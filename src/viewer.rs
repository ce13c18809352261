//! Native window runner.
//!
//! [`Viewer`] is the builder: configure, then call `.run()` to open a window
//! with the galaxy as its full-window background.

use std::num::NonZeroU32;
use std::sync::Arc;

use log::{debug, error, info, warn};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::background::{Background, Placeholder, RenderHost};
use crate::camera::OrbitCamera;
use crate::config::GalaxyConfig;
use crate::error::{GpuError, RunError};
use crate::galaxy::ParticleBuffer;
use crate::gpu::{GpuContext, PointCloud};
use crate::input::OrbitControls;
use crate::params::{Color, GalaxyParameters};
use crate::time::FrameClock;

/// A galaxy background window builder.
///
/// ```ignore
/// Viewer::new()
///     .with_parameters(GalaxyParameters::default().with_branches(5))
///     .with_seed(42)
///     .run()?;
/// ```
pub struct Viewer {
    config: GalaxyConfig,
    title: String,
}

impl Viewer {
    /// Viewer with the default galaxy.
    pub fn new() -> Self {
        Self {
            config: GalaxyConfig::default(),
            title: "Galaxy".to_string(),
        }
    }

    /// Replace the whole configuration.
    pub fn with_config(mut self, config: GalaxyConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_parameters(mut self, params: GalaxyParameters) -> Self {
        self.config.parameters = params;
        self
    }

    /// Make the generated galaxy reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Zoom distance range of the orbit camera.
    pub fn with_camera_limits(mut self, min: f32, max: f32) -> Self {
        self.config.camera.min_distance = min;
        self.config.camera.max_distance = max;
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.config.background = color;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Open the window. Blocks until it is closed.
    pub fn run(self) -> Result<(), RunError> {
        self.config.validate()?;
        let camera = self.config.camera.build()?;

        let background: Background<WindowHost> = match self.config.seed {
            Some(seed) => Background::with_seed(self.config.parameters.clone(), seed),
            None => Background::new(self.config.parameters.clone()),
        }
        .with_rotation_speed(self.config.rotation_speed)
        .with_background(self.config.background);

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut app = App {
            title: self.title,
            host: None,
            background,
            camera,
            controls: OrbitControls::new(),
            clock: FrameClock::new(),
            error: None,
        };
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new()
    }
}

/// CPU framebuffer that paints the placeholder on windows without a GPU.
struct PlaceholderSurface {
    _context: softbuffer::Context<Arc<Window>>,
    surface: softbuffer::Surface<Arc<Window>, Arc<Window>>,
    pixel: u32,
}

impl PlaceholderSurface {
    fn new(window: Arc<Window>, color: Color) -> Result<Self, softbuffer::SoftBufferError> {
        let context = softbuffer::Context::new(window.clone())?;
        let surface = softbuffer::Surface::new(&context, window)?;
        Ok(Self {
            _context: context,
            surface,
            pixel: color.to_rgb_u32(),
        })
    }

    /// Fill the whole window with the placeholder colour.
    fn paint(&mut self, size: PhysicalSize<u32>) -> Result<(), softbuffer::SoftBufferError> {
        let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return Ok(());
        };
        self.surface.resize(width, height)?;
        let mut buffer = self.surface.buffer_mut()?;
        buffer.fill(self.pixel);
        buffer.present()
    }
}

/// [`RenderHost`] backed by a winit window and a wgpu context.
struct WindowHost {
    window: Arc<Window>,
    gpu: Option<GpuContext>,
    placeholder: Option<PlaceholderSurface>,
    frames_registered: bool,
}

impl RenderHost for WindowHost {
    type Scene = PointCloud;

    fn supports_3d(&mut self) -> bool {
        if self.gpu.is_none() {
            self.gpu = pollster::block_on(GpuContext::probe(self.window.clone()));
        }
        self.gpu.is_some()
    }

    fn create_scene(
        &mut self,
        buffer: &ParticleBuffer,
        point_size: f32,
    ) -> Result<PointCloud, GpuError> {
        let gpu = self.gpu.as_ref().ok_or(GpuError::NoContext)?;
        let cloud = PointCloud::new(gpu, buffer, point_size);
        debug!("Uploaded {} particles", cloud.num_particles());
        Ok(cloud)
    }

    fn show_placeholder(&mut self, placeholder: &Placeholder) {
        match PlaceholderSurface::new(self.window.clone(), placeholder.background) {
            Ok(surface) => {
                self.placeholder = Some(surface);
                self.window.request_redraw();
            }
            Err(e) => warn!("Cannot paint placeholder: {}", e),
        }
    }

    fn start_frames(&mut self) {
        self.frames_registered = true;
        self.window.request_redraw();
    }

    fn stop_frames(&mut self) {
        self.frames_registered = false;
    }
}

struct App {
    title: String,
    host: Option<WindowHost>,
    background: Background<WindowHost>,
    camera: OrbitCamera,
    controls: OrbitControls,
    clock: FrameClock,
    error: Option<RunError>,
}

impl App {
    fn fail(&mut self, event_loop: &ActiveEventLoop, e: RunError) {
        error!("{}", e);
        self.error = Some(e);
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(host) = &mut self.host else {
            return;
        };
        if let Some(placeholder) = &mut host.placeholder {
            if let Err(e) = placeholder.paint(host.window.inner_size()) {
                warn!("Failed to paint placeholder: {}", e);
            }
            return;
        }
        if !host.frames_registered {
            return;
        }

        let delta = self.clock.tick();
        self.camera.update(delta);
        self.background.frame(delta);

        if self.clock.frame() % 600 == 0 {
            debug!("FPS: {:.1}", self.clock.fps());
        }

        let clear = self.background.background();
        if let (Some(gpu), Some(scene)) = (&mut host.gpu, self.background.scene_mut()) {
            match scene.render(gpu, &self.camera, clear) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu.reconfigure(),
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    error!("GPU out of memory");
                    event_loop.exit();
                    return;
                }
                Err(e) => error!("Render error: {:?}", e),
            }
        }

        if host.frames_registered {
            host.window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.host.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));
        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => return self.fail(event_loop, e.into()),
        };

        let mut host = WindowHost {
            window,
            gpu: None,
            placeholder: None,
            frames_registered: false,
        };
        let mounted = self
            .background
            .mount(&mut host)
            .map(|state| state.is_unsupported());
        self.host = Some(host);

        match mounted {
            Ok(true) => info!("Running without 3D rendering; showing the placeholder"),
            Ok(false) => self.clock.reset(),
            Err(e) => self.fail(event_loop, e.into()),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                if let Some(host) = &mut self.host {
                    self.background.unmount(host);
                }
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                let Some(host) = &mut self.host else {
                    return;
                };
                if let Some(gpu) = &mut host.gpu {
                    gpu.resize(size.width, size.height);
                }
                if host.placeholder.is_some() {
                    host.window.request_redraw();
                }
            }
            WindowEvent::Occluded(occluded) => {
                self.clock.set_paused(occluded);
                debug!(
                    "Window {}",
                    if self.clock.is_paused() { "hidden, rotation paused" } else { "visible" }
                );
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            other => {
                // pointer input only reaches the camera while the galaxy is live
                if self.background.is_active() {
                    self.controls.handle_event(&other, &mut self.camera);
                }
            }
        }
    }
}
