//! # galaxy-bg
//!
//! A procedurally generated spiral galaxy, rendered as a full-window
//! background with wgpu and an orbit camera.
//!
//! ## Quick Start
//!
//! ```ignore
//! use galaxy_bg::prelude::*;
//!
//! fn main() -> Result<(), RunError> {
//!     Viewer::new()
//!         .with_parameters(
//!             GalaxyParameters::default()
//!                 .with_particle_count(100_000)
//!                 .with_branches(4)
//!                 .with_spin(1.5),
//!         )
//!         .with_camera_limits(2.0, 15.0)
//!         .run()
//! }
//! ```
//!
//! ## Pieces
//!
//! - [`galaxy::generate`] builds the point cloud from [`GalaxyParameters`] and
//!   any `rand::Rng`. Seed it for tests, use `thread_rng()` for variety.
//! - [`Background`] owns the mount lifecycle: it probes the [`RenderHost`]
//!   for 3D support, falls back to a [`Placeholder`] when there is none, and
//!   otherwise spins the galaxy one rigid rotation per frame.
//! - [`OrbitCamera`] and [`OrbitControls`] turn pointer, wheel and touch input
//!   into a bounded orbit view.
//! - [`Viewer`] wires all of it to a winit window.

pub mod background;
pub mod camera;
pub mod config;
pub mod error;
pub mod galaxy;
mod gpu;
pub mod input;
pub mod params;
pub mod rotation;
pub mod time;
mod viewer;

pub use background::{Background, MountState, Placeholder, RenderHost, SceneHandle};
pub use camera::OrbitCamera;
pub use config::{CameraConfig, GalaxyConfig};
pub use error::{BackgroundError, ConfigError, GpuError, ParamError, RunError};
pub use galaxy::{ParticleBuffer, Vertex};
pub use glam::Vec3;
pub use input::OrbitControls;
pub use params::{Color, GalaxyParameters};
pub use rotation::RotationState;
pub use viewer::Viewer;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use galaxy_bg::prelude::*;
/// ```
pub mod prelude {
    pub use crate::background::{Background, MountState, RenderHost, SceneHandle};
    pub use crate::camera::OrbitCamera;
    pub use crate::config::GalaxyConfig;
    pub use crate::error::{ConfigError, RunError};
    pub use crate::galaxy::{generate, ParticleBuffer};
    pub use crate::params::{Color, GalaxyParameters};
    pub use crate::viewer::Viewer;
    pub use crate::Vec3;
}
