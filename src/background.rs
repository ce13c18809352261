//! Mount lifecycle of the galaxy background.
//!
//! A [`Background`] is driven by a [`RenderHost`], the thing that owns the
//! window and the GPU. Mounting probes the host once:
//!
//! ```text
//! Unprobed ──mount──► Unsupported   (placeholder, terminal until unmount)
//!          └────────► Active        (scene built, frames registered)
//! ```
//!
//! A host without 3D support is an ordinary outcome, reported as
//! [`MountState::Unsupported`] and handed to the host to paint, never as an
//! error. Invalid parameters and a failure to build the scene *after* a
//! successful probe are returned as `Err`.
//!
//! While active, [`Background::frame`] advances the rotation and hands the
//! angle to the scene as a single transform. The particle buffer is generated
//! once per distinct [`GalaxyParameters`] value and never touched by the frame
//! loop. [`Background::unmount`] deregisters the per-frame callback before
//! the scene is dropped.

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::{BackgroundError, GpuError};
use crate::galaxy::{self, ParticleBuffer};
use crate::params::{Color, GalaxyParameters};
use crate::rotation::{RotationState, DEFAULT_ROTATION_SPEED};

/// Scene object built by a host from a particle buffer.
pub trait SceneHandle {
    /// Apply the galaxy's rotation about its vertical axis, in radians.
    fn set_rotation(&mut self, angle: f32);
}

/// Window/GPU side of the background.
pub trait RenderHost {
    type Scene: SceneHandle;

    /// Whether a 3D graphics context can be obtained.
    fn supports_3d(&mut self) -> bool;

    /// Upload a point cloud. Only called after `supports_3d` returned `true`.
    fn create_scene(
        &mut self,
        buffer: &ParticleBuffer,
        point_size: f32,
    ) -> Result<Self::Scene, GpuError>;

    /// Show the static stand-in. Called once per mount that finds no 3D
    /// support.
    fn show_placeholder(&mut self, placeholder: &Placeholder);

    /// Register the per-frame callback.
    fn start_frames(&mut self);

    /// Deregister the per-frame callback.
    fn stop_frames(&mut self);
}

/// Static stand-in shown when the host has no 3D support.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placeholder {
    pub background: Color,
}

/// Everything that exists only while the background is active.
#[derive(Debug)]
pub struct ActiveScene<S> {
    scene: S,
    buffer: ParticleBuffer,
    generated_for: GalaxyParameters,
    rotation: RotationState,
}

impl<S> ActiveScene<S> {
    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    pub fn buffer(&self) -> &ParticleBuffer {
        &self.buffer
    }

    pub fn rotation(&self) -> &RotationState {
        &self.rotation
    }
}

/// Where the background is in its lifecycle.
#[derive(Debug)]
pub enum MountState<S> {
    Unprobed,
    Unsupported(Placeholder),
    Active(ActiveScene<S>),
}

impl<S> MountState<S> {
    pub fn is_active(&self) -> bool {
        matches!(self, MountState::Active(_))
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, MountState::Unsupported(_))
    }
}

/// The galaxy background component.
pub struct Background<H: RenderHost> {
    params: GalaxyParameters,
    rotation_speed: f32,
    background: Color,
    rng: StdRng,
    state: MountState<H::Scene>,
}

impl<H: RenderHost> Background<H> {
    /// Background with an unseeded random source.
    pub fn new(params: GalaxyParameters) -> Self {
        Self::with_rng(params, StdRng::from_entropy())
    }

    /// Background whose galaxies are reproducible from `seed`.
    pub fn with_seed(params: GalaxyParameters, seed: u64) -> Self {
        Self::with_rng(params, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(params: GalaxyParameters, rng: StdRng) -> Self {
        Self {
            params,
            rotation_speed: DEFAULT_ROTATION_SPEED,
            background: Color::BLACK,
            rng,
            state: MountState::Unprobed,
        }
    }

    /// Rotation rate in radians per second; takes effect on the next mount.
    pub fn with_rotation_speed(mut self, speed: f32) -> Self {
        self.rotation_speed = speed;
        self
    }

    /// Colour of the placeholder and of the cleared frame.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn parameters(&self) -> &GalaxyParameters {
        &self.params
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn state(&self) -> &MountState<H::Scene> {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// Mutable access to the live scene, if any.
    pub fn scene_mut(&mut self) -> Option<&mut H::Scene> {
        match &mut self.state {
            MountState::Active(active) => Some(&mut active.scene),
            _ => None,
        }
    }

    /// Probe the host and build the scene if it can render.
    ///
    /// Mounting a background that is already mounted returns its current state
    /// without probing again. Parameters are validated before the probe.
    pub fn mount(&mut self, host: &mut H) -> Result<&MountState<H::Scene>, BackgroundError> {
        if !matches!(self.state, MountState::Unprobed) {
            return Ok(&self.state);
        }
        self.params.validate()?;

        if !host.supports_3d() {
            warn!("3D rendering unavailable, showing static background");
            let placeholder = Placeholder {
                background: self.background,
            };
            host.show_placeholder(&placeholder);
            self.state = MountState::Unsupported(placeholder);
            return Ok(&self.state);
        }

        let active = self.build(host, self.params.clone())?;
        info!(
            "Galaxy mounted: {} particles, {} branches",
            active.buffer.len(),
            self.params.branches
        );
        self.state = MountState::Active(active);
        host.start_frames();
        Ok(&self.state)
    }

    /// Per-frame update. Returns the new rotation angle while active.
    pub fn frame(&mut self, delta: f32) -> Option<f32> {
        let MountState::Active(active) = &mut self.state else {
            return None;
        };
        let angle = active.rotation.advance(delta);
        active.scene.set_rotation(angle);
        Some(angle)
    }

    /// Replace the parameter set.
    ///
    /// While active, a value different from the one the current buffer was
    /// generated for rebuilds buffer and scene together; an equal value is a
    /// no-op. Returns whether a rebuild happened.
    ///
    /// On any error the previous parameters and scene stay in place.
    pub fn set_parameters(
        &mut self,
        host: &mut H,
        params: GalaxyParameters,
    ) -> Result<bool, BackgroundError> {
        params.validate()?;
        let needs_rebuild = match &self.state {
            MountState::Active(active) => active.generated_for != params,
            _ => false,
        };
        if !needs_rebuild {
            self.params = params;
            return Ok(false);
        }

        debug!("Galaxy parameters changed, regenerating");
        let fresh = self.build(host, params.clone())?;
        self.params = params;
        if let MountState::Active(active) = &mut self.state {
            let rotation = active.rotation;
            *active = fresh;
            active.rotation = rotation;
            active.scene.set_rotation(rotation.angle());
        }
        Ok(true)
    }

    /// Stop the frame callback and release the scene.
    ///
    /// The background returns to [`MountState::Unprobed`]; mounting again
    /// probes afresh and restarts the rotation from zero.
    pub fn unmount(&mut self, host: &mut H) {
        if self.state.is_active() {
            host.stop_frames();
            debug!("Galaxy unmounted");
        }
        self.state = MountState::Unprobed;
    }

    fn build(
        &mut self,
        host: &mut H,
        params: GalaxyParameters,
    ) -> Result<ActiveScene<H::Scene>, GpuError> {
        let buffer = galaxy::generate(&params, &mut self.rng);
        let scene = host.create_scene(&buffer, params.point_size)?;
        Ok(ActiveScene {
            scene,
            buffer,
            generated_for: params,
            rotation: RotationState::new(self.rotation_speed),
        })
    }
}
