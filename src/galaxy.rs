//! Procedural spiral-galaxy point cloud.
//!
//! [`generate`] maps a [`GalaxyParameters`] value to a [`ParticleBuffer`].
//! It has no state of its own; all variation comes from the random source
//! passed in, so a seeded RNG gives a reproducible galaxy and
//! `rand::thread_rng()` gives a fresh one on every start.
//!
//! # Shape
//!
//! Each particle picks a radius uniformly in `[0, radius)`, sits on arm
//! `i % branches`, and is swept around the centre by `radius * spin`.
//! Jitter is drawn independently per axis and scales with the particle's
//! radius, so the core stays tight and the arms fray towards the edge.
//! The disc lies in the x-z plane; y only ever receives jitter.
//!
//! ```ignore
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let buffer = galaxy_bg::galaxy::generate(&GalaxyParameters::default(), &mut rng);
//! assert_eq!(buffer.positions().len(), 3 * 50_000);
//! ```

use std::f32::consts::TAU;

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use rand::Rng;

use crate::params::GalaxyParameters;

/// One point as uploaded to the GPU.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

/// Generated point cloud: flat `x, y, z` positions and `r, g, b` colours.
///
/// Both sequences always hold exactly `3 * len()` values. The buffer is built
/// in one go by [`generate`] and never modified afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleBuffer {
    positions: Vec<f32>,
    colors: Vec<f32>,
}

impl ParticleBuffer {
    /// Number of particles.
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Flat positions, `x, y, z` per particle.
    #[inline]
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Flat colours, `r, g, b` per particle.
    #[inline]
    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    /// Position of particle `index`. Panics if out of range.
    pub fn position(&self, index: usize) -> Vec3 {
        Vec3::from_slice(&self.positions[index * 3..index * 3 + 3])
    }

    /// Colour of particle `index`. Panics if out of range.
    pub fn color(&self, index: usize) -> Vec3 {
        Vec3::from_slice(&self.colors[index * 3..index * 3 + 3])
    }

    /// Interleave positions and colours for a vertex buffer.
    pub fn vertices(&self) -> Vec<Vertex> {
        self.positions
            .chunks_exact(3)
            .zip(self.colors.chunks_exact(3))
            .map(|(p, c)| Vertex {
                position: [p[0], p[1], p[2]],
                color: [c[0], c[1], c[2]],
            })
            .collect()
    }
}

/// Arm that particle `index` belongs to.
///
/// Assignment is round-robin by index, so arm membership never depends on
/// the random source.
#[inline]
pub fn branch_of(index: u32, branches: u32) -> u32 {
    index % branches.max(1)
}

/// Base angle of the arm that particle `index` belongs to, in `[0, 2π)`.
#[inline]
pub fn branch_angle(index: u32, branches: u32) -> f32 {
    let branches = branches.max(1);
    branch_of(index, branches) as f32 / branches as f32 * TAU
}

/// Build a galaxy point cloud.
///
/// `params` is expected to have passed [`GalaxyParameters::validate`]; a zero
/// branch count is still treated as a single arm rather than dividing by zero.
pub fn generate<R: Rng + ?Sized>(params: &GalaxyParameters, rng: &mut R) -> ParticleBuffer {
    let count = params.particle_count as usize;
    let mut positions = Vec::with_capacity(count * 3);
    let mut colors = Vec::with_capacity(count * 3);

    let inside = params.inside_color.to_vec3();
    let outside = params.outside_color.to_vec3();

    for i in 0..params.particle_count {
        let r = rng.gen::<f32>() * params.radius;
        let angle = branch_angle(i, params.branches) + r * params.spin;

        let jitter_x = jitter(rng, params, r);
        let jitter_y = jitter(rng, params, r);
        let jitter_z = jitter(rng, params, r);

        positions.extend_from_slice(&[
            angle.cos() * r + jitter_x,
            jitter_y,
            angle.sin() * r + jitter_z,
        ]);

        // radius == 0 collapses everything onto the inside colour
        let t = if params.radius > 0.0 {
            (r / params.radius).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let color = inside.lerp(outside, t).clamp(Vec3::ZERO, Vec3::ONE);
        colors.extend_from_slice(&color.to_array());
    }

    ParticleBuffer { positions, colors }
}

/// Signed offset with magnitude `u^power * randomness * r`, `u` uniform in [0, 1).
fn jitter<R: Rng + ?Sized>(rng: &mut R, params: &GalaxyParameters, r: f32) -> f32 {
    let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
    sign * rng.gen::<f32>().powf(params.randomness_power) * params.randomness * r
}
