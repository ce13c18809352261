//! Structural properties of generated galaxies.
//!
//! Generation is random by design, so these tests check shape invariants
//! over seeded runs rather than exact coordinates.

use std::f32::consts::{PI, TAU};

use galaxy_bg::galaxy::{branch_angle, branch_of, generate};
use galaxy_bg::{Color, GalaxyParameters, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Shortest distance between two angles, in [0, π].
fn angular_distance(a: f32, b: f32) -> f32 {
    let d = (a - b).rem_euclid(TAU);
    d.min(TAU - d)
}

fn planar_radius(p: Vec3) -> f32 {
    Vec3::new(p.x, 0.0, p.z).length()
}

#[test]
fn test_buffer_lengths_for_many_shapes() {
    for (count, branches) in [(1, 1), (2, 7), (333, 3), (4096, 5)] {
        let params = GalaxyParameters::default()
            .with_particle_count(count)
            .with_branches(branches);
        let buffer = generate(&params, &mut seeded(count as u64));
        assert_eq!(buffer.positions().len(), 3 * count as usize);
        assert_eq!(buffer.colors().len(), 3 * count as usize);
    }
}

#[test]
fn test_color_components_stay_in_unit_range() {
    let params = GalaxyParameters::default()
        .with_particle_count(10_000)
        .with_colors(Color::WHITE, Color::BLACK);
    let buffer = generate(&params, &mut seeded(3));
    assert!(buffer.colors().iter().all(|c| (0.0..=1.0).contains(c)));
}

#[test]
fn test_colors_follow_radial_gradient() {
    let params = GalaxyParameters::default()
        .with_particle_count(2000)
        .with_radius(4.0)
        .with_randomness(0.0, 1.0)
        .with_colors(Color::BLACK, Color::WHITE);
    let buffer = generate(&params, &mut seeded(11));
    for i in 0..buffer.len() {
        let t = planar_radius(buffer.position(i)) / 4.0;
        let c = buffer.color(i);
        assert!((c.x - t).abs() < 1e-3, "particle {}: colour {} vs t {}", i, c.x, t);
    }
}

#[test]
fn test_jitter_bounded_by_randomness() {
    let radius = 5.0;
    let randomness = 0.3;
    let params = GalaxyParameters::default()
        .with_particle_count(20_000)
        .with_radius(radius)
        .with_randomness(randomness, 2.0);
    let buffer = generate(&params, &mut seeded(5));

    // each axis jitters by at most randomness * r
    let bound = radius * (1.0 + randomness * 3f32.sqrt()) + 1e-3;
    for i in 0..buffer.len() {
        assert!(buffer.position(i).length() <= bound);
    }
}

#[test]
fn test_higher_power_tightens_jitter() {
    let base = GalaxyParameters::default()
        .with_particle_count(20_000)
        .with_randomness(0.5, 1.0);
    let loose = generate(&base, &mut seeded(8));
    let tight = generate(&base.clone().with_randomness(0.5, 6.0), &mut seeded(8));

    let mean_height = |buffer: &galaxy_bg::ParticleBuffer| {
        (0..buffer.len()).map(|i| buffer.position(i).y.abs()).sum::<f32>() / buffer.len() as f32
    };
    assert!(mean_height(&tight) < mean_height(&loose));
}

#[test]
fn test_branch_membership_by_index() {
    for i in 0..4 {
        assert_eq!(branch_of(i, 4), branch_of(i + 4, 4));
        assert_eq!(branch_angle(i, 4), branch_angle(i + 4, 4));
    }
    assert_ne!(branch_of(0, 4), branch_of(1, 4));
}

#[test]
fn test_zero_radius_has_no_nan() {
    let params = GalaxyParameters::default()
        .with_particle_count(50)
        .with_radius(0.0)
        .with_randomness(1.0, 1.0);
    let buffer = generate(&params, &mut seeded(0));
    assert!(buffer.positions().iter().all(|v| *v == 0.0));
    assert!(buffer.colors().iter().all(|v| v.is_finite()));
}

#[test]
fn test_empty_galaxy_is_not_an_error() {
    let params = GalaxyParameters::default().with_particle_count(0);
    let buffer = generate(&params, &mut seeded(0));
    assert!(buffer.is_empty());
    assert!(buffer.positions().is_empty());
    assert!(buffer.colors().is_empty());
}

#[test]
fn test_eight_particles_four_arms_no_jitter() {
    let params = GalaxyParameters::default()
        .with_particle_count(8)
        .with_branches(4)
        .with_radius(10.0)
        .with_spin(0.0)
        .with_randomness(0.0, 3.0);
    let buffer = generate(&params, &mut seeded(2024));

    for i in 0..8 {
        let p = buffer.position(i);
        assert_eq!(p.y, 0.0);
        assert!(planar_radius(p) <= 10.0 + 1e-4);
    }

    // without spin every particle sits exactly on its arm's angle
    for i in 0..8u32 {
        let p = buffer.position(i as usize);
        if planar_radius(p) < 1e-3 {
            continue;
        }
        let angle = p.z.atan2(p.x);
        assert!(angular_distance(angle, branch_angle(i, 4)) < 1e-3);
    }

    // the four arms are a quarter turn apart
    for arm in 0..4u32 {
        for other in (arm + 1)..4 {
            let d = angular_distance(branch_angle(arm, 4), branch_angle(other, 4));
            assert!(d >= PI / 2.0 - 1e-4);
        }
    }
}

#[test]
fn test_spin_twists_arms_with_radius() {
    let params = GalaxyParameters::default()
        .with_particle_count(400)
        .with_branches(1)
        .with_spin(0.5)
        .with_randomness(0.0, 1.0);
    let buffer = generate(&params, &mut seeded(6));
    for i in 0..buffer.len() {
        let p = buffer.position(i);
        let r = planar_radius(p);
        if r < 1e-3 {
            continue;
        }
        let expected = r * 0.5;
        assert!(angular_distance(p.z.atan2(p.x), expected) < 1e-2);
    }
}

#[test]
fn test_unseeded_runs_differ() {
    let params = GalaxyParameters::default().with_particle_count(256);
    let a = generate(&params, &mut rand::thread_rng());
    let b = generate(&params, &mut rand::thread_rng());
    assert_ne!(a, b);
}
