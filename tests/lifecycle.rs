//! Mount, frame and unmount behaviour of the background against a
//! recording host.

use galaxy_bg::{
    Background, BackgroundError, Color, GalaxyParameters, GpuError, MountState, ParamError,
    ParticleBuffer, Placeholder, RenderHost, SceneHandle,
};

#[derive(Debug, Default)]
struct RecordingHost {
    supports_3d: bool,
    fail_scene: bool,
    probes: u32,
    scenes: Vec<usize>,
    frames_registered: bool,
    stop_calls: u32,
    placeholders: Vec<Color>,
}

impl RecordingHost {
    fn capable() -> Self {
        Self {
            supports_3d: true,
            ..Default::default()
        }
    }

    fn incapable() -> Self {
        Self::default()
    }
}

#[derive(Debug)]
struct RecordedScene {
    particles: usize,
    point_size: f32,
    rotations: Vec<f32>,
}

impl SceneHandle for RecordedScene {
    fn set_rotation(&mut self, angle: f32) {
        self.rotations.push(angle);
    }
}

impl RenderHost for RecordingHost {
    type Scene = RecordedScene;

    fn supports_3d(&mut self) -> bool {
        self.probes += 1;
        self.supports_3d
    }

    fn create_scene(
        &mut self,
        buffer: &ParticleBuffer,
        point_size: f32,
    ) -> Result<RecordedScene, GpuError> {
        if self.fail_scene {
            return Err(GpuError::NoContext);
        }
        self.scenes.push(buffer.len());
        Ok(RecordedScene {
            particles: buffer.len(),
            point_size,
            rotations: Vec::new(),
        })
    }

    fn show_placeholder(&mut self, placeholder: &Placeholder) {
        self.placeholders.push(placeholder.background);
    }

    fn start_frames(&mut self) {
        self.frames_registered = true;
    }

    fn stop_frames(&mut self) {
        self.frames_registered = false;
        self.stop_calls += 1;
    }
}

fn params() -> GalaxyParameters {
    GalaxyParameters::default()
        .with_particle_count(64)
        .with_point_size(0.02)
}

#[test]
fn test_unsupported_host_gets_placeholder_twice() {
    let mut host = RecordingHost::incapable();
    let mut bg = Background::with_seed(params(), 1).with_background(Color::rgb(0.1, 0.0, 0.2));

    for _ in 0..2 {
        let state = bg.mount(&mut host).unwrap();
        match state {
            MountState::Unsupported(placeholder) => {
                assert_eq!(placeholder.background, Color::rgb(0.1, 0.0, 0.2))
            }
            other => panic!("expected placeholder, got {:?}", other),
        }
    }
    assert!(host.scenes.is_empty());
    assert!(!host.frames_registered);
    assert_eq!(bg.frame(0.016), None);
    // the second mount was a no-op, so the host painted once
    assert_eq!(host.placeholders, vec![Color::rgb(0.1, 0.0, 0.2)]);
}

#[test]
fn test_placeholder_repainted_on_each_remount() {
    let mut host = RecordingHost::incapable();
    let mut bg = Background::with_seed(params(), 1).with_background(Color::WHITE);

    bg.mount(&mut host).unwrap();
    bg.unmount(&mut host);
    bg.mount(&mut host).unwrap();
    assert_eq!(host.placeholders, vec![Color::WHITE, Color::WHITE]);
}

#[test]
fn test_capable_host_never_paints_placeholder() {
    let mut host = RecordingHost::capable();
    let mut bg = Background::with_seed(params(), 1);
    bg.mount(&mut host).unwrap();
    assert!(host.placeholders.is_empty());
}

#[test]
fn test_remount_of_unsupported_host_reprobes_and_stays_placeholder() {
    let mut host = RecordingHost::incapable();
    let mut bg = Background::with_seed(params(), 1);

    bg.mount(&mut host).unwrap();
    bg.unmount(&mut host);
    assert!(bg.mount(&mut host).unwrap().is_unsupported());
    assert_eq!(host.probes, 2);
    assert!(host.scenes.is_empty());
    assert_eq!(host.stop_calls, 0);
}

#[test]
fn test_supported_host_builds_scene_once() {
    let mut host = RecordingHost::capable();
    let mut bg = Background::with_seed(params(), 1);

    let state = bg.mount(&mut host).unwrap();
    let MountState::Active(active) = state else {
        panic!("expected active scene");
    };
    assert_eq!(active.scene().particles, 64);
    assert_eq!(active.scene().point_size, 0.02);
    assert_eq!(active.buffer().len(), 64);
    assert!(host.frames_registered);

    for _ in 0..100 {
        bg.frame(0.016);
    }
    assert_eq!(host.scenes, vec![64]);
}

#[test]
fn test_rotation_is_sum_of_frame_increments() {
    let mut host = RecordingHost::capable();
    let mut bg = Background::with_seed(params(), 1).with_rotation_speed(0.25);
    bg.mount(&mut host).unwrap();

    let deltas = [0.016, 0.033, 0.008, 0.1, 0.016];
    let mut expected = 0.0;
    for d in deltas {
        expected += d * 0.25;
        bg.frame(d);
    }

    let rotations = &bg.scene_mut().unwrap().rotations;
    assert_eq!(rotations.len(), deltas.len());
    assert!(rotations.windows(2).all(|w| w[1] >= w[0]));
    assert!((rotations[rotations.len() - 1] - expected).abs() < 1e-6);
}

#[test]
fn test_unmount_deregisters_frames() {
    let mut host = RecordingHost::capable();
    let mut bg = Background::with_seed(params(), 1);
    bg.mount(&mut host).unwrap();
    assert!(host.frames_registered);

    bg.unmount(&mut host);
    assert!(!host.frames_registered);
    assert_eq!(host.stop_calls, 1);
    assert!(matches!(bg.state(), MountState::Unprobed));
    assert_eq!(bg.frame(1.0), None);

    // unmounting twice does not touch the host again
    bg.unmount(&mut host);
    assert_eq!(host.stop_calls, 1);
}

#[test]
fn test_same_parameters_are_memoized() {
    let mut host = RecordingHost::capable();
    let mut bg = Background::with_seed(params(), 1);
    bg.mount(&mut host).unwrap();

    assert!(!bg.set_parameters(&mut host, params()).unwrap());
    assert_eq!(host.scenes.len(), 1);

    let bigger = params().with_particle_count(128);
    assert!(bg.set_parameters(&mut host, bigger).unwrap());
    assert_eq!(host.scenes, vec![64, 128]);

    let MountState::Active(active) = bg.state() else {
        panic!("expected active scene");
    };
    assert_eq!(active.buffer().len(), active.scene().particles);
}

#[test]
fn test_parameters_change_before_mount_is_used_on_mount() {
    let mut host = RecordingHost::capable();
    let mut bg = Background::with_seed(params(), 1);
    assert!(!bg.set_parameters(&mut host, params().with_particle_count(10)).unwrap());
    assert!(host.scenes.is_empty());

    bg.mount(&mut host).unwrap();
    assert_eq!(host.scenes, vec![10]);
}

#[test]
fn test_rebuild_keeps_rotation() {
    let mut host = RecordingHost::capable();
    let mut bg = Background::with_seed(params(), 1).with_rotation_speed(1.0);
    bg.mount(&mut host).unwrap();
    bg.frame(0.5);

    bg.set_parameters(&mut host, params().with_branches(7)).unwrap();
    assert_eq!(bg.scene_mut().unwrap().rotations, vec![0.5]);
    assert_eq!(bg.frame(0.5), Some(1.0));
}

#[test]
fn test_scene_failure_after_probe_is_an_error() {
    let mut host = RecordingHost {
        supports_3d: true,
        fail_scene: true,
        ..Default::default()
    };
    let mut bg = Background::with_seed(params(), 1);
    assert!(bg.mount(&mut host).is_err());
    assert!(!host.frames_registered);
    assert!(matches!(bg.state(), MountState::Unprobed));
}

#[test]
fn test_failed_rebuild_keeps_previous_parameters() {
    let mut host = RecordingHost::capable();
    let mut bg = Background::with_seed(params(), 1);
    bg.mount(&mut host).unwrap();

    host.fail_scene = true;
    let result = bg.set_parameters(&mut host, params().with_particle_count(500));
    assert!(matches!(result, Err(BackgroundError::Gpu(GpuError::NoContext))));
    assert_eq!(bg.parameters(), &params());

    let MountState::Active(active) = bg.state() else {
        panic!("expected the old scene to stay active");
    };
    assert_eq!(active.buffer().len(), 64);
}

#[test]
fn test_invalid_parameters_are_rejected() {
    let mut host = RecordingHost::capable();
    let mut bg = Background::with_seed(params(), 1);
    bg.mount(&mut host).unwrap();

    let bad = params().with_randomness(f32::NAN, 3.0);
    let result = bg.set_parameters(&mut host, bad);
    assert!(matches!(
        result,
        Err(BackgroundError::Invalid(ParamError::NotFinite { field: "randomness" }))
    ));
    assert_eq!(bg.parameters(), &params());
    assert_eq!(host.scenes, vec![64]);
}

#[test]
fn test_invalid_parameters_fail_mount_without_probing() {
    let mut host = RecordingHost::capable();
    let mut bg = Background::with_seed(params().with_branches(0), 1);
    assert!(matches!(
        bg.mount(&mut host),
        Err(BackgroundError::Invalid(ParamError::ZeroBranches))
    ));
    assert_eq!(host.probes, 0);
    assert!(!host.frames_registered);
}
