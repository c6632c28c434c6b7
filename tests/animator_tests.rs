// Host-side tests for the time-driven animators.

use hero_core::{
    default_bodies, float_pose, sphere_pose, CameraRig, FloatParams, FloatingBodyAnimator,
};
use std::f32::consts::PI;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

#[test]
fn sphere_rests_at_time_zero() {
    let pose = sphere_pose(0.0);
    assert_eq!(pose.rotation.x, 0.0);
    assert_eq!(pose.rotation.y, 0.0);
    assert_eq!(pose.offset_y, 0.0);
}

#[test]
fn sphere_at_pi() {
    let pose = sphere_pose(PI);
    assert!(approx(pose.rotation.y, 0.3 * PI));
    assert!(approx(pose.rotation.x, 0.2));
    assert!(approx(pose.offset_y, (0.8 * PI).sin() * 0.5));
}

#[test]
fn sphere_stays_in_its_envelope() {
    let mut t = 0.0f32;
    while t < 600.0 {
        let pose = sphere_pose(t);
        assert!(pose.rotation.x.abs() <= 0.2 + 1e-6);
        assert!(pose.offset_y.abs() <= 0.5 + 1e-6);
        t += 0.137;
    }
}

#[test]
fn animators_are_pure_functions_of_time() {
    let bodies = FloatingBodyAnimator::new(default_bodies());
    for t in [0.0, 1.25, 42.0, 1e4] {
        assert_eq!(sphere_pose(t), sphere_pose(t));
        let a: Vec<_> = bodies.poses(t).collect();
        let b: Vec<_> = bodies.poses(t).collect();
        assert_eq!(a, b);
    }
}

#[test]
fn default_bodies_match_the_landing_layout() {
    let bodies = default_bodies();
    assert_eq!(bodies.len(), 3);
    let speeds: Vec<f32> = bodies.iter().map(|b| b.float.speed).collect();
    assert_eq!(speeds, vec![1.5, 2.0, 1.8]);
    assert_eq!(bodies[0].base_position, glam::Vec3::new(-8.0, 4.0, -5.0));
    assert_eq!(bodies[2].name, "torus");
}

#[test]
fn float_offsets_scale_with_intensity() {
    let p = FloatParams::new(2.0, 0.5, 1.5);
    let mut t = 0.0f32;
    while t < 100.0 {
        let pose = float_pose(&p, t);
        assert!(pose.offset_y.abs() <= 0.1 * 1.5 + 1e-6);
        assert!(pose.rotation.x.abs() <= 0.5 / 8.0 + 1e-6);
        assert!(pose.rotation.z.abs() <= 0.5 / 20.0 + 1e-6);
        t += 0.25;
    }
}

#[test]
fn bodies_with_different_speeds_drift_apart() {
    let bodies = FloatingBodyAnimator::new(default_bodies());
    let specs = bodies.bodies();
    let normalized: Vec<f32> = bodies
        .poses(10.0)
        .zip(specs)
        .map(|(pose, spec)| pose.offset_y / (0.1 * spec.float.float_intensity))
        .collect();
    assert!((normalized[0] - normalized[1]).abs() > 0.1);
    assert!((normalized[0] - normalized[2]).abs() > 0.1);
}

#[test]
fn phase_shifts_the_float_in_time() {
    let base = FloatParams::new(1.8, 0.8, 1.0);
    let shifted = FloatParams { phase: 3.0, ..base };
    assert_eq!(float_pose(&shifted, 2.0), float_pose(&base, 5.0));
}

#[test]
fn camera_orbit_starts_on_axis_and_keeps_distance() {
    let rig = CameraRig::default();
    let eye = rig.eye_at(0.0, glam::Vec3::ZERO);
    assert!(approx(eye.x, 0.0));
    assert!(approx(eye.y, 0.0));
    assert!(approx(eye.z, 15.0));
    // one revolution takes 60 / speed seconds
    let full = rig.eye_at(300.0, glam::Vec3::ZERO);
    assert!((full - eye).length() < 1e-3);
    let quarter = rig.eye_at(75.0, glam::Vec3::ZERO);
    assert!((quarter.length() - 15.0).abs() < 1e-3);
    assert!((quarter.x - 15.0).abs() < 1e-3);
}
