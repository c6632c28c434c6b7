use crate::constants::*;
use glam::Vec2;

/// Focal sphere pose: wobble/spin rotation and vertical bob.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SpherePose {
    pub rotation: Vec2,
    pub offset_y: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SphereSpec {
    pub radius: f32,
    pub shell_radius: f32,
}

impl Default for SphereSpec {
    fn default() -> Self {
        Self {
            radius: SPHERE_RADIUS,
            shell_radius: SPHERE_SHELL_RADIUS,
        }
    }
}

/// Sphere pose as a function of elapsed time only.
///
/// Pointer input is intentionally not wired in; rotation.x stays within
/// ±[`SPHERE_WOBBLE_AMPLITUDE`] and the bob within ±[`SPHERE_BOB_AMPLITUDE`].
#[inline]
pub fn sphere_pose(elapsed: f32) -> SpherePose {
    SpherePose {
        rotation: Vec2::new(
            (elapsed * SPHERE_WOBBLE_RATE).sin() * SPHERE_WOBBLE_AMPLITUDE,
            elapsed * SPHERE_SPIN_RATE,
        ),
        offset_y: (elapsed * SPHERE_BOB_RATE).sin() * SPHERE_BOB_AMPLITUDE,
    }
}
