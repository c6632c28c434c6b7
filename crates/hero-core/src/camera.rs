//! Camera description and the auto-rotating orbit rig.
//!
//! These types avoid platform APIs; the renderer builds its matrices from
//! them and the rig is advanced by the frame scheduler like any animator.

use crate::constants::*;
use crate::error::{invalid, Result};
use glam::{Mat4, Vec3};
use std::f32::consts::{FRAC_PI_2, TAU};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_Z),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 1.0,
            fovy_radians: CAMERA_FOVY_DEGREES.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }
}

/// Orbit around the target with zoom and pan locked; only auto-rotation moves it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraRig {
    pub distance: f32,
    pub auto_rotate_speed: f32,
    pub polar: f32,
    pub polar_min: f32,
    pub polar_max: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            distance: CAMERA_Z,
            auto_rotate_speed: AUTO_ROTATE_SPEED,
            polar: FRAC_PI_2,
            polar_min: POLAR_ANGLE_MIN,
            polar_max: POLAR_ANGLE_MAX,
        }
    }
}

impl CameraRig {
    pub fn validate(&self) -> Result<()> {
        if !self.distance.is_finite() || self.distance <= 0.0 {
            return Err(invalid(format!("camera distance {} must be positive", self.distance)));
        }
        if !(self.polar_min <= self.polar_max) {
            return Err(invalid("camera polar range is inverted"));
        }
        Ok(())
    }

    /// Azimuth at elapsed time; speed 1.0 is one revolution per minute.
    #[inline]
    pub fn azimuth(&self, elapsed: f32) -> f32 {
        elapsed * TAU / 60.0 * self.auto_rotate_speed
    }

    pub fn eye_at(&self, elapsed: f32, target: Vec3) -> Vec3 {
        let theta = self.azimuth(elapsed);
        let phi = self.polar.clamp(self.polar_min, self.polar_max);
        target
            + self.distance
                * Vec3::new(phi.sin() * theta.sin(), phi.cos(), phi.sin() * theta.cos())
    }
}
