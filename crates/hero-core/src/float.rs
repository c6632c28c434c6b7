//! Idle float motion for the decorative bodies.
//!
//! Every output is a pure function of elapsed time and the body's static
//! parameters, so the animation can be restarted or replayed at any `t`.

use crate::constants::*;
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GeometryKind {
    Cube { size: f32 },
    Octahedron { radius: f32 },
    Torus { radius: f32, tube: f32 },
    Sphere { radius: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub base_color: [f32; 3],
    pub metalness: f32,
    pub roughness: f32,
    pub emissive: [f32; 3],
    pub emissive_intensity: f32,
    pub opacity: f32,
    pub wireframe: bool,
}

impl Material {
    pub fn standard(base: u32, metalness: f32, roughness: f32, emissive: u32) -> Self {
        Self {
            base_color: hex_rgb(base),
            metalness,
            roughness,
            emissive: hex_rgb(emissive),
            emissive_intensity: EMISSIVE_INTENSITY,
            opacity: 1.0,
            wireframe: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloatParams {
    pub speed: f32,
    pub rotation_intensity: f32,
    pub float_intensity: f32,
    /// Static time offset so bodies sharing a speed never move in lockstep.
    pub phase: f32,
}

impl FloatParams {
    pub const fn new(speed: f32, rotation_intensity: f32, float_intensity: f32) -> Self {
        Self {
            speed,
            rotation_intensity,
            float_intensity,
            phase: 0.0,
        }
    }
}

/// Local transform offset produced by the float motion.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FloatPose {
    pub offset_y: f32,
    pub rotation: Vec3,
}

pub fn float_pose(params: &FloatParams, elapsed: f32) -> FloatPose {
    let phase = (elapsed + params.phase) / FLOAT_TIME_DIVISOR * params.speed;
    let (s, c) = phase.sin_cos();
    FloatPose {
        offset_y: s * FLOAT_RANGE * params.float_intensity,
        rotation: Vec3::new(
            c / FLOAT_ROTATION_XY_DIVISOR * params.rotation_intensity,
            s / FLOAT_ROTATION_XY_DIVISOR * params.rotation_intensity,
            s / FLOAT_ROTATION_Z_DIVISOR * params.rotation_intensity,
        ),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FloatingBodySpec {
    pub name: &'static str,
    pub base_position: Vec3,
    pub geometry: GeometryKind,
    pub float: FloatParams,
    pub material: Material,
}

/// The three decorative bodies of the landing view.
pub fn default_bodies() -> Vec<FloatingBodySpec> {
    vec![
        FloatingBodySpec {
            name: "cube",
            base_position: Vec3::new(-8.0, 4.0, -5.0),
            geometry: GeometryKind::Cube { size: 1.0 },
            float: FloatParams::new(1.5, 1.0, 2.0),
            material: Material::standard(0x3b82f6, 0.8, 0.2, 0x1e40af),
        },
        FloatingBodySpec {
            name: "octahedron",
            base_position: Vec3::new(8.0, -3.0, -8.0),
            geometry: GeometryKind::Octahedron { radius: 1.2 },
            float: FloatParams::new(2.0, 0.5, 1.5),
            material: Material::standard(0x8b5cf6, 0.9, 0.1, 0x7c3aed),
        },
        FloatingBodySpec {
            name: "torus",
            base_position: Vec3::new(0.0, 6.0, -10.0),
            geometry: GeometryKind::Torus {
                radius: 1.0,
                tube: 0.4,
            },
            float: FloatParams::new(1.8, 0.8, 1.0),
            material: Material::standard(0x06b6d4, 0.7, 0.3, 0x0891b2),
        },
    ]
}

/// Float animator over a fixed body set.
pub struct FloatingBodyAnimator {
    bodies: Vec<FloatingBodySpec>,
}

impl FloatingBodyAnimator {
    pub fn new(bodies: Vec<FloatingBodySpec>) -> Self {
        Self { bodies }
    }

    pub fn bodies(&self) -> &[FloatingBodySpec] {
        &self.bodies
    }

    /// Pose of every body at `elapsed`, in body order.
    pub fn poses(&self, elapsed: f32) -> impl Iterator<Item = FloatPose> + '_ {
        self.bodies.iter().map(move |b| float_pose(&b.float, elapsed))
    }
}
