//! Procedural particle field.
//!
//! Positions and colors are allocated once at scene construction. After that
//! the only thing that changes is the field's rigid orientation, which is a
//! direct function of elapsed time rather than an accumulated angle.

use crate::constants::*;
use crate::error::{invalid, Result};
use glam::Vec2;
use rand::Rng;

/// One point of the field, laid out for direct upload as an interleaved
/// `[x, y, z, r, g, b]` vertex.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Particle {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldSpec {
    pub count: u32,
    pub half_extent: f32,
}

impl Default for FieldSpec {
    fn default() -> Self {
        Self {
            count: PARTICLE_COUNT,
            half_extent: FIELD_HALF_EXTENT,
        }
    }
}

impl FieldSpec {
    pub fn validate(&self) -> Result<()> {
        if self.count == 0 {
            return Err(invalid("particle count must be positive"));
        }
        if !self.half_extent.is_finite() || self.half_extent <= 0.0 {
            return Err(invalid(format!(
                "field half-extent must be a positive finite number, got {}",
                self.half_extent
            )));
        }
        Ok(())
    }
}

/// Generate `spec.count` particles uniformly inside the cube `[-h, h]^3`,
/// colored from the blue-to-purple HSL band.
pub fn generate<R: Rng + ?Sized>(spec: &FieldSpec, rng: &mut R) -> Result<Vec<Particle>> {
    spec.validate()?;
    let h = spec.half_extent;
    let particles = (0..spec.count)
        .map(|_| {
            let position = [
                (rng.gen::<f32>() - 0.5) * 2.0 * h,
                (rng.gen::<f32>() - 0.5) * 2.0 * h,
                (rng.gen::<f32>() - 0.5) * 2.0 * h,
            ];
            let hue = PARTICLE_HUE_MIN + rng.gen::<f32>() * PARTICLE_HUE_SPAN;
            let lightness = PARTICLE_LIGHTNESS_MIN + rng.gen::<f32>() * PARTICLE_LIGHTNESS_SPAN;
            Particle {
                position,
                color: hsl_to_rgb(hue, PARTICLE_SATURATION, lightness),
            }
        })
        .collect();
    Ok(particles)
}

/// HSL (all components in \[0, 1\]) to normalized RGB.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    let h = h.rem_euclid(1.0);
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);
    if s == 0.0 {
        return [l, l, l];
    }
    let hi = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let lo = 2.0 * l - hi;
    [
        hue_channel(lo, hi, h + 1.0 / 3.0),
        hue_channel(lo, hi, h),
        hue_channel(lo, hi, h - 1.0 / 3.0),
    ]
}

#[inline]
fn hue_channel(lo: f32, hi: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        lo + (hi - lo) * 6.0 * t
    } else if t < 0.5 {
        hi
    } else if t < 2.0 / 3.0 {
        lo + (hi - lo) * 6.0 * (2.0 / 3.0 - t)
    } else {
        lo
    }
}

/// Field orientation `(x, y)` in radians at elapsed time `t`.
#[inline]
pub fn field_rotation(t: f32) -> Vec2 {
    Vec2::new(t * FIELD_ROTATION_RATE_X, t * FIELD_ROTATION_RATE_Y)
}

pub struct ParticleField {
    particles: Vec<Particle>,
    half_extent: f32,
    pub rotation: Vec2,
}

impl ParticleField {
    pub fn new<R: Rng + ?Sized>(spec: &FieldSpec, rng: &mut R) -> Result<Self> {
        let particles = generate(spec, rng)?;
        log::info!(
            "[particles] generated {} particles within ±{}",
            particles.len(),
            spec.half_extent
        );
        Ok(Self {
            particles,
            half_extent: spec.half_extent,
            rotation: Vec2::ZERO,
        })
    }

    pub fn update(&mut self, elapsed: f32) {
        self.rotation = field_rotation(elapsed);
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn half_extent(&self) -> f32 {
        self.half_extent
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Interleaved vertex bytes for the renderer.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.particles)
    }

    /// Flattened `[x, y, z, r, g, b, ...]` floats.
    pub fn vertex_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.particles)
    }
}
