// Shared scene tuning constants used by the web and native front-ends.

// Particle field
pub const PARTICLE_COUNT: u32 = 1000;
pub const FIELD_HALF_EXTENT: f32 = 25.0; // positions drawn from [-h, h] per axis
pub const PARTICLE_HUE_MIN: f32 = 0.6; // blue
pub const PARTICLE_HUE_SPAN: f32 = 0.2; // up to purple
pub const PARTICLE_SATURATION: f32 = 0.8;
pub const PARTICLE_LIGHTNESS_MIN: f32 = 0.5;
pub const PARTICLE_LIGHTNESS_SPAN: f32 = 0.3;
pub const PARTICLE_SIZE: f32 = 0.05;
pub const PARTICLE_OPACITY: f32 = 0.6;

// Field rotation rates (radians per second of elapsed time)
pub const FIELD_ROTATION_RATE_X: f32 = 0.02;
pub const FIELD_ROTATION_RATE_Y: f32 = 0.03;

// Focal sphere
pub const SPHERE_RADIUS: f32 = 2.0;
pub const SPHERE_SHELL_RADIUS: f32 = 2.1; // wireframe shell around the sphere
pub const SPHERE_SHELL_OPACITY: f32 = 0.1;
pub const SPHERE_WOBBLE_RATE: f32 = 0.5;
pub const SPHERE_WOBBLE_AMPLITUDE: f32 = 0.2;
pub const SPHERE_SPIN_RATE: f32 = 0.3;
pub const SPHERE_BOB_RATE: f32 = 0.8;
pub const SPHERE_BOB_AMPLITUDE: f32 = 0.5;

// Float wrapper around the sphere
pub const SPHERE_FLOAT_SPEED: f32 = 1.0;
pub const SPHERE_FLOAT_ROTATION_INTENSITY: f32 = 0.3;
pub const SPHERE_FLOAT_INTENSITY: f32 = 0.5;

// Idle float motion shape
pub const FLOAT_TIME_DIVISOR: f32 = 4.0; // slows the float phase relative to speed
pub const FLOAT_ROTATION_XY_DIVISOR: f32 = 8.0;
pub const FLOAT_ROTATION_Z_DIVISOR: f32 = 20.0;
pub const FLOAT_RANGE: f32 = 0.1; // vertical range before floatIntensity scaling
pub const FLOAT_PHASE_MAX: f32 = 10_000.0; // upper bound for seeded per-body phase
pub const EMISSIVE_INTENSITY: f32 = 0.1;

// Camera
pub const CAMERA_Z: f32 = 15.0;
pub const CAMERA_FOVY_DEGREES: f32 = 75.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;
pub const AUTO_ROTATE_SPEED: f32 = 0.2; // 1.0 == one orbit per 60 seconds
pub const POLAR_ANGLE_MIN: f32 = std::f32::consts::PI / 2.2;
pub const POLAR_ANGLE_MAX: f32 = std::f32::consts::PI / 1.8;

// Pixel density
pub const DPR_MIN: f32 = 1.0;
pub const DPR_MAX: f32 = 2.0;
pub const RESOLUTION_FACTOR_MIN: f32 = 0.5;
pub const RESOLUTION_FACTOR_STEP: f32 = 0.1;
pub const FRAME_BUDGET_SEC: f32 = 1.0 / 45.0; // slower than this counts as a slow frame
pub const FRAME_FAST_SEC: f32 = 1.0 / 58.0; // faster than this counts as a fast frame
pub const SLOW_FRAMES_BEFORE_DROP: u32 = 20;
pub const FAST_FRAMES_BEFORE_RAISE: u32 = 120;

// Scroll-driven content transforms
pub const SECTION_PARALLAX_PX: f32 = 100.0;
/// Half-range of the counter-moving section content, which drifts downward.
pub const SECTION_COUNTER_PARALLAX_PX: f32 = 50.0;
pub const HERO_CONTENT_DRIFT_PERCENT: f32 = 50.0;
pub const HERO_FADE_END: f32 = 0.5;
pub const FADE_IN_END: f32 = 0.2;
pub const FADE_OUT_START: f32 = 0.8;

// Scheduler logging
pub const SKIP_LOG_EVERY: u32 = 120; // frames between repeated skip warnings per animator

/// Convert a packed `0xRRGGBB` color into normalized RGB.
#[inline]
pub fn hex_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}
