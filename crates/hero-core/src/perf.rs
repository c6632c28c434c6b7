//! Pixel-density governor: trades resolution for frame rate under load.

use crate::constants::*;

/// Clamp a device pixel ratio into the rendered range.
#[inline]
pub fn clamp_dpr(device_pixel_ratio: f32) -> f32 {
    if !device_pixel_ratio.is_finite() || device_pixel_ratio <= 0.0 {
        return DPR_MIN;
    }
    device_pixel_ratio.clamp(DPR_MIN, DPR_MAX)
}

#[derive(Clone, Debug)]
pub struct PixelDensityGovernor {
    factor: f32,
    slow_run: u32,
    fast_run: u32,
}

impl Default for PixelDensityGovernor {
    fn default() -> Self {
        Self {
            factor: 1.0,
            slow_run: 0,
            fast_run: 0,
        }
    }
}

impl PixelDensityGovernor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current resolution factor in \[RESOLUTION_FACTOR_MIN, 1\].
    pub fn factor(&self) -> f32 {
        self.factor
    }

    /// Feed one frame delta. Returns true when the factor changed.
    pub fn observe(&mut self, delta_sec: f32) -> bool {
        // zero deltas come from the first frame, long ones from a hidden tab
        if !(delta_sec > 0.0 && delta_sec < 0.5) {
            return false;
        }
        if delta_sec > FRAME_BUDGET_SEC {
            self.fast_run = 0;
            self.slow_run += 1;
            if self.slow_run >= SLOW_FRAMES_BEFORE_DROP && self.factor > RESOLUTION_FACTOR_MIN {
                self.slow_run = 0;
                self.factor = (self.factor - RESOLUTION_FACTOR_STEP).max(RESOLUTION_FACTOR_MIN);
                log::info!("[perf] lowering resolution factor to {:.2}", self.factor);
                return true;
            }
        } else if delta_sec < FRAME_FAST_SEC {
            self.slow_run = 0;
            self.fast_run += 1;
            if self.fast_run >= FAST_FRAMES_BEFORE_RAISE && self.factor < 1.0 {
                self.fast_run = 0;
                self.factor = (self.factor + RESOLUTION_FACTOR_STEP).min(1.0);
                log::info!("[perf] raising resolution factor to {:.2}", self.factor);
                return true;
            }
        } else {
            self.slow_run = 0;
            self.fast_run = 0;
        }
        false
    }

    /// Effective pixel ratio for the canvas backing store.
    pub fn pixel_ratio(&self, device_pixel_ratio: f32) -> f32 {
        clamp_dpr(device_pixel_ratio) * self.factor
    }
}
