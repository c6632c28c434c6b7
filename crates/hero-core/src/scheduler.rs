//! Per-frame driver.
//!
//! The scheduler owns the only clock. Each tick hands one elapsed-time value
//! to every registered animator, so all animators in a frame agree on `t`.
//! An animator that errors is skipped for that frame and logged; the others
//! still run.

use crate::constants::SKIP_LOG_EVERY;
use crate::error::Result;
use instant::Instant;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTick {
    /// Seconds since the clock started. Never decreases.
    pub elapsed: f32,
    /// Seconds since the previous tick.
    pub delta: f32,
    pub frame: u64,
}

pub type AnimatorFn = Box<dyn FnMut(&FrameTick) -> Result<()>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AnimatorId(u64);

struct Slot {
    id: AnimatorId,
    name: &'static str,
    run: AnimatorFn,
    failures: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub ran: usize,
    pub skipped: usize,
}

/// Wall clock started at scene mount.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameClock {
    started: Option<Instant>,
}

impl FrameClock {
    pub fn start(&mut self) {
        self.started = Some(Instant::now());
    }

    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }

    pub fn elapsed(&self) -> f32 {
        self.started.map_or(0.0, |s| s.elapsed().as_secs_f32())
    }

    pub fn stop(&mut self) {
        self.started = None;
    }
}

#[derive(Default)]
pub struct FrameScheduler {
    slots: Vec<Slot>,
    next_id: u64,
    frame: u64,
    last_elapsed: f32,
    clock: FrameClock,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        name: &'static str,
        run: impl FnMut(&FrameTick) -> Result<()> + 'static,
    ) -> AnimatorId {
        let id = AnimatorId(self.next_id);
        self.next_id += 1;
        self.slots.push(Slot {
            id,
            name,
            run: Box::new(run),
            failures: 0,
        });
        log::debug!("[scheduler] registered animator `{name}`");
        id
    }

    pub fn deregister(&mut self, id: AnimatorId) -> bool {
        let before = self.slots.len();
        self.slots.retain(|s| s.id != id);
        before != self.slots.len()
    }

    pub fn animator_count(&self) -> usize {
        self.slots.len()
    }

    pub fn animator_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.slots.iter().map(|s| s.name)
    }

    /// Start the wall clock; `elapsed` restarts from zero.
    pub fn start(&mut self) {
        self.clock.start();
        self.frame = 0;
        self.last_elapsed = 0.0;
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    /// Drop every animator and stop the clock. Later ticks do nothing.
    pub fn unmount(&mut self) {
        let n = self.slots.len();
        self.slots.clear();
        self.clock.stop();
        log::info!("[scheduler] unmounted, released {n} animators");
    }

    /// Tick from the wall clock.
    pub fn tick(&mut self) -> TickReport {
        if !self.clock.is_running() {
            return TickReport::default();
        }
        let elapsed = self.clock.elapsed();
        self.tick_at(elapsed)
    }

    /// Tick with an injected elapsed time (seconds since mount).
    pub fn tick_at(&mut self, elapsed: f32) -> TickReport {
        let mut report = TickReport::default();
        if self.slots.is_empty() {
            return report;
        }
        let elapsed = if elapsed.is_finite() {
            elapsed.max(self.last_elapsed)
        } else {
            self.last_elapsed
        };
        let tick = FrameTick {
            elapsed,
            delta: elapsed - self.last_elapsed,
            frame: self.frame,
        };
        self.last_elapsed = elapsed;
        self.frame += 1;

        for slot in &mut self.slots {
            match (slot.run)(&tick) {
                Ok(()) => report.ran += 1,
                Err(e) => {
                    slot.failures += 1;
                    report.skipped += 1;
                    if slot.failures == 1 || slot.failures % SKIP_LOG_EVERY == 0 {
                        log::warn!(
                            "[scheduler] skipped `{}` on frame {} ({} failures): {e}",
                            slot.name,
                            tick.frame,
                            slot.failures
                        );
                    }
                }
            }
        }
        report
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn last_elapsed(&self) -> f32 {
        self.last_elapsed
    }
}
