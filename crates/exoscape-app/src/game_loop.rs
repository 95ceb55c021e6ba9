//! Fixed-timestep loop driving the scene animation.
//!
//! Frame times are fed in by the caller instead of measured, so the same
//! sequence of frame times always yields the same sequence of simulation
//! steps. The headless runner feeds a constant 60 Hz frame time.

use tracing::warn;

/// Fixed simulation timestep: 60 Hz.
pub const FIXED_DT: f64 = 1.0 / 60.0;

/// Longest frame time accepted in one call; anything above is clamped so a
/// stall costs a slowdown instead of a burst of catch-up steps.
pub const MAX_FRAME_TIME: f64 = 0.25;

/// Accumulator state of the fixed-timestep loop.
#[derive(Debug, Default)]
pub struct FixedStepLoop {
    accumulator: f64,
    total_sim_time: f64,
    frame_count: u64,
    update_count: u64,
}

impl FixedStepLoop {
    /// Create a loop at simulation time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `frame_time` seconds, calling `update_fn(dt, sim_time)` once
    /// per fixed step (with `sim_time` at the end of that step). Returns the
    /// interpolation alpha in `[0, 1)` left in the accumulator.
    pub fn tick(&mut self, frame_time: f64, mut update_fn: impl FnMut(f64, f64)) -> f64 {
        let mut frame_time = frame_time.max(0.0);
        if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            frame_time = MAX_FRAME_TIME;
        }

        self.accumulator += frame_time;
        while self.accumulator >= FIXED_DT {
            self.total_sim_time += FIXED_DT;
            self.accumulator -= FIXED_DT;
            self.update_count += 1;
            update_fn(FIXED_DT, self.total_sim_time);
        }

        self.frame_count += 1;
        self.alpha()
    }

    /// Run `frames` frames of exactly one timestep each.
    pub fn run_frames(&mut self, frames: u32, mut update_fn: impl FnMut(f64, f64)) {
        for _ in 0..frames {
            self.tick(FIXED_DT, &mut update_fn);
        }
    }

    /// Interpolation alpha without advancing.
    pub fn alpha(&self) -> f64 {
        if self.accumulator > 0.0 {
            self.accumulator / FIXED_DT
        } else {
            0.0
        }
    }

    /// Frames processed.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Fixed steps executed.
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Simulated seconds.
    pub fn total_sim_time(&self) -> f64 {
        self.total_sim_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_step() {
        let mut loop_ = FixedStepLoop::new();
        let mut updates = 0u32;
        loop_.tick(FIXED_DT, |_, _| updates += 1);
        assert_eq!(updates, 1);
        assert!(loop_.alpha().abs() < 1e-9);
    }

    #[test]
    fn test_partial_step_accumulates() {
        let mut loop_ = FixedStepLoop::new();
        let mut updates = 0u32;
        let alpha = loop_.tick(0.25 * FIXED_DT, |_, _| updates += 1);
        assert_eq!(updates, 0);
        assert!(
            (alpha - 0.25).abs() < 1e-10,
            "alpha should be ~0.25, got {alpha}"
        );

        loop_.tick(FIXED_DT, |_, _| updates += 1);
        assert_eq!(updates, 1);
    }

    #[test]
    fn test_sim_time_passed_to_update_is_step_end() {
        let mut loop_ = FixedStepLoop::new();
        let mut seen = Vec::new();
        loop_.tick(3.0 * FIXED_DT + 1e-9, |_, t| seen.push(t));
        assert_eq!(seen.len(), 3);
        assert!((seen[2] - 3.0 * FIXED_DT).abs() < 1e-12);
    }

    #[test]
    fn test_long_frame_is_clamped() {
        let mut loop_ = FixedStepLoop::new();
        let mut updates = 0u32;
        loop_.tick(5.0, |_, _| updates += 1);
        let max_updates = (MAX_FRAME_TIME / FIXED_DT).ceil() as u32;
        assert!(
            updates <= max_updates,
            "Expected at most {max_updates} updates, got {updates}"
        );
        assert!(updates > 0);
    }

    #[test]
    fn test_negative_frame_time_is_ignored() {
        let mut loop_ = FixedStepLoop::new();
        let mut updates = 0u32;
        loop_.tick(-1.0, |_, _| updates += 1);
        assert_eq!(updates, 0);
        assert_eq!(loop_.frame_count(), 1);
    }

    #[test]
    fn test_run_frames_counts() {
        let mut loop_ = FixedStepLoop::new();
        let mut updates = 0u32;
        loop_.run_frames(600, |_, _| updates += 1);
        assert_eq!(loop_.frame_count(), 600);
        // Floating-point accumulation can drop or add a step at the edges.
        assert!((599..=601).contains(&updates), "got {updates} updates");
        assert_eq!(loop_.update_count(), u64::from(updates));
        let expected = loop_.update_count() as f64 * FIXED_DT;
        assert!((loop_.total_sim_time() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_deterministic_sequence() {
        let frame_times = [0.017, 0.015, 0.020, 0.016, 0.033, 0.008, 0.018];
        let mut a = FixedStepLoop::new();
        let mut b = FixedStepLoop::new();
        for &ft in &frame_times {
            let alpha_a = a.tick(ft, |_, _| {});
            let alpha_b = b.tick(ft, |_, _| {});
            assert!(
                (alpha_a - alpha_b).abs() < 1e-15,
                "Alphas diverged: {alpha_a} vs {alpha_b}"
            );
        }
        assert_eq!(a.update_count(), b.update_count());
    }
}
