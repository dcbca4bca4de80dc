//! Minimal stand-in for the engine's per-frame loop.

use tracing::debug;

const DEFAULT_FIXED_DELTA: f32 = 1.0 / 30.0;
const DEFAULT_FRAMES: u32 = 30;

/// Anything the host loop ticks once per frame.
pub trait Behavior {
    fn update(&mut self, delta_time: f32);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameParams {
    pub fixed_delta: f32,
    pub frames: u32,
}

impl FrameParams {
    pub fn from_env() -> Self {
        let fixed_delta = std::env::var("HOST_FIXED_DT")
            .ok()
            .and_then(|val| val.parse().ok())
            .filter(|dt: &f32| dt.is_finite() && *dt > 0.0)
            .unwrap_or(DEFAULT_FIXED_DELTA);
        let frames = std::env::var("HOST_FRAMES")
            .ok()
            .and_then(|val| val.parse().ok())
            .unwrap_or(DEFAULT_FRAMES);
        Self {
            fixed_delta,
            frames,
        }
    }
}

impl Default for FrameParams {
    fn default() -> Self {
        Self {
            fixed_delta: DEFAULT_FIXED_DELTA,
            frames: DEFAULT_FRAMES,
        }
    }
}

/// Ticks every behavior in order, once per frame. Returns the simulated time.
pub fn run_frames(behaviors: &mut [&mut dyn Behavior], params: FrameParams) -> f32 {
    for _ in 0..params.frames {
        for behavior in behaviors.iter_mut() {
            behavior.update(params.fixed_delta);
        }
    }
    let elapsed = params.frames as f32 * params.fixed_delta;
    debug!(target: "gameplay.host", frames = params.frames, elapsed, "frames complete");
    elapsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        ticks: u32,
        elapsed: f32,
    }

    impl Behavior for Counter {
        fn update(&mut self, delta_time: f32) {
            self.ticks += 1;
            self.elapsed += delta_time;
        }
    }

    #[test]
    fn every_behavior_ticks_once_per_frame() {
        let mut a = Counter::default();
        let mut b = Counter::default();
        let params = FrameParams {
            fixed_delta: 0.5,
            frames: 4,
        };
        let elapsed = run_frames(&mut [&mut a, &mut b], params);
        assert_eq!(2.0, elapsed);
        assert_eq!(4, a.ticks);
        assert_eq!(4, b.ticks);
        assert_eq!(2.0, b.elapsed);
    }

    #[test]
    fn zero_frames_is_a_no_op() {
        let mut a = Counter::default();
        let params = FrameParams {
            frames: 0,
            ..Default::default()
        };
        assert_eq!(0.0, run_frames(&mut [&mut a], params));
        assert_eq!(0, a.ticks);
    }
}
