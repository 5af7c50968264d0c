use glam::Vec3;

use super::scene::GLOW_STEADY_OPACITY;

/// Fraction of the remaining distance covered per tick.
pub const SMOOTHING: f32 = 0.04;
/// Emphasis catches up faster than positions.
pub const EMPHASIS_SMOOTHING: f32 = 0.15;
pub const PULSE_RATE: f64 = 2.2;
const PULSE_PHASE_STEP: f64 = 0.9;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoopStatus {
	#[default]
	Running,
	Stopped,
}

/// Monotonic frame clock.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Clock {
	pub elapsed: f64,
	pub frames: u64,
}

impl Clock {
	pub fn advance(&mut self, dt: f64) {
		self.elapsed += dt.max(0.0);
		self.frames += 1;
	}
}

/// One exponential easing step: `live + (target - live) * k`.
pub fn ease_toward(live: Vec3, target: Vec3, k: f32) -> Vec3 {
	live + (target - live) * k
}

pub fn ease_scalar(live: f32, target: f32, k: f32) -> f32 {
	live + (target - live) * k
}

/// Halo `(opacity, scale)` for node `idx` at `elapsed` seconds.
pub fn glow_pulse(elapsed: f64, idx: usize, enabled: bool) -> (f32, f32) {
	if !enabled {
		return (GLOW_STEADY_OPACITY, 1.0);
	}
	let wave = 0.5 + 0.5 * (elapsed * PULSE_RATE + idx as f64 * PULSE_PHASE_STEP).sin();
	let wave = wave as f32;
	(0.08 + 0.22 * wave, 1.0 + 0.2 * wave)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn easing_strictly_approaches_target() {
		let target = Vec3::new(4.0, -2.0, 7.0);
		let mut live = Vec3::ZERO;
		let mut distance = live.distance(target);
		for _ in 0..50 {
			live = ease_toward(live, target, SMOOTHING);
			let next = live.distance(target);
			assert!(next < distance);
			distance = next;
		}
	}

	#[test]
	fn easing_converges_within_bounded_ticks() {
		let target = Vec3::new(-12.0, 5.0, 3.0);
		let mut live = Vec3::new(9.0, 9.0, -9.0);
		let mut ticks = 0;
		while live.distance(target) > 1e-3 {
			live = ease_toward(live, target, SMOOTHING);
			ticks += 1;
			assert!(ticks < 500, "did not converge");
		}
	}

	#[test]
	fn pulse_is_steady_when_disabled() {
		assert_eq!(glow_pulse(0.0, 0, false), glow_pulse(12.5, 7, false));
	}

	#[test]
	fn pulse_phases_differ_between_nodes() {
		let (a, _) = glow_pulse(1.0, 0, true);
		let (b, _) = glow_pulse(1.0, 1, true);
		assert_ne!(a, b);
		for i in 0..20 {
			let (opacity, scale) = glow_pulse(i as f64 * 0.37, i, true);
			assert!((0.08..=0.30 + 1e-6).contains(&opacity));
			assert!((1.0..=1.2 + 1e-6).contains(&scale));
		}
	}

	#[test]
	fn clock_never_runs_backwards() {
		let mut clock = Clock::default();
		clock.advance(0.016);
		clock.advance(-1.0);
		assert_eq!(clock.frames, 2);
		assert!((clock.elapsed - 0.016).abs() < 1e-12);
	}
}
