use glam::Vec3;

pub const PARTICLE_COUNT: usize = 140;
pub const FLOOR: f32 = -9.0;
pub const CEILING: f32 = 9.0;
const SPREAD: f32 = 14.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
	pub position: Vec3,
	/// World units per second, always upward.
	pub speed: f32,
	pub base_opacity: f32,
	/// Rendered opacity; zero while the field is disabled.
	pub opacity: f32,
}

/// Ambient dust drifting upward and wrapping around.
#[derive(Clone, Debug, Default)]
pub struct ParticleField {
	particles: Vec<Particle>,
}

/// Deterministic pseudo-random value in `[0, 1)`.
fn rand_simple(seed: usize) -> f32 {
	let x = ((seed + 1) * 9301 + 49297) % 233280;
	x as f32 / 233280.0
}

impl ParticleField {
	pub fn new(count: usize) -> Self {
		let particles = (0..count)
			.map(|i| {
				let (a, b, c, d) = (
					rand_simple(i * 4),
					rand_simple(i * 4 + 1),
					rand_simple(i * 4 + 2),
					rand_simple(i * 4 + 3),
				);
				let base_opacity = 0.15 + 0.35 * d;
				Particle {
					position: Vec3::new(
						(a - 0.5) * 2.0 * SPREAD,
						FLOOR + b * (CEILING - FLOOR),
						(c - 0.5) * 2.0 * SPREAD,
					),
					speed: 0.3 + 0.9 * d,
					base_opacity,
					opacity: base_opacity,
				}
			})
			.collect();
		Self { particles }
	}

	pub fn advance(&mut self, dt: f32, enabled: bool) {
		for p in &mut self.particles {
			if !enabled {
				p.opacity = 0.0;
				continue;
			}
			p.opacity = p.base_opacity;
			p.position.y += p.speed * dt;
			if p.position.y > CEILING {
				p.position.y = FLOOR + (p.position.y - CEILING);
			}
		}
	}

	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	pub fn clear(&mut self) {
		self.particles.clear();
		self.particles.shrink_to_fit();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn particles_start_inside_bounds() {
		let field = ParticleField::new(PARTICLE_COUNT);
		assert_eq!(field.particles().len(), PARTICLE_COUNT);
		for p in field.particles() {
			assert!((FLOOR..=CEILING).contains(&p.position.y));
			assert!(p.speed > 0.0);
		}
	}

	#[test]
	fn particles_rise_and_wrap() {
		let mut field = ParticleField::new(32);
		for _ in 0..2000 {
			field.advance(0.05, true);
			for p in field.particles() {
				assert!(p.position.y <= CEILING && p.position.y >= FLOOR);
			}
		}
	}

	#[test]
	fn disabled_field_freezes_and_hides() {
		let mut field = ParticleField::new(16);
		field.advance(0.1, true);
		let before: Vec<Vec3> = field.particles().iter().map(|p| p.position).collect();
		for _ in 0..10 {
			field.advance(0.1, false);
		}
		for (p, pos) in field.particles().iter().zip(&before) {
			assert_eq!(p.position, *pos);
			assert_eq!(p.opacity, 0.0);
		}
		field.advance(0.1, true);
		assert!(field.particles().iter().all(|p| p.opacity > 0.0));
	}
}
