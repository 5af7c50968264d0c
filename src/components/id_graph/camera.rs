use glam::Vec3;

pub const MIN_DISTANCE: f32 = 8.0;
pub const MAX_DISTANCE: f32 = 40.0;
pub const DAMPING: f32 = 0.88;
/// Radians of orbit per pixel of drag.
pub const ROTATE_SPEED: f32 = 0.005;
/// Radians per second while auto-rotate is on.
pub const AUTO_ROTATE_SPEED: f32 = 0.25;
const PITCH_LIMIT: f32 = 1.45;
const NEAR: f32 = 0.1;
const ZOOM_EASE: f32 = 0.15;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
	pub origin: Vec3,
	pub dir: Vec3,
}

impl Ray {
	/// Distance along the ray to the first hit with a sphere, if any.
	pub fn hit_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
		let oc = self.origin - center;
		let b = oc.dot(self.dir);
		let c = oc.length_squared() - radius * radius;
		let disc = b * b - c;
		if disc < 0.0 {
			return None;
		}
		let sq = disc.sqrt();
		[-b - sq, -b + sq].into_iter().find(|&t| t >= 0.0)
	}
}

/// A world point mapped onto the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
	pub x: f64,
	pub y: f64,
	pub depth: f32,
	/// Pixels per world unit at this depth.
	pub scale: f64,
}

/// Damped orbit around the origin.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitCamera {
	pub yaw: f32,
	pub pitch: f32,
	pub distance: f32,
	pub target_distance: f32,
	pub fov_y: f32,
	yaw_velocity: f32,
	pitch_velocity: f32,
}

impl Default for OrbitCamera {
	fn default() -> Self {
		Self {
			yaw: 0.6,
			pitch: 0.35,
			distance: 22.0,
			target_distance: 22.0,
			fov_y: 50f32.to_radians(),
			yaw_velocity: 0.0,
			pitch_velocity: 0.0,
		}
	}
}

impl OrbitCamera {
	pub fn eye(&self) -> Vec3 {
		let (sy, cy) = self.yaw.sin_cos();
		let (sp, cp) = self.pitch.sin_cos();
		Vec3::new(cp * sy, sp, cp * cy) * self.distance
	}

	fn basis(&self) -> (Vec3, Vec3, Vec3) {
		let forward = (-self.eye()).normalize();
		let right = forward.cross(Vec3::Y).normalize();
		let up = right.cross(forward);
		(forward, right, up)
	}

	fn focal(&self, height: f64) -> f64 {
		height / 2.0 / (self.fov_y as f64 / 2.0).tan()
	}

	/// Feeds a drag delta in pixels into the orbit velocity.
	pub fn drag(&mut self, dx: f64, dy: f64) {
		self.yaw_velocity -= dx as f32 * ROTATE_SPEED;
		self.pitch_velocity += dy as f32 * ROTATE_SPEED;
	}

	/// Wheel or pinch zoom; positive `delta` moves away.
	pub fn zoom(&mut self, delta: f64) {
		let factor = if delta > 0.0 { 1.1 } else { 1.0 / 1.1 };
		self.target_distance = (self.target_distance * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
	}

	pub fn zoom_by(&mut self, factor: f32) {
		if factor.is_finite() && factor > 0.0 {
			self.target_distance = (self.target_distance * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
		}
	}

	/// Auto-rotate adds on top of whatever the user is doing.
	pub fn update(&mut self, dt: f32, auto_rotate: bool) {
		if auto_rotate {
			self.yaw += AUTO_ROTATE_SPEED * dt;
		}
		self.yaw += self.yaw_velocity;
		self.pitch = (self.pitch + self.pitch_velocity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
		self.yaw_velocity *= DAMPING;
		self.pitch_velocity *= DAMPING;
		self.distance += (self.target_distance - self.distance) * ZOOM_EASE;
		self.distance = self.distance.clamp(MIN_DISTANCE, MAX_DISTANCE);
	}

	pub fn project(&self, world: Vec3, width: f64, height: f64) -> Option<Projected> {
		let (forward, right, up) = self.basis();
		let rel = world - self.eye();
		let depth = rel.dot(forward);
		if depth <= NEAR {
			return None;
		}
		let scale = self.focal(height) / depth as f64;
		Some(Projected {
			x: width / 2.0 + rel.dot(right) as f64 * scale,
			y: height / 2.0 - rel.dot(up) as f64 * scale,
			depth,
			scale,
		})
	}

	pub fn pick_ray(&self, sx: f64, sy: f64, width: f64, height: f64) -> Ray {
		let (forward, right, up) = self.basis();
		let focal = self.focal(height);
		let (nx, ny) = ((sx - width / 2.0) / focal, -(sy - height / 2.0) / focal);
		Ray {
			origin: self.eye(),
			dir: (forward + right * nx as f32 + up * ny as f32).normalize(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const W: f64 = 800.0;
	const H: f64 = 600.0;

	#[test]
	fn origin_projects_to_canvas_centre() {
		let camera = OrbitCamera::default();
		let p = camera.project(Vec3::ZERO, W, H).unwrap();
		assert!((p.x - W / 2.0).abs() < 1e-3);
		assert!((p.y - H / 2.0).abs() < 1e-3);
		assert!((p.depth - camera.distance).abs() < 1e-3);
	}

	#[test]
	fn points_behind_the_camera_are_culled() {
		let camera = OrbitCamera::default();
		assert!(camera.project(camera.eye() * 2.0, W, H).is_none());
	}

	#[test]
	fn pick_ray_through_a_projected_point_hits_it() {
		let camera = OrbitCamera::default();
		let point = Vec3::new(2.0, 1.5, -3.0);
		let p = camera.project(point, W, H).unwrap();
		let ray = camera.pick_ray(p.x, p.y, W, H);
		assert!(ray.hit_sphere(point, 0.05).is_some());
		assert!(ray.hit_sphere(point + Vec3::X * 3.0, 0.5).is_none());
	}

	#[test]
	fn zoom_stays_within_bounds() {
		let mut camera = OrbitCamera::default();
		for _ in 0..100 {
			camera.zoom(-1.0);
			camera.update(0.016, false);
		}
		assert!(camera.distance >= MIN_DISTANCE - 1e-4);
		for _ in 0..100 {
			camera.zoom(1.0);
			camera.update(0.016, false);
		}
		assert!(camera.distance <= MAX_DISTANCE + 1e-4);
	}

	#[test]
	fn drag_is_damped_and_independent_of_auto_rotate() {
		let mut manual = OrbitCamera::default();
		let mut both = OrbitCamera::default();
		manual.drag(-40.0, 0.0);
		both.drag(-40.0, 0.0);
		manual.update(0.1, false);
		both.update(0.1, true);
		assert!(manual.yaw > OrbitCamera::default().yaw);
		assert!((both.yaw - manual.yaw - AUTO_ROTATE_SPEED * 0.1).abs() < 1e-5);

		let before = manual.yaw;
		for _ in 0..200 {
			manual.update(0.016, false);
		}
		let settled = manual.yaw;
		manual.update(0.016, false);
		assert!((manual.yaw - settled).abs() < 1e-6);
		assert!(settled > before);
	}

	#[test]
	fn pitch_never_flips_over_the_pole() {
		let mut camera = OrbitCamera::default();
		camera.drag(0.0, 10_000.0);
		for _ in 0..10 {
			camera.update(0.016, false);
		}
		assert!(camera.pitch <= PITCH_LIMIT);
		assert!(camera.project(Vec3::ZERO, W, H).is_some());
	}
}
