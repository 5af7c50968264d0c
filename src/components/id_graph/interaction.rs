use glam::Vec3;

use super::camera::Ray;

/// Pick spheres are a little larger than the bodies they cover.
pub const HIT_SLACK: f32 = 1.25;
/// Pointer travel in pixels beyond which a press becomes a drag.
pub const CLICK_SLOP: f64 = 4.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
	pub selected: Option<usize>,
	pub hovered: Option<usize>,
}

impl Selection {
	/// Toggle on the selected node, replace on any other.
	pub fn click(&mut self, idx: usize) -> Option<usize> {
		self.selected = if self.selected == Some(idx) {
			None
		} else {
			Some(idx)
		};
		self.selected
	}

	pub fn is_selected(&self, idx: usize) -> bool {
		self.selected == Some(idx)
	}

	pub fn is_hovered(&self, idx: usize) -> bool {
		self.hovered == Some(idx)
	}
}

/// Nearest sphere `(index, center, radius)` crossed by `ray`.
pub fn hit_test(ray: &Ray, spheres: impl IntoIterator<Item = (usize, Vec3, f32)>) -> Option<usize> {
	spheres
		.into_iter()
		.filter_map(|(idx, center, radius)| {
			ray.hit_sphere(center, radius * HIT_SLACK).map(|t| (idx, t))
		})
		.min_by(|a, b| a.1.total_cmp(&b.1))
		.map(|(idx, _)| idx)
}

/// Window after a touch in which emulated mouse events are dropped.
pub const COMPAT_MOUSE_WINDOW_MS: f64 = 800.0;

/// Device that produced a press or release.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerSource {
	/// Mouse buttons, including the events browsers synthesize after a tap.
	Mouse,
	/// A single finger.
	Touch,
}

/// Press/move/release tracking that separates clicks from orbit drags.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerGesture {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub last_x: f64,
	pub last_y: f64,
	moved: bool,
	last_touch_ms: Option<f64>,
}

impl PointerGesture {
	/// Mouse input shortly after a touch is the browser replaying the tap.
	pub fn accepts(&self, source: PointerSource, now_ms: f64) -> bool {
		match (source, self.last_touch_ms) {
			(PointerSource::Mouse, Some(touched)) => now_ms - touched > COMPAT_MOUSE_WINDOW_MS,
			_ => true,
		}
	}

	/// Starts a gesture; `false` when the press is ignored.
	pub fn press(&mut self, x: f64, y: f64, source: PointerSource, now_ms: f64) -> bool {
		if !self.accepts(source, now_ms) {
			return false;
		}
		*self = Self {
			active: true,
			start_x: x,
			start_y: y,
			last_x: x,
			last_y: y,
			moved: false,
			last_touch_ms: match source {
				PointerSource::Touch => Some(now_ms),
				PointerSource::Mouse => self.last_touch_ms,
			},
		};
		true
	}

	/// Returns the delta since the previous move while pressed.
	pub fn move_to(&mut self, x: f64, y: f64) -> Option<(f64, f64)> {
		if !self.active {
			return None;
		}
		let delta = (x - self.last_x, y - self.last_y);
		(self.last_x, self.last_y) = (x, y);
		if (x - self.start_x).hypot(y - self.start_y) > CLICK_SLOP {
			self.moved = true;
		}
		Some(delta)
	}

	/// Ends the gesture; `true` when it counts as a click.
	pub fn release(&mut self, source: PointerSource, now_ms: f64) -> bool {
		if !self.accepts(source, now_ms) {
			return false;
		}
		if source == PointerSource::Touch {
			self.last_touch_ms = Some(now_ms);
		}
		let click = self.active && !self.moved;
		self.active = false;
		click
	}

	pub fn cancel(&mut self) {
		self.active = false;
	}
}
