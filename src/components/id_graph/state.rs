use std::collections::{HashMap, HashSet};

use glam::Vec3;
use log::{debug, info};

use super::animation::{
	Clock, EMPHASIS_SMOOTHING, LoopStatus, SMOOTHING, ease_scalar, ease_toward, glow_pulse,
};
use super::camera::OrbitCamera;
use super::interaction::{PointerGesture, PointerSource, Selection, hit_test};
use super::layout::{LayoutParams, layout_targets};
use super::model::GraphModel;
use super::particles::{PARTICLE_COUNT, ParticleField};
use super::scene::SceneGraph;
use super::types::{DisplayConfig, LayoutMode};

const SELECTED_EMPHASIS: f32 = 1.0;
const HOVERED_EMPHASIS: f32 = 0.6;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LiveNode {
	pub position: Vec3,
	pub selected: bool,
	pub hovered: bool,
	pub emphasis: f32,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<usize>,
	pub neighbors: HashSet<usize>,
}

#[derive(Clone, Debug, Default)]
pub struct PinchState {
	pub distance: Option<f64>,
}

/// Everything one mounted viewport owns, driven by a single frame loop.
pub struct ViewportState {
	pub model: GraphModel,
	pub live: Vec<LiveNode>,
	pub scene: SceneGraph,
	pub particles: ParticleField,
	pub camera: OrbitCamera,
	pub config: DisplayConfig,
	pub selection: Selection,
	pub hover: HoverState,
	pub pointer: PointerGesture,
	pub pinch: PinchState,
	pub clock: Clock,
	pub status: LoopStatus,
	pub width: f64,
	pub height: f64,
	params: LayoutParams,
	layouts: HashMap<LayoutMode, Vec<Vec3>>,
}

impl ViewportState {
	pub fn new(model: GraphModel, config: DisplayConfig, width: f64, height: f64) -> Self {
		let live = model
			.nodes()
			.iter()
			.map(|node| LiveNode {
				position: node.anchor,
				..LiveNode::default()
			})
			.collect();
		let scene = SceneGraph::build(&model);
		info!(
			"viewport built: {} nodes, {} edges, layout {}",
			model.len(),
			model.edges().len(),
			config.layout
		);

		Self {
			model,
			live,
			scene,
			particles: ParticleField::new(PARTICLE_COUNT),
			camera: OrbitCamera::default(),
			config,
			selection: Selection::default(),
			hover: HoverState::default(),
			pointer: PointerGesture::default(),
			pinch: PinchState::default(),
			clock: Clock::default(),
			status: LoopStatus::Running,
			width,
			height,
			params: LayoutParams::default(),
			layouts: HashMap::new(),
		}
	}

	pub fn is_running(&self) -> bool {
		self.status == LoopStatus::Running
	}

	/// Takes effect on the next tick; live positions are left alone.
	pub fn apply_config(&mut self, config: DisplayConfig) {
		if config.layout != self.config.layout {
			info!("layout {} -> {}", self.config.layout, config.layout);
		}
		self.config = config;
	}

	pub fn tick(&mut self, dt: f64) {
		if !self.is_running() {
			return;
		}
		self.clock.advance(dt);

		// Layout targets are computed once per mode and reused.
		let mode = self.config.layout;
		let targets = self
			.layouts
			.entry(mode)
			.or_insert_with(|| layout_targets(mode, &self.model, &self.params));
		for (i, (live, target)) in self.live.iter_mut().zip(targets.iter()).enumerate() {
			live.position = ease_toward(live.position, *target, SMOOTHING);
			let goal = if live.selected {
				SELECTED_EMPHASIS
			} else if live.hovered {
				HOVERED_EMPHASIS
			} else {
				0.0
			};
			live.emphasis = ease_scalar(live.emphasis, goal, EMPHASIS_SMOOTHING);
			self.scene.sync_position(i, live.position);
			self.scene.set_emphasis(i, live.emphasis);
		}

		for i in 0..self.live.len() {
			let (opacity, scale) = glow_pulse(self.clock.elapsed, i, self.config.glow_pulse);
			self.scene.set_glow(i, opacity, scale);
		}

		let live = &self.live;
		self.scene
			.set_edge_endpoints(|i| live.get(i).map(|node| node.position));

		self.particles.advance(dt as f32, self.config.particles);
		self.camera.update(dt as f32, self.config.auto_rotate);
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let ray = self.camera.pick_ray(sx, sy, self.width, self.height);
		hit_test(
			&ray,
			self.scene
				.visuals()
				.iter()
				.enumerate()
				.map(|(i, visual)| (i, visual.body.center, visual.body.radius)),
		)
	}

	/// Starts a mouse or touch gesture at canvas point `(x, y)`. Returns `false`
	/// for mouse input the browser replays right after a tap.
	pub fn press(&mut self, x: f64, y: f64, source: PointerSource, now_ms: f64) -> bool {
		self.pointer.press(x, y, source, now_ms)
	}

	/// Ends a gesture. A click that lands on a node toggles the selection and
	/// returns `Some` with the new selected id; drags and misses return `None`.
	pub fn release(
		&mut self,
		x: f64,
		y: f64,
		source: PointerSource,
		now_ms: f64,
	) -> Option<Option<String>> {
		if !self.pointer.release(source, now_ms) {
			return None;
		}
		let idx = self.node_at_position(x, y)?;
		self.click(idx);
		Some(self.selected_id().map(str::to_string))
	}

	/// Click on a node: toggles it, or replaces the current selection.
	pub fn click(&mut self, idx: usize) -> Option<usize> {
		if idx >= self.live.len() {
			return self.selection.selected;
		}
		let selected = self.selection.click(idx);
		self.sync_selection_flags();
		debug!("selection -> {:?}", self.selected_id());
		selected
	}

	/// Applies a selection made outside the canvas (detail panel, page state).
	pub fn select_id(&mut self, id: Option<&str>) {
		let idx = id.and_then(|id| self.model.index_of(id));
		if idx == self.selection.selected {
			return;
		}
		self.selection.selected = idx;
		self.sync_selection_flags();
		debug!("selection set externally -> {:?}", self.selected_id());
	}

	fn sync_selection_flags(&mut self) {
		for (i, live) in self.live.iter_mut().enumerate() {
			live.selected = self.selection.is_selected(i);
		}
	}

	pub fn selected_id(&self) -> Option<&str> {
		self.selection
			.selected
			.and_then(|idx| self.model.node(idx))
			.map(|node| node.id.as_str())
	}

	pub fn set_hover(&mut self, node: Option<usize>) {
		if self.hover.node == node {
			return;
		}
		self.hover.node = node;
		self.selection.hovered = node;
		self.hover.neighbors = node
			.map(|idx| self.model.neighbors(idx).collect())
			.unwrap_or_default();
		for (i, live) in self.live.iter_mut().enumerate() {
			live.hovered = self.selection.is_hovered(i);
		}
	}

	pub fn is_highlighted(&self, idx: usize) -> bool {
		self.hover.node == Some(idx) || self.hover.neighbors.contains(&idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some()
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	/// Stops the loop for good and releases every visual.
	pub fn teardown(&mut self) {
		if !self.is_running() {
			return;
		}
		self.status = LoopStatus::Stopped;
		self.scene.release();
		self.particles.clear();
		self.layouts.clear();
		self.live.clear();
		self.live.shrink_to_fit();
		self.hover = HoverState::default();
		info!("viewport torn down after {} frames", self.clock.frames);
	}
}
