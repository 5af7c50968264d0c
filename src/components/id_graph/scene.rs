use glam::Vec3;

use super::model::GraphModel;
use super::types::NodeRole;

pub const ROOT_RADIUS: f32 = 0.9;
pub const CATEGORY_RADIUS: f32 = 0.6;
pub const LEAF_RADIUS: f32 = 0.4;
pub const GLOW_FACTOR: f32 = 1.8;
pub const GLOW_STEADY_OPACITY: f32 = 0.18;
const LABEL_GAP: f32 = 0.45;

pub fn body_radius(role: NodeRole) -> f32 {
	match role {
		NodeRole::Root => ROOT_RADIUS,
		NodeRole::Category => CATEGORY_RADIUS,
		NodeRole::Leaf => LEAF_RADIUS,
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Body {
	pub center: Vec3,
	pub radius: f32,
	pub color: String,
	/// 0 = resting, 1 = fully emphasised.
	pub emphasis: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Glow {
	pub center: Vec3,
	pub radius: f32,
	pub opacity: f32,
	pub scale: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Label {
	pub anchor: Vec3,
	/// World-space lift above the body centre.
	pub offset: f32,
	pub text: String,
	pub sublabel: String,
	pub icon: String,
}

impl Label {
	pub fn position(&self) -> Vec3 {
		self.anchor + Vec3::Y * self.offset
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct NodeVisual {
	pub body: Body,
	pub glow: Glow,
	pub label: Label,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeSegment {
	pub from: usize,
	pub to: usize,
	pub a: Vec3,
	pub b: Vec3,
}

/// Retained visuals for one viewport, indexed like the graph model.
#[derive(Clone, Debug, Default)]
pub struct SceneGraph {
	visuals: Vec<NodeVisual>,
	edges: Vec<EdgeSegment>,
	released: bool,
}

impl SceneGraph {
	pub fn build(model: &GraphModel) -> Self {
		let visuals = model
			.nodes()
			.iter()
			.enumerate()
			.map(|(i, node)| {
				let radius = body_radius(model.role(i));
				NodeVisual {
					body: Body {
						center: node.anchor,
						radius,
						color: node.color.clone(),
						emphasis: 0.0,
					},
					glow: Glow {
						center: node.anchor,
						radius: radius * GLOW_FACTOR,
						opacity: GLOW_STEADY_OPACITY,
						scale: 1.0,
					},
					label: Label {
						anchor: node.anchor,
						offset: radius + LABEL_GAP,
						text: node.label.clone(),
						sublabel: node.sublabel.clone(),
						icon: node.icon.clone(),
					},
				}
			})
			.collect();
		let edges = model
			.edges()
			.iter()
			.map(|&(from, to)| EdgeSegment {
				from,
				to,
				a: model.nodes()[from].anchor,
				b: model.nodes()[to].anchor,
			})
			.collect();

		Self {
			visuals,
			edges,
			released: false,
		}
	}

	/// Moves body, glow and label of one node together.
	pub fn sync_position(&mut self, idx: usize, position: Vec3) {
		if let Some(visual) = self.visuals.get_mut(idx) {
			visual.body.center = position;
			visual.glow.center = position;
			visual.label.anchor = position;
		}
	}

	pub fn set_emphasis(&mut self, idx: usize, emphasis: f32) {
		if let Some(visual) = self.visuals.get_mut(idx) {
			visual.body.emphasis = emphasis;
		}
	}

	pub fn set_glow(&mut self, idx: usize, opacity: f32, scale: f32) {
		if let Some(visual) = self.visuals.get_mut(idx) {
			visual.glow.opacity = opacity;
			visual.glow.scale = scale;
		}
	}

	/// Re-derives every edge segment from the current per-node positions.
	pub fn set_edge_endpoints(&mut self, position: impl Fn(usize) -> Option<Vec3>) {
		for edge in &mut self.edges {
			if let (Some(a), Some(b)) = (position(edge.from), position(edge.to)) {
				edge.a = a;
				edge.b = b;
			}
		}
	}

	pub fn visual(&self, idx: usize) -> Option<&NodeVisual> {
		self.visuals.get(idx)
	}

	pub fn visuals(&self) -> &[NodeVisual] {
		&self.visuals
	}

	pub fn edges(&self) -> &[EdgeSegment] {
		&self.edges
	}

	/// Drops every owned visual. The scene stays empty afterwards.
	pub fn release(&mut self) {
		self.visuals.clear();
		self.visuals.shrink_to_fit();
		self.edges.clear();
		self.edges.shrink_to_fit();
		self.released = true;
	}

	pub fn is_released(&self) -> bool {
		self.released
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::identity::identity_tree;

	fn scene() -> (GraphModel, SceneGraph) {
		let model = GraphModel::new(identity_tree()).unwrap();
		let scene = SceneGraph::build(&model);
		(model, scene)
	}

	#[test]
	fn builds_one_visual_per_node_and_one_segment_per_edge() {
		let (model, scene) = scene();
		assert_eq!(scene.visuals().len(), model.len());
		assert_eq!(scene.edges().len(), model.edges().len());
	}

	#[test]
	fn body_size_follows_role() {
		let (model, scene) = scene();
		let root = model.index_of("root").unwrap();
		let github = model.index_of("github").unwrap();
		let attestor = model.index_of("att-b0ase").unwrap();
		let radius = |i: usize| scene.visual(i).unwrap().body.radius;
		assert!(radius(root) > radius(github));
		assert!(radius(github) > radius(attestor));
		for visual in scene.visuals() {
			assert!(visual.glow.radius > visual.body.radius);
		}
	}

	#[test]
	fn sync_moves_all_three_visuals() {
		let (_, mut scene) = scene();
		let target = Vec3::new(1.0, -2.0, 3.5);
		scene.sync_position(2, target);
		let visual = scene.visual(2).unwrap();
		assert_eq!(visual.body.center, target);
		assert_eq!(visual.glow.center, target);
		assert_eq!(visual.label.anchor, target);
		assert!(visual.label.position().y > target.y);
	}

	#[test]
	fn edges_follow_given_positions() {
		let (model, mut scene) = scene();
		let positions: Vec<Vec3> = (0..model.len()).map(|i| Vec3::splat(i as f32)).collect();
		scene.set_edge_endpoints(|i| positions.get(i).copied());
		for edge in scene.edges() {
			assert_eq!(edge.a, positions[edge.from]);
			assert_eq!(edge.b, positions[edge.to]);
		}
	}

	#[test]
	fn release_leaves_nothing_behind() {
		let (_, mut scene) = scene();
		scene.release();
		assert!(scene.is_released());
		assert!(scene.visuals().is_empty());
		assert!(scene.edges().is_empty());
		scene.sync_position(0, Vec3::ONE);
		assert!(scene.visual(0).is_none());
	}
}
