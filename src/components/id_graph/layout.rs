//! Target positions for every layout mode.
//!
//! All functions here are pure: the same mode and model always produce the
//! same positions, bit for bit.

use std::collections::HashMap;
use std::f64::consts::PI;

use glam::Vec3;

use super::model::GraphModel;
use super::types::{LayoutMode, NodeRole};

/// Tunables for the computed layouts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutParams {
	/// Radius of the sphere layout.
	pub sphere_radius: f32,
	/// Distance of helix nodes from the Y axis.
	pub helix_radius: f32,
	/// Vertical span from the first node to the last.
	pub helix_height: f32,
	/// Full revolutions over the helix height.
	pub helix_turns: f32,
	/// Distance between neighbouring grid cells.
	pub grid_spacing: f32,
	/// Extra distance pushed onto every non-root node.
	pub explode_offset: f32,
}

impl Default for LayoutParams {
	fn default() -> Self {
		Self {
			sphere_radius: 6.0,
			helix_radius: 4.0,
			helix_height: 10.0,
			helix_turns: 3.0,
			grid_spacing: 2.5,
			explode_offset: 3.0,
		}
	}
}

/// Target position per node id.
pub fn compute_layout(
	mode: LayoutMode,
	model: &GraphModel,
	params: &LayoutParams,
) -> HashMap<String, Vec3> {
	model
		.nodes()
		.iter()
		.zip(layout_targets(mode, model, params))
		.map(|(node, pos)| (node.id.clone(), pos))
		.collect()
}

/// Target positions in node index order.
pub fn layout_targets(mode: LayoutMode, model: &GraphModel, params: &LayoutParams) -> Vec<Vec3> {
	let n = model.len();
	match mode {
		LayoutMode::Tree => model.nodes().iter().map(|node| node.anchor).collect(),
		LayoutMode::Sphere => (0..n).map(|i| sphere(i, n, params.sphere_radius)).collect(),
		LayoutMode::Helix => (0..n).map(|i| helix(i, n, params)).collect(),
		LayoutMode::Grid => (0..n).map(|i| grid(i, n, params.grid_spacing)).collect(),
		LayoutMode::Explode => model
			.nodes()
			.iter()
			.enumerate()
			.map(|(i, node)| match model.role(i) {
				NodeRole::Root => node.anchor,
				_ => {
					let dir = node.anchor.try_normalize().unwrap_or(Vec3::Y);
					node.anchor + dir * params.explode_offset
				}
			})
			.collect(),
	}
}

fn sphere(i: usize, n: usize, radius: f32) -> Vec3 {
	let phi = (1.0 - 2.0 * (i as f64 / n as f64)).acos();
	let theta = PI * (1.0 + 5f64.sqrt()) * i as f64;
	let r = radius as f64;
	Vec3::new(
		(r * phi.sin() * theta.cos()) as f32,
		(r * phi.cos()) as f32,
		(r * phi.sin() * theta.sin()) as f32,
	)
}

fn helix(i: usize, n: usize, params: &LayoutParams) -> Vec3 {
	let t = if n > 1 {
		i as f32 / (n - 1) as f32
	} else {
		0.0
	};
	let angle = t * std::f32::consts::TAU * params.helix_turns;
	Vec3::new(
		params.helix_radius * angle.cos(),
		(t - 0.5) * params.helix_height,
		params.helix_radius * angle.sin(),
	)
}

/// `(row, col)` of node `i` in a square grid holding `n` nodes.
pub fn grid_cell(i: usize, n: usize) -> (usize, usize) {
	let cols = grid_cols(n);
	(i / cols, i % cols)
}

fn grid_cols(n: usize) -> usize {
	((n as f64).sqrt().ceil() as usize).max(1)
}

fn grid(i: usize, n: usize, spacing: f32) -> Vec3 {
	let cols = grid_cols(n);
	let rows = n.div_ceil(cols);
	let (row, col) = grid_cell(i, n);
	Vec3::new(
		(col as f32 - (cols - 1) as f32 / 2.0) * spacing,
		0.0,
		(row as f32 - (rows - 1) as f32 / 2.0) * spacing,
	)
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use super::*;
	use crate::components::id_graph::model::test_node;
	use crate::identity::identity_tree;

	fn model() -> GraphModel {
		GraphModel::new(identity_tree()).unwrap()
	}

	#[test]
	fn every_mode_covers_every_node_exactly_once() {
		let model = model();
		let ids: HashSet<String> = model.nodes().iter().map(|n| n.id.clone()).collect();
		for mode in LayoutMode::ALL {
			let layout = compute_layout(mode, &model, &LayoutParams::default());
			assert_eq!(layout.len(), model.len(), "{mode}");
			let keys: HashSet<String> = layout.keys().cloned().collect();
			assert_eq!(keys, ids, "{mode}");
		}
	}

	#[test]
	fn tree_returns_authored_anchors() {
		let model = model();
		let targets = layout_targets(LayoutMode::Tree, &model, &LayoutParams::default());
		for (node, target) in model.nodes().iter().zip(targets) {
			assert_eq!(node.anchor, target);
		}
	}

	#[test]
	fn sphere_points_sit_on_the_radius() {
		let model = model();
		let params = LayoutParams::default();
		for pos in layout_targets(LayoutMode::Sphere, &model, &params) {
			assert!((pos.length() - params.sphere_radius).abs() < 1e-4, "{pos}");
		}
	}

	#[test]
	fn helix_rises_with_index() {
		let model = model();
		let targets = layout_targets(LayoutMode::Helix, &model, &LayoutParams::default());
		for pair in targets.windows(2) {
			assert!(pair[1].y >= pair[0].y);
		}
		let params = LayoutParams::default();
		assert!((targets[0].y + params.helix_height / 2.0).abs() < 1e-5);
		assert!((targets[targets.len() - 1].y - params.helix_height / 2.0).abs() < 1e-5);
	}

	#[test]
	fn helix_with_single_node_is_finite() {
		let model = GraphModel::new(vec![test_node("solo", None, Vec3::ONE)]).unwrap();
		let targets = layout_targets(LayoutMode::Helix, &model, &LayoutParams::default());
		assert!(targets[0].is_finite());
	}

	#[test]
	fn grid_cells_are_unique_and_flat() {
		for n in 1..40 {
			let cells: HashSet<_> = (0..n).map(|i| grid_cell(i, n)).collect();
			assert_eq!(cells.len(), n);
		}
		let model = model();
		let targets = layout_targets(LayoutMode::Grid, &model, &LayoutParams::default());
		assert!(targets.iter().all(|p| p.y == 0.0));
		let distinct: HashSet<_> = targets.iter().map(|p| (p.x.to_bits(), p.z.to_bits())).collect();
		assert_eq!(distinct.len(), targets.len());
	}

	#[test]
	fn explode_keeps_root_and_pushes_the_rest_outward() {
		let model = model();
		let params = LayoutParams::default();
		let tree = layout_targets(LayoutMode::Tree, &model, &params);
		let exploded = layout_targets(LayoutMode::Explode, &model, &params);
		for i in 0..model.len() {
			if model.role(i) == NodeRole::Root {
				assert_eq!(tree[i], exploded[i]);
			} else {
				let pushed = exploded[i].length() - tree[i].length();
				assert!((pushed - params.explode_offset).abs() < 1e-4);
			}
		}
	}

	#[test]
	fn explode_lifts_non_root_nodes_at_the_origin() {
		let model = GraphModel::new(vec![
			test_node("root", None, Vec3::new(0.0, -1.0, 0.0)),
			test_node("child", Some("root"), Vec3::ZERO),
		])
		.unwrap();
		let params = LayoutParams::default();
		let exploded = layout_targets(LayoutMode::Explode, &model, &params);
		assert_eq!(exploded[1], Vec3::Y * params.explode_offset);
	}

	#[test]
	fn layouts_are_deterministic() {
		let model = model();
		let params = LayoutParams::default();
		for mode in LayoutMode::ALL {
			let a = compute_layout(mode, &model, &params);
			let b = compute_layout(mode, &model, &params);
			for (id, pos) in &a {
				assert_eq!(pos.to_array().map(f32::to_bits), b[id].to_array().map(f32::to_bits));
			}
		}
	}

	#[test]
	fn thirteen_node_sphere_scenario() {
		let nodes: Vec<_> = identity_tree()
			.into_iter()
			.filter(|n| n.id != "att-self-x" && n.id != "att-self-g")
			.collect();
		let model = GraphModel::new(nodes).unwrap();
		assert_eq!(model.len(), 13);
		let params = LayoutParams::default();
		let sphere = compute_layout(LayoutMode::Sphere, &model, &params);
		assert_eq!(sphere.len(), 13);
		let distinct: HashSet<_> = sphere.values().map(|p| p.to_array().map(f32::to_bits)).collect();
		assert_eq!(distinct.len(), 13);
		assert!(sphere.values().all(|p| (p.length() - params.sphere_radius).abs() < 1e-4));
	}
}
