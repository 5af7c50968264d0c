use std::collections::HashMap;

use super::error::ConfigurationError;
use super::types::{GraphNode, NodeRole};

/// Validated, read-only node arena. Edges are `(parent, child)` index pairs.
#[derive(Clone, Debug)]
pub struct GraphModel {
	nodes: Vec<GraphNode>,
	index: HashMap<String, usize>,
	parents: Vec<Option<usize>>,
	edges: Vec<(usize, usize)>,
	roles: Vec<NodeRole>,
}

impl GraphModel {
	/// Validates ids and parent links, then derives edges and roles.
	pub fn new(nodes: Vec<GraphNode>) -> Result<Self, ConfigurationError> {
		if nodes.is_empty() {
			return Err(ConfigurationError::Empty);
		}

		let mut index = HashMap::with_capacity(nodes.len());
		for (i, node) in nodes.iter().enumerate() {
			if index.insert(node.id.clone(), i).is_some() {
				return Err(ConfigurationError::DuplicateId(node.id.clone()));
			}
		}

		let mut parents = Vec::with_capacity(nodes.len());
		let mut edges = Vec::new();
		for (i, node) in nodes.iter().enumerate() {
			let parent = match &node.parent {
				Some(parent) => match index.get(parent) {
					Some(&p) => Some(p),
					None => {
						return Err(ConfigurationError::MissingParent {
							node: node.id.clone(),
							parent: parent.clone(),
						});
					}
				},
				None => None,
			};
			if let Some(p) = parent {
				edges.push((p, i));
			}
			parents.push(parent);
		}

		// Any chain longer than the node count must revisit a node.
		for (i, node) in nodes.iter().enumerate() {
			let (mut cursor, mut steps) = (parents[i], 0);
			while let Some(p) = cursor {
				steps += 1;
				if steps > nodes.len() {
					return Err(ConfigurationError::ParentCycle(node.id.clone()));
				}
				cursor = parents[p];
			}
		}

		let roles = (0..nodes.len())
			.map(|i| match parents[i] {
				None => NodeRole::Root,
				Some(p) if parents[p].is_none() && edges.iter().any(|&(src, _)| src == i) => {
					NodeRole::Category
				}
				Some(_) => NodeRole::Leaf,
			})
			.collect();

		Ok(Self {
			nodes,
			index,
			parents,
			edges,
			roles,
		})
	}

	/// Number of nodes.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// Always `false` for a built model.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Nodes in declaration order; indices elsewhere refer to this slice.
	pub fn nodes(&self) -> &[GraphNode] {
		&self.nodes
	}

	/// Node at `idx`.
	pub fn node(&self, idx: usize) -> Option<&GraphNode> {
		self.nodes.get(idx)
	}

	/// Index of the node with `id`.
	pub fn index_of(&self, id: &str) -> Option<usize> {
		self.index.get(id).copied()
	}

	/// Parent index of `idx`, `None` for roots.
	pub fn parent(&self, idx: usize) -> Option<usize> {
		self.parents.get(idx).copied().flatten()
	}

	/// `(parent, child)` index pairs.
	pub fn edges(&self) -> &[(usize, usize)] {
		&self.edges
	}

	/// Derived role of `idx`; out of range reads as a leaf.
	pub fn role(&self, idx: usize) -> NodeRole {
		self.roles.get(idx).copied().unwrap_or(NodeRole::Leaf)
	}

	/// Nodes sharing an edge with `idx`, in edge order.
	pub fn neighbors(&self, idx: usize) -> impl Iterator<Item = usize> + '_ {
		self.edges.iter().filter_map(move |&(src, tgt)| {
			if src == idx {
				Some(tgt)
			} else if tgt == idx {
				Some(src)
			} else {
				None
			}
		})
	}
}

#[cfg(test)]
pub(crate) fn test_node(id: &str, parent: Option<&str>, anchor: glam::Vec3) -> GraphNode {
	GraphNode {
		id: id.to_string(),
		label: id.to_uppercase(),
		sublabel: String::new(),
		color: "#22c55e".into(),
		icon: "*".into(),
		anchor,
		parent: parent.map(str::to_string),
		detail: Default::default(),
	}
}

#[cfg(test)]
mod tests {
	use glam::Vec3;

	use super::*;

	fn small_tree() -> Vec<GraphNode> {
		vec![
			test_node("root", None, Vec3::ZERO),
			test_node("github", Some("root"), Vec3::new(-3.0, 2.0, 0.0)),
			test_node("att-gh", Some("github"), Vec3::new(-4.0, 4.0, 0.0)),
			test_node("rotate", Some("root"), Vec3::new(2.0, 0.0, 0.0)),
		]
	}

	#[test]
	fn derives_edges_from_parents() {
		let model = GraphModel::new(small_tree()).unwrap();
		assert_eq!(model.len(), 4);
		assert_eq!(model.edges(), &[(0, 1), (1, 2), (0, 3)]);
		assert_eq!(model.parent(2), Some(1));
		assert_eq!(model.index_of("rotate"), Some(3));
		assert_eq!(model.index_of("nope"), None);
	}

	#[test]
	fn roles_follow_hierarchy() {
		let model = GraphModel::new(small_tree()).unwrap();
		assert_eq!(model.role(0), NodeRole::Root);
		assert_eq!(model.role(1), NodeRole::Category);
		assert_eq!(model.role(2), NodeRole::Leaf);
		// Attached to the root but without children.
		assert_eq!(model.role(3), NodeRole::Leaf);
	}

	#[test]
	fn neighbors_cover_both_directions() {
		let model = GraphModel::new(small_tree()).unwrap();
		let mut around_github: Vec<_> = model.neighbors(1).collect();
		around_github.sort();
		assert_eq!(around_github, vec![0, 2]);
	}

	#[test]
	fn rejects_empty_graph() {
		assert_eq!(
			GraphModel::new(Vec::new()).unwrap_err(),
			ConfigurationError::Empty
		);
	}

	#[test]
	fn rejects_duplicate_ids() {
		let mut nodes = small_tree();
		nodes.push(test_node("github", None, Vec3::ONE));
		assert_eq!(
			GraphModel::new(nodes).unwrap_err(),
			ConfigurationError::DuplicateId("github".into())
		);
	}

	#[test]
	fn rejects_dangling_parent() {
		let mut nodes = small_tree();
		nodes.push(test_node("orphan", Some("ghost"), Vec3::ONE));
		assert_eq!(
			GraphModel::new(nodes).unwrap_err(),
			ConfigurationError::MissingParent {
				node: "orphan".into(),
				parent: "ghost".into(),
			}
		);
	}

	#[test]
	fn rejects_parent_cycles() {
		let nodes = vec![
			test_node("root", None, Vec3::ZERO),
			test_node("a", Some("b"), Vec3::X),
			test_node("b", Some("a"), Vec3::Y),
		];
		assert!(matches!(
			GraphModel::new(nodes),
			Err(ConfigurationError::ParentCycle(_))
		));
	}
}
