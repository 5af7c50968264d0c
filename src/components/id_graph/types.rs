use std::fmt;
use std::str::FromStr;

use glam::Vec3;

/// Static descriptive text shown in the detail panel for a node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeDetail {
	/// Panel heading.
	pub title: String,
	/// Paragraphs, in display order.
	pub body: Vec<String>,
}

/// One authored node of the identity graph.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	/// Unique within a model.
	pub id: String,
	/// Main caption under the body.
	pub label: String,
	/// Smaller second line under the label.
	pub sublabel: String,
	/// CSS color of the body and glow.
	pub color: String,
	/// Glyph drawn on the body.
	pub icon: String,
	/// Position used by the tree layout.
	pub anchor: Vec3,
	/// Declaring a parent creates the edge `parent -> self`.
	pub parent: Option<String>,
	pub detail: NodeDetail,
}

/// Structural role of a node, derived from its parent links.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeRole {
	/// No parent.
	Root,
	/// Child of a root, with children of its own.
	Category,
	/// Everything else.
	Leaf,
}

/// Spatial arrangement the nodes ease toward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LayoutMode {
	/// Authored anchors.
	#[default]
	Tree,
	/// Golden-angle spiral on a sphere.
	Sphere,
	/// Rising spiral around the Y axis.
	Helix,
	/// Square grid in the y = 0 plane.
	Grid,
	/// Tree anchors pushed away from the origin.
	Explode,
}

impl LayoutMode {
	/// Every mode, in control-bar order.
	pub const ALL: [LayoutMode; 5] = [
		LayoutMode::Tree,
		LayoutMode::Sphere,
		LayoutMode::Helix,
		LayoutMode::Grid,
		LayoutMode::Explode,
	];

	/// Lowercase name, as used in the `layout` query parameter.
	pub fn name(self) -> &'static str {
		match self {
			LayoutMode::Tree => "tree",
			LayoutMode::Sphere => "sphere",
			LayoutMode::Helix => "helix",
			LayoutMode::Grid => "grid",
			LayoutMode::Explode => "explode",
		}
	}
}

impl fmt::Display for LayoutMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// A layout name that matches no [`LayoutMode`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown layout mode `{0}`")]
pub struct UnknownLayoutMode(pub String);

impl FromStr for LayoutMode {
	type Err = UnknownLayoutMode;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		LayoutMode::ALL
			.into_iter()
			.find(|mode| mode.name().eq_ignore_ascii_case(s.trim()))
			.ok_or_else(|| UnknownLayoutMode(s.to_string()))
	}
}

/// Runtime switches flipped by the page controls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayConfig {
	/// Arrangement the nodes ease toward.
	pub layout: LayoutMode,
	/// Slow orbit added on top of user drags.
	pub auto_rotate: bool,
	/// Breathing halo; off leaves a steady glow.
	pub glow_pulse: bool,
	/// Ambient rising particles.
	pub particles: bool,
}

impl Default for DisplayConfig {
	fn default() -> Self {
		Self {
			layout: LayoutMode::Tree,
			auto_rotate: true,
			glow_pulse: true,
			particles: true,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn layout_mode_parses_its_own_name() {
		for mode in LayoutMode::ALL {
			assert_eq!(mode.to_string().parse::<LayoutMode>(), Ok(mode));
		}
		assert_eq!(" Sphere ".parse::<LayoutMode>(), Ok(LayoutMode::Sphere));
		assert_eq!(
			"spiral".parse::<LayoutMode>(),
			Err(UnknownLayoutMode("spiral".into()))
		);
		assert_eq!(
			UnknownLayoutMode("spiral".into()).to_string(),
			"unknown layout mode `spiral`"
		);
	}
}
