//! Scene graph: the drawable shapes derived from a layout.
//!
//! A [`Scene`] holds plain data only (no tree pointers), so it can be stored
//! in signals and compared in tests. The canvas painter draws it verbatim and
//! hit-testing runs against it, which keeps "what is drawn" and "what is
//! clickable" the same set.

use super::layout::{Bounds, Layout, Orientation};
use super::tree::NodeKind;
use super::types::NodeDetail;

/// A point in graph space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// A labeled node shape. The only interactive element of a scene.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeShape {
	pub name: String,
	pub description: String,
	pub center: Point,
	pub depth: usize,
	pub leaf: bool,
	/// Stand-in for a child reference without a record.
	pub placeholder: bool,
}

impl NodeShape {
	pub fn detail(&self) -> NodeDetail {
		NodeDetail {
			name: self.name.clone(),
			description: self.description.clone(),
		}
	}
}

/// A cubic link path from a parent shape to a child shape.
#[derive(Clone, Debug, PartialEq)]
pub struct LinkPath {
	/// Index of the parent in [`Scene::nodes`].
	pub source: usize,
	/// Index of the child in [`Scene::nodes`].
	pub target: usize,
	pub from: Point,
	pub ctrl1: Point,
	pub ctrl2: Point,
	pub to: Point,
	/// The child is a placeholder.
	pub placeholder: bool,
}

/// Everything the render surface draws for one data snapshot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
	pub nodes: Vec<NodeShape>,
	pub links: Vec<LinkPath>,
}

impl Scene {
	/// The valid scene for "nothing to show".
	pub fn empty() -> Self {
		Self::default()
	}

	/// Derive shapes and paths from a layout, one per layout node and link.
	pub fn from_layout(layout: &Layout, orientation: Orientation) -> Self {
		let nodes: Vec<NodeShape> = layout
			.nodes
			.iter()
			.map(|n| NodeShape {
				name: n.node.name().to_string(),
				description: n.node.description().to_string(),
				center: Point::new(n.x, n.y),
				depth: n.depth,
				leaf: n.node.is_leaf(),
				placeholder: n.node.kind() == NodeKind::Missing,
			})
			.collect();

		let links = layout
			.links
			.iter()
			.map(|link| {
				let (from, to) = (nodes[link.source].center, nodes[link.target].center);
				let (ctrl1, ctrl2) = match orientation {
					Orientation::TopDown => {
						let mid = (from.y + to.y) / 2.0;
						(Point::new(from.x, mid), Point::new(to.x, mid))
					}
					Orientation::LeftRight => {
						let mid = (from.x + to.x) / 2.0;
						(Point::new(mid, from.y), Point::new(mid, to.y))
					}
				};
				LinkPath {
					source: link.source,
					target: link.target,
					from,
					ctrl1,
					ctrl2,
					to,
					placeholder: nodes[link.target].placeholder,
				}
			})
			.collect();

		Self { nodes, links }
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Index of the top-most node whose shape contains the graph-space point.
	///
	/// Later nodes are drawn over earlier ones, so the search runs backwards.
	pub fn node_at(&self, x: f64, y: f64, radius: f64) -> Option<usize> {
		self.nodes.iter().rposition(|n| {
			let (dx, dy) = (n.center.x - x, n.center.y - y);
			(dx * dx + dy * dy).sqrt() < radius
		})
	}

	pub fn bounds(&self) -> Option<Bounds> {
		Bounds::around(self.nodes.iter().map(|n| (n.center.x, n.center.y)))
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::components::tree_graph::layout::{LayoutConfig, layout_tree};
	use crate::components::tree_graph::tree::build_tree;
	use crate::components::tree_graph::types::GraphRecord;

	fn scene_for(records: &[GraphRecord]) -> Scene {
		let root = build_tree(records).root.unwrap();
		let config = LayoutConfig::default();
		Scene::from_layout(&layout_tree(&root, &config), config.orientation)
	}

	fn scenario() -> Scene {
		scene_for(&[
			GraphRecord::new("Root", "Root node", &["Child1", "Child2"]),
			GraphRecord::new("Child1", "First child", &[]),
			GraphRecord::new("Child2", "Second child", &[]),
		])
	}

	#[test]
	fn one_shape_per_node_and_one_path_per_link() {
		let scene = scenario();
		assert_eq!(scene.nodes.len(), 3);
		assert_eq!(scene.links.len(), 2);
		assert_eq!(
			scene.nodes.iter().map(|n| n.name.as_str()).collect::<Vec<_>>(),
			vec!["Root", "Child1", "Child2"]
		);
	}

	#[test]
	fn link_paths_join_shape_centres() {
		let scene = scenario();
		let link = &scene.links[0];

		assert_eq!(link.from, scene.nodes[0].center);
		assert_eq!(link.to, scene.nodes[1].center);
		assert_eq!(link.ctrl1, Point::new(45.0, 55.0));
		assert_eq!(link.ctrl2, Point::new(0.0, 55.0));
	}

	#[test]
	fn hit_test_finds_node_under_point() {
		let scene = scenario();
		let child1 = scene.nodes[1].center;

		let hit = scene.node_at(child1.x + 3.0, child1.y - 2.0, 8.0).unwrap();
		assert_eq!(scene.nodes[hit].detail(), NodeDetail {
			name: "Child1".into(),
			description: "First child".into(),
		});
	}

	#[test]
	fn hit_test_ignores_links_and_background() {
		let scene = scenario();
		let link = &scene.links[0];
		let (mx, my) = ((link.from.x + link.to.x) / 2.0, (link.from.y + link.to.y) / 2.0);

		assert_eq!(scene.node_at(mx, my, 8.0), None);
		assert_eq!(scene.node_at(-500.0, -500.0, 8.0), None);
	}

	#[test]
	fn placeholder_flag_reaches_node_and_link() {
		let scene = scene_for(&[GraphRecord::new("Root", "", &["Nowhere"])]);

		assert!(scene.nodes[1].placeholder);
		assert!(scene.links[0].placeholder);
		assert!(!scene.nodes[0].placeholder);
	}

	#[test]
	fn empty_scene_has_nothing_to_hit() {
		let scene = Scene::empty();
		assert!(scene.is_empty());
		assert!(scene.bounds().is_none());
		assert_eq!(scene.node_at(0.0, 0.0, 100.0), None);
	}
}
