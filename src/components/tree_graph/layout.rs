//! Tidy tree layout.
//!
//! Depth maps to one axis and breadth to the other. Layout runs in two walks:
//!
//! 1. **Bottom-up:** each subtree is summarized by its contour (the leftmost
//!    and rightmost breadth per level, relative to the subtree root). Child
//!    subtrees are packed left to right so their contours stay at least one
//!    unit apart, and the parent is centred between its first and last child.
//! 2. **Top-down:** relative offsets are accumulated into absolute breadths,
//!    which are then scaled by the configured spacing.
//!
//! Nodes come out in pre-order, so the result is stable for a given tree.

use std::rc::Rc;

use super::tree::TreeNode;

/// Which screen axis encodes depth.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Orientation {
	/// Root at the top, depth grows downwards.
	#[default]
	TopDown,
	/// Root on the left, depth grows to the right.
	LeftRight,
}

/// Spacing constants for [`layout_tree`].
#[derive(Clone, Debug)]
pub struct LayoutConfig {
	pub orientation: Orientation,
	/// Minimum distance between two nodes at the same depth.
	pub node_spacing: f64,
	/// Distance between consecutive depth levels.
	pub level_spacing: f64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			orientation: Orientation::TopDown,
			node_spacing: 90.0,
			level_spacing: 110.0,
		}
	}
}

/// Position assigned to one tree node.
#[derive(Clone, Debug)]
pub struct LayoutNode {
	pub node: Rc<TreeNode>,
	pub x: f64,
	pub y: f64,
	/// Coordinate along the sibling spacing axis.
	pub breadth: f64,
	pub depth: usize,
}

/// A parent → child edge, as indices into [`Layout::nodes`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinkDescriptor {
	pub source: usize,
	pub target: usize,
}

/// Axis-aligned bounding box in graph space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	pub min_x: f64,
	pub min_y: f64,
	pub max_x: f64,
	pub max_y: f64,
}

impl Bounds {
	pub fn width(&self) -> f64 {
		self.max_x - self.min_x
	}

	pub fn height(&self) -> f64 {
		self.max_y - self.min_y
	}

	pub fn center(&self) -> (f64, f64) {
		(
			(self.min_x + self.max_x) / 2.0,
			(self.min_y + self.max_y) / 2.0,
		)
	}

	pub(crate) fn around(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
		points.into_iter().fold(None, |acc, (x, y)| {
			Some(match acc {
				None => Bounds {
					min_x: x,
					min_y: y,
					max_x: x,
					max_y: y,
				},
				Some(b) => Bounds {
					min_x: b.min_x.min(x),
					min_y: b.min_y.min(y),
					max_x: b.max_x.max(x),
					max_y: b.max_y.max(y),
				},
			})
		})
	}
}

/// Output of one layout pass.
#[derive(Clone, Debug, Default)]
pub struct Layout {
	pub nodes: Vec<LayoutNode>,
	pub links: Vec<LinkDescriptor>,
}

impl Layout {
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	pub fn bounds(&self) -> Option<Bounds> {
		Bounds::around(self.nodes.iter().map(|n| (n.x, n.y)))
	}
}

/// Per-level (leftmost, rightmost) breadth of a subtree, relative to its root.
type Contour = Vec<(f64, f64)>;

struct Slot {
	node: Rc<TreeNode>,
	parent: Option<usize>,
	depth: usize,
	children: Vec<usize>,
}

/// Assign coordinates to every node of the tree rooted at `root`.
pub fn layout_tree(root: &Rc<TreeNode>, config: &LayoutConfig) -> Layout {
	let slots = flatten(root);

	// Bottom-up walk. Children always sit at higher indices than their parent.
	let mut offsets = vec![0.0_f64; slots.len()];
	let mut contours: Vec<Contour> = vec![Vec::new(); slots.len()];
	for i in (0..slots.len()).rev() {
		let children = &slots[i].children;
		let mut merged: Contour = Vec::new();
		let mut placed = Vec::with_capacity(children.len());

		for &child in children {
			let contour = std::mem::take(&mut contours[child]);
			let shift = merged
				.iter()
				.zip(&contour)
				.map(|(&(_, right), &(left, _))| right - left + 1.0)
				.fold(0.0_f64, f64::max);
			for (level, &(left, right)) in contour.iter().enumerate() {
				let (left, right) = (left + shift, right + shift);
				match merged.get_mut(level) {
					Some(extent) => {
						extent.0 = extent.0.min(left);
						extent.1 = extent.1.max(right);
					}
					None => merged.push((left, right)),
				}
			}
			placed.push(shift);
		}

		let center = match (placed.first(), placed.last()) {
			(Some(first), Some(last)) => (first + last) / 2.0,
			_ => 0.0,
		};
		for (&child, shift) in children.iter().zip(placed) {
			offsets[child] = shift - center;
		}

		let mut contour = Vec::with_capacity(merged.len() + 1);
		contour.push((0.0, 0.0));
		contour.extend(merged.into_iter().map(|(l, r)| (l - center, r - center)));
		contours[i] = contour;
	}

	// Top-down walk. Parents always sit at lower indices than their children.
	let mut breadth = vec![0.0_f64; slots.len()];
	for (i, slot) in slots.iter().enumerate() {
		if let Some(parent) = slot.parent {
			breadth[i] = breadth[parent] + offsets[i];
		}
	}
	let min_breadth = breadth.iter().copied().fold(f64::INFINITY, f64::min);

	let mut links = Vec::with_capacity(slots.len().saturating_sub(1));
	let nodes = slots
		.into_iter()
		.enumerate()
		.map(|(i, slot)| {
			if let Some(parent) = slot.parent {
				links.push(LinkDescriptor {
					source: parent,
					target: i,
				});
			}
			let b = (breadth[i] - min_breadth) * config.node_spacing;
			let d = slot.depth as f64 * config.level_spacing;
			let (x, y) = match config.orientation {
				Orientation::TopDown => (b, d),
				Orientation::LeftRight => (d, b),
			};
			LayoutNode {
				node: slot.node,
				x,
				y,
				breadth: b,
				depth: slot.depth,
			}
		})
		.collect();

	Layout { nodes, links }
}

/// Pre-order flattening with parent and child indices.
fn flatten(root: &Rc<TreeNode>) -> Vec<Slot> {
	let mut slots: Vec<Slot> = Vec::new();
	let mut stack: Vec<(Rc<TreeNode>, Option<usize>, usize)> = vec![(Rc::clone(root), None, 0)];
	while let Some((node, parent, depth)) = stack.pop() {
		let idx = slots.len();
		if let Some(p) = parent {
			slots[p].children.push(idx);
		}
		for child in node.children().iter().rev() {
			stack.push((Rc::clone(child), Some(idx), depth + 1));
		}
		slots.push(Slot {
			node,
			parent,
			depth,
			children: Vec::new(),
		});
	}
	slots
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::components::tree_graph::tree::build_tree;
	use crate::components::tree_graph::types::GraphRecord;

	fn tree(records: &[GraphRecord]) -> Rc<TreeNode> {
		build_tree(records).root.unwrap()
	}

	fn scenario() -> Rc<TreeNode> {
		tree(&[
			GraphRecord::new("Root", "Root node", &["Child1", "Child2"]),
			GraphRecord::new("Child1", "First child", &[]),
			GraphRecord::new("Child2", "Second child", &[]),
		])
	}

	/// An unbalanced tree that forces contour packing across cousins.
	fn lopsided() -> Rc<TreeNode> {
		tree(&[
			GraphRecord::new("root", "", &["a", "b", "c"]),
			GraphRecord::new("a", "", &["a1", "a2", "a3"]),
			GraphRecord::new("a3", "", &["a3x", "a3y", "a3z"]),
			GraphRecord::new("b", "", &[]),
			GraphRecord::new("c", "", &["c1"]),
			GraphRecord::new("c1", "", &["c1x", "c1y", "c1z", "c1w"]),
			GraphRecord::new("a1", "", &[]),
			GraphRecord::new("a2", "", &[]),
			GraphRecord::new("a3x", "", &[]),
			GraphRecord::new("a3y", "", &[]),
			GraphRecord::new("a3z", "", &[]),
			GraphRecord::new("c1x", "", &[]),
			GraphRecord::new("c1y", "", &[]),
			GraphRecord::new("c1z", "", &[]),
			GraphRecord::new("c1w", "", &[]),
		])
	}

	#[test]
	fn single_node_has_no_links() {
		let root = tree(&[GraphRecord::new("only", "", &[])]);
		let layout = layout_tree(&root, &LayoutConfig::default());

		assert_eq!(layout.nodes.len(), 1);
		assert!(layout.links.is_empty());
		assert_eq!((layout.nodes[0].x, layout.nodes[0].y), (0.0, 0.0));
	}

	#[test]
	fn counts_match_tree_size() {
		for root in [scenario(), lopsided()] {
			let layout = layout_tree(&root, &LayoutConfig::default());
			assert_eq!(layout.nodes.len(), root.size());
			assert_eq!(layout.links.len(), root.size() - 1);
		}
	}

	#[test]
	fn scenario_positions() {
		let layout = layout_tree(&scenario(), &LayoutConfig::default());
		let coords: Vec<(&str, f64, f64)> = layout
			.nodes
			.iter()
			.map(|n| (n.node.name(), n.x, n.y))
			.collect();

		assert_eq!(coords, vec![
			("Root", 45.0, 0.0),
			("Child1", 0.0, 110.0),
			("Child2", 90.0, 110.0),
		]);
		assert_eq!(layout.links, vec![
			LinkDescriptor {
				source: 0,
				target: 1
			},
			LinkDescriptor {
				source: 0,
				target: 2
			},
		]);
	}

	#[test]
	fn same_depth_nodes_never_overlap() {
		let config = LayoutConfig::default();
		let layout = layout_tree(&lopsided(), &config);

		for (i, a) in layout.nodes.iter().enumerate() {
			for b in &layout.nodes[i + 1..] {
				if a.depth == b.depth {
					let gap = (a.breadth - b.breadth).abs();
					assert!(
						gap >= config.node_spacing - 1e-9,
						"{} and {} are {gap} apart",
						a.node.name(),
						b.node.name()
					);
				}
			}
		}
	}

	/// A few hundred nodes with pseudo-random parents, in shuffled input order.
	fn generated(n: usize) -> Rc<TreeNode> {
		let mut seed: u64 = 42;
		let mut children: Vec<Vec<String>> = vec![Vec::new(); n];
		for i in 1..n {
			seed = (seed * 1_103_515_245 + 12_345) % (1 << 31);
			children[seed as usize % i].push(format!("n{i}"));
		}
		let mut records: Vec<GraphRecord> = children
			.into_iter()
			.enumerate()
			.map(|(i, c)| GraphRecord {
				name: format!("n{i}"),
				description: String::new(),
				children: c,
			})
			.collect();
		records.reverse();
		tree(&records)
	}

	#[test]
	fn invariants_hold_on_a_large_tree() {
		let config = LayoutConfig::default();
		let root = generated(300);
		let layout = layout_tree(&root, &config);

		assert_eq!(root.name(), "n0");
		assert_eq!(layout.nodes.len(), 300);
		assert_eq!(layout.links.len(), 299);

		let mut by_depth: Vec<Vec<f64>> = Vec::new();
		for n in &layout.nodes {
			if by_depth.len() <= n.depth {
				by_depth.resize(n.depth + 1, Vec::new());
			}
			by_depth[n.depth].push(n.breadth);
		}
		for level in &mut by_depth {
			level.sort_by(f64::total_cmp);
			for pair in level.windows(2) {
				assert!(pair[1] - pair[0] >= config.node_spacing - 1e-9);
			}
		}
	}

	#[test]
	fn parents_sit_between_their_children() {
		let layout = layout_tree(&lopsided(), &LayoutConfig::default());

		for (parent, _) in layout.nodes.iter().enumerate() {
			let children: Vec<f64> = layout
				.links
				.iter()
				.filter(|l| l.source == parent)
				.map(|l| layout.nodes[l.target].breadth)
				.collect();
			if children.is_empty() {
				continue;
			}
			let lo = children.iter().copied().fold(f64::INFINITY, f64::min);
			let hi = children.iter().copied().fold(f64::NEG_INFINITY, f64::max);
			let b = layout.nodes[parent].breadth;
			assert!(lo - 1e-9 <= b && b <= hi + 1e-9);
		}
	}

	#[test]
	fn siblings_keep_input_order() {
		let layout = layout_tree(&lopsided(), &LayoutConfig::default());
		let breadth_of = |name: &str| {
			layout
				.nodes
				.iter()
				.find(|n| n.node.name() == name)
				.map(|n| n.breadth)
				.unwrap()
		};
		assert!(breadth_of("a") < breadth_of("b"));
		assert!(breadth_of("b") < breadth_of("c"));
		assert!(breadth_of("c1x") < breadth_of("c1w"));
	}

	#[test]
	fn layout_is_deterministic() {
		let config = LayoutConfig::default();
		let first = layout_tree(&lopsided(), &config);
		let second = layout_tree(&lopsided(), &config);
		let coords = |l: &Layout| l.nodes.iter().map(|n| (n.x, n.y)).collect::<Vec<_>>();

		assert_eq!(coords(&first), coords(&second));
		assert_eq!(first.links, second.links);
	}

	#[test]
	fn left_right_swaps_axes() {
		let config = LayoutConfig {
			orientation: Orientation::LeftRight,
			..LayoutConfig::default()
		};
		let layout = layout_tree(&scenario(), &config);

		assert_eq!((layout.nodes[0].x, layout.nodes[0].y), (0.0, 45.0));
		assert_eq!((layout.nodes[2].x, layout.nodes[2].y), (110.0, 90.0));
	}

	#[test]
	fn bounds_cover_all_nodes() {
		let layout = layout_tree(&scenario(), &LayoutConfig::default());
		let bounds = layout.bounds().unwrap();

		assert_eq!(bounds.width(), 90.0);
		assert_eq!(bounds.height(), 110.0);
		assert_eq!(bounds.center(), (45.0, 55.0));
		assert!(Layout::default().bounds().is_none());
	}
}
