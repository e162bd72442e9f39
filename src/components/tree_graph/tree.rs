//! Tree construction from the flat record list.
//!
//! Records reference their children by name. The builder resolves those
//! references through a name index and materializes a strict tree of owned
//! nodes with weak parent pointers. Malformed input never aborts the build:
//! each repair is recorded as a [`GraphIssue`] and logged.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::rc::{Rc, Weak};

use log::debug;

use super::types::{GraphRecord, NodeDetail};
use crate::error::GraphIssue;

/// Where a tree node's data came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
	/// Backed by a record from the snapshot.
	Record,
	/// Placeholder for a child name with no matching record.
	Missing,
}

/// A node of the materialized tree.
///
/// The root owns the whole tree through `children`; `parent` is a weak
/// back-reference and is dangling only for the root.
#[derive(Debug)]
pub struct TreeNode {
	name: String,
	description: String,
	kind: NodeKind,
	parent: Weak<TreeNode>,
	children: Vec<Rc<TreeNode>>,
}

impl TreeNode {
	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn description(&self) -> &str {
		&self.description
	}

	pub fn kind(&self) -> NodeKind {
		self.kind
	}

	pub fn children(&self) -> &[Rc<TreeNode>] {
		&self.children
	}

	/// The owning parent, or `None` for the root.
	pub fn parent(&self) -> Option<Rc<TreeNode>> {
		self.parent.upgrade()
	}

	pub fn is_root(&self) -> bool {
		self.parent.upgrade().is_none()
	}

	pub fn is_leaf(&self) -> bool {
		self.children.is_empty()
	}

	/// Number of nodes in this subtree, including itself.
	pub fn size(&self) -> usize {
		let mut count = 0;
		let mut stack = vec![self];
		while let Some(node) = stack.pop() {
			count += 1;
			stack.extend(node.children.iter().map(Rc::as_ref));
		}
		count
	}

	/// The payload handed to the detail view when this node is selected.
	pub fn detail(&self) -> NodeDetail {
		NodeDetail {
			name: self.name.clone(),
			description: self.description.clone(),
		}
	}

	/// Depth-first traversal, parent before children, children in order.
	pub fn pre_order(self: &Rc<Self>) -> Vec<Rc<TreeNode>> {
		let mut out = Vec::new();
		let mut stack = vec![Rc::clone(self)];
		while let Some(node) = stack.pop() {
			stack.extend(node.children.iter().rev().cloned());
			out.push(node);
		}
		out
	}
}

/// Result of [`build_tree`]: the root (absent only for empty input) and every
/// repair applied along the way.
#[derive(Debug, Default)]
pub struct TreeBuild {
	pub root: Option<Rc<TreeNode>>,
	pub issues: Vec<GraphIssue>,
}

/// Build a single rooted tree from a flat record list.
///
/// The root is the first record, in input order, that no other record lists
/// as a child. Unknown child names become [`NodeKind::Missing`] leaves, a
/// child that is already on the current ancestor path is dropped, and a
/// record with children is expanded only the first time it is reached, so
/// the tree never holds more nodes than there are child references.
pub fn build_tree(records: &[GraphRecord]) -> TreeBuild {
	let mut issues = Vec::new();

	let mut index: HashMap<&str, &GraphRecord> = HashMap::with_capacity(records.len());
	for record in records {
		match index.entry(record.name.as_str()) {
			Entry::Vacant(slot) => {
				slot.insert(record);
			}
			Entry::Occupied(_) => issues.push(GraphIssue::DuplicateName {
				name: record.name.clone(),
			}),
		}
	}

	let referenced: HashSet<&str> = records
		.iter()
		.flat_map(|r| r.children.iter().map(String::as_str))
		.collect();
	let mut seen = HashSet::new();
	let candidates: Vec<&GraphRecord> = records
		.iter()
		.filter(|r| seen.insert(r.name.as_str()))
		.filter(|r| !referenced.contains(r.name.as_str()))
		.collect();

	let root_record = match candidates.split_first() {
		Some((&first, rest)) => {
			if !rest.is_empty() {
				issues.push(GraphIssue::MultipleRoots {
					chosen: first.name.clone(),
					others: rest.iter().map(|r| r.name.clone()).collect(),
				});
			}
			first
		}
		None => match records.first() {
			Some(first) => {
				issues.push(GraphIssue::NoRoot {
					chosen: first.name.clone(),
				});
				first
			}
			None => return TreeBuild { root: None, issues },
		},
	};

	let mut builder = Builder {
		index,
		path: HashSet::new(),
		visited: HashSet::new(),
		issues,
		nodes: 0,
	};
	let root = builder.node(root_record, Weak::new());

	let mut reported = HashSet::new();
	let unreachable: Vec<String> = records
		.iter()
		.filter(|r| !builder.visited.contains(r.name.as_str()))
		.filter(|r| reported.insert(r.name.as_str()))
		.map(|r| r.name.clone())
		.collect();
	if !unreachable.is_empty() {
		builder.issues.push(GraphIssue::Unreachable { names: unreachable });
	}

	for issue in &builder.issues {
		issue.report();
	}
	debug!(
		"tree-graph: built tree rooted at {:?} with {} nodes",
		root.name(),
		builder.nodes
	);

	TreeBuild {
		root: Some(root),
		issues: builder.issues,
	}
}

struct Builder<'a> {
	index: HashMap<&'a str, &'a GraphRecord>,
	/// Names on the active recursion path.
	path: HashSet<&'a str>,
	visited: HashSet<&'a str>,
	issues: Vec<GraphIssue>,
	/// Nodes materialized so far.
	nodes: usize,
}

impl<'a> Builder<'a> {
	fn node(&mut self, record: &'a GraphRecord, parent: Weak<TreeNode>) -> Rc<TreeNode> {
		let name = record.name.as_str();
		self.path.insert(name);
		self.visited.insert(name);
		self.nodes += 1;

		let node = Rc::new_cyclic(|this| {
			let mut children = Vec::with_capacity(record.children.len());
			for child in &record.children {
				if let Some(node) = self.child(record, child, this) {
					children.push(node);
				}
			}
			TreeNode {
				name: record.name.clone(),
				description: record.description.clone(),
				kind: NodeKind::Record,
				parent,
				children,
			}
		});

		self.path.remove(name);
		node
	}

	fn child(
		&mut self,
		parent: &'a GraphRecord,
		name: &'a str,
		this: &Weak<TreeNode>,
	) -> Option<Rc<TreeNode>> {
		if self.path.contains(name) {
			self.issues.push(GraphIssue::Cycle {
				parent: parent.name.clone(),
				child: name.to_string(),
			});
			return None;
		}

		match self.index.get(name).copied() {
			Some(record) if !record.children.is_empty() && self.visited.contains(name) => {
				self.issues.push(GraphIssue::SharedChild {
					parent: parent.name.clone(),
					child: name.to_string(),
				});
				self.nodes += 1;
				Some(Rc::new(TreeNode {
					name: record.name.clone(),
					description: record.description.clone(),
					kind: NodeKind::Record,
					parent: this.clone(),
					children: Vec::new(),
				}))
			}
			Some(record) => Some(self.node(record, this.clone())),
			None => {
				self.issues.push(GraphIssue::DanglingChild {
					parent: parent.name.clone(),
					child: name.to_string(),
				});
				self.nodes += 1;
				Some(Rc::new(TreeNode {
					name: name.to_string(),
					description: String::new(),
					kind: NodeKind::Missing,
					parent: this.clone(),
					children: Vec::new(),
				}))
			}
		}
	}
}
