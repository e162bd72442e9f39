//! Single-selection state and its hand-off to the detail view.

use leptos::prelude::*;
use log::debug;

use crate::components::tree_graph::NodeDetail;

/// Receives the selected node's data and presents it.
pub trait DetailView {
	/// Show `detail`, replacing whatever was shown before.
	fn show(&self, detail: &NodeDetail);
	/// Show nothing.
	fn clear(&self);
}

impl DetailView for WriteSignal<Option<NodeDetail>> {
	fn show(&self, detail: &NodeDetail) {
		self.set(Some(detail.clone()));
	}

	fn clear(&self) {
		self.set(None);
	}
}

/// Holds at most one selected node. Starts empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
	selected: Option<NodeDetail>,
}

impl SelectionState {
	pub fn selected(&self) -> Option<&NodeDetail> {
		self.selected.as_ref()
	}
}

/// Owns the [`SelectionState`] and keeps a [`DetailView`] in sync with it.
///
/// Selection is last-write-wins with no deselect. Only a full data refresh
/// calls [`SelectionController::reset`].
pub struct SelectionController<V> {
	state: SelectionState,
	view: V,
}

impl<V: DetailView> SelectionController<V> {
	pub fn new(view: V) -> Self {
		Self {
			state: SelectionState::default(),
			view,
		}
	}

	pub fn state(&self) -> &SelectionState {
		&self.state
	}

	/// Make `detail` the selection and notify the view before returning.
	pub fn select(&mut self, detail: NodeDetail) {
		debug!("tree-graph: selected {:?}", detail.name);
		self.view.show(&detail);
		self.state.selected = Some(detail);
	}

	/// Drop the selection after the underlying graph was replaced.
	pub fn reset(&mut self) {
		if self.state.selected.take().is_some() {
			self.view.clear();
		}
	}
}
