//! Sidebar showing the selected node.

use leptos::prelude::*;

use super::tree_graph::NodeDetail;

/// Shows the name and description of the most recently selected node.
/// Renders nothing until a node has been selected.
#[component]
pub fn DetailPanel(#[prop(into)] detail: Signal<Option<NodeDetail>>) -> impl IntoView {
	move || {
		detail.get().map(|d| {
			view! {
				<aside class="sidebar">
					<h2>{d.name}</h2>
					<p>{d.description}</p>
				</aside>
			}
		})
	}
}
