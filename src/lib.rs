//! tree-graph: interactive tree diagram for a parent/child node graph.
//!
//! This crate provides a WASM client that fetches a flat list of named
//! records, arranges them as a rooted tree on a canvas, and shows the detail
//! of whichever node was clicked last in a sidebar.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::*;
use log::{Level, info};

pub mod api;
pub mod components;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod selection;

pub use components::detail_panel::DetailPanel;
pub use components::tree_graph::{GraphRecord, NodeDetail, Scene, TreeGraphCanvas};

use api::RecordSource;
use components::tree_graph::{LayoutConfig, Theme};
use config::AppConfig;
use pipeline::{FetchSequencer, prepare_scene};
use selection::SelectionController;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("tree-graph: logging initialized");
}

/// Main application component.
/// Loads the record snapshot and renders the tree with its detail sidebar.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = AppConfig::from_document();
	let theme = Theme::named(&config.theme);
	let source = Rc::new(RecordSource::detect(&config));
	let layout = Rc::new(LayoutConfig::default());

	let (scene, set_scene) = signal(Scene::empty());
	let (detail, set_detail) = signal(None::<NodeDetail>);
	let selection = Rc::new(RefCell::new(SelectionController::new(set_detail)));
	let sequencer = Rc::new(RefCell::new(FetchSequencer::default()));

	let reload = {
		let selection = selection.clone();
		Rc::new(move || {
			let ticket = sequencer.borrow_mut().begin();
			let (source, layout, sequencer, selection) = (
				source.clone(),
				layout.clone(),
				sequencer.clone(),
				selection.clone(),
			);
			spawn_local(async move {
				let result = source.load().await;
				if !sequencer.borrow().is_current(ticket) {
					return;
				}
				let build = prepare_scene(result, &layout);
				selection.borrow_mut().reset();
				set_scene.set(build.scene);
			});
		})
	};
	reload();

	let on_select = move |d: NodeDetail| selection.borrow_mut().select(d);
	let on_reload = move |_: web_sys::MouseEvent| reload();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Graph Explorer" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			<TreeGraphCanvas scene=scene on_select=on_select theme=theme fullscreen=true />
			<div class="graph-overlay">
				<h1>"Graph Explorer"</h1>
				<p class="subtitle">"Click a node for details. Scroll to zoom. Drag background to pan."</p>
				<button class="reload" on:click=on_reload>"Reload"</button>
			</div>
			<DetailPanel detail=detail />
		</div>
	}
}
