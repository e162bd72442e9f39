//! Leptos component wrapping the tree graph canvas.
//!
//! The component creates an HTML canvas element, repaints it whenever the
//! `scene` signal changes, and wires mouse/wheel handlers for panning,
//! zooming, hovering and clicking nodes. There is no animation loop: the
//! canvas is redrawn in response to data and pointer events only.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::render;
use super::scale::ScaleConfig;
use super::scene::Scene;
use super::state::TreeGraphState;
use super::theme::Theme;
use super::types::NodeDetail;

/// Bundles view state with visual configuration and the drawing context.
struct GraphContext {
	state: TreeGraphState,
	scale: ScaleConfig,
	theme: Theme,
	ctx: CanvasRenderingContext2d,
}

impl GraphContext {
	fn redraw(&self) {
		render::render(&self.state, &self.ctx, &self.scale, &self.theme);
	}
}

fn viewport_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

/// Renders the tree scene on a canvas and reports node clicks.
///
/// Every new value of `scene` replaces the drawn tree completely. A click on
/// a node calls `on_select` with that node's name and description; nothing
/// else on the canvas is clickable. The component sizes itself to its parent
/// container by default; set `fullscreen = true` to fill the viewport and
/// follow window resizes. Explicit `width`/`height` override automatic sizing.
#[component]
pub fn TreeGraphCanvas<F>(
	#[prop(into)] scene: Signal<Scene>,
	on_select: F,
	#[prop(default = Theme::default())] theme: Theme,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView
where
	F: Fn(NodeDetail) + 'static,
{
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<GraphContext>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (context_init, resize_cb_init) = (context.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let scene = scene.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};

		if let Some(c) = context_init.borrow_mut().as_mut() {
			c.state.set_scene(scene);
			c.redraw();
			return;
		}

		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			warn!("tree-graph: no window, canvas not initialized");
			return;
		};

		let (w, h) = match (fullscreen, viewport_size(&window)) {
			(true, Some(size)) => size,
			_ => (
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			),
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx = match canvas.get_context("2d") {
			Ok(Some(ctx)) => ctx,
			_ => {
				warn!("tree-graph: 2d canvas context unavailable");
				return;
			}
		};
		let Ok(ctx) = ctx.dyn_into::<CanvasRenderingContext2d>() else {
			warn!("tree-graph: unexpected canvas context type");
			return;
		};

		let graph = GraphContext {
			state: TreeGraphState::new(scene, w, h),
			scale: ScaleConfig::default(),
			theme: theme.clone(),
			ctx,
		};
		graph.redraw();
		*context_init.borrow_mut() = Some(graph);

		if fullscreen {
			let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(viewport_size) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(c) = context_resize.borrow_mut().as_mut() {
					c.state.resize(nw, nh);
					c.state.fit_to_view();
					c.redraw();
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}
	});

	let local_pos = move |ev: &MouseEvent| -> Option<(f64, f64)> {
		let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
		let rect = canvas.get_bounding_client_rect();
		Some((
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		))
	};

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = local_pos(&ev) else {
			return;
		};
		if let Some(c) = context_md.borrow_mut().as_mut() {
			c.state.pointer_down(x, y, &c.scale);
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = local_pos(&ev) else {
			return;
		};
		if let Some(c) = context_mm.borrow_mut().as_mut() {
			c.state.pointer_move(x, y, &c.scale);
			c.redraw();
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let Some((x, y)) = local_pos(&ev) else {
			return;
		};
		let clicked = context_mu.borrow_mut().as_mut().and_then(|c| {
			let detail = c.state.pointer_up(x, y, &c.scale);
			c.redraw();
			detail
		});
		if let Some(detail) = clicked {
			on_select(detail);
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(c) = context_ml.borrow_mut().as_mut() {
			c.state.pointer_leave();
			c.redraw();
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let mouse: &MouseEvent = &ev;
		let Some((x, y)) = local_pos(mouse) else {
			return;
		};
		if let Some(c) = context_wh.borrow_mut().as_mut() {
			c.state.zoom_at(x, y, ev.delta_y());
			c.redraw();
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="tree-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
