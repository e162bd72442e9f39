//! Canvas rendering for the tree graph.
//!
//! Draws the current scene in passes for correct z-ordering:
//! 1. Background (screen space)
//! 2. Link paths (world space)
//! 3. Node shapes, then hover/selection rings and labels on top

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::scale::{ScaleConfig, ScaledValues};
use super::scene::{LinkPath, NodeShape};
use super::state::TreeGraphState;
use super::theme::{Color, Theme};

/// Renders the complete scene to the canvas.
pub fn render(
	state: &TreeGraphState,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	theme: &Theme,
) {
	let scale = ScaledValues::new(config, state.transform.k);

	draw_background(state, ctx, theme);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	for link in &state.scene.links {
		draw_link(ctx, link, &scale, theme);
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());

	for node in &state.scene.nodes {
		draw_node(ctx, node, &scale, theme);
	}

	if let Some(node) = state.hovered.and_then(|i| state.scene.nodes.get(i)) {
		draw_ring(ctx, node, &scale, theme.node.hover_ring, 1.0);
	}
	if let Some(node) = state.selected.and_then(|i| state.scene.nodes.get(i)) {
		draw_ring(ctx, node, &scale, theme.node.selected_ring, 1.5);
	}

	if scale.label_alpha > 0.01 {
		ctx.set_global_alpha(scale.label_alpha);
		ctx.set_font(&scale.label_font);
		ctx.set_fill_style_str(&theme.node.label_color.to_css());
		for node in &state.scene.nodes {
			draw_label(ctx, node, &scale);
		}
		ctx.set_global_alpha(1.0);
	}

	ctx.restore();
}

fn draw_background(state: &TreeGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let gradient = theme
		.background
		.use_gradient
		.then(|| {
			ctx.create_radial_gradient(
				state.width / 2.0,
				state.height / 2.0,
				0.0,
				state.width / 2.0,
				state.height / 2.0,
				state.width.max(state.height) * 0.8,
			)
			.ok()
		})
		.flatten();

	match gradient {
		Some(gradient) => {
			let _ = gradient.add_color_stop(0.0, &theme.background.color_secondary.to_css());
			let _ = gradient.add_color_stop(1.0, &theme.background.color.to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		None => ctx.set_fill_style_str(&theme.background.color.to_css()),
	}

	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

fn draw_link(ctx: &CanvasRenderingContext2d, link: &LinkPath, scale: &ScaledValues, theme: &Theme) {
	let color = if link.placeholder {
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(scale.dash_pattern.0),
			&JsValue::from_f64(scale.dash_pattern.1),
		));
		theme.link.placeholder_color
	} else {
		let _ = ctx.set_line_dash(&js_sys::Array::new());
		theme.link.color
	};

	ctx.set_stroke_style_str(&color.to_css());
	ctx.set_line_width(scale.link_width);
	ctx.begin_path();
	ctx.move_to(link.from.x, link.from.y);
	ctx.bezier_curve_to(
		link.ctrl1.x,
		link.ctrl1.y,
		link.ctrl2.x,
		link.ctrl2.y,
		link.to.x,
		link.to.y,
	);
	ctx.stroke();
}

fn draw_node(ctx: &CanvasRenderingContext2d, node: &NodeShape, scale: &ScaledValues, theme: &Theme) {
	let (x, y) = (node.center.x, node.center.y);
	let radius = scale.node_radius;
	let base = if node.placeholder {
		theme.node.placeholder_color
	} else {
		theme.palette.at_depth(node.depth)
	};

	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);

	let gradient = theme
		.node
		.use_gradient
		.then(|| {
			ctx.create_radial_gradient(x - radius * 0.3, y - radius * 0.3, 0.0, x, y, radius)
				.ok()
		})
		.flatten();
	match gradient {
		Some(gradient) => {
			let _ = gradient.add_color_stop(0.0, &base.lighten(0.4).to_css());
			let _ = gradient.add_color_stop(0.7, &base.to_css());
			let _ = gradient.add_color_stop(1.0, &base.darken(0.2).to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		None => ctx.set_fill_style_str(&base.to_css()),
	}
	ctx.fill();

	if theme.node.border_width > 0.0 {
		ctx.set_stroke_style_str(&theme.node.border_color.to_css());
		ctx.set_line_width(theme.node.border_width / scale.k);
		ctx.stroke();
	}
}

fn draw_ring(
	ctx: &CanvasRenderingContext2d,
	node: &NodeShape,
	scale: &ScaledValues,
	color: Color,
	width_mult: f64,
) {
	ctx.begin_path();
	let _ = ctx.arc(
		node.center.x,
		node.center.y,
		scale.node_radius + scale.ring_offset,
		0.0,
		2.0 * PI,
	);
	ctx.set_stroke_style_str(&color.to_css());
	ctx.set_line_width(scale.ring_width * width_mult);
	ctx.stroke();
}

/// Leaves are labelled beside the node, inner nodes above it so the label
/// does not sit on the outgoing links.
fn draw_label(ctx: &CanvasRenderingContext2d, node: &NodeShape, scale: &ScaledValues) {
	let gap = scale.node_radius + scale.ring_offset + 2.0 / scale.k;
	let (x, y) = if node.leaf {
		(node.center.x + gap, node.center.y + scale.label_size * 0.35)
	} else {
		(node.center.x + gap, node.center.y - gap)
	};
	let _ = ctx.fill_text(&node.name, x, y);
}
