//! Canvas view state and pointer interaction.
//!
//! Holds the current [`Scene`] together with the pan/zoom transform, hover
//! and selection highlight, and the in-progress pointer gesture. Pointer
//! handlers in the component forward screen coordinates here; a press and
//! release on the same node without dragging is a click and yields that
//! node's [`NodeDetail`].

use super::scale::{ScaleConfig, ScaledValues};
use super::scene::Scene;
use super::types::NodeDetail;

/// Screen distance a press may travel and still count as a click.
const CLICK_SLOP: f64 = 4.0;

/// Margin kept around the tree when fitting it to the canvas.
const FIT_PADDING: f64 = 60.0;

const MIN_ZOOM: f64 = 0.1;
const MAX_ZOOM: f64 = 10.0;

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%, clamped to 0.1..10.0).
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self { x: 0.0, y: 0.0, k: 1.0 }
	}
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// A pointer press on a node that may still become a click.
#[derive(Clone, Copy, Debug)]
pub struct Press {
	pub node: usize,
	pub x: f64,
	pub y: f64,
}

/// Everything the painter and the pointer handlers share.
pub struct TreeGraphState {
	pub scene: Scene,
	pub transform: ViewTransform,
	pub pan: PanState,
	pub press: Option<Press>,
	pub hovered: Option<usize>,
	pub selected: Option<usize>,
	pub width: f64,
	pub height: f64,
}

impl TreeGraphState {
	pub fn new(scene: Scene, width: f64, height: f64) -> Self {
		let mut state = Self {
			scene,
			transform: ViewTransform::default(),
			pan: PanState::default(),
			press: None,
			hovered: None,
			selected: None,
			width,
			height,
		};
		state.fit_to_view();
		state
	}

	/// Replace the scene wholesale. Highlights and gestures refer to indices
	/// of the old scene, so they are dropped and the view is refitted.
	pub fn set_scene(&mut self, scene: Scene) {
		self.scene = scene;
		self.press = None;
		self.pan = PanState::default();
		self.hovered = None;
		self.selected = None;
		self.fit_to_view();
	}

	/// Centre the tree and zoom so that it fits the canvas, never past 1:1.
	pub fn fit_to_view(&mut self) {
		let Some(bounds) = self.scene.bounds() else {
			self.transform = ViewTransform {
				x: self.width / 2.0,
				y: self.height / 2.0,
				k: 1.0,
			};
			return;
		};

		let fit = |avail: f64, extent: f64| {
			if extent > 0.0 {
				(avail - 2.0 * FIT_PADDING).max(1.0) / extent
			} else {
				1.0
			}
		};
		let k = fit(self.width, bounds.width())
			.min(fit(self.height, bounds.height()))
			.clamp(MIN_ZOOM, 1.0);
		let (cx, cy) = bounds.center();
		self.transform = ViewTransform {
			x: self.width / 2.0 - cx * k,
			y: self.height / 2.0 - cy * k,
			k,
		};
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64, config: &ScaleConfig) -> Option<usize> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let scale = ScaledValues::new(config, self.transform.k);
		self.scene.node_at(gx, gy, scale.hit_radius)
	}

	/// Pointer down: arm a click on a node, or start panning the background.
	pub fn pointer_down(&mut self, sx: f64, sy: f64, config: &ScaleConfig) {
		match self.node_at_position(sx, sy, config) {
			Some(node) => self.press = Some(Press { node, x: sx, y: sy }),
			None => {
				self.pan = PanState {
					active: true,
					start_x: sx,
					start_y: sy,
					transform_start_x: self.transform.x,
					transform_start_y: self.transform.y,
				};
			}
		}
	}

	pub fn pointer_move(&mut self, sx: f64, sy: f64, config: &ScaleConfig) {
		if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (sx - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (sy - self.pan.start_y);
			return;
		}
		if let Some(press) = self.press {
			if (sx - press.x).hypot(sy - press.y) > CLICK_SLOP {
				self.press = None;
			}
		}
		self.hovered = self.node_at_position(sx, sy, config);
	}

	/// Pointer up: returns the clicked node's detail when the gesture was a
	/// click on a node.
	pub fn pointer_up(&mut self, sx: f64, sy: f64, config: &ScaleConfig) -> Option<NodeDetail> {
		self.pan.active = false;
		let press = self.press.take()?;
		if (sx - press.x).hypot(sy - press.y) > CLICK_SLOP {
			return None;
		}
		if self.node_at_position(sx, sy, config) != Some(press.node) {
			return None;
		}
		self.selected = Some(press.node);
		self.scene.nodes.get(press.node).map(|n| n.detail())
	}

	pub fn pointer_leave(&mut self) {
		self.pan.active = false;
		self.press = None;
		self.hovered = None;
	}

	/// Zoom around the pointer, one step per wheel event.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		let new_k = (self.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}
