//! Zoom-dependent sizes for the tree canvas.
//!
//! Layout coordinates are world-space; the canvas applies the pan/zoom
//! transform before drawing. Each visual property states how it reacts to the
//! zoom factor `k` through a [`ScaleBehavior`], and [`ScaledValues`] resolves
//! them once per frame.

/// How a size reacts to zoom.
#[derive(Clone, Debug, PartialEq)]
pub enum ScaleBehavior {
	/// Constant world-space size. Appears larger when zoomed in.
	World,
	/// Constant screen-space size in pixels.
	Screen,
	/// World-space size whose on-screen size is kept within bounds.
	Clamped { min_screen: f64, max_screen: f64 },
}

impl ScaleBehavior {
	/// World-space value to draw with after the canvas transform is applied.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::World => base,
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => base.clamp(min_screen / k, max_screen / k),
		}
	}
}

/// Opacity as a function of zoom.
#[derive(Clone, Debug, PartialEq)]
pub enum AlphaBehavior {
	Constant,
	/// Invisible at `zero_alpha_k` and below, opaque from `full_alpha_k`.
	Fade { zero_alpha_k: f64, full_alpha_k: f64 },
}

impl AlphaBehavior {
	pub fn apply(&self, k: f64) -> f64 {
		match self {
			AlphaBehavior::Constant => 1.0,
			AlphaBehavior::Fade {
				zero_alpha_k,
				full_alpha_k,
			} => {
				if zero_alpha_k == full_alpha_k {
					return 1.0;
				}
				((k - zero_alpha_k) / (full_alpha_k - zero_alpha_k)).clamp(0.0, 1.0)
			}
		}
	}
}

#[derive(Clone, Debug)]
pub struct NodeScaleConfig {
	/// Node radius in world units.
	pub radius: f64,
	pub radius_behavior: ScaleBehavior,
	/// Click target radius in world units.
	pub hit_radius: f64,
	pub hit_behavior: ScaleBehavior,
	/// Label font size in pixels at `k = 1`.
	pub label_size: f64,
	pub label_behavior: ScaleBehavior,
	pub label_alpha: AlphaBehavior,
}

#[derive(Clone, Debug)]
pub struct LinkScaleConfig {
	/// Stroke width.
	pub line_width: f64,
	pub width_behavior: ScaleBehavior,
	/// Dash and gap lengths for links into placeholder nodes.
	pub dash_pattern: (f64, f64),
}

/// Hover and selection ring around a node.
#[derive(Clone, Debug)]
pub struct RingScaleConfig {
	/// Stroke width in screen pixels.
	pub width: f64,
	/// Gap between node edge and ring in screen pixels.
	pub offset: f64,
}

/// All zoom-dependent sizes of the canvas.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	pub node: NodeScaleConfig,
	pub link: LinkScaleConfig,
	pub ring: RingScaleConfig,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			node: NodeScaleConfig {
				radius: 9.0,
				radius_behavior: ScaleBehavior::Clamped {
					min_screen: 4.0,
					max_screen: 40.0,
				},
				hit_radius: 14.0,
				hit_behavior: ScaleBehavior::Clamped {
					min_screen: 8.0,
					max_screen: f64::INFINITY,
				},
				label_size: 12.0,
				label_behavior: ScaleBehavior::Screen,
				label_alpha: AlphaBehavior::Fade {
					zero_alpha_k: 0.35,
					full_alpha_k: 0.6,
				},
			},
			link: LinkScaleConfig {
				line_width: 1.5,
				width_behavior: ScaleBehavior::Screen,
				dash_pattern: (6.0, 4.0),
			},
			ring: RingScaleConfig {
				width: 2.0,
				offset: 3.0,
			},
		}
	}
}

/// [`ScaleConfig`] resolved for one zoom level, in world-space units.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	pub k: f64,
	pub node_radius: f64,
	pub hit_radius: f64,
	/// CSS font string for labels, e.g. "12px sans-serif".
	pub label_font: String,
	pub label_size: f64,
	pub label_alpha: f64,
	pub link_width: f64,
	pub dash_pattern: (f64, f64),
	pub ring_width: f64,
	pub ring_offset: f64,
}

impl ScaledValues {
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		let label_size = config.node.label_behavior.apply(config.node.label_size, k);
		Self {
			k,
			node_radius: config.node.radius_behavior.apply(config.node.radius, k),
			hit_radius: config.node.hit_behavior.apply(config.node.hit_radius, k),
			label_font: format!("{label_size}px sans-serif"),
			label_size,
			label_alpha: config.node.label_alpha.apply(k),
			link_width: config.link.width_behavior.apply(config.link.line_width, k),
			dash_pattern: (
				ScaleBehavior::Screen.apply(config.link.dash_pattern.0, k),
				ScaleBehavior::Screen.apply(config.link.dash_pattern.1, k),
			),
			ring_width: config.ring.width / k,
			ring_offset: config.ring.offset / k,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn clamped_sizes_respect_screen_bounds() {
		let behavior = ScaleBehavior::Clamped {
			min_screen: 4.0,
			max_screen: 40.0,
		};
		// Zoomed far out, the node would be 0.9px; it is held at 4px on screen.
		assert_eq!(behavior.apply(9.0, 0.1), 40.0);
		// Zoomed far in, 90px on screen is cut back to 40px.
		assert_eq!(behavior.apply(9.0, 10.0), 4.0);
		assert_eq!(behavior.apply(9.0, 1.0), 9.0);
	}

	#[test]
	fn screen_sizes_cancel_zoom() {
		assert_eq!(ScaleBehavior::Screen.apply(12.0, 2.0), 6.0);
		assert_eq!(ScaleBehavior::World.apply(12.0, 2.0), 12.0);
	}

	#[test]
	fn labels_fade_out_when_zoomed_out() {
		let scaled = ScaledValues::new(&ScaleConfig::default(), 0.2);
		assert_eq!(scaled.label_alpha, 0.0);

		let scaled = ScaledValues::new(&ScaleConfig::default(), 1.0);
		assert_eq!(scaled.label_alpha, 1.0);
		assert_eq!(scaled.label_font, "12px sans-serif");
		assert_eq!(AlphaBehavior::Constant.apply(0.01), 1.0);
	}
}
