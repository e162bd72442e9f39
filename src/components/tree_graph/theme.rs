//! Colours and visual style for the tree canvas.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		let up = |c: u8| (c as f64 + (255.0 - c as f64) * f) as u8;
		Self {
			r: up(self.r),
			g: up(self.g),
			b: up(self.b),
			a: self.a,
		}
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black)
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		let down = |c: u8| (c as f64 * f) as u8;
		Self {
			r: down(self.r),
			g: down(self.g),
			b: down(self.b),
			a: self.a,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Node fill colours, picked by tree depth.
#[derive(Clone, Debug)]
pub struct DepthPalette {
	pub colors: Vec<Color>,
}

impl DepthPalette {
	/// Slate blues and teals (default)
	pub fn slate() -> Self {
		Self {
			colors: vec![
				Color::rgb(94, 129, 172),  // Steel blue
				Color::rgb(100, 148, 160), // Teal gray
				Color::rgb(129, 161, 193), // Light steel
				Color::rgb(119, 158, 165), // Desaturated cyan
				Color::rgb(143, 163, 180), // Cool gray
			],
		}
	}

	/// Cool teals and purples
	pub fn aurora() -> Self {
		Self {
			colors: vec![
				Color::rgb(130, 120, 150), // Wisteria
				Color::rgb(100, 145, 135), // Eucalyptus
				Color::rgb(120, 130, 160), // Periwinkle
				Color::rgb(105, 140, 145), // Teal
				Color::rgb(135, 140, 150), // Pewter
			],
		}
	}

	/// Colour used when the palette is empty.
	pub const FALLBACK: Color = Color::rgb(128, 128, 128);

	/// Colour for nodes at `depth`; cycles once depths run past the palette.
	pub fn at_depth(&self, depth: usize) -> Color {
		self.colors
			.get(depth % self.colors.len().max(1))
			.copied()
			.unwrap_or(Self::FALLBACK)
	}
}

#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	pub color: Color,
	/// Centre colour of the radial gradient
	pub color_secondary: Color,
	pub use_gradient: bool,
}

#[derive(Clone, Debug)]
pub struct LinkStyle {
	pub color: Color,
	/// Links into placeholder nodes
	pub placeholder_color: Color,
}

#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Whether nodes have inner gradients
	pub use_gradient: bool,
	/// Stroke width in screen pixels (0 = no border)
	pub border_width: f64,
	pub border_color: Color,
	/// Fill for nodes standing in for missing records
	pub placeholder_color: Color,
	pub label_color: Color,
	pub hover_ring: Color,
	pub selected_ring: Color,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub name: &'static str,
	pub background: BackgroundStyle,
	pub link: LinkStyle,
	pub node: NodeStyle,
	pub palette: DepthPalette,
}

impl Theme {
	/// Dark slate theme (default)
	pub fn default_theme() -> Self {
		Self {
			name: "default",
			background: BackgroundStyle {
				color: Color::rgb(22, 27, 34),
				color_secondary: Color::rgb(30, 35, 42),
				use_gradient: true,
			},
			link: LinkStyle {
				color: Color::rgba(140, 160, 180, 0.55),
				placeholder_color: Color::rgba(200, 120, 110, 0.5),
			},
			node: NodeStyle {
				use_gradient: true,
				border_width: 1.0,
				border_color: Color::rgba(255, 255, 255, 0.25),
				placeholder_color: Color::rgb(120, 90, 90),
				label_color: Color::rgba(255, 255, 255, 0.85),
				hover_ring: Color::rgba(255, 255, 255, 0.5),
				selected_ring: Color::rgb(240, 200, 120),
			},
			palette: DepthPalette::slate(),
		}
	}

	/// Flat, higher-contrast variant
	pub fn midnight() -> Self {
		Self {
			name: "midnight",
			background: BackgroundStyle {
				color: Color::rgb(18, 20, 28),
				color_secondary: Color::rgb(18, 20, 28),
				use_gradient: false,
			},
			link: LinkStyle {
				color: Color::rgba(100, 120, 150, 0.6),
				placeholder_color: Color::rgba(180, 100, 100, 0.5),
			},
			node: NodeStyle {
				use_gradient: false,
				border_width: 0.0,
				border_color: Color::rgba(255, 255, 255, 0.0),
				placeholder_color: Color::rgb(110, 80, 85),
				label_color: Color::rgb(230, 232, 240),
				hover_ring: Color::rgba(255, 255, 255, 0.6),
				selected_ring: Color::rgb(255, 210, 110),
			},
			palette: DepthPalette::aurora(),
		}
	}
}

impl Theme {
	/// Look a theme up by its `name`; unknown names get the default.
	pub fn named(name: &str) -> Self {
		match name {
			"midnight" => Self::midnight(),
			_ => Self::default_theme(),
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::default_theme()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn css_output() {
		assert_eq!(Color::rgb(22, 27, 34).to_css(), "#161b22");
		assert_eq!(
			Color::rgb(10, 20, 30).with_alpha(0.5).to_css(),
			"rgba(10, 20, 30, 0.5)"
		);
	}

	#[test]
	fn lighten_and_darken_move_towards_white_and_black() {
		let c = Color::rgb(100, 100, 100);
		assert_eq!(c.lighten(1.0), Color::rgb(255, 255, 255));
		assert_eq!(c.darken(1.0), Color::rgb(0, 0, 0));
		assert_eq!(c.lighten(0.0), c);
	}

	#[test]
	fn themes_resolve_by_name() {
		assert_eq!(Theme::named("midnight").name, "midnight");
		assert_eq!(Theme::named("nope").name, "default");
	}

	#[test]
	fn palette_cycles_by_depth() {
		let palette = DepthPalette::slate();
		let n = palette.colors.len();
		assert_eq!(palette.at_depth(0), palette.at_depth(n));
		assert_ne!(palette.at_depth(0), palette.at_depth(1));
	}

	#[test]
	fn empty_palette_falls_back() {
		let palette = DepthPalette { colors: Vec::new() };
		assert_eq!(palette.at_depth(0), DepthPalette::FALLBACK);
		assert_eq!(palette.at_depth(7), DepthPalette::FALLBACK);
	}
}
