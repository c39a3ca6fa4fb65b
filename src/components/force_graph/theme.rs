//! Visual theming for the knowledge-graph canvas.
//!
//! Node colors come from the node's [`NodeType`], so the legend in the app
//! shell and the canvas always agree.

use super::types::NodeType;

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

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black)
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * f) as u8,
			g: (self.g as f64 * f) as u8,
			b: (self.b as f64 * f) as u8,
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

/// One color per node type.
#[derive(Clone, Debug)]
pub struct TypePalette {
	pub character: Color,
	pub location: Color,
	pub event: Color,
	pub item: Color,
	pub organization: Color,
	pub concept: Color,
	pub note: Color,
	pub other: Color,
}

impl TypePalette {
	pub fn color_for(&self, node_type: NodeType) -> Color {
		match node_type {
			NodeType::Character => self.character,
			NodeType::Location => self.location,
			NodeType::Event => self.event,
			NodeType::Item => self.item,
			NodeType::Organization => self.organization,
			NodeType::Concept => self.concept,
			NodeType::Note => self.note,
			NodeType::Other => self.other,
		}
	}
}

impl Default for TypePalette {
	fn default() -> Self {
		Self {
			character: Color::rgb(94, 129, 172),    // Steel blue
			location: Color::rgb(100, 148, 120),    // Moss
			event: Color::rgb(180, 120, 100),       // Terracotta
			item: Color::rgb(185, 145, 110),        // Amber
			organization: Color::rgb(130, 120, 150), // Wisteria
			concept: Color::rgb(100, 145, 160),     // Steel teal
			note: Color::rgb(143, 163, 180),        // Cool gray
			other: Color::rgb(122, 122, 122),       // Neutral
		}
	}
}

/// Background style configuration.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	/// Primary background color
	pub color: Color,
	/// Center color for the radial gradient
	pub color_secondary: Color,
	pub use_gradient: bool,
}

/// Edge visual style.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	pub color: Color,
	/// Color of the hovered edge and its label
	pub highlight_color: Color,
}

/// Node visual style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Whether nodes have a radial gradient for depth
	pub use_gradient: bool,
	pub label_color: Color,
	/// Outline for pinned nodes
	pub pinned_outline: Color,
	/// Outline for nodes matching the search box
	pub search_outline: Color,
	/// Outline for the hovered node
	pub hover_outline: Color,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub background: BackgroundStyle,
	pub edge: EdgeStyle,
	pub node: NodeStyle,
	pub palette: TypePalette,
	/// Zoom readout text color
	pub readout_color: Color,
}

impl Theme {
	/// Dark slate theme with subtle gradients (default)
	pub fn default_theme() -> Self {
		Self {
			background: BackgroundStyle {
				color: Color::rgb(22, 27, 34),
				color_secondary: Color::rgb(30, 35, 42),
				use_gradient: true,
			},
			edge: EdgeStyle {
				color: Color::rgba(140, 160, 180, 0.45),
				highlight_color: Color::rgba(230, 236, 245, 0.95),
			},
			node: NodeStyle {
				use_gradient: true,
				label_color: Color::rgba(255, 255, 255, 0.85),
				pinned_outline: Color::rgb(240, 190, 80),
				search_outline: Color::rgb(120, 210, 255),
				hover_outline: Color::rgba(255, 255, 255, 0.8),
			},
			palette: TypePalette::default(),
			readout_color: Color::rgba(200, 210, 225, 0.7),
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::default_theme()
	}
}
