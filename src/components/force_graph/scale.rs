//! Zoom-dependent sizing for graph visuals.
//!
//! Drawing happens after the canvas transform has been applied, so anything
//! that should keep a constant on-screen size has to be divided by the zoom
//! level `k`.
//!
//! # Scaling Behaviors
//!
//! - [`ScaleBehavior::World`]: scales with zoom (appears larger when zoomed in).
//! - [`ScaleBehavior::Screen`]: constant pixel size regardless of zoom.
//! - [`ScaleBehavior::Clamped`]: world-space size, kept within screen-size bounds.

/// Defines how a visual property scales with zoom level.
#[derive(Clone, Debug)]
pub enum ScaleBehavior {
	/// Constant world-space size. Appears larger when zoomed in.
	World,
	/// Constant screen-space size (pixels). Unaffected by zoom.
	Screen,
	/// World-space scaling, clamped to min/max screen-space bounds.
	Clamped { min_screen: f64, max_screen: f64 },
}

impl ScaleBehavior {
	/// Compute the world-space value for a given base value and zoom level.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::World => base,
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => {
				// screen_size = world_size * k
				let min_world = min_screen / k;
				let max_world = max_screen / k;
				base.clamp(min_world, max_world)
			}
		}
	}
}

/// Sizing for every drawn element.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	/// Node label font size.
	pub label_size: f64,
	pub label_behavior: ScaleBehavior,
	/// Labels longer than this many characters are cut and get an ellipsis.
	pub label_max_chars: usize,
	/// Gap between a node's rim and its label, in screen pixels.
	pub label_gap: f64,
	/// Edge line width.
	pub edge_width: f64,
	pub edge_behavior: ScaleBehavior,
	/// Width of the hovered edge, in screen pixels.
	pub edge_hover_width: f64,
	/// Hovered edge label font size, in screen pixels.
	pub edge_label_size: f64,
	/// Outline ring stroke width, in screen pixels.
	pub outline_width: f64,
	/// Gap between the node rim and its outline, in screen pixels.
	pub outline_offset: f64,
	/// Zoom readout font size and distance from the canvas corner, in pixels.
	pub readout_size: f64,
	pub readout_margin: f64,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			label_size: 11.0,
			label_behavior: ScaleBehavior::Clamped {
				min_screen: 9.0,
				max_screen: 16.0,
			},
			label_max_chars: 20,
			label_gap: 3.0,
			edge_width: 1.5,
			edge_behavior: ScaleBehavior::Clamped {
				min_screen: 1.0,
				max_screen: 3.0,
			},
			edge_hover_width: 3.0,
			edge_label_size: 11.0,
			outline_width: 2.5,
			outline_offset: 2.0,
			readout_size: 12.0,
			readout_margin: 10.0,
		}
	}
}

/// Pre-computed world-space sizes for one zoom level.
///
/// Create this once per frame and pass it to the drawing functions.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	pub k: f64,
	pub label_font: String,
	pub label_gap: f64,
	pub edge_width: f64,
	pub edge_hover_width: f64,
	pub edge_label_font: String,
	pub outline_width: f64,
	pub outline_offset: f64,
}

impl ScaledValues {
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		let label_size = config.label_behavior.apply(config.label_size, k);
		Self {
			k,
			label_font: format!("{}px sans-serif", label_size),
			label_gap: config.label_gap / k,
			edge_width: config.edge_behavior.apply(config.edge_width, k),
			edge_hover_width: config.edge_hover_width / k,
			edge_label_font: format!("{}px sans-serif", config.edge_label_size / k),
			outline_width: config.outline_width / k,
			outline_offset: config.outline_offset / k,
		}
	}

	/// Screen-space dash pattern converted to world units.
	pub fn dash(&self, on: f64, off: f64) -> (f64, f64) {
		(on / self.k, off / self.k)
	}
}
