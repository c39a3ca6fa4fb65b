//! Canvas rendering for the knowledge graph.
//!
//! One frame is drawn in passes for correct z-ordering:
//! 1. Background (screen space)
//! 2. Edges, hovered edge highlighted with its label (world space)
//! 3. Nodes with their outline and name label (world space)
//! 4. Zoom readout (screen space)
//!
//! Rendering never writes to the simulation.

use std::borrow::Cow;
use std::f64::consts::PI;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::pins::PinSet;
use super::scale::{ScaleConfig, ScaledValues};
use super::state::{SimNode, SimulationState};
use super::theme::Theme;
use super::transform::ViewTransform;
use super::types::TypeFilter;

/// The single outline style a node gets, highest priority first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outline {
	Pinned,
	SearchMatch,
	Hovered,
}

impl Outline {
	pub fn for_node(pinned: bool, search_match: bool, hovered: bool) -> Option<Self> {
		if pinned {
			Some(Outline::Pinned)
		} else if search_match {
			Some(Outline::SearchMatch)
		} else if hovered {
			Some(Outline::Hovered)
		} else {
			None
		}
	}
}

/// Cut `name` to at most `max_chars` characters, marking the cut with an ellipsis.
pub fn truncate_label(name: &str, max_chars: usize) -> Cow<'_, str> {
	if name.chars().count() <= max_chars {
		return Cow::Borrowed(name);
	}
	let mut cut: String = name.chars().take(max_chars.saturating_sub(1)).collect();
	cut.push('…');
	Cow::Owned(cut)
}

/// Case-insensitive substring match. `needle` must already be trimmed and
/// lowercased; an empty needle matches nothing.
pub fn matches_search(name: &str, needle: &str) -> bool {
	!needle.is_empty() && name.to_lowercase().contains(needle)
}

/// Everything one frame needs, borrowed from the live component state.
pub struct Frame<'a> {
	pub state: &'a SimulationState,
	pub view: &'a ViewTransform,
	pub filter: &'a TypeFilter,
	pub pins: &'a PinSet,
	pub search: &'a str,
	pub hovered_node: Option<&'a str>,
	pub hovered_edge: Option<usize>,
	pub scale: &'a ScaleConfig,
	pub theme: &'a Theme,
}

/// Owns the 2d context of one canvas for as long as the component is mounted.
pub struct Renderer {
	ctx: CanvasRenderingContext2d,
}

impl Renderer {
	/// Grab the canvas' 2d context, or `None` if the browser won't hand one out.
	pub fn acquire(canvas: &HtmlCanvasElement) -> Option<Self> {
		let ctx = canvas
			.get_context("2d")
			.ok()
			.flatten()?
			.dyn_into::<CanvasRenderingContext2d>()
			.ok()?;
		Some(Self { ctx })
	}

	/// Renders the complete graph to the canvas.
	pub fn draw(&self, frame: &Frame<'_>) {
		if !frame.state.has_area() {
			return;
		}
		let ctx = &self.ctx;
		let scale = ScaledValues::new(frame.scale, frame.view.k);

		draw_background(ctx, frame);

		ctx.save();
		let _ = ctx.translate(frame.view.x, frame.view.y);
		let _ = ctx.scale(frame.view.k, frame.view.k);

		draw_edges(ctx, frame, &scale);
		draw_nodes(ctx, frame, &scale);

		ctx.restore();

		draw_zoom_readout(ctx, frame);
	}
}

fn draw_background(ctx: &CanvasRenderingContext2d, frame: &Frame<'_>) {
	let (width, height) = (frame.state.width, frame.state.height);
	let background = &frame.theme.background;
	ctx.clear_rect(0.0, 0.0, width, height);

	let gradient = background
		.use_gradient
		.then(|| {
			ctx.create_radial_gradient(
				width / 2.0,
				height / 2.0,
				0.0,
				width / 2.0,
				height / 2.0,
				width.max(height) * 0.8,
			)
			.ok()
		})
		.flatten();

	match gradient {
		Some(gradient) => {
			let _ = gradient.add_color_stop(0.0, &background.color_secondary.to_css());
			let _ = gradient.add_color_stop(1.0, &background.color.to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		None => ctx.set_fill_style_str(&background.color.to_css()),
	}
	ctx.fill_rect(0.0, 0.0, width, height);
}

fn draw_edges(ctx: &CanvasRenderingContext2d, frame: &Frame<'_>, scale: &ScaledValues) {
	let state = frame.state;
	let edge_style = &frame.theme.edge;
	let mut hovered = None;

	ctx.set_stroke_style_str(&edge_style.color.to_css());
	ctx.set_line_width(scale.edge_width);
	for (idx, edge) in state.visible_edges(frame.filter) {
		if frame.hovered_edge == Some(idx) {
			hovered = Some(edge);
			continue;
		}
		let (a, b) = (&state.nodes[edge.source], &state.nodes[edge.target]);
		ctx.begin_path();
		ctx.move_to(a.x, a.y);
		ctx.line_to(b.x, b.y);
		ctx.stroke();
	}

	// Drawn last so it sits above its neighbors.
	let Some(edge) = hovered else {
		return;
	};
	let (a, b) = (&state.nodes[edge.source], &state.nodes[edge.target]);
	ctx.set_stroke_style_str(&edge_style.highlight_color.to_css());
	ctx.set_line_width(scale.edge_hover_width);
	ctx.begin_path();
	ctx.move_to(a.x, a.y);
	ctx.line_to(b.x, b.y);
	ctx.stroke();

	if let Some(label) = &edge.label {
		let (mx, my) = ((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
		ctx.set_font(&scale.edge_label_font);
		ctx.set_text_align("center");
		ctx.set_text_baseline("bottom");
		ctx.set_fill_style_str(&edge_style.highlight_color.to_css());
		let _ = ctx.fill_text(label, mx, my - scale.label_gap);
	}
}

fn draw_nodes(ctx: &CanvasRenderingContext2d, frame: &Frame<'_>, scale: &ScaledValues) {
	let needle = frame.search.trim().to_lowercase();

	for node in &frame.state.nodes {
		if !frame.filter.allows(node.node_type) {
			continue;
		}
		draw_node(ctx, frame, node);

		let outline = Outline::for_node(
			frame.pins.contains(&node.id),
			matches_search(&node.name, &needle),
			frame.hovered_node == Some(node.id.as_str()),
		);
		if let Some(outline) = outline {
			draw_outline(ctx, frame, scale, node, outline);
		}

		let label = truncate_label(&node.name, frame.scale.label_max_chars);
		ctx.set_font(&scale.label_font);
		ctx.set_text_align("center");
		ctx.set_text_baseline("top");
		ctx.set_fill_style_str(&frame.theme.node.label_color.to_css());
		let _ = ctx.fill_text(&label, node.x, node.y + node.radius + scale.label_gap);
	}
}

fn draw_node(ctx: &CanvasRenderingContext2d, frame: &Frame<'_>, node: &SimNode) {
	let (x, y, radius) = (node.x, node.y, node.radius);
	let base_color = frame.theme.palette.color_for(node.node_type);

	let gradient = frame
		.theme
		.node
		.use_gradient
		.then(|| {
			ctx.create_radial_gradient(x - radius * 0.3, y - radius * 0.3, 0.0, x, y, radius)
				.ok()
		})
		.flatten();

	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	match gradient {
		Some(gradient) => {
			let _ = gradient.add_color_stop(0.0, &base_color.lighten(0.4).to_css());
			let _ = gradient.add_color_stop(0.7, &base_color.to_css());
			let _ = gradient.add_color_stop(1.0, &base_color.darken(0.2).to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		None => ctx.set_fill_style_str(&base_color.to_css()),
	}
	ctx.fill();
}

fn draw_outline(
	ctx: &CanvasRenderingContext2d,
	frame: &Frame<'_>,
	scale: &ScaledValues,
	node: &SimNode,
	outline: Outline,
) {
	let style = &frame.theme.node;
	let (color, width) = match outline {
		Outline::Pinned => (style.pinned_outline, scale.outline_width),
		Outline::SearchMatch => (style.search_outline, scale.outline_width),
		Outline::Hovered => (style.hover_outline, scale.outline_width * 0.6),
	};

	if outline == Outline::SearchMatch {
		let (on, off) = scale.dash(4.0, 3.0);
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(on),
			&JsValue::from_f64(off),
		));
	}

	ctx.begin_path();
	let _ = ctx.arc(
		node.x,
		node.y,
		node.radius + scale.outline_offset,
		0.0,
		2.0 * PI,
	);
	ctx.set_stroke_style_str(&color.to_css());
	ctx.set_line_width(width);
	ctx.stroke();

	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_zoom_readout(ctx: &CanvasRenderingContext2d, frame: &Frame<'_>) {
	let margin = frame.scale.readout_margin;
	ctx.set_font(&format!("{}px sans-serif", frame.scale.readout_size));
	ctx.set_text_align("right");
	ctx.set_text_baseline("bottom");
	ctx.set_fill_style_str(&frame.theme.readout_color.to_css());
	let _ = ctx.fill_text(
		&format!("{}%", frame.view.zoom_percent()),
		frame.state.width - margin,
		frame.state.height - margin,
	);
}
