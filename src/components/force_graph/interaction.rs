//! Pointer gesture state machine: drag, pan, hover, click, pin and zoom.
//!
//! The controller only stores node ids and edge indices, never references into
//! the simulation, and is reset whenever the simulation is reseeded. Every
//! handler takes screen coordinates relative to the canvas.

use super::hit::{Hit, HitConfig, find_node_at, hit_test};
use super::pins::PinSet;
use super::state::SimulationState;
use super::transform::ViewTransform;
use super::types::{GraphEvent, TypeFilter};

/// Pointer travel (screen px) after which a press counts as a drag, not a click.
pub const DEFAULT_CLICK_SLOP: f64 = 3.0;

#[derive(Clone, Debug, PartialEq)]
enum Gesture {
	Idle,
	Dragging { node_id: String, origin: (f64, f64) },
	Panning { last: (f64, f64), origin: (f64, f64) },
}

/// What the pointer rests on while no button is held. A node hover always
/// suppresses an edge hover.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Hover {
	#[default]
	None,
	Node(String),
	Edge(usize),
}

pub struct InteractionController {
	hit: HitConfig,
	gesture: Gesture,
	hover: Hover,
	moved: bool,
	suppress_click: bool,
}

fn travelled(origin: (f64, f64), sx: f64, sy: f64) -> f64 {
	((sx - origin.0).powi(2) + (sy - origin.1).powi(2)).sqrt()
}

impl InteractionController {
	pub fn new(hit: HitConfig) -> Self {
		Self {
			hit,
			gesture: Gesture::Idle,
			hover: Hover::None,
			moved: false,
			suppress_click: false,
		}
	}

	/// Forget all transient state. Called on reseed.
	pub fn reset(&mut self) {
		self.gesture = Gesture::Idle;
		self.hover = Hover::None;
		self.moved = false;
		self.suppress_click = false;
	}

	pub fn pointer_down(
		&mut self,
		state: &SimulationState,
		view: &ViewTransform,
		filter: &TypeFilter,
		sx: f64,
		sy: f64,
	) {
		self.moved = false;
		self.suppress_click = false;
		let (wx, wy) = view.screen_to_world(sx, sy);
		self.gesture = match find_node_at(state, filter, wx, wy, &self.hit) {
			Some(idx) => {
				let node_id = state.nodes[idx].id.clone();
				self.hover = Hover::Node(node_id.clone());
				Gesture::Dragging {
					node_id,
					origin: (sx, sy),
				}
			}
			None => Gesture::Panning {
				last: (sx, sy),
				origin: (sx, sy),
			},
		};
	}

	pub fn pointer_move(
		&mut self,
		state: &mut SimulationState,
		view: &mut ViewTransform,
		filter: &TypeFilter,
		sx: f64,
		sy: f64,
	) {
		let moved = match &mut self.gesture {
			Gesture::Dragging { node_id, origin } => {
				let (wx, wy) = view.screen_to_world(sx, sy);
				state.set_position(node_id, wx, wy);
				Some(travelled(*origin, sx, sy) > DEFAULT_CLICK_SLOP)
			}
			Gesture::Panning { last, origin } => {
				view.pan_by(sx - last.0, sy - last.1);
				*last = (sx, sy);
				Some(travelled(*origin, sx, sy) > DEFAULT_CLICK_SLOP)
			}
			Gesture::Idle => None,
		};
		match moved {
			Some(moved) => self.moved |= moved,
			None => self.update_hover(state, view, filter, sx, sy),
		}
	}

	/// End any drag or pan. A gesture that travelled past the click slop
	/// swallows the click the browser sends right after.
	pub fn pointer_up(&mut self) {
		if self.gesture != Gesture::Idle {
			self.suppress_click = self.moved;
		}
		self.gesture = Gesture::Idle;
		self.moved = false;
	}

	pub fn pointer_leave(&mut self) {
		self.gesture = Gesture::Idle;
		self.hover = Hover::None;
		self.moved = false;
		self.suppress_click = false;
	}

	/// Selection click. Never touches the pin set.
	pub fn click(
		&mut self,
		state: &SimulationState,
		view: &ViewTransform,
		filter: &TypeFilter,
		sx: f64,
		sy: f64,
	) -> Option<GraphEvent> {
		if std::mem::take(&mut self.suppress_click) {
			return None;
		}
		let (wx, wy) = view.screen_to_world(sx, sy);
		match hit_test(state, filter, wx, wy, &self.hit) {
			Hit::Node(idx) => Some(GraphEvent::NodeClick(state.nodes[idx].to_graph_node())),
			Hit::Edge(idx) => state.edge_link(idx).map(GraphEvent::EdgeClick),
			Hit::None => None,
		}
	}

	/// Index of the visible node under a screen point, topmost first.
	pub fn node_at(
		&self,
		state: &SimulationState,
		view: &ViewTransform,
		filter: &TypeFilter,
		sx: f64,
		sy: f64,
	) -> Option<usize> {
		let (wx, wy) = view.screen_to_world(sx, sy);
		find_node_at(state, filter, wx, wy, &self.hit)
	}

	/// Toggle the pin on the node under the pointer.
	pub fn double_click(
		&mut self,
		state: &mut SimulationState,
		view: &ViewTransform,
		filter: &TypeFilter,
		pins: &mut PinSet,
		sx: f64,
		sy: f64,
	) -> Option<GraphEvent> {
		let idx = self.node_at(state, view, filter, sx, sy)?;
		let node = &mut state.nodes[idx];
		let pinned = pins.toggle(&node.id);
		node.vx = 0.0;
		node.vy = 0.0;
		Some(GraphEvent::NodeDoubleClick {
			node: node.to_graph_node(),
			pinned,
		})
	}

	/// Zoom toward the pointer, whatever gesture is in progress.
	pub fn wheel(&mut self, view: &mut ViewTransform, sx: f64, sy: f64, delta_y: f64) {
		view.zoom_at(sx, sy, delta_y <= 0.0);
	}

	fn update_hover(
		&mut self,
		state: &SimulationState,
		view: &ViewTransform,
		filter: &TypeFilter,
		sx: f64,
		sy: f64,
	) {
		let (wx, wy) = view.screen_to_world(sx, sy);
		self.hover = match hit_test(state, filter, wx, wy, &self.hit) {
			Hit::Node(idx) => Hover::Node(state.nodes[idx].id.clone()),
			Hit::Edge(idx) => Hover::Edge(idx),
			Hit::None => Hover::None,
		};
	}

	pub fn hover(&self) -> &Hover {
		&self.hover
	}

	pub fn hovered_node(&self) -> Option<&str> {
		match &self.hover {
			Hover::Node(id) => Some(id),
			_ => None,
		}
	}

	pub fn hovered_edge(&self) -> Option<usize> {
		match self.hover {
			Hover::Edge(idx) => Some(idx),
			_ => None,
		}
	}

	pub fn dragged_node(&self) -> Option<&str> {
		match &self.gesture {
			Gesture::Dragging { node_id, .. } => Some(node_id),
			_ => None,
		}
	}

	pub fn is_panning(&self) -> bool {
		matches!(self.gesture, Gesture::Panning { .. })
	}

	/// CSS cursor for the current state.
	pub fn cursor(&self) -> &'static str {
		match (&self.gesture, &self.hover) {
			(Gesture::Dragging { .. } | Gesture::Panning { .. }, _) => "grabbing",
			(Gesture::Idle, Hover::Node(_) | Hover::Edge(_)) => "pointer",
			(Gesture::Idle, Hover::None) => "grab",
		}
	}
}

impl Default for InteractionController {
	fn default() -> Self {
		Self::new(HitConfig::default())
	}
}

#[cfg(test)]
mod tests {
	use super::super::state::SeedConfig;
	use super::super::types::{GraphData, GraphLink, GraphNode, NodeType};
	use super::*;

	struct Fixture {
		state: SimulationState,
		view: ViewTransform,
		filter: TypeFilter,
		pins: PinSet,
		ctl: InteractionController,
	}

	fn fixture() -> Fixture {
		let data = GraphData {
			nodes: vec![
				GraphNode {
					id: "ada".into(),
					node_type: NodeType::Character,
					name: "Ada".into(),
				},
				GraphNode {
					id: "port".into(),
					node_type: NodeType::Location,
					name: "Port".into(),
				},
			],
			links: vec![GraphLink {
				source: "ada".into(),
				target: "port".into(),
				label: Some("lives in".into()),
			}],
		};
		let mut state = SimulationState::new(&data, 800.0, 600.0, &SeedConfig::default());
		state.set_position("ada", 200.0, 200.0);
		state.set_position("port", 400.0, 200.0);
		Fixture {
			state,
			view: ViewTransform {
				x: 10.0,
				y: 20.0,
				k: 2.0,
			},
			filter: TypeFilter::all(),
			pins: PinSet::new(),
			ctl: InteractionController::default(),
		}
	}

	impl Fixture {
		fn screen_of(&self, id: &str) -> (f64, f64) {
			let (x, y) = self.state.position(id).unwrap();
			self.view.world_to_screen(x, y)
		}

		fn down(&mut self, (sx, sy): (f64, f64)) {
			self.ctl
				.pointer_down(&self.state, &self.view, &self.filter, sx, sy);
		}

		fn move_to(&mut self, (sx, sy): (f64, f64)) {
			self.ctl
				.pointer_move(&mut self.state, &mut self.view, &self.filter, sx, sy);
		}

		fn click(&mut self, (sx, sy): (f64, f64)) -> Option<GraphEvent> {
			self.ctl
				.click(&self.state, &self.view, &self.filter, sx, sy)
		}

		fn dblclick(&mut self, (sx, sy): (f64, f64)) -> Option<GraphEvent> {
			self.ctl.double_click(
				&mut self.state,
				&self.view,
				&self.filter,
				&mut self.pins,
				sx,
				sy,
			)
		}
	}

	#[test]
	fn drag_moves_node_to_pointer() {
		let mut f = fixture();
		let start = f.screen_of("ada");
		f.down(start);
		assert_eq!(f.ctl.dragged_node(), Some("ada"));
		assert_eq!(f.ctl.cursor(), "grabbing");
		f.move_to((300.0, 500.0));
		let (wx, wy) = f.view.screen_to_world(300.0, 500.0);
		assert_eq!(f.state.position("ada"), Some((wx, wy)));
		f.ctl.pointer_up();
		assert_eq!(f.ctl.dragged_node(), None);
		// The click that follows a real drag is swallowed.
		assert_eq!(f.click((300.0, 500.0)), None);
	}

	#[test]
	fn pan_adds_screen_delta() {
		let mut f = fixture();
		f.down((700.0, 50.0));
		assert!(f.ctl.is_panning());
		f.move_to((710.0, 45.0));
		f.move_to((730.0, 65.0));
		assert_eq!((f.view.x, f.view.y), (40.0, 35.0));
		assert_eq!(f.view.k, 2.0);
		f.ctl.pointer_up();
		assert!(!f.ctl.is_panning());
	}

	#[test]
	fn click_selects_node_or_edge() {
		let mut f = fixture();
		let ada = f.screen_of("ada");
		f.down(ada);
		f.ctl.pointer_up();
		match f.click(ada) {
			Some(GraphEvent::NodeClick(node)) => assert_eq!(node.id, "ada"),
			other => panic!("unexpected {other:?}"),
		}

		let mid = f.view.world_to_screen(300.0, 203.0);
		f.down(mid);
		f.ctl.pointer_up();
		match f.click(mid) {
			Some(GraphEvent::EdgeClick(link)) => {
				assert_eq!((link.source.as_str(), link.target.as_str()), ("ada", "port"));
				assert_eq!(link.label.as_deref(), Some("lives in"));
			}
			other => panic!("unexpected {other:?}"),
		}

		assert_eq!(f.click((5.0, 5.0)), None);
		assert!(f.pins.is_empty());
	}

	#[test]
	fn small_jitter_still_clicks() {
		let mut f = fixture();
		let (sx, sy) = f.screen_of("port");
		f.down((sx, sy));
		f.move_to((sx + 1.0, sy + 1.0));
		f.ctl.pointer_up();
		assert!(matches!(f.click((sx + 1.0, sy + 1.0)), Some(GraphEvent::NodeClick(_))));
	}

	#[test]
	fn double_click_toggles_pin() {
		let mut f = fixture();
		let port = f.screen_of("port");
		match f.dblclick(port) {
			Some(GraphEvent::NodeDoubleClick { node, pinned }) => {
				assert_eq!(node.id, "port");
				assert!(pinned);
			}
			other => panic!("unexpected {other:?}"),
		}
		assert!(f.pins.contains("port"));
		assert!(matches!(
			f.dblclick(port),
			Some(GraphEvent::NodeDoubleClick { pinned: false, .. })
		));
		assert!(!f.pins.contains("port"));
		// Empty space does nothing.
		assert_eq!(f.dblclick((5.0, 5.0)), None);
		assert!(f.pins.is_empty());
	}

	#[test]
	fn node_at_agrees_with_double_click() {
		let mut f = fixture();
		let port = f.screen_of("port");
		assert_eq!(
			f.ctl.node_at(&f.state, &f.view, &f.filter, port.0, port.1),
			f.state.index_of("port")
		);
		assert_eq!(f.ctl.node_at(&f.state, &f.view, &f.filter, 5.0, 5.0), None);
		f.filter.set(NodeType::Location, false);
		assert_eq!(f.ctl.node_at(&f.state, &f.view, &f.filter, port.0, port.1), None);
		assert_eq!(f.dblclick(port), None);
		assert!(f.pins.is_empty());
	}

	#[test]
	fn single_click_never_pins() {
		let mut f = fixture();
		let ada = f.screen_of("ada");
		for _ in 0..3 {
			f.down(ada);
			f.ctl.pointer_up();
			f.click(ada);
		}
		assert!(f.pins.is_empty());
	}

	#[test]
	fn hover_prefers_nodes() {
		let mut f = fixture();
		f.move_to(f.screen_of("ada"));
		assert_eq!(f.ctl.hovered_node(), Some("ada"));
		assert_eq!(f.ctl.hovered_edge(), None);
		assert_eq!(f.ctl.cursor(), "pointer");

		f.move_to(f.view.world_to_screen(300.0, 200.0));
		assert_eq!(f.ctl.hovered_node(), None);
		assert_eq!(f.ctl.hovered_edge(), Some(0));

		f.move_to((5.0, 5.0));
		assert_eq!(f.ctl.hover(), &Hover::None);
		assert_eq!(f.ctl.cursor(), "grab");
	}

	#[test]
	fn wheel_zooms_mid_drag() {
		let mut f = fixture();
		f.down(f.screen_of("ada"));
		f.ctl.wheel(&mut f.view, 100.0, 100.0, -1.0);
		assert!((f.view.k - 2.2).abs() < 1e-12);
		assert_eq!(f.ctl.dragged_node(), Some("ada"));
		f.ctl.wheel(&mut f.view, 100.0, 100.0, 3.0);
		assert!((f.view.k - 1.98).abs() < 1e-12);
	}

	#[test]
	fn leave_clears_everything() {
		let mut f = fixture();
		f.move_to(f.screen_of("ada"));
		f.down(f.screen_of("ada"));
		f.ctl.pointer_leave();
		assert_eq!(f.ctl.dragged_node(), None);
		assert_eq!(f.ctl.hover(), &Hover::None);
		assert!(!f.ctl.is_panning());
	}

	#[test]
	fn hidden_nodes_cannot_be_grabbed() {
		let mut f = fixture();
		f.filter.set(NodeType::Character, false);
		f.down(f.screen_of("ada"));
		assert_eq!(f.ctl.dragged_node(), None);
		assert!(f.ctl.is_panning());
	}

	#[test]
	fn reset_forgets_stale_ids() {
		let mut f = fixture();
		f.down(f.screen_of("port"));
		f.ctl.reset();
		assert_eq!(f.ctl.dragged_node(), None);
		assert_eq!(f.ctl.hover(), &Hover::None);
	}
}
