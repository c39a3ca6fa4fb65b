//! Hit-testing world-space points against the moving scene.

use super::geometry::{point_in_circle, point_segment_distance};
use super::state::SimulationState;
use super::types::TypeFilter;

/// Hit-test tolerances, in world units.
#[derive(Clone, Debug)]
pub struct HitConfig {
	/// Slack added to a node's radius.
	pub node_tolerance: f64,
	/// Maximum distance from an edge's segment.
	pub edge_threshold: f64,
}

impl Default for HitConfig {
	fn default() -> Self {
		Self {
			node_tolerance: 5.0,
			edge_threshold: 8.0,
		}
	}
}

/// What sits under a point. Nodes win over edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hit {
	Node(usize),
	Edge(usize),
	None,
}

/// Topmost visible node under the point. Nodes are drawn in vector order, so
/// the search runs backwards and the last-drawn node wins overlaps.
pub fn find_node_at(
	state: &SimulationState,
	filter: &TypeFilter,
	wx: f64,
	wy: f64,
	config: &HitConfig,
) -> Option<usize> {
	state
		.nodes
		.iter()
		.enumerate()
		.rev()
		.filter(|(_, n)| filter.allows(n.node_type))
		.find(|(_, n)| point_in_circle(wx, wy, n.x, n.y, n.radius + config.node_tolerance))
		.map(|(i, _)| i)
}

/// First visible edge (in edge order) whose segment passes within the threshold.
pub fn find_edge_at(
	state: &SimulationState,
	filter: &TypeFilter,
	wx: f64,
	wy: f64,
	config: &HitConfig,
) -> Option<usize> {
	state
		.visible_edges(filter)
		.find(|(_, e)| {
			let (a, b) = (&state.nodes[e.source], &state.nodes[e.target]);
			point_segment_distance(wx, wy, a.x, a.y, b.x, b.y) <= config.edge_threshold
		})
		.map(|(i, _)| i)
}

pub fn hit_test(
	state: &SimulationState,
	filter: &TypeFilter,
	wx: f64,
	wy: f64,
	config: &HitConfig,
) -> Hit {
	if let Some(idx) = find_node_at(state, filter, wx, wy, config) {
		Hit::Node(idx)
	} else if let Some(idx) = find_edge_at(state, filter, wx, wy, config) {
		Hit::Edge(idx)
	} else {
		Hit::None
	}
}
