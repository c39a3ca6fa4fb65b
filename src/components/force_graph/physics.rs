//! Force-directed layout physics.
//!
//! Each tick applies three independent forces to the visible nodes (a weak
//! pull toward the viewport center, short-range inverse-square repulsion
//! between nodes, and Hookean springs along edges), integrates, damps, and
//! clamps everything back inside the viewport. Pinned and dragged nodes are
//! exempt from forces and integration: their position belongs to the pin or
//! to the pointer.

use std::f64::consts::TAU;

use super::pins::PinSet;
use super::state::SimulationState;
use super::types::TypeFilter;

/// Tunable physics constants.
#[derive(Clone, Debug)]
pub struct PhysicsConfig {
	/// Physics timer period in milliseconds.
	pub tick_interval_ms: i32,
	/// Acceleration toward the viewport center per unit of offset.
	pub center_strength: f64,
	/// Numerator of the inverse-square repulsion.
	pub repulsion_strength: f64,
	/// Repulsion only acts within `(ra + rb) * factor + margin`.
	pub repulsion_radius_factor: f64,
	pub repulsion_margin: f64,
	/// Hooke constant for edge springs.
	pub spring_strength: f64,
	/// Rest length of an edge spring.
	pub ideal_edge_length: f64,
	/// Velocity multiplier applied after integration. Must be below 1 to settle.
	pub damping: f64,
	/// Gap kept between a node's edge and the viewport border.
	pub padding: f64,
}

impl Default for PhysicsConfig {
	fn default() -> Self {
		Self {
			tick_interval_ms: 16,
			center_strength: 0.0001,
			repulsion_strength: 400.0,
			repulsion_radius_factor: 3.0,
			repulsion_margin: 20.0,
			spring_strength: 0.002,
			ideal_edge_length: 150.0,
			damping: 0.85,
			padding: 20.0,
		}
	}
}

/// Distances below this are treated as this, to keep divisions finite.
const MIN_DISTANCE: f64 = 1.0;

/// Unit vector from b to a, or a fixed pseudo-random direction when the two
/// points coincide so stacked nodes still separate.
fn separation_direction(dx: f64, dy: f64, dist: f64, i: usize, j: usize) -> (f64, f64) {
	if dist > 1e-9 {
		(dx / dist, dy / dist)
	} else {
		let angle = ((i as f64) * 0.618_034 + (j as f64) * 0.414_214) * TAU;
		(angle.cos(), angle.sin())
	}
}

/// Repulsion acting on `a` because of `b`, or zero beyond `cutoff`.
pub fn repulsion_force(
	(ax, ay): (f64, f64),
	(bx, by): (f64, f64),
	strength: f64,
	cutoff: f64,
) -> (f64, f64) {
	repulsion_between((ax, ay), (bx, by), strength, cutoff, 0, 1)
}

fn repulsion_between(
	(ax, ay): (f64, f64),
	(bx, by): (f64, f64),
	strength: f64,
	cutoff: f64,
	i: usize,
	j: usize,
) -> (f64, f64) {
	let (dx, dy) = (ax - bx, ay - by);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist > cutoff {
		return (0.0, 0.0);
	}
	let (ux, uy) = separation_direction(dx, dy, dist, i, j);
	let dist = dist.max(MIN_DISTANCE);
	let force = strength / (dist * dist);
	(ux * force, uy * force)
}

/// Spring force acting on the source endpoint; the target receives the negation.
pub fn spring_force(
	(sx, sy): (f64, f64),
	(tx, ty): (f64, f64),
	strength: f64,
	ideal_length: f64,
) -> (f64, f64) {
	let (dx, dy) = (tx - sx, ty - sy);
	let dist = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
	let force = (dist - ideal_length) * strength;
	(dx / dist * force, dy / dist * force)
}

/// Clamp into `[lo, hi]`, or the band's midpoint if the viewport is too small
/// for the band to exist.
fn clamp_axis(value: f64, lo: f64, hi: f64) -> f64 {
	if lo > hi {
		(lo + hi) / 2.0
	} else {
		value.clamp(lo, hi)
	}
}

/// Advance the simulation by one tick.
///
/// `dragged` is the id of the node currently held by the pointer, if any.
pub fn step(
	state: &mut SimulationState,
	config: &PhysicsConfig,
	filter: &TypeFilter,
	pins: &PinSet,
	dragged: Option<&str>,
) {
	if !state.has_area() {
		return;
	}

	let n = state.nodes.len();
	let visible: Vec<bool> = state
		.nodes
		.iter()
		.map(|node| filter.allows(node.node_type))
		.collect();
	let fixed: Vec<bool> = state
		.nodes
		.iter()
		.map(|node| pins.contains(&node.id) || dragged == Some(node.id.as_str()))
		.collect();
	let (cx, cy) = state.center();
	let nodes = &mut state.nodes;

	for (i, node) in nodes.iter_mut().enumerate() {
		if !visible[i] || fixed[i] {
			continue;
		}
		node.vx += (cx - node.x) * config.center_strength;
		node.vy += (cy - node.y) * config.center_strength;
	}

	for i in 0..n {
		if !visible[i] {
			continue;
		}
		for j in (i + 1)..n {
			if !visible[j] || (fixed[i] && fixed[j]) {
				continue;
			}
			let (a, b) = (&nodes[i], &nodes[j]);
			let cutoff = (a.radius + b.radius) * config.repulsion_radius_factor
				+ config.repulsion_margin;
			let (fx, fy) = repulsion_between(
				(a.x, a.y),
				(b.x, b.y),
				config.repulsion_strength,
				cutoff,
				i,
				j,
			);
			if !fixed[i] {
				nodes[i].vx += fx;
				nodes[i].vy += fy;
			}
			if !fixed[j] {
				nodes[j].vx -= fx;
				nodes[j].vy -= fy;
			}
		}
	}

	for edge in &state.edges {
		let (s, t) = (edge.source, edge.target);
		if s == t || !visible[s] || !visible[t] {
			continue;
		}
		let (fx, fy) = spring_force(
			(nodes[s].x, nodes[s].y),
			(nodes[t].x, nodes[t].y),
			config.spring_strength,
			config.ideal_edge_length,
		);
		if !fixed[s] {
			nodes[s].vx += fx;
			nodes[s].vy += fy;
		}
		if !fixed[t] {
			nodes[t].vx -= fx;
			nodes[t].vy -= fy;
		}
	}

	let (width, height) = (state.width, state.height);
	for (i, node) in nodes.iter_mut().enumerate() {
		if fixed[i] {
			node.vx = 0.0;
			node.vy = 0.0;
		} else if visible[i] {
			node.x += node.vx;
			node.y += node.vy;
			node.vx *= config.damping;
			node.vy *= config.damping;
		}

		let inset = node.radius + config.padding;
		node.x = clamp_axis(node.x, inset, width - inset);
		node.y = clamp_axis(node.y, inset, height - inset);
	}
}

#[cfg(test)]
mod tests {
	use super::super::state::SeedConfig;
	use super::super::types::{GraphData, GraphLink, GraphNode, NodeType};
	use super::*;

	fn graph(ids: &[(&str, NodeType)], links: &[(&str, &str)]) -> GraphData {
		GraphData {
			nodes: ids
				.iter()
				.map(|(id, node_type)| GraphNode {
					id: (*id).into(),
					node_type: *node_type,
					name: (*id).into(),
				})
				.collect(),
			links: links
				.iter()
				.map(|(s, t)| GraphLink {
					source: (*s).into(),
					target: (*t).into(),
					label: None,
				})
				.collect(),
		}
	}

	fn chain(n: usize) -> SimulationState {
		let ids: Vec<String> = (0..n).map(|i| format!("n{i}")).collect();
		let nodes: Vec<(&str, NodeType)> = ids
			.iter()
			.enumerate()
			.map(|(i, id)| (id.as_str(), NodeType::ALL[i % NodeType::ALL.len()]))
			.collect();
		let links: Vec<(&str, &str)> = ids
			.windows(2)
			.map(|w| (w[0].as_str(), w[1].as_str()))
			.collect();
		SimulationState::new(&graph(&nodes, &links), 800.0, 600.0, &SeedConfig::default())
	}

	fn distance(state: &SimulationState, a: &str, b: &str) -> f64 {
		let (ax, ay) = state.position(a).unwrap();
		let (bx, by) = state.position(b).unwrap();
		((ax - bx).powi(2) + (ay - by).powi(2)).sqrt()
	}

	#[test]
	fn repulsion_points_away() {
		let cases = [
			((0.0, 0.0), (3.0, 4.0)),
			((10.0, 10.0), (9.0, 12.0)),
			((-5.0, 2.0), (-5.0, -1.0)),
		];
		for (a, b) in cases {
			let (fx, fy) = repulsion_force(a, b, 400.0, 1000.0);
			let (tx, ty) = (b.0 - a.0, b.1 - a.1);
			assert!(fx * tx + fy * ty < 0.0, "force on a must point away from b");
		}
	}

	#[test]
	fn repulsion_respects_cutoff() {
		assert_eq!(repulsion_force((0.0, 0.0), (100.0, 0.0), 400.0, 99.0), (0.0, 0.0));
		assert_ne!(repulsion_force((0.0, 0.0), (99.0, 0.0), 400.0, 99.0), (0.0, 0.0));
	}

	#[test]
	fn coincident_nodes_get_finite_push() {
		let (fx, fy) = repulsion_force((5.0, 5.0), (5.0, 5.0), 400.0, 50.0);
		assert!(fx.is_finite() && fy.is_finite());
		assert!((fx * fx + fy * fy).sqrt() > 0.0);

		let (fx, fy) = spring_force((5.0, 5.0), (5.0, 5.0), 0.002, 150.0);
		assert!(fx.is_finite() && fy.is_finite());
	}

	#[test]
	fn spring_pulls_and_pushes() {
		// Stretched: source pulled toward target.
		let (fx, _) = spring_force((0.0, 0.0), (300.0, 0.0), 0.002, 150.0);
		assert!(fx > 0.0);
		// Compressed: source pushed away.
		let (fx, _) = spring_force((0.0, 0.0), (50.0, 0.0), 0.002, 150.0);
		assert!(fx < 0.0);
	}

	#[test]
	fn repulsion_in_step_separates_pair() {
		let data = graph(&[("a", NodeType::Note), ("b", NodeType::Note)], &[]);
		let mut state = SimulationState::new(&data, 800.0, 600.0, &SeedConfig::default());
		state.set_position("a", 390.0, 300.0);
		state.set_position("b", 410.0, 300.0);
		let config = PhysicsConfig {
			center_strength: 0.0,
			..PhysicsConfig::default()
		};
		step(&mut state, &config, &TypeFilter::all(), &PinSet::new(), None);
		let a = state.node("a").unwrap();
		assert!(a.vx < 0.0, "a should move away from b");
		assert!(a.x < 390.0);
	}

	#[test]
	fn pinned_nodes_never_move() {
		let mut state = chain(12);
		let mut pins = PinSet::new();
		pins.pin("n3");
		pins.pin("n7");
		let before: Vec<(f64, f64)> = ["n3", "n7"]
			.iter()
			.map(|id| state.position(id).unwrap())
			.collect();
		let config = PhysicsConfig::default();
		for _ in 0..300 {
			step(&mut state, &config, &TypeFilter::all(), &pins, None);
			for (id, pos) in ["n3", "n7"].iter().zip(&before) {
				let node = state.node(id).unwrap();
				assert_eq!((node.x, node.y), *pos);
				assert_eq!((node.vx, node.vy), (0.0, 0.0));
			}
		}
	}

	#[test]
	fn dragged_node_is_exempt() {
		let mut state = chain(5);
		state.set_position("n2", 123.0, 321.0);
		state.node_mut("n2").unwrap().vx = 9.0;
		let config = PhysicsConfig::default();
		for _ in 0..50 {
			step(&mut state, &config, &TypeFilter::all(), &PinSet::new(), Some("n2"));
		}
		let node = state.node("n2").unwrap();
		assert_eq!((node.x, node.y, node.vx, node.vy), (123.0, 321.0, 0.0, 0.0));
	}

	#[test]
	fn kinetic_energy_never_increases_without_forces() {
		let mut state = chain(6);
		for (i, node) in state.nodes.iter_mut().enumerate() {
			node.vx = (i as f64 - 2.5) * 1.5;
			node.vy = 2.0 - i as f64 * 0.7;
		}
		let config = PhysicsConfig {
			center_strength: 0.0,
			repulsion_strength: 0.0,
			spring_strength: 0.0,
			..PhysicsConfig::default()
		};
		let mut energy = state.kinetic_energy();
		assert!(energy > 0.0);
		for _ in 0..100 {
			step(&mut state, &config, &TypeFilter::all(), &PinSet::new(), None);
			let next = state.kinetic_energy();
			assert!(next <= energy);
			energy = next;
		}
		assert!(energy < 1e-10);
	}

	#[test]
	fn nodes_stay_inside_viewport() {
		let mut state = chain(30);
		// Fling some nodes far outside, including a pinned one.
		state.set_position("n0", -500.0, 2000.0);
		state.set_position("n1", 5000.0, -40.0);
		state.node_mut("n2").unwrap().vx = 1e4;
		let mut pins = PinSet::new();
		pins.pin("n1");
		let config = PhysicsConfig::default();
		for _ in 0..200 {
			step(&mut state, &config, &TypeFilter::all(), &pins, None);
			for node in &state.nodes {
				let inset = node.radius + config.padding;
				assert!(node.x >= inset && node.x <= state.width - inset, "{}", node.id);
				assert!(node.y >= inset && node.y <= state.height - inset, "{}", node.id);
			}
		}
	}

	#[test]
	fn tiny_viewport_does_not_panic() {
		let mut state = chain(3);
		state.resize(10.0, 10.0);
		step(&mut state, &PhysicsConfig::default(), &TypeFilter::all(), &PinSet::new(), None);
		for node in &state.nodes {
			assert_eq!((node.x, node.y), (5.0, 5.0));
		}
	}

	#[test]
	fn zero_sized_viewport_skips_tick() {
		let mut state = chain(3);
		let before = state.nodes.clone();
		state.resize(0.0, 0.0);
		step(&mut state, &PhysicsConfig::default(), &TypeFilter::all(), &PinSet::new(), None);
		assert_eq!(state.nodes, before);
	}

	#[test]
	fn edge_settles_near_ideal_length() {
		let data = graph(&[("a", NodeType::Concept), ("b", NodeType::Concept)], &[("a", "b")]);
		let mut state = SimulationState::new(&data, 800.0, 600.0, &SeedConfig::default());
		state.set_position("a", 390.0, 300.0);
		state.set_position("b", 410.0, 300.0);
		let config = PhysicsConfig::default();

		let mut last = distance(&state, "a", "b");
		for _ in 0..600 {
			step(&mut state, &config, &TypeFilter::all(), &PinSet::new(), None);
			let d = distance(&state, "a", "b");
			assert!(d >= last - 1e-9, "distance shrank from {last} to {d}");
			last = d;
		}
		assert!((last - config.ideal_edge_length).abs() < 5.0, "settled at {last}");
		for node in &state.nodes {
			assert!(node.speed() < 1e-3);
		}
	}

	#[test]
	fn filtered_nodes_sit_out() {
		let data = graph(
			&[("a", NodeType::Character), ("b", NodeType::Character), ("h", NodeType::Item)],
			&[("a", "h"), ("b", "h")],
		);
		let mut state = SimulationState::new(&data, 800.0, 600.0, &SeedConfig::default());
		let hidden_before = state.node("h").unwrap().clone();
		let filter: TypeFilter = [NodeType::Character].into_iter().collect();
		for _ in 0..100 {
			step(&mut state, &PhysicsConfig::default(), &filter, &PinSet::new(), None);
		}
		assert_eq!(state.node("h").unwrap(), &hidden_before);
		assert_eq!(state.edges.len(), 2);
	}
}
