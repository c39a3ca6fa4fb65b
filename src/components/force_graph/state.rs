//! Simulation state: per-node position, velocity and radius, and edges
//! resolved to node indices.
//!
//! Rebuilt from scratch whenever the input graph changes. Nodes are addressed
//! by their stable string id through `index`, so nothing outside this module
//! needs to hold on to positions in the node vector across a reseed.

use std::collections::HashMap;
use std::f64::consts::TAU;

use log::debug;

use super::types::{GraphData, GraphLink, GraphNode, NodeType, TypeFilter};

/// Controls the initial layout and node sizing.
#[derive(Clone, Debug)]
pub struct SeedConfig {
	/// Seed ring radius as a fraction of `min(width, height)`.
	pub ring_fraction: f64,
	/// Maximum jitter (world units, each axis) added to the ring position.
	pub jitter: f64,
	/// Radius of a node with no edges.
	pub base_radius: f64,
	/// Extra radius per incident edge.
	pub degree_step: f64,
	/// Cap on the extra radius from degree.
	pub max_extra_radius: f64,
}

impl Default for SeedConfig {
	fn default() -> Self {
		Self {
			ring_fraction: 0.3,
			jitter: 10.0,
			base_radius: 8.0,
			degree_step: 2.0,
			max_extra_radius: 12.0,
		}
	}
}

impl SeedConfig {
	pub fn radius_for_degree(&self, degree: usize) -> f64 {
		self.base_radius + (degree as f64 * self.degree_step).min(self.max_extra_radius)
	}
}

/// A node as the simulation sees it.
#[derive(Clone, Debug, PartialEq)]
pub struct SimNode {
	pub id: String,
	pub node_type: NodeType,
	pub name: String,
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub radius: f64,
}

impl SimNode {
	/// The input-side view of this node, used as an event payload.
	pub fn to_graph_node(&self) -> GraphNode {
		GraphNode {
			id: self.id.clone(),
			node_type: self.node_type,
			name: self.name.clone(),
		}
	}

	pub fn speed(&self) -> f64 {
		(self.vx * self.vx + self.vy * self.vy).sqrt()
	}
}

/// An edge with both endpoints resolved to indices into `SimulationState::nodes`.
#[derive(Clone, Debug, PartialEq)]
pub struct SimEdge {
	pub source: usize,
	pub target: usize,
	pub label: Option<String>,
}

pub struct SimulationState {
	pub nodes: Vec<SimNode>,
	pub edges: Vec<SimEdge>,
	pub width: f64,
	pub height: f64,
	index: HashMap<String, usize>,
	seed: SeedConfig,
}

/// Deterministic hash-style noise in `[0, 1)`, so seeding is reproducible.
fn pseudo_random(seed: f64) -> f64 {
	let x = (seed * 12.9898 + seed * 78.233).sin() * 43758.5453;
	x - x.floor()
}

impl SimulationState {
	pub fn new(data: &GraphData, width: f64, height: f64, config: &SeedConfig) -> Self {
		let mut index = HashMap::with_capacity(data.nodes.len());
		let mut unique: Vec<&GraphNode> = Vec::with_capacity(data.nodes.len());
		for node in &data.nodes {
			if index.contains_key(&node.id) {
				debug!("kg-canvas: duplicate node id {:?} ignored", node.id);
				continue;
			}
			index.insert(node.id.clone(), unique.len());
			unique.push(node);
		}

		let mut edges = Vec::with_capacity(data.links.len());
		let mut degree = vec![0usize; unique.len()];
		for link in &data.links {
			if let (Some(&source), Some(&target)) = (index.get(&link.source), index.get(&link.target)) {
				degree[source] += 1;
				degree[target] += 1;
				edges.push(SimEdge {
					source,
					target,
					label: link.label.clone(),
				});
			}
		}
		let dropped = data.links.len() - edges.len();
		if dropped > 0 {
			debug!("kg-canvas: dropped {} links with unknown endpoints", dropped);
		}

		let nodes = unique
			.iter()
			.enumerate()
			.map(|(i, node)| SimNode {
				id: node.id.clone(),
				node_type: node.node_type,
				name: node.name.clone(),
				x: 0.0,
				y: 0.0,
				vx: 0.0,
				vy: 0.0,
				radius: config.radius_for_degree(degree[i]),
			})
			.collect();

		let mut state = Self {
			nodes,
			edges,
			width,
			height,
			index,
			seed: config.clone(),
		};
		state.place_on_ring();
		state
	}

	/// Spread nodes evenly on a ring around the viewport center, with a
	/// little deterministic jitter, and stop them.
	fn place_on_ring(&mut self) {
		let (cx, cy) = self.center();
		let ring = self.width.min(self.height).max(0.0) * self.seed.ring_fraction;
		let count = self.nodes.len().max(1) as f64;
		for (i, node) in self.nodes.iter_mut().enumerate() {
			let seed = i as f64 + 1.0;
			let angle = i as f64 * TAU / count;
			let jitter_x = (pseudo_random(seed * 1.1) * 2.0 - 1.0) * self.seed.jitter;
			let jitter_y = (pseudo_random(seed * 2.3) * 2.0 - 1.0) * self.seed.jitter;
			node.x = cx + ring * angle.cos() + jitter_x;
			node.y = cy + ring * angle.sin() + jitter_y;
			node.vx = 0.0;
			node.vy = 0.0;
		}
	}

	pub fn index_of(&self, id: &str) -> Option<usize> {
		self.index.get(id).copied()
	}

	pub fn node(&self, id: &str) -> Option<&SimNode> {
		self.index_of(id).map(|i| &self.nodes[i])
	}

	pub fn node_mut(&mut self, id: &str) -> Option<&mut SimNode> {
		self.index_of(id).map(move |i| &mut self.nodes[i])
	}

	pub fn position(&self, id: &str) -> Option<(f64, f64)> {
		self.node(id).map(|n| (n.x, n.y))
	}

	/// Move a node directly and stop it. Returns false for unknown ids.
	pub fn set_position(&mut self, id: &str, x: f64, y: f64) -> bool {
		let Some(node) = self.node_mut(id) else {
			return false;
		};
		node.x = x;
		node.y = y;
		node.vx = 0.0;
		node.vy = 0.0;
		true
	}

	pub fn is_node_visible(&self, idx: usize, filter: &TypeFilter) -> bool {
		self.nodes
			.get(idx)
			.is_some_and(|n| filter.allows(n.node_type))
	}

	/// An edge is visible only if both endpoints are.
	pub fn is_edge_visible(&self, edge: &SimEdge, filter: &TypeFilter) -> bool {
		self.is_node_visible(edge.source, filter) && self.is_node_visible(edge.target, filter)
	}

	pub fn visible_edges<'a>(
		&'a self,
		filter: &'a TypeFilter,
	) -> impl Iterator<Item = (usize, &'a SimEdge)> + 'a {
		self.edges
			.iter()
			.enumerate()
			.filter(move |(_, e)| self.is_edge_visible(e, filter))
	}

	/// The input-side view of an edge, used as an event payload.
	pub fn edge_link(&self, idx: usize) -> Option<GraphLink> {
		let edge = self.edges.get(idx)?;
		Some(GraphLink {
			source: self.nodes[edge.source].id.clone(),
			target: self.nodes[edge.target].id.clone(),
			label: edge.label.clone(),
		})
	}

	pub fn center(&self) -> (f64, f64) {
		(self.width / 2.0, self.height / 2.0)
	}

	/// `Σ vx² + vy²` over all nodes.
	pub fn kinetic_energy(&self) -> f64 {
		self.nodes
			.iter()
			.map(|n| n.vx * n.vx + n.vy * n.vy)
			.sum()
	}

	/// Adopt new viewport dimensions. Positions are left alone and the next
	/// physics tick clamps anything now out of bounds, except when the old
	/// viewport had no area: then the layout was never seeded properly and
	/// nodes are placed on the ring again.
	pub fn resize(&mut self, width: f64, height: f64) {
		let had_area = self.has_area();
		self.width = width;
		self.height = height;
		if !had_area && self.has_area() {
			self.place_on_ring();
		}
	}

	pub fn has_area(&self) -> bool {
		self.width > 0.0 && self.height > 0.0
	}
}
