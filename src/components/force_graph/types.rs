//! Graph data structures for input to the force graph component, plus the
//! filter handle and the events the canvas emits.

use std::collections::HashSet;

use serde::Deserialize;

/// Semantic category of a knowledge-graph entry. Drives node color and the legend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum NodeType {
	Character,
	Location,
	Event,
	Item,
	Organization,
	Concept,
	Note,
	/// Anything the backend sends that we don't have a color for.
	Other,
}

impl NodeType {
	/// Every variant, in legend order.
	pub const ALL: [NodeType; 8] = [
		NodeType::Character,
		NodeType::Location,
		NodeType::Event,
		NodeType::Item,
		NodeType::Organization,
		NodeType::Concept,
		NodeType::Note,
		NodeType::Other,
	];

	/// Legend text.
	pub fn label(self) -> &'static str {
		match self {
			NodeType::Character => "Characters",
			NodeType::Location => "Locations",
			NodeType::Event => "Events",
			NodeType::Item => "Items",
			NodeType::Organization => "Organizations",
			NodeType::Concept => "Concepts",
			NodeType::Note => "Notes",
			NodeType::Other => "Other",
		}
	}
}

impl From<String> for NodeType {
	fn from(value: String) -> Self {
		match value.trim().to_ascii_lowercase().as_str() {
			"character" | "person" => NodeType::Character,
			"location" | "place" => NodeType::Location,
			"event" => NodeType::Event,
			"item" | "object" => NodeType::Item,
			"organization" | "organisation" | "faction" => NodeType::Organization,
			"concept" | "theme" => NodeType::Concept,
			"note" => NodeType::Note,
			_ => NodeType::Other,
		}
	}
}

/// A node in the graph.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GraphNode {
	/// Unique identifier, stable across reloads. Used to reference nodes in links and pins.
	pub id: String,
	/// Semantic type, serialized as `"type"`.
	#[serde(rename = "type")]
	pub node_type: NodeType,
	/// Display name drawn beneath the node.
	pub name: String,
}

/// An edge between two nodes.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GraphLink {
	/// Source node ID.
	pub source: String,
	/// Target node ID.
	pub target: String,
	/// Optional relation label, shown while the edge is hovered.
	#[serde(default)]
	pub label: Option<String>,
}

/// Complete graph data: nodes and links.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}

/// The set of node types currently enabled for display.
///
/// Filtering is non-destructive: hidden nodes stay in the simulation, they just
/// don't take part in physics, hit-testing or rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeFilter {
	enabled: HashSet<NodeType>,
}

impl TypeFilter {
	/// Every type enabled.
	pub fn all() -> Self {
		Self {
			enabled: NodeType::ALL.into_iter().collect(),
		}
	}

	/// Nothing enabled.
	pub fn none() -> Self {
		Self {
			enabled: HashSet::new(),
		}
	}

	pub fn allows(&self, node_type: NodeType) -> bool {
		self.enabled.contains(&node_type)
	}

	pub fn set(&mut self, node_type: NodeType, enabled: bool) {
		if enabled {
			self.enabled.insert(node_type);
		} else {
			self.enabled.remove(&node_type);
		}
	}

	/// Flip a type on or off, returning whether it is now enabled.
	pub fn toggle(&mut self, node_type: NodeType) -> bool {
		let enabled = !self.allows(node_type);
		self.set(node_type, enabled);
		enabled
	}
}

impl Default for TypeFilter {
	fn default() -> Self {
		Self::all()
	}
}

impl FromIterator<NodeType> for TypeFilter {
	fn from_iter<I: IntoIterator<Item = NodeType>>(iter: I) -> Self {
		Self {
			enabled: iter.into_iter().collect(),
		}
	}
}

/// Something the user did to a graph entity, for the detail panel.
#[derive(Clone, Debug, PartialEq)]
pub enum GraphEvent {
	NodeClick(GraphNode),
	EdgeClick(GraphLink),
	/// The node's pin state was toggled; `pinned` is the new state.
	NodeDoubleClick { node: GraphNode, pinned: bool },
}
