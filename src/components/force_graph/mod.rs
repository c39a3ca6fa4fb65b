//! Force-directed knowledge-graph component.
//!
//! Renders typed entities and their relationships on an HTML canvas with:
//! - A small spring/repulsion simulation that settles into a readable layout
//! - Pan, zoom, node dragging and double-click pinning
//! - Node type filtering and name search highlighting
//! - Click and double-click events for the host application
//!
//! Everything except `component` and `render` is plain Rust with no
//! browser types, so the layout and interaction rules are unit tested natively.
//!
//! # Example
//!
//! ```ignore
//! use kg_canvas::{ForceGraphCanvas, GraphData, GraphLink, GraphNode, NodeType};
//!
//! let data = GraphData {
//!     nodes: vec![
//!         GraphNode { id: "ada".into(), node_type: NodeType::Character, name: "Ada".into() },
//!         GraphNode { id: "port".into(), node_type: NodeType::Location, name: "Port".into() },
//!     ],
//!     links: vec![GraphLink { source: "ada".into(), target: "port".into(), label: None }],
//! };
//!
//! view! {
//!     <ForceGraphCanvas
//!         data=Signal::derive(move || data.clone())
//!         on_node_click=move |node: GraphNode| log::info!("{}", node.name)
//!     />
//! }
//! ```

mod component;
pub mod config;
pub mod geometry;
pub mod hit;
pub mod interaction;
pub mod physics;
pub mod pins;
mod render;
pub mod scale;
pub mod state;
pub mod theme;
pub mod transform;
mod types;

pub use component::ForceGraphCanvas;
pub use config::ForceGraphConfig;
pub use pins::PinSet;
pub use theme::Theme;
pub use types::{GraphData, GraphEvent, GraphLink, GraphNode, NodeType, TypeFilter};
