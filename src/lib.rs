//! kg-canvas: Interactive force-directed knowledge-graph canvas.
//!
//! This crate provides a WASM-based component that lays out the entities of a
//! story (characters, locations, events and so on) with a small physics
//! simulation, and lets the writer pan, zoom, drag, pin, filter and search
//! them. A minimal app shell hosts the canvas with a type legend and search box.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::force_graph::{
	ForceGraphCanvas, ForceGraphConfig, GraphData, GraphEvent, GraphLink, GraphNode, NodeType,
	PinSet, Theme, TypeFilter,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("kg-canvas: logging initialized");
}

/// Parse the graph data island. Malformed JSON is logged and yields `None`.
fn parse_graph_data(json_text: &str) -> Option<GraphData> {
	match serde_json::from_str::<GraphData>(json_text) {
		Ok(data) => {
			info!(
				"kg-canvas: loaded {} nodes, {} links",
				data.nodes.len(),
				data.links.len()
			);
			Some(data)
		}
		Err(e) => {
			warn!("kg-canvas: failed to parse graph data: {}", e);
			None
		}
	}
}

/// Load graph data from a script element with id="graph-data".
/// Expected format: JSON with { nodes: [...], links: [...] }
fn load_graph_data() -> Option<GraphData> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("graph-data")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;
	parse_graph_data(&json_text)
}

fn describe(event: &GraphEvent) -> String {
	match event {
		GraphEvent::NodeClick(node) => format!("{} ({:?})", node.name, node.node_type),
		GraphEvent::EdgeClick(link) => match &link.label {
			Some(label) => format!("{} {} {}", link.source, label, link.target),
			None => format!("{} to {}", link.source, link.target),
		},
		GraphEvent::NodeDoubleClick { node, pinned } => {
			let verb = if *pinned { "Pinned" } else { "Unpinned" };
			format!("{} {}", verb, node.name)
		}
	}
}

/// Main application component.
/// Loads graph data from the DOM and renders the canvas with its controls.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let graph_data = load_graph_data().unwrap_or_default();
	let graph_signal = Signal::derive(move || graph_data.clone());

	let filter = RwSignal::new(TypeFilter::all());
	let search = RwSignal::new(String::new());
	let pins = RwSignal::new(PinSet::new());
	provide_context(pins);

	let detail = RwSignal::new(String::from("Click a node or edge for details."));
	let show = move |event: GraphEvent| detail.set(describe(&event));

	let on_node_click = Callback::new(move |node: GraphNode| show(GraphEvent::NodeClick(node)));
	let on_edge_click = Callback::new(move |link: GraphLink| show(GraphEvent::EdgeClick(link)));
	let on_node_double_click = Callback::new(move |(node, pinned): (GraphNode, bool)| {
		show(GraphEvent::NodeDoubleClick { node, pinned })
	});

	let palette = Theme::default().palette;
	let legend = NodeType::ALL
		.into_iter()
		.map(|node_type| {
			let color = palette.color_for(node_type).to_css();
			let active = move || filter.with(|f| f.allows(node_type));
			view! {
				<button
					class="legend-toggle"
					class:active=active
					style=move || {
						let opacity = if active() { "1" } else { "0.35" };
						format!("border-color: {color}; color: {color}; opacity: {opacity};")
					}
					on:click=move |_| {
						filter.update(|f| {
							f.toggle(node_type);
						})
					}
				>
					{node_type.label()}
				</button>
			}
		})
		.collect_view();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Knowledge Graph" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			<ForceGraphCanvas
				data=graph_signal
				filter=filter
				search=search
				on_node_click=on_node_click
				on_edge_click=on_edge_click
				on_node_double_click=on_node_double_click
				fullscreen=true
			/>
			<div class="graph-overlay">
				<h1>"Knowledge Graph"</h1>
				<p class="subtitle">
					"Drag nodes to reposition. Double-click to pin. Scroll to zoom. Drag background to pan."
				</p>
				<div class="legend">{legend}</div>
				<input
					class="graph-search"
					type="search"
					placeholder="Search names"
					prop:value=move || search.get()
					on:input=move |ev| search.set(event_target_value(&ev))
				/>
				<p class="graph-detail">{move || detail.get()}</p>
				<p class="graph-pins">{move || format!("{} pinned", pins.with(|p| p.len()))}</p>
			</div>
		</div>
	}
}
