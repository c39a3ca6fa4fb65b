//! Leptos component wrapping the knowledge-graph canvas.
//!
//! The component creates an HTML canvas element and wires pointer and wheel
//! handlers into the [`InteractionController`]. Two loops share the graph
//! context: a fixed-interval physics timer (the only writer of positions
//! besides dragging) and a `requestAnimationFrame` render loop that only
//! reads. Both are torn down, with the resize listener, when the component
//! is unmounted.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, info, warn};
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, HtmlElement, MouseEvent, WheelEvent, Window};

use super::config::ForceGraphConfig;
use super::interaction::InteractionController;
use super::physics;
use super::pins::PinSet;
use super::render::{Frame, Renderer};
use super::state::SimulationState;
use super::transform::ViewTransform;
use super::types::{GraphData, GraphEvent, GraphLink, GraphNode, TypeFilter};

/// Simulation, view and pointer state plus the renderer for one mounted canvas.
struct GraphContext {
	state: SimulationState,
	view: ViewTransform,
	interaction: InteractionController,
	renderer: Option<Renderer>,
	config: ForceGraphConfig,
}

impl GraphContext {
	fn new(data: &GraphData, width: f64, height: f64, config: ForceGraphConfig) -> Self {
		Self {
			state: SimulationState::new(data, width, height, &config.seed),
			view: ViewTransform::default(),
			interaction: InteractionController::new(config.hit.clone()),
			renderer: None,
			config,
		}
	}

	/// Replace the simulation with one built from fresh data. Viewport size and
	/// pan/zoom carry over; pointer state referring to old nodes does not.
	fn reseed(&mut self, data: &GraphData) {
		self.state =
			SimulationState::new(data, self.state.width, self.state.height, &self.config.seed);
		self.interaction.reset();
	}

	fn tick(&mut self, filter: &TypeFilter, pins: &PinSet) {
		physics::step(
			&mut self.state,
			&self.config.physics,
			filter,
			pins,
			self.interaction.dragged_node(),
		);
	}

	fn draw(&self, filter: &TypeFilter, pins: &PinSet, search: &str) {
		let Some(renderer) = &self.renderer else {
			return;
		};
		renderer.draw(&Frame {
			state: &self.state,
			view: &self.view,
			filter,
			pins,
			search,
			hovered_node: self.interaction.hovered_node(),
			hovered_edge: self.interaction.hovered_edge(),
			scale: &self.config.scale,
			theme: &self.config.theme,
		});
	}
}

/// Timer ids and closures owned by the mounted component, released on cleanup.
#[derive(Default)]
struct LoopHandles {
	running: bool,
	interval_id: Option<i32>,
	frame_id: Option<i32>,
	physics: Option<Closure<dyn FnMut()>>,
	resize: Option<Closure<dyn FnMut()>>,
}

/// Optional listeners for the events the canvas emits.
#[derive(Clone, Copy)]
struct EventSinks {
	node_click: Option<Callback<GraphNode>>,
	edge_click: Option<Callback<GraphLink>>,
	node_double_click: Option<Callback<(GraphNode, bool)>>,
}

impl EventSinks {
	fn emit(&self, event: GraphEvent) {
		debug!("kg-canvas: {:?}", event);
		match event {
			GraphEvent::NodeClick(node) => {
				if let Some(cb) = self.node_click {
					cb.run(node);
				}
			}
			GraphEvent::EdgeClick(link) => {
				if let Some(cb) = self.edge_click {
					cb.run(link);
				}
			}
			GraphEvent::NodeDoubleClick { node, pinned } => {
				if let Some(cb) = self.node_double_click {
					cb.run((node, pinned));
				}
			}
		}
	}
}

fn window_size(window: &Window) -> (f64, f64) {
	let read = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
	(read(window.inner_width()), read(window.inner_height()))
}

/// Target canvas size: the window when fullscreen, else explicit props, else
/// the parent element.
fn measure(
	canvas: &HtmlCanvasElement,
	window: &Window,
	fullscreen: bool,
	width: Option<f64>,
	height: Option<f64>,
) -> (f64, f64) {
	if fullscreen {
		return window_size(window);
	}
	let parent = canvas.parent_element();
	(
		width.unwrap_or_else(|| {
			parent
				.as_ref()
				.map(|p| p.client_width() as f64)
				.unwrap_or(800.0)
		}),
		height.unwrap_or_else(|| {
			parent
				.as_ref()
				.map(|p| p.client_height() as f64)
				.unwrap_or(600.0)
		}),
	)
}

/// Pointer position relative to the canvas' top-left corner.
fn canvas_point(canvas: Option<HtmlCanvasElement>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let rect = canvas?.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Renders an interactive knowledge graph on a canvas element.
///
/// Pass graph data via the reactive `data` signal; every change rebuilds the
/// layout. `filter` hides node types without touching the data, `search`
/// outlines matching nodes, and `pins` is the shared pin set (taken from
/// context when not given). The component sizes itself to its parent by
/// default; `fullscreen = true` fills the viewport.
#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(into, default = Signal::derive(TypeFilter::all))] filter: Signal<TypeFilter>,
	#[prop(into, default = Signal::derive(String::new))] search: Signal<String>,
	#[prop(optional)] pins: Option<RwSignal<PinSet>>,
	#[prop(optional, into)] on_node_click: Option<Callback<GraphNode>>,
	#[prop(optional, into)] on_edge_click: Option<Callback<GraphLink>>,
	#[prop(optional, into)] on_node_double_click: Option<Callback<(GraphNode, bool)>>,
	#[prop(optional)] config: ForceGraphConfig,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let pins = pins
		.or_else(use_context::<RwSignal<PinSet>>)
		.unwrap_or_else(|| RwSignal::new(PinSet::new()));
	let sinks = EventSinks {
		node_click: on_node_click,
		edge_click: on_edge_click,
		node_double_click: on_node_double_click,
	};

	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<GraphContext>>> = Rc::new(RefCell::new(None));
	let handles: Rc<RefCell<LoopHandles>> = Rc::new(RefCell::new(LoopHandles::default()));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (context_init, handles_init, animate_init) =
		(context.clone(), handles.clone(), animate.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if context_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			warn!("kg-canvas: no window, canvas left idle");
			return;
		};

		let (w, h) = measure(&canvas, &window, fullscreen, width, height);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let mut graph = GraphContext::new(&data.get_untracked(), w, h, config.clone());
		graph.renderer = Renderer::acquire(&canvas);
		if graph.renderer.is_none() {
			warn!("kg-canvas: 2d context unavailable, will retry on resize");
		}
		info!(
			"kg-canvas: mounted {}x{} with {} nodes, {} edges",
			w,
			h,
			graph.state.nodes.len(),
			graph.state.edges.len()
		);
		let interval_ms = graph.config.physics.tick_interval_ms;
		*context_init.borrow_mut() = Some(graph);
		handles_init.borrow_mut().running = true;

		let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
		let resize_cb: Closure<dyn FnMut()> = Closure::new(move || {
			let Some(win) = web_sys::window() else {
				return;
			};
			let (nw, nh) = measure(&canvas_resize, &win, fullscreen, width, height);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut c) = *context_resize.borrow_mut() {
				c.state.resize(nw, nh);
				if c.renderer.is_none() {
					c.renderer = Renderer::acquire(&canvas_resize);
				}
			}
			debug!("kg-canvas: resized to {}x{}", nw, nh);
		});
		let _ = window.add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref());

		let context_physics = context_init.clone();
		let physics_cb: Closure<dyn FnMut()> = Closure::new(move || {
			if let Some(ref mut c) = *context_physics.borrow_mut() {
				filter.with_untracked(|f| pins.with_untracked(|p| c.tick(f, p)));
			}
		});
		let interval_id = window
			.set_interval_with_callback_and_timeout_and_arguments_0(
				physics_cb.as_ref().unchecked_ref(),
				interval_ms,
			)
			.ok();

		{
			let mut h = handles_init.borrow_mut();
			h.interval_id = interval_id;
			h.physics = Some(physics_cb);
			h.resize = Some(resize_cb);
		}

		let (context_anim, handles_anim, animate_inner) =
			(context_init.clone(), handles_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if !handles_anim.borrow().running {
				return;
			}
			if let Some(ref c) = *context_anim.borrow() {
				filter.with_untracked(|f| {
					pins.with_untracked(|p| search.with_untracked(|s| c.draw(f, p, s)))
				});
			}
			if let (Some(cb), Some(win)) = (&*animate_inner.borrow(), web_sys::window()) {
				handles_anim.borrow_mut().frame_id =
					win.request_animation_frame(cb.as_ref().unchecked_ref()).ok();
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			handles_init.borrow_mut().frame_id =
				window.request_animation_frame(cb.as_ref().unchecked_ref()).ok();
		}
	});

	let context_seed = context.clone();
	Effect::new(move |_| {
		let graph = data.get();
		if let Some(ref mut c) = *context_seed.borrow_mut() {
			c.reseed(&graph);
			info!(
				"kg-canvas: reseeded with {} nodes, {} edges",
				c.state.nodes.len(),
				c.state.edges.len()
			);
		}
	});

	let teardown = SendWrapper::new((context.clone(), handles.clone(), animate.clone()));
	on_cleanup(move || {
		let (context, handles, animate) = &*teardown;
		let mut h = handles.borrow_mut();
		h.running = false;
		if let Some(window) = web_sys::window() {
			if let Some(id) = h.interval_id.take() {
				window.clear_interval_with_handle(id);
			}
			if let Some(id) = h.frame_id.take() {
				let _ = window.cancel_animation_frame(id);
			}
			if let Some(cb) = &h.resize {
				let _ = window
					.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}
		h.physics = None;
		h.resize = None;
		*animate.borrow_mut() = None;
		*context.borrow_mut() = None;
		info!("kg-canvas: torn down");
	});

	let set_cursor = move |cursor: &str| {
		if let Some(canvas) = canvas_ref.get() {
			let _ = HtmlElement::style(&canvas).set_property("cursor", cursor);
		}
	};

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref.get(), &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_md.borrow_mut() {
			filter.with_untracked(|f| c.interaction.pointer_down(&c.state, &c.view, f, x, y));
			set_cursor(c.interaction.cursor());
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref.get(), &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_mm.borrow_mut() {
			filter.with_untracked(|f| {
				c.interaction
					.pointer_move(&mut c.state, &mut c.view, f, x, y)
			});
			set_cursor(c.interaction.cursor());
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_mu.borrow_mut() {
			c.interaction.pointer_up();
			set_cursor(c.interaction.cursor());
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.interaction.pointer_leave();
			set_cursor(c.interaction.cursor());
		}
	};

	let context_click = context.clone();
	let on_click = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref.get(), &ev) else {
			return;
		};
		let event = match *context_click.borrow_mut() {
			Some(ref mut c) => {
				filter.with_untracked(|f| c.interaction.click(&c.state, &c.view, f, x, y))
			}
			None => None,
		};
		if let Some(event) = event {
			sinks.emit(event);
		}
	};

	let context_dbl = context.clone();
	let on_dblclick = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref.get(), &ev) else {
			return;
		};
		let event = match *context_dbl.borrow_mut() {
			Some(ref mut c) => filter.with_untracked(|f| {
				c.interaction.node_at(&c.state, &c.view, f, x, y)?;
				let mut event = None;
				pins.update(|p| {
					event = c
						.interaction
						.double_click(&mut c.state, &c.view, f, p, x, y);
				});
				event
			}),
			None => None,
		};
		if let Some(event) = event {
			sinks.emit(event);
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = canvas_point(canvas_ref.get(), &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_wh.borrow_mut() {
			c.interaction.wheel(&mut c.view, x, y, ev.delta_y());
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:click=on_click
			on:dblclick=on_dblclick
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
