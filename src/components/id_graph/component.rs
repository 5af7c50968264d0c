use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{error, info};
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, MouseEvent, TouchEvent, WheelEvent,
	Window,
};

use super::error::ViewportError;
use super::interaction::PointerSource;
use super::model::GraphModel;
use super::render;
use super::state::ViewportState;
use super::types::DisplayConfig;

const FRAME_DT: f64 = 0.016;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Browser-side handles of one mounted viewport.
#[derive(Clone, Default)]
struct HostHandles {
	animate: FrameCallback,
	resize_cb: FrameCallback,
	frame_id: Rc<Cell<Option<i32>>>,
}

impl HostHandles {
	fn schedule(&self) {
		let Some(window) = web_sys::window() else {
			return;
		};
		if let Some(ref cb) = *self.animate.borrow() {
			if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
				self.frame_id.set(Some(id));
			}
		}
	}

	/// Cancels the pending frame, detaches the resize listener and drops both
	/// closures, which also breaks the frame callback's self reference.
	fn release(&self) {
		if let Some(window) = web_sys::window() {
			if let Some(id) = self.frame_id.take() {
				let _ = window.cancel_animation_frame(id);
			}
			if let Some(cb) = self.resize_cb.borrow_mut().take() {
				let _ =
					window.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}
		self.animate.borrow_mut().take();
	}
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, ViewportError> {
	canvas
		.get_context("2d")
		.map_err(|err| ViewportError::RenderingContext(format!("{err:?}")))?
		.ok_or_else(|| ViewportError::RenderingContext("canvas has no 2d context".into()))?
		.dyn_into::<CanvasRenderingContext2d>()
		.map_err(|_| ViewportError::RenderingContext("unexpected context type".into()))
}

fn viewport_size(
	window: &Window,
	canvas: &HtmlCanvasElement,
	fullscreen: bool,
	width: Option<f64>,
	height: Option<f64>,
) -> (f64, f64) {
	if fullscreen {
		return (
			window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0),
			window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0),
		);
	}
	let parent = canvas.parent_element();
	(
		width.unwrap_or_else(|| {
			parent
				.as_ref()
				.map(|p| p.client_width() as f64)
				.filter(|w| *w > 0.0)
				.unwrap_or(800.0)
		}),
		height.unwrap_or_else(|| {
			parent
				.as_ref()
				.map(|p| p.client_height() as f64)
				.filter(|h| *h > 0.0)
				.unwrap_or(600.0)
		}),
	)
}

fn local_point(
	canvas_ref: NodeRef<leptos::html::Canvas>,
	client_x: f64,
	client_y: f64,
) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get_untracked()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((client_x - rect.left(), client_y - rect.top()))
}

fn set_cursor(canvas_ref: NodeRef<leptos::html::Canvas>, cursor: &str) {
	if let Some(canvas) = canvas_ref.get_untracked() {
		let canvas: HtmlCanvasElement = canvas.into();
		let _ = HtmlElement::style(&canvas).set_property("cursor", cursor);
	}
}

/// 3D identity graph drawn on a canvas.
///
/// `config` is read on every change and applied on the next frame. `selection`
/// carries the selected node id both ways: canvas clicks write it, and writes
/// from elsewhere (a detail panel's close button) are mirrored into the scene.
#[component]
pub fn IdentityGraphCanvas(
	/// Validated graph to show.
	model: GraphModel,
	/// Layout and cosmetic switches.
	#[prop(into)]
	config: Signal<DisplayConfig>,
	/// Selected node id, shared with the page.
	selection: RwSignal<Option<String>>,
	/// Size the canvas to the window instead of its parent.
	#[prop(default = false)]
	fullscreen: bool,
	/// Fixed width in pixels; defaults to the parent's width.
	#[prop(default = None)]
	width: Option<f64>,
	/// Fixed height in pixels; defaults to the parent's height.
	#[prop(default = None)]
	height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let fault = RwSignal::new(None::<ViewportError>);
	let state = Rc::new(RefCell::new(ViewportState::new(
		model,
		config.get_untracked(),
		width.unwrap_or(800.0),
		height.unwrap_or(600.0),
	)));
	let handles = HostHandles::default();
	let (state_init, handles_init) = (state.clone(), handles.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if handles_init.animate.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			error!("no window; viewport not started");
			return;
		};

		let ctx = match context_2d(&canvas) {
			Ok(ctx) => ctx,
			Err(err) => {
				error!("{err}");
				state_init.borrow_mut().teardown();
				fault.set(Some(err));
				return;
			}
		};

		let (w, h) = viewport_size(&window, &canvas, fullscreen, width, height);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		state_init.borrow_mut().resize(w, h);

		let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
		*handles_init.resize_cb.borrow_mut() = Some(Closure::new(move || {
			let Some(win) = web_sys::window() else {
				return;
			};
			let (nw, nh) = viewport_size(&win, &canvas_resize, fullscreen, width, height);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			state_resize.borrow_mut().resize(nw, nh);
		}));
		if let Some(ref cb) = *handles_init.resize_cb.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (state_anim, handles_anim) = (state_init.clone(), handles_init.clone());
		*handles_init.animate.borrow_mut() = Some(Closure::new(move || {
			{
				let mut s = state_anim.borrow_mut();
				if !s.is_running() {
					handles_anim.frame_id.set(None);
					return;
				}
				s.tick(FRAME_DT);
				render::render(&s, &ctx);
			}
			handles_anim.schedule();
		}));
		handles_init.schedule();
		info!("identity graph mounted at {w}x{h}");
	});

	let state_cfg = state.clone();
	Effect::new(move |_| {
		let cfg = config.get();
		state_cfg.borrow_mut().apply_config(cfg);
	});

	let state_sel = state.clone();
	Effect::new(move |_| {
		let id = selection.get();
		state_sel.borrow_mut().select_id(id.as_deref());
	});

	let teardown = StoredValue::new_local((state.clone(), handles));
	on_cleanup(move || {
		teardown.try_with_value(|(state, handles)| {
			handles.release();
			state.borrow_mut().teardown();
		});
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, ev.client_x() as f64, ev.client_y() as f64)
		else {
			return;
		};
		if state_md
			.borrow_mut()
			.press(x, y, PointerSource::Mouse, ev.time_stamp())
		{
			set_cursor(canvas_ref, "grabbing");
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, ev.client_x() as f64, ev.client_y() as f64)
		else {
			return;
		};
		let mut s = state_mm.borrow_mut();
		if let Some((dx, dy)) = s.pointer.move_to(x, y) {
			s.camera.drag(dx, dy);
			return;
		}
		let hovered = s.node_at_position(x, y);
		s.set_hover(hovered);
		set_cursor(canvas_ref, if hovered.is_some() { "pointer" } else { "grab" });
	};

	let state_mu = state.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, ev.client_x() as f64, ev.client_y() as f64)
		else {
			return;
		};
		let picked = state_mu
			.borrow_mut()
			.release(x, y, PointerSource::Mouse, ev.time_stamp());
		set_cursor(canvas_ref, "grab");
		if let Some(id) = picked {
			selection.set(id);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		let mut s = state_ml.borrow_mut();
		s.pointer.cancel();
		s.set_hover(None);
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		state_wh.borrow_mut().camera.zoom(ev.delta_y());
	};

	let touch_point = move |ev: &TouchEvent, i: u32| {
		ev.touches()
			.get(i)
			.and_then(|t| local_point(canvas_ref, t.client_x() as f64, t.client_y() as f64))
	};
	let pinch_distance = move |ev: &TouchEvent| {
		let (a, b) = (touch_point(ev, 0)?, touch_point(ev, 1)?);
		Some((a.0 - b.0).hypot(a.1 - b.1))
	};

	let state_ts = state.clone();
	let on_touchstart = move |ev: TouchEvent| {
		// Keeps the browser from synthesizing mouse events for this touch.
		ev.prevent_default();
		let mut s = state_ts.borrow_mut();
		match ev.touches().length() {
			1 => {
				if let Some((x, y)) = touch_point(&ev, 0) {
					s.press(x, y, PointerSource::Touch, ev.time_stamp());
				}
			}
			_ => {
				s.pointer.cancel();
				s.pinch.distance = pinch_distance(&ev);
			}
		}
	};

	let state_tm = state.clone();
	let on_touchmove = move |ev: TouchEvent| {
		ev.prevent_default();
		let mut s = state_tm.borrow_mut();
		if ev.touches().length() >= 2 {
			if let (Some(prev), Some(now)) = (s.pinch.distance, pinch_distance(&ev)) {
				if now > 0.0 {
					s.camera.zoom_by((prev / now) as f32);
				}
				s.pinch.distance = Some(now);
			}
		} else if let Some((x, y)) = touch_point(&ev, 0) {
			if let Some((dx, dy)) = s.pointer.move_to(x, y) {
				s.camera.drag(dx, dy);
			}
		}
	};

	let state_te = state.clone();
	let on_touchend = move |ev: TouchEvent| {
		ev.prevent_default();
		let picked = {
			let mut s = state_te.borrow_mut();
			s.pinch.distance = None;
			let lifted = ev.changed_touches().get(0).and_then(|t| {
				local_point(canvas_ref, t.client_x() as f64, t.client_y() as f64)
			});
			match lifted {
				Some((x, y)) => s.release(x, y, PointerSource::Touch, ev.time_stamp()),
				None => {
					s.pointer.cancel();
					None
				}
			}
		};
		if let Some(id) = picked {
			selection.set(id);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="id-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			on:touchstart=on_touchstart
			on:touchmove=on_touchmove
			on:touchend=on_touchend
			style="display: block; cursor: grab; touch-action: none;"
		/>
		{move || fault.get().map_or(Ok(()), Err)}
	}
}
