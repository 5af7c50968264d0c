use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::camera::Projected;
use super::state::ViewportState;

const BACKGROUND: &str = "#050807";
const EDGE_RGB: &str = "34, 197, 94";
const DIMMED_ALPHA: f64 = 0.3;

pub fn render(state: &ViewportState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	if state.scene.is_released() {
		return;
	}
	draw_particles(state, ctx);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.set_global_alpha(1.0);
}

fn project(state: &ViewportState, world: glam::Vec3) -> Option<Projected> {
	state.camera.project(world, state.width, state.height)
}

fn draw_particles(state: &ViewportState, ctx: &CanvasRenderingContext2d) {
	for particle in state.particles.particles() {
		if particle.opacity <= 0.0 {
			continue;
		}
		let Some(p) = project(state, particle.position) else {
			continue;
		};
		let size = (0.05 * p.scale).clamp(0.5, 2.5);
		ctx.set_fill_style_str(&format!("rgba(134, 239, 172, {})", particle.opacity));
		ctx.fill_rect(p.x - size / 2.0, p.y - size / 2.0, size, size);
	}
}

fn draw_edges(state: &ViewportState, ctx: &CanvasRenderingContext2d) {
	let (dash, gap) = (6.0, 4.0);
	let dash_offset = -(state.clock.elapsed * 20.0) % (dash + gap);
	let has_highlight = state.has_active_highlight();

	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(dash),
		&JsValue::from_f64(gap),
	));
	ctx.set_line_dash_offset(dash_offset);

	for edge in state.scene.edges() {
		let (Some(a), Some(b)) = (project(state, edge.a), project(state, edge.b)) else {
			continue;
		};
		let lit = state.is_highlighted(edge.from) && state.is_highlighted(edge.to);
		let alpha = match (has_highlight, lit) {
			(false, _) => 0.45,
			(true, true) => 0.9,
			(true, false) => 0.12,
		};
		let width = (0.04 * (a.scale + b.scale) / 2.0).clamp(0.75, 2.5);

		ctx.set_stroke_style_str(&format!("rgba({EDGE_RGB}, {alpha})"));
		ctx.set_line_width(if lit { width * 1.4 } else { width });
		ctx.begin_path();
		ctx.move_to(a.x, a.y);
		ctx.line_to(b.x, b.y);
		ctx.stroke();
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_nodes(state: &ViewportState, ctx: &CanvasRenderingContext2d) {
	let has_highlight = state.has_active_highlight();

	// Painter's algorithm: far nodes first.
	let mut order: Vec<(usize, Projected)> = state
		.scene
		.visuals()
		.iter()
		.enumerate()
		.filter_map(|(i, visual)| project(state, visual.body.center).map(|p| (i, p)))
		.collect();
	order.sort_by(|a, b| b.1.depth.total_cmp(&a.1.depth));

	for (idx, p) in order {
		let Some(visual) = state.scene.visual(idx) else {
			continue;
		};
		let emphasis = visual.body.emphasis as f64;
		let base_alpha = if has_highlight && !state.is_highlighted(idx) {
			DIMMED_ALPHA
		} else {
			1.0
		};
		let radius = visual.body.radius as f64 * p.scale * (1.0 + 0.25 * emphasis);

		let glow_radius = visual.glow.radius as f64 * visual.glow.scale as f64 * p.scale;
		if let Ok(gradient) = ctx.create_radial_gradient(p.x, p.y, radius * 0.5, p.x, p.y, glow_radius)
		{
			let _ = gradient.add_color_stop(0.0, &visual.body.color);
			let _ = gradient.add_color_stop(1.0, "rgba(0, 0, 0, 0)");
			ctx.set_global_alpha(
				(visual.glow.opacity as f64 * (1.0 + 1.5 * emphasis) * base_alpha).min(1.0),
			);
			ctx.begin_path();
			let _ = ctx.arc(p.x, p.y, glow_radius, 0.0, 2.0 * PI);
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
			ctx.fill();
		}

		ctx.set_global_alpha(base_alpha * 0.85);
		ctx.begin_path();
		let _ = ctx.arc(p.x, p.y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(BACKGROUND);
		ctx.fill();
		ctx.set_stroke_style_str(&visual.body.color);
		ctx.set_line_width(1.5 + 1.5 * emphasis);
		ctx.stroke();

		if emphasis > 0.01 {
			ctx.set_global_alpha(base_alpha * emphasis * 0.7);
			ctx.begin_path();
			let _ = ctx.arc(p.x, p.y, radius + 4.0, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str("white");
			ctx.set_line_width(1.0);
			ctx.stroke();
		}

		ctx.set_global_alpha(base_alpha);
		ctx.set_text_align("center");
		ctx.set_text_baseline("middle");
		ctx.set_fill_style_str(&visual.body.color);
		ctx.set_font(&format!("{}px monospace", (radius * 0.9).clamp(8.0, 28.0)));
		let _ = ctx.fill_text(&visual.label.icon, p.x, p.y);

		if let Some(lp) = project(state, visual.label.position()) {
			let size = (0.35 * lp.scale).clamp(8.0, 14.0);
			ctx.set_fill_style_str("rgba(255, 255, 255, 0.9)");
			ctx.set_font(&format!("bold {size}px sans-serif"));
			let _ = ctx.fill_text(&visual.label.text, lp.x, lp.y - size * 0.6);
			if !visual.label.sublabel.is_empty() {
				ctx.set_fill_style_str("rgba(161, 161, 170, 0.9)");
				ctx.set_font(&format!("{}px monospace", size * 0.75));
				let _ = ctx.fill_text(&visual.label.sublabel.to_uppercase(), lp.x, lp.y + size * 0.4);
			}
		}
	}
}
