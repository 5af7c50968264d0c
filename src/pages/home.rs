use leptos::prelude::*;
use leptos_router::hooks::use_query_map;
use log::warn;

use crate::components::id_graph::{DisplayConfig, GraphModel, IdentityGraphCanvas, LayoutMode};
use crate::identity::identity_tree;

fn parse_flag(key: &str, value: &str) -> Option<bool> {
	match value.to_ascii_lowercase().as_str() {
		"on" | "true" | "1" | "yes" => Some(true),
		"off" | "false" | "0" | "no" => Some(false),
		_ => {
			warn!("ignoring `{key}={value}`: expected on/off");
			None
		}
	}
}

/// Initial switches from `?layout=helix&rotate=off&pulse=off&particles=off`.
fn config_from_query(lookup: impl Fn(&str) -> Option<String>) -> DisplayConfig {
	let mut config = DisplayConfig::default();
	if let Some(layout) = lookup("layout") {
		match layout.parse::<LayoutMode>() {
			Ok(mode) => config.layout = mode,
			Err(err) => warn!("{err}; keeping {}", config.layout),
		}
	}
	let flags: [(&str, &mut bool); 3] = [
		("rotate", &mut config.auto_rotate),
		("pulse", &mut config.glow_pulse),
		("particles", &mut config.particles),
	];
	for (key, slot) in flags {
		if let Some(value) = lookup(key).and_then(|v| parse_flag(key, &v)) {
			*slot = value;
		}
	}
	config
}

fn toggle_button(
	config: RwSignal<DisplayConfig>,
	label: &'static str,
	read: fn(&DisplayConfig) -> bool,
	flip: fn(&mut DisplayConfig),
) -> impl IntoView {
	view! {
		<button
			class="graph-toggle"
			class:active=move || config.with(read)
			on:click=move |_| config.update(flip)
		>
			{label}
		</button>
	}
}

/// Identity tree explorer: 3D graph, layout controls and a detail panel.
#[component]
pub fn Home() -> impl IntoView {
	let query = use_query_map();
	let config = RwSignal::new(query.with_untracked(|q| config_from_query(|key| q.get(key))));
	let selection = RwSignal::new(None::<String>);
	let nodes = StoredValue::new(identity_tree());
	let model = GraphModel::new(identity_tree());

	let selected_node = move || {
		let id = selection.get()?;
		nodes.with_value(|nodes| nodes.iter().find(|n| n.id == id).cloned())
	};

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-graph">
				{model
					.clone()
					.map(|model| {
						view! {
							<IdentityGraphCanvas
								model=model
								config=config
								selection=selection
								fullscreen=true
							/>
						}
					})}
				<div class="graph-overlay">
					<h1>"ID TREE"</h1>
					<p class="subtitle">
						"Your identity is a tree. The root is yours. Everything else branches from it."
					</p>
					<p class="hint">"Drag to orbit. Scroll to zoom. Click a node for details."</p>
				</div>
				<div class="graph-controls">
					<div class="layout-modes">
						{LayoutMode::ALL
							.into_iter()
							.map(|mode| {
								view! {
									<button
										class="layout-mode"
										class:active=move || config.with(|c| c.layout == mode)
										on:click=move |_| config.update(|c| c.layout = mode)
									>
										{mode.name()}
									</button>
								}
							})
							.collect_view()}
					</div>
					{toggle_button(config, "auto-rotate", |c| c.auto_rotate, |c| c.auto_rotate = !c.auto_rotate)}
					{toggle_button(config, "pulse", |c| c.glow_pulse, |c| c.glow_pulse = !c.glow_pulse)}
					{toggle_button(config, "particles", |c| c.particles, |c| c.particles = !c.particles)}
				</div>
				{move || {
					selected_node()
						.map(|node| {
							view! {
								<aside class="detail-panel" style=format!("border-color: {}", node.color)>
									<button class="detail-close" on:click=move |_| selection.set(None)>
										"×"
									</button>
									<span class="detail-kind">
										{format!("{} · {}", node.label, node.sublabel)}
									</span>
									<h2>{node.detail.title}</h2>
									{node
										.detail
										.body
										.into_iter()
										.map(|paragraph| view! { <p>{paragraph}</p> })
										.collect_view()}
								</aside>
							}
						})
				}}
			</div>
		</ErrorBoundary>
	}
}
