use leptos::prelude::*;

/// Fallback for unknown routes.
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<div class="not-found">
			<h1>"404"</h1>
			<p>"Nothing grows on this branch."</p>
			<a href="/">"Back to the identity tree"</a>
		</div>
	}
}
