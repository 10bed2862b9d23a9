use yew::prelude::*;

/// Renders the application header
pub fn render_header() -> Html {
    html! {
        <header class="app-header">
            <h1><i class="fa-solid fa-image"></i> {" AI Image Caption Generator"}</h1>
            <p class="subtitle">{"Upload an image and let AI describe it for you."}</p>
        </header>
    }
}
