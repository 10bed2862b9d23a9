use crate::{Model, Msg};
use yew::prelude::*;

pub fn render_error_message(model: &Model) -> Html {
    if model.state.error().is_empty() {
        return html! {};
    }

    html! {
        <div class="error-message">
            <i class="fa-solid fa-circle-exclamation"></i>
            <p>{ model.state.error() }</p>
        </div>
    }
}

pub fn render_caption_result(model: &Model, ctx: &Context<Model>) -> Html {
    if model.state.caption().is_empty() {
        return html! {};
    }

    html! {
        <div class="caption-container">
            <h3>{"Generated Caption:"}</h3>
            <p class="caption-text">{ format!("\"{}\"", model.state.caption()) }</p>
            <button
                class="copy-btn"
                onclick={ctx.link().callback(|_| Msg::CopyCaption)}
            >
                <i class="fa-solid fa-copy"></i>
                { if model.state.copied() { " Copied!" } else { " Copy to clipboard" } }
            </button>
        </div>
    }
}
