use super::utils::debounce;
use crate::{Model, Msg};
use gloo_file::File as GlooFile;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, HtmlInputElement};
use yew::prelude::*;

pub fn render_upload_section(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link();

    let handle_change = link.batch_callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let file = input.files().and_then(|list| list.item(0));

        // Allow re-selecting the same file to fire another change event.
        input.set_value("");

        file.map(|file| Msg::FileSelected(GlooFile::from(file)))
    });

    let handle_drag_over = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(true)
    });

    let handle_drag_leave = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(false)
    });

    let handle_drop = link.callback(Msg::HandleDrop);
    let trigger_file_input = Callback::from(|_: ()| {
        if let Some(input) = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id("file-input"))
        {
            if let Ok(html_input) = input.dyn_into::<web_sys::HtmlElement>() {
                html_input.click();
            }
        }
    });

    html! {
        <div class="upload-section">
            <input
                type="file"
                id="file-input"
                accept="image/*"
                style="display: none;"
                onchange={handle_change}
            />

            <div
                id="drop-zone"
                class={classes!(
                    "upload-area",
                    model.state.has_file().then_some("has-file"),
                    model.is_dragging.then_some("drag-over"),
                )}
                ondragover={handle_drag_over}
                ondragleave={handle_drag_leave}
                ondrop={handle_drop}
                onclick={debounce(300, {
                    let trigger_file_input = trigger_file_input.clone();
                    move || trigger_file_input.emit(())
                })}
            >
                { render_preview(model) }
            </div>

            <div class="button-container">
                <button
                    class="caption-btn"
                    disabled={model.state.is_in_flight() || !model.state.has_file()}
                    onclick={debounce(300, {
                        let link = link.clone();
                        move || link.send_message(Msg::Submit)
                    })}
                >
                    { render_submit_button_content(model) }
                </button>
                { render_clear_button(model, ctx) }
            </div>
        </div>
    }
}

fn render_preview(model: &Model) -> Html {
    if let Some(data_uri) = model.state.preview() {
        html! {
            <img
                id="image-preview"
                src={data_uri.to_string()}
                alt="Image preview"
            />
        }
    } else if model.state.has_file() {
        html! {
            <div class="upload-placeholder">
                <i class="fa-solid fa-spinner fa-spin"></i>
                <p>{"Loading preview..."}</p>
            </div>
        }
    } else {
        html! {
            <div class="upload-placeholder">
                <i class="fa-solid fa-cloud-arrow-up"></i>
                <p>{"Drag & drop an image here, paste, or click to upload"}</p>
                <p class="file-types">{"Supported formats: JPG, PNG, WEBP, GIF"}</p>
            </div>
        }
    }
}

fn render_submit_button_content(model: &Model) -> Html {
    if model.state.is_in_flight() {
        html! { <><i class="fa-solid fa-spinner fa-spin"></i>{" Generating..."}</> }
    } else {
        html! { <><i class="fa-solid fa-upload"></i>{" Generate Caption"}</> }
    }
}

fn render_clear_button(model: &Model, ctx: &Context<Model>) -> Html {
    if !model.state.has_file() {
        return html! {};
    }

    html! {
        <button
            class="clear-btn"
            onclick={debounce(300, {
                let link = ctx.link().clone();
                move || link.send_message(Msg::Clear)
            })}
        >
            <i class="fa-solid fa-trash"></i>{" Clear"}
        </button>
    }
}
