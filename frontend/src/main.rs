mod api;
mod components;
mod state;

use gloo_events::EventListener;
use gloo_file::callbacks::{read_as_data_url, FileReader};
use gloo_file::File as GlooFile;
use gloo_timers::callback::Timeout;
use state::{UploaderState, COPIED_RESET_MS};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{ClipboardEvent, DragEvent};
use yew::prelude::*;

use components::header::render_header;
use components::results::{render_caption_result, render_error_message};
use components::upload_section::render_upload_section;

pub enum Msg {
    // File selection (picker, drop, or paste)
    FileSelected(GlooFile),
    PreviewLoaded(u64, String),

    // Caption request lifecycle
    Submit,
    CaptionReceived(Option<String>),
    RequestFailed(String),

    // UI actions
    Clear,
    CopyCaption,
    CopiedReset,
    SetDragging(bool),

    // Input events
    HandleDrop(DragEvent),
    HandlePaste(ClipboardEvent),
}

pub struct Model {
    pub(crate) state: UploaderState<GlooFile>,
    pub(crate) is_dragging: bool,
    preview_reader: Option<FileReader>,
    copied_timeout: Option<Timeout>,
    paste_listener: Option<EventListener>,
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let mut model = Self {
            state: UploaderState::new(),
            is_dragging: false,
            preview_reader: None,
            copied_timeout: None,
            paste_listener: None,
        };

        let link = ctx.link().clone();
        let window = web_sys::window().expect("no global `window` exists");
        let listener = EventListener::new(&window, "paste", move |event| {
            if let Some(clipboard_event) = event.dyn_ref::<ClipboardEvent>() {
                link.send_message(Msg::HandlePaste(clipboard_event.clone()));
            }
        });
        model.paste_listener = Some(listener);

        model
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::FileSelected(file) => self.handle_file_selected(ctx, file),
            Msg::PreviewLoaded(token, data_uri) => self.handle_preview_loaded(token, data_uri),

            Msg::Submit => self.handle_submit(ctx),
            Msg::CaptionReceived(caption) => {
                self.state.finish_with_caption(caption);
                true
            }
            Msg::RequestFailed(message) => {
                self.state.finish_with_error(message);
                true
            }

            Msg::Clear => self.handle_clear(),
            Msg::CopyCaption => self.handle_copy_caption(ctx),
            Msg::CopiedReset => {
                self.copied_timeout = None;
                self.state.reset_copied();
                true
            }
            Msg::SetDragging(is_dragging) => {
                self.is_dragging = is_dragging;
                true
            }

            Msg::HandleDrop(event) => self.handle_drop(ctx, event),
            Msg::HandlePaste(event) => self.handle_paste(ctx, event),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="container">
                { render_header() }

                <main class="main-content">
                    { render_upload_section(self, ctx) }
                    { render_error_message(self) }
                    { render_caption_result(self, ctx) }
                </main>

                <footer class="app-footer">
                    <p>{"Image Caption Generator | Fullstack Rust WASM"}</p>
                </footer>
            </div>
        }
    }
}

impl Model {
    fn handle_file_selected(&mut self, ctx: &Context<Self>, file: GlooFile) -> bool {
        self.cancel_copied_timer();

        let mime_type = file.raw_mime_type();
        match self.state.select_file(file, &mime_type) {
            Some(token) => {
                let link = ctx.link().clone();
                if let Some(file) = self.state.file() {
                    self.preview_reader = Some(read_as_data_url(file, move |result| {
                        match result {
                            Ok(data_uri) => link.send_message(Msg::PreviewLoaded(token, data_uri)),
                            Err(e) => log::warn!("Failed to derive preview: {:?}", e),
                        }
                    }));
                }
                true
            }
            // Rejected by validation; the error is already set.
            None => true,
        }
    }

    fn handle_preview_loaded(&mut self, token: u64, data_uri: String) -> bool {
        if self.state.preview_ready(token, data_uri) {
            self.preview_reader = None;
            true
        } else {
            false
        }
    }

    fn handle_submit(&mut self, ctx: &Context<Self>) -> bool {
        let Some(file) = self.state.begin_submit().cloned() else {
            return false;
        };
        self.cancel_copied_timer();
        api::send_caption_request(ctx, file);
        true
    }

    fn handle_clear(&mut self) -> bool {
        self.state.clear();
        self.preview_reader = None;
        self.cancel_copied_timer();
        true
    }

    fn handle_copy_caption(&mut self, ctx: &Context<Self>) -> bool {
        if !self.state.mark_copied() {
            return false;
        }

        let text = self.state.caption().to_string();
        spawn_local(async move {
            if let Some(window) = web_sys::window() {
                let promise = window.navigator().clipboard().write_text(&text);
                if JsFuture::from(promise).await.is_err() {
                    log::warn!("Clipboard write failed");
                }
            }
        });

        // A second copy inside the window restarts it rather than stacking.
        self.cancel_copied_timer();
        let link = ctx.link().clone();
        self.copied_timeout = Some(Timeout::new(COPIED_RESET_MS, move || {
            link.send_message(Msg::CopiedReset);
        }));
        true
    }

    fn handle_drop(&mut self, ctx: &Context<Self>, event: DragEvent) -> bool {
        event.prevent_default();
        self.is_dragging = false;

        if let Some(file) = event
            .data_transfer()
            .and_then(|dt| dt.files())
            .and_then(|list| list.item(0))
        {
            ctx.link().send_message(Msg::FileSelected(GlooFile::from(file)));
        }
        true
    }

    fn handle_paste(&mut self, ctx: &Context<Self>, event: ClipboardEvent) -> bool {
        if let Some(file) = event
            .clipboard_data()
            .and_then(|dt| dt.files())
            .and_then(|list| list.item(0))
        {
            event.prevent_default();
            ctx.link().send_message(Msg::FileSelected(GlooFile::from(file)));
            return true;
        }
        false
    }

    fn cancel_copied_timer(&mut self) {
        if let Some(timeout) = self.copied_timeout.take() {
            timeout.cancel();
        }
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting...");
    yew::Renderer::<Model>::new().render();
}
