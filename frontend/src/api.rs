use gloo_file::File as GlooFile;
use gloo_net::http::Request;
use shared::CaptionResponse;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::state::{FALLBACK_ERROR_MESSAGE, SERVER_ERROR_MESSAGE};
use crate::{Model, Msg};

/// Captioning endpoint. Same-origin by default; overridable at build time
/// for setups where the API is hosted elsewhere.
pub fn caption_endpoint() -> &'static str {
    option_env!("CAPTION_API_URL").unwrap_or("/api/caption")
}

/// Uploads the image as a single multipart request and reports the outcome
/// back to the component. Exactly one terminal message is sent per call.
pub fn send_caption_request(ctx: &Context<Model>, file: GlooFile) {
    let link = ctx.link().clone();

    spawn_local(async move {
        let form_data = match web_sys::FormData::new() {
            Ok(form_data) => form_data,
            Err(_) => {
                return link.send_message(Msg::RequestFailed(FALLBACK_ERROR_MESSAGE.into()));
            }
        };
        if form_data.append_with_blob("file", file.as_ref()).is_err() {
            return link.send_message(Msg::RequestFailed(FALLBACK_ERROR_MESSAGE.into()));
        }

        let request = match Request::post(caption_endpoint()).body(form_data) {
            Ok(request) => request,
            Err(_) => {
                return link.send_message(Msg::RequestFailed(FALLBACK_ERROR_MESSAGE.into()));
            }
        };

        match request.send().await {
            Ok(response) if response.ok() => {
                match response.json::<CaptionResponse>().await {
                    Ok(payload) => {
                        // An empty caption counts as "nothing generated".
                        let caption = payload.caption.filter(|c| !c.is_empty());
                        link.send_message(Msg::CaptionReceived(caption));
                    }
                    Err(e) => link.send_message(Msg::RequestFailed(e.to_string())),
                }
            }
            // Status and body are deliberately not surfaced to the user.
            Ok(_) => link.send_message(Msg::RequestFailed(SERVER_ERROR_MESSAGE.into())),
            Err(e) => link.send_message(Msg::RequestFailed(e.to_string())),
        }
    });
}
