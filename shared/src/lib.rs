use serde::{Deserialize, Serialize};

/// Body returned by the captioning endpoint. `caption` is absent when the
/// model produced no usable text for the image.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CaptionResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}
