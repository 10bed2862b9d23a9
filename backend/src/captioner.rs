use base64::engine::general_purpose;
use base64::Engine as _;
use image::codecs::jpeg::JpegEncoder;
use serde_json::Value;
use std::future::Future;

pub const DEFAULT_GEMINI_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent";

const CAPTION_PROMPT: &str = "Describe this image in one short, descriptive caption.";

#[derive(Debug, thiserror::Error)]
pub enum CaptionerError {
    #[error("image decode failed: {0}")]
    InvalidImage(#[from] image::ImageError),
    #[error("caption request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("caption service returned status {0}")]
    UpstreamStatus(reqwest::StatusCode),
    #[error("caption service response missing caption text")]
    MissingCaption,
}

/// Produces a caption for an uploaded image. The actual image
/// understanding lives in an external service; implementations only
/// carry the bytes there and back.
pub trait Captioner: 'static {
    fn caption(
        &self,
        image: Vec<u8>,
        mime_type: String,
    ) -> impl Future<Output = Result<String, CaptionerError>>;
}

#[derive(Clone)]
pub struct GeminiCaptioner {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl GeminiCaptioner {
    pub fn new(endpoint: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            api_key,
        }
    }
}

impl Captioner for GeminiCaptioner {
    async fn caption(&self, image: Vec<u8>, _mime_type: String) -> Result<String, CaptionerError> {
        let jpeg = normalize_to_jpeg(&image)?;

        let payload = serde_json::json!({
            "contents": [{
                "parts": [
                    { "text": CAPTION_PROMPT },
                    {
                        "inline_data": {
                            "mime_type": "image/jpeg",
                            "data": general_purpose::STANDARD.encode(&jpeg)
                        }
                    }
                ]
            }]
        });

        let url = format!("{}?key={}", self.endpoint, self.api_key);
        let response = self.client.post(&url).json(&payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CaptionerError::UpstreamStatus(status));
        }

        let body: Value = response.json().await?;
        extract_caption(&body).ok_or(CaptionerError::MissingCaption)
    }
}

/// Re-encodes the upload as JPEG before shipping it upstream. Also serves
/// as server-side proof that the bytes really are a decodable image.
pub fn normalize_to_jpeg(data: &[u8]) -> Result<Vec<u8>, CaptionerError> {
    let img = image::load_from_memory(data)?;
    let mut jpeg = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut jpeg, 85);
    img.write_with_encoder(encoder)?;
    Ok(jpeg)
}

/// Pulls the caption text out of a `generateContent` response.
pub fn extract_caption(body: &Value) -> Option<String> {
    body["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn png_fixture() -> Vec<u8> {
        let img = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
            4,
            4,
            image::Rgb([120, 40, 200]),
        ));
        let mut bytes = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn extracts_caption_from_gemini_response() {
        let body = json!({
            "candidates": [{
                "content": {
                    "parts": [{ "text": "a dog running on a beach" }]
                }
            }]
        });
        assert_eq!(
            extract_caption(&body).as_deref(),
            Some("a dog running on a beach")
        );
    }

    #[test]
    fn missing_or_empty_caption_yields_none() {
        assert_eq!(extract_caption(&json!({})), None);
        assert_eq!(extract_caption(&json!({ "candidates": [] })), None);

        let blank = json!({
            "candidates": [{ "content": { "parts": [{ "text": "   " }] } }]
        });
        assert_eq!(extract_caption(&blank), None);
    }

    #[test]
    fn normalizes_png_uploads_to_jpeg() {
        let jpeg = normalize_to_jpeg(&png_fixture()).unwrap();
        assert!(!jpeg.is_empty());
        // JPEG SOI marker
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn rejects_undecodable_bytes() {
        let err = normalize_to_jpeg(b"definitely not an image").unwrap_err();
        assert!(matches!(err, CaptionerError::InvalidImage(_)));
    }
}
