use actix_files::Files;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use futures::{StreamExt, TryStreamExt};
use log::{error, info, warn};
use shared::CaptionResponse;

use crate::captioner::{Captioner, CaptionerError};
use crate::config::AppConfig;
use crate::error::ApiError;

pub fn configure_routes<C: Captioner>(cfg: &mut web::ServiceConfig, frontend_dir: String) {
    cfg.service(web::resource("/api/caption").route(web::post().to(caption_image::<C>)))
        .service(Files::new("/", frontend_dir).index_file("index.html"));
}

/// Accepts a single multipart image upload and answers with its caption.
/// The first field of the form carries the file; anything that does not
/// declare an `image/*` content type is refused before touching the
/// upstream service.
async fn caption_image<C: Captioner>(
    config: web::Data<AppConfig>,
    captioner: web::Data<C>,
    mut payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    while let Ok(Some(mut field)) = payload.try_next().await {
        let mime_type = field
            .content_type()
            .map(|mime| mime.to_string())
            .unwrap_or_default();
        if !mime_type.starts_with("image/") {
            warn!("Rejected upload with content type {:?}", mime_type);
            return Err(ApiError::InvalidFileType);
        }

        let mut image_data = Vec::new();
        while let Some(chunk) = field.next().await {
            let data = chunk.map_err(ApiError::Multipart)?;
            if image_data.len() + data.len() > config.max_upload_bytes {
                return Err(ApiError::FileTooLarge(config.max_upload_bytes));
            }
            image_data.extend_from_slice(&data);
        }
        if image_data.is_empty() {
            return Err(ApiError::MissingFile);
        }

        info!("Received image: {} bytes, {}", image_data.len(), mime_type);

        let caption = captioner
            .caption(image_data, mime_type)
            .await
            .map_err(|e| match e {
                CaptionerError::InvalidImage(source) => {
                    warn!("Rejected undecodable image: {}", source);
                    ApiError::InvalidImage
                }
                other => {
                    error!("Caption generation failed: {}", other);
                    ApiError::Captioning(other)
                }
            })?;

        return Ok(HttpResponse::Ok().json(CaptionResponse {
            caption: Some(caption),
        }));
    }

    Err(ApiError::MissingFile)
}
