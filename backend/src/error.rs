use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;

use crate::captioner::CaptionerError;

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid file type. Only images are allowed.")]
    InvalidFileType,
    #[error("File too large (max {mb}MB)", mb = .0 / (1024 * 1024))]
    FileTooLarge(usize),
    #[error("No file uploaded.")]
    MissingFile,
    #[error("Invalid image data.")]
    InvalidImage,
    #[error("Upload error: {0}")]
    Multipart(actix_multipart::MultipartError),
    #[error("Failed to process image.")]
    Captioning(#[source] CaptionerError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidFileType
            | ApiError::MissingFile
            | ApiError::InvalidImage
            | ApiError::Multipart(_) => StatusCode::BAD_REQUEST,
            ApiError::FileTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Captioning(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}
