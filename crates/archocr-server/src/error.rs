//! API error type and its HTTP mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use archocr_core::{ArchocrError, OcrError};

use crate::types::ErrorResponse;

/// Message returned for non-image uploads.
pub const IMAGES_ONLY_MESSAGE: &str = "Разрешены только изображения";

/// An error rendered as `{"error": "..."}` with a status code.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl From<ArchocrError> for ApiError {
    fn from(err: ArchocrError) -> Self {
        match err {
            ArchocrError::UnsupportedMediaType(_) => Self::bad_request(IMAGES_ONLY_MESSAGE),
            ArchocrError::Image(e) => {
                Self::bad_request(format!("Не удалось прочитать изображение: {}", e))
            }
            ArchocrError::Ocr(e @ OcrError::EngineUnavailable(_)) => {
                Self::new(StatusCode::SERVICE_UNAVAILABLE, format!("Ошибка: {}", e))
            }
            ArchocrError::Ocr(e @ OcrError::Timeout(_)) => {
                Self::new(StatusCode::GATEWAY_TIMEOUT, format!("Ошибка: {}", e))
            }
            ArchocrError::Export(e) => {
                Self::internal(format!("Ошибка при создании документа: {}", e))
            }
            other => Self::internal(format!("Ошибка: {}", other)),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!("{} {}", self.status, self.message);
        } else {
            tracing::warn!("{} {}", self.status, self.message);
        }

        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                ArchocrError::UnsupportedMediaType("text/plain".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ArchocrError::Ocr(OcrError::EngineUnavailable("tesseract".into())),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                ArchocrError::Ocr(OcrError::Timeout(Duration::from_secs(30))),
                StatusCode::GATEWAY_TIMEOUT,
            ),
            (
                ArchocrError::Ocr(OcrError::Failed("exit 1".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ArchocrError::Config("bad".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status, status);
        }
    }

    #[test]
    fn test_images_only_message() {
        let err = ApiError::from(ArchocrError::UnsupportedMediaType("text/plain".into()));
        assert_eq!(err.message, IMAGES_ONLY_MESSAGE);
    }
}
