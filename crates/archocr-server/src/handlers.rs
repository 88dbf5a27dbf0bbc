//! API request handlers.

use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};

use archocr_core::export::DOCX_CONTENT_TYPE;
use archocr_core::{ExtractionResult, RecognitionReport, Upload};

use crate::error::ApiError;
use crate::types::{AppState, ExportRequest, ExtractRequest, HealthResponse, MessageResponse};

/// Multipart field carrying the uploaded image.
const FILE_FIELD: &str = "file";

/// Liveness message.
pub async fn root_handler() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Backend is working!".to_string(),
    })
}

/// Health check.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Recognize an uploaded image.
///
/// Expects multipart form data with a `file` field whose content type is
/// `image/*`. Returns the recognized text, extracted entities, and the hex
/// encoded original bytes.
pub async fn upload_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<RecognitionReport>, ApiError> {
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Некорректный запрос: {}", e)))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().map(|s| s.to_string());
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("Не удалось прочитать файл: {}", e)))?;

        upload = Some(Upload::new(filename, content_type, data.to_vec()));
        break;
    }

    let upload = upload.ok_or_else(|| ApiError::bad_request("Файл не передан"))?;

    tracing::info!(
        "Upload {:?} ({}, {} bytes)",
        upload.filename,
        upload.content_type,
        upload.data.len()
    );

    let report = state.processor.process(upload).await?;
    Ok(Json(report))
}

/// Render submitted text as a DOCX attachment.
pub async fn export_handler(
    State(state): State<AppState>,
    Form(request): Form<ExportRequest>,
) -> Result<Response, ApiError> {
    let bytes = state
        .exporter
        .export(&request.text)
        .map_err(archocr_core::ArchocrError::from)?;

    let headers = [
        (header::CONTENT_TYPE, DOCX_CONTENT_TYPE.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={}", state.export_filename),
        ),
    ];

    Ok((headers, bytes).into_response())
}

/// Extract entities from plain text.
pub async fn extract_handler(
    State(state): State<AppState>,
    Json(request): Json<ExtractRequest>,
) -> Json<ExtractionResult> {
    let text = if request.clean {
        state.processor.cleaner().clean(&request.text)
    } else {
        request.text
    };

    Json(state.processor.extractor().extract(&text))
}
