//! Research endpoints
//!
//! - `POST /api/research/process` - JSON body, returns `{ result }`
//! - `POST /api/research/upload`  - multipart upload, returns `{ extractedText, result }`

use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, Multipart, State},
    routing::post,
    Json, Router,
};
use bytes::Bytes;
use tracing::{debug, info};

use crate::documents::DocumentProcessor;
use crate::models::{AppState, ProcessResponse, ProcessingRequest, UploadResponse};
use crate::types::{AppError, AppResult};

const DEFAULT_UPLOAD_OPERATION: &str = "abstract";
const DEFAULT_SUMMARY_STYLE: &str = "ai_summary";
const DEFAULT_TARGET_LANGUAGE: &str = "en";

pub fn router(state: AppState) -> Router {
    let upload_limit = state.config.server.max_upload_bytes;

    Router::new()
        .route("/api/research/process", post(process))
        .route(
            "/api/research/upload",
            post(upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .with_state(state)
}

async fn process(
    State(state): State<AppState>,
    payload: Result<Json<ProcessingRequest>, JsonRejection>,
) -> AppResult<Json<ProcessResponse>> {
    let Json(request) = payload.map_err(|rejection| AppError::Validation(rejection.body_text()))?;

    request.validate(state.research.strict_operations())?;

    let result = state.research.process(&request).await;
    Ok(Json(ProcessResponse { result }))
}

/// Text fields of the upload form; blank values fall back to the defaults
#[derive(Default)]
struct UploadForm {
    file: Option<(String, Bytes)>,
    operation: Option<String>,
    summary_style: Option<String>,
    target_language: Option<String>,
}

fn non_blank(value: Option<String>, default: &str) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

async fn read_form(mut multipart: Multipart) -> AppResult<UploadForm> {
    let bad_upload = |e: axum::extract::multipart::MultipartError| AppError::BadUpload(e.body_text());
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await.map_err(bad_upload)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await.map_err(bad_upload)?;
                form.file = Some((file_name, data));
            }
            "operation" => form.operation = Some(field.text().await.map_err(bad_upload)?),
            "summaryStyle" => form.summary_style = Some(field.text().await.map_err(bad_upload)?),
            "targetLanguage" => form.target_language = Some(field.text().await.map_err(bad_upload)?),
            _ => debug!(field = %name, "Ignoring unknown multipart field"),
        }
    }

    Ok(form)
}

async fn upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    let form = read_form(multipart).await?;

    let (file_name, data) = form
        .file
        .ok_or_else(|| AppError::BadUpload("No file uploaded".to_string()))?;

    info!(file_name = %file_name, size = data.len(), "File upload request received");

    let extracted_text = DocumentProcessor::extract_text(&file_name, data.to_vec()).await?;

    let request = ProcessingRequest {
        content: Some(extracted_text.clone()),
        operation: Some(non_blank(form.operation, DEFAULT_UPLOAD_OPERATION)),
        target_language: Some(non_blank(form.target_language, DEFAULT_TARGET_LANGUAGE)),
        summary_style: Some(non_blank(form.summary_style, DEFAULT_SUMMARY_STYLE)),
    };
    request.validate(state.research.strict_operations())?;

    let result = state.research.process(&request).await;

    Ok(Json(UploadResponse {
        extracted_text,
        result,
    }))
}
