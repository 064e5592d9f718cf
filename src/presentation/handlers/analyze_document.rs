use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::Response;
use serde::Serialize;

use crate::application::ports::{AnalysisClient, FileLoader, FileLoaderError};
use crate::application::services::{AnalysisOutcome, DocumentAnalysis};
use crate::domain::{ContentType, Document, ExportFormat, ExportOptions, ExportedResponse};
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

use super::api_response::{failure, success};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentAnalysisData {
    pub document_id: String,
    pub filename: String,
    pub extracted_text: String,
    pub text_length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<ExportedResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub truncated: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safety_blocked: Option<bool>,
}

struct Upload {
    filename: String,
    content_type: String,
    data: Vec<u8>,
}

#[derive(Default)]
struct UploadForm {
    upload: Option<Upload>,
    query: Option<String>,
    format: Option<String>,
    include_raw_text: Option<bool>,
}

fn multipart_failure(error: MultipartError) -> Response {
    let status = error.status();
    tracing::warn!(error = %error, %status, "Failed to read multipart");
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        failure(status, "Uploaded file is too large")
    } else {
        failure(
            StatusCode::BAD_REQUEST,
            format!("Failed to read multipart: {}", error.body_text()),
        )
    }
}

async fn read_form(multipart: &mut Multipart) -> Result<UploadForm, Response> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_failure)? {
        let name = field.name().unwrap_or_default().to_string();

        if name == "file" || field.file_name().is_some() {
            let filename = field.file_name().unwrap_or("upload").to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let data = field.bytes().await.map_err(multipart_failure)?;
            form.upload = Some(Upload {
                filename,
                content_type,
                data: data.to_vec(),
            });
            continue;
        }

        let value = field.text().await.map_err(multipart_failure)?;
        match name.as_str() {
            "query" => form.query = Some(value),
            "format" => form.format = Some(value),
            "include_raw_text" | "includeRawText" => {
                form.include_raw_text = Some(matches!(value.trim(), "true" | "1"))
            }
            other => tracing::debug!(field = other, "Ignoring unknown multipart field"),
        }
    }

    Ok(form)
}

#[tracing::instrument(skip(state, multipart))]
pub async fn analyze_document_handler<F, A>(
    State(state): State<AppState<F, A>>,
    mut multipart: Multipart,
) -> Response
where
    F: FileLoader + 'static,
    A: AnalysisClient + 'static,
{
    let form = match read_form(&mut multipart).await {
        Ok(form) => form,
        Err(response) => return response,
    };

    let Some(upload) = form.upload else {
        tracing::warn!("Analyze request with no file");
        return failure(StatusCode::BAD_REQUEST, "No file uploaded");
    };

    let max_bytes = state.settings.upload.max_file_size_bytes();
    if upload.data.len() > max_bytes {
        tracing::warn!(bytes = upload.data.len(), max_bytes, "Upload exceeds size limit");
        return failure(
            StatusCode::PAYLOAD_TOO_LARGE,
            format!(
                "File exceeds the {} MB upload limit",
                state.settings.upload.max_file_size_mb
            ),
        );
    }

    let Some(content_type) = ContentType::from_mime(&upload.content_type)
        .or_else(|| ContentType::from_filename(&upload.filename))
    else {
        tracing::warn!(content_type = %upload.content_type, "Unsupported content type");
        return failure(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            format!("Unsupported content type: {}", upload.content_type),
        );
    };

    let format = ExportFormat::from_param(form.format.as_deref());
    let options = ExportOptions {
        include_raw_text: form
            .include_raw_text
            .unwrap_or(state.compliance_service.export_options().include_raw_text),
    };
    let query = form.query.unwrap_or_default();

    tracing::debug!(
        filename = %upload.filename,
        bytes = upload.data.len(),
        query = %sanitize_prompt(&query),
        "Processing document upload"
    );

    let document = Document::new(upload.filename, content_type, upload.data.len() as u64);

    match state
        .document_service
        .analyze_document(&upload.data, document, &query, format, &options)
        .await
    {
        Ok(result) => document_response(result),
        Err(FileLoaderError::UnsupportedContentType(mime)) => failure(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            format!("Unsupported content type: {mime}"),
        ),
        Err(e) => failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to extract text: {e}"),
        ),
    }
}

fn document_response(result: DocumentAnalysis) -> Response {
    let DocumentAnalysis {
        document,
        extracted,
        analysis,
    } = result;

    let mut data = DocumentAnalysisData {
        document_id: document.id.to_string(),
        filename: document.filename,
        text_length: extracted.length,
        extracted_text: extracted.normalized,
        analysis: None,
        analysis_error: None,
        truncated: None,
        safety_blocked: None,
    };

    match analysis {
        Ok(AnalysisOutcome::NoTextContent) => {
            failure(StatusCode::BAD_REQUEST, "No text content found in document")
        }
        Ok(AnalysisOutcome::Completed(report)) => {
            let message = if report.safety_blocked {
                "Document analyzed; the reply was blocked by safety filters"
            } else {
                "Document analyzed successfully"
            };
            tracing::info!(
                document_id = %data.document_id,
                truncated = report.truncated,
                "Document analysis complete"
            );
            data.analysis = Some(report.response);
            data.truncated = Some(report.truncated);
            data.safety_blocked = Some(report.safety_blocked);
            success(message, data)
        }
        Err(e) => {
            data.analysis_error = Some(e.to_string());
            success("Text extracted, but compliance analysis failed", data)
        }
    }
}
