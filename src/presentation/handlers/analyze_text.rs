use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::Response;
use serde::{Deserialize, Serialize};

use crate::application::ports::{AnalysisClient, FileLoader};
use crate::application::services::AnalysisOutcome;
use crate::domain::{ExportFormat, ExportOptions, ExportedResponse};
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

use super::api_response::{failure, success};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeTextRequest {
    pub query: String,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub include_raw_text: Option<bool>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAnalysisData {
    pub analysis: ExportedResponse,
    pub truncated: bool,
    pub safety_blocked: bool,
}

#[tracing::instrument(skip(state, payload))]
pub async fn analyze_text_handler<F, A>(
    State(state): State<AppState<F, A>>,
    payload: Result<Json<AnalyzeTextRequest>, JsonRejection>,
) -> Response
where
    F: FileLoader + 'static,
    A: AnalysisClient + 'static,
{
    let request = match payload {
        Ok(Json(request)) => request,
        Err(JsonRejection::MissingJsonContentType(e)) => {
            return failure(StatusCode::UNSUPPORTED_MEDIA_TYPE, e.body_text());
        }
        Err(e) => {
            tracing::warn!(error = %e, "Rejected analyze request body");
            return failure(StatusCode::BAD_REQUEST, e.body_text());
        }
    };

    if request.query.trim().is_empty() {
        return failure(StatusCode::BAD_REQUEST, "Query is required");
    }

    tracing::debug!(query = %sanitize_prompt(&request.query), "Processing text analysis");

    let format = ExportFormat::from_param(request.format.as_deref());
    let options = ExportOptions {
        include_raw_text: request
            .include_raw_text
            .unwrap_or(state.compliance_service.export_options().include_raw_text),
    };

    match state
        .compliance_service
        .analyze_text_prompt(&request.query, request.context.as_deref(), format, &options)
        .await
    {
        Ok(AnalysisOutcome::Completed(report)) => success(
            "Analysis completed successfully",
            TextAnalysisData {
                analysis: report.response,
                truncated: report.truncated,
                safety_blocked: report.safety_blocked,
            },
        ),
        Ok(AnalysisOutcome::NoTextContent) => {
            failure(StatusCode::BAD_REQUEST, "No text content to analyze")
        }
        Err(e) => failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Compliance analysis failed: {e}"),
        ),
    }
}
