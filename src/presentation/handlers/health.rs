use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::application::ports::{AnalysisClient, FileLoader};
use crate::presentation::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub model: String,
    /// False until an API key is configured; analysis calls fail until then.
    pub provider_configured: bool,
}

pub async fn health_handler<F, A>(State(state): State<AppState<F, A>>) -> Json<HealthResponse>
where
    F: FileLoader + 'static,
    A: AnalysisClient + 'static,
{
    let llm = &state.settings.llm;

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        model: llm.model.clone(),
        provider_configured: !llm.api_key.trim().is_empty(),
    })
}
