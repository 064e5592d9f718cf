mod analyze_document;
mod analyze_text;
mod api_response;
mod health;

pub use analyze_document::{DocumentAnalysisData, analyze_document_handler};
pub use analyze_text::{AnalyzeTextRequest, TextAnalysisData, analyze_text_handler};
pub use api_response::ApiResponse;
pub use health::{HealthResponse, health_handler};
