mod compliance_service;
mod context_bounder;
mod document_analysis_service;
pub mod multi_format_exporter;
pub mod response_structurer;
mod text_normalizer;

pub use compliance_service::{AnalysisOutcome, AnalysisReport, ComplianceService, DEFAULT_QUERY};
pub use context_bounder::{DEFAULT_MAX_CONTEXT_LENGTH, bound};
pub use document_analysis_service::{DocumentAnalysis, DocumentAnalysisService};
pub use multi_format_exporter::export;
pub use response_structurer::structure;
pub use text_normalizer::{collapse_whitespace, normalize};
