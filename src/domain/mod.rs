mod analysis_query;
mod bounded_context;
mod compliance_response;
mod document;
mod document_id;
mod export;
mod extracted_text;
mod model_reply;

pub use analysis_query::AnalysisQuery;
pub use bounded_context::BoundedContext;
pub use compliance_response::{Citation, StructuredComplianceResponse};
pub use document::{ContentType, Document};
pub use document_id::DocumentId;
pub use export::{
    ComplianceReport, ExportFormat, ExportOptions, ExportedResponse, UnknownExportFormat,
};
pub use extracted_text::ExtractedText;
pub use model_reply::{RawModelReply, SafetyInfo};
