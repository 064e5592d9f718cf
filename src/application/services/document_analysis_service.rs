use std::sync::Arc;

use crate::application::ports::{AnalysisClient, AnalysisError, ExtractionError, FileLoader};
use crate::domain::{Document, ExportFormat, ExportOptions, ExtractedText};

use super::compliance_service::{AnalysisOutcome, ComplianceService};
use super::text_normalizer::normalize;

/// Extracted text plus the analysis attempted on it.
///
/// The analysis result is kept apart from the extraction so a provider
/// failure still leaves the caller with the document text.
#[derive(Debug)]
pub struct DocumentAnalysis {
    pub document: Document,
    pub extracted: ExtractedText,
    pub analysis: Result<AnalysisOutcome, AnalysisError>,
}

pub struct DocumentAnalysisService<F, A>
where
    F: FileLoader,
    A: AnalysisClient,
{
    file_loader: Arc<F>,
    compliance_service: Arc<ComplianceService<A>>,
}

impl<F, A> DocumentAnalysisService<F, A>
where
    F: FileLoader,
    A: AnalysisClient,
{
    pub fn new(file_loader: Arc<F>, compliance_service: Arc<ComplianceService<A>>) -> Self {
        Self {
            file_loader,
            compliance_service,
        }
    }

    /// Fails only when the bytes cannot be read; analysis errors are carried
    /// inside [`DocumentAnalysis::analysis`].
    #[tracing::instrument(
        skip(self, data, query, options),
        fields(document_id = %document.id, filename = %document.filename, format = %format)
    )]
    pub async fn analyze_document(
        &self,
        data: &[u8],
        document: Document,
        query: &str,
        format: ExportFormat,
        options: &ExportOptions,
    ) -> Result<DocumentAnalysis, ExtractionError> {
        let raw = self
            .file_loader
            .extract_text(data, &document)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Text extraction failed"))?;

        let extracted = normalize(&raw);
        tracing::info!(chars = extracted.length, "Document text extracted");

        let analysis = self
            .compliance_service
            .analyze_extracted(
                &extracted,
                query,
                format,
                options,
                self.compliance_service.max_context_length(),
            )
            .await;

        if let Err(e) = &analysis {
            tracing::warn!(error = %e, "Returning extracted text without analysis");
        }

        Ok(DocumentAnalysis {
            document,
            extracted,
            analysis,
        })
    }
}
