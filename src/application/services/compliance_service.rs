use std::sync::Arc;

use crate::application::ports::{AnalysisClient, AnalysisError};
use crate::domain::{AnalysisQuery, ExportFormat, ExportOptions, ExportedResponse, ExtractedText};

use super::context_bounder::bound;
use super::multi_format_exporter::export;
use super::response_structurer::structure;
use super::text_normalizer::normalize;

/// Question sent when the caller supplies a document but no query.
pub const DEFAULT_QUERY: &str =
    "Identify the compliance requirements, obligations and risks described in this document.";

/// Result of one analysis request that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    /// Nothing to analyze; the provider was not called.
    NoTextContent,
    Completed(AnalysisReport),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisReport {
    pub response: ExportedResponse,
    pub truncated: bool,
    pub original_length: usize,
    pub sent_length: usize,
    pub safety_blocked: bool,
}

/// Extraction → bounding → analysis → structuring → export.
///
/// Built once per process and shared behind an `Arc`; it holds no
/// per-request state.
pub struct ComplianceService<A>
where
    A: AnalysisClient,
{
    analysis_client: Arc<A>,
    max_context_length: usize,
    export_options: ExportOptions,
    default_query: String,
}

impl<A> ComplianceService<A>
where
    A: AnalysisClient,
{
    pub fn new(analysis_client: Arc<A>, max_context_length: usize) -> Self {
        Self {
            analysis_client,
            max_context_length,
            export_options: ExportOptions::default(),
            default_query: DEFAULT_QUERY.to_string(),
        }
    }

    /// Replaces the question asked when a request carries none.
    /// A blank value keeps [`DEFAULT_QUERY`].
    pub fn with_default_query(mut self, default_query: &str) -> Self {
        if !default_query.trim().is_empty() {
            self.default_query = default_query.trim().to_string();
        }
        self
    }

    pub fn with_export_options(mut self, export_options: ExportOptions) -> Self {
        self.export_options = export_options;
        self
    }

    /// Process-wide export defaults, used when a request sets none.
    pub fn export_options(&self) -> ExportOptions {
        self.export_options
    }

    pub fn max_context_length(&self) -> usize {
        self.max_context_length
    }

    /// Analyzes text already pulled from a document.
    ///
    /// Text that normalizes to nothing short-circuits to
    /// [`AnalysisOutcome::NoTextContent`] without a provider call.
    #[tracing::instrument(skip_all, fields(format = %format, raw_chars = extracted_text.len()))]
    pub async fn analyze_document_text(
        &self,
        extracted_text: &str,
        query: &str,
        format: ExportFormat,
        options: &ExportOptions,
    ) -> Result<AnalysisOutcome, AnalysisError> {
        let extracted = normalize(extracted_text);
        self.analyze_extracted(&extracted, query, format, options, self.max_context_length)
            .await
    }

    /// Same as [`Self::analyze_document_text`] for text that is already
    /// normalized, with a per-call context budget.
    pub async fn analyze_extracted(
        &self,
        extracted: &ExtractedText,
        query: &str,
        format: ExportFormat,
        options: &ExportOptions,
        max_context_length: usize,
    ) -> Result<AnalysisOutcome, AnalysisError> {
        if extracted.is_empty() {
            tracing::info!("No text content found, skipping analysis");
            return Ok(AnalysisOutcome::NoTextContent);
        }

        let query = self.effective_query(query);

        self.run(extracted, query, format, options, max_context_length)
            .await
    }

    /// Answers a free-text question, optionally grounded in a context passage.
    #[tracing::instrument(skip_all, fields(format = %format, has_context = context.is_some()))]
    pub async fn analyze_text_prompt(
        &self,
        query: &str,
        context: Option<&str>,
        format: ExportFormat,
        options: &ExportOptions,
    ) -> Result<AnalysisOutcome, AnalysisError> {
        let extracted = normalize(context.unwrap_or_default());

        if query.trim().is_empty() && extracted.is_empty() {
            tracing::info!("Empty query and context, skipping analysis");
            return Ok(AnalysisOutcome::NoTextContent);
        }

        let query = self.effective_query(query);

        self.run(&extracted, query, format, options, self.max_context_length)
            .await
    }

    fn effective_query<'a>(&'a self, query: &'a str) -> &'a str {
        if query.trim().is_empty() {
            &self.default_query
        } else {
            query
        }
    }

    async fn run(
        &self,
        extracted: &ExtractedText,
        query: &str,
        format: ExportFormat,
        options: &ExportOptions,
        max_context_length: usize,
    ) -> Result<AnalysisOutcome, AnalysisError> {
        let context = bound(extracted, max_context_length);
        let (truncated, original_length, sent_length) =
            (context.truncated, context.original_length, context.sent_length);

        tracing::debug!(
            query_chars = query.chars().count(),
            original_length,
            sent_length,
            truncated,
            "Requesting compliance analysis"
        );

        let analysis_query = AnalysisQuery::new(query, context);
        let reply = self
            .analysis_client
            .analyze(&analysis_query)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Compliance analysis failed"))?;

        let structured = structure(&reply);
        if structured.has_no_sections() {
            tracing::warn!(blocked = reply.safety.blocked, "Analysis reply carried no content");
        }

        Ok(AnalysisOutcome::Completed(AnalysisReport {
            response: export(&structured, format, options),
            truncated,
            original_length,
            sent_length,
            safety_blocked: reply.safety.blocked,
        }))
    }
}
