use std::sync::Arc;

use crate::application::ports::{AnalysisClient, FileLoader};
use crate::application::services::{ComplianceService, DocumentAnalysisService};
use crate::presentation::config::Settings;

pub struct AppState<F, A>
where
    F: FileLoader,
    A: AnalysisClient,
{
    pub compliance_service: Arc<ComplianceService<A>>,
    pub document_service: Arc<DocumentAnalysisService<F, A>>,
    pub settings: Settings,
}

impl<F, A> AppState<F, A>
where
    F: FileLoader,
    A: AnalysisClient,
{
    /// Wires both services around one shared analysis client.
    pub fn new(file_loader: Arc<F>, analysis_client: Arc<A>, settings: Settings) -> Self {
        let compliance_service = Arc::new(
            ComplianceService::new(analysis_client, settings.analysis.max_context_length)
                .with_export_options(settings.analysis.export_options())
                .with_default_query(&settings.analysis.default_query),
        );
        let document_service = Arc::new(DocumentAnalysisService::new(
            file_loader,
            Arc::clone(&compliance_service),
        ));

        Self {
            compliance_service,
            document_service,
            settings,
        }
    }
}

impl<F, A> Clone for AppState<F, A>
where
    F: FileLoader,
    A: AnalysisClient,
{
    fn clone(&self) -> Self {
        Self {
            compliance_service: Arc::clone(&self.compliance_service),
            document_service: Arc::clone(&self.document_service),
            settings: self.settings.clone(),
        }
    }
}
