use async_trait::async_trait;

use crate::domain::{AnalysisQuery, RawModelReply};

/// Sends one bounded document context plus a user query to a generative model
/// and returns its reply verbatim.
///
/// Implementations make exactly one outbound call per invocation and never retry.
#[async_trait]
pub trait AnalysisClient: Send + Sync {
    async fn analyze(&self, query: &AnalysisQuery) -> Result<RawModelReply, AnalysisError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    #[error("analysis provider credential is not configured")]
    MissingCredential,
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("provider returned HTTP {status}: {body}")]
    ProviderStatus { status: u16, body: String },
    #[error("malformed provider payload: {0}")]
    MalformedPayload(String),
}
