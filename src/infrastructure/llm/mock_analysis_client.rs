use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::ports::{AnalysisClient, AnalysisError};
use crate::domain::{AnalysisQuery, RawModelReply};

/// Canned analysis client that records every query it receives.
pub struct MockAnalysisClient {
    outcome: Result<RawModelReply, AnalysisError>,
    received: Mutex<Vec<AnalysisQuery>>,
}

impl MockAnalysisClient {
    pub fn replying(text: &str) -> Self {
        Self::with_outcome(Ok(RawModelReply::new(text)))
    }

    pub fn failing(error: AnalysisError) -> Self {
        Self::with_outcome(Err(error))
    }

    pub fn with_outcome(outcome: Result<RawModelReply, AnalysisError>) -> Self {
        Self {
            outcome,
            received: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.received.lock().map(|r| r.len()).unwrap_or_default()
    }

    pub fn last_query(&self) -> Option<AnalysisQuery> {
        self.received.lock().ok().and_then(|r| r.last().cloned())
    }
}

#[async_trait]
impl AnalysisClient for MockAnalysisClient {
    async fn analyze(&self, query: &AnalysisQuery) -> Result<RawModelReply, AnalysisError> {
        if let Ok(mut received) = self.received.lock() {
            received.push(query.clone());
        }
        self.outcome.clone()
    }
}
