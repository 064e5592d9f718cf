use super::bounded_context::BoundedContext;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisQuery {
    pub query: String,
    pub context: BoundedContext,
}

impl AnalysisQuery {
    pub fn new(query: impl Into<String>, context: BoundedContext) -> Self {
        Self {
            query: query.into(),
            context,
        }
    }
}
