use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub text: String,
    pub source: String,
}

impl Citation {
    pub fn new(text: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: source.into(),
        }
    }
}

/// Typed view of a model reply that followed the compliance rubric.
///
/// List fields are always present and default to empty. `raw_text` is the
/// reply text exactly as received, whether or not any section was found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuredComplianceResponse {
    pub summary: Option<String>,
    pub obligations: Vec<String>,
    pub recent_changes: Vec<String>,
    pub risks: Vec<String>,
    pub citations: Vec<Citation>,
    pub jurisdictional_notes: Option<String>,
    pub raw_text: String,
}

impl StructuredComplianceResponse {
    pub fn unstructured(raw_text: impl Into<String>) -> Self {
        Self {
            raw_text: raw_text.into(),
            ..Self::default()
        }
    }

    /// True when no rubric section carries any content.
    pub fn has_no_sections(&self) -> bool {
        self.summary.is_none()
            && self.obligations.is_empty()
            && self.recent_changes.is_empty()
            && self.risks.is_empty()
            && self.citations.is_empty()
            && self.jurisdictional_notes.is_none()
    }
}
