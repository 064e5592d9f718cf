use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::compliance_response::Citation;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Html,
    Markdown,
    Raw,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown export format: {0}")]
pub struct UnknownExportFormat(pub String);

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Html => "html",
            ExportFormat::Markdown => "markdown",
            ExportFormat::Raw => "raw",
        }
    }

    /// Lenient parse used at the request boundary: missing or unknown values
    /// fall back to JSON instead of rejecting the request.
    pub fn from_param(value: Option<&str>) -> Self {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            None => Self::default(),
            Some(v) => v.parse().unwrap_or_else(|e: UnknownExportFormat| {
                tracing::warn!(error = %e, "Falling back to json export");
                Self::default()
            }),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = UnknownExportFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "html" => Ok(Self::Html),
            "markdown" | "md" => Ok(Self::Markdown),
            "raw" | "text" => Ok(Self::Raw),
            other => Err(UnknownExportFormat(other.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportOptions {
    /// Embed the unparsed model reply in JSON exports.
    pub include_raw_text: bool,
}

/// Client-facing JSON shape of a structured response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub obligations: Vec<String>,
    pub recent_changes: Vec<String>,
    pub citations: Vec<Citation>,
    pub risks: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jurisdictional_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,
}

/// One rendering of a structured response, tagged with its format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "format", content = "data", rename_all = "lowercase")]
pub enum ExportedResponse {
    Json(ComplianceReport),
    Html(String),
    Markdown(String),
    Raw(String),
}

impl ExportedResponse {
    pub fn format(&self) -> ExportFormat {
        match self {
            ExportedResponse::Json(_) => ExportFormat::Json,
            ExportedResponse::Html(_) => ExportFormat::Html,
            ExportedResponse::Markdown(_) => ExportFormat::Markdown,
            ExportedResponse::Raw(_) => ExportFormat::Raw,
        }
    }
}
