use crate::domain::{
    Citation, ComplianceReport, ExportFormat, ExportOptions, ExportedResponse,
    StructuredComplianceResponse,
};

const SUMMARY_TITLE: &str = "Compliance Summary";
const OBLIGATIONS_TITLE: &str = "Key Legal Obligations";
const CHANGES_TITLE: &str = "Recent Regulatory Changes";
const CITATIONS_TITLE: &str = "Legal Citations";
const RISKS_TITLE: &str = "Non-Compliance Risks";
const JURISDICTION_TITLE: &str = "Jurisdictional Notes";

/// Renders a structured response in the requested format.
pub fn export(
    structured: &StructuredComplianceResponse,
    format: ExportFormat,
    options: &ExportOptions,
) -> ExportedResponse {
    match format {
        ExportFormat::Json => ExportedResponse::Json(to_report(structured, options)),
        ExportFormat::Html => ExportedResponse::Html(render_html(structured)),
        ExportFormat::Markdown => ExportedResponse::Markdown(render_markdown(structured)),
        ExportFormat::Raw => ExportedResponse::Raw(structured.raw_text.clone()),
    }
}

pub fn to_report(
    structured: &StructuredComplianceResponse,
    options: &ExportOptions,
) -> ComplianceReport {
    ComplianceReport {
        summary: structured.summary.clone(),
        obligations: structured.obligations.clone(),
        recent_changes: structured.recent_changes.clone(),
        citations: structured.citations.clone(),
        risks: structured.risks.clone(),
        jurisdictional_notes: structured.jurisdictional_notes.clone(),
        raw_text: options
            .include_raw_text
            .then(|| structured.raw_text.clone()),
    }
}

/// Shared section model so HTML and Markdown always agree on which
/// sections exist.
enum Block<'a> {
    Paragraph(&'a str),
    List(Vec<ListItem<'a>>),
}

enum ListItem<'a> {
    Plain(&'a str),
    Citation(&'a Citation),
}

fn sections(structured: &StructuredComplianceResponse) -> Vec<(&'static str, Block<'_>)> {
    let mut out = Vec::new();

    if let Some(summary) = structured.summary.as_deref().filter(|s| !s.is_empty()) {
        out.push((SUMMARY_TITLE, Block::Paragraph(summary)));
    }

    let lists = [
        (OBLIGATIONS_TITLE, &structured.obligations),
        (CHANGES_TITLE, &structured.recent_changes),
    ];
    for (title, items) in lists {
        if !items.is_empty() {
            out.push((
                title,
                Block::List(items.iter().map(|i| ListItem::Plain(i)).collect()),
            ));
        }
    }

    if !structured.citations.is_empty() {
        out.push((
            CITATIONS_TITLE,
            Block::List(structured.citations.iter().map(ListItem::Citation).collect()),
        ));
    }

    if !structured.risks.is_empty() {
        out.push((
            RISKS_TITLE,
            Block::List(structured.risks.iter().map(|i| ListItem::Plain(i)).collect()),
        ));
    }

    if let Some(notes) = structured
        .jurisdictional_notes
        .as_deref()
        .filter(|s| !s.is_empty())
    {
        out.push((JURISDICTION_TITLE, Block::Paragraph(notes)));
    }

    out
}

pub fn render_html(structured: &StructuredComplianceResponse) -> String {
    let mut html = String::from("<article class=\"compliance-analysis\">\n");

    for (title, block) in sections(structured) {
        html.push_str("<section>\n<h2>");
        html.push_str(&escape_html(title));
        html.push_str("</h2>\n");
        match block {
            Block::Paragraph(text) => {
                html.push_str("<p>");
                html.push_str(&escape_html(text));
                html.push_str("</p>\n");
            }
            Block::List(items) => {
                html.push_str("<ul>\n");
                for item in items {
                    html.push_str("<li>");
                    match item {
                        ListItem::Plain(text) => html.push_str(&escape_html(text)),
                        ListItem::Citation(citation) => {
                            html.push_str(&escape_html(&citation.text));
                            if !citation.source.is_empty() {
                                html.push_str(" — <cite>");
                                html.push_str(&escape_html(&citation.source));
                                html.push_str("</cite>");
                            }
                        }
                    }
                    html.push_str("</li>\n");
                }
                html.push_str("</ul>\n");
            }
        }
        html.push_str("</section>\n");
    }

    html.push_str("</article>");
    html
}

pub fn render_markdown(structured: &StructuredComplianceResponse) -> String {
    let mut blocks: Vec<String> = Vec::new();

    for (title, block) in sections(structured) {
        let body = match block {
            Block::Paragraph(text) => text.to_string(),
            Block::List(items) => items
                .into_iter()
                .map(|item| match item {
                    ListItem::Plain(text) => format!("- {text}"),
                    ListItem::Citation(c) if c.source.is_empty() => format!("- {}", c.text),
                    ListItem::Citation(c) => format!("- {} — *{}*", c.text, c.source),
                })
                .collect::<Vec<_>>()
                .join("\n"),
        };
        blocks.push(format!("## {title}\n\n{body}"));
    }

    blocks.join("\n\n")
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
