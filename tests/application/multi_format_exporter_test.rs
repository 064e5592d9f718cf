use pretty_assertions::assert_eq;
use proptest::prelude::*;
use regulens::application::services::{export, structure};
use regulens::domain::{
    Citation, ExportFormat, ExportOptions, ExportedResponse, RawModelReply,
    StructuredComplianceResponse,
};

fn sample() -> StructuredComplianceResponse {
    StructuredComplianceResponse {
        summary: Some("Deposits are regulated.".to_string()),
        obligations: vec!["Return deposit in 14 days".to_string()],
        recent_changes: Vec::new(),
        risks: vec!["Double damages".to_string()],
        citations: vec![
            Citation::new("Deposit limits", "Cal. Civ. Code § 1950.5"),
            Citation::new("Fair Housing Act", ""),
        ],
        jurisdictional_notes: None,
        raw_text: "1. Summary: Deposits are regulated.".to_string(),
    }
}

#[test]
fn given_json_format_when_exporting_then_returns_structured_report() {
    let exported = export(&sample(), ExportFormat::Json, &ExportOptions::default());

    let ExportedResponse::Json(report) = exported else {
        panic!("expected json export");
    };
    assert_eq!(report.summary.as_deref(), Some("Deposits are regulated."));
    assert_eq!(report.obligations, vec!["Return deposit in 14 days"]);
    assert!(report.recent_changes.is_empty());
    assert_eq!(report.citations.len(), 2);
    assert_eq!(report.raw_text, None);
}

#[test]
fn given_include_raw_text_when_exporting_json_then_embeds_raw_text() {
    let options = ExportOptions {
        include_raw_text: true,
    };

    let exported = export(&sample(), ExportFormat::Json, &options);

    let ExportedResponse::Json(report) = exported else {
        panic!("expected json export");
    };
    assert_eq!(
        report.raw_text.as_deref(),
        Some("1. Summary: Deposits are regulated.")
    );
}

#[test]
fn given_json_export_when_serializing_then_uses_stable_client_shape() {
    let exported = export(&sample(), ExportFormat::Json, &ExportOptions::default());

    let value = serde_json::to_value(&exported).unwrap();

    assert_eq!(value["format"], "json");
    assert_eq!(value["data"]["summary"], "Deposits are regulated.");
    assert_eq!(value["data"]["recentChanges"], serde_json::json!([]));
    assert_eq!(value["data"]["citations"][1]["source"], "");
    assert!(value["data"].get("jurisdictionalNotes").is_none());
    assert!(value["data"].get("rawText").is_none());
}

#[test]
fn given_raw_format_when_exporting_then_returns_raw_text_untouched() {
    let structured = sample();

    let exported = export(&structured, ExportFormat::Raw, &ExportOptions::default());

    assert_eq!(exported, ExportedResponse::Raw(structured.raw_text.clone()));
}

#[test]
fn given_html_format_when_exporting_then_renders_only_populated_sections() {
    let exported = export(&sample(), ExportFormat::Html, &ExportOptions::default());

    let ExportedResponse::Html(html) = exported else {
        panic!("expected html export");
    };
    assert!(html.starts_with("<article class=\"compliance-analysis\">"));
    assert!(html.contains("<h2>Compliance Summary</h2>\n<p>Deposits are regulated.</p>"));
    assert!(html.contains("<li>Return deposit in 14 days</li>"));
    assert!(html.contains("<li>Deposit limits — <cite>Cal. Civ. Code § 1950.5</cite></li>"));
    assert!(html.contains("<li>Fair Housing Act</li>"));
    assert!(!html.contains("Recent Regulatory Changes"));
    assert!(!html.contains("Jurisdictional Notes"));
}

#[test]
fn given_markup_in_text_when_exporting_html_then_escapes_it() {
    let structured = StructuredComplianceResponse {
        summary: Some("Use <b> & \"quotes\"".to_string()),
        ..StructuredComplianceResponse::default()
    };

    let ExportedResponse::Html(html) =
        export(&structured, ExportFormat::Html, &ExportOptions::default())
    else {
        panic!("expected html export");
    };

    assert!(html.contains("Use &lt;b&gt; &amp; &quot;quotes&quot;"));
    assert!(!html.contains("<b>"));
}

#[test]
fn given_markdown_format_when_exporting_then_renders_headings_and_lists() {
    let exported = export(&sample(), ExportFormat::Markdown, &ExportOptions::default());

    let expected = "## Compliance Summary\n\nDeposits are regulated.\n\n\
                    ## Key Legal Obligations\n\n- Return deposit in 14 days\n\n\
                    ## Legal Citations\n\n- Deposit limits — *Cal. Civ. Code § 1950.5*\n- Fair Housing Act\n\n\
                    ## Non-Compliance Risks\n\n- Double damages";
    assert_eq!(exported, ExportedResponse::Markdown(expected.to_string()));
}

#[test]
fn given_same_input_when_exporting_html_and_markdown_then_same_sections_present() {
    let titles = [
        "Compliance Summary",
        "Key Legal Obligations",
        "Recent Regulatory Changes",
        "Legal Citations",
        "Non-Compliance Risks",
        "Jurisdictional Notes",
    ];
    let structured = sample();

    let ExportedResponse::Html(html) =
        export(&structured, ExportFormat::Html, &ExportOptions::default())
    else {
        panic!("expected html export");
    };
    let ExportedResponse::Markdown(markdown) =
        export(&structured, ExportFormat::Markdown, &ExportOptions::default())
    else {
        panic!("expected markdown export");
    };

    for title in titles {
        assert_eq!(html.contains(title), markdown.contains(title), "{title}");
    }
}

#[test]
fn given_empty_structure_when_exporting_then_no_sections_are_synthesized() {
    let structured = structure(&RawModelReply::new(""));

    let ExportedResponse::Markdown(markdown) =
        export(&structured, ExportFormat::Markdown, &ExportOptions::default())
    else {
        panic!("expected markdown export");
    };
    let ExportedResponse::Html(html) =
        export(&structured, ExportFormat::Html, &ExportOptions::default())
    else {
        panic!("expected html export");
    };

    assert_eq!(markdown, "");
    assert_eq!(html, "<article class=\"compliance-analysis\">\n</article>");
}

#[test]
fn given_each_export_when_asking_format_then_tag_matches_request() {
    for format in [
        ExportFormat::Json,
        ExportFormat::Html,
        ExportFormat::Markdown,
        ExportFormat::Raw,
    ] {
        assert_eq!(
            export(&sample(), format, &ExportOptions::default()).format(),
            format
        );
    }
}

proptest! {
    #[test]
    fn raw_export_round_trips_reply_text(text in "\\PC{0,300}") {
        let structured = structure(&RawModelReply::new(text.clone()));
        let exported = export(&structured, ExportFormat::Raw, &ExportOptions::default());
        prop_assert_eq!(exported, ExportedResponse::Raw(text));
    }
}
