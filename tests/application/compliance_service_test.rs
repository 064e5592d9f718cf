use std::sync::Arc;

use pretty_assertions::assert_eq;
use regulens::application::ports::{AnalysisError, FileLoaderError};
use regulens::application::services::{
    AnalysisOutcome, ComplianceService, DEFAULT_QUERY, DocumentAnalysisService,
};
use regulens::domain::{
    ContentType, Document, ExportFormat, ExportOptions, ExportedResponse, RawModelReply,
    SafetyInfo,
};
use regulens::infrastructure::llm::MockAnalysisClient;
use regulens::infrastructure::text_processing::{CompositeFileLoader, PlainTextAdapter};

const RUBRIC_REPLY: &str = "1. Summary: Deposits are capped.\n\
                            2. Obligations:\n- Return deposit within 14 days\n\
                            3. Recent Changes:\nNone\n\
                            4. Citations:\n- Cal. Civ. Code § 1950.5: Deposit limits\n\
                            5. Risks:\n- Statutory damages";

fn service(client: &Arc<MockAnalysisClient>, max: usize) -> ComplianceService<MockAnalysisClient> {
    ComplianceService::new(Arc::clone(client), max)
}

#[tokio::test]
async fn given_empty_document_text_when_analyzing_then_returns_no_text_without_calling_provider() {
    let client = Arc::new(MockAnalysisClient::replying(RUBRIC_REPLY));

    let outcome = service(&client, 15_000)
        .analyze_document_text("  \n\t ", "Any query", ExportFormat::Json, &ExportOptions::default())
        .await
        .unwrap();

    assert_eq!(outcome, AnalysisOutcome::NoTextContent);
    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn given_document_text_when_analyzing_then_returns_structured_json() {
    let client = Arc::new(MockAnalysisClient::replying(RUBRIC_REPLY));

    let outcome = service(&client, 15_000)
        .analyze_document_text(
            "Security deposits are limited.",
            "What are the deposit rules?",
            ExportFormat::Json,
            &ExportOptions::default(),
        )
        .await
        .unwrap();

    let AnalysisOutcome::Completed(report) = outcome else {
        panic!("expected completed analysis");
    };
    let ExportedResponse::Json(json) = report.response else {
        panic!("expected json export");
    };
    assert_eq!(json.summary.as_deref(), Some("Deposits are capped."));
    assert_eq!(json.obligations, vec!["Return deposit within 14 days"]);
    assert!(json.recent_changes.is_empty());
    assert_eq!(json.citations[0].source, "Cal. Civ. Code § 1950.5");
    assert_eq!(json.risks, vec!["Statutory damages"]);
    assert!(!report.truncated);
    assert_eq!(client.calls(), 1);
}

#[tokio::test]
async fn given_long_document_when_analyzing_then_reports_truncation() {
    let client = Arc::new(MockAnalysisClient::replying(RUBRIC_REPLY));

    let outcome = service(&client, 10)
        .analyze_document_text(
            &"abcdefghij".repeat(3),
            "q",
            ExportFormat::Raw,
            &ExportOptions::default(),
        )
        .await
        .unwrap();

    let AnalysisOutcome::Completed(report) = outcome else {
        panic!("expected completed analysis");
    };
    assert!(report.truncated);
    assert_eq!(report.original_length, 30);
    assert_eq!(report.sent_length, 10);
    assert_eq!(report.response, ExportedResponse::Raw(RUBRIC_REPLY.to_string()));
}

#[tokio::test]
async fn given_provider_failure_when_analyzing_text_then_propagates_error() {
    let client = Arc::new(MockAnalysisClient::failing(AnalysisError::Transport(
        "connection reset".to_string(),
    )));

    let result = service(&client, 15_000)
        .analyze_text_prompt("Is this compliant?", None, ExportFormat::Json, &ExportOptions::default())
        .await;

    assert_eq!(
        result,
        Err(AnalysisError::Transport("connection reset".to_string()))
    );
    assert_eq!(client.calls(), 1);
}

#[tokio::test]
async fn given_query_without_context_when_analyzing_text_then_calls_provider() {
    let client = Arc::new(MockAnalysisClient::replying("Plain answer without headings."));

    let outcome = service(&client, 15_000)
        .analyze_text_prompt("What is GDPR?", Some("   "), ExportFormat::Markdown, &ExportOptions::default())
        .await
        .unwrap();

    let AnalysisOutcome::Completed(report) = outcome else {
        panic!("expected completed analysis");
    };
    assert_eq!(
        report.response,
        ExportedResponse::Markdown(
            "## Compliance Summary\n\nPlain answer without headings.".to_string()
        )
    );
    assert_eq!(report.sent_length, 0);
}

#[tokio::test]
async fn given_empty_query_and_context_when_analyzing_text_then_returns_no_text() {
    let client = Arc::new(MockAnalysisClient::replying(RUBRIC_REPLY));

    let outcome = service(&client, 15_000)
        .analyze_text_prompt(" ", None, ExportFormat::Json, &ExportOptions::default())
        .await
        .unwrap();

    assert_eq!(outcome, AnalysisOutcome::NoTextContent);
    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn given_blocked_reply_when_analyzing_then_flags_safety_block() {
    let client = Arc::new(MockAnalysisClient::with_outcome(Ok(RawModelReply::blocked(
        "",
        SafetyInfo::default(),
    ))));

    let outcome = service(&client, 15_000)
        .analyze_document_text("Some text.", "q", ExportFormat::Json, &ExportOptions::default())
        .await
        .unwrap();

    let AnalysisOutcome::Completed(report) = outcome else {
        panic!("expected completed analysis");
    };
    assert!(report.safety_blocked);
    let ExportedResponse::Json(json) = report.response else {
        panic!("expected json export");
    };
    assert_eq!(json.summary, None);
    assert!(json.obligations.is_empty());
}

fn document_service(
    client: &Arc<MockAnalysisClient>,
) -> DocumentAnalysisService<CompositeFileLoader, MockAnalysisClient> {
    let text: Arc<dyn regulens::application::ports::FileLoader> = Arc::new(PlainTextAdapter);
    let loader = CompositeFileLoader::new(vec![(ContentType::Text, text)]);
    DocumentAnalysisService::new(Arc::new(loader), Arc::new(service(client, 15_000)))
}

#[tokio::test]
async fn given_provider_failure_when_analyzing_document_then_keeps_extracted_text() {
    let client = Arc::new(MockAnalysisClient::failing(AnalysisError::ProviderStatus {
        status: 503,
        body: "unavailable".to_string(),
    }));
    let data = b"Employers must keep payroll records.";
    let document = Document::new("payroll.txt".to_string(), ContentType::Text, data.len() as u64);

    let analysis = document_service(&client)
        .analyze_document(data, document, "", ExportFormat::Json, &ExportOptions::default())
        .await
        .unwrap();

    assert_eq!(
        analysis.extracted.normalized,
        "Employers must keep payroll records."
    );
    assert!(matches!(
        analysis.analysis,
        Err(AnalysisError::ProviderStatus { status: 503, .. })
    ));
}

#[tokio::test]
async fn given_unsupported_content_type_when_analyzing_document_then_fails_extraction() {
    let client = Arc::new(MockAnalysisClient::replying(RUBRIC_REPLY));
    let document = Document::new("scan.pdf".to_string(), ContentType::Pdf, 4);

    let result = document_service(&client)
        .analyze_document(b"%PDF", document, "", ExportFormat::Json, &ExportOptions::default())
        .await;

    assert!(matches!(result, Err(FileLoaderError::UnsupportedContentType(_))));
    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn given_whitespace_document_when_analyzing_document_then_reports_no_text() {
    let client = Arc::new(MockAnalysisClient::replying(RUBRIC_REPLY));
    let document = Document::new("blank.txt".to_string(), ContentType::Text, 3);

    let analysis = document_service(&client)
        .analyze_document(b" \n ", document, "", ExportFormat::Json, &ExportOptions::default())
        .await
        .unwrap();

    assert_eq!(analysis.analysis, Ok(AnalysisOutcome::NoTextContent));
    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn given_invalid_utf8_when_analyzing_document_then_fails_extraction() {
    let client = Arc::new(MockAnalysisClient::replying(RUBRIC_REPLY));
    let document = Document::new("bad.txt".to_string(), ContentType::Text, 2);

    let result = document_service(&client)
        .analyze_document(&[0xff, 0xfe], document, "", ExportFormat::Json, &ExportOptions::default())
        .await;

    assert!(matches!(result, Err(FileLoaderError::ExtractionFailed(_))));
}

#[tokio::test]
async fn given_blank_query_when_analyzing_document_then_asks_default_question() {
    let client = Arc::new(MockAnalysisClient::replying(RUBRIC_REPLY));

    service(&client, 15_000)
        .analyze_document_text("Some policy text.", "  ", ExportFormat::Json, &ExportOptions::default())
        .await
        .unwrap();

    assert_eq!(client.last_query().unwrap().query, DEFAULT_QUERY);
}

#[tokio::test]
async fn given_configured_default_query_when_query_is_blank_then_uses_it() {
    let client = Arc::new(MockAnalysisClient::replying(RUBRIC_REPLY));
    let service = service(&client, 15_000).with_default_query("List the retention duties.");

    service
        .analyze_document_text("Some policy text.", "", ExportFormat::Json, &ExportOptions::default())
        .await
        .unwrap();

    let query = client.last_query().unwrap();
    assert_eq!(query.query, "List the retention duties.");
    assert_eq!(query.context.text, "Some policy text.");
}
