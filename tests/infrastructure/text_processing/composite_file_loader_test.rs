use std::sync::Arc;

use regulens::application::ports::{FileLoader, FileLoaderError};
use regulens::domain::{ContentType, Document};
use regulens::infrastructure::text_processing::{CompositeFileLoader, PlainTextAdapter};

#[tokio::test]
async fn given_text_document_when_extracting_then_routes_to_text_loader() {
    let loader = CompositeFileLoader::with_default_loaders();
    let data = b"Payroll records must be kept for three years.";
    let document = Document::new("payroll.txt".to_string(), ContentType::Text, data.len() as u64);

    let text = loader.extract_text(data, &document).await.unwrap();

    assert_eq!(text, "Payroll records must be kept for three years.");
}

#[tokio::test]
async fn given_unregistered_content_type_when_extracting_then_returns_unsupported() {
    let text: Arc<dyn FileLoader> = Arc::new(PlainTextAdapter);
    let loader = CompositeFileLoader::new(vec![(ContentType::Text, text)]);
    let document = Document::new("scan.pdf".to_string(), ContentType::Pdf, 4);

    let result = loader.extract_text(b"%PDF", &document).await;

    assert!(matches!(
        result,
        Err(FileLoaderError::UnsupportedContentType(mime)) if mime == "application/pdf"
    ));
}

#[tokio::test]
async fn given_corrupt_pdf_when_extracting_then_returns_extraction_failed() {
    let loader = CompositeFileLoader::with_default_loaders();
    let data = b"this is not a pdf";
    let document = Document::new("broken.pdf".to_string(), ContentType::Pdf, data.len() as u64);

    let result = loader.extract_text(data, &document).await;

    assert!(matches!(result, Err(FileLoaderError::ExtractionFailed(_))));
}
