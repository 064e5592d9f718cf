use regulens::domain::{ContentType, Document, DocumentId};

#[test]
fn given_new_document_when_created_then_has_unique_id() {
    let first = Document::new("a.txt".to_string(), ContentType::Text, 10);
    let second = Document::new("a.txt".to_string(), ContentType::Text, 10);

    assert_ne!(first.id, second.id);
    assert_eq!(first.size_bytes, 10);
}

#[test]
fn given_caller_issued_id_when_creating_document_then_keeps_it() {
    let id = DocumentId::new();

    let document = Document::with_id(id, "lease.pdf".to_string(), ContentType::Pdf, 2048);

    assert_eq!(document.id, id);
    assert_eq!(document.id.to_string(), id.as_uuid().to_string());
}

#[test]
fn given_supported_mime_types_when_parsing_then_maps_to_content_type() {
    assert_eq!(ContentType::from_mime("application/pdf"), Some(ContentType::Pdf));
    assert_eq!(ContentType::from_mime("text/plain; charset=utf-8"), Some(ContentType::Text));
    assert_eq!(ContentType::from_mime("TEXT/MARKDOWN"), Some(ContentType::Text));
}

#[test]
fn given_unsupported_mime_type_when_parsing_then_returns_none() {
    assert_eq!(ContentType::from_mime("image/png"), None);
    assert_eq!(ContentType::from_mime("application/octet-stream"), None);
}

#[test]
fn given_filename_extension_when_parsing_then_maps_to_content_type() {
    assert_eq!(ContentType::from_filename("Policy.PDF"), Some(ContentType::Pdf));
    assert_eq!(ContentType::from_filename("notes.md"), Some(ContentType::Text));
    assert_eq!(ContentType::from_filename("README"), None);
    assert_eq!(ContentType::from_filename("photo.jpg"), None);
}
