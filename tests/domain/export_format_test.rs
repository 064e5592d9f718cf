use regulens::domain::{ExportFormat, UnknownExportFormat};

#[test]
fn given_known_names_when_parsing_strictly_then_returns_format() {
    assert_eq!("json".parse::<ExportFormat>(), Ok(ExportFormat::Json));
    assert_eq!("HTML".parse::<ExportFormat>(), Ok(ExportFormat::Html));
    assert_eq!("markdown".parse::<ExportFormat>(), Ok(ExportFormat::Markdown));
    assert_eq!("md".parse::<ExportFormat>(), Ok(ExportFormat::Markdown));
    assert_eq!(" raw ".parse::<ExportFormat>(), Ok(ExportFormat::Raw));
}

#[test]
fn given_unknown_name_when_parsing_strictly_then_returns_error() {
    assert_eq!(
        "pdf".parse::<ExportFormat>(),
        Err(UnknownExportFormat("pdf".to_string()))
    );
}

#[test]
fn given_unknown_name_when_parsing_leniently_then_falls_back_to_json() {
    assert_eq!(ExportFormat::from_param(Some("xml")), ExportFormat::Json);
}

#[test]
fn given_missing_or_blank_param_when_parsing_leniently_then_defaults_to_json() {
    assert_eq!(ExportFormat::from_param(None), ExportFormat::Json);
    assert_eq!(ExportFormat::from_param(Some("  ")), ExportFormat::Json);
}

#[test]
fn given_known_param_when_parsing_leniently_then_keeps_it() {
    assert_eq!(ExportFormat::from_param(Some("markdown")), ExportFormat::Markdown);
}
