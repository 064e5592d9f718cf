/// Text pulled out of one document, before and after whitespace normalization.
///
/// `length` counts characters of `normalized`, not bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub raw: String,
    pub normalized: String,
    pub length: usize,
}

impl ExtractedText {
    /// An empty normalized text means there is nothing to analyze.
    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }
}
