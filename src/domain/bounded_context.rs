/// Normalized text cut down to the character budget sent to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedContext {
    pub text: String,
    pub truncated: bool,
    pub original_length: usize,
    pub sent_length: usize,
}

impl BoundedContext {
    pub fn empty() -> Self {
        Self {
            text: String::new(),
            truncated: false,
            original_length: 0,
            sent_length: 0,
        }
    }
}
