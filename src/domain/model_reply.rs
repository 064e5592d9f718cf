/// Safety verdict attached to a provider reply.
///
/// `categories` and `scores` are parallel: `scores[i]` belongs to `categories[i]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SafetyInfo {
    pub categories: Vec<String>,
    pub blocked: bool,
    pub scores: Vec<f32>,
}

/// Untouched text returned by the generative model.
///
/// When `safety.blocked` is set the text may be empty or cut short.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawModelReply {
    pub text: String,
    pub safety: SafetyInfo,
}

impl RawModelReply {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            safety: SafetyInfo::default(),
        }
    }

    pub fn blocked(text: impl Into<String>, safety: SafetyInfo) -> Self {
        Self {
            text: text.into(),
            safety: SafetyInfo {
                blocked: true,
                ..safety
            },
        }
    }
}
