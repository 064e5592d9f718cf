mod compliance_prompt;
mod gemini_client;
mod mock_analysis_client;

pub use compliance_prompt::build_compliance_prompt;
pub use gemini_client::{
    DEFAULT_BASE_URL, GeminiClient, GenerateContentResponse, create_gemini_client,
};
pub use mock_analysis_client::MockAnalysisClient;
