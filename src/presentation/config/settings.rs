use config::{Config, ConfigError, File};
use serde::Deserialize;

use super::Environment;
use crate::application::services::{DEFAULT_MAX_CONTEXT_LENGTH, DEFAULT_QUERY};
use crate::domain::ExportOptions;
use crate::infrastructure::llm::DEFAULT_BASE_URL;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub llm: LlmSettings,
    pub analysis: AnalysisSettings,
    pub upload: UploadSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisSettings {
    pub max_context_length: usize,
    pub include_raw_text: bool,
    pub default_query: String,
}

impl AnalysisSettings {
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            include_raw_text: self.include_raw_text,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadSettings {
    pub max_file_size_mb: usize,
}

impl UploadSettings {
    pub fn max_file_size_bytes(&self) -> usize {
        self.max_file_size_mb * 1024 * 1024
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Settings {
    /// Layers defaults, `appsettings.{environment}.toml` (optional) and
    /// `APP_`-prefixed environment variables, e.g. `APP_LLM__API_KEY`.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        let file_name = format!("appsettings.{}", environment.as_str());

        Self::defaults()?
            .add_source(File::with_name(&file_name).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }

    fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("llm.api_key", "")?
            .set_default("llm.base_url", DEFAULT_BASE_URL)?
            .set_default("llm.model", "gemini-1.5-flash")?
            .set_default("llm.temperature", 0.2)?
            .set_default("llm.max_output_tokens", 2048)?
            .set_default("llm.timeout_secs", 60)?
            .set_default("analysis.max_context_length", DEFAULT_MAX_CONTEXT_LENGTH as u64)?
            .set_default("analysis.include_raw_text", false)?
            .set_default("analysis.default_query", DEFAULT_QUERY)?
            .set_default("upload.max_file_size_mb", 10)?
            .set_default("logging.level", "info")?
            .set_default("logging.enable_json", false)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            llm: LlmSettings {
                api_key: String::new(),
                base_url: DEFAULT_BASE_URL.to_string(),
                model: "gemini-1.5-flash".to_string(),
                temperature: 0.2,
                max_output_tokens: 2048,
                timeout_secs: 60,
            },
            analysis: AnalysisSettings {
                max_context_length: DEFAULT_MAX_CONTEXT_LENGTH,
                include_raw_text: false,
                default_query: DEFAULT_QUERY.to_string(),
            },
            upload: UploadSettings {
                max_file_size_mb: 10,
            },
            logging: LoggingSettings {
                level: "info".to_string(),
                enable_json: false,
            },
        }
    }
}
