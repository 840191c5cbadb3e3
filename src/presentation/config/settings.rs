use std::path::PathBuf;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File};
use serde::Deserialize;

use crate::application::services::UnrecognizedPolicy;

use super::Environment;

const ENV_PREFIX: &str = "APP";
const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub llm: LlmSettings,
    pub extraction: ExtractionSettings,
    pub form: FormSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub cors_origin: Option<String>,
    pub max_upload_size_mb: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionSettings {
    pub allowed_extensions: Vec<String>,
    #[serde(default)]
    pub unrecognized_policy: UnrecognizedPolicy,
    #[serde(default)]
    pub staging_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FormSettings {
    pub enabled: bool,
    #[serde(default)]
    pub url: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Settings {
    /// Defaults, then `appsettings.toml`, then `appsettings.<env>.toml`, then
    /// `APP__SECTION__KEY` variables. `OPENAI_API_KEY` wins for the model key.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Self::builder(environment)?
            .set_override_option("llm.api_key", std::env::var("OPENAI_API_KEY").ok())?
            .build()?
            .try_deserialize()
    }

    pub fn builder(environment: Environment) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let env_file = format!("appsettings.{}", environment.as_str());

        Ok(Self::defaults()?
            .add_source(File::with_name("appsettings").required(false))
            .add_source(File::with_name(&env_file).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator(ENV_SEPARATOR)
                    .list_separator(",")
                    .with_list_parse_key("extraction.allowed_extensions")
                    .try_parsing(true),
            ))
    }

    pub fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("server.max_upload_size_mb", 25)?
            .set_default("llm.api_key", "")?
            .set_default("llm.base_url", "https://api.openai.com/v1")?
            .set_default("llm.model", "gpt-4o-mini")?
            .set_default("llm.max_tokens", 1000)?
            .set_default("llm.temperature", 0.1)?
            .set_default("llm.timeout_secs", 60)?
            .set_default("extraction.allowed_extensions", vec![".pdf", ".xlsx", ".xls"])?
            .set_default("extraction.unrecognized_policy", "skip")?
            .set_default("form.enabled", false)?
            .set_default("form.timeout_secs", 10)?
            .set_default("logging.level", "info")?
            .set_default("logging.enable_json", false)
    }

    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder.build()?.try_deserialize()
    }
}
