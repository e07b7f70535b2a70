//! ChatGallery configuration types and loading
//!
//! Configuration is read once by the entry point from a YAML file (first hit
//! of the fallback chain), then environment variables are layered on top.
//! The resolved LLM settings are passed explicitly to whatever needs them.

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Environment variable overriding `llm.endpoint`
pub const ENV_ENDPOINT: &str = "CHATGALLERY_ENDPOINT";

/// Environment variable overriding `llm.chat-model-id`
pub const ENV_CHAT_MODEL_ID: &str = "CHATGALLERY_CHAT_MODEL_ID";

/// Environment variable overriding `llm.api-key`
pub const ENV_API_KEY: &str = "CHATGALLERY_API_KEY";

/// Environment variable overriding `llm.provider`
pub const ENV_PROVIDER: &str = "CHATGALLERY_PROVIDER";

/// Problems found while resolving the configuration, before any network call
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing configuration value '{key}'. Set llm.{key} in the config file or the {env} environment variable.")]
    Missing { key: &'static str, env: &'static str },

    #[error("Endpoint must be an http(s) URL, got '{0}'")]
    InvalidEndpoint(String),

    #[error("Unknown LLM provider: '{0}'. Supported: openai, azure")]
    UnknownProvider(String),
}

/// Main ChatGallery configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Chat-completion endpoint configuration
    pub llm: LlmConfig,

    /// Sample resource files
    pub resources: ResourcesConfig,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[serde(rename = "log-level")]
    pub log_level: Option<String>,

    /// File the configuration was read from; `None` means defaults
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Config {
    /// Load configuration with fallback chain, then apply environment overrides
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        let mut config = Self::load_file(config_path)?;
        config.apply_env();
        Ok(config)
    }

    fn load_file(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, it must load
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .chatgallery.yml
        let local_config = PathBuf::from(".chatgallery.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/chatgallery/chatgallery.yml (keeps secrets out of the project)
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("chatgallery").join("chatgallery.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let mut config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        config.source = Some(path.as_ref().to_path_buf());
        Ok(config)
    }

    /// Apply process environment overrides
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary lookup; empty values are ignored
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get(ENV_ENDPOINT) {
            debug!("apply_overrides: endpoint from environment");
            self.llm.endpoint = v;
        }
        if let Some(v) = get(ENV_CHAT_MODEL_ID) {
            debug!("apply_overrides: chat model id from environment");
            self.llm.chat_model_id = v;
        }
        if let Some(v) = get(ENV_API_KEY) {
            debug!("apply_overrides: api key from environment");
            self.llm.api_key = Some(v);
        }
        if let Some(v) = get(ENV_PROVIDER) {
            debug!("apply_overrides: provider from environment");
            self.llm.provider = v;
        }
    }
}

/// Which flavour of the chat-completions API the endpoint speaks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    /// OpenAI and compatible servers: `{endpoint}/chat/completions`, bearer auth
    OpenAI,
    /// Azure OpenAI: deployment-scoped URL, `api-key` header
    Azure,
}

impl Provider {
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAI),
            "azure" | "azure-openai" => Ok(Self::Azure),
            other => Err(ConfigError::UnknownProvider(other.to_string())),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenAI => write!(f, "openai"),
            Self::Azure => write!(f, "azure"),
        }
    }
}

/// LLM endpoint configuration as written in the config file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name ("openai" or "azure")
    pub provider: String,

    /// Base URL, e.g. `https://api.openai.com/v1` or `https://myres.openai.azure.com`
    pub endpoint: String,

    /// Model identifier (deployment name for Azure)
    #[serde(rename = "chat-model-id")]
    pub chat_model_id: String,

    /// API key; optional for local endpoints
    #[serde(rename = "api-key")]
    pub api_key: Option<String>,

    /// Azure `api-version` query parameter
    #[serde(rename = "api-version")]
    pub api_version: String,

    /// Maximum tokens per response
    #[serde(rename = "max-tokens")]
    pub max_tokens: u32,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            endpoint: String::new(),
            chat_model_id: String::new(),
            api_key: None,
            api_version: "2024-06-01".to_string(),
            max_tokens: 1024,
            timeout_ms: 120_000,
        }
    }
}

impl LlmConfig {
    /// Check required values and produce the settings a client is built from
    pub fn resolve(&self) -> Result<ResolvedLlmConfig, ConfigError> {
        debug!(provider = %self.provider, "LlmConfig::resolve: called");
        let endpoint = self.endpoint.trim();
        if endpoint.is_empty() {
            return Err(ConfigError::Missing {
                key: "endpoint",
                env: ENV_ENDPOINT,
            });
        }
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ConfigError::InvalidEndpoint(endpoint.to_string()));
        }

        let model = self.chat_model_id.trim();
        if model.is_empty() {
            return Err(ConfigError::Missing {
                key: "chat-model-id",
                env: ENV_CHAT_MODEL_ID,
            });
        }

        let provider = Provider::parse(&self.provider)?;

        Ok(ResolvedLlmConfig {
            provider,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: self.api_key.clone().filter(|k| !k.trim().is_empty()),
            api_version: self.api_version.clone(),
            max_tokens: self.max_tokens,
            timeout_ms: self.timeout_ms,
        })
    }
}

/// Fully validated LLM settings
#[derive(Clone)]
pub struct ResolvedLlmConfig {
    pub provider: Provider,
    /// Endpoint without trailing slash
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    pub api_version: String,
    pub max_tokens: u32,
    pub timeout_ms: u64,
}

impl fmt::Debug for ResolvedLlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedLlmConfig")
            .field("provider", &self.provider)
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_version", &self.api_version)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

/// Resource directory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourcesConfig {
    /// Directory holding text, JSON, prompt and image files used by the samples
    pub dir: PathBuf,
}

impl Default for ResourcesConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("resources"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;

    fn configured() -> LlmConfig {
        LlmConfig {
            endpoint: "https://api.openai.com/v1/".to_string(),
            chat_model_id: "gpt-4o-mini".to_string(),
            api_key: Some("sk-test".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.llm.provider, "openai");
        assert!(config.llm.endpoint.is_empty());
        assert!(config.llm.chat_model_id.is_empty());
        assert_eq!(config.resources.dir, PathBuf::from("resources"));
        assert!(config.log_level.is_none());
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r#"
llm:
  provider: azure
  endpoint: https://myres.openai.azure.com
  chat-model-id: gpt4o-deployment
  api-key: secret
  api-version: 2024-10-21
  max-tokens: 2048
  timeout-ms: 60000

resources:
  dir: /srv/gallery

log-level: DEBUG
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.llm.provider, "azure");
        assert_eq!(config.llm.chat_model_id, "gpt4o-deployment");
        assert_eq!(config.llm.api_key.as_deref(), Some("secret"));
        assert_eq!(config.llm.api_version, "2024-10-21");
        assert_eq!(config.llm.max_tokens, 2048);
        assert_eq!(config.resources.dir, PathBuf::from("/srv/gallery"));
        assert_eq!(config.log_level.as_deref(), Some("DEBUG"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let yaml = r#"
llm:
  chat-model-id: llama3
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.llm.chat_model_id, "llama3");
        assert_eq!(config.llm.provider, "openai");
        assert_eq!(config.llm.max_tokens, 1024);
        assert_eq!(config.resources.dir, PathBuf::from("resources"));
    }

    #[test]
    fn test_resolve_trims_trailing_slash() {
        let resolved = configured().resolve().unwrap();
        assert_eq!(resolved.endpoint, "https://api.openai.com/v1");
        assert_eq!(resolved.model, "gpt-4o-mini");
        assert_eq!(resolved.provider, Provider::OpenAI);
    }

    #[test]
    fn test_resolve_empty_endpoint() {
        let config = LlmConfig {
            endpoint: "   ".to_string(),
            ..configured()
        };
        assert_eq!(
            config.resolve().unwrap_err(),
            ConfigError::Missing {
                key: "endpoint",
                env: ENV_ENDPOINT
            }
        );
    }

    #[test]
    fn test_resolve_empty_model() {
        let config = LlmConfig {
            chat_model_id: String::new(),
            ..configured()
        };
        let err = config.resolve().unwrap_err();
        assert!(matches!(err, ConfigError::Missing { key: "chat-model-id", .. }));
        assert!(err.to_string().contains(ENV_CHAT_MODEL_ID));
    }

    #[test]
    fn test_resolve_rejects_non_http_endpoint() {
        let config = LlmConfig {
            endpoint: "ftp://example.com".to_string(),
            ..configured()
        };
        assert!(matches!(config.resolve(), Err(ConfigError::InvalidEndpoint(_))));
    }

    #[test]
    fn test_resolve_unknown_provider() {
        let config = LlmConfig {
            provider: "palm".to_string(),
            ..configured()
        };
        assert_eq!(config.resolve().unwrap_err(), ConfigError::UnknownProvider("palm".to_string()));
    }

    #[test]
    fn test_resolve_blank_api_key_is_none() {
        let config = LlmConfig {
            api_key: Some("".to_string()),
            ..configured()
        };
        assert!(config.resolve().unwrap().api_key.is_none());
    }

    #[test]
    fn test_resolved_debug_redacts_key() {
        let resolved = configured().resolve().unwrap();
        let shown = format!("{:?}", resolved);
        assert!(!shown.contains("sk-test"));
        assert!(shown.contains("<redacted>"));
    }

    #[test]
    fn test_overrides_take_precedence() {
        let mut config = Config {
            llm: configured(),
            ..Default::default()
        };
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_ENDPOINT, "http://localhost:11434/v1"),
            (ENV_CHAT_MODEL_ID, "llama3"),
            (ENV_API_KEY, ""),
        ]);

        config.apply_overrides(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.llm.endpoint, "http://localhost:11434/v1");
        assert_eq!(config.llm.chat_model_id, "llama3");
        // Empty values do not clobber the file
        assert_eq!(config.llm.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.llm.provider, "openai");
    }

    #[test]
    #[serial]
    fn test_load_explicit_file_then_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gallery.yml");
        fs::write(&path, "llm:\n  endpoint: https://file.example/v1\n  chat-model-id: file-model\n").unwrap();

        // SAFETY: serialized with other environment-touching tests
        unsafe { std::env::set_var(ENV_CHAT_MODEL_ID, "env-model") };
        let config = Config::load(Some(&path));
        unsafe { std::env::remove_var(ENV_CHAT_MODEL_ID) };

        let config = config.unwrap();
        assert_eq!(config.llm.endpoint, "https://file.example/v1");
        assert_eq!(config.llm.chat_model_id, "env-model");
    }

    #[test]
    #[serial]
    fn test_load_explicit_missing_file_errors() {
        let path = PathBuf::from("/no/such/gallery.yml");
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    #[serial]
    fn test_load_records_source_and_log_level() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gallery.yml");
        fs::write(&path, "log-level: DEBUG\nllm:\n  endpoint: http://localhost:1234/v1\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.source.as_deref(), Some(path.as_path()));
        assert_eq!(config.log_level.as_deref(), Some("DEBUG"));
    }

    #[test]
    fn test_default_config_has_no_source() {
        assert!(Config::default().source.is_none());
    }

    #[test]
    fn test_provider_parse() {
        assert_eq!(Provider::parse("OpenAI").unwrap(), Provider::OpenAI);
        assert_eq!(Provider::parse("azure-openai").unwrap(), Provider::Azure);
        assert!(Provider::parse("").is_err());
    }
}
