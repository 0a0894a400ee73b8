//! Configuration management for the LATAM Agent.
//!
//! Configuration is merged from several sources, later sources winning:
//! - Built-in defaults
//! - A YAML config file (`LATAM_CONFIG`, or `latam.yaml` in the working directory)
//! - Environment variables
//! - Command-line flags

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Providers the generation layer knows how to build.
pub const KNOWN_PROVIDERS: [&str; 2] = ["openai", "ollama"];

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the JSON knowledge base (array of documents)
    pub kb_path: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Address the HTTP server binds to
    pub bind_addr: String,

    /// LLM provider ("openai" or "ollama")
    pub provider: String,

    /// Model identifier
    pub model: String,

    /// API key for the LLM provider
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Name of the environment variable holding the API key
    pub api_key_env: String,

    /// Custom provider endpoint
    pub endpoint: Option<String>,

    /// HTTP timeout for the generation call, in seconds
    pub timeout_secs: u64,

    /// Maximum number of documents handed to the generator
    pub max_context_docs: usize,

    /// Directory with prompt definition overrides
    pub prompts_dir: Option<PathBuf>,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,

    /// Domain table overrides for the scope detector and scorer
    pub domain: DomainOverrides,
}

/// Replacements for the built-in domain tables.
///
/// `None` keeps the built-in table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DomainOverrides {
    /// Country and territory names recognized as in scope
    #[serde(rename = "latamCountries", default)]
    pub latam_countries: Option<Vec<String>>,

    /// Markers that put a question outside the region
    #[serde(rename = "nonLatamMarkers", default)]
    pub non_latam_markers: Option<Vec<String>>,

    /// Topic name to trigger keywords
    #[serde(rename = "topicKeywords", default)]
    pub topic_keywords: Option<BTreeMap<String, Vec<String>>>,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    knowledge: Option<KnowledgeSection>,
    server: Option<ServerSection>,
    llm: Option<LlmSection>,
    prompts: Option<PromptsSection>,
    logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct KnowledgeSection {
    path: Option<String>,
    #[serde(rename = "maxContextDocs")]
    max_context_docs: Option<usize>,
    #[serde(rename = "latamCountries")]
    latam_countries: Option<Vec<String>>,
    #[serde(rename = "nonLatamMarkers")]
    non_latam_markers: Option<Vec<String>>,
    #[serde(rename = "topicKeywords")]
    topic_keywords: Option<BTreeMap<String, Vec<String>>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ServerSection {
    bind: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct LlmSection {
    provider: Option<String>,
    model: Option<String>,
    endpoint: Option<String>,
    #[serde(rename = "apiKeyEnv")]
    api_key_env: Option<String>,
    timeout: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PromptsSection {
    dir: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct LoggingSection {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            kb_path: PathBuf::from("data").join("knowledge_base.json"),
            config_file: None,
            bind_addr: "127.0.0.1:8000".to_string(),
            provider: "openai".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key: None,
            api_key_env: "OPENAI_API_KEY".to_string(),
            endpoint: None,
            timeout_secs: 30,
            max_context_docs: 4,
            prompts_dir: None,
            log_level: None,
            verbose: false,
            no_color: false,
            domain: DomainOverrides::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the config file, environment variables and defaults.
    ///
    /// Environment variables:
    /// - `LATAM_KB_PATH`: Knowledge base JSON path
    /// - `LATAM_BIND`: Server bind address
    /// - `LATAM_PROVIDER`: LLM provider
    /// - `LATAM_MODEL` / `OPENAI_MODEL`: Model identifier
    /// - `LATAM_LLM_ENDPOINT`: Provider endpoint
    /// - `LATAM_LLM_TIMEOUT_SECS`: Generation timeout
    /// - `MAX_CONTEXT_DOCS`: Retrieval top-k
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// The API key is read from the variable named by `api_key_env`
    /// (`OPENAI_API_KEY` unless the config file says otherwise).
    ///
    /// `config_file` is the explicit config path (`--config` / `LATAM_CONFIG`);
    /// without it, `latam.yaml` in the working directory is used if present.
    pub fn load(config_file: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self {
            config_file,
            ..Self::default()
        };

        let config_path = config
            .config_file
            .clone()
            .unwrap_or_else(|| PathBuf::from("latam.yaml"));

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        } else if config.config_file.is_some() {
            return Err(AppError::Config(format!(
                "Config file does not exist: {:?}",
                config_path
            )));
        }

        // Environment variables override YAML config
        if let Ok(path) = std::env::var("LATAM_KB_PATH") {
            config.kb_path = PathBuf::from(path);
        }

        if let Ok(bind) = std::env::var("LATAM_BIND") {
            config.bind_addr = bind;
        }

        if let Ok(provider) = std::env::var("LATAM_PROVIDER") {
            config.provider = provider;
        }

        if let Ok(model) = std::env::var("OPENAI_MODEL") {
            config.model = model;
        }

        if let Ok(model) = std::env::var("LATAM_MODEL") {
            config.model = model;
        }

        if let Ok(endpoint) = std::env::var("LATAM_LLM_ENDPOINT") {
            config.endpoint = Some(endpoint);
        }

        if let Ok(timeout) = std::env::var("LATAM_LLM_TIMEOUT_SECS") {
            config.timeout_secs = timeout.parse().map_err(|_| {
                AppError::Config(format!("Invalid LATAM_LLM_TIMEOUT_SECS: {}", timeout))
            })?;
        }

        if let Ok(max_docs) = std::env::var("MAX_CONTEXT_DOCS") {
            config.max_context_docs = max_docs.parse().map_err(|_| {
                AppError::Config(format!("Invalid MAX_CONTEXT_DOCS: {}", max_docs))
            })?;
        }

        config.api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty());
        config.log_level = std::env::var("RUST_LOG").ok().or(config.log_level);

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge a YAML configuration file into this config.
    pub fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();
        result.config_file = Some(path.to_path_buf());

        if let Some(knowledge) = config_file.knowledge {
            if let Some(path) = knowledge.path {
                result.kb_path = PathBuf::from(path);
            }
            if let Some(max_docs) = knowledge.max_context_docs {
                result.max_context_docs = max_docs;
            }
            if knowledge.latam_countries.is_some() {
                result.domain.latam_countries = knowledge.latam_countries;
            }
            if knowledge.non_latam_markers.is_some() {
                result.domain.non_latam_markers = knowledge.non_latam_markers;
            }
            if knowledge.topic_keywords.is_some() {
                result.domain.topic_keywords = knowledge.topic_keywords;
            }
        }

        if let Some(bind) = config_file.server.and_then(|s| s.bind) {
            result.bind_addr = bind;
        }

        if let Some(llm) = config_file.llm {
            if let Some(provider) = llm.provider {
                result.provider = provider;
            }
            if let Some(model) = llm.model {
                result.model = model;
            }
            if llm.endpoint.is_some() {
                result.endpoint = llm.endpoint;
            }
            if let Some(api_key_env) = llm.api_key_env {
                result.api_key_env = api_key_env;
            }
            if let Some(timeout) = llm.timeout {
                result.timeout_secs = timeout;
            }
        }

        if let Some(dir) = config_file.prompts.and_then(|p| p.dir) {
            result.prompts_dir = Some(PathBuf::from(dir));
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// Command-line flags take precedence over environment variables.
    pub fn with_overrides(
        mut self,
        kb_path: Option<PathBuf>,
        provider: Option<String>,
        model: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(kb_path) = kb_path {
            self.kb_path = kb_path;
        }

        if let Some(provider) = provider {
            self.provider = provider;
        }

        if let Some(model) = model {
            self.model = model;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Validate configuration.
    ///
    /// Missing API keys are not an error here: the service still answers
    /// scope and evidence questions and reports generation as unavailable.
    pub fn validate(&self) -> AppResult<()> {
        let provider = self.provider.to_lowercase();
        if !KNOWN_PROVIDERS.contains(&provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown provider: {}. Supported: {}",
                self.provider,
                KNOWN_PROVIDERS.join(", ")
            )));
        }

        if self.max_context_docs == 0 {
            return Err(AppError::Config(
                "maxContextDocs must be at least 1".to_string(),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(AppError::Config(
                "LLM timeout must be at least 1 second".to_string(),
            ));
        }

        Ok(())
    }
}
