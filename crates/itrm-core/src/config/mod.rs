//! Configuration for itrm.
//!
//! Loads typed configuration from `./config.json` or `~/.itrm/config.json`,
//! then lets environment variables override the two secrets:
//! `OPENAI_API_KEY` for the LLM and `BRAVE_API_KEY` for web search.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::product::{ComparisonEntry, ProductCatalog};

pub const LLM_KEY_ENV: &str = "OPENAI_API_KEY";
pub const SEARCH_KEY_ENV: &str = "BRAVE_API_KEY";

const PLACEHOLDER_MARKERS: &[&str] = &["YOUR_", "sk-YOUR"];

fn is_real_key(key: &str) -> bool {
    !key.trim().is_empty() && !PLACEHOLDER_MARKERS.iter().any(|p| key.contains(p))
}

/// Root configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub providers: ProvidersConfig,
    pub agents: AgentsConfig,
    pub tools: ToolsConfig,
    pub product: ProductConfig,
}

impl Config {
    /// Load configuration.
    ///
    /// Priority:
    /// 1. local `config.json` in the current directory
    /// 2. `~/.itrm/config.json`
    /// 3. built-in defaults
    ///
    /// Environment variables are applied on top in every case.
    pub fn load() -> Result<Self, ConfigError> {
        let paths = [PathBuf::from("config.json"), Self::default_path()];

        let mut config = match paths.iter().find(|p| p.exists()) {
            Some(path) => {
                tracing::debug!("Loading config from: {}", path.display());
                Self::load_from(path)?
            }
            None => Config::default(),
        };
        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Load configuration from a specific path, without env overrides.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Override secrets from the environment. `lookup` is `std::env::var`
    /// in production.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup(LLM_KEY_ENV).filter(|k| !k.is_empty()) {
            tracing::info!("Using LLM API key from environment variable");
            self.providers
                .openai
                .get_or_insert_with(ProviderEntry::default)
                .api_key = key;
        }
        if let Some(key) = lookup(SEARCH_KEY_ENV).filter(|k| !k.is_empty()) {
            tracing::info!("Using search API key from environment variable");
            self.tools.web_search.api_key = key;
        }
    }

    pub fn default_path() -> PathBuf {
        Self::config_dir().join("config.json")
    }

    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".itrm")
    }

    /// Write the default config template to disk.
    pub fn write_default_template() -> anyhow::Result<PathBuf> {
        let path = Self::default_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let template = serde_json::json!({
            "providers": {
                "openai": {
                    "apiKey": "sk-YOUR_KEY_HERE"
                }
            },
            "agents": {
                "defaults": {
                    "model": AgentDefaults::default().model
                }
            },
            "tools": {
                "webSearch": {
                    "apiKey": "YOUR_BRAVE_KEY_HERE"
                }
            },
            "product": {
                "mode": "agent"
            }
        });

        std::fs::write(&path, serde_json::to_string_pretty(&template)?)?;
        Ok(path)
    }

    /// Validate configuration and return every problem found.
    ///
    /// In agent mode both credentials are mandatory. Static mode needs
    /// neither.
    pub fn validate(&self) -> Result<(), Vec<ConfigError>> {
        let mut errors = Vec::new();

        if self.product.mode == ProductMode::Agent {
            if self.providers.find_active().is_none() {
                errors.push(ConfigError::MissingCredential {
                    name: "LLM API key",
                    env_var: LLM_KEY_ENV,
                    config_key: "providers.<name>.apiKey",
                });
            }
            if !is_real_key(&self.tools.web_search.api_key) {
                errors.push(ConfigError::MissingCredential {
                    name: "search API key",
                    env_var: SEARCH_KEY_ENV,
                    config_key: "tools.webSearch.apiKey",
                });
            }
            if self.agents.defaults.model.trim().is_empty() {
                errors.push(ConfigError::InvalidValue {
                    field: "agents.defaults.model",
                    reason: "must not be empty".into(),
                });
            }
            if self.agents.defaults.max_tool_iterations == 0 {
                errors.push(ConfigError::InvalidValue {
                    field: "agents.defaults.maxToolIterations",
                    reason: "must be at least 1".into(),
                });
            }
            if self.agents.defaults.timeout_seconds == 0 {
                errors.push(ConfigError::InvalidValue {
                    field: "agents.defaults.timeoutSeconds",
                    reason: "must be at least 1".into(),
                });
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

// ── Provider Configuration ──────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProviderEntry {
    pub api_key: String,
    pub api_base: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    pub openai: Option<ProviderEntry>,
    pub openrouter: Option<ProviderEntry>,
    pub groq: Option<ProviderEntry>,
    pub deepseek: Option<ProviderEntry>,
}

impl ProvidersConfig {
    /// First provider with a real (non-placeholder) API key.
    pub fn find_active(&self) -> Option<(&'static str, &ProviderEntry)> {
        [
            ("openai", &self.openai),
            ("openrouter", &self.openrouter),
            ("groq", &self.groq),
            ("deepseek", &self.deepseek),
        ]
        .into_iter()
        .find_map(|(name, entry)| {
            entry
                .as_ref()
                .filter(|e| is_real_key(&e.api_key))
                .map(|e| (name, e))
        })
    }
}

// ── Agent Configuration ─────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AgentDefaults {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub max_tool_iterations: u32,
    pub timeout_seconds: u64,
}

impl Default for AgentDefaults {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".into(),
            max_tokens: 2048,
            temperature: 0.2,
            max_tool_iterations: 6,
            timeout_seconds: 60,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AgentsConfig {
    pub defaults: AgentDefaults,
}

// ── Tools Configuration ─────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ToolsConfig {
    pub web_search: WebSearchConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WebSearchConfig {
    pub api_key: String,
    pub max_results: u32,
}

impl Default for WebSearchConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            max_results: 5,
        }
    }
}

// ── Product Configuration ───────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductMode {
    #[default]
    Agent,
    Static,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProductConfig {
    pub mode: ProductMode,
    /// Replaces the built-in comparison catalog when set.
    pub catalog: Option<Vec<ComparisonEntry>>,
}

impl ProductConfig {
    pub fn catalog(&self) -> ProductCatalog {
        match &self.catalog {
            Some(entries) => ProductCatalog::new(entries.clone()),
            None => ProductCatalog::default(),
        }
    }
}
