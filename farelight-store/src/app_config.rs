use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub dataset: DatasetConfig,
    pub search: SearchConfig,
    pub llm: LlmConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatasetConfig {
    /// Path to the flights JSON file, loaded once at startup.
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
}

fn default_limit() -> usize {
    10
}
fn default_max_limit() -> usize {
    50
}

#[derive(Debug, Deserialize, Clone)]
pub struct LlmConfig {
    /// OpenAI-compatible endpoint root, e.g. http://localhost:11434/v1
    pub base_url: String,
    pub model: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_ms")]
    pub request_timeout_ms: u64,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
    #[serde(default = "default_max_tool_rounds")]
    pub max_tool_rounds: usize,
}

fn default_timeout_ms() -> u64 {
    60_000
}
fn default_temperature() -> f32 {
    0.7
}
fn default_max_output_tokens() -> u32 {
    1024
}
fn default_max_tool_rounds() -> usize {
    4
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Add in the current environment file
            // Default to 'development' env
            // Note that this file is _optional_
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add in a local configuration file
            // This file shouldn't be checked in to git
            .add_source(config::File::with_name("config/local").required(false))
            // Add in settings from the environment (with a prefix of FARELIGHT)
            // Eg.. `FARELIGHT__SERVER__PORT=8080` would set the server port
            .add_source(config::Environment::with_prefix("FARELIGHT").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        [server]
        port = 3000

        [dataset]
        path = "data/flights.json"

        [search]

        [llm]
        base_url = "http://localhost:11434/v1"
        model = "qwen2.5:latest"
    "#;

    fn from_toml(toml: &str) -> Config {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .expect("Failed to build config")
            .try_deserialize()
            .expect("Failed to deserialize config")
    }

    #[test]
    fn test_minimal_config_fills_defaults() {
        let cfg = from_toml(MINIMAL);
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.search.default_limit, 10);
        assert_eq!(cfg.search.max_limit, 50);
        assert_eq!(cfg.llm.request_timeout_ms, 60_000);
        assert_eq!(cfg.llm.max_tool_rounds, 4);
        assert!(cfg.llm.api_key.is_none());
    }

    #[test]
    fn test_explicit_values_override_defaults() {
        let toml = r#"
            [server]
            port = 8080

            [dataset]
            path = "fixtures/two.json"

            [search]
            default_limit = 5
            max_limit = 20

            [llm]
            base_url = "http://llm.internal/v1"
            model = "gpt-4-turbo"
            api_key = "sk-test"
            temperature = 0.2
        "#;
        let cfg = from_toml(toml);
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.search.default_limit, 5);
        assert_eq!(cfg.search.max_limit, 20);
        assert_eq!(cfg.llm.api_key.as_deref(), Some("sk-test"));
        assert!((cfg.llm.temperature - 0.2).abs() < f32::EPSILON);
    }
}
