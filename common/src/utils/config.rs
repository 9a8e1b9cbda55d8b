use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Runtime configuration, built once at startup and handed to each client.
///
/// Ticketing credentials default to empty strings: a missing value is not a
/// startup failure, it surfaces later as a failed upstream call.
#[derive(Clone, Deserialize, Debug)]
pub struct AppConfig {
    #[serde(default)]
    pub servicenow_instance: String,
    #[serde(default)]
    pub servicenow_username: String,
    #[serde(default)]
    pub servicenow_password: String,
    #[serde(default = "default_ollama_model")]
    pub ollama_model: String,
    #[serde(default = "default_ollama_url")]
    pub ollama_url: String,
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    /// Where the presentation page posts messages. Derived from `http_port` when unset.
    #[serde(default)]
    pub chat_endpoint: Option<String>,
}

fn default_ollama_model() -> String {
    "llama3".to_string()
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

const fn default_http_port() -> u16 {
    5000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            servicenow_instance: String::new(),
            servicenow_username: String::new(),
            servicenow_password: String::new(),
            ollama_model: default_ollama_model(),
            ollama_url: default_ollama_url(),
            http_port: default_http_port(),
            chat_endpoint: None,
        }
    }
}

impl AppConfig {
    pub fn chat_endpoint(&self) -> String {
        self.chat_endpoint
            .clone()
            .unwrap_or_else(|| format!("http://127.0.0.1:{}/chat", self.http_port))
    }
}

pub fn get_config() -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::with_name("config").required(false))
        .add_source(Environment::default())
        .build()?;

    config.try_deserialize()
}
