//! Configuration for the flash-card backend

use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// Generative AI configuration
    pub ai: AiConfig,
}

impl AppConfig {
    /// Load defaults and apply environment overrides.
    ///
    /// The AI key is injected here and passed into the generator at
    /// construction; nothing reads it from process globals afterwards.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(host) = std::env::var("STUDYDECK_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = std::env::var("STUDYDECK_PORT") {
            if let Ok(port) = port.parse() {
                config.server.port = port;
            }
        }
        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            config.ai.api_key = key;
        }
        if let Ok(url) = std::env::var("GEMINI_BASE_URL") {
            config.ai.base_url = url;
        }
        if let Ok(model) = std::env::var("GEMINI_MODEL") {
            config.ai.model = model;
        }

        config
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Maximum upload size in bytes (default: 20MB)
    pub max_upload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            max_upload_size: 20 * 1024 * 1024, // 20MB
        }
    }
}

/// Generative AI (Gemini) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// API key for the generative language endpoint
    pub api_key: String,
    /// Base URL of the generative language API
    pub base_url: String,
    /// Generation model name
    pub model: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Minimum number of cards the prompt asks for
    pub min_cards: usize,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-1.5-flash".to_string(),
            timeout_secs: 60,
            min_cards: 5,
        }
    }
}
