use mdlift_understanding::vision::{DEFAULT_API_BASE, DEFAULT_MODEL};

/// mdlift runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// ZhipuAI API key; recognition fails per image when unset.
    pub zhipuai_api_key: Option<String>,
    /// Vision model name
    pub model: String,
    /// Chat-completions endpoint base
    pub api_base: String,
    /// Log level
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        Self {
            zhipuai_api_key: std::env::var("ZHIPUAI_API_KEY").ok(),
            model: std::env::var("ZHIPUAI_MODEL")
                .unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            api_base: std::env::var("ZHIPUAI_API_BASE")
                .unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
            log_level: std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info".to_string()),
        }
    }
}
