//! Server configuration loading from file and environment variables.

use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use thiserror::Error;
use wordpan_llm::LlmConfig;
use wordpan_store::SupabaseConfig;
use wordpan_voice::LiveKitConfig;

/// Top-level server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server network settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Supabase project holding users, profiles and decks.
    #[serde(default)]
    pub supabase: SupabaseConfig,

    /// LiveKit server used for voice practice.
    #[serde(default)]
    pub livekit: LiveKitConfig,

    /// Chat model behind the crews.
    #[serde(default)]
    pub llm: LlmConfig,
}

/// Network configuration for the HTTP server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Browser origins allowed to call the API.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "wordpan_server=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8000
}

fn default_cors_origins() -> Vec<String> {
    [
        "http://localhost:5173",
        "http://localhost:3000",
        "http://127.0.0.1:5173",
        "http://127.0.0.1:3000",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Loads configuration from a TOML file, falling back to defaults, then
/// applies environment overrides (see [`apply_env_overrides`]).
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = p, "config file not found, using defaults");
                Config::default()
            }
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => Config::default(),
    };

    apply_env_overrides(&mut config, |name| std::env::var(name).ok());
    Ok(config)
}

/// Environment variable overrides:
/// - `WORDPAN_HOST`, `PORT` override `server.host` and `server.port`
/// - `WORDPAN_CORS_ORIGINS` (comma-separated) overrides `server.cors_origins`
/// - `WORDPAN_LOG_LEVEL`, `WORDPAN_LOG_JSON` override `logging`
/// - `SUPABASE_URL`, `SUPABASE_ANON_KEY` override `supabase`
/// - `LIVEKIT_URL`, `LIVEKIT_API_KEY`, `LIVEKIT_API_SECRET`, `LIVEKIT_AGENT_NAME`
///   override `livekit`
/// - `OPENAI_API_KEY`, `OPENAI_BASE_URL`, `WORDPAN_LLM_MODEL` override `llm`
pub fn apply_env_overrides(config: &mut Config, var: impl Fn(&str) -> Option<String>) {
    if let Some(host) = var("WORDPAN_HOST") {
        if let Ok(parsed) = host.parse() {
            config.server.host = parsed;
        }
    }
    if let Some(port) = var("PORT") {
        if let Ok(parsed) = port.parse() {
            config.server.port = parsed;
        }
    }
    if let Some(origins) = var("WORDPAN_CORS_ORIGINS") {
        config.server.cors_origins = origins
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(String::from)
            .collect();
    }
    if let Some(level) = var("WORDPAN_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(json) = var("WORDPAN_LOG_JSON") {
        config.logging.json = json == "true" || json == "1";
    }

    let strings: [(&str, &mut String); 9] = [
        ("SUPABASE_URL", &mut config.supabase.url),
        ("SUPABASE_ANON_KEY", &mut config.supabase.anon_key),
        ("LIVEKIT_URL", &mut config.livekit.url),
        ("LIVEKIT_API_KEY", &mut config.livekit.api_key),
        ("LIVEKIT_API_SECRET", &mut config.livekit.api_secret),
        ("LIVEKIT_AGENT_NAME", &mut config.livekit.agent_name),
        ("OPENAI_API_KEY", &mut config.llm.api_key),
        ("OPENAI_BASE_URL", &mut config.llm.base_url),
        ("WORDPAN_LLM_MODEL", &mut config.llm.model),
    ];
    for (name, field) in strings {
        if let Some(value) = var(name) {
            *field = value;
        }
    }
}
