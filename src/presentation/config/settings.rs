use std::env;

#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub model: ModelSettings,
    pub intake: IntakeSettings,
    pub cache: CacheSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct ModelSettings {
    pub base_url: String,
    /// Empty means no external model endpoint; a deterministic local client
    /// is wired in instead.
    pub api_key: String,
    pub chat_model: String,
    pub speech_model: String,
}

#[derive(Debug, Clone)]
pub struct IntakeSettings {
    pub max_file_size_mb: u64,
}

#[derive(Debug, Clone)]
pub struct CacheSettings {
    pub dir: String,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Settings {
    /// Builds settings from environment variables, falling back to defaults
    /// suitable for local development.
    pub fn from_env() -> Self {
        Self {
            server: ServerSettings {
                host: env_or("SERVER_HOST", "0.0.0.0"),
                port: env_or("SERVER_PORT", "8080").parse().unwrap_or(8080),
            },
            model: ModelSettings {
                base_url: env_or("MODEL_BASE_URL", "https://api.openai.com"),
                api_key: env_or("MODEL_API_KEY", ""),
                chat_model: env_or("MODEL_CHAT_MODEL", "gpt-4o-mini"),
                speech_model: env_or("MODEL_SPEECH_MODEL", "tts-1"),
            },
            intake: IntakeSettings {
                max_file_size_mb: env_or("INTAKE_MAX_FILE_SIZE_MB", "50")
                    .parse()
                    .unwrap_or(50),
            },
            cache: CacheSettings {
                dir: env_or("CACHE_DIR", "./data/cache"),
            },
            logging: LoggingSettings {
                level: env_or("LOG_LEVEL", "info"),
                enable_json: env_or("LOG_FORMAT", "plain").to_lowercase() == "json",
            },
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
