use std::{env, path::PathBuf, time::Duration};

pub const DEFAULT_API_URL: &str = "https://backend-c2f9.onrender.com/api";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub stale_time: Duration,
    pub gc_time: Duration,
    pub retry_base_delay: Duration,
    pub session_file: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let api_base_url = env::var("SERENITY_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let session_file = env::var("SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(".serenity-session.json"));

        Ok(Self {
            host,
            port,
            api_base_url,
            request_timeout: Duration::from_secs(env_u64("SERENITY_REQUEST_TIMEOUT_SECS", 20)?),
            stale_time: Duration::from_secs(env_u64("SERENITY_STALE_TIME_SECS", 300)?),
            gc_time: Duration::from_secs(env_u64("SERENITY_GC_TIME_SECS", 600)?),
            retry_base_delay: Duration::from_millis(env_u64("SERENITY_RETRY_DELAY_MS", 1000)?),
            session_file,
        })
    }

    /// Configuration pointing at an arbitrary API, with the library defaults.
    pub fn for_api(api_base_url: impl Into<String>) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(20),
            stale_time: Duration::from_secs(300),
            gc_time: Duration::from_secs(600),
            retry_base_delay: Duration::from_millis(1000),
            session_file: PathBuf::from(".serenity-session.json"),
        }
    }
}

fn env_u64(name: &str, default: u64) -> anyhow::Result<u64> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|err| anyhow::anyhow!("{name} must be an unsigned integer: {err}")),
        Err(_) => Ok(default),
    }
}
