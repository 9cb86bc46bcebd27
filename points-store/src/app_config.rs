use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub api: ApiConfig,
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
    #[serde(default)]
    pub views: ViewsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

/// Upstream flight search service. `base_url` is the only setting the
/// results pipeline itself depends on.
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_timeout() -> u64 { 30 }

#[derive(Debug, Deserialize, Clone)]
pub struct DiagnosticsConfig {
    pub channel_capacity: usize,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self { channel_capacity: 100 }
    }
}

/// Results views nobody has touched for `idle_ttl_seconds` are evicted.
#[derive(Debug, Deserialize, Clone)]
pub struct ViewsConfig {
    #[serde(default = "default_idle_ttl")]
    pub idle_ttl_seconds: u64,
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,
}

fn default_idle_ttl() -> u64 { 900 }
fn default_sweep_interval() -> u64 { 60 }

impl Default for ViewsConfig {
    fn default() -> Self {
        Self {
            idle_ttl_seconds: default_idle_ttl(),
            sweep_interval_seconds: default_sweep_interval(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Per-environment overrides, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Developer overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg.. `POINTS__API__BASE_URL=https://...` sets `api.base_url`
            .add_source(config::Environment::with_prefix("POINTS").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
