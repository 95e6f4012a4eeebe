use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

pub const DEFAULT_RELOAD_INTERVAL_SECS: u64 = 60;
const DEFAULT_WORKER_THREADS: usize = 4;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub quotes: QuotesConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
    /// Peers whose `X-Forwarded-For` header is trusted. Empty disables it.
    #[serde(default)]
    pub trusted_proxies: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            worker_threads: Some(DEFAULT_WORKER_THREADS),
            trusted_proxies: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuotesConfig {
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,
    /// Seconds between background reloads; `<= 0` means the default.
    #[serde(default)]
    pub reload_interval_secs: i64,
    #[serde(default)]
    pub read_only: bool,
}

impl Default for QuotesConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            reload_interval_secs: DEFAULT_RELOAD_INTERVAL_SECS as i64,
            read_only: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { format: default_log_format() }
    }
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 8080 }
fn default_data_path() -> PathBuf { PathBuf::from("data/quotes.json") }
fn default_log_format() -> String { "compact".into() }

/// Load from `CONFIG_PATH` (default `config.toml`). A missing file yields defaults.
pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    if !std::path::Path::new(&path).exists() {
        return Ok(AppConfig::default());
    }
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    let cfg: AppConfig = toml::from_str(&content).with_context(|| format!("parsing {path}"))?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.apply_env_overrides();
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// `SERVER_HOST` / `SERVER_PORT` take precedence over the file.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            self.server.port = port;
        }
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.quotes.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(DEFAULT_WORKER_THREADS),
        }
        self.trusted_proxy_addrs()?;
        Ok(())
    }

    pub fn trusted_proxy_addrs(&self) -> Result<Vec<IpAddr>> {
        self.trusted_proxies
            .iter()
            .map(|p| {
                p.trim()
                    .parse::<IpAddr>()
                    .map_err(|_| anyhow!("server.trusted_proxies: invalid address {p:?}"))
            })
            .collect()
    }
}

impl QuotesConfig {
    fn validate(&self) -> Result<()> {
        if self.data_path.as_os_str().is_empty() {
            return Err(anyhow!("quotes.data_path must not be empty"));
        }
        Ok(())
    }

    pub fn reload_interval(&self) -> Duration {
        if self.reload_interval_secs <= 0 {
            Duration::from_secs(DEFAULT_RELOAD_INTERVAL_SECS)
        } else {
            Duration::from_secs(self.reload_interval_secs as u64)
        }
    }
}
