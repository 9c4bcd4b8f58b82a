use crate::cli::Cli;
use crate::domain::constants::{
    DEFAULT_ENDPOINT, DEFAULT_HISTORY_FILE, DEFAULT_REFRESH_SECS, DEFAULT_TIMEOUT_MS, DEFAULT_TOP,
    DEFAULT_WARDS_FILE, TOKEN_ENV,
};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub provider: ProviderSettings,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub dashboard: DashboardSettings,
}

#[derive(Debug, Deserialize)]
pub struct ProviderSettings {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

#[derive(Debug, Deserialize)]
pub struct DataSettings {
    #[serde(default = "default_wards")]
    pub wards: PathBuf,
    #[serde(default = "default_history")]
    pub history: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct DashboardSettings {
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,
    #[serde(default = "default_top")]
    pub top: usize,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_wards() -> PathBuf {
    PathBuf::from(DEFAULT_WARDS_FILE)
}

fn default_history() -> PathBuf {
    PathBuf::from(DEFAULT_HISTORY_FILE)
}

fn default_refresh_secs() -> u64 {
    DEFAULT_REFRESH_SECS
}

fn default_top() -> usize {
    DEFAULT_TOP
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            token: None,
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            wards: default_wards(),
            history: default_history(),
        }
    }
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            refresh_secs: default_refresh_secs(),
            top: default_top(),
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    let home = std::env::var("HOME").ok()?;
    Some(PathBuf::from(home).join(".config/ward-aqi/config.toml"))
}

/// Reads the TOML config (explicit `--config` path, else the per-user file)
/// and layers env and CLI overrides on top.
pub fn load_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let path = match &cli.config {
        Some(p) => Some(p.clone()),
        None => default_config_path().filter(|p| p.exists()),
    };
    let mut settings = match path {
        Some(p) => {
            let raw = std::fs::read_to_string(&p)
                .map_err(|e| anyhow::anyhow!("reading config {}: {}", p.display(), e))?;
            let parsed: Settings = toml::from_str(&raw)
                .map_err(|e| anyhow::anyhow!("parsing config {}: {}", p.display(), e))?;
            tracing::debug!(path = %p.display(), "loaded config");
            parsed
        }
        None => Settings::default(),
    };

    if let Ok(token) = std::env::var(TOKEN_ENV) {
        if !token.trim().is_empty() {
            settings.provider.token = Some(token.trim().to_string());
        }
    }
    if let Some(w) = &cli.wards {
        settings.data.wards = w.clone();
    }
    if let Some(h) = &cli.history {
        settings.data.history = h.clone();
    }
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::Settings;
    use crate::domain::constants::{DEFAULT_ENDPOINT, DEFAULT_REFRESH_SECS};

    #[test]
    fn empty_file_gives_defaults() {
        let s: Settings = toml::from_str("").expect("parse");
        assert_eq!(s.provider.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(s.dashboard.refresh_secs, DEFAULT_REFRESH_SECS);
        assert_eq!(s.dashboard.top, 10);
        assert!(s.provider.token.is_none());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let s: Settings = toml::from_str(
            r#"[provider]
token = "abc"
timeout_ms = 2500

[data]
history = "/var/lib/ward-aqi/history.csv"
"#,
        )
        .expect("parse");
        assert_eq!(s.provider.token.as_deref(), Some("abc"));
        assert_eq!(s.provider.timeout_ms, 2500);
        assert_eq!(s.provider.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(s.data.wards.to_str(), Some("wards.csv"));
        assert_eq!(
            s.data.history.to_str(),
            Some("/var/lib/ward-aqi/history.csv")
        );
    }
}
