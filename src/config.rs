// src/config.rs
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

// --- env defaults & names ---
pub const DEFAULT_CONFIG_PATH: &str = "config/widget.toml";
pub const DEFAULT_ENDPOINT: &str = "https://api.adviceslip.com/advice";

pub const ENV_CONFIG_PATH: &str = "ADVICE_CONFIG_PATH";
pub const ENV_API_URL: &str = "ADVICE_API_URL";

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}
fn default_user_agent() -> String {
    concat!("advice-card/", env!("CARGO_PKG_VERSION")).to_string()
}
fn default_ui_dir() -> PathBuf {
    PathBuf::from("ui")
}
fn default_metrics_enabled() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Advice service URL; a single `GET` is issued against it per trigger.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Unset by default: a hung request holds its own invocation open but never
    /// blocks newer ones.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    /// Directory with the static page.
    #[serde(default = "default_ui_dir")]
    pub ui_dir: PathBuf,
    #[serde(default = "default_metrics_enabled")]
    pub metrics_enabled: bool,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            user_agent: default_user_agent(),
            request_timeout_secs: None,
            ui_dir: default_ui_dir(),
            metrics_enabled: default_metrics_enabled(),
        }
    }
}

impl WidgetConfig {
    /// Load from an explicit TOML file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading widget config from {}", path.display()))?;
        let cfg: WidgetConfig = toml::from_str(&content)
            .with_context(|| format!("parsing widget config {}", path.display()))?;
        cfg.validated()
    }

    /// Load using env var + fallbacks, then apply env overrides:
    /// 1) $ADVICE_CONFIG_PATH (must exist)
    /// 2) config/widget.toml
    /// 3) built-in defaults
    ///
    /// `$ADVICE_API_URL`, when set and non-empty, replaces `endpoint`.
    pub fn load() -> Result<Self> {
        let mut cfg = if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
            }
            Self::load_from(&pb)?
        } else {
            let default_p = PathBuf::from(DEFAULT_CONFIG_PATH);
            if default_p.exists() {
                Self::load_from(&default_p)?
            } else {
                Self::default()
            }
        };

        if let Some(url) = std::env::var(ENV_API_URL)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
        {
            cfg.endpoint = url;
        }

        cfg.validated()
    }

    fn validated(mut self) -> Result<Self> {
        self.endpoint = self.endpoint.trim().to_string();
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(anyhow!(
                "advice endpoint must be an http(s) URL, got '{}'",
                self.endpoint
            ));
        }
        // zero would fail every request immediately
        if self.request_timeout_secs == Some(0) {
            self.request_timeout_secs = None;
        }
        Ok(self)
    }
}
