//! Configuration loading.
//!
//! `~/.slurp/config.toml`, every section optional. An absent file yields
//! the defaults; a present-but-broken file is a hard error so a typo in
//! the root path cannot silently point the vault somewhere else.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::busy::DEFAULT_ACTIVATION_DELAY;

/// Drop folder used when nothing else names one.
const DEFAULT_ROOT: &str = "~/drops";
/// Inline text preview cap.
const DEFAULT_PREVIEW_MAX_BYTES: usize = 65536;

#[derive(Debug, Default, Deserialize)]
pub struct SlurpConfig {
    pub app: Option<AppConfig>,
    pub indicator: Option<IndicatorConfig>,
    pub preview: Option<PreviewConfig>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// The drop folder. Supports `~`, `$VAR`, and `${VAR}`.
    pub root: Option<String>,
    /// Use ASCII-only glyphs for icons and the spinner.
    #[serde(default)]
    pub ascii_only: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct IndicatorConfig {
    /// Milliseconds between a request starting and the overlay appearing.
    pub delay_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PreviewConfig {
    /// Byte cap for inline text previews.
    pub max_bytes: Option<usize>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl SlurpConfig {
    /// Load from the default location. No file (or no home directory) is
    /// not an error.
    pub fn load() -> Result<Self, ConfigError> {
        let Some(path) = config_path() else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "failed to read config");
                return Err(ConfigError::Read { path, source: err });
            }
        };
        match toml::from_str(&content) {
            Ok(config) => Ok(config),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "failed to parse config");
                Err(ConfigError::Parse { path, source: err })
            }
        }
    }

    #[must_use]
    pub fn activation_delay(&self) -> Duration {
        self.indicator
            .as_ref()
            .and_then(|section| section.delay_ms)
            .map_or(DEFAULT_ACTIVATION_DELAY, Duration::from_millis)
    }

    #[must_use]
    pub fn preview_max_bytes(&self) -> usize {
        self.preview
            .as_ref()
            .and_then(|section| section.max_bytes)
            .unwrap_or(DEFAULT_PREVIEW_MAX_BYTES)
    }

    #[must_use]
    pub fn ascii_only(&self) -> bool {
        self.app.as_ref().is_some_and(|section| section.ascii_only)
    }

    /// Pick the drop folder: CLI argument, then `SLURP_ROOT`, then the
    /// config file, then the default. All sources get expansion.
    #[must_use]
    pub fn resolve_root(&self, cli_root: Option<&str>) -> PathBuf {
        let raw = cli_root
            .map(str::to_owned)
            .or_else(|| env::var("SLURP_ROOT").ok().filter(|v| !v.is_empty()))
            .or_else(|| {
                self.app
                    .as_ref()
                    .and_then(|section| section.root.clone())
            })
            .unwrap_or_else(|| DEFAULT_ROOT.to_string());
        PathBuf::from(expand_path(&raw))
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".slurp").join("config.toml"))
}

/// Expand a leading `~` plus `$VAR` and `${VAR}` references. Unset
/// variables expand to nothing; an unclosed `${` is left as written.
fn expand_path(value: &str) -> String {
    let value = if let Some(rest) = value.strip_prefix('~')
        && (rest.is_empty() || rest.starts_with('/'))
    {
        match dirs::home_dir() {
            Some(home) => format!("{}{rest}", home.display()),
            None => value.to_string(),
        }
    } else {
        value.to_string()
    };

    let mut out = String::with_capacity(value.len());
    let mut i = 0;
    while i < value.len() {
        if value[i..].starts_with("${") {
            let start = i + 2;
            if let Some(end_rel) = value[start..].find('}') {
                let end = start + end_rel;
                let var = &value[start..end];
                if !var.is_empty() {
                    out.push_str(&env::var(var).unwrap_or_default());
                }
                i = end + 1;
                continue;
            }
        } else if value[i..].starts_with('$') {
            let start = i + 1;
            let name_len = value[start..]
                .find(|c: char| !c.is_ascii_alphanumeric() && c != '_')
                .unwrap_or(value.len() - start);
            if name_len > 0 {
                let var = &value[start..start + name_len];
                out.push_str(&env::var(var).unwrap_or_default());
                i = start + name_len;
                continue;
            }
        }

        let ch = value[i..].chars().next().unwrap();
        out.push(ch);
        i += ch.len_utf8();
    }
    out
}
