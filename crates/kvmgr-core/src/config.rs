//! Configuration: release mirror and store location.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use url::Url;

use crate::artifact;

/// Global configuration loaded from `~/.config/kvmgr/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KvmgrConfig {
    /// Base URL of the kubectl release mirror.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Store directory override; default is `~/.kvmgr`.
    #[serde(default)]
    pub store_dir: Option<PathBuf>,
}

fn default_base_url() -> String {
    artifact::DEFAULT_BASE_URL.to_string()
}

impl Default for KvmgrConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            store_dir: None,
        }
    }
}

impl KvmgrConfig {
    /// Rejects configurations the pipeline cannot work with (a base URL that
    /// does not parse as http/https).
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url)
            .with_context(|| format!("invalid base_url: {}", self.base_url))?;
        anyhow::ensure!(
            matches!(url.scheme(), "http" | "https"),
            "base_url must be http or https, got {}",
            url.scheme()
        );
        Ok(())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("kvmgr")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<KvmgrConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = KvmgrConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)
        .with_context(|| format!("reading {}", path.display()))?;
    let cfg: KvmgrConfig =
        toml::from_str(&data).with_context(|| format!("parsing {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_points_at_the_release_mirror() {
        let cfg = KvmgrConfig::default();
        assert_eq!(
            cfg.base_url,
            "https://storage.googleapis.com/kubernetes-release/release"
        );
        assert!(cfg.store_dir.is_none());
        cfg.validate().unwrap();
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = KvmgrConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: KvmgrConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.base_url, cfg.base_url);
        assert_eq!(parsed.store_dir, cfg.store_dir);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            base_url = "http://mirror.internal/kubernetes/release"
            store_dir = "/opt/kvmgr"
        "#;
        let cfg: KvmgrConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.base_url, "http://mirror.internal/kubernetes/release");
        assert_eq!(cfg.store_dir.as_deref(), Some(std::path::Path::new("/opt/kvmgr")));
        cfg.validate().unwrap();
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let cfg: KvmgrConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.base_url, KvmgrConfig::default().base_url);
        assert!(cfg.store_dir.is_none());
    }

    #[test]
    fn non_http_base_url_is_rejected() {
        let cfg = KvmgrConfig {
            base_url: "ftp://mirror.internal/release".to_string(),
            store_dir: None,
        };
        assert!(cfg.validate().is_err());
        let cfg = KvmgrConfig {
            base_url: "not a url".to_string(),
            store_dir: None,
        };
        assert!(cfg.validate().is_err());
    }
}
