//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags ([`AppConfig::apply_overrides`])
//! 2. Environment variables (`FORMDEX__TENANT__ID`, `FORMDEX__OUTPUT__NO_COLOR`, ...)
//! 3. Config file (`--config`, or the platform config directory)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cli::global::GlobalArgs;

const ENV_PREFIX: &str = "FORMDEX";
const ENV_SEPARATOR: &str = "__";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Ambient tenant.
    pub tenant: TenantConfig,
    /// Extra schema manifests.
    #[serde(default)]
    pub schemas: SchemaConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenantConfig {
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tenant: TenantConfig {
                id: "default".into(),
            },
            schemas: SchemaConfig::default(),
            output: OutputConfig {
                no_color: false,
                format: "auto".into(),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then the file, then the environment.
    ///
    /// A file named with `--config` must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let path = config_file.cloned().unwrap_or_else(Self::config_path);
        Self::load_from(&path, config_file.is_some())
    }

    fn load_from(path: &Path, required: bool) -> anyhow::Result<Self> {
        let defaults = Self::default();
        let settings = Config::builder()
            .set_default("tenant.id", defaults.tenant.id)?
            .set_default("output.no_color", defaults.output.no_color)?
            .set_default("output.format", defaults.output.format)?
            .add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(required),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        let config: Self = settings
            .try_deserialize()
            .context("Configuration has an unexpected shape")?;
        debug!(path = %path.display(), tenant = %config.tenant.id, "Configuration loaded");
        Ok(config)
    }

    /// Apply the flags that shadow config keys.
    pub fn apply_overrides(&mut self, args: &GlobalArgs) {
        if let Some(tenant) = &args.tenant {
            self.tenant.id.clone_from(tenant);
        }
        if let Some(dir) = &args.schemas {
            self.schemas.dir = Some(dir.clone());
        }
        if args.no_color {
            self.output.no_color = true;
        }
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.formdex.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "formdex", "formdex")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".formdex.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_tenant_is_set() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.tenant.id, "default");
        assert!(cfg.schemas.dir.is_none());
    }

    #[test]
    fn default_no_color_is_false() {
        assert!(!AppConfig::default().output.no_color);
    }

    #[test]
    fn missing_optional_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let cfg = AppConfig::load_from(&dir.path().join("absent.toml"), false).unwrap();
        assert_eq!(cfg.tenant.id, AppConfig::default().tenant.id);
        assert_eq!(cfg.output.format, "auto");
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[tenant]\nid = \"club-9\"\n\n[schemas]\ndir = \"/srv/schemas\"\n",
        )
        .unwrap();
        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.tenant.id, "club-9");
        assert_eq!(cfg.schemas.dir, Some(PathBuf::from("/srv/schemas")));
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn flags_override_everything() {
        let mut cfg = AppConfig::default();
        let args = GlobalArgs {
            tenant: Some("club-2".into()),
            schemas: Some(PathBuf::from("schemas")),
            no_color: true,
            ..GlobalArgs::default()
        };
        cfg.apply_overrides(&args);
        assert_eq!(cfg.tenant.id, "club-2");
        assert_eq!(cfg.schemas.dir, Some(PathBuf::from("schemas")));
        assert!(cfg.output.no_color);
    }

    #[test]
    fn config_path_is_not_empty() {
        let p = AppConfig::config_path();
        assert!(!p.as_os_str().is_empty());
    }
}
