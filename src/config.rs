//! Installer Configuration
//!
//! Parses `installer.toml` for studio-wide defaults. Every field is optional;
//! command-line flags take precedence over the file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Product page opened from the introduction step
pub const DEFAULT_PRODUCT_URL: &str = "http://foundation.jonlauridsen.com";

/// File name looked up in the current directory when no path is given
pub const CONFIG_FILE_NAME: &str = "installer.toml";

/// The main configuration structure matching installer.toml
#[derive(Debug, Default, Deserialize)]
pub struct InstallerConfig {
    #[serde(default)]
    pub host: HostConfig,
    #[serde(default)]
    pub install: InstallSection,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Host application settings
#[derive(Debug, Deserialize)]
pub struct HostConfig {
    /// Per-user script directory (default: platform convention)
    #[serde(default)]
    pub user_script_dir: Option<PathBuf>,

    /// Product page URL
    #[serde(default = "default_product_url")]
    pub product_url: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            user_script_dir: None,
            product_url: default_product_url(),
        }
    }
}

/// Installation defaults
#[derive(Debug, Default, Deserialize)]
pub struct InstallSection {
    /// Shared folder pre-filled on the folder selection step
    #[serde(default)]
    pub shared_folder: Option<String>,
}

/// Logging settings
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// tracing level: error, warn, info, debug or trace
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_product_url() -> String {
    DEFAULT_PRODUCT_URL.to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl InstallerConfig {
    /// Load configuration from a file path
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&contents)
    }

    /// Load `path` if given, else `installer.toml` from the current directory
    /// if present, else defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        let local = std::env::current_dir()?.join(CONFIG_FILE_NAME);
        if local.exists() {
            tracing::debug!("Using config file {:?}", local);
            return Self::from_file(&local);
        }

        Ok(Self::default())
    }

    /// Parse configuration from a TOML string
    pub fn from_str(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).context("Failed to parse installer.toml")
    }

    /// Resolve the user script directory, falling back to the host convention
    pub fn user_script_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.host.user_script_dir {
            return Ok(dir.clone());
        }

        crate::paths::host::default_user_script_dir()
            .context("Cannot determine the host's user script directory; set [host] user_script_dir")
    }
}

/// Generate a template installer.toml file
pub fn generate_template() -> String {
    format!(
        r#"# Foundation installer configuration

[host]
# Optional: Host per-user script directory (default: platform convention)
# user_script_dir = "/home/artist/maya/scripts"

product_url = "{url}"

[install]
# Optional: Shared folder suggested on the folder selection step
# shared_folder = "//fileserver/pipeline/shared_scripts"

[logging]
# error, warn, info, debug or trace
level = "warn"
"#,
        url = DEFAULT_PRODUCT_URL,
    )
}
