//! Configuration file support for symgen.
//!
//! symgen reads two optional configuration files:
//! - Global: `~/.symgen/config.toml` - User-wide defaults
//! - Project: `.symgen/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config, and command-line
//! flags take precedence over both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::ops::examples::{
    DEFAULT_EXAMPLES, DEFAULT_INSTALL_DIR, DEFAULT_PACKAGE, DEFAULT_TARGET, DEFAULT_TOOLS_DIR,
};
use crate::ops::generate::UnknownEntryPolicy;

/// symgen configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Declaration generation settings
    pub generate: GenerateConfig,

    /// Example build/install settings
    pub examples: ExamplesConfig,
}

/// Settings for `symgen generate`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    /// Only emit symbols starting with this prefix
    pub match_prefix: Option<String>,

    /// Remove the match prefix from emitted names
    pub strip_prefix: bool,

    /// Policy for rows that are neither Variable nor Function
    pub unknown_entry: Option<UnknownEntryPolicy>,
}

/// Settings for `symgen examples`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExamplesConfig {
    /// Cargo package holding the examples
    pub package: Option<String>,

    /// Target triple of the device
    pub target: Option<String>,

    /// Install directory on the device
    pub install_dir: Option<String>,

    /// Host tools workspace (runs the `storage` binary)
    pub tools_dir: Option<PathBuf>,

    /// Examples to build when none are given on the command line
    pub names: Vec<String>,
}

impl ExamplesConfig {
    /// Cargo package, or the default.
    pub fn package(&self) -> &str {
        self.package.as_deref().unwrap_or(DEFAULT_PACKAGE)
    }

    /// Target triple, or the default.
    pub fn target(&self) -> &str {
        self.target.as_deref().unwrap_or(DEFAULT_TARGET)
    }

    /// Install directory, or the default.
    pub fn install_dir(&self) -> &str {
        self.install_dir.as_deref().unwrap_or(DEFAULT_INSTALL_DIR)
    }

    /// Tools workspace, or the default.
    pub fn tools_dir(&self) -> PathBuf {
        self.tools_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TOOLS_DIR))
    }

    /// Configured example names, or the default list.
    pub fn names(&self) -> Vec<String> {
        if self.names.is_empty() {
            DEFAULT_EXAMPLES.iter().map(|s| s.to_string()).collect()
        } else {
            self.names.clone()
        }
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        // Generate settings
        if other.generate.match_prefix.is_some() {
            self.generate.match_prefix = other.generate.match_prefix;
        }
        if other.generate.strip_prefix {
            self.generate.strip_prefix = true;
        }
        if other.generate.unknown_entry.is_some() {
            self.generate.unknown_entry = other.generate.unknown_entry;
        }

        // Examples settings
        if other.examples.package.is_some() {
            self.examples.package = other.examples.package;
        }
        if other.examples.target.is_some() {
            self.examples.target = other.examples.target;
        }
        if other.examples.install_dir.is_some() {
            self.examples.install_dir = other.examples.install_dir;
        }
        if other.examples.tools_dir.is_some() {
            self.examples.tools_dir = other.examples.tools_dir;
        }
        if !other.examples.names.is_empty() {
            self.examples.names = other.examples.names;
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.symgen/config.toml)
/// 2. Global config (~/.symgen/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        config.merge(Config::load_or_default(global_path));
    }

    config.merge(Config::load_or_default(project_path));

    config
}

/// Get the global symgen config directory (~/.symgen).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".symgen"))
}

/// Get the global config path (~/.symgen/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.symgen/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".symgen").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_config() {
        let config: Config = toml::from_str(
            r#"
            [generate]
            match_prefix = "furi_"
            strip_prefix = true
            unknown_entry = "error"

            [examples]
            install_dir = "/ext/apps/Tools"
            names = ["gpio"]
            "#,
        )
        .unwrap();

        assert_eq!(config.generate.match_prefix.as_deref(), Some("furi_"));
        assert!(config.generate.strip_prefix);
        assert_eq!(
            config.generate.unknown_entry,
            Some(UnknownEntryPolicy::Error)
        );
        assert_eq!(config.examples.install_dir(), "/ext/apps/Tools");
        assert_eq!(config.examples.names(), vec!["gpio"]);
        assert_eq!(config.examples.package(), DEFAULT_PACKAGE);
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.examples.target(), DEFAULT_TARGET);
        assert_eq!(config.examples.names().len(), DEFAULT_EXAMPLES.len());
        assert_eq!(config.generate.unknown_entry, None);
    }

    #[test]
    fn test_project_overrides_global() {
        let tmp = TempDir::new().unwrap();
        let global = tmp.path().join("global.toml");
        let project = project_config_path(tmp.path());

        std::fs::write(
            &global,
            "[generate]\nmatch_prefix = \"furi_\"\n[examples]\ntarget = \"x86_64-unknown-linux-gnu\"\n",
        )
        .unwrap();
        std::fs::create_dir_all(project.parent().unwrap()).unwrap();
        std::fs::write(&project, "[generate]\nmatch_prefix = \"canvas_\"\n").unwrap();

        let config = load_config(Some(&global), &project);
        assert_eq!(config.generate.match_prefix.as_deref(), Some("canvas_"));
        assert_eq!(config.examples.target(), "x86_64-unknown-linux-gnu");
    }

    #[test]
    fn test_invalid_file_falls_back_to_default() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[generate\n").unwrap();

        assert!(Config::load(&path).is_err());
        assert_eq!(Config::load_or_default(&path), Config::default());
    }
}
