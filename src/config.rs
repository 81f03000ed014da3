//! Configuration module for gotag
//!
//! Optional defaults for command-line options. Settings are read from
//! `config.toml` in the user's config directory (`~/.config/gotag/config.toml`
//! on Linux) and from `GOTAG_*` environment variables, which take precedence.
//! Command-line flags override both.
//!
//! ```toml
//! case_style = "snake_case"
//! recursive = true
//! quiet = false
//! ```

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

use crate::case::CaseStyle;

/// Application configuration structure
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct GotagConfig {
    /// Case style used to derive default tag values
    #[serde(default)]
    pub case_style: CaseStyle,

    /// Descend into subdirectories when the target is a directory
    #[serde(default)]
    pub recursive: bool,

    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,
}

impl GotagConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("gotag").join("config.toml"))
    }

    /// Load configuration from the default location
    ///
    /// A missing config file is not an error; defaults are used instead.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file or environment cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, layered under `GOTAG_*` environment
    /// variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be parsed, or a
    /// setting has an invalid value.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Self::load_layers(path, Self::environment())
    }

    /// `GOTAG_*` variables, e.g. `GOTAG_CASE_STYLE=snake`
    fn environment() -> Environment {
        Environment::with_prefix("GOTAG").try_parsing(true)
    }

    fn load_layers(path: &Path, environment: Environment) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(environment)
            .build()?;

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = GotagConfig::default();
        assert_eq!(config.case_style, CaseStyle::LowerCamel);
        assert!(!config.recursive);
        assert!(!config.quiet);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = GotagConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, GotagConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "case_style = \"snake\"\nrecursive = true\n").unwrap();

        let config = GotagConfig::load_from(&path).unwrap();
        assert_eq!(config.case_style, CaseStyle::Snake);
        assert!(config.recursive);
        assert!(!config.quiet);
    }

    #[test]
    fn test_environment_overrides_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "case_style = \"snake\"\nrecursive = true\n").unwrap();

        let vars = config::Map::from([
            ("GOTAG_CASE_STYLE".to_string(), "kebab".to_string()),
            ("GOTAG_QUIET".to_string(), "true".to_string()),
        ]);
        let environment = GotagConfig::environment().source(Some(vars));

        let config = GotagConfig::load_layers(&path, environment).unwrap();
        assert_eq!(config.case_style, CaseStyle::Kebab);
        assert!(config.recursive);
        assert!(config.quiet);
    }

    #[test]
    fn test_invalid_case_style_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "case_style = \"Title\"\n").unwrap();

        let err = GotagConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Title"));
    }

    #[test]
    fn test_config_path_location() {
        if let Ok(path) = GotagConfig::config_path() {
            assert!(path.ends_with("gotag/config.toml"));
        }
    }
}
