use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::form::{RenderOptions, ValidationMode};
use crate::form::dispatch::DEFAULT_TEXTAREA_ROWS;
use crate::tui::ThemeVariant;

/// Form file used when neither the command line nor the config names one
pub const DEFAULT_FORM_FILE: &str = "form.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Form file to open when no path is given on the command line
    #[serde(default)]
    pub default_form: Option<PathBuf>,
    #[serde(default)]
    pub settings: Settings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_textarea_rows")]
    pub textarea_rows: u16,
    #[serde(default)]
    pub validation_mode: ValidationMode,
    #[serde(default)]
    pub theme: ThemeVariant,
    #[serde(default = "default_submit_label")]
    pub submit_label: String,
}

fn default_textarea_rows() -> u16 {
    DEFAULT_TEXTAREA_ROWS
}

fn default_submit_label() -> String {
    "Submit".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            textarea_rows: default_textarea_rows(),
            validation_mode: ValidationMode::default(),
            theme: ThemeVariant::default(),
            submit_label: default_submit_label(),
        }
    }
}

impl Settings {
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            textarea_rows: self.textarea_rows,
            validation_mode: self.validation_mode,
        }
    }
}

impl Config {
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "linux") {
            // Use XDG config directory on Linux
            dirs::config_dir()
                .context("Failed to get XDG config directory")?
                .join("form-cli")
        } else {
            // Use home directory with dot prefix on Windows/Mac
            dirs::home_dir()
                .context("Failed to get home directory")?
                .join(".form-cli")
        };

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location; a missing file yields defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        debug!("Loading config from: {:?}", config_path);

        if !config_path.exists() {
            info!("Config file doesn't exist, using defaults");
            return Ok(Self::default());
        }

        let config_content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        let config = Self::from_toml(&config_content)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;

        debug!("Loaded config: {:?}", config.settings);
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Form path precedence: command line, then config, then `form.json`
    pub fn resolve_form_path(&self, cli_path: Option<PathBuf>) -> PathBuf {
        cli_path
            .or_else(|| self.default_form.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FORM_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_file() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.default_form, None);
        assert_eq!(config.settings.textarea_rows, 2);
        assert_eq!(config.settings.validation_mode, ValidationMode::OnSubmit);
        assert_eq!(config.settings.theme, ThemeVariant::Mocha);
        assert_eq!(config.settings.submit_label, "Submit");
    }

    #[test]
    fn test_parse_settings() {
        let config = Config::from_toml(
            r#"
            default_form = "forms/signup.json"

            [settings]
            textarea_rows = 4
            validation_mode = "on_change"
            theme = "latte"
            "#,
        )
        .unwrap();

        assert_eq!(config.default_form, Some(PathBuf::from("forms/signup.json")));
        assert_eq!(config.settings.textarea_rows, 4);
        assert_eq!(config.settings.validation_mode, ValidationMode::OnChange);
        assert_eq!(config.settings.theme, ThemeVariant::Latte);
        assert_eq!(config.settings.submit_label, "Submit");

        let options = config.settings.render_options();
        assert_eq!(options.textarea_rows, 4);
    }

    #[test]
    fn test_unknown_mode_is_an_error() {
        let result = Config::from_toml("[settings]\nvalidation_mode = \"sometimes\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = Config::load_from(Path::new("/nonexistent/form-cli/config.toml")).unwrap();
        assert_eq!(config.settings.textarea_rows, 2);
    }

    #[test]
    fn test_form_path_precedence() {
        let mut config = Config::default();
        assert_eq!(config.resolve_form_path(None), PathBuf::from("form.json"));

        config.default_form = Some(PathBuf::from("configured.json"));
        assert_eq!(config.resolve_form_path(None), PathBuf::from("configured.json"));
        assert_eq!(
            config.resolve_form_path(Some(PathBuf::from("cli.json"))),
            PathBuf::from("cli.json")
        );
    }
}
