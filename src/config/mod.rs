//! Configuration for `favicon.toml`.
//!
//! The file is optional. Without `--config`, a `favicon.toml` next to the
//! source SVG is used when present. CLI flags override file values.
//!
//! # Example
//!
//! ```toml
//! background = "#0099ff"  # Background for apple-touch-icon.png and icon-mask.png
//!
//! [render]
//! backend = "auto"        # auto | builtin | magick
//! density = 1000          # ImageMagick rasterization DPI
//! ```

mod error;

pub use error::ConfigError;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cli::Cli;
use crate::log;
use crate::render::{BackendChoice, DEFAULT_DENSITY, RenderOptions};

/// Config file looked up next to the source SVG.
pub const DEFAULT_CONFIG_FILE: &str = "favicon.toml";

/// Default background for padded icons.
pub const DEFAULT_BACKGROUND: &str = "#ffffff";

/// Root configuration structure representing favicon.toml
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FactoryConfig {
    /// Background hex color for padded icons, validated by the color parser.
    pub background: String,

    /// Rendering backend settings.
    pub render: RenderConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub backend: BackendChoice,
    pub density: u32,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            background: DEFAULT_BACKGROUND.to_string(),
            render: RenderConfig::default(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            backend: BackendChoice::Auto,
            density: DEFAULT_DENSITY,
        }
    }
}

impl FactoryConfig {
    /// Load configuration for `cli`: file (if any), then CLI overrides.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match Self::resolve_config_path(cli) {
            Some(path) => Self::from_path(&path)?,
            None => Self::default(),
        };

        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    /// Explicit `--config`, or `favicon.toml` beside the SVG when it exists.
    fn resolve_config_path(cli: &Cli) -> Option<PathBuf> {
        if let Some(path) = &cli.config {
            return Some(path.clone());
        }

        let dir = cli
            .favicon_svg
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let path = dir.join(DEFAULT_CONFIG_FILE);
        path.is_file().then_some(path)
    }

    /// Load configuration from file path, warning about unknown fields.
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    pub fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        log!("warn"; "ignoring unknown fields in {}: {}", path.display(), fields.join(", "));
    }

    /// Apply CLI flags over file values.
    fn apply_cli(&mut self, cli: &Cli) {
        Self::update_option(&mut self.background, cli.background.as_ref());
        Self::update_option(&mut self.render.backend, cli.backend.as_ref());
        Self::update_option(&mut self.render.density, cli.density.as_ref());
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.render.density == 0 {
            return Err(ConfigError::Validation(
                "render.density must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            density: self.render.density,
        }
    }
}
