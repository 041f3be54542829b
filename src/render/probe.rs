//! Backend capability probe.
//!
//! Looks for a usable renderer in priority order:
//!
//! 1. the builtin `resvg` renderer, if compiled in
//! 2. ImageMagick v7 (`magick`) on `PATH`
//! 3. ImageMagick v6 (`convert`) on `PATH`
//!
//! A `Probe` snapshots the environment when it is created and nothing is
//! cached beyond that, so creating a new one always sees the current `PATH`.

use std::ffi::OsString;
use std::path::PathBuf;

use serde::Deserialize;

use super::magick::{MagickRenderer, MagickVersion};
use super::{Backend, RenderOptions};
use crate::log;

/// Which backend the user asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BackendChoice {
    /// Builtin renderer if available, ImageMagick otherwise.
    #[default]
    Auto,
    /// Only the builtin renderer.
    Builtin,
    /// Only ImageMagick.
    Magick,
}

/// Environment the probe searches.
#[derive(Debug, Clone)]
pub struct Probe {
    /// Whether the builtin renderer may be used.
    #[cfg_attr(not(feature = "builtin"), allow(dead_code))]
    builtin: bool,
    /// Directories to search for executables, in `PATH` format.
    search_path: Option<OsString>,
    cwd: PathBuf,
}

impl Probe {
    pub fn new(builtin: bool, search_path: Option<OsString>) -> Self {
        Self {
            builtin,
            search_path,
            cwd: std::env::current_dir().unwrap_or_default(),
        }
    }

    /// Probe the current process environment.
    pub fn from_env() -> Self {
        Self::new(cfg!(feature = "builtin"), std::env::var_os("PATH"))
    }

    /// Select a backend for `choice`, or `None` when nothing usable exists.
    pub fn select(&self, choice: BackendChoice, options: &RenderOptions) -> Option<Backend> {
        let backend = match choice {
            BackendChoice::Auto => self.builtin().or_else(|| self.magick(options)),
            BackendChoice::Builtin => self.builtin(),
            BackendChoice::Magick => self.magick(options),
        }?;

        if let Backend::Magick(magick) = &backend
            && magick.version() == MagickVersion::V6
        {
            log!("warn"; "install imagemagick v7 for best results, using v6");
        }
        Some(backend)
    }

    fn builtin(&self) -> Option<Backend> {
        #[cfg(feature = "builtin")]
        if self.builtin {
            return Some(Backend::Builtin(super::BuiltinRenderer));
        }
        None
    }

    fn magick(&self, options: &RenderOptions) -> Option<Backend> {
        let (program, version) = self.find_magick()?;
        Some(Backend::Magick(MagickRenderer::new(program, version, options)))
    }

    /// Locate an ImageMagick executable, preferring v7.
    pub fn find_magick(&self) -> Option<(PathBuf, MagickVersion)> {
        [("magick", MagickVersion::V7), ("convert", MagickVersion::V6)]
            .into_iter()
            .find_map(|(name, version)| {
                which::which_in(name, self.search_path.as_ref(), &self.cwd)
                    .ok()
                    .map(|path| (path, version))
            })
    }
}
