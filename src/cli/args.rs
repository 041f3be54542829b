//! Command-line interface definitions.

use clap::{ColorChoice, Parser};
use std::path::PathBuf;

use crate::render::BackendChoice;

const LONG_ABOUT: &str = "\
Generates from an SVG the minimal set of icons needed by modern browsers.

The source SVG is ideal for modern browsers, and it may contain a `<style>` tag with \
`@media (prefers-color-scheme: dark)` to support light/dark themes, which is ignored when \
generating favicons.

Icons are generated in the same folder as the source SVG unless they already exist:

- `favicon.ico` (32x32) for legacy browsers; serve it from `/favicon.ico` because tools, \
like RSS readers, just look there.
- `apple-touch-icon.png` (180x180) for Apple devices when adding a webpage to the home \
screen; a background and a padding around the icon is applied to make it look pretty.
- `manifest.webmanifest` that includes `icon-192.png`, `icon-512.png`, and `icon-mask.png` \
for Android devices; the first for display on the home screen, the second for different \
Android launchers, and the last as a maskable icon with a safe-zone padding.";

const EXAMPLES: &str = "\
Examples:
  favicon-factory path/to/favicon.svg
  favicon-factory --background #000000 path/to/favicon.svg
  favicon-factory --backend magick --density 600 path/to/favicon.svg";

/// favicon-factory CLI
#[derive(Parser, Debug, Clone)]
#[command(
    name = "favicon-factory",
    version,
    about,
    long_about = LONG_ABOUT,
    after_help = EXAMPLES,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Path to the favicon.svg
    #[arg(value_name = "FAVICON_SVG", value_hint = clap::ValueHint::FilePath)]
    pub favicon_svg: PathBuf,

    /// Background hex color for apple-touch-icon.png and icon-mask.png [default: #ffffff]
    #[arg(short, long, value_name = "HEX")]
    pub background: Option<String>,

    /// Rendering backend [default: auto]
    #[arg(long, value_enum)]
    pub backend: Option<BackendChoice>,

    /// Rasterization DPI for the ImageMagick backend [default: 1000]
    #[arg(long, value_name = "DPI")]
    pub density: Option<u32>,

    /// Config file path (default: favicon.toml next to the SVG, if present)
    #[arg(short = 'C', long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short, long)]
    pub verbose: bool,

    /// Control colored output (auto, always, never)
    #[arg(long, default_value = "auto")]
    pub color: ColorChoice,
}
