//! Favicon generation.
//!
//! # Modules
//!
//! - [`artifact`]: The fixed artifact table
//! - [`manifest`]: Web app manifest content
//! - [`report`]: Per-artifact outcomes
//!
//! # Flow
//!
//! ```text
//! GenerationRequest + Backend
//!         │
//!         ▼
//!   ┌────────────┐
//!   │ preflight  │ ──► source must parse if any raster artifact is missing
//!   └─────┬──────┘
//!         │
//!         ▼
//!   ┌────────────┐
//!   │  fan-out   │ ──► one rayon task per artifact, skip existing files
//!   └─────┬──────┘
//!         │
//!         ▼
//!   AttemptReport (generated / skipped / failed per artifact)
//! ```
//!
//! Every task reads the same immutable request and writes only its own
//! destination, so tasks share no mutable state.

pub mod artifact;
pub mod manifest;
pub mod report;

pub use artifact::{ARTIFACTS, ArtifactKind, ArtifactSpec};
pub use report::{ArtifactOutcome, AttemptReport, Outcome};

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::GenerateError;
use crate::image::{Rgb, encode_legacy_icon, encode_png};
use crate::render::{Backend, write_png};
use crate::utils::fs::{Written, write_new};
use crate::{debug, log};

/// Markup to paste into the page `<head>` once the artifacts exist.
pub const HEAD_SNIPPET: &str = r#"<!-- favicons generated with favicon-factory -->
<link rel="icon" href="/favicon.svg" type="image/svg+xml">
<link rel="icon" href="/favicon.ico" sizes="32x32">
<link rel="apple-touch-icon" href="/apple-touch-icon.png">
<link rel="manifest" href="/manifest.webmanifest">"#;

/// Validated input for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    source: PathBuf,
    background: Rgb,
}

impl GenerationRequest {
    pub fn new(source: impl Into<PathBuf>, background: Rgb) -> Self {
        Self {
            source: source.into(),
            background,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub const fn background(&self) -> Rgb {
        self.background
    }

    /// Directory all artifacts are written to: the source's parent.
    pub fn output_dir(&self) -> &Path {
        match self.source.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }

    pub fn destination(&self, spec: &ArtifactSpec) -> PathBuf {
        self.output_dir().join(spec.name)
    }
}

/// Generate every missing artifact for `request` with `backend`.
///
/// Returns `Err` only when the source cannot be rasterized before any
/// work starts. Per-artifact failures are collected into the report.
pub fn generate_all(
    request: &GenerationRequest,
    backend: &Backend,
) -> Result<AttemptReport, GenerateError> {
    generate_artifacts(request, backend, &ARTIFACTS)
}

fn generate_artifacts(
    request: &GenerationRequest,
    backend: &Backend,
    specs: &[ArtifactSpec],
) -> Result<AttemptReport, GenerateError> {
    let needs_source = specs
        .iter()
        .any(|spec| spec.kind.needs_source() && !request.destination(spec).exists());

    if needs_source {
        debug!("render"; "checking {} with {}", request.source().display(), backend.name());
        backend
            .check_source(request.source())
            .map_err(|err| GenerateError::unreadable(request.source(), &err))?;
    }

    let artifacts = specs
        .par_iter()
        .map(|spec| generate_one(spec, request, backend))
        .collect();

    Ok(AttemptReport { artifacts })
}

/// Generate one artifact unless its destination already exists.
fn generate_one(spec: &ArtifactSpec, request: &GenerationRequest, backend: &Backend) -> ArtifactOutcome {
    let path = request.destination(spec);

    let outcome = if path.exists() {
        log_skip(&path);
        Outcome::Skipped
    } else {
        log!("generate"; "generating {}", path.display());
        match produce(spec, request, backend, &path) {
            Ok(Written::Created) => Outcome::Generated,
            Ok(Written::AlreadyExists) => {
                log_skip(&path);
                Outcome::Skipped
            }
            Err(err) => Outcome::Failed(err),
        }
    };

    ArtifactOutcome {
        name: spec.name,
        outcome,
    }
}

fn log_skip(path: &Path) {
    log!("skip"; "skipping {} because it already exists", path.display());
}

/// Render, encode and write one artifact.
fn produce(
    spec: &ArtifactSpec,
    request: &GenerationRequest,
    backend: &Backend,
    path: &Path,
) -> Result<Written, GenerateError> {
    let source = request.source();
    let unreadable = |err: anyhow::Error| GenerateError::unreadable(source, &err);
    let encode = |err: anyhow::Error| GenerateError::Encode {
        path: path.to_path_buf(),
        reason: format!("{err:#}"),
    };

    match spec.kind {
        ArtifactKind::LegacyIcon { size } => {
            let img = backend.render_square(source, size).map_err(unreadable)?;
            let png = encode_png(&img).map_err(encode)?;
            let ico = encode_legacy_icon(&png, size, size).map_err(encode)?;
            write_new(path, &ico)
        }
        ArtifactKind::Png { size } => {
            let img = backend.render_square(source, size).map_err(unreadable)?;
            write_png(&img, path)
        }
        ArtifactKind::PaddedPng { inner, canvas } => {
            let img = backend
                .render_padded(source, inner, canvas, request.background())
                .map_err(unreadable)?;
            write_png(&img, path)
        }
        ArtifactKind::Manifest => {
            let json = manifest::render_manifest().map_err(encode)?;
            write_new(path, &json)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_dir() {
        let request = GenerationRequest::new("site/static/favicon.svg", Rgb::WHITE);
        assert_eq!(request.output_dir(), Path::new("site/static"));

        let request = GenerationRequest::new("favicon.svg", Rgb::WHITE);
        assert_eq!(request.output_dir(), Path::new("."));
        assert_eq!(
            request.destination(&ARTIFACTS[0]),
            Path::new("./favicon.ico")
        );
    }

    #[test]
    fn test_head_snippet_references_artifacts() {
        for name in ["favicon.ico", "apple-touch-icon.png", "manifest.webmanifest"] {
            assert!(HEAD_SNIPPET.contains(&format!("/{name}")), "{name}");
        }
    }

    #[cfg(feature = "builtin")]
    mod builtin {
        use super::*;
        use crate::render::BuiltinRenderer;
        use std::collections::BTreeMap;
        use std::fs;
        use tempfile::TempDir;

        const SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 64 64">
  <circle cx="32" cy="32" r="32" fill="#0099ff"/>
</svg>"##;

        fn setup(svg: &str) -> (TempDir, GenerationRequest) {
            let dir = TempDir::new().unwrap();
            let source = dir.path().join("favicon.svg");
            fs::write(&source, svg).unwrap();
            let request = GenerationRequest::new(source, Rgb::new(0xff, 0, 0));
            (dir, request)
        }

        fn snapshot(dir: &Path) -> BTreeMap<String, Vec<u8>> {
            fs::read_dir(dir)
                .unwrap()
                .map(|entry| {
                    let entry = entry.unwrap();
                    (
                        entry.file_name().to_string_lossy().into_owned(),
                        fs::read(entry.path()).unwrap(),
                    )
                })
                .collect()
        }

        fn backend() -> Backend {
            Backend::Builtin(BuiltinRenderer)
        }

        #[test]
        fn test_generates_every_artifact() {
            let (dir, request) = setup(SVG);

            let report = generate_all(&request, &backend()).unwrap();
            assert!(report.is_success());
            assert_eq!(report.generated(), ARTIFACTS.len());

            for spec in ARTIFACTS {
                assert!(dir.path().join(spec.name).is_file(), "{}", spec.name);
            }
            // source plus six artifacts, nothing else
            assert_eq!(snapshot(dir.path()).len(), ARTIFACTS.len() + 1);
        }

        #[test]
        fn test_artifact_geometry() {
            let (dir, request) = setup(SVG);
            generate_all(&request, &backend()).unwrap();

            for (name, size) in [
                ("icon-192.png", 192),
                ("icon-512.png", 512),
                ("icon-mask.png", 512),
                ("apple-touch-icon.png", 180),
            ] {
                let img = image::open(dir.path().join(name)).unwrap();
                assert_eq!((img.width(), img.height()), (size, size), "{name}");
            }

            // padded corners carry the background, plain corners stay transparent
            let touch = image::open(dir.path().join("apple-touch-icon.png"))
                .unwrap()
                .to_rgba8();
            assert_eq!(touch.get_pixel(0, 0).0, [0xff, 0, 0, 0xff]);
            assert_eq!(touch.get_pixel(90, 90).0, [0, 0x99, 0xff, 0xff]);
            let plain = image::open(dir.path().join("icon-192.png"))
                .unwrap()
                .to_rgba8();
            assert_eq!(plain.get_pixel(0, 0)[3], 0);
        }

        #[test]
        fn test_ico_wraps_32px_png() {
            let (dir, request) = setup(SVG);
            generate_all(&request, &backend()).unwrap();

            let ico = fs::read(dir.path().join("favicon.ico")).unwrap();
            assert_eq!(&ico[0..6], &[0, 0, 1, 0, 1, 0]);
            assert_eq!(&ico[6..8], &[32, 32]);
            let len = u32::from_le_bytes([ico[14], ico[15], ico[16], ico[17]]) as usize;
            assert_eq!(ico.len(), 22 + len);

            let png = image::load_from_memory(&ico[22..]).unwrap();
            assert_eq!((png.width(), png.height()), (32, 32));
        }

        #[test]
        fn test_second_run_skips_everything() {
            let (dir, request) = setup(SVG);
            generate_all(&request, &backend()).unwrap();
            let before = snapshot(dir.path());

            let report = generate_all(&request, &backend()).unwrap();
            assert!(report.is_success());
            assert_eq!(report.skipped(), ARTIFACTS.len());
            assert_eq!(snapshot(dir.path()), before);
        }

        #[test]
        fn test_existing_files_are_kept() {
            let (dir, request) = setup(SVG);
            fs::write(dir.path().join("icon-192.png"), b"hand made").unwrap();

            let report = generate_all(&request, &backend()).unwrap();
            assert_eq!(report.skipped(), 1);
            assert_eq!(report.generated(), ARTIFACTS.len() - 1);
            assert_eq!(fs::read(dir.path().join("icon-192.png")).unwrap(), b"hand made");
        }

        #[test]
        fn test_unreadable_source_writes_nothing() {
            let (dir, request) = setup("<not-svg");

            match generate_all(&request, &backend()) {
                Err(GenerateError::SourceUnreadable { path, .. }) => {
                    assert_eq!(path, request.source());
                }
                other => panic!("expected SourceUnreadable, got {other:?}"),
            }
            assert_eq!(snapshot(dir.path()).len(), 1);
        }

        #[test]
        fn test_all_present_needs_no_readable_source() {
            let (dir, request) = setup("<not-svg");
            for spec in ARTIFACTS {
                fs::write(dir.path().join(spec.name), b"existing").unwrap();
            }

            let report = generate_all(&request, &backend()).unwrap();
            assert_eq!(report.skipped(), ARTIFACTS.len());
        }

        #[test]
        fn test_failed_artifact_does_not_stop_siblings() {
            let (dir, request) = setup(SVG);
            let mut specs = ARTIFACTS.to_vec();
            // 300px does not fit the one-byte icon directory entry
            specs[0].kind = ArtifactKind::LegacyIcon { size: 300 };
            specs.push(ArtifactSpec {
                name: "missing/icon-64.png",
                kind: ArtifactKind::Png { size: 64 },
            });

            let report = generate_artifacts(&request, &backend(), &specs).unwrap();
            assert_eq!(report.generated(), ARTIFACTS.len() - 1);
            assert!(!report.is_success());
            assert!(!report.has_fatal());

            let failed: Vec<_> = report.failures().map(|(a, _)| a.name).collect();
            assert_eq!(failed, ["favicon.ico", "missing/icon-64.png"]);
            assert!(report.failures().any(|(_, e)| matches!(e, GenerateError::Encode { .. })));
            assert!(report.failures().any(|(_, e)| matches!(e, GenerateError::Write { .. })));

            assert!(!dir.path().join("favicon.ico").exists());
            for spec in &ARTIFACTS[1..] {
                assert!(dir.path().join(spec.name).is_file(), "{}", spec.name);
            }
        }

        #[test]
        fn test_only_manifest_missing() {
            let (dir, request) = setup("<not-svg");
            for spec in ARTIFACTS.iter().filter(|s| s.kind.needs_source()) {
                fs::write(dir.path().join(spec.name), b"existing").unwrap();
            }

            let report = generate_all(&request, &backend()).unwrap();
            assert_eq!(report.generated(), 1);
            let json = fs::read(dir.path().join("manifest.webmanifest")).unwrap();
            assert_eq!(json, manifest::render_manifest().unwrap());
        }
    }
}
