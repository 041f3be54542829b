//! Generation error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by color parsing, backend selection, and artifact generation.
///
/// `InvalidColor` and `NoBackendAvailable` happen before any file is touched.
/// `SourceUnreadable` is fatal to the whole run, while `Write` and `Encode`
/// are reported per artifact without stopping its siblings.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("{0} is not a valid color, use a hex value like #0099ff")]
    InvalidColor(String),

    #[error("no rendering backend found, install ImageMagick or build with the `builtin` feature")]
    NoBackendAvailable,

    #[error("cannot rasterize `{}`: {reason}", path.display())]
    SourceUnreadable { path: PathBuf, reason: String },

    #[error("failed to write `{}`", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode `{}`: {reason}", path.display())]
    Encode { path: PathBuf, reason: String },
}

impl GenerateError {
    /// Wrap a rasterization failure for `path`, keeping the whole context chain.
    pub fn unreadable(path: impl Into<PathBuf>, err: &anyhow::Error) -> Self {
        Self::SourceUnreadable {
            path: path.into(),
            reason: format!("{err:#}"),
        }
    }

    /// Whether this error must abort the whole run rather than one artifact.
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::InvalidColor(_) | Self::NoBackendAvailable | Self::SourceUnreadable { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_error_display() {
        let err = GenerateError::InvalidColor("blue".to_string());
        assert_eq!(
            err.to_string(),
            "blue is not a valid color, use a hex value like #0099ff"
        );

        let err = GenerateError::Write {
            path: PathBuf::from("out/icon-192.png"),
            source: Error::new(ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("out/icon-192.png"));
    }

    #[test]
    fn test_unreadable_keeps_context_chain() {
        let inner = anyhow::anyhow!("unexpected end of stream").context("Failed to parse SVG");
        let err = GenerateError::unreadable("favicon.svg", &inner);
        let display = err.to_string();
        assert!(display.contains("favicon.svg"));
        assert!(display.contains("Failed to parse SVG"));
        assert!(display.contains("unexpected end of stream"));
    }

    #[test]
    fn test_fatality() {
        assert!(GenerateError::NoBackendAvailable.is_fatal());
        assert!(
            GenerateError::SourceUnreadable {
                path: PathBuf::from("a.svg"),
                reason: String::new(),
            }
            .is_fatal()
        );
        assert!(
            !GenerateError::Encode {
                path: PathBuf::from("a.png"),
                reason: String::new(),
            }
            .is_fatal()
        );
    }
}
