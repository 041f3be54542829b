//! Per-artifact outcomes of one generation run.

use owo_colors::Style;

use crate::error::GenerateError;
use crate::log;
use crate::logger::paint;

/// What happened to one artifact.
#[derive(Debug)]
pub enum Outcome {
    Generated,
    /// The file already existed and was left untouched.
    Skipped,
    Failed(GenerateError),
}

#[derive(Debug)]
pub struct ArtifactOutcome {
    pub name: &'static str,
    pub outcome: Outcome,
}

/// Outcomes for every artifact, in table order.
#[derive(Debug, Default)]
pub struct AttemptReport {
    pub artifacts: Vec<ArtifactOutcome>,
}

impl AttemptReport {
    pub fn generated(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Generated))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Skipped))
    }

    /// Failed artifacts with their errors.
    pub fn failures(&self) -> impl Iterator<Item = (&ArtifactOutcome, &GenerateError)> {
        self.artifacts.iter().filter_map(|a| match &a.outcome {
            Outcome::Failed(err) => Some((a, err)),
            _ => None,
        })
    }

    /// True when no artifact failed.
    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }

    /// True when some failure came from the shared source rather than one artifact.
    pub fn has_fatal(&self) -> bool {
        self.failures().any(|(_, err)| err.is_fatal())
    }

    fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.artifacts.iter().filter(|a| pred(&a.outcome)).count()
    }

    /// Print a one-line summary followed by every failure.
    pub fn print(&self) {
        let failed = self.artifacts.len() - self.generated() - self.skipped();
        let failed_text = format!("{failed} failed");
        let failed_text = if failed > 0 {
            paint(&failed_text, Style::new().red().bold())
        } else {
            failed_text
        };

        log!(
            "done";
            "{} generated, {} skipped, {}",
            self.generated(),
            self.skipped(),
            failed_text
        );

        for (artifact, err) in self.failures() {
            log!("error"; "{}: {}", artifact.name, failure_reason(err));
        }
    }
}

/// Failure text without the artifact path, which the caller already names.
fn failure_reason(err: &GenerateError) -> String {
    match err {
        GenerateError::Write { source, .. } => format!("write failed: {source}"),
        GenerateError::Encode { reason, .. } => format!("encoding failed: {reason}"),
        _ => err.to_string(),
    }
}
