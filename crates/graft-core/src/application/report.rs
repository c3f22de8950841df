//! Outcome of one recipe run.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// What happened to a single directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepOutcome {
    /// The directive changed the project (or ran its command).
    Applied,
    /// A recoverable failure or an unmet condition; the run continued.
    Skipped { reason: String },
    /// Nothing to do: content already in place.
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    /// 1-based position in the flattened plan.
    pub index: usize,
    pub action: &'static str,
    pub directive: String,
    #[serde(flatten)]
    pub outcome: StepOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Per-directive results plus run metadata.
#[derive(Debug, Clone, Serialize)]
pub struct ApplyReport {
    pub run_id: Uuid,
    pub recipe: String,
    pub root: PathBuf,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub steps: Vec<StepReport>,
}

impl ApplyReport {
    pub(crate) fn start(run_id: Uuid, recipe: &str, root: PathBuf) -> Self {
        let now = Utc::now();
        Self {
            run_id,
            recipe: recipe.to_string(),
            root,
            started_at: now,
            finished_at: now,
            steps: Vec::new(),
        }
    }

    pub(crate) fn finish(mut self) -> Self {
        self.finished_at = Utc::now();
        self
    }

    pub fn applied(&self) -> usize {
        self.count(|o| matches!(o, StepOutcome::Applied))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, StepOutcome::Skipped { .. }))
    }

    pub fn unchanged(&self) -> usize {
        self.count(|o| matches!(o, StepOutcome::Unchanged))
    }

    pub fn step(&self, index: usize) -> Option<&StepReport> {
        self.steps.iter().find(|s| s.index == index)
    }

    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }

    fn count(&self, pred: impl Fn(&StepOutcome) -> bool) -> usize {
        self.steps.iter().filter(|s| pred(&s.outcome)).count()
    }
}
