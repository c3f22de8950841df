//! Application layer errors.
//!
//! These errors represent failures while executing a recipe against a
//! project, not recipe-shape violations. Those are `DomainError` from
//! `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::{ErrorCategory, GraftError};

/// How the applier treats a failed directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Abort the whole run and report the directive index.
    Fatal,
    /// Log at WARN, record the step as skipped and continue.
    Recoverable,
}

/// Errors that occur during recipe execution and lookup.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    // ========================================================================
    // Directive failures
    // ========================================================================
    /// The injection anchor does not occur in the target file.
    #[error("Anchor {anchor:?} not found in {path}")]
    AnchorNotFound { path: PathBuf, anchor: String },

    /// File exists and the directive did not ask to overwrite it.
    #[error("File already exists: {path}")]
    AlreadyExists { path: PathBuf },

    /// Copy source directory is missing.
    #[error("Source directory not found: {path}")]
    SourceMissing { path: PathBuf },

    /// Injection target file is missing.
    #[error("Injection target not found: {path}")]
    TargetMissing { path: PathBuf },

    /// Delegated command exited unsuccessfully.
    #[error("Command `{command}` failed with {}", exit_description(*.code))]
    CommandFailed { command: String, code: Option<i32> },

    /// Delegated command could not be started.
    #[error("Could not run `{command}`: {reason}")]
    CommandSpawn { command: String, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The operator channel could not read or write.
    #[error("Operator channel failed: {reason}")]
    OperatorError { reason: String },

    /// A fatal failure, tagged with the 1-based directive index.
    #[error("Directive #{index} ({directive}) failed: {source}")]
    ApplyFailed {
        index: usize,
        directive: String,
        #[source]
        source: Box<GraftError>,
    },

    // ========================================================================
    // Recipe lookup
    // ========================================================================
    #[error("Recipe not found: {name}")]
    RecipeNotFound { name: String },

    #[error("Failed to load recipe from {path}: {reason}")]
    RecipeLoad { path: PathBuf, reason: String },

    /// Store access failed (lock poisoned, etc.).
    #[error("Recipe store error")]
    StoreLockError,
}

fn exit_description(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "termination by signal".into(),
    }
}

impl ApplicationError {
    /// Whether the applier may skip past this failure.
    pub fn severity(&self) -> Severity {
        match self {
            Self::AlreadyExists { .. } | Self::SourceMissing { .. } => Severity::Recoverable,
            _ => Severity::Fatal,
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::AnchorNotFound { path, anchor } => vec![
                format!("{} must contain {:?}", path.display(), anchor),
                "Was the file generated by an earlier step or edited by hand?".into(),
            ],
            Self::AlreadyExists { path } => vec![
                format!("Remove {} or mark the directive with overwrite = true", path.display()),
            ],
            Self::SourceMissing { path } => vec![
                format!("Expected a directory at {}", path.display()),
                "Pass --assets to point at the recipe's asset root".into(),
            ],
            Self::TargetMissing { path } => vec![
                format!("Create {} before applying this recipe", path.display()),
                "Check that --root points at the project directory".into(),
            ],
            Self::CommandFailed { command, .. } => vec![
                format!("Run `{}` by hand to see its full output", command),
                "Adjust the toolchain section of your configuration if the command is wrong".into(),
            ],
            Self::CommandSpawn { command, .. } => vec![
                format!("Make sure `{}` is installed and on PATH", command),
                "Run graft from the project root or pass --root".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::ApplyFailed { source, .. } => source.suggestions(),
            Self::RecipeNotFound { .. } => vec![
                "Try: graft list to see available recipes".into(),
                "Or pass a path to a .toml recipe file".into(),
            ],
            Self::RecipeLoad { path, .. } => vec![
                format!("Check the TOML syntax of {}", path.display()),
            ],
            Self::StoreLockError => vec![
                "The recipe store is locked".into(),
                "Try again in a moment".into(),
            ],
            Self::OperatorError { .. } => vec![
                "Use --yes to accept every default without prompting".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::RecipeNotFound { .. } => ErrorCategory::NotFound,
            Self::RecipeLoad { .. } => ErrorCategory::Validation,
            Self::AnchorNotFound { .. }
            | Self::AlreadyExists { .. }
            | Self::SourceMissing { .. }
            | Self::TargetMissing { .. }
            | Self::CommandFailed { .. }
            | Self::CommandSpawn { .. } => ErrorCategory::Execution,
            Self::ApplyFailed { source, .. } => source.category(),
            Self::FilesystemError { .. } | Self::OperatorError { .. } | Self::StoreLockError => {
                ErrorCategory::Internal
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_exists_and_missing_source_are_recoverable() {
        let recoverable = [
            ApplicationError::AlreadyExists { path: "a".into() },
            ApplicationError::SourceMissing { path: "b".into() },
        ];
        for err in recoverable {
            assert_eq!(err.severity(), Severity::Recoverable, "{err}");
        }

        let fatal = [
            ApplicationError::AnchorNotFound {
                path: "a".into(),
                anchor: "<body>".into(),
            },
            ApplicationError::CommandFailed {
                command: "bin/rails generate devise User".into(),
                code: Some(1),
            },
            ApplicationError::TargetMissing { path: "c".into() },
        ];
        for err in fatal {
            assert_eq!(err.severity(), Severity::Fatal, "{err}");
        }
    }

    #[test]
    fn command_failure_message_includes_code() {
        let err = ApplicationError::CommandFailed {
            command: "bundle add devise".into(),
            code: Some(7),
        };
        assert_eq!(err.to_string(), "Command `bundle add devise` failed with exit code 7");

        let signalled = ApplicationError::CommandFailed {
            command: "bin/rails db:migrate".into(),
            code: None,
        };
        assert!(signalled.to_string().ends_with("termination by signal"));
    }

    #[test]
    fn apply_failed_reports_index_and_inner_category() {
        let err = ApplicationError::ApplyFailed {
            index: 4,
            directive: "generate devise User".into(),
            source: Box::new(
                ApplicationError::CommandFailed {
                    command: "bin/rails generate devise User".into(),
                    code: Some(1),
                }
                .into(),
            ),
        };
        assert!(err.to_string().starts_with("Directive #4 (generate devise User) failed"));
        assert_eq!(err.category(), ErrorCategory::Execution);
    }
}
