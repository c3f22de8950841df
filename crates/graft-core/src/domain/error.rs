// ============================================================================
// domain/error.rs - RECIPE & DIRECTIVE ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (carried inside step reports and wrapped failures)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid recipe: {0}")]
    InvalidRecipe(String),

    #[error("Recipe '{name}' has no directives")]
    EmptyRecipe { name: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Answer key '{key}' is declared more than once")]
    DuplicateAnswerKey { key: String },

    #[error("Directive #{step} uses '{{{{{key}}}}}' before it is asked")]
    UndeclaredAnswer { key: String, step: usize },

    #[error("Directive #{step} has an empty {field}")]
    EmptyField { field: &'static str, step: usize },

    #[error("Invalid {field} '{value}'")]
    InvalidValue { field: &'static str, value: String },

    // ========================================================================
    // Toolchain Errors
    // ========================================================================
    #[error("Toolchain command for '{purpose}' is empty")]
    EmptyToolchainCommand { purpose: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidRecipe(msg) => vec![
                "Check the recipe definition".into(),
                format!("Details: {}", msg),
            ],
            Self::EmptyRecipe { name } => vec![
                format!("Recipe '{}' must declare at least one directive", name),
                "Add a [[directives]] table to the recipe file".into(),
            ],
            Self::AbsolutePathNotAllowed { path } => vec![
                format!("'{}' must be relative to the project root", path),
                "Remove the leading '/' from the path".into(),
            ],
            Self::DuplicateAnswerKey { key } => vec![
                format!("Rename one of the questions bound to '{}'", key),
            ],
            Self::UndeclaredAnswer { key, .. } => vec![
                format!("Add an ask_question directive with key = \"{}\"", key),
                "Questions must come before the directives that use their answers".into(),
            ],
            Self::EmptyToolchainCommand { purpose } => vec![
                format!("Set toolchain.{} in your configuration", purpose),
                "Example: toolchain.generate = [\"bin/rails\", \"generate\"]".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::EmptyToolchainCommand { .. } => ErrorCategory::Configuration,
            _ => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
}
