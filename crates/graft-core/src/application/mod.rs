//! Application layer for Graft.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (TemplateApplier, RecipeService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Report**: Per-directive outcomes of a run
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! recipe rules itself. Those live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod report;
pub mod services;

// Re-export main services
pub use services::{
    RecipeInfo, // DTO for recipe metadata
    RecipeService,
    TemplateApplier,
};

// Re-export port traits (for adapter implementation)
pub use ports::{CommandRunner, Filesystem, OperatorChannel, RecipeStore};

pub use error::{ApplicationError, Severity};
pub use report::{ApplyReport, StepOutcome, StepReport};
