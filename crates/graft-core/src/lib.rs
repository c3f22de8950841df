//! Graft Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for Graft, a tool
//! that applies ordered recipes of scaffolding directives to an existing
//! project, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │             graft-cli (CLI)             │
//! │       (Implements Driving Ports)        │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │          Application Services           │
//! │    (TemplateApplier, RecipeService)     │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │ (Filesystem, Operator, Runner, Store)   │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     graft-adapters (Infrastructure)     │
//! │ (LocalFilesystem, ProcessRunner, etc.)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │   (Directive, Recipe, Answers, splice)  │
//! │        No External Dependencies         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use graft_core::prelude::*;
//! use std::path::Path;
//!
//! # fn run(
//! #     filesystem: Box<dyn Filesystem>,
//! #     operator: Box<dyn OperatorChannel>,
//! #     runner: Box<dyn CommandRunner>,
//! # ) -> GraftResult<()> {
//! let recipe = Recipe::builder("hello")
//!     .directive(Directive::ask("name", "Your name?", Some("World")))
//!     .directive(Directive::create_file("HELLO", "Hello, {{name}}!\n", false))
//!     .build()?;
//!
//! let applier = TemplateApplier::new(filesystem, operator, runner);
//! let report = applier.apply(&recipe, Path::new("."))?;
//! println!("{} applied", report.applied());
//! # Ok(())
//! # }
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ApplyReport, RecipeInfo, RecipeService, StepOutcome, TemplateApplier,
        ports::{CommandRunner, Filesystem, OperatorChannel, RecipeStore},
    };
    pub use crate::domain::{
        Answers, CommandSpec, CommandStatus, Directive, DuplicateGuard, InjectPosition, Recipe,
        RecipeBuilder, RelativePath, Toolchain,
    };
    pub use crate::error::{GraftError, GraftResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
