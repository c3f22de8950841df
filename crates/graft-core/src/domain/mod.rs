// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Graft.
//!
//! This module contains pure logic with no I/O. Filesystem access, operator
//! prompts and external commands are reached through ports (traits) defined
//! in the application layer.
//!
//! - **No I/O**: splicing, rendering and validation work on strings
//! - **Immutable directives**: executed strictly in declaration order
//! - **Serde-ready**: recipes (de)serialise with an `action` tag per directive
//
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod injection;
pub mod value_objects;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use entities::{
    answers::{Answers, pluralize, to_snake_case},
    directive::Directive,
    recipe::{Recipe, RecipeBuilder},
};

pub use error::{DomainError, ErrorCategory};

pub use injection::{SpliceOutcome, splice};

pub use value_objects::{CommandSpec, CommandStatus, DuplicateGuard, InjectPosition, Toolchain};

pub use entities::common::RelativePath;
pub use validation::DomainValidator;
