//! Infrastructure adapters for Graft.
//!
//! This crate implements the ports defined in `graft-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod builtin_recipes;
pub mod filesystem;
pub mod operator;
pub mod recipe_loader;
pub mod recipe_store;
pub mod runner;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use operator::{DefaultsOperator, ScriptedOperator, TerminalOperator};
pub use recipe_loader::RecipeLoader;
pub use recipe_store::InMemoryRecipeStore;
pub use runner::{ProcessRunner, RecordingRunner};
