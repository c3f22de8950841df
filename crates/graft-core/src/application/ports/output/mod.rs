//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the applier needs from external systems.
//! The `graft-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::domain::{CommandSpec, CommandStatus, Recipe};
use crate::error::GraftResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `graft_adapters::filesystem::LocalFilesystem` (production)
/// - `graft_adapters::filesystem::MemoryFilesystem` (testing, dry runs)
///
/// Paths passed in are already resolved against the project root or the
/// recipe's asset root.
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> GraftResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> GraftResult<()>;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> GraftResult<String>;

    /// Copy one file byte-for-byte.
    fn copy_file(&self, from: &Path, to: &Path) -> GraftResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is an existing directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Every file below `dir`, recursively, as paths relative to `dir`,
    /// sorted.
    fn list_files(&self, dir: &Path) -> GraftResult<Vec<PathBuf>>;
}

/// Port for the human operator.
///
/// Implemented by:
/// - `graft_adapters::operator::TerminalOperator` (interactive)
/// - `graft_adapters::operator::DefaultsOperator` (`--yes`)
/// - `graft_adapters::operator::ScriptedOperator` (testing)
pub trait OperatorChannel: Send + Sync {
    /// Block until the operator answers. Returns the raw answer; trimming
    /// and default fallback are applied by the caller.
    fn ask(&self, prompt: &str, default: Option<&str>) -> GraftResult<String>;

    /// Show a line of text to the operator.
    fn say(&self, text: &str) -> GraftResult<()>;
}

/// Port for delegated external commands (package installer, generators,
/// framework tasks).
///
/// Implemented by:
/// - `graft_adapters::runner::ProcessRunner` (spawns processes)
/// - `graft_adapters::runner::RecordingRunner` (testing, dry runs)
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    /// Run `command` in `cwd` to completion. Failing to start the process
    /// is an error; a non-zero exit is reported through the status.
    fn run(&self, command: &CommandSpec, cwd: &Path) -> GraftResult<CommandStatus>;
}

/// Port for recipe storage and retrieval.
///
/// Implemented by:
/// - `graft_adapters::recipe_store::InMemoryRecipeStore`
pub trait RecipeStore: Send + Sync {
    /// Get a recipe by name.
    fn get(&self, name: &str) -> GraftResult<Recipe>;

    /// List all recipes, sorted by name.
    fn list(&self) -> GraftResult<Vec<Recipe>>;

    /// Insert or replace a recipe.
    fn insert(&self, recipe: Recipe) -> GraftResult<()>;
}
