//! Filesystem-based recipe loader.
//!
//! Parses recipe files written in TOML into domain [`Recipe`] values.
//!
//! # Recipe file format
//!
//! ```toml
//! [recipe]
//! name        = "stimulus-toast"
//! description = "Toast notifications"   # optional
//! assets      = "files"                  # optional, relative to this file
//!
//! [[directives]]
//! action = "install_dependency"
//! name   = "toastify-js"
//!
//! [[directives]]
//! action  = "ask_question"
//! key     = "controller"
//! prompt  = "Controller name?"
//! default = "toast"
//!
//! [[directives]]
//! action    = "copy_directory"
//! source    = "controllers"
//! dest      = "app/javascript/controllers"
//! overwrite = true
//!
//! [[directives]]
//! action = "when_answered"
//! key    = "controller"
//!
//!   [[directives.directives]]
//!   action    = "run_generator"
//!   generator = "stimulus"
//!   args      = ["{{controller}}"]
//! ```
//!
//! `CopyDirectory` sources resolve against `assets`, which itself defaults to
//! the directory containing the recipe file.

use std::path::{Path, PathBuf};

use graft_core::{
    application::ApplicationError,
    domain::{Directive, DomainValidator as validator, Recipe},
    error::{GraftError, GraftResult},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

/// On-disk shape of a recipe file.
#[derive(Debug, Serialize, Deserialize)]
pub struct RecipeFile {
    pub recipe: RecipeSection,
    #[serde(default)]
    pub directives: Vec<Directive>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecipeSection {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assets: Option<PathBuf>,
}

/// Loads every `*.toml` recipe found under a directory.
pub struct RecipeLoader {
    recipes_dir: PathBuf,
}

impl RecipeLoader {
    /// Create a loader pointed at `recipes_dir`.
    pub fn new(recipes_dir: impl Into<PathBuf>) -> Self {
        Self {
            recipes_dir: recipes_dir.into(),
        }
    }

    /// Load every valid recipe below the directory (two levels deep, so
    /// `recipes/<name>/recipe.toml` layouts work too).
    ///
    /// Files that fail to parse or validate are skipped with a `WARN` log
    /// rather than failing the whole batch.
    #[instrument(skip(self), fields(dir = %self.recipes_dir.display()))]
    pub fn load_all(&self) -> GraftResult<Vec<Recipe>> {
        if !self.recipes_dir.is_dir() {
            return Err(ApplicationError::RecipeLoad {
                path: self.recipes_dir.clone(),
                reason: "recipes directory not found".into(),
            }
            .into());
        }

        let mut recipes = Vec::new();
        for entry in WalkDir::new(&self.recipes_dir)
            .max_depth(2)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "toml") {
                continue;
            }

            match load_file(path) {
                Ok(recipe) => {
                    debug!(recipe = %recipe.name, path = %path.display(), "loaded recipe");
                    recipes.push(recipe);
                }
                Err(e) => {
                    warn!(
                        path  = %path.display(),
                        error = %e,
                        "skipping recipe file due to load error"
                    );
                }
            }
        }

        debug!(count = recipes.len(), "finished loading recipes");
        Ok(recipes)
    }
}

/// Load and validate a single recipe file.
pub fn load_file(path: &Path) -> GraftResult<Recipe> {
    let raw = std::fs::read_to_string(path).map_err(|e| ApplicationError::RecipeLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_recipe(&raw, path.parent()).map_err(|e| match e {
        GraftError::Application(ApplicationError::RecipeLoad { reason, .. }) => {
            ApplicationError::RecipeLoad {
                path: path.to_path_buf(),
                reason,
            }
            .into()
        }
        other => other,
    })
}

/// Parse recipe TOML. When `base_dir` is given, the asset root is resolved
/// against it (and defaults to it).
pub fn parse_recipe(source: &str, base_dir: Option<&Path>) -> GraftResult<Recipe> {
    let file: RecipeFile = toml::from_str(source).map_err(|e| ApplicationError::RecipeLoad {
        path: PathBuf::new(),
        reason: e.to_string(),
    })?;

    let assets = match (base_dir, file.recipe.assets) {
        (Some(base), Some(assets)) => Some(base.join(assets)),
        (Some(base), None) => Some(base.to_path_buf()),
        (None, assets) => assets,
    };

    let recipe = Recipe {
        name: file.recipe.name,
        description: file.recipe.description,
        assets,
        directives: file.directives,
    };
    validator::validate_recipe(&recipe)?;
    Ok(recipe)
}

/// Render a recipe in the file format read by [`parse_recipe`].
pub fn to_toml(recipe: &Recipe) -> GraftResult<String> {
    let file = RecipeFile {
        recipe: RecipeSection {
            name: recipe.name.clone(),
            description: recipe.description.clone(),
            assets: recipe.assets.clone(),
        },
        directives: recipe.directives.clone(),
    };
    toml::to_string_pretty(&file).map_err(|e| GraftError::Internal {
        message: format!("failed to serialise recipe '{}': {e}", recipe.name),
    })
}
