//! Command handlers, one module per subcommand.
//!
//! Handlers translate arguments into service calls and print the result.
//! No recipe logic lives here.

pub mod apply;
pub mod completions;
pub mod config;
pub mod init;
pub mod list;
pub mod show;

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use graft_adapters::{InMemoryRecipeStore, RecipeLoader, recipe_loader};
use graft_core::{application::RecipeService, domain::Recipe};

use crate::{
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
};

/// Recipe catalogue: the built-ins plus every valid recipe found in the
/// configured recipes directory. A user recipe with a built-in's name
/// replaces it.
pub fn recipe_service(config: &AppConfig) -> CliResult<RecipeService> {
    let service = RecipeService::new(Box::new(InMemoryRecipeStore::with_builtin()?));

    if let Some(dir) = &config.recipes.dir {
        let dir = absolute(dir)?;
        if dir.is_dir() {
            for recipe in RecipeLoader::new(&dir).load_all()? {
                service.register(recipe)?;
            }
        } else {
            warn!(dir = %dir.display(), "configured recipes directory does not exist");
        }
    }

    Ok(service)
}

/// Resolve a `<RECIPE>` argument: a path when it names a `.toml` file or
/// contains a path separator, otherwise a catalogue name.
pub fn resolve_recipe(reference: &str, config: &AppConfig) -> CliResult<Recipe> {
    match recipe_path(reference) {
        Some(path) => {
            // Loaded recipes resolve their assets next to the file, so the
            // path must not stay relative to the working directory.
            let path = absolute(&path)?;
            if !path.is_file() {
                return Err(CliError::RecipeFileMissing { path });
            }
            debug!(path = %path.display(), "loading recipe file");
            recipe_loader::load_file(&path).with_cli_context(|| "loading recipe file")
        }
        None => Ok(recipe_service(config)?.get(reference)?),
    }
}

fn recipe_path(reference: &str) -> Option<PathBuf> {
    let path = Path::new(reference);
    let is_path = path.extension().is_some_and(|ext| ext == "toml")
        || reference.contains(std::path::MAIN_SEPARATOR)
        || reference.contains('/');
    is_path.then(|| path.to_path_buf())
}

/// Make `path` absolute against the working directory.
pub fn absolute(path: &Path) -> CliResult<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().with_cli_context(|| "reading the working directory")?;
    Ok(cwd.join(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use graft_adapters::builtin_recipes::DEVISE_TAILWIND;
    use graft_core::{application::ApplicationError, error::GraftError};
    use std::fs;
    use tempfile::TempDir;

    const SAY_HELLO: &str =
        "[recipe]\nname = \"hello\"\n\n[[directives]]\naction = \"print_message\"\ntext = \"hi\"\n";

    #[test]
    fn names_and_paths_are_told_apart() {
        assert_eq!(recipe_path(DEVISE_TAILWIND), None);
        assert_eq!(recipe_path("toast.toml"), Some(PathBuf::from("toast.toml")));
        assert_eq!(
            recipe_path("recipes/toast"),
            Some(PathBuf::from("recipes/toast"))
        );
    }

    #[test]
    fn builtin_recipe_resolves_by_name() {
        let recipe = resolve_recipe(DEVISE_TAILWIND, &AppConfig::default()).unwrap();
        assert_eq!(recipe.name, DEVISE_TAILWIND);
    }

    #[test]
    fn unknown_name_is_not_found() {
        let err = resolve_recipe("nope", &AppConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            CliError::Core(GraftError::Application(
                ApplicationError::RecipeNotFound { .. }
            ))
        ));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn missing_file_is_reported_before_parsing() {
        let err = resolve_recipe("/no/such/recipe.toml", &AppConfig::default()).unwrap_err();
        assert!(matches!(err, CliError::RecipeFileMissing { .. }));
    }

    #[test]
    fn recipes_dir_extends_the_catalogue() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("hello.toml"), SAY_HELLO).unwrap();
        let mut config = AppConfig::default();
        config.recipes.dir = Some(temp.path().to_path_buf());

        let names: Vec<_> = recipe_service(&config)
            .unwrap()
            .list()
            .unwrap()
            .into_iter()
            .map(|info| info.name)
            .collect();
        assert_eq!(names, vec![DEVISE_TAILWIND.to_string(), "hello".to_string()]);
    }

    #[test]
    fn recipe_file_resolves_by_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("hello.toml");
        fs::write(&path, SAY_HELLO).unwrap();

        let recipe = resolve_recipe(path.to_str().unwrap(), &AppConfig::default()).unwrap();
        assert_eq!(recipe.name, "hello");
        assert_eq!(recipe.assets.as_deref(), Some(temp.path()));
    }
}
