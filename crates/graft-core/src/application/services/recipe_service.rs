//! Recipe Service - recipe catalogue operations.
//!
//! Handles lookup, listing and registration of recipes.
//! Separated from TemplateApplier for single responsibility.

use tracing::{debug, instrument};

use crate::{
    application::ports::RecipeStore,
    domain::{DomainValidator as validator, Recipe},
    error::GraftResult,
};

/// Information about a recipe for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RecipeInfo {
    pub name: String,
    pub description: String,
    pub directives: usize,
}

impl From<&Recipe> for RecipeInfo {
    fn from(recipe: &Recipe) -> Self {
        Self {
            name: recipe.name.clone(),
            description: recipe.description.clone(),
            directives: recipe.directive_count(),
        }
    }
}

/// Service for recipe operations.
pub struct RecipeService {
    store: Box<dyn RecipeStore>,
}

impl RecipeService {
    /// Create a new recipe service.
    pub fn new(store: Box<dyn RecipeStore>) -> Self {
        Self { store }
    }

    /// Get a recipe by name.
    pub fn get(&self, name: &str) -> GraftResult<Recipe> {
        self.store.get(name)
    }

    /// Validate and add (or replace) a recipe.
    #[instrument(skip_all, fields(recipe = %recipe.name))]
    pub fn register(&self, recipe: Recipe) -> GraftResult<()> {
        validator::validate_recipe(&recipe)?;
        debug!(directives = recipe.directive_count(), "Registering recipe");
        self.store.insert(recipe)
    }

    /// List all recipes.
    pub fn list(&self) -> GraftResult<Vec<RecipeInfo>> {
        Ok(self.store.list()?.iter().map(RecipeInfo::from).collect())
    }

    /// Numbered plan lines for a recipe, without executing anything.
    pub fn plan(&self, name: &str) -> GraftResult<Vec<String>> {
        Ok(self.store.get(name)?.plan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ApplicationError;
    use crate::domain::Directive;
    use crate::error::GraftError;
    use std::collections::BTreeMap;
    use std::sync::RwLock;

    #[derive(Default)]
    struct MapStore {
        recipes: RwLock<BTreeMap<String, Recipe>>,
    }

    impl RecipeStore for MapStore {
        fn get(&self, name: &str) -> GraftResult<Recipe> {
            self.recipes
                .read()
                .map_err(|_| ApplicationError::StoreLockError)?
                .get(name)
                .cloned()
                .ok_or_else(|| {
                    ApplicationError::RecipeNotFound {
                        name: name.to_string(),
                    }
                    .into()
                })
        }

        fn list(&self) -> GraftResult<Vec<Recipe>> {
            Ok(self
                .recipes
                .read()
                .map_err(|_| ApplicationError::StoreLockError)?
                .values()
                .cloned()
                .collect())
        }

        fn insert(&self, recipe: Recipe) -> GraftResult<()> {
            self.recipes
                .write()
                .map_err(|_| ApplicationError::StoreLockError)?
                .insert(recipe.name.clone(), recipe);
            Ok(())
        }
    }

    fn hello() -> Recipe {
        Recipe::builder("hello")
            .description("Says hello")
            .directive(Directive::say("hello"))
            .build()
            .unwrap()
    }

    #[test]
    fn register_then_list() {
        let service = RecipeService::new(Box::new(MapStore::default()));
        service.register(hello()).unwrap();

        assert_eq!(
            service.list().unwrap(),
            vec![RecipeInfo {
                name: "hello".into(),
                description: "Says hello".into(),
                directives: 1,
            }]
        );
        assert_eq!(service.plan("hello").unwrap(), vec!["  1. say \"hello\"".to_string()]);
    }

    #[test]
    fn register_rejects_invalid_recipe() {
        let service = RecipeService::new(Box::new(MapStore::default()));
        let invalid = Recipe {
            directives: vec![Directive::say("{{who}}")],
            ..hello()
        };
        assert!(matches!(service.register(invalid), Err(GraftError::Domain(_))));
        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn unknown_recipe_is_not_found() {
        let service = RecipeService::new(Box::new(MapStore::default()));
        assert!(matches!(
            service.get("missing"),
            Err(GraftError::Application(ApplicationError::RecipeNotFound { .. }))
        ));
    }
}
