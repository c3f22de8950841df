//! In-memory recipe store with built-in recipes.

use std::{
    collections::BTreeMap,
    sync::{Arc, RwLock},
};

use graft_core::{
    application::{ApplicationError, ports::RecipeStore},
    domain::{DomainValidator as validator, Recipe},
    error::GraftResult,
};
use tracing::debug;

use crate::builtin_recipes;

/// Thread-safe in-memory recipe store, keyed by recipe name.
#[derive(Clone)]
pub struct InMemoryRecipeStore {
    inner: Arc<RwLock<BTreeMap<String, Recipe>>>,
}

impl InMemoryRecipeStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Create a store with built-in recipes loaded.
    pub fn with_builtin() -> GraftResult<Self> {
        let store = Self::new();
        store.load_builtin()?;
        Ok(store)
    }

    /// Load built-in recipes.
    pub fn load_builtin(&self) -> GraftResult<()> {
        for recipe in builtin_recipes::all_recipes()? {
            self.insert(recipe)?;
        }
        Ok(())
    }

    /// Get the number of recipes.
    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.len()).unwrap_or_default()
    }

    /// Check if store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryRecipeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeStore for InMemoryRecipeStore {
    fn get(&self, name: &str) -> GraftResult<Recipe> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner.get(name).cloned().ok_or_else(|| {
            ApplicationError::RecipeNotFound {
                name: name.to_string(),
            }
            .into()
        })
    }

    fn list(&self) -> GraftResult<Vec<Recipe>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        Ok(inner.values().cloned().collect())
    }

    fn insert(&self, recipe: Recipe) -> GraftResult<()> {
        // Validate before insertion
        validator::validate_recipe(&recipe)?;

        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        if inner.contains_key(&recipe.name) {
            debug!(recipe = %recipe.name, "Replacing recipe");
        }
        inner.insert(recipe.name.clone(), recipe);
        Ok(())
    }
}
