//! Offline backend that keeps everything in a local [`Snapshot`].
//!
//! When opened with a path, the store is read from and written back to a
//! JSON file so state survives between CLI invocations.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::backend::{Backend, BackendError};
use crate::core::{Ingredient, List, Recipe, Snapshot, Unit};
use crate::util::fs::{read_to_string, write_string};

#[derive(Debug, Clone)]
pub struct MockBackend {
    store: Snapshot,
    path: Option<PathBuf>,
}

impl MockBackend {
    /// In-memory store seeded with the built-in catalog and example lists.
    pub fn seeded() -> Self {
        MockBackend::with_store(Snapshot::seeded())
    }

    pub fn with_store(store: Snapshot) -> Self {
        MockBackend { store, path: None }
    }

    /// Load the store from `path`, or seed a fresh one if the file is missing.
    pub fn open(path: &Path) -> Result<Self> {
        let store = if path.exists() {
            let contents = read_to_string(path)?;
            serde_json::from_str(&contents)
                .with_context(|| format!("failed to parse offline store: {}", path.display()))?
        } else {
            debug!(path = %path.display(), "no offline store yet, seeding");
            Snapshot::seeded()
        };
        Ok(MockBackend {
            store,
            path: Some(path.to_path_buf()),
        })
    }

    pub fn store(&self) -> &Snapshot {
        &self.store
    }

    /// Write the store back to disk if this backend is file-backed.
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let contents =
            serde_json::to_string_pretty(&self.store).context("failed to serialize offline store")?;
        write_string(path, &contents)
    }

    fn commit(&self, operation: &'static str, changed: bool) -> Result<(), BackendError> {
        if !changed {
            return Err(BackendError::Rejected {
                operation,
                reason: "no matching entry, or the name is already taken".to_string(),
            });
        }
        if let Err(e) = self.save() {
            warn!("failed to save offline store: {:#}", e);
        }
        Ok(())
    }

    fn lists(&self) -> Vec<List> {
        self.store.lists().to_vec()
    }

    fn catalog(&self) -> Vec<Ingredient> {
        self.store.catalog().to_vec()
    }

    fn recipes(&self) -> Vec<Recipe> {
        self.store.recipes().to_vec()
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        MockBackend::seeded()
    }
}

impl Backend for MockBackend {
    fn get_all_ingredients(&mut self, _token: &str) -> Result<Vec<Ingredient>, BackendError> {
        Ok(self.catalog())
    }

    fn get_my_lists(&mut self, _token: &str) -> Result<Vec<List>, BackendError> {
        Ok(self.lists())
    }

    fn delete_list(&mut self, _token: &str, list_name: &str) -> Result<Vec<List>, BackendError> {
        let changed = self.store.delete_list(list_name);
        self.commit("delete list", changed)?;
        Ok(self.lists())
    }

    fn add_ingredient(
        &mut self,
        _token: &str,
        list_name: &str,
        ingredient: &Ingredient,
    ) -> Result<Vec<List>, BackendError> {
        let changed = self.store.add_ingredient_to_list(list_name, ingredient.clone());
        self.commit("add ingredient", changed)?;
        Ok(self.lists())
    }

    fn get_all_measurements(&mut self, _token: &str) -> Result<Vec<Unit>, BackendError> {
        Ok(Unit::ALL.to_vec())
    }

    fn delete_ingredient_from_list(
        &mut self,
        _token: &str,
        list_name: &str,
        ingredient: &Ingredient,
    ) -> Result<Vec<List>, BackendError> {
        let changed = self.store.remove_ingredient_from_list(list_name, ingredient);
        self.commit("delete ingredient", changed)?;
        Ok(self.lists())
    }

    fn update_ingredient(
        &mut self,
        _token: &str,
        list_name: &str,
        ingredient: &Ingredient,
    ) -> Result<Vec<List>, BackendError> {
        let changed = self
            .store
            .update_ingredient_in_list(list_name, ingredient.clone());
        self.commit("update ingredient", changed)?;
        Ok(self.lists())
    }

    fn create_new_list(
        &mut self,
        _token: &str,
        list_name: &str,
        ingredients: &[Ingredient],
    ) -> Result<Vec<List>, BackendError> {
        let changed = self.store.create_list(list_name, ingredients.to_vec());
        self.commit("create list", changed)?;
        Ok(self.lists())
    }

    fn move_ingredient(
        &mut self,
        _token: &str,
        from: &str,
        to: &str,
        ingredient: &Ingredient,
    ) -> Result<Vec<List>, BackendError> {
        let changed = self.store.move_ingredient(from, to, ingredient);
        self.commit("move ingredient", changed)?;
        Ok(self.lists())
    }

    fn rename_list(
        &mut self,
        _token: &str,
        old_name: &str,
        new_name: &str,
    ) -> Result<Vec<List>, BackendError> {
        let changed = self.store.rename_list(old_name, new_name);
        self.commit("rename list", changed)?;
        Ok(self.lists())
    }

    fn create_custom_ingredient(
        &mut self,
        _token: &str,
        ingredient: &Ingredient,
    ) -> Result<Vec<Ingredient>, BackendError> {
        let changed = self.store.add_custom_ingredient(ingredient.clone());
        self.commit("create custom ingredient", changed)?;
        Ok(self.catalog())
    }

    fn delete_custom_ingredient(
        &mut self,
        _token: &str,
        name: &str,
    ) -> Result<Vec<Ingredient>, BackendError> {
        let changed = self.store.remove_custom_ingredient(name);
        self.commit("delete custom ingredient", changed)?;
        Ok(self.catalog())
    }

    fn get_all_recipes(&mut self, _token: &str) -> Result<Vec<Recipe>, BackendError> {
        Ok(self.recipes())
    }

    fn create_recipe(&mut self, _token: &str, recipe: &Recipe) -> Result<Vec<Recipe>, BackendError> {
        let changed = self.store.create_recipe(recipe.clone());
        self.commit("create recipe", changed)?;
        Ok(self.recipes())
    }

    fn update_recipe(&mut self, _token: &str, recipe: &Recipe) -> Result<Vec<Recipe>, BackendError> {
        let changed = self.store.replace_recipe(recipe.clone());
        self.commit("update recipe", changed)?;
        Ok(self.recipes())
    }

    fn delete_recipe(&mut self, _token: &str, name: &str) -> Result<Vec<Recipe>, BackendError> {
        let changed = self.store.delete_recipe(name);
        self.commit("delete recipe", changed)?;
        Ok(self.recipes())
    }

    fn add_ingredient_to_recipe(
        &mut self,
        _token: &str,
        recipe_name: &str,
        ingredient: &Ingredient,
    ) -> Result<Vec<Recipe>, BackendError> {
        let changed = self
            .store
            .add_ingredient_to_recipe(recipe_name, ingredient.clone());
        self.commit("add ingredient to recipe", changed)?;
        Ok(self.recipes())
    }

    fn delete_ingredient_from_recipe(
        &mut self,
        _token: &str,
        recipe_name: &str,
        ingredient: &Ingredient,
    ) -> Result<Vec<Recipe>, BackendError> {
        let changed = self
            .store
            .remove_ingredient_from_recipe(recipe_name, ingredient);
        self.commit("delete ingredient from recipe", changed)?;
        Ok(self.recipes())
    }

    fn create_user(&mut self, _token: &str, _email: Option<&str>) -> Result<(), BackendError> {
        Ok(())
    }
}
