//! In-memory copy of a user's lists, catalog and recipes.
//!
//! All mutators here are fail-soft: a lookup miss is logged with
//! `tracing::error!` and the call returns `false` without touching state.

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::core::catalog;
use crate::core::ingredient::Ingredient;
use crate::core::list::List;
use crate::core::recipe::Recipe;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    lists: Vec<List>,
    catalog: Vec<Ingredient>,
    recipes: Vec<Recipe>,
}

impl Snapshot {
    pub fn new(lists: Vec<List>, catalog: Vec<Ingredient>, recipes: Vec<Recipe>) -> Self {
        Snapshot {
            lists,
            catalog,
            recipes,
        }
    }

    /// Built-in catalog plus the example lists.
    pub fn seeded() -> Self {
        Snapshot::new(catalog::example_lists(), catalog::builtin(), Vec::new())
    }

    pub fn lists(&self) -> &[List] {
        &self.lists
    }

    pub fn catalog(&self) -> &[Ingredient] {
        &self.catalog
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn list(&self, name: &str) -> Option<&List> {
        self.lists.iter().find(|l| l.name() == name)
    }

    pub fn recipe(&self, name: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.name == name)
    }

    pub fn set_lists(&mut self, lists: Vec<List>) {
        self.lists = lists;
    }

    pub fn set_catalog(&mut self, catalog: Vec<Ingredient>) {
        self.catalog = catalog;
    }

    pub fn set_recipes(&mut self, recipes: Vec<Recipe>) {
        self.recipes = recipes;
    }

    fn list_mut(&mut self, name: &str) -> Option<&mut List> {
        let found = self.lists.iter_mut().find(|l| l.name() == name);
        if found.is_none() {
            error!(list = name, "list not found");
        }
        found
    }

    fn recipe_mut(&mut self, name: &str) -> Option<&mut Recipe> {
        let found = self.recipes.iter_mut().find(|r| r.name == name);
        if found.is_none() {
            error!(recipe = name, "recipe not found");
        }
        found
    }

    // =========================================================================
    // Lists
    // =========================================================================

    pub fn create_list(&mut self, name: &str, seed: Vec<Ingredient>) -> bool {
        if self.list(name).is_some() {
            error!(list = name, "a list with this name already exists");
            return false;
        }
        self.lists.push(List::new(name, seed));
        true
    }

    pub fn delete_list(&mut self, name: &str) -> bool {
        let before = self.lists.len();
        self.lists.retain(|l| l.name() != name);
        if self.lists.len() == before {
            error!(list = name, "list not found");
            return false;
        }
        true
    }

    pub fn rename_list(&mut self, old_name: &str, new_name: &str) -> bool {
        if old_name != new_name && self.list(new_name).is_some() {
            error!(list = old_name, new_name, "a list with this name already exists");
            return false;
        }
        match self.list_mut(old_name) {
            Some(list) => {
                list.set_list_name(new_name);
                true
            }
            None => false,
        }
    }

    pub fn add_ingredient_to_list(&mut self, list_name: &str, ingredient: Ingredient) -> bool {
        match self.list_mut(list_name) {
            Some(list) => {
                list.add_or_update_ingredient(ingredient);
                true
            }
            None => false,
        }
    }

    pub fn remove_ingredient_from_list(&mut self, list_name: &str, ingredient: &Ingredient) -> bool {
        let Some(list) = self.list_mut(list_name) else {
            return false;
        };
        let removed = list.remove_ingredient(ingredient);
        if !removed {
            debug!(list = list_name, ingredient = %ingredient.name, "ingredient not in list");
        }
        removed
    }

    pub fn update_ingredient_in_list(&mut self, list_name: &str, ingredient: Ingredient) -> bool {
        let Some(list) = self.list_mut(list_name) else {
            return false;
        };
        let name = ingredient.name.clone();
        let replaced = list.replace_ingredient(ingredient);
        if !replaced {
            error!(list = list_name, ingredient = %name, "ingredient not in list");
        }
        replaced
    }

    /// Move an ingredient between lists, merging into the target.
    pub fn move_ingredient(&mut self, from: &str, to: &str, ingredient: &Ingredient) -> bool {
        if self.list(to).is_none() {
            error!(list = to, "list not found");
            return false;
        }
        let Some(source) = self.list_mut(from) else {
            return false;
        };
        let Some(entry) = source.find(&ingredient.name, ingredient.is_custom).cloned() else {
            error!(list = from, ingredient = %ingredient.name, "ingredient not in list");
            return false;
        };
        source.remove_ingredient(&entry);
        self.add_ingredient_to_list(to, entry)
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Add a user-defined ingredient to the catalog.
    pub fn add_custom_ingredient(&mut self, mut ingredient: Ingredient) -> bool {
        ingredient.is_custom = true;
        ingredient.amount = None;
        ingredient.unit = None;
        if self.catalog.iter().any(|i| i.equal_to(&ingredient)) {
            error!(ingredient = %ingredient.name, "custom ingredient already exists");
            return false;
        }
        self.catalog.push(ingredient);
        true
    }

    /// Remove a user-defined ingredient. Built-in entries are never removed.
    pub fn remove_custom_ingredient(&mut self, name: &str) -> bool {
        match self.catalog.iter().position(|i| i.is(name, true)) {
            Some(index) => {
                self.catalog.remove(index);
                true
            }
            None => {
                error!(ingredient = name, "custom ingredient not found");
                false
            }
        }
    }

    // =========================================================================
    // Recipes
    // =========================================================================

    pub fn create_recipe(&mut self, recipe: Recipe) -> bool {
        if self.recipe(&recipe.name).is_some() {
            error!(recipe = %recipe.name, "a recipe with this name already exists");
            return false;
        }
        self.recipes.push(recipe);
        true
    }

    pub fn delete_recipe(&mut self, name: &str) -> bool {
        let before = self.recipes.len();
        self.recipes.retain(|r| r.name != name);
        if self.recipes.len() == before {
            error!(recipe = name, "recipe not found");
            return false;
        }
        true
    }

    /// Replace the recipe with the same name.
    pub fn replace_recipe(&mut self, recipe: Recipe) -> bool {
        match self.recipe_mut(&recipe.name) {
            Some(existing) => {
                *existing = recipe;
                true
            }
            None => false,
        }
    }

    pub fn add_ingredient_to_recipe(&mut self, recipe_name: &str, ingredient: Ingredient) -> bool {
        match self.recipe_mut(recipe_name) {
            Some(recipe) => {
                recipe.add_ingredient(ingredient);
                true
            }
            None => false,
        }
    }

    pub fn remove_ingredient_from_recipe(
        &mut self,
        recipe_name: &str,
        ingredient: &Ingredient,
    ) -> bool {
        let Some(recipe) = self.recipe_mut(recipe_name) else {
            return false;
        };
        let removed = recipe.remove_ingredient(ingredient);
        if !removed {
            debug!(recipe = recipe_name, ingredient = %ingredient.name, "ingredient not in recipe");
        }
        removed
    }

    pub fn add_step_to_recipe(&mut self, recipe_name: &str, step: &str) -> bool {
        match self.recipe_mut(recipe_name) {
            Some(recipe) => {
                recipe.add_step(step);
                true
            }
            None => false,
        }
    }

    /// Delete the step at 1-based `index`.
    pub fn delete_step_from_recipe(&mut self, recipe_name: &str, index: usize) -> bool {
        let Some(recipe) = self.recipe_mut(recipe_name) else {
            return false;
        };
        match recipe.delete_step(index) {
            Ok(_) => true,
            Err(e) => {
                error!(recipe = recipe_name, "{}", e);
                false
            }
        }
    }

    /// Replace the step at 1-based `index`.
    pub fn update_step_in_recipe(&mut self, recipe_name: &str, index: usize, step: &str) -> bool {
        let Some(recipe) = self.recipe_mut(recipe_name) else {
            return false;
        };
        match recipe.update_step(index, step) {
            Ok(()) => true,
            Err(e) => {
                error!(recipe = recipe_name, "{}", e);
                false
            }
        }
    }
}
