//! The signed-in user's session.
//!
//! A [`Session`] pairs an [`Authenticator`] with a [`Backend`] and caches the
//! latest collections the backend returned. Reads are served from the cache;
//! every mutation goes through the backend and replaces the cached
//! collection with the refreshed one it returns.
//!
//! Mutators never fail loudly. A list or recipe that cannot be found, an
//! expired token or a failed request is logged with `tracing::error!` and
//! the call returns `false` with the cache untouched.

pub mod factory;

use tracing::{debug, error, info};
use url::Url;

use crate::auth::{AuthError, Authenticator, Credentials, LoginStep, MockAuth, SessionKind};
use crate::backend::{Backend, BackendError, MockBackend};
use crate::core::{catalog, Ingredient, List, Recipe, Snapshot, Unit};

pub use factory::{create_session, create_session_with_transport};

pub struct Session {
    auth: Box<dyn Authenticator>,
    backend: Box<dyn Backend>,
    snapshot: Snapshot,
}

impl Session {
    /// Assemble a session with an empty cache. Call [`Session::refresh`] to fill it.
    pub fn new(auth: Box<dyn Authenticator>, backend: Box<dyn Backend>) -> Self {
        Session {
            auth,
            backend,
            snapshot: Snapshot::default(),
        }
    }

    /// Signed-in offline session over a fresh in-memory store.
    pub fn mock() -> Self {
        let mut session = Session::new(
            Box::new(MockAuth::signed_in()),
            Box::new(MockBackend::seeded()),
        );
        session.refresh();
        session
    }

    pub fn kind(&self) -> SessionKind {
        self.auth.kind()
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    pub fn login(&mut self) -> Result<LoginStep, AuthError> {
        let step = self.auth.login()?;
        if step == LoginStep::Complete {
            self.refresh();
        }
        Ok(step)
    }

    /// Sign out and drop the cached collections.
    pub fn logout(&mut self) -> Result<Option<Url>, AuthError> {
        let url = self.auth.logout()?;
        self.snapshot = Snapshot::default();
        Ok(url)
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_authenticated()
    }

    pub fn is_processing(&self) -> bool {
        self.auth.is_processing()
    }

    /// Store credentials, register the user with the backend, and refetch.
    ///
    /// Registration is best effort: a failure is logged and the login still
    /// counts. Returns `false` only when the credentials could not be stored.
    pub fn complete_login(&mut self, credentials: Credentials) -> bool {
        if let Err(e) = self.auth.complete_login(credentials) {
            error!("failed to complete login: {}", e);
            return false;
        }

        let email = self.auth.email();
        if self
            .call("create user", |backend, token| {
                backend.create_user(token, email.as_deref())
            })
            .is_some()
        {
            info!("registered user with backend");
        }

        self.refresh();
        true
    }

    pub fn access_token(&mut self) -> Result<String, AuthError> {
        self.auth.access_token()
    }

    pub fn email(&self) -> Option<String> {
        self.auth.email()
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn lists(&self) -> &[List] {
        self.snapshot.lists()
    }

    pub fn list(&self, name: &str) -> Option<&List> {
        self.snapshot.list(name)
    }

    /// The catalog: built-in plus custom ingredients.
    pub fn all_ingredients(&self) -> &[Ingredient] {
        self.snapshot.catalog()
    }

    pub fn search_catalog(&self, query: &str) -> Vec<&Ingredient> {
        catalog::search(self.snapshot.catalog(), query)
    }

    pub fn recipes(&self) -> &[Recipe] {
        self.snapshot.recipes()
    }

    pub fn recipe(&self, name: &str) -> Option<&Recipe> {
        self.snapshot.recipe(name)
    }

    /// Units the backend accepts. Empty if the request fails.
    pub fn measurements(&mut self) -> Vec<Unit> {
        self.call("get all measurements", |backend, token| {
            backend.get_all_measurements(token)
        })
        .unwrap_or_default()
    }

    /// Refetch catalog, lists and recipes. Collections whose fetch fails
    /// keep their cached value.
    pub fn refresh(&mut self) -> bool {
        let catalog = self.call("get all ingredients", |b, t| b.get_all_ingredients(t));
        let lists = self.call("get my lists", |b, t| b.get_my_lists(t));
        let recipes = self.call("get all recipes", |b, t| b.get_all_recipes(t));

        let complete = catalog.is_some() && lists.is_some() && recipes.is_some();
        if let Some(catalog) = catalog {
            self.snapshot.set_catalog(catalog);
        }
        self.apply_lists(lists);
        self.apply_recipes(recipes);
        complete
    }

    // =========================================================================
    // Lists
    // =========================================================================

    /// Replace the cached lists without contacting the backend.
    pub fn set_lists(&mut self, lists: Vec<List>) {
        self.snapshot.set_lists(lists);
    }

    pub fn create_list(&mut self, name: &str, seed: Vec<Ingredient>) -> bool {
        if self.snapshot.list(name).is_some() {
            error!(list = name, "a list with this name already exists");
            return false;
        }
        let lists = self.call("create list", |b, t| b.create_new_list(t, name, &seed));
        self.apply_lists(lists)
    }

    pub fn delete_list(&mut self, name: &str) -> bool {
        if self.require_list(name).is_none() {
            return false;
        }
        let lists = self.call("delete list", |b, t| b.delete_list(t, name));
        self.apply_lists(lists)
    }

    pub fn rename_list(&mut self, old_name: &str, new_name: &str) -> bool {
        if self.require_list(old_name).is_none() {
            return false;
        }
        if old_name != new_name && self.snapshot.list(new_name).is_some() {
            error!(list = old_name, new_name, "a list with this name already exists");
            return false;
        }
        let lists = self.call("rename list", |b, t| b.rename_list(t, old_name, new_name));
        self.apply_lists(lists)
    }

    /// Add an ingredient, merging amounts with an existing equal entry.
    pub fn add_ingredient_to_list(&mut self, list_name: &str, ingredient: Ingredient) -> bool {
        if self.require_list(list_name).is_none() {
            return false;
        }
        let lists = self.call("add ingredient", |b, t| {
            b.add_ingredient(t, list_name, &ingredient)
        });
        self.apply_lists(lists)
    }

    /// Remove an ingredient. Absent ingredients are a no-op.
    pub fn remove_ingredient_from_list(&mut self, list_name: &str, ingredient: &Ingredient) -> bool {
        let Some(list) = self.require_list(list_name) else {
            return false;
        };
        if !list.contains(ingredient) {
            debug!(list = list_name, ingredient = %ingredient.name, "ingredient not in list");
            return false;
        }
        let lists = self.call("delete ingredient from list", |b, t| {
            b.delete_ingredient_from_list(t, list_name, ingredient)
        });
        self.apply_lists(lists)
    }

    /// Overwrite an entry's amount and unit.
    pub fn update_ingredient_in_list(&mut self, list_name: &str, ingredient: Ingredient) -> bool {
        let Some(list) = self.require_list(list_name) else {
            return false;
        };
        if !list.contains(&ingredient) {
            error!(list = list_name, ingredient = %ingredient.name, "ingredient not in list");
            return false;
        }
        let lists = self.call("update ingredient", |b, t| {
            b.update_ingredient(t, list_name, &ingredient)
        });
        self.apply_lists(lists)
    }

    pub fn move_ingredient(&mut self, from: &str, to: &str, ingredient: &Ingredient) -> bool {
        if self.require_list(to).is_none() {
            return false;
        }
        let Some(source) = self.require_list(from) else {
            return false;
        };
        if !source.contains(ingredient) {
            error!(list = from, ingredient = %ingredient.name, "ingredient not in list");
            return false;
        }
        let lists = self.call("move ingredient", |b, t| {
            b.move_ingredient(t, from, to, ingredient)
        });
        self.apply_lists(lists)
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Add a user-defined ingredient to the catalog.
    pub fn add_custom_ingredient(&mut self, mut ingredient: Ingredient) -> bool {
        ingredient.is_custom = true;
        ingredient.amount = None;
        ingredient.unit = None;
        if self.snapshot.catalog().iter().any(|i| i.equal_to(&ingredient)) {
            error!(ingredient = %ingredient.name, "custom ingredient already exists");
            return false;
        }
        let catalog = self.call("create custom ingredient", |b, t| {
            b.create_custom_ingredient(t, &ingredient)
        });
        self.apply_catalog(catalog)
    }

    pub fn remove_custom_ingredient(&mut self, name: &str) -> bool {
        if !self.snapshot.catalog().iter().any(|i| i.is(name, true)) {
            error!(ingredient = name, "custom ingredient not found");
            return false;
        }
        let catalog = self.call("delete custom ingredient", |b, t| {
            b.delete_custom_ingredient(t, name)
        });
        self.apply_catalog(catalog)
    }

    // =========================================================================
    // Recipes
    // =========================================================================

    pub fn create_recipe(&mut self, recipe: Recipe) -> bool {
        if self.snapshot.recipe(&recipe.name).is_some() {
            error!(recipe = %recipe.name, "a recipe with this name already exists");
            return false;
        }
        let recipes = self.call("create recipe", |b, t| b.create_recipe(t, &recipe));
        self.apply_recipes(recipes)
    }

    pub fn delete_recipe(&mut self, name: &str) -> bool {
        if self.require_recipe(name).is_none() {
            return false;
        }
        let recipes = self.call("delete recipe", |b, t| b.delete_recipe(t, name));
        self.apply_recipes(recipes)
    }

    pub fn add_ingredient_to_recipe(&mut self, recipe_name: &str, ingredient: Ingredient) -> bool {
        if self.require_recipe(recipe_name).is_none() {
            return false;
        }
        let recipes = self.call("add ingredient to recipe", |b, t| {
            b.add_ingredient_to_recipe(t, recipe_name, &ingredient)
        });
        self.apply_recipes(recipes)
    }

    pub fn remove_ingredient_from_recipe(
        &mut self,
        recipe_name: &str,
        ingredient: &Ingredient,
    ) -> bool {
        let Some(recipe) = self.require_recipe(recipe_name) else {
            return false;
        };
        if !recipe.ingredients.contains(ingredient) {
            debug!(recipe = recipe_name, ingredient = %ingredient.name, "ingredient not in recipe");
            return false;
        }
        let recipes = self.call("delete ingredient from recipe", |b, t| {
            b.delete_ingredient_from_recipe(t, recipe_name, ingredient)
        });
        self.apply_recipes(recipes)
    }

    pub fn add_step_to_recipe(&mut self, recipe_name: &str, step: &str) -> bool {
        let Some(mut recipe) = self.require_recipe(recipe_name).cloned() else {
            return false;
        };
        recipe.add_step(step);
        self.push_recipe(recipe)
    }

    /// Delete the step at 1-based `index`. Out-of-range indexes are logged
    /// and leave the recipe unchanged.
    pub fn delete_step_from_recipe(&mut self, recipe_name: &str, index: usize) -> bool {
        let Some(mut recipe) = self.require_recipe(recipe_name).cloned() else {
            return false;
        };
        if let Err(e) = recipe.delete_step(index) {
            error!(recipe = recipe_name, "{}", e);
            return false;
        }
        self.push_recipe(recipe)
    }

    /// Replace the step at 1-based `index`.
    pub fn update_step_in_recipe(&mut self, recipe_name: &str, index: usize, step: &str) -> bool {
        let Some(mut recipe) = self.require_recipe(recipe_name).cloned() else {
            return false;
        };
        if let Err(e) = recipe.update_step(index, step) {
            error!(recipe = recipe_name, "{}", e);
            return false;
        }
        self.push_recipe(recipe)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn require_list(&self, name: &str) -> Option<&List> {
        let list = self.snapshot.list(name);
        if list.is_none() {
            error!(list = name, "list not found");
        }
        list
    }

    fn require_recipe(&self, name: &str) -> Option<&Recipe> {
        let recipe = self.snapshot.recipe(name);
        if recipe.is_none() {
            error!(recipe = name, "recipe not found");
        }
        recipe
    }

    fn push_recipe(&mut self, recipe: Recipe) -> bool {
        let recipes = self.call("update recipe", |b, t| b.update_recipe(t, &recipe));
        self.apply_recipes(recipes)
    }

    /// Run one backend call with a fresh bearer token, logging any failure.
    fn call<T>(
        &mut self,
        operation: &'static str,
        f: impl FnOnce(&mut dyn Backend, &str) -> Result<T, BackendError>,
    ) -> Option<T> {
        let token = match self.auth.access_token() {
            Ok(token) => token,
            Err(e) => {
                error!(operation, "{}", e);
                return None;
            }
        };
        match f(&mut *self.backend, &token) {
            Ok(value) => Some(value),
            Err(e) => {
                error!(operation, "{}", e);
                None
            }
        }
    }

    fn apply_lists(&mut self, lists: Option<Vec<List>>) -> bool {
        match lists {
            Some(lists) => {
                self.snapshot.set_lists(lists);
                true
            }
            None => false,
        }
    }

    fn apply_catalog(&mut self, catalog: Option<Vec<Ingredient>>) -> bool {
        match catalog {
            Some(catalog) => {
                self.snapshot.set_catalog(catalog);
                true
            }
            None => false,
        }
    }

    fn apply_recipes(&mut self, recipes: Option<Vec<Recipe>>) -> bool {
        match recipes {
            Some(recipes) => {
                self.snapshot.set_recipes(recipes);
                true
            }
            None => false,
        }
    }
}
