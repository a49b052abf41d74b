//! REST backend: one bearer-authenticated JSON call per operation.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use url::Url;

use crate::backend::transport::{HttpRequest, Transport};
use crate::backend::{Backend, BackendError};
use crate::core::{Ingredient, List, Recipe, Unit};

/// Default path for registering a user after login.
pub const DEFAULT_CREATE_USER_PATH: &str = "/api/create_user";

pub struct RestBackend {
    host: String,
    create_user_path: String,
    transport: Arc<dyn Transport>,
}

impl RestBackend {
    pub fn new(
        host: impl Into<String>,
        create_user_path: impl Into<String>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        RestBackend {
            host: host.into(),
            create_user_path: create_user_path.into(),
            transport,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        let raw = format!(
            "{}/{}",
            self.host.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&raw).map_err(|source| BackendError::InvalidUrl { url: raw, source })
    }

    fn get<T: DeserializeOwned>(&self, token: &str, path: &str) -> Result<T, BackendError> {
        let url = self.endpoint(path)?;
        let response = self
            .transport
            .send(HttpRequest::get(url.clone()).bearer(token))?;
        response.json(&url)
    }

    fn post<T: DeserializeOwned>(
        &self,
        token: &str,
        path: &str,
        body: Value,
    ) -> Result<T, BackendError> {
        let url = self.endpoint(path)?;
        let response = self
            .transport
            .send(HttpRequest::post(url.clone(), body).bearer(token))?;
        response.json(&url)
    }
}

impl Backend for RestBackend {
    fn get_all_ingredients(&mut self, token: &str) -> Result<Vec<Ingredient>, BackendError> {
        self.get(token, "/api/get_all_ingredients")
    }

    fn get_my_lists(&mut self, token: &str) -> Result<Vec<List>, BackendError> {
        self.get(token, "/api/get_my_lists")
    }

    fn delete_list(&mut self, token: &str, list_name: &str) -> Result<Vec<List>, BackendError> {
        self.post(token, "/api/delete_list", json!({ "listName": list_name }))
    }

    fn add_ingredient(
        &mut self,
        token: &str,
        list_name: &str,
        ingredient: &Ingredient,
    ) -> Result<Vec<List>, BackendError> {
        self.post(
            token,
            "/api/add_ingredient",
            json!({ "listName": list_name, "ingredient": ingredient }),
        )
    }

    fn get_all_measurements(&mut self, token: &str) -> Result<Vec<Unit>, BackendError> {
        self.get(token, "/api/get_all_measurements")
    }

    fn delete_ingredient_from_list(
        &mut self,
        token: &str,
        list_name: &str,
        ingredient: &Ingredient,
    ) -> Result<Vec<List>, BackendError> {
        self.post(
            token,
            "/api/delete_ingredient_from_list",
            json!({ "listName": list_name, "ingredient": ingredient }),
        )
    }

    fn update_ingredient(
        &mut self,
        token: &str,
        list_name: &str,
        ingredient: &Ingredient,
    ) -> Result<Vec<List>, BackendError> {
        self.post(
            token,
            "/api/update_ingredient",
            json!({ "listName": list_name, "ingredient": ingredient }),
        )
    }

    fn create_new_list(
        &mut self,
        token: &str,
        list_name: &str,
        ingredients: &[Ingredient],
    ) -> Result<Vec<List>, BackendError> {
        self.post(
            token,
            "/api/create_new_list",
            json!({ "listName": list_name, "ingredients": ingredients }),
        )
    }

    fn move_ingredient(
        &mut self,
        token: &str,
        from: &str,
        to: &str,
        ingredient: &Ingredient,
    ) -> Result<Vec<List>, BackendError> {
        self.post(
            token,
            "/api/move_ingredient",
            json!({ "fromList": from, "toList": to, "ingredient": ingredient }),
        )
    }

    fn rename_list(
        &mut self,
        token: &str,
        old_name: &str,
        new_name: &str,
    ) -> Result<Vec<List>, BackendError> {
        self.post(
            token,
            "/api/rename_list",
            json!({ "oldName": old_name, "newName": new_name }),
        )
    }

    fn create_custom_ingredient(
        &mut self,
        token: &str,
        ingredient: &Ingredient,
    ) -> Result<Vec<Ingredient>, BackendError> {
        self.post(
            token,
            "/api/create_custom_ingredient",
            json!({ "ingredient": ingredient }),
        )
    }

    fn delete_custom_ingredient(
        &mut self,
        token: &str,
        name: &str,
    ) -> Result<Vec<Ingredient>, BackendError> {
        self.post(
            token,
            "/api/delete_custom_ingredient",
            json!({ "ingredientName": name }),
        )
    }

    fn get_all_recipes(&mut self, token: &str) -> Result<Vec<Recipe>, BackendError> {
        self.get(token, "/api/get_all_recipes")
    }

    fn create_recipe(&mut self, token: &str, recipe: &Recipe) -> Result<Vec<Recipe>, BackendError> {
        self.post(token, "/api/create_recipe", json!({ "recipe": recipe }))
    }

    fn update_recipe(&mut self, token: &str, recipe: &Recipe) -> Result<Vec<Recipe>, BackendError> {
        self.post(token, "/api/update_recipe", json!({ "recipe": recipe }))
    }

    fn delete_recipe(&mut self, token: &str, name: &str) -> Result<Vec<Recipe>, BackendError> {
        self.post(token, "/api/delete_recipe", json!({ "recipeName": name }))
    }

    fn add_ingredient_to_recipe(
        &mut self,
        token: &str,
        recipe_name: &str,
        ingredient: &Ingredient,
    ) -> Result<Vec<Recipe>, BackendError> {
        self.post(
            token,
            "/api/add_ingredient_to_recipe",
            json!({ "recipeName": recipe_name, "ingredient": ingredient }),
        )
    }

    fn delete_ingredient_from_recipe(
        &mut self,
        token: &str,
        recipe_name: &str,
        ingredient: &Ingredient,
    ) -> Result<Vec<Recipe>, BackendError> {
        self.post(
            token,
            "/api/delete_ingredient_from_recipe",
            json!({ "recipeName": recipe_name, "ingredient": ingredient }),
        )
    }

    fn create_user(&mut self, token: &str, email: Option<&str>) -> Result<(), BackendError> {
        let url = self.endpoint(&self.create_user_path)?;
        let response = self
            .transport
            .send(HttpRequest::post(url.clone(), json!({ "email": email })).bearer(token))?;
        if !response.is_success() {
            return Err(BackendError::Status {
                url: url.to_string(),
                status: response.status,
            });
        }
        Ok(())
    }
}
