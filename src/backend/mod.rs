//! Persistence backends.
//!
//! Every mutating operation returns the refreshed collection it touched so
//! the session can replace its cached copy wholesale.

pub mod mock;
pub mod rest;
pub mod transport;

use thiserror::Error;

use crate::core::{Ingredient, List, Recipe, Unit};

pub use mock::MockBackend;
pub use rest::RestBackend;
pub use transport::{HttpRequest, HttpResponse, Method, ReqwestTransport, Transport};

/// Failure talking to a backend.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("invalid backend URL `{url}`: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("{url} responded with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{operation} rejected: {reason}")]
    Rejected {
        operation: &'static str,
        reason: String,
    },
}

/// Remote persistence operations, mirroring the session's mutators.
///
/// `token` is the bearer token for the signed-in user.
pub trait Backend {
    fn get_all_ingredients(&mut self, token: &str) -> Result<Vec<Ingredient>, BackendError>;

    fn get_my_lists(&mut self, token: &str) -> Result<Vec<List>, BackendError>;

    fn delete_list(&mut self, token: &str, list_name: &str) -> Result<Vec<List>, BackendError>;

    fn add_ingredient(
        &mut self,
        token: &str,
        list_name: &str,
        ingredient: &Ingredient,
    ) -> Result<Vec<List>, BackendError>;

    fn get_all_measurements(&mut self, token: &str) -> Result<Vec<Unit>, BackendError>;

    fn delete_ingredient_from_list(
        &mut self,
        token: &str,
        list_name: &str,
        ingredient: &Ingredient,
    ) -> Result<Vec<List>, BackendError>;

    fn update_ingredient(
        &mut self,
        token: &str,
        list_name: &str,
        ingredient: &Ingredient,
    ) -> Result<Vec<List>, BackendError>;

    fn create_new_list(
        &mut self,
        token: &str,
        list_name: &str,
        ingredients: &[Ingredient],
    ) -> Result<Vec<List>, BackendError>;

    fn move_ingredient(
        &mut self,
        token: &str,
        from: &str,
        to: &str,
        ingredient: &Ingredient,
    ) -> Result<Vec<List>, BackendError>;

    fn rename_list(
        &mut self,
        token: &str,
        old_name: &str,
        new_name: &str,
    ) -> Result<Vec<List>, BackendError>;

    fn create_custom_ingredient(
        &mut self,
        token: &str,
        ingredient: &Ingredient,
    ) -> Result<Vec<Ingredient>, BackendError>;

    fn delete_custom_ingredient(
        &mut self,
        token: &str,
        name: &str,
    ) -> Result<Vec<Ingredient>, BackendError>;

    fn get_all_recipes(&mut self, token: &str) -> Result<Vec<Recipe>, BackendError>;

    fn create_recipe(&mut self, token: &str, recipe: &Recipe) -> Result<Vec<Recipe>, BackendError>;

    /// Replace a recipe's ingredients and steps.
    fn update_recipe(&mut self, token: &str, recipe: &Recipe) -> Result<Vec<Recipe>, BackendError>;

    fn delete_recipe(&mut self, token: &str, name: &str) -> Result<Vec<Recipe>, BackendError>;

    fn add_ingredient_to_recipe(
        &mut self,
        token: &str,
        recipe_name: &str,
        ingredient: &Ingredient,
    ) -> Result<Vec<Recipe>, BackendError>;

    fn delete_ingredient_from_recipe(
        &mut self,
        token: &str,
        recipe_name: &str,
        ingredient: &Ingredient,
    ) -> Result<Vec<Recipe>, BackendError>;

    /// Register the signed-in user with the backend.
    fn create_user(&mut self, token: &str, email: Option<&str>) -> Result<(), BackendError>;
}
