//! High-level operations.
//!
//! Validated entry points the CLI calls. Each one checks its input with
//! [`forms`] first and only then drives the [`Session`](crate::session::Session).

pub mod catalog;
pub mod forms;
pub mod lists;
pub mod recipes;

pub use forms::{IngredientForm, ValidationError};
