//! Cupboard - grocery lists and recipes
//!
//! This crate provides the domain model (ingredients, lists, recipes), the
//! authentication and persistence backends, and the session that ties them
//! together. The `cupboard` binary is a thin CLI over [`session::Session`].

pub mod auth;
pub mod backend;
pub mod core;
pub mod ops;
pub mod session;
pub mod util;

/// Test utilities and mocks for Cupboard unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides a recording HTTP transport and sample data.
#[cfg(test)]
pub mod test_support;

pub use core::{Ingredient, List, Recipe, Snapshot, Unit};

pub use auth::{Authenticator, SessionKind};
pub use backend::Backend;
pub use session::Session;
pub use util::context::CupboardContext;
