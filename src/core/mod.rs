//! Domain model: ingredients, lists, recipes and the session snapshot.

pub mod catalog;
pub mod ingredient;
pub mod list;
pub mod recipe;
pub mod snapshot;

pub use ingredient::{Ingredient, Unit};
pub use list::List;
pub use recipe::{Recipe, StepOutOfRange};
pub use snapshot::Snapshot;
