//! Recipes: an ingredient set plus ordered steps.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::ingredient::Ingredient;
use crate::core::list::List;

/// Error for a step index outside `[1, len]`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("step {index} is out of range (recipe has {len} step(s))")]
pub struct StepOutOfRange {
    pub index: usize,
    pub len: usize,
}

/// A recipe. Its ingredient set is a [`List`] named after the recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RecipeRecord", into = "RecipeRecord")]
pub struct Recipe {
    pub name: String,
    pub ingredients: List,
    pub steps: Vec<String>,
}

/// Flat wire shape: `{name, ingredients: [...], steps: [...]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RecipeRecord {
    name: String,
    #[serde(default)]
    ingredients: Vec<Ingredient>,
    #[serde(default)]
    steps: Vec<String>,
}

impl From<RecipeRecord> for Recipe {
    fn from(record: RecipeRecord) -> Self {
        Recipe::new(record.name, record.ingredients, record.steps)
    }
}

impl From<Recipe> for RecipeRecord {
    fn from(recipe: Recipe) -> Self {
        RecipeRecord {
            name: recipe.name,
            ingredients: recipe.ingredients.ingredients().to_vec(),
            steps: recipe.steps,
        }
    }
}

impl Recipe {
    pub fn new(
        name: impl Into<String>,
        ingredients: impl IntoIterator<Item = Ingredient>,
        steps: Vec<String>,
    ) -> Self {
        let name = name.into();
        Recipe {
            ingredients: List::new(name.clone(), ingredients),
            name,
            steps,
        }
    }

    pub fn add_ingredient(&mut self, ingredient: Ingredient) {
        self.ingredients.add_or_update_ingredient(ingredient);
    }

    pub fn remove_ingredient(&mut self, ingredient: &Ingredient) -> bool {
        self.ingredients.remove_ingredient(ingredient)
    }

    /// Wholesale replace, used to resync after a remote mutation.
    pub fn update_recipe(
        &mut self,
        name: impl Into<String>,
        ingredients: Vec<Ingredient>,
        steps: Vec<String>,
    ) {
        self.name = name.into();
        self.ingredients.set_list_name(self.name.clone());
        self.ingredients.update_list(ingredients);
        self.steps = steps;
    }

    pub fn add_step(&mut self, step: impl Into<String>) {
        self.steps.push(step.into());
    }

    /// Delete the step at 1-based `index`, returning its text.
    pub fn delete_step(&mut self, index: usize) -> Result<String, StepOutOfRange> {
        let position = self.step_position(index)?;
        Ok(self.steps.remove(position))
    }

    /// Replace the text of the step at 1-based `index`.
    pub fn update_step(&mut self, index: usize, step: impl Into<String>) -> Result<(), StepOutOfRange> {
        let position = self.step_position(index)?;
        self.steps[position] = step.into();
        Ok(())
    }

    /// Steps paired with their 1-based display number.
    pub fn numbered_steps(&self) -> impl Iterator<Item = (usize, &str)> {
        self.steps.iter().enumerate().map(|(i, s)| (i + 1, s.as_str()))
    }

    fn step_position(&self, index: usize) -> Result<usize, StepOutOfRange> {
        if index == 0 || index > self.steps.len() {
            return Err(StepOutOfRange {
                index,
                len: self.steps.len(),
            });
        }
        Ok(index - 1)
    }
}
