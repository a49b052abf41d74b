//! Validated recipe operations used by `cupboard recipe ...`.

use anyhow::Result;

use crate::core::{Ingredient, Recipe};
use crate::ops::forms::{
    validate_name, validate_new_name, validate_step, validate_step_index, IngredientForm,
    ValidationError,
};
use crate::ops::lists::applied;
use crate::session::Session;

/// Create a recipe from ingredient forms and step texts.
pub fn create_recipe(
    session: &mut Session,
    name: &str,
    ingredients: &[IngredientForm],
    steps: &[String],
) -> Result<String> {
    let name = validate_new_name(
        "recipe",
        name,
        session.recipes().iter().map(|r| r.name.as_str()),
    )?;
    let ingredients = ingredients
        .iter()
        .map(|form| form.resolve(session.all_ingredients()))
        .collect::<Result<Vec<_>, _>>()?;
    let steps = steps
        .iter()
        .map(|s| validate_step(s))
        .collect::<Result<Vec<_>, _>>()?;

    applied(
        session.create_recipe(Recipe::new(name.clone(), ingredients, steps)),
        "create recipe",
    )?;
    Ok(name)
}

pub fn delete_recipe(session: &mut Session, name: &str) -> Result<()> {
    let recipe = existing_recipe(session, name)?;
    applied(session.delete_recipe(&recipe.name), "delete recipe")
}

pub fn add_ingredient(
    session: &mut Session,
    recipe_name: &str,
    form: &IngredientForm,
) -> Result<Ingredient> {
    let recipe = existing_recipe(session, recipe_name)?;
    let ingredient = form.resolve(session.all_ingredients())?;
    applied(
        session.add_ingredient_to_recipe(&recipe.name, ingredient.clone()),
        "add ingredient to recipe",
    )?;
    Ok(ingredient)
}

pub fn remove_ingredient(
    session: &mut Session,
    recipe_name: &str,
    name: &str,
    custom: bool,
) -> Result<Ingredient> {
    let recipe = existing_recipe(session, recipe_name)?;
    let name = validate_name("ingredient", name)?;
    let ingredient = match recipe.ingredients.find(&name, custom) {
        Some(entry) => entry.clone(),
        None => {
            return Err(ValidationError::NotFound {
                kind: "ingredient",
                name: format!("{}' in recipe '{}", name, recipe.name),
            }
            .into())
        }
    };
    applied(
        session.remove_ingredient_from_recipe(&recipe.name, &ingredient),
        "remove ingredient from recipe",
    )?;
    Ok(ingredient)
}

/// Append a step. Returns its 1-based number.
pub fn add_step(session: &mut Session, recipe_name: &str, text: &str) -> Result<usize> {
    let recipe = existing_recipe(session, recipe_name)?;
    let text = validate_step(text)?;
    applied(session.add_step_to_recipe(&recipe.name, &text), "add step")?;
    Ok(recipe.steps.len() + 1)
}

/// Delete the step at 1-based `index`, returning its text.
pub fn delete_step(session: &mut Session, recipe_name: &str, index: usize) -> Result<String> {
    let recipe = existing_recipe(session, recipe_name)?;
    let index = validate_step_index(index, recipe.steps.len())?;
    let removed = recipe.steps[index - 1].clone();
    applied(
        session.delete_step_from_recipe(&recipe.name, index),
        "delete step",
    )?;
    Ok(removed)
}

pub fn update_step(
    session: &mut Session,
    recipe_name: &str,
    index: usize,
    text: &str,
) -> Result<()> {
    let recipe = existing_recipe(session, recipe_name)?;
    let index = validate_step_index(index, recipe.steps.len())?;
    let text = validate_step(text)?;
    applied(
        session.update_step_in_recipe(&recipe.name, index, &text),
        "update step",
    )
}

fn existing_recipe(session: &Session, name: &str) -> Result<Recipe, ValidationError> {
    let name = validate_name("recipe", name)?;
    match session.recipe(&name) {
        Some(recipe) => Ok(recipe.clone()),
        None => Err(ValidationError::NotFound {
            kind: "recipe",
            name,
        }),
    }
}
