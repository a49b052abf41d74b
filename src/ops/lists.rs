//! Validated list operations used by `cupboard list ...`.

use anyhow::{bail, Result};

use crate::core::{Ingredient, List};
use crate::ops::forms::{validate_name, validate_new_name, IngredientForm, ValidationError};
use crate::session::Session;

/// Create a list, optionally seeded with ingredients.
pub fn create_list(session: &mut Session, name: &str, seed: &[IngredientForm]) -> Result<String> {
    let name = validate_new_name("list", name, session.lists().iter().map(List::name))?;
    let seed = seed
        .iter()
        .map(|form| form.resolve(session.all_ingredients()))
        .collect::<Result<Vec<_>, _>>()?;

    applied(session.create_list(&name, seed), "create list")?;
    Ok(name)
}

pub fn delete_list(session: &mut Session, name: &str) -> Result<()> {
    let name = existing_list(session, name)?;
    applied(session.delete_list(&name), "delete list")
}

/// Rename a list. The new name must not belong to another list.
pub fn rename_list(session: &mut Session, old_name: &str, new_name: &str) -> Result<String> {
    let old_name = existing_list(session, old_name)?;
    let new_name = validate_new_name(
        "list",
        new_name,
        session
            .lists()
            .iter()
            .map(List::name)
            .filter(|n| *n != old_name),
    )?;
    if new_name == old_name {
        return Ok(new_name);
    }

    applied(session.rename_list(&old_name, &new_name), "rename list")?;
    Ok(new_name)
}

/// Add an ingredient, merging its amount with an existing entry.
pub fn add_ingredient(
    session: &mut Session,
    list_name: &str,
    form: &IngredientForm,
) -> Result<Ingredient> {
    let list_name = existing_list(session, list_name)?;
    let ingredient = form.resolve(session.all_ingredients())?;

    applied(
        session.add_ingredient_to_list(&list_name, ingredient.clone()),
        "add ingredient",
    )?;
    Ok(ingredient)
}

pub fn remove_ingredient(
    session: &mut Session,
    list_name: &str,
    name: &str,
    custom: bool,
) -> Result<Ingredient> {
    let (list_name, ingredient) = list_entry(session, list_name, name, custom)?;
    applied(
        session.remove_ingredient_from_list(&list_name, &ingredient),
        "remove ingredient",
    )?;
    Ok(ingredient)
}

/// Overwrite the amount and unit of an entry already in the list.
pub fn update_ingredient(
    session: &mut Session,
    list_name: &str,
    form: &IngredientForm,
) -> Result<Ingredient> {
    let (list_name, entry) = list_entry(session, list_name, &form.name, form.custom)?;
    let ingredient = form.resolve(std::slice::from_ref(&entry))?;

    applied(
        session.update_ingredient_in_list(&list_name, ingredient.clone()),
        "update ingredient",
    )?;
    Ok(ingredient)
}

pub fn move_ingredient(
    session: &mut Session,
    from: &str,
    to: &str,
    name: &str,
    custom: bool,
) -> Result<Ingredient> {
    let to = existing_list(session, to)?;
    let (from, ingredient) = list_entry(session, from, name, custom)?;
    if from == to {
        return Ok(ingredient);
    }

    applied(session.move_ingredient(&from, &to, &ingredient), "move ingredient")?;
    Ok(ingredient)
}

fn existing_list(session: &Session, name: &str) -> Result<String, ValidationError> {
    let name = validate_name("list", name)?;
    if session.list(&name).is_none() {
        return Err(ValidationError::NotFound { kind: "list", name });
    }
    Ok(name)
}

fn list_entry(
    session: &Session,
    list_name: &str,
    name: &str,
    custom: bool,
) -> Result<(String, Ingredient), ValidationError> {
    let list_name = existing_list(session, list_name)?;
    let name = validate_name("ingredient", name)?;
    let entry = session
        .list(&list_name)
        .and_then(|list| list.find(&name, custom))
        .cloned();
    match entry {
        Some(entry) => Ok((list_name, entry)),
        None => Err(ValidationError::NotFound {
            kind: "ingredient",
            name: format!("{}' in list '{}", name, list_name),
        }),
    }
}

/// Turn a fail-soft `false` into an error for the CLI.
pub(crate) fn applied(changed: bool, operation: &str) -> Result<()> {
    if !changed {
        bail!("failed to {}", operation);
    }
    Ok(())
}
