//! Custom ingredient management used by `cupboard custom ...`.

use anyhow::Result;

use crate::core::Ingredient;
use crate::ops::forms::{validate_name, ValidationError};
use crate::ops::lists::applied;
use crate::session::Session;

pub fn add_custom_ingredient(
    session: &mut Session,
    name: &str,
    category: &str,
) -> Result<Ingredient> {
    let ingredient = Ingredient::custom(
        validate_name("ingredient", name)?,
        validate_name("category", category)?,
    );
    if session
        .all_ingredients()
        .iter()
        .any(|i| i.equal_to(&ingredient))
    {
        return Err(ValidationError::DuplicateName {
            kind: "custom ingredient",
            name: ingredient.name,
        }
        .into());
    }

    applied(
        session.add_custom_ingredient(ingredient.clone()),
        "create custom ingredient",
    )?;
    Ok(ingredient)
}

pub fn remove_custom_ingredient(session: &mut Session, name: &str) -> Result<()> {
    let name = validate_name("ingredient", name)?;
    if !session.all_ingredients().iter().any(|i| i.is(&name, true)) {
        return Err(ValidationError::NotFound {
            kind: "custom ingredient",
            name,
        }
        .into());
    }
    applied(
        session.remove_custom_ingredient(&name),
        "delete custom ingredient",
    )
}
