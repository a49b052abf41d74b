//! Input validation for user-entered names, amounts, units and steps.
//!
//! Everything the CLI accepts passes through here before the session is
//! touched, so a rejected form never causes a backend call.

use thiserror::Error;

use crate::core::{catalog, Ingredient, Unit};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{kind} name cannot be empty")]
    EmptyName { kind: &'static str },

    #[error("a {kind} named '{name}' already exists")]
    DuplicateName { kind: &'static str, name: String },

    #[error("{kind} '{name}' not found")]
    NotFound { kind: &'static str, name: String },

    #[error("invalid amount '{0}': expected a positive number")]
    InvalidAmount(String),

    #[error("unknown unit '{0}'; expected one of mg, kg, g, ml, count")]
    UnknownUnit(String),

    #[error("step text cannot be empty")]
    EmptyStep,

    #[error("step {index} is out of range (recipe has {len} steps)")]
    StepOutOfRange { index: usize, len: usize },

    #[error("unknown ingredient '{0}'; pass --category or add it with `cupboard custom add`")]
    UnknownIngredient(String),
}

/// Trim a name and reject it if nothing is left.
pub fn validate_name(kind: &'static str, name: &str) -> Result<String, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName { kind });
    }
    Ok(name.to_string())
}

/// Like [`validate_name`], also rejecting names already in `existing`.
pub fn validate_new_name<'a>(
    kind: &'static str,
    name: &str,
    existing: impl IntoIterator<Item = &'a str>,
) -> Result<String, ValidationError> {
    let name = validate_name(kind, name)?;
    if existing.into_iter().any(|n| n == name) {
        return Err(ValidationError::DuplicateName { kind, name });
    }
    Ok(name)
}

/// Parse a strictly positive, finite amount.
pub fn parse_amount(input: &str) -> Result<f64, ValidationError> {
    match input.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount > 0.0 => Ok(amount),
        _ => Err(ValidationError::InvalidAmount(input.to_string())),
    }
}

pub fn parse_unit(input: &str) -> Result<Unit, ValidationError> {
    input
        .parse()
        .map_err(|_| ValidationError::UnknownUnit(input.to_string()))
}

pub fn validate_step(text: &str) -> Result<String, ValidationError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ValidationError::EmptyStep);
    }
    Ok(text.to_string())
}

/// Check a 1-based step index against the number of steps.
pub fn validate_step_index(index: usize, len: usize) -> Result<usize, ValidationError> {
    if index == 0 || index > len {
        return Err(ValidationError::StepOutOfRange { index, len });
    }
    Ok(index)
}

/// An ingredient as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct IngredientForm {
    pub name: String,

    /// Category for ad hoc ingredients; looked up in the catalog when absent
    pub category: Option<String>,

    pub amount: Option<String>,

    /// Defaults to `count` when an amount is given
    pub unit: Option<String>,

    /// Refer to the user's custom ingredient rather than a built-in one
    pub custom: bool,
}

impl IngredientForm {
    pub fn new(name: impl Into<String>) -> Self {
        IngredientForm {
            name: name.into(),
            ..IngredientForm::default()
        }
    }

    /// Validate the form and build the ingredient it describes.
    pub fn resolve(&self, catalog_entries: &[Ingredient]) -> Result<Ingredient, ValidationError> {
        let name = validate_name("ingredient", &self.name)?;

        let mut ingredient = match &self.category {
            Some(category) => {
                let category = validate_name("category", category)?;
                let mut ingredient = Ingredient::new(name, category);
                ingredient.is_custom = self.custom;
                ingredient
            }
            None => {
                let found = catalog_entries
                    .iter()
                    .find(|i| i.is(&name, self.custom))
                    .or_else(|| {
                        if self.custom {
                            None
                        } else {
                            catalog::find(catalog_entries, &name)
                        }
                    });
                match found {
                    Some(entry) => {
                        let mut ingredient = entry.clone();
                        ingredient.amount = None;
                        ingredient.unit = None;
                        ingredient
                    }
                    None => return Err(ValidationError::UnknownIngredient(name)),
                }
            }
        };

        let unit = self.unit.as_deref().map(parse_unit).transpose()?;
        if let Some(amount) = &self.amount {
            ingredient.amount = Some(parse_amount(amount)?);
            ingredient.unit = Some(unit.unwrap_or(Unit::Count));
        } else {
            ingredient.unit = unit;
        }
        Ok(ingredient)
    }
}
