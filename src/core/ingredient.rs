//! Ingredients and measurement units.
//!
//! An ingredient's identity is its `(name, is_custom)` pair. Amount and unit
//! are quantities attached to one occurrence of the ingredient in a list and
//! never take part in equality.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Measurement unit for an ingredient amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Mg,
    Kg,
    G,
    Ml,
    Count,
}

impl Unit {
    /// Every unit the backend accepts, in display order.
    pub const ALL: [Unit; 5] = [Unit::Mg, Unit::Kg, Unit::G, Unit::Ml, Unit::Count];

    /// Get the unit as it appears on the wire and in the CLI.
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Mg => "mg",
            Unit::Kg => "kg",
            Unit::G => "g",
            Unit::Ml => "ml",
            Unit::Count => "count",
        }
    }
}

impl std::str::FromStr for Unit {
    type Err = UnitParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mg" => Ok(Unit::Mg),
            "kg" => Ok(Unit::Kg),
            "g" => Ok(Unit::G),
            "ml" => Ok(Unit::Ml),
            "count" => Ok(Unit::Count),
            _ => Err(UnitParseError(s.to_string())),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown unit string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitParseError(pub String);

impl fmt::Display for UnitParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid unit '{}', valid values: mg, kg, g, ml, count",
            self.0
        )
    }
}

impl std::error::Error for UnitParseError {}

/// A single ingredient, either from the built-in catalog or user-defined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,

    /// Category shown in the catalog (Vegetable, Meat, Herb, ...)
    #[serde(rename = "type")]
    pub category: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<Unit>,

    #[serde(rename = "isCustom", default)]
    pub is_custom: bool,
}

impl Ingredient {
    /// Create a catalog ingredient with no amount.
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Ingredient {
            name: name.into(),
            category: category.into(),
            amount: None,
            unit: None,
            is_custom: false,
        }
    }

    /// Create a user-defined ingredient.
    pub fn custom(name: impl Into<String>, category: impl Into<String>) -> Self {
        Ingredient {
            is_custom: true,
            ..Ingredient::new(name, category)
        }
    }

    /// Attach an amount and unit.
    pub fn with_amount(mut self, amount: f64, unit: Unit) -> Self {
        self.amount = Some(amount);
        self.unit = Some(unit);
        self
    }

    /// Identity comparison used by list merge and removal.
    ///
    /// Names are compared exactly (case-sensitive). Amount, unit and
    /// category are ignored.
    pub fn equal_to(&self, other: &Ingredient) -> bool {
        self.name == other.name && self.is_custom == other.is_custom
    }

    /// Check whether this ingredient has the given identity.
    pub fn is(&self, name: &str, is_custom: bool) -> bool {
        self.name == name && self.is_custom == is_custom
    }

    /// Accumulate another occurrence's amount into this one.
    ///
    /// A missing amount counts as zero; the result stays `None` only when
    /// neither side carries an amount.
    pub fn accumulate(&mut self, other: &Ingredient) {
        self.amount = match (self.amount, other.amount) {
            (None, None) => None,
            (a, b) => Some(a.unwrap_or(0.0) + b.unwrap_or(0.0)),
        };
        if self.unit.is_none() {
            self.unit = other.unit;
        }
    }

    /// Case-insensitive substring match, used for catalog search highlighting.
    pub fn matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.category)?;
        if let Some(amount) = self.amount {
            write!(f, " {}", format_amount(amount))?;
            if let Some(unit) = self.unit {
                write!(f, " {}", unit)?;
            }
        }
        if self.is_custom {
            write!(f, " [custom]")?;
        }
        Ok(())
    }
}

/// Format an amount without a trailing `.0` for whole numbers.
pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 && amount.abs() < 1e15 {
        format!("{}", amount as i64)
    } else {
        format!("{}", amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_ignores_amount_and_unit() {
        let a = Ingredient::new("Tomato", "Vegetable").with_amount(4.0, Unit::Count);
        let b = Ingredient::new("Tomato", "Fruit").with_amount(200.0, Unit::G);
        assert!(a.equal_to(&b));
    }

    #[test]
    fn test_equality_respects_custom_flag() {
        let builtin = Ingredient::new("Tomato", "Vegetable");
        let custom = Ingredient::custom("Tomato", "Vegetable");
        assert!(!builtin.equal_to(&custom));
    }

    #[test]
    fn test_equality_is_case_sensitive() {
        let a = Ingredient::new("Tomato", "Vegetable");
        let b = Ingredient::new("tomato", "Vegetable");
        assert!(!a.equal_to(&b));
    }

    #[test]
    fn test_accumulate_amounts() {
        let mut a = Ingredient::new("Tomato", "Vegetable").with_amount(4.0, Unit::Count);
        a.accumulate(&Ingredient::new("Tomato", "Vegetable").with_amount(2.0, Unit::Count));
        assert_eq!(a.amount, Some(6.0));
    }

    #[test]
    fn test_accumulate_missing_amount_counts_as_zero() {
        let mut a = Ingredient::new("Basil", "Herb");
        a.accumulate(&Ingredient::new("Basil", "Herb").with_amount(3.0, Unit::G));
        assert_eq!(a.amount, Some(3.0));
        assert_eq!(a.unit, Some(Unit::G));

        let mut b = Ingredient::new("Basil", "Herb");
        b.accumulate(&Ingredient::new("Basil", "Herb"));
        assert_eq!(b.amount, None);
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        let cheese = Ingredient::new("Cheese", "Dairy");
        assert!(cheese.matches("chee"));
        assert!(cheese.matches("EES"));
        assert!(!cheese.matches("milk"));
    }

    #[test]
    fn test_unit_parse() {
        assert_eq!("kg".parse::<Unit>().unwrap(), Unit::Kg);
        assert_eq!("Count".parse::<Unit>().unwrap(), Unit::Count);
        assert!("cups".parse::<Unit>().is_err());
    }

    #[test]
    fn test_wire_format() {
        let tomato = Ingredient::new("Tomato", "Vegetable").with_amount(4.0, Unit::Count);
        let json = serde_json::to_value(&tomato).unwrap();
        assert_eq!(json["type"], "Vegetable");
        assert_eq!(json["unit"], "count");
        assert_eq!(json["isCustom"], false);

        let parsed: Ingredient =
            serde_json::from_str(r#"{"name":"Basil","type":"Herb","isCustom":true}"#).unwrap();
        assert!(parsed.is_custom);
        assert_eq!(parsed.amount, None);
    }

    #[test]
    fn test_display() {
        let tomato = Ingredient::new("Tomato", "Vegetable").with_amount(6.0, Unit::Count);
        assert_eq!(tomato.to_string(), "Tomato (Vegetable) 6 count");

        let custom = Ingredient::custom("Tahini", "Condiment").with_amount(1.5, Unit::Kg);
        assert_eq!(custom.to_string(), "Tahini (Condiment) 1.5 kg [custom]");
    }
}
