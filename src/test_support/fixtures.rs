//! Sample data for common test scenarios.
//!
//! The ingredients here match the built-in catalog, so they can be added to
//! lists and recipes in a seeded offline session without extra setup.

use crate::core::{Ingredient, List, Recipe, Unit};

/// Tomato counted in whole units.
pub fn tomato(amount: f64) -> Ingredient {
    Ingredient::new("Tomato", "Vegetable").with_amount(amount, Unit::Count)
}

pub fn chicken(kg: f64) -> Ingredient {
    Ingredient::new("Chicken", "Meat").with_amount(kg, Unit::Kg)
}

pub fn basil(grams: f64) -> Ingredient {
    Ingredient::new("Basil", "Herb").with_amount(grams, Unit::G)
}

pub fn cheese(grams: f64) -> Ingredient {
    Ingredient::new("Cheese", "Dairy").with_amount(grams, Unit::G)
}

/// A user-defined ingredient without an amount.
pub fn tahini() -> Ingredient {
    Ingredient::custom("Tahini", "Condiment")
}

/// `Grocery` holding four tomatoes and a kilo of chicken.
pub fn grocery_list() -> List {
    List::new("Grocery", vec![tomato(4.0), chicken(1.0)])
}

pub fn caprese() -> Recipe {
    Recipe::new(
        "Caprese",
        vec![tomato(2.0), cheese(125.0), basil(5.0)],
        vec![
            "Slice the tomatoes and cheese".to_string(),
            "Layer with basil".to_string(),
            "Season and serve".to_string(),
        ],
    )
}

/// Config file templates.
pub mod configs {
    /// A config pointing the session at a remote tenant.
    pub fn remote(host: &str, domain: &str, client_id: &str) -> String {
        format!(
            r#"[backend]
host = "{host}"

[identity]
domain = "{domain}"
client_id = "{client_id}"
"#
        )
    }

    /// A config that only overrides the backend host.
    pub fn backend_only(host: &str) -> String {
        format!(
            r#"[backend]
host = "{host}"
"#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grocery_list_fixture() {
        let list = grocery_list();
        assert_eq!(list.name(), "Grocery");
        assert_eq!(list.len(), 2);
        assert_eq!(list.find("Tomato", false).unwrap().amount, Some(4.0));
    }

    #[test]
    fn test_caprese_fixture() {
        let recipe = caprese();
        assert_eq!(recipe.steps.len(), 3);
        assert!(recipe.ingredients.contains(&basil(0.0)));
    }

    #[test]
    fn test_config_templates() {
        let remote = configs::remote("https://api.test", "tenant.test", "abc");
        assert!(remote.contains("client_id = \"abc\""));
        assert!(configs::backend_only("http://h").contains("[backend]"));
    }
}
