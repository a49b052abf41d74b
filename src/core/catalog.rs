//! The built-in ingredient catalog and helpers for browsing it.

use std::collections::BTreeMap;

use crate::core::ingredient::{Ingredient, Unit};
use crate::core::list::List;

/// The fixed built-in catalog.
pub fn builtin() -> Vec<Ingredient> {
    vec![
        Ingredient::new("Tomato", "Vegetable"),
        Ingredient::new("Chicken", "Meat"),
        Ingredient::new("Basil", "Herb"),
        Ingredient::new("Cheese", "Dairy"),
    ]
}

/// Lists a fresh offline session starts with.
pub fn example_lists() -> Vec<List> {
    vec![
        List::new(
            "Weekly Shop",
            vec![
                Ingredient::new("Tomato", "Vegetable").with_amount(4.0, Unit::Count),
                Ingredient::new("Chicken", "Meat").with_amount(1.0, Unit::Kg),
            ],
        ),
        List::new(
            "Pantry Staples",
            vec![
                Ingredient::new("Basil", "Herb").with_amount(20.0, Unit::G),
                Ingredient::new("Cheese", "Dairy").with_amount(250.0, Unit::G),
            ],
        ),
    ]
}

/// Find a catalog entry by exact name, preferring built-in over custom.
pub fn find<'a>(catalog: &'a [Ingredient], name: &str) -> Option<&'a Ingredient> {
    catalog
        .iter()
        .find(|i| i.is(name, false))
        .or_else(|| catalog.iter().find(|i| i.is(name, true)))
}

/// Case-insensitive substring search over names.
pub fn search<'a>(catalog: &'a [Ingredient], query: &str) -> Vec<&'a Ingredient> {
    catalog.iter().filter(|i| i.matches(query)).collect()
}

/// Group entries by category, categories sorted by name.
pub fn group_by_category(catalog: &[Ingredient]) -> BTreeMap<&str, Vec<&Ingredient>> {
    let mut groups: BTreeMap<&str, Vec<&Ingredient>> = BTreeMap::new();
    for ingredient in catalog {
        groups
            .entry(ingredient.category.as_str())
            .or_default()
            .push(ingredient);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let names: Vec<_> = builtin().into_iter().map(|i| (i.name, i.category)).collect();
        assert_eq!(
            names,
            vec![
                ("Tomato".to_string(), "Vegetable".to_string()),
                ("Chicken".to_string(), "Meat".to_string()),
                ("Basil".to_string(), "Herb".to_string()),
                ("Cheese".to_string(), "Dairy".to_string()),
            ]
        );
        assert!(builtin().iter().all(|i| !i.is_custom && i.amount.is_none()));
    }

    #[test]
    fn test_example_lists_have_unique_names() {
        let lists = example_lists();
        assert_eq!(lists.len(), 2);
        assert_ne!(lists[0].name(), lists[1].name());
    }

    #[test]
    fn test_search() {
        let catalog = builtin();
        let hits: Vec<_> = search(&catalog, "CH").into_iter().map(|i| &i.name).collect();
        assert_eq!(hits, vec!["Chicken"]);
        assert_eq!(search(&catalog, "e").len(), 3);
        assert!(search(&catalog, "zzz").is_empty());
    }

    #[test]
    fn test_find_prefers_builtin() {
        let mut catalog = builtin();
        catalog.push(Ingredient::custom("Basil", "Garden"));
        catalog.push(Ingredient::custom("Tahini", "Condiment"));

        assert!(!find(&catalog, "Basil").unwrap().is_custom);
        assert!(find(&catalog, "Tahini").unwrap().is_custom);
        assert!(find(&catalog, "basil").is_none());
    }

    #[test]
    fn test_group_by_category() {
        let mut catalog = builtin();
        catalog.push(Ingredient::custom("Oregano", "Herb"));
        let groups = group_by_category(&catalog);

        let categories: Vec<_> = groups.keys().copied().collect();
        assert_eq!(categories, vec!["Dairy", "Herb", "Meat", "Vegetable"]);
        assert_eq!(groups["Herb"].len(), 2);
    }
}
