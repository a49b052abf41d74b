//! Named ingredient lists.

use serde::{Deserialize, Serialize};

use crate::core::ingredient::Ingredient;

/// A named, ordered collection of ingredients.
///
/// No two entries share `(name, is_custom)`: adding a duplicate merges its
/// amount into the existing entry instead of appending.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct List {
    name: String,
    #[serde(default)]
    ingredients: Vec<Ingredient>,
}

impl List {
    /// Create a list, merging any duplicate seeds.
    pub fn new(name: impl Into<String>, seed: impl IntoIterator<Item = Ingredient>) -> Self {
        let mut list = List {
            name: name.into(),
            ingredients: Vec::new(),
        };
        for ingredient in seed {
            list.add_or_update_ingredient(ingredient);
        }
        list
    }

    /// Create an empty list.
    pub fn empty(name: impl Into<String>) -> Self {
        List::new(name, Vec::new())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn len(&self) -> usize {
        self.ingredients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Ingredient> {
        self.ingredients.iter()
    }

    /// Find an entry by identity.
    pub fn find(&self, name: &str, is_custom: bool) -> Option<&Ingredient> {
        self.ingredients.iter().find(|i| i.is(name, is_custom))
    }

    /// Check whether an equal ingredient is present.
    pub fn contains(&self, ingredient: &Ingredient) -> bool {
        self.ingredients.iter().any(|i| i.equal_to(ingredient))
    }

    /// Merge into an existing equal entry, or append.
    pub fn add_or_update_ingredient(&mut self, ingredient: Ingredient) {
        match self.ingredients.iter_mut().find(|i| i.equal_to(&ingredient)) {
            Some(existing) => existing.accumulate(&ingredient),
            None => self.ingredients.push(ingredient),
        }
    }

    /// Remove the first equal entry. Returns whether anything was removed.
    pub fn remove_ingredient(&mut self, ingredient: &Ingredient) -> bool {
        match self.ingredients.iter().position(|i| i.equal_to(ingredient)) {
            Some(index) => {
                self.ingredients.remove(index);
                true
            }
            None => false,
        }
    }

    /// Overwrite the amount and unit of an existing entry.
    ///
    /// Unlike [`List::add_or_update_ingredient`] this does not accumulate.
    /// Returns `false` when no equal entry exists.
    pub fn replace_ingredient(&mut self, ingredient: Ingredient) -> bool {
        match self.ingredients.iter_mut().find(|i| i.equal_to(&ingredient)) {
            Some(existing) => {
                existing.amount = ingredient.amount;
                existing.unit = ingredient.unit;
                true
            }
            None => false,
        }
    }

    /// Rename in place. Uniqueness among a user's lists is checked by the caller.
    pub fn set_list_name(&mut self, new_name: impl Into<String>) {
        self.name = new_name.into();
    }

    /// Replace the whole ingredient sequence, typically after a refetch.
    pub fn update_list(&mut self, new_ingredients: Vec<Ingredient>) {
        self.ingredients = new_ingredients;
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Ingredient;
    type IntoIter = std::slice::Iter<'a, Ingredient>;

    fn into_iter(self) -> Self::IntoIter {
        self.ingredients.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ingredient::Unit;
    use crate::test_support::fixtures::{basil, grocery_list, tomato};

    #[test]
    fn test_add_twice_merges_amounts() {
        let mut list = List::empty("Grocery");
        list.add_or_update_ingredient(tomato(4.0));
        list.add_or_update_ingredient(tomato(2.0));

        assert_eq!(list.len(), 1);
        assert_eq!(list.ingredients()[0].amount, Some(6.0));
        assert_eq!(list.ingredients()[0].unit, Some(Unit::Count));
    }

    #[test]
    fn test_custom_and_builtin_are_distinct() {
        let mut list = List::empty("Grocery");
        list.add_or_update_ingredient(tomato(1.0));
        list.add_or_update_ingredient(Ingredient::custom("Tomato", "Vegetable"));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_seed_duplicates_are_merged() {
        let list = List::new("Grocery", vec![tomato(1.0), tomato(1.5)]);
        assert_eq!(list.len(), 1);
        assert_eq!(list.find("Tomato", false).unwrap().amount, Some(2.5));
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut list = grocery_list();
        let before = list.clone();

        assert!(!list.remove_ingredient(&basil(5.0)));
        assert_eq!(list, before);
    }

    #[test]
    fn test_remove_first_match() {
        let mut list = grocery_list();
        assert!(list.remove_ingredient(&Ingredient::new("Tomato", "Whatever")));
        assert_eq!(list.len(), 1);
        assert_eq!(list.ingredients()[0].name, "Chicken");
    }

    #[test]
    fn test_replace_ingredient_overwrites() {
        let mut list = grocery_list();
        assert!(list.replace_ingredient(tomato(1.0)));
        assert_eq!(list.ingredients()[0].amount, Some(1.0));
        assert!(!list.replace_ingredient(Ingredient::new("Cheese", "Dairy")));
    }

    #[test]
    fn test_set_list_name() {
        let mut list = List::empty("Pantry");
        list.set_list_name("Cellar");
        assert_eq!(list.name(), "Cellar");
    }

    #[test]
    fn test_update_list_replaces_everything() {
        let mut list = List::new("Grocery", vec![tomato(4.0)]);
        list.update_list(vec![Ingredient::new("Cheese", "Dairy")]);
        assert_eq!(list.len(), 1);
        assert!(list.find("Tomato", false).is_none());
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_value(grocery_list()).unwrap();
        assert_eq!(json["name"], "Grocery");
        assert_eq!(json["ingredients"][0]["name"], "Tomato");
        assert_eq!(json["ingredients"][1]["type"], "Meat");
    }
}
