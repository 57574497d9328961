//! # Recipe Templates
//!
//! Crafting recipes a definition wants registered. Registration itself is
//! the host's business, reached through [`RecipeRegistrar`].

use crate::host::Item;

/// A shaped crafting recipe producing a decor item.
#[derive(Clone, Debug, PartialEq)]
pub struct RecipeTemplate {
    /// Recipe key, unique across the host.
    pub key: String,
    /// Up to three rows of up to three ingredient symbols.
    pub shape: Vec<String>,
    /// Symbol to ingredient material.
    pub ingredients: Vec<(char, String)>,
    pub result: Item,
    /// Whether the recipe is listed in the host's crafting menu.
    pub show_in_craft_menu: bool,
}

impl RecipeTemplate {
    pub fn shaped(key: &str, shape: &[&str], ingredients: &[(char, &str)]) -> Self {
        Self {
            key: key.to_owned(),
            shape: shape.iter().map(|row| (*row).to_owned()).collect(),
            ingredients: ingredients
                .iter()
                .map(|(symbol, material)| (*symbol, (*material).to_owned()))
                .collect(),
            result: Item::default(),
            show_in_craft_menu: true,
        }
    }

    /// True when every symbol used in the shape has an ingredient.
    pub fn is_complete(&self) -> bool {
        self.shape.iter().flat_map(|row| row.chars()).all(|symbol| {
            symbol == ' ' || self.ingredients.iter().any(|(known, _)| *known == symbol)
        })
    }
}

/// Host-side sink for recipes.
pub trait RecipeRegistrar {
    fn register(&mut self, recipe: &RecipeTemplate);
}
