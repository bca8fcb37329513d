//! Shopping list built from the recipes a user put in the cart.

use crate::recipe::{Component, Recipe};
use jiff::civil::DateTime;
use serde::Serialize;
use std::collections::BTreeMap;

/// One line of the shopping list: an ingredient with its total amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShoppingItem {
    pub ingredient: String,
    pub measurement_unit: String,
    pub amount: u64,
}

/// Groups components by ingredient and unit, summing the amounts.
///
/// Ingredient names compare case-insensitively: `Egg` and `egg` land on one
/// line, spelled as first seen. Items come out ordered by lowercased
/// ingredient name, then unit.
pub fn aggregate<'a, I>(components: I) -> Vec<ShoppingItem>
where
    I: IntoIterator<Item = &'a Component>,
{
    let mut totals: BTreeMap<(String, &str), (&str, u64)> = BTreeMap::new();
    for component in components {
        let key = (
            component.ingredient.to_lowercase(),
            component.measurement_unit.as_str(),
        );
        totals
            .entry(key)
            .or_insert((component.ingredient.as_str(), 0))
            .1 += u64::from(component.amount);
    }

    totals
        .into_iter()
        .map(|((_, unit), (ingredient, amount))| ShoppingItem {
            ingredient: ingredient.to_string(),
            measurement_unit: unit.to_string(),
            amount,
        })
        .collect()
}

/// Aggregates every component of the given recipes.
pub fn aggregate_recipes(recipes: &[Recipe]) -> Vec<ShoppingItem> {
    aggregate(recipes.iter().flat_map(|recipe| recipe.components.iter()))
}

/// Renders the plain-text shopping list offered as `shopping_cart.txt`.
pub fn render_text(items: &[ShoppingItem], recipes: &[Recipe], generated_at: DateTime) -> String {
    let mut lines = Vec::with_capacity(items.len() + recipes.len() + 5);
    lines.push(format!(
        "Shopping list from {}",
        generated_at.strftime("%d.%m.%Y (%H:%M)")
    ));
    lines.push(String::new());
    lines.push("Products:".to_string());
    for (idx, item) in items.iter().enumerate() {
        lines.push(format!(
            "{}. {} — {} {}",
            idx + 1,
            capitalize(&item.ingredient),
            item.amount,
            item.measurement_unit
        ));
    }
    lines.push(String::new());
    lines.push("Recipes:".to_string());
    for recipe in recipes {
        lines.push(format!("- {} (author: {})", recipe.name, recipe.author));
    }

    lines.join("\n")
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
