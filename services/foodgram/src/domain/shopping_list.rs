use chrono::NaiveDate;

use crate::domain::types::{CartRecipe, ShoppingListItem};

/// Render the plain-text shopping list.
///
/// `items` are expected already grouped and sorted by the repository.
pub fn render_shopping_list(
    date: NaiveDate,
    items: &[ShoppingListItem],
    recipes: &[CartRecipe],
) -> String {
    let mut lines = vec![format!("Shopping list for {}", date.format("%d.%m.%Y"))];
    lines.push(String::new());
    if items.is_empty() {
        lines.push("The shopping list is empty.".to_owned());
    } else {
        lines.push("Products:".to_owned());
        for (n, item) in items.iter().enumerate() {
            lines.push(format!(
                "{}. {} ({}) - {}",
                n + 1,
                capitalize(&item.name),
                item.measurement_unit,
                item.amount
            ));
        }
    }
    if !recipes.is_empty() {
        lines.push(String::new());
        lines.push("Recipes:".to_owned());
        for recipe in recipes {
            lines.push(format!("- {} ({})", recipe.name, recipe.author));
        }
    }
    lines.push(String::new());
    lines.join("\n")
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
