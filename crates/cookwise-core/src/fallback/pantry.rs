//! Fallback pantry recipe suggestions.
//!
//! Every recipe whose keywords appear among the pantry items is suggested,
//! with the items that triggered it listed as matching ingredients. When no
//! recipe matches, the whole catalog is suggested and each recipe claims the
//! first few pantry items.

use crate::types::{Difficulty, PantryRecipe, PantrySuggestions};

use super::FallbackCatalog;

/// Leftover suggestions are capped at this many recipes.
pub const LEFTOVER_LIMIT: usize = 3;

/// A recipe before it is fitted to a pantry.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeTemplate {
    pub recipe: PantryRecipe,

    /// Pantry items claimed as matches when nothing was routed
    pub default_matches: usize,
}

#[allow(clippy::too_many_arguments)]
fn template(
    name: &str,
    description: &str,
    (prep_time, cook_time): (f64, f64),
    missing: &[&str],
    difficulty: Difficulty,
    cuisine: &str,
    estimated_cost: f64,
    default_matches: usize,
) -> RecipeTemplate {
    RecipeTemplate {
        recipe: PantryRecipe {
            name: name.to_string(),
            description: description.to_string(),
            prep_time,
            cook_time,
            matching_ingredients: Vec::new(),
            missing_ingredients: missing.iter().map(|s| s.to_string()).collect(),
            difficulty,
            cuisine: cuisine.to_string(),
            estimated_cost,
        },
        default_matches,
    }
}

pub fn recipe_catalog() -> FallbackCatalog<RecipeTemplate> {
    FallbackCatalog::new(template(
        "Vegetable Pulao",
        "Fragrant rice with mixed vegetables",
        (15.0, 20.0),
        &["Bay Leaves", "Whole Spices"],
        Difficulty::Medium,
        "Indian",
        40.0,
        5,
    ))
    .with_entry(
        &["potato", "aloo", "cumin", "jeera"],
        template(
            "Simple Aloo Jeera",
            "Cumin-tempered potatoes, comfort food at its best",
            (10.0, 15.0),
            &["Fresh Coriander"],
            Difficulty::Easy,
            "North Indian",
            25.0,
            3,
        ),
    )
    .with_entry(
        &["carrot", "peas", "beans", "cauliflower", "capsicum"],
        template(
            "Mixed Vegetable Curry",
            "Hearty vegetable curry with aromatic spices",
            (15.0, 25.0),
            &["Cream", "Kasuri Methi"],
            Difficulty::Medium,
            "North Indian",
            45.0,
            4,
        ),
    )
    .with_entry(
        &["rice", "onion", "garlic", "vegetables"],
        template(
            "Quick Fried Rice",
            "Indo-Chinese style fried rice with vegetables",
            (10.0, 15.0),
            &["Soy Sauce"],
            Difficulty::Easy,
            "Indo-Chinese",
            35.0,
            3,
        ),
    )
    .with_entry(
        &["dal", "lentil", "onion", "tomato", "garlic"],
        template(
            "Dal Tadka",
            "Comforting lentils with an aromatic tempering",
            (10.0, 25.0),
            &[],
            Difficulty::Easy,
            "North Indian",
            25.0,
            3,
        ),
    )
    .with_entry(
        &["paneer", "egg", "chicken", "soya"],
        template(
            "Protein Bhurji Wrap",
            "Spiced scramble rolled into a roti",
            (10.0, 10.0),
            &["Roti", "Green Chili"],
            Difficulty::Easy,
            "Indian",
            40.0,
            3,
        ),
    )
}

/// Suggest recipes for `items`, listing at most `max_missing` missing ingredients.
pub fn fallback_recipes(items: &[String], max_missing: usize) -> PantrySuggestions {
    let catalog = recipe_catalog();
    let text = items.join(" ");
    let routed = catalog.route_all(&text);

    let recipes: Vec<PantryRecipe> = if routed.is_empty() {
        catalog
            .values()
            .map(|template| {
                let matches = items.iter().take(template.default_matches).cloned().collect();
                fit(template, matches, max_missing)
            })
            .collect()
    } else {
        routed
            .into_iter()
            .map(|route| {
                let matches = items
                    .iter()
                    .filter(|item| {
                        let lowered = item.to_lowercase();
                        route.keywords.iter().any(|keyword| lowered.contains(keyword))
                    })
                    .cloned()
                    .collect();
                fit(&route.value, matches, max_missing)
            })
            .collect()
    };

    PantrySuggestions { recipes }
}

/// Suggest up to [`LEFTOVER_LIMIT`] ways to use leftovers.
pub fn fallback_leftovers(items: &[String]) -> PantrySuggestions {
    let mut suggestions = fallback_recipes(items, usize::MAX);
    suggestions.recipes.truncate(LEFTOVER_LIMIT);
    suggestions
}

fn fit(template: &RecipeTemplate, matches: Vec<String>, max_missing: usize) -> PantryRecipe {
    let mut recipe = template.recipe.clone();
    recipe.matching_ingredients = matches;
    recipe.missing_ingredients.truncate(max_missing);
    recipe
}
