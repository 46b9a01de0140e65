//! Pantry recipe suggestion records.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// A recipe that can be cooked mostly from what is already at home.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PantryRecipe {
    pub name: String,
    pub description: String,

    /// Minutes
    pub prep_time: f64,

    /// Minutes
    pub cook_time: f64,

    #[serde(default)]
    pub matching_ingredients: Vec<String>,

    #[serde(default)]
    pub missing_ingredients: Vec<String>,

    pub difficulty: Difficulty,
    pub cuisine: String,
    pub estimated_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PantrySuggestions {
    pub recipes: Vec<PantryRecipe>,
}
