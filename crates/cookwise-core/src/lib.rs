//! # cookwise-core
//!
//! Deterministic building blocks behind the Cookwise assistants.
//!
//! Every assistant answer is a [`StructuredResult`]: a meal plan, a food
//! analysis, a list of pantry items, a set of pantry recipes or a chat reply.
//! This crate owns everything about those results that does not touch the
//! network:
//!
//! - **Decoding**: [`decode`] pulls a JSON value out of free-form model text
//!   (raw JSON, fenced blocks, or an object embedded in prose)
//! - **Validation**: [`shape`] checks decoded values against embedded JSON
//!   Schemas before they become typed records
//! - **Fallbacks**: [`fallback`] holds pre-authored catalogs shaped exactly
//!   like live results, with a declared selection policy per entry point
//! - **Insights**: [`insights`] derives cost and health advice from results
//!
//! ## Key Guarantees
//!
//! 1. **No I/O**: nothing here performs network calls
//! 2. **Never panics on model output**: failed decodes are `None`, failed
//!    validation is [`Validated::Invalid`]
//! 3. **Reproducible**: keyword routing is deterministic and random selection
//!    always draws from a caller-supplied generator
//!
//! ## Example
//!
//! ```rust,ignore
//! use cookwise_core::{FoodAnalysis, StructuredResult, Validated};
//!
//! let raw = "```json\n{\"dishName\": \"Poha\", ...}\n```";
//! match FoodAnalysis::interpret(raw) {
//!     Validated::Valid(analysis) => println!("{}", analysis.dish_name),
//!     Validated::Invalid(reason) => println!("unusable: {}", reason),
//! }
//! ```

pub mod decode;
pub mod fallback;
pub mod insights;
pub mod shape;
pub mod types;

pub use decode::{decode, decode_as};
pub use fallback::{EntryPoint, FallbackCatalog, SelectionPolicy};
pub use insights::{
    check_ingredient_compatibility, cost_comparison, health_insights, Compatibility,
    CostComparison,
};
pub use shape::{check_schema, validate_shape, ResultKind, SchemaError, StructuredResult, Validated};
pub use types::{
    BudgetSummary, ChatMessage, ChatReply, ChatRole, DayPlan, Difficulty, FoodAnalysis,
    GeneratedMeal, GeneratedMealPlan, MealPlanRequest, MealPlanResponse, NutritionInfo,
    PantryItems, PantryRecipe, PantrySuggestions, SkillLevel,
};

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde::Serialize;

    fn keys<T: Serialize>(value: &T) -> Vec<String> {
        let mut keys: Vec<String> = serde_json::to_value(value)
            .unwrap()
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect();
        keys.sort();
        keys
    }

    fn assert_fallback_valid<T: StructuredResult>(value: &T) {
        let json = serde_json::to_value(value).unwrap();
        assert!(
            check_schema(T::KIND, &json).is_ok(),
            "fallback for {:?} does not match its schema",
            T::KIND
        );
        for key in T::KIND.required_keys() {
            assert!(json.get(&key).is_some(), "missing {}", key);
        }
    }

    #[test]
    fn test_every_fallback_matches_schema() {
        let mut rng = StdRng::seed_from_u64(1);
        let items = vec!["rice".to_string(), "dal".to_string()];

        assert_fallback_valid(&fallback::meal_plan::fallback_meal_plan(&MealPlanRequest::new(
            100.0, 7,
        )));
        assert_fallback_valid(&fallback::chat::fallback_reply("budget"));
        assert_fallback_valid(&fallback::chat::fallback_health_suggestion("diabetes"));
        assert_fallback_valid(&fallback::chat::fallback_tip(&mut rng));
        assert_fallback_valid(&fallback::food::fallback_analysis(&mut rng));
        assert_fallback_valid(&fallback::food::fallback_pantry_items());
        assert_fallback_valid(&fallback::pantry::fallback_recipes(&items, 3));
        assert_fallback_valid(&fallback::pantry::fallback_leftovers(&items));
    }

    #[test]
    fn test_decoded_and_fallback_share_top_level_keys() {
        let fallback = fallback::food::fallback_analysis(&mut StdRng::seed_from_u64(5));
        let raw = serde_json::to_string(&fallback).unwrap();
        let decoded = FoodAnalysis::interpret(&format!("```json\n{}\n```", raw))
            .ok()
            .unwrap();
        assert_eq!(keys(&decoded), keys(&fallback));
    }
}
