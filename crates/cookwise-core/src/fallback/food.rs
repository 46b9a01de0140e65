//! Fallback food photo analyses and pantry item lists.

use rand::Rng;

use crate::types::{FoodAnalysis, NutritionInfo, PantryItems};

use super::{EntryPoint, FallbackCatalog};

fn analysis(
    dish_name: &str,
    confidence: f64,
    (calories, protein, carbs, fat, fiber, sodium): (f64, f64, f64, f64, f64, f64),
    estimated_cost: f64,
    homemade_cost: f64,
    ingredients: &[&str],
    health_rating: u8,
) -> FoodAnalysis {
    FoodAnalysis {
        dish_name: dish_name.to_string(),
        confidence,
        calories,
        nutrition: NutritionInfo {
            calories,
            protein,
            carbs,
            fat,
            fiber: Some(fiber),
            sodium: Some(sodium),
        },
        estimated_cost,
        homemade_cost,
        ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
        health_rating,
    }
}

/// Recognised dishes, picked at random when a photo cannot be analysed.
pub fn analysis_catalog() -> FallbackCatalog<FoodAnalysis> {
    FallbackCatalog::new(analysis(
        "Masala Dosa with Sambar",
        91.0,
        (350.0, 10.0, 52.0, 12.0, 5.0, 480.0),
        180.0,
        45.0,
        &["Rice Batter", "Potato Masala", "Sambar", "Chutney"],
        7,
    ))
    .with_entry(
        &[],
        analysis(
            "Butter Chicken with Naan",
            92.0,
            (650.0, 35.0, 45.0, 38.0, 3.0, 980.0),
            350.0,
            120.0,
            &["Chicken", "Butter", "Cream", "Tomatoes", "Naan bread", "Spices"],
            5,
        ),
    )
    .with_entry(
        &[],
        analysis(
            "Vegetable Biryani",
            88.0,
            (420.0, 12.0, 65.0, 14.0, 6.0, 680.0),
            280.0,
            80.0,
            &["Basmati Rice", "Mixed Vegetables", "Yogurt", "Spices", "Ghee"],
            7,
        ),
    )
    .with_entry(
        &[],
        analysis(
            "Paneer Tikka",
            95.0,
            (380.0, 22.0, 15.0, 28.0, 3.0, 520.0),
            320.0,
            110.0,
            &["Paneer", "Yogurt", "Bell Peppers", "Onions", "Spices"],
            6,
        ),
    )
}

/// Staples assumed present when a pantry photo cannot be read.
pub fn pantry_items_catalog() -> FallbackCatalog<PantryItems> {
    FallbackCatalog::new(PantryItems::new([
        "Onions", "Tomatoes", "Rice", "Dal", "Potatoes",
    ]))
}

pub fn fallback_analysis<R: Rng + ?Sized>(rng: &mut R) -> FoodAnalysis {
    let catalog = analysis_catalog();
    let policy = EntryPoint::FoodAnalysis.selection_policy();
    catalog.select(policy, "", rng).clone()
}

pub fn fallback_pantry_items() -> PantryItems {
    pantry_items_catalog().default_value().clone()
}
