//! Food photo analysis records.

use serde::{Deserialize, Deserializer, Serialize};

/// Macronutrient breakdown in grams (sodium in milligrams).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionInfo {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiber: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sodium: Option<f64>,
}

/// What the vision model recognised in a food photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodAnalysis {
    pub dish_name: String,

    /// Recognition confidence, 0-100
    pub confidence: f64,

    pub calories: f64,
    pub nutrition: NutritionInfo,

    /// Typical restaurant price
    pub estimated_cost: f64,

    /// Cost to cook the same dish at home
    pub homemade_cost: f64,

    pub ingredients: Vec<String>,

    /// 1 (indulgent) to 10 (very healthy)
    #[serde(deserialize_with = "rating_from_number")]
    pub health_rating: u8,
}

// Models write integral ratings as `8.0` as often as `8`.
fn rating_from_number<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let rating = f64::deserialize(deserializer)?;
    if !rating.is_finite() {
        return Err(serde::de::Error::custom("health rating must be a finite number"));
    }
    Ok(rating.round().clamp(1.0, 10.0) as u8)
}

/// Ingredients identified in a pantry photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PantryItems {
    pub items: Vec<String>,
}

impl PantryItems {
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
        }
    }
}
