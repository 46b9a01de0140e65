//! Pure nutrition and cost insights derived from structured results.

use serde::Serialize;

use crate::types::FoodAnalysis;

const PROTEIN_KEYWORDS: [&str; 7] = ["paneer", "egg", "chicken", "dal", "lentil", "chana", "soya"];
const CARB_KEYWORDS: [&str; 5] = ["rice", "roti", "bread", "potato", "noodle"];
const VEGETABLE_KEYWORDS: [&str; 6] = ["onion", "tomato", "spinach", "carrot", "peas", "beans"];

/// Restaurant price against the cost of cooking the same dish.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostComparison {
    pub restaurant_cost: f64,
    pub homemade_cost: f64,
    pub savings: f64,
    pub savings_percent: i64,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Compatibility {
    pub compatible: bool,
    pub suggestions: Vec<String>,
}

pub fn cost_comparison(analysis: &FoodAnalysis) -> CostComparison {
    let savings = analysis.estimated_cost - analysis.homemade_cost;
    let savings_percent = if analysis.estimated_cost > 0.0 {
        (savings / analysis.estimated_cost * 100.0).round() as i64
    } else {
        0
    };

    CostComparison {
        restaurant_cost: analysis.estimated_cost,
        homemade_cost: analysis.homemade_cost,
        savings,
        savings_percent,
        message: format!(
            "Cooking at home saves you {} ({}% less)!",
            savings, savings_percent
        ),
    }
}

/// Advice lines for a recognised dish.
pub fn health_insights(analysis: &FoodAnalysis) -> Vec<String> {
    let nutrition = &analysis.nutrition;
    let mut insights = Vec::new();

    let rating = match analysis.health_rating {
        7.. => "✅ Great choice! This is a healthy meal option.",
        4..=6 => "⚠️ Moderate health rating. Consider balancing with vegetables.",
        _ => "🔴 High calorie or fat content. Best enjoyed occasionally.",
    };
    insights.push(rating.to_string());

    if nutrition.protein >= 25.0 {
        insights.push("💪 High in protein, great for muscle building.".to_string());
    }
    if nutrition.fiber.is_some_and(|fiber| fiber >= 5.0) {
        insights.push("🌾 Good fiber content for digestion.".to_string());
    }
    if nutrition.sodium.is_some_and(|sodium| sodium > 800.0) {
        insights.push(
            "🧂 High sodium, may not suit anyone watching their salt intake.".to_string(),
        );
    }
    if nutrition.fat > 30.0 {
        insights.push("🫒 High fat content, consider portion control.".to_string());
    }

    insights
}

/// Check that a set of ingredients can make a balanced meal.
///
/// Compatible when at most one of protein, carbs and vegetables is missing.
pub fn check_ingredient_compatibility(ingredients: &[String]) -> Compatibility {
    let has_any = |keywords: &[&str]| {
        ingredients.iter().any(|item| {
            let lowered = item.to_lowercase();
            keywords.iter().any(|keyword| lowered.contains(keyword))
        })
    };

    let mut suggestions = Vec::new();
    if !has_any(&PROTEIN_KEYWORDS) {
        suggestions.push("Add protein: eggs, paneer, or lentils".to_string());
    }
    if !has_any(&CARB_KEYWORDS) {
        suggestions.push("Add carbs: rice, roti, or potatoes".to_string());
    }
    if !has_any(&VEGETABLE_KEYWORDS) {
        suggestions.push("Add vegetables for a balanced meal".to_string());
    }

    Compatibility {
        compatible: suggestions.len() < 2,
        suggestions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NutritionInfo;

    fn dish(rating: u8, protein: f64, fiber: Option<f64>, sodium: Option<f64>, fat: f64) -> FoodAnalysis {
        FoodAnalysis {
            dish_name: "Test".to_string(),
            confidence: 90.0,
            calories: 500.0,
            nutrition: NutritionInfo {
                calories: 500.0,
                protein,
                carbs: 40.0,
                fat,
                fiber,
                sodium,
            },
            estimated_cost: 350.0,
            homemade_cost: 120.0,
            ingredients: vec![],
            health_rating: rating,
        }
    }

    #[test]
    fn test_cost_comparison() {
        let comparison = cost_comparison(&dish(5, 10.0, None, None, 10.0));
        assert_eq!(comparison.savings, 230.0);
        assert_eq!(comparison.savings_percent, 66);
        assert!(comparison.message.contains("230"));
    }

    #[test]
    fn test_cost_comparison_zero_price() {
        let mut analysis = dish(5, 10.0, None, None, 10.0);
        analysis.estimated_cost = 0.0;
        analysis.homemade_cost = 0.0;
        assert_eq!(cost_comparison(&analysis).savings_percent, 0);
    }

    #[test]
    fn test_health_insights_rich_dish() {
        let insights = health_insights(&dish(5, 35.0, Some(3.0), Some(980.0), 38.0));
        assert_eq!(insights.len(), 4);
        assert!(insights[0].contains("Moderate"));
        assert!(insights.iter().any(|line| line.contains("protein")));
        assert!(insights.iter().any(|line| line.contains("sodium")));
        assert!(insights.iter().any(|line| line.contains("fat")));
    }

    #[test]
    fn test_health_insights_rating_bands() {
        assert!(health_insights(&dish(9, 10.0, None, None, 5.0))[0].contains("Great"));
        assert!(health_insights(&dish(2, 10.0, None, None, 5.0))[0].contains("occasionally"));
        assert_eq!(health_insights(&dish(7, 10.0, Some(6.0), None, 5.0)).len(), 2);
    }

    #[test]
    fn test_compatibility() {
        let balanced: Vec<String> = ["Rice", "Dal", "Tomatoes"].iter().map(|s| s.to_string()).collect();
        let result = check_ingredient_compatibility(&balanced);
        assert!(result.compatible);
        assert!(result.suggestions.is_empty());

        let one_missing: Vec<String> = ["Rice", "Onion"].iter().map(|s| s.to_string()).collect();
        let result = check_ingredient_compatibility(&one_missing);
        assert!(result.compatible);
        assert_eq!(result.suggestions.len(), 1);

        let sparse: Vec<String> = vec!["Butter".to_string()];
        let result = check_ingredient_compatibility(&sparse);
        assert!(!result.compatible);
        assert_eq!(result.suggestions.len(), 3);
    }
}
