//! Meal plan request and response records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Cooking skill of the person following the plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkillLevel::Beginner => write!(f, "Beginner"),
            SkillLevel::Intermediate => write!(f, "Intermediate"),
            SkillLevel::Advanced => write!(f, "Advanced"),
        }
    }
}

/// What the user asked the planner for.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanRequest {
    /// Total food budget for the whole plan
    pub budget: f64,

    /// Currency symbol or code used in prompts (e.g. "$", "₹")
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Number of days to plan
    pub days: u32,

    #[serde(default = "default_people")]
    pub number_of_people: u32,

    #[serde(default = "default_meals_per_day")]
    pub meals_per_day: u32,

    #[serde(default)]
    pub diet_type: String,

    #[serde(default)]
    pub cuisine_preferences: Vec<String>,

    #[serde(default)]
    pub health_goals: Vec<String>,

    #[serde(default)]
    pub skill_level: SkillLevel,

    #[serde(default)]
    pub equipment: Vec<String>,

    /// Ingredients already in the kitchen
    #[serde(default)]
    pub available_ingredients: Vec<String>,

    /// Ingredients that must be used first
    #[serde(default)]
    pub expiring_ingredients: Vec<String>,
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_people() -> u32 {
    1
}

fn default_meals_per_day() -> u32 {
    3
}

impl MealPlanRequest {
    /// Create a request with defaults for everything except budget and days.
    pub fn new(budget: f64, days: u32) -> Self {
        Self {
            budget,
            currency: default_currency(),
            days,
            number_of_people: default_people(),
            meals_per_day: default_meals_per_day(),
            diet_type: String::new(),
            cuisine_preferences: Vec::new(),
            health_goals: Vec::new(),
            skill_level: SkillLevel::default(),
            equipment: Vec::new(),
            available_ingredients: Vec::new(),
            expiring_ingredients: Vec::new(),
        }
    }

    /// Text used for keyword routing of fallback plans.
    pub fn routing_text(&self) -> String {
        let mut text = self.diet_type.clone();
        for goal in &self.health_goals {
            text.push(' ');
            text.push_str(goal);
        }
        text
    }
}

/// A single meal inside a day plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedMeal {
    pub name: String,

    #[serde(default)]
    pub cuisine: String,

    pub calories: f64,

    /// Protein in grams
    #[serde(default)]
    pub protein: f64,

    /// Cost per serving
    pub cost: f64,

    /// Preparation time in minutes
    #[serde(default)]
    pub prep_time: f64,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub ingredients: Vec<String>,
}

/// Meals for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    pub day: String,
    pub breakfast: GeneratedMeal,
    pub lunch: GeneratedMeal,
    pub dinner: GeneratedMeal,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snack: Option<GeneratedMeal>,

    pub total_calories: f64,

    /// Cost for one person for the day
    pub total_cost: f64,
}

/// One complete plan alternative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedMealPlan {
    pub plan_name: String,
    pub days: Vec<DayPlan>,

    /// Cost for the whole household over all days
    pub total_cost: f64,
    pub total_calories: f64,

    #[serde(default)]
    pub shopping_list: Vec<String>,

    #[serde(default)]
    pub tips: Vec<String>,

    #[serde(default)]
    pub nutrition_highlights: Vec<String>,

    #[serde(default)]
    pub waste_reduction: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummary {
    pub total_budget: f64,
    pub estimated_spend: f64,
    pub savings: f64,
}

/// Planner output: one or more alternatives plus a budget summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanResponse {
    pub plans: Vec<GeneratedMealPlan>,
    pub budget_summary: BudgetSummary,
}
