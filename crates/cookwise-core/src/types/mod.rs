//! Structured result records shared by live generation and fallbacks.
//!
//! Every record here is plain data. A value decoded from model output and a
//! value supplied by a fallback catalog have the same shape, so callers never
//! need to know which path produced it.

mod chat;
mod food;
mod meal_plan;
mod pantry;

pub use chat::{ChatMessage, ChatReply, ChatRole};
pub use food::{FoodAnalysis, NutritionInfo, PantryItems};
pub use meal_plan::{
    BudgetSummary, DayPlan, GeneratedMeal, GeneratedMealPlan, MealPlanRequest,
    MealPlanResponse, SkillLevel,
};
pub use pantry::{Difficulty, PantryRecipe, PantrySuggestions};
