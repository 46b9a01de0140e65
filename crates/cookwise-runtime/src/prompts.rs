//! Prompt templates for the assistants.
//!
//! Each template is a fixed instruction block followed by the request
//! context. Structured entry points spell out the exact JSON shape their
//! schema expects; chat entry points ask for short prose.

use cookwise_core::{ChatMessage, MealPlanRequest};

use crate::assistants::HealthPreferences;

/// Instructions for the meal planner.
pub const MEAL_PLANNING_PROMPT: &str = r#"
You are a budget meal planning assistant for a healthy home cooking platform.

Plan from the user's budget and the ingredients they already have, not from
recipes. Be practical rather than gourmet.

## Rules
1. The total estimated cost must NOT exceed the budget
2. Use existing ingredients first, then expiring ones, to minimise waste
3. Reuse ingredients across meals
4. Match the user's skill level and equipment
5. Avoid rare or expensive ingredients
6. Balance nutrition across each day
7. Prefer short preparation times

## Output Format (JSON only, no commentary)
{
  "plans": [
    {
      "planName": "Budget-Friendly Week",
      "days": [
        {
          "day": "Monday",
          "breakfast": {
            "name": "Oatmeal with Banana",
            "cuisine": "American",
            "calories": 350,
            "protein": 12,
            "cost": 1.5,
            "prepTime": 10,
            "description": "Quick and filling breakfast",
            "ingredients": ["oats", "banana", "milk"]
          },
          "lunch": { ... },
          "dinner": { ... },
          "totalCalories": 1200,
          "totalCost": 8.5
        }
      ],
      "totalCost": 60,
      "totalCalories": 14000,
      "shoppingList": ["oats 1kg"],
      "tips": ["Cook rice in bulk on Sunday"],
      "nutritionHighlights": ["High fiber"],
      "wasteReduction": ["Bananas used at breakfast and in smoothies"]
    }
  ],
  "budgetSummary": { "totalBudget": 100, "estimatedSpend": 60, "savings": 40 }
}
"#;

/// Persona shared by every wellness coach request.
pub const WELLNESS_COACH_PROMPT: &str = r#"
You are the Cookwise wellness coach: warm, practical and budget conscious,
with deep knowledge of Indian home cooking and everyday nutrition.

## Guidelines
- Keep answers short and conversational (2-4 sentences for simple questions)
- Use at most 3-5 bullet points for lists
- Always give practical, actionable advice
- Mention approximate costs in ₹ when suggesting dishes
- Use emoji sparingly
- End with encouragement or a follow-up question
- For medical conditions, suggest consulting a doctor for personal advice
"#;

pub const FOOD_ANALYSIS_PROMPT: &str = r#"
Analyze this food image and estimate its nutrition.

Identify the specific dish (e.g. "Butter Chicken with Naan", not "Indian
food"), your confidence (0-100), calories, macronutrients in grams, the
restaurant price and home cooking cost in Indian Rupees, the main
ingredients, and a health rating from 1 (least healthy) to 10.

## Output Format (JSON only)
{
  "dishName": "Butter Chicken with Naan",
  "confidence": 92,
  "calories": 650,
  "nutrition": { "calories": 650, "protein": 35, "carbs": 45, "fat": 38, "fiber": 3, "sodium": 980 },
  "estimatedCost": 350,
  "homemadeCost": 120,
  "ingredients": ["chicken", "butter", "cream", "tomato"],
  "healthRating": 5
}
"#;

pub const PANTRY_ITEMS_PROMPT: &str = r#"
Look at this image of kitchen or pantry items and list every food ingredient
you can identify. Only include food, not containers or utensils.

## Output Format (JSON only)
{ "items": ["Tomatoes", "Onions", "Rice", "Dal", "Cooking Oil"] }
"#;

/// Shape shared by recipe and leftover suggestions.
pub const RECIPE_OUTPUT_FORMAT: &str = r#"
## Output Format (JSON only)
{
  "recipes": [
    {
      "name": "Aloo Jeera",
      "description": "Simple cumin-flavoured potatoes, perfect with roti",
      "prepTime": 10,
      "cookTime": 15,
      "matchingIngredients": ["Potatoes", "Cumin", "Oil"],
      "missingIngredients": ["Coriander leaves"],
      "difficulty": "Easy",
      "cuisine": "North Indian",
      "estimatedCost": 30
    }
  ]
}
"#;

fn join_or(items: &[String], empty: &str) -> String {
    if items.is_empty() {
        empty.to_string()
    } else {
        items.join(", ")
    }
}

pub fn meal_plan_prompt(request: &MealPlanRequest) -> String {
    let meals = if request.meals_per_day > 3 {
        "breakfast, lunch, dinner, snacks"
    } else {
        "breakfast, lunch, dinner"
    };

    let mut context = format!(
        "## User Inputs\n\
         - Food budget: {currency}{budget} for {days} days\n\
         - Number of people: {people}\n\
         - Meals per day: {per_day} ({meals})\n\
         - Dietary preference: {diet}\n\
         - Health goals: {goals}\n\
         - Cooking skill level: {skill}\n\
         - Available equipment: {equipment}\n\
         - Preferred cuisines: {cuisines}\n",
        currency = request.currency,
        budget = request.budget,
        days = request.days,
        people = request.number_of_people,
        per_day = request.meals_per_day,
        meals = meals,
        diet = if request.diet_type.is_empty() { "none" } else { request.diet_type.as_str() },
        goals = join_or(&request.health_goals, "none"),
        skill = request.skill_level,
        equipment = join_or(&request.equipment, "basic stove"),
        cuisines = join_or(&request.cuisine_preferences, "any"),
    );

    if !request.available_ingredients.is_empty() {
        context.push_str(&format!(
            "- Available ingredients: {}\n",
            request.available_ingredients.join(", ")
        ));
    }
    if !request.expiring_ingredients.is_empty() {
        context.push_str(&format!(
            "- Expiring soon (use first): {}\n",
            request.expiring_ingredients.join(", ")
        ));
    }

    format!(
        "{}\n{}\nGenerate 2 alternative meal plans of exactly {} days each that fit this budget.",
        MEAL_PLANNING_PROMPT, context, request.days
    )
}

/// Render the last `window` turns as `User:` / `Coach:` lines.
pub fn format_history(history: &[ChatMessage], window: usize) -> String {
    let start = history.len().saturating_sub(window);
    history[start..]
        .iter()
        .map(|message| format!("{}: {}", message.speaker(), message.content))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn chat_prompt(message: &str, history: &[ChatMessage], window: usize) -> String {
    let recent = format_history(history, window);
    let history_block = if recent.is_empty() {
        String::new()
    } else {
        format!("\n## Recent Conversation\n{}\n", recent)
    };

    format!(
        "{}{}\n## Current User Message\n\"{}\"\n\nReply naturally and concisely as the coach:",
        WELLNESS_COACH_PROMPT, history_block, message
    )
}

pub fn health_prompt(condition: &str, preferences: &HealthPreferences) -> String {
    let budget = preferences
        .budget
        .map_or_else(|| "flexible".to_string(), |budget| format!("₹{}/meal", budget));
    let dietary = preferences.dietary.as_deref().unwrap_or("no restrictions");
    let time = preferences
        .time_minutes
        .map_or_else(|| "any".to_string(), |minutes| format!("{} minutes", minutes));

    format!(
        "{}\n## Task\nSuggest 3 meal ideas for someone managing \"{}\".\n\n\
         Preferences:\n- Budget: {}\n- Dietary: {}\n- Time: {}\n\n\
         Give practical Indian home cooking suggestions with brief reasoning for each.",
        WELLNESS_COACH_PROMPT, condition, budget, dietary, time
    )
}

pub fn tip_prompt(topic: &str) -> String {
    format!(
        "{}\nGive ONE quick, practical wellness tip about \"{}\" in 2-3 sentences, \
         specific to Indian food and lifestyle.",
        WELLNESS_COACH_PROMPT, topic
    )
}

pub fn pantry_recipes_prompt(items: &[String], cuisines: Option<&[String]>, max_missing: usize) -> String {
    let cuisine_line = match cuisines {
        Some(cuisines) if !cuisines.is_empty() => {
            format!("Preferred cuisines: {}", cuisines.join(", "))
        }
        _ => "Any Indian cuisine is fine.".to_string(),
    };

    format!(
        "You are a creative Indian home chef. The user's pantry holds:\n{}\n\n{}\n\n\
         Suggest 5 recipes. Use as many pantry items as possible, list at most {} missing \
         ingredients per recipe, and mix difficulty levels.\n{}",
        items.join(", "),
        cuisine_line,
        max_missing,
        RECIPE_OUTPUT_FORMAT
    )
}

pub fn leftovers_prompt(items: &[String]) -> String {
    format!(
        "The user has these leftovers that need to be used:\n{}\n\n\
         Suggest 3 quick ways to turn them into fresh meals with zero waste.\n{}",
        items.join(", "),
        RECIPE_OUTPUT_FORMAT
    )
}
