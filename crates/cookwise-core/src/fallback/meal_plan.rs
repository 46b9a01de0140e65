//! Fallback meal plans.
//!
//! Templates rotate three days of meals. A fallback response holds the routed
//! template first and the next template in the catalog second, each expanded
//! to the requested number of days. Costs are handled in whole cents and
//! scaled down when a plan would overshoot the budget, so a fallback plan
//! never costs more than was asked for.

use crate::types::{
    BudgetSummary, DayPlan, GeneratedMeal, GeneratedMealPlan, MealPlanRequest, MealPlanResponse,
};

use super::FallbackCatalog;

const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// A pre-authored plan before it is fitted to a request.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanTemplate {
    pub name: &'static str,
    pub breakfasts: [GeneratedMeal; 3],
    pub lunches: [GeneratedMeal; 3],
    pub dinners: [GeneratedMeal; 3],
    pub snacks: [GeneratedMeal; 3],
    pub shopping_list: &'static [&'static str],
    pub tips: &'static [&'static str],
    pub nutrition_highlights: &'static [&'static str],
    pub waste_reduction: &'static [&'static str],
}

#[allow(clippy::too_many_arguments)]
fn meal(
    name: &str,
    cuisine: &str,
    calories: f64,
    protein: f64,
    cost: f64,
    prep_time: f64,
    description: &str,
    ingredients: &[&str],
) -> GeneratedMeal {
    GeneratedMeal {
        name: name.to_string(),
        cuisine: cuisine.to_string(),
        calories,
        protein,
        cost,
        prep_time,
        description: description.to_string(),
        ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
    }
}

fn budget_friendly() -> PlanTemplate {
    PlanTemplate {
        name: "Budget-Friendly Week",
        breakfasts: [
            meal("Oatmeal with Banana", "American", 350.0, 12.0, 1.5, 10.0, "Quick and filling", &["oats", "banana", "milk"]),
            meal("Vegetable Poha", "Indian", 320.0, 8.0, 1.0, 15.0, "Light flattened rice with peanuts", &["poha", "onion", "peanuts", "peas"]),
            meal("Scrambled Eggs on Toast", "American", 380.0, 18.0, 2.0, 12.0, "Classic protein breakfast", &["eggs", "bread", "butter"]),
        ],
        lunches: [
            meal("Lentil Soup", "Mediterranean", 380.0, 16.0, 2.0, 25.0, "Hearty and cheap", &["lentils", "carrots", "onion", "spices"]),
            meal("Rajma Chawal", "Indian", 450.0, 17.0, 2.5, 30.0, "Kidney bean curry with rice", &["kidney beans", "rice", "tomato", "onion"]),
            meal("Chickpea Salad Wrap", "International", 420.0, 15.0, 2.5, 15.0, "Crunchy and filling", &["chickpeas", "tortilla", "cucumber", "yogurt"]),
        ],
        dinners: [
            meal("Vegetable Stir-Fry with Rice", "Asian", 520.0, 14.0, 3.0, 20.0, "Quick weeknight dinner", &["rice", "mixed vegetables", "soy sauce"]),
            meal("Dal Tadka with Roti", "Indian", 480.0, 18.0, 2.0, 25.0, "Comforting tempered lentils", &["toor dal", "wheat flour", "garlic", "cumin"]),
            meal("Pasta Primavera", "Italian", 500.0, 14.0, 3.0, 25.0, "Veggie-loaded pasta", &["pasta", "vegetables", "olive oil"]),
        ],
        snacks: [
            meal("Roasted Chana", "Indian", 150.0, 8.0, 0.5, 2.0, "Crunchy protein snack", &["roasted chana"]),
            meal("Apple with Peanut Butter", "American", 200.0, 5.0, 0.8, 3.0, "Sweet and satisfying", &["apple", "peanut butter"]),
            meal("Spiced Buttermilk", "Indian", 80.0, 3.0, 0.4, 3.0, "Cooling probiotic drink", &["yogurt", "cumin", "salt"]),
        ],
        shopping_list: &[
            "Oats (1 kg)",
            "Bananas (6)",
            "Eggs (12)",
            "Lentils and toor dal (1 kg)",
            "Rice (2 kg)",
            "Kidney beans (500 g)",
            "Seasonal vegetables",
            "Wheat flour (1 kg)",
        ],
        tips: &[
            "Cook grains and dal in bulk on Sunday",
            "Buy seasonal vegetables for the best prices",
            "Freeze extra soup portions for busy days",
        ],
        nutrition_highlights: &[
            "Plant protein from lentils, beans and chickpeas",
            "Good fiber from oats, dal and vegetables",
        ],
        waste_reduction: &[
            "Rice reused across lunch and dinner",
            "Leftover dal becomes next day's soup base",
        ],
    }
}

fn high_protein() -> PlanTemplate {
    PlanTemplate {
        name: "High Protein Week",
        breakfasts: [
            meal("Paneer Bhurji with Toast", "Indian", 420.0, 24.0, 2.5, 15.0, "Scrambled cottage cheese", &["paneer", "onion", "tomato", "bread"]),
            meal("Greek Yogurt Parfait", "Mediterranean", 300.0, 18.0, 2.0, 5.0, "Protein-rich start", &["greek yogurt", "granola", "berries"]),
            meal("Masala Omelette", "Indian", 360.0, 20.0, 1.5, 10.0, "Three-egg spiced omelette", &["eggs", "onion", "green chili"]),
        ],
        lunches: [
            meal("Chicken Salad Wrap", "American", 450.0, 30.0, 3.5, 15.0, "Light and filling", &["chicken", "lettuce", "tortilla"]),
            meal("Chana Masala with Rice", "Indian", 480.0, 19.0, 2.0, 25.0, "Spiced chickpea curry", &["chickpeas", "tomato", "rice"]),
            meal("Tofu Quinoa Bowl", "International", 460.0, 24.0, 3.5, 20.0, "Complete plant protein", &["tofu", "quinoa", "spinach"]),
        ],
        dinners: [
            meal("Baked Chicken and Veggies", "American", 550.0, 38.0, 4.5, 35.0, "One-pan meal", &["chicken thighs", "potatoes", "broccoli"]),
            meal("Egg Curry with Roti", "Indian", 500.0, 26.0, 2.5, 25.0, "Boiled eggs in onion gravy", &["eggs", "onion", "tomato", "wheat flour"]),
            meal("Soya Chunk Pulao", "Indian", 520.0, 28.0, 2.0, 30.0, "Budget protein rice", &["soya chunks", "rice", "peas"]),
        ],
        snacks: [
            meal("Boiled Eggs", "International", 140.0, 12.0, 0.6, 10.0, "Two eggs with pepper", &["eggs"]),
            meal("Sprouts Chaat", "Indian", 180.0, 10.0, 0.7, 10.0, "Tangy moong sprouts", &["moong sprouts", "onion", "lemon"]),
            meal("Hung Curd Dip with Carrots", "Indian", 150.0, 9.0, 0.8, 5.0, "Creamy high-protein dip", &["hung curd", "carrots"]),
        ],
        shopping_list: &[
            "Eggs (24)",
            "Paneer (400 g)",
            "Chicken thighs (1 kg)",
            "Chickpeas (500 g)",
            "Soya chunks (200 g)",
            "Greek yogurt (500 g)",
            "Rice (1 kg)",
        ],
        tips: &[
            "Spread protein across every meal rather than one large serving",
            "Soya chunks and eggs are the cheapest protein per gram",
        ],
        nutrition_highlights: &[
            "Around 90 g of protein per day",
            "Mix of animal and plant protein sources",
        ],
        waste_reduction: &[
            "Extra chicken goes into next day's wrap",
            "Leftover paneer becomes a quick bhurji",
        ],
    }
}

fn quick_and_easy() -> PlanTemplate {
    PlanTemplate {
        name: "Quick & Easy Week",
        breakfasts: [
            meal("Overnight Oats", "International", 340.0, 12.0, 1.5, 5.0, "Prepared the night before", &["oats", "milk", "chia seeds"]),
            meal("Peanut Butter Banana Toast", "American", 380.0, 12.0, 1.2, 5.0, "Ready in five minutes", &["bread", "peanut butter", "banana"]),
            meal("Curd Rice", "South Indian", 330.0, 9.0, 1.0, 5.0, "Cooling and simple", &["rice", "curd", "mustard seeds"]),
        ],
        lunches: [
            meal("Egg Fried Rice", "Indo-Chinese", 480.0, 16.0, 2.0, 15.0, "Uses leftover rice", &["rice", "eggs", "spring onion"]),
            meal("Hummus Veggie Sandwich", "Mediterranean", 420.0, 14.0, 2.5, 10.0, "No cooking needed", &["bread", "hummus", "cucumber", "tomato"]),
            meal("Vegetable Upma", "South Indian", 360.0, 9.0, 1.5, 15.0, "Savory semolina", &["semolina", "vegetables", "curry leaves"]),
        ],
        dinners: [
            meal("One-Pot Khichdi", "Indian", 450.0, 16.0, 1.5, 20.0, "Rice and lentils together", &["rice", "moong dal", "ghee"]),
            meal("Bean Quesadillas", "Mexican", 520.0, 20.0, 3.0, 15.0, "Crispy and cheesy", &["tortilla", "beans", "cheese"]),
            meal("Sheet Pan Vegetables and Paneer", "International", 480.0, 22.0, 3.0, 25.0, "Everything roasts at once", &["paneer", "bell peppers", "zucchini"]),
        ],
        snacks: [
            meal("Banana", "International", 100.0, 1.0, 0.3, 0.0, "Grab and go", &["banana"]),
            meal("Trail Mix", "International", 180.0, 5.0, 0.9, 0.0, "Nuts and raisins", &["peanuts", "raisins"]),
            meal("Makhana", "Indian", 110.0, 4.0, 0.8, 5.0, "Roasted fox nuts", &["makhana", "ghee"]),
        ],
        shopping_list: &[
            "Oats (500 g)",
            "Bread (2 loaves)",
            "Eggs (12)",
            "Rice (1 kg)",
            "Moong dal (500 g)",
            "Frozen vegetables (2 bags)",
            "Canned beans (2)",
        ],
        tips: &[
            "Prep chopped vegetables on the weekend",
            "One-pot meals save cleanup time",
            "Frozen vegetables are just as nutritious",
        ],
        nutrition_highlights: &[
            "Every meal under 25 minutes",
            "Balanced carbs and protein",
        ],
        waste_reduction: &[
            "Leftover rice becomes fried rice",
            "Frozen vegetables do not spoil",
        ],
    }
}

fn low_gi() -> PlanTemplate {
    PlanTemplate {
        name: "Low-GI Balanced Week",
        breakfasts: [
            meal("Ragi Dosa with Sambar", "South Indian", 320.0, 10.0, 1.5, 20.0, "Low GI millet breakfast", &["ragi flour", "toor dal", "vegetables"]),
            meal("Besan Chilla", "Indian", 300.0, 14.0, 1.0, 15.0, "Chickpea flour pancake", &["besan", "onion", "tomato"]),
            meal("Vegetable Daliya", "Indian", 310.0, 10.0, 1.0, 20.0, "Broken wheat porridge", &["broken wheat", "vegetables"]),
        ],
        lunches: [
            meal("Brown Rice with Palak Dal", "Indian", 450.0, 18.0, 2.0, 30.0, "Iron rich and filling", &["brown rice", "spinach", "moong dal"]),
            meal("Jowar Roti with Mixed Veg", "Indian", 420.0, 12.0, 2.0, 30.0, "Millet flatbread", &["jowar flour", "mixed vegetables"]),
            meal("Quinoa Chickpea Salad", "Mediterranean", 400.0, 16.0, 3.0, 15.0, "High fiber bowl", &["quinoa", "chickpeas", "cucumber"]),
        ],
        dinners: [
            meal("Grilled Fish with Stir-Fry Vegetables", "International", 460.0, 34.0, 4.0, 25.0, "High protein, low carb", &["fish", "broccoli", "bell peppers"]),
            meal("Methi Thepla with Curd", "Gujarati", 430.0, 14.0, 1.5, 25.0, "Fenugreek flatbread", &["wheat flour", "methi", "curd"]),
            meal("Paneer Tikka with Salad", "Indian", 450.0, 24.0, 3.0, 25.0, "Grilled paneer skewers", &["paneer", "yogurt", "capsicum"]),
        ],
        snacks: [
            meal("Roasted Almonds", "International", 160.0, 6.0, 1.0, 0.0, "Healthy fats", &["almonds"]),
            meal("Guava Slices", "Indian", 70.0, 2.0, 0.5, 2.0, "Low GI fruit", &["guava"]),
            meal("Cucumber Raita", "Indian", 90.0, 4.0, 0.5, 5.0, "Probiotic side", &["curd", "cucumber"]),
        ],
        shopping_list: &[
            "Ragi flour (500 g)",
            "Jowar flour (500 g)",
            "Brown rice (1 kg)",
            "Moong and toor dal (1 kg)",
            "Besan (500 g)",
            "Leafy greens",
            "Curd (1 kg)",
        ],
        tips: &[
            "Pair carbohydrates with protein or fiber",
            "Prefer whole fruit over juice",
        ],
        nutrition_highlights: &[
            "Millets and whole grains instead of refined flour",
            "Fiber in every meal",
        ],
        waste_reduction: &[
            "Extra dal thins into sambar",
            "Leftover curd becomes raita or buttermilk",
        ],
    }
}

/// Catalog of plan templates, routed on diet type and health goals.
pub fn catalog() -> FallbackCatalog<PlanTemplate> {
    FallbackCatalog::new(budget_friendly())
        .with_entry(&["protein", "muscle", "gym", "bulk"], high_protein())
        .with_entry(&["quick", "busy", "fast", "easy"], quick_and_easy())
        .with_entry(&["diabetes", "diabetic", "sugar", "low gi", "heart"], low_gi())
}

/// Build the fallback response for a meal plan request.
pub fn fallback_meal_plan(request: &MealPlanRequest) -> MealPlanResponse {
    let catalog = catalog();
    let primary = catalog.route(&request.routing_text());
    let secondary = catalog.next_after(primary);

    let plans = vec![fit_plan(primary, request), fit_plan(secondary, request)];

    let budget_cents = cents(request.budget.max(0.0));
    let spend_cents = cents(plans[0].total_cost);

    MealPlanResponse {
        plans,
        budget_summary: BudgetSummary {
            total_budget: request.budget,
            estimated_spend: from_cents(spend_cents),
            savings: from_cents(budget_cents) - from_cents(spend_cents),
        },
    }
}

/// Expand a template to `request.days` days within `request.budget`.
///
/// A plan always covers at least one day.
pub fn fit_plan(template: &PlanTemplate, request: &MealPlanRequest) -> GeneratedMealPlan {
    let people = u64::from(request.number_of_people.max(1));
    let with_snack = request.meals_per_day > 3;
    let day_count = request.days.max(1) as usize;

    let slots: Vec<[Option<&GeneratedMeal>; 4]> = (0..day_count)
        .map(|i| {
            let slot = i % 3;
            [
                Some(&template.breakfasts[slot]),
                Some(&template.lunches[slot]),
                Some(&template.dinners[slot]),
                with_snack.then(|| &template.snacks[slot]),
            ]
        })
        .collect();

    let raw_total: u64 = slots
        .iter()
        .flat_map(|day| day.iter().flatten())
        .map(|meal| cents(meal.cost))
        .sum::<u64>()
        * people;

    let limit = budget_limit_cents(request.budget);
    let scale = |meal_cents: u64| -> u64 {
        if raw_total > limit && raw_total > 0 {
            // Floor division keeps the scaled sum at or below the limit.
            ((u128::from(meal_cents) * u128::from(limit)) / u128::from(raw_total)) as u64
        } else {
            meal_cents
        }
    };

    let mut plan_cents: u64 = 0;
    let mut plan_calories = 0.0;

    let days: Vec<DayPlan> = slots
        .iter()
        .enumerate()
        .map(|(i, day)| {
            let priced: Vec<Option<GeneratedMeal>> = day
                .iter()
                .map(|slot| {
                    slot.map(|meal| GeneratedMeal {
                        cost: from_cents(scale(cents(meal.cost))),
                        ..meal.clone()
                    })
                })
                .collect();

            let day_cents: u64 = priced.iter().flatten().map(|meal| cents(meal.cost)).sum();
            let day_calories: f64 = priced.iter().flatten().map(|meal| meal.calories).sum();
            plan_cents += day_cents;
            plan_calories += day_calories;

            let mut meals = priced.into_iter();
            let mut next = || meals.next().flatten();
            let (breakfast, lunch, dinner, snack) = (next(), next(), next(), next());

            DayPlan {
                day: WEEKDAYS[i % WEEKDAYS.len()].to_string(),
                breakfast: breakfast.unwrap_or_else(|| template.breakfasts[0].clone()),
                lunch: lunch.unwrap_or_else(|| template.lunches[0].clone()),
                dinner: dinner.unwrap_or_else(|| template.dinners[0].clone()),
                snack,
                total_calories: day_calories,
                total_cost: from_cents(day_cents),
            }
        })
        .collect();

    GeneratedMealPlan {
        plan_name: template.name.to_string(),
        days,
        total_cost: from_cents(plan_cents * people),
        total_calories: plan_calories,
        shopping_list: to_strings(template.shopping_list),
        tips: to_strings(template.tips),
        nutrition_highlights: to_strings(template.nutrition_highlights),
        waste_reduction: to_strings(template.waste_reduction),
    }
}

fn to_strings(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|line| line.to_string()).collect()
}

fn cents(amount: f64) -> u64 {
    if amount.is_finite() && amount > 0.0 {
        (amount * 100.0).round() as u64
    } else {
        0
    }
}

fn from_cents(amount: u64) -> f64 {
    amount as f64 / 100.0
}

/// Largest whole-cent amount that, converted back, does not exceed `budget`.
fn budget_limit_cents(budget: f64) -> u64 {
    if !budget.is_finite() || budget <= 0.0 {
        return 0;
    }
    let mut limit = (budget * 100.0).floor() as u64;
    while limit > 0 && from_cents(limit) > budget {
        limit -= 1;
    }
    limit
}
