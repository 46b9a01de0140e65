//! Fallback replies for the wellness coach.

use rand::Rng;

use crate::types::ChatReply;

use super::{EntryPoint, FallbackCatalog};

const BUDGET_REPLY: &str = "Eating well on a budget is very doable! 💪

Build your week around dal, eggs, seasonal vegetables and local grains. A sample day under ₹100:
• Breakfast: Poha with peanuts and vegetables (₹25)
• Lunch: Rajma chawal with cucumber salad (₹35)
• Dinner: Roti, aloo gobhi and dal (₹35)

Would you like a full weekly budget plan?";

const ENERGY_REPLY: &str = "Feeling low on energy? Food can help! ⚡

• Start the day with soaked almonds and a banana
• Add iron-rich foods like spinach, dates and jaggery
• Stay hydrated with nimbu pani and a pinch of salt

A handful of roasted chana with jaggery makes a great pick-me-up. Want an energizing meal plan for the week?";

const DIABETES_REPLY: &str = "Managing blood sugar through diet matters a lot. 🌿

• Choose millets like ragi, jowar and bajra over white rice
• Load up on fiber from leafy greens, beans and whole dals
• Add methi and cinnamon to your cooking
• Pick whole fruit with some protein instead of juice

Ragi dosa with sambar is a great low-GI breakfast. Shall I share a diabetes-friendly weekly plan?";

const WEIGHT_REPLY: &str = "Great goal! Here is the healthy way to lose weight. 🎯

• Fill half your plate with vegetables
• Prefer whole grains like brown rice and whole wheat
• Include protein in every meal: dal, paneer, eggs or chicken
• Watch hidden calories in chai, biscuits and fried snacks

Grilled paneer tikka with a big salad is a filling low-calorie dinner. Want a calorie-conscious meal plan?";

const QUICK_REPLY: &str = "Quick healthy meals coming up! ⏰

15-minute ideas:
• Egg bhurji with whole wheat toast
• Poha loaded with vegetables and peanuts
• Dahi chawal with a side salad
• Vegetable upma with coconut chutney

Cooking dal and sabzi in bulk on weekends makes weekday dinners fast. Need more quick recipes?";

const HEART_REPLY: &str = "Eating for heart health is an excellent focus! ❤️

• Cook with mustard or olive oil instead of ghee
• Eat oats, barley and nuts to help with cholesterol
• Add flaxseeds or fatty fish for omega-3s
• Cut salt and flavour with lemon, herbs and garlic

Oats upma with vegetables is tasty and heart friendly. Want a heart-healthy plan for the week?";

const PROTEIN_REPLY: &str = "Building muscle on Indian food is absolutely possible! 💪

• Paneer: about 18 g protein per 100 g
• Chana or rajma: about 15 g per cooked cup
• Eggs: 6 g each
• Chicken breast: about 31 g per 100 g
• Hung curd: about 10 g per 100 g

After a workout try egg bhurji, whole wheat roti and a banana shake. Shall I build a high-protein plan?";

const DEFAULT_REPLY: &str = "Thanks for your question! 😊

I can help with:
• Healthy Indian meal ideas
• Budget-friendly cooking tips
• Diet advice for health conditions
• Energy-boosting foods
• Quick recipes for busy days

What would you like to explore today?";

const DIABETES_MEALS: &str = "Here are 3 meal ideas for managing {condition}:

1. Breakfast: Ragi dosa with sambar. Low GI and high in fiber.
2. Lunch: Brown rice with palak dal and salad. Slow-release carbs with iron.
3. Dinner: Grilled fish or paneer with stir-fried vegetables. High protein, low carb.

Want detailed recipes for any of these?";

const HEART_MEALS: &str = "Here are 3 meal ideas for managing {condition}:

1. Breakfast: Vegetable oats upma. Soluble fiber for cholesterol.
2. Lunch: Moong dal khichdi with low-salt kadhi. Gentle and light on sodium.
3. Dinner: Baked fish or tofu with garlic greens. Omega-3s and heart-friendly fats.

Want detailed recipes for any of these?";

const WEIGHT_MEALS: &str = "Here are 3 meal ideas for managing {condition}:

1. Breakfast: Besan chilla with mint chutney. Protein keeps you full.
2. Lunch: Jowar roti with mixed vegetable sabzi and curd. High fiber, moderate calories.
3. Dinner: Paneer tikka with a large salad. Light and satisfying.

Want detailed recipes for any of these?";

const GENERAL_MEALS: &str = "Here are 3 meal ideas for managing {condition}:

1. Breakfast: Ragi dosa with sambar. Low GI and keeps you full.
2. Lunch: Brown rice with palak dal and salad. Balanced and iron rich.
3. Dinner: Grilled fish or paneer with stir-fried vegetables. High protein, low carb.

These focus on whole foods and balanced nutrition. Want detailed recipes for any of these?";

const TIPS: [&str; 6] = [
    "🌿 Start your day with warm water and lemon to kickstart digestion and hydration.",
    "💪 A handful of soaked almonds each morning is an easy boost for energy and focus.",
    "🍳 Eggs are the budget protein hero: versatile, nutritious and only a few rupees each.",
    "🥬 Eat the rainbow. Different coloured vegetables provide different nutrients.",
    "⏰ Finish your last meal about 3 hours before bed for better digestion and sleep.",
    "🌶️ Turmeric, cumin and coriander bring anti-inflammatory benefits to everyday cooking.",
];

/// Replies routed on the user's chat message.
pub fn chat_catalog() -> FallbackCatalog<&'static str> {
    FallbackCatalog::new(DEFAULT_REPLY)
        .with_entry(&["budget", "cheap", "save", "money", "₹"], BUDGET_REPLY)
        .with_entry(&["energy", "tired", "fatigue", "weak"], ENERGY_REPLY)
        .with_entry(&["diabetes", "sugar"], DIABETES_REPLY)
        .with_entry(&["weight", "lose", "slim"], WEIGHT_REPLY)
        .with_entry(&["quick", "fast", "busy", "minutes"], QUICK_REPLY)
        .with_entry(&["heart", "cholesterol", "blood pressure", " bp"], HEART_REPLY)
        .with_entry(&["protein", "muscle", "gym", "workout"], PROTEIN_REPLY)
}

/// Meal suggestions routed on a health condition.
pub fn health_catalog() -> FallbackCatalog<&'static str> {
    FallbackCatalog::new(GENERAL_MEALS)
        .with_entry(&["diabetes", "sugar", "pcos"], DIABETES_MEALS)
        .with_entry(&["heart", "cholesterol", "blood pressure", "hypertension"], HEART_MEALS)
        .with_entry(&["weight", "obesity", "lose"], WEIGHT_MEALS)
}

/// Quick tips, picked at random.
pub fn tip_catalog() -> FallbackCatalog<&'static str> {
    TIPS[1..]
        .iter()
        .fold(FallbackCatalog::new(TIPS[0]), |catalog, tip| {
            catalog.with_entry(&[], *tip)
        })
}

pub fn fallback_reply(message: &str) -> ChatReply {
    let catalog = chat_catalog();
    ChatReply::new(*catalog.route(message))
}

pub fn fallback_health_suggestion(condition: &str) -> ChatReply {
    let catalog = health_catalog();
    let condition = match condition.trim() {
        "" => "your health",
        trimmed => trimmed,
    };
    ChatReply::new(catalog.route(condition).replace("{condition}", condition))
}

pub fn fallback_tip<R: Rng + ?Sized>(rng: &mut R) -> ChatReply {
    let catalog = tip_catalog();
    let policy = EntryPoint::WellnessTip.selection_policy();
    ChatReply::new(*catalog.select(policy, "", rng))
}
