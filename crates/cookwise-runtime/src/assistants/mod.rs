//! The public entry points.
//!
//! Each assistant owns a handful of entry points and shares one
//! [`Orchestrator`]. None of them return errors: a failed live call yields
//! the entry point's fallback record.

mod food_scanner;
mod meal_planner;
mod pantry_chef;
mod wellness_coach;

use std::sync::Arc;

use crate::orchestrator::Orchestrator;

pub use food_scanner::FoodScanner;
pub use meal_planner::MealPlanner;
pub use pantry_chef::PantryChef;
pub use wellness_coach::{HealthPreferences, WellnessCoach};

/// All four assistants over one orchestrator.
#[derive(Debug, Clone)]
pub struct Assistants {
    pub meal_planner: MealPlanner,
    pub wellness_coach: WellnessCoach,
    pub food_scanner: FoodScanner,
    pub pantry_chef: PantryChef,
}

impl Assistants {
    pub fn new(orchestrator: Arc<Orchestrator>) -> Self {
        Self {
            meal_planner: MealPlanner::new(orchestrator.clone()),
            wellness_coach: WellnessCoach::new(orchestrator.clone()),
            food_scanner: FoodScanner::new(orchestrator.clone()),
            pantry_chef: PantryChef::new(orchestrator),
        }
    }
}
