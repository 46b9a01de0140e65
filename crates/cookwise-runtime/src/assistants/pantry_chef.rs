//! Recipe ideas from what is already in the kitchen.

use std::sync::Arc;

use cookwise_core::{EntryPoint, PantrySuggestions};

use crate::orchestrator::Orchestrator;
use crate::prompts;
use crate::providers::GenerationRequest;

#[derive(Debug, Clone)]
pub struct PantryChef {
    orchestrator: Arc<Orchestrator>,
}

impl PantryChef {
    pub fn new(orchestrator: Arc<Orchestrator>) -> Self {
        Self { orchestrator }
    }

    /// Recipes that use `items`, each missing at most `max_missing` ingredients.
    pub async fn suggest_recipes(
        &self,
        items: &[String],
        cuisines: Option<&[String]>,
        max_missing: usize,
    ) -> PantrySuggestions {
        let request =
            GenerationRequest::text(prompts::pantry_recipes_prompt(items, cuisines, max_missing));
        self.orchestrator
            .resolve(EntryPoint::PantryRecipes, request, |supplier| {
                supplier.pantry_recipes(items, max_missing)
            })
            .await
            .into_value()
    }

    /// Ways to use up leftovers before they spoil.
    pub async fn suggest_leftover_usage(&self, items: &[String]) -> PantrySuggestions {
        let request = GenerationRequest::text(prompts::leftovers_prompt(items));
        self.orchestrator
            .resolve(EntryPoint::LeftoverUsage, request, |supplier| supplier.leftovers(items))
            .await
            .into_value()
    }
}
