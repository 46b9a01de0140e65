//! Budget meal planning.

use std::sync::Arc;

use cookwise_core::{EntryPoint, MealPlanRequest, MealPlanResponse};

use crate::orchestrator::{Orchestrator, Resolved};
use crate::prompts;
use crate::providers::GenerationRequest;

#[derive(Debug, Clone)]
pub struct MealPlanner {
    orchestrator: Arc<Orchestrator>,
}

impl MealPlanner {
    pub fn new(orchestrator: Arc<Orchestrator>) -> Self {
        Self { orchestrator }
    }

    /// Plans that fit `request`. Fallback plans never exceed the budget.
    pub async fn generate_plan(&self, request: &MealPlanRequest) -> MealPlanResponse {
        self.resolve_plan(request).await.into_value()
    }

    pub async fn resolve_plan(&self, request: &MealPlanRequest) -> Resolved<MealPlanResponse> {
        let generation = GenerationRequest::text(prompts::meal_plan_prompt(request));
        self.orchestrator
            .resolve(EntryPoint::MealPlan, generation, |supplier| {
                supplier.meal_plan(request)
            })
            .await
    }
}
