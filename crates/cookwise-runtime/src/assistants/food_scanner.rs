//! Food and pantry photo recognition.

use std::sync::Arc;

use cookwise_core::{EntryPoint, FoodAnalysis, PantryItems};

use crate::orchestrator::Orchestrator;
use crate::prompts;
use crate::providers::{GenerationRequest, ImagePayload};

#[derive(Debug, Clone)]
pub struct FoodScanner {
    orchestrator: Arc<Orchestrator>,
}

impl FoodScanner {
    pub fn new(orchestrator: Arc<Orchestrator>) -> Self {
        Self { orchestrator }
    }

    /// Recognise the dish in `image` and estimate its nutrition and cost.
    ///
    /// An empty image goes straight to the fallback; neither the gate nor
    /// the provider is consulted.
    pub async fn analyze_photo(&self, image: &ImagePayload) -> FoodAnalysis {
        if image.is_empty() {
            tracing::debug!(entry = ?EntryPoint::FoodAnalysis, "Empty image, using fallback");
            return self.orchestrator.supplier().food_analysis();
        }

        let request = GenerationRequest::with_image(prompts::FOOD_ANALYSIS_PROMPT, image.clone());
        self.orchestrator
            .resolve(EntryPoint::FoodAnalysis, request, |supplier| supplier.food_analysis())
            .await
            .into_value()
    }

    /// List the food items visible in a pantry photo.
    pub async fn identify_pantry_items(&self, image: &ImagePayload) -> PantryItems {
        if image.is_empty() {
            tracing::debug!(entry = ?EntryPoint::PantryItems, "Empty image, using fallback");
            return self.orchestrator.supplier().pantry_items();
        }

        let request = GenerationRequest::with_image(prompts::PANTRY_ITEMS_PROMPT, image.clone());
        self.orchestrator
            .resolve(EntryPoint::PantryItems, request, |supplier| supplier.pantry_items())
            .await
            .into_value()
    }
}
