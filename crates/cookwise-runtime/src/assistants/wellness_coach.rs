//! Conversational wellness coaching.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use cookwise_core::{ChatMessage, ChatReply, EntryPoint};

use crate::orchestrator::{Orchestrator, Resolved};
use crate::prompts;
use crate::providers::GenerationRequest;

/// Optional constraints for health-specific suggestions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthPreferences {
    /// Per-meal budget in rupees
    pub budget: Option<f64>,
    pub dietary: Option<String>,
    pub time_minutes: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct WellnessCoach {
    orchestrator: Arc<Orchestrator>,
}

impl WellnessCoach {
    pub fn new(orchestrator: Arc<Orchestrator>) -> Self {
        Self { orchestrator }
    }

    /// Answer `message`, with the recent `history` as context.
    pub async fn reply(&self, message: &str, history: &[ChatMessage]) -> ChatReply {
        self.resolve_reply(message, history).await.into_value()
    }

    pub async fn resolve_reply(&self, message: &str, history: &[ChatMessage]) -> Resolved<ChatReply> {
        let window = self.orchestrator.config().history_window;
        let request = GenerationRequest::text(prompts::chat_prompt(message, history, window));
        self.orchestrator
            .resolve(EntryPoint::WellnessChat, request, |supplier| {
                supplier.chat_reply(message)
            })
            .await
    }

    /// Meal ideas for someone managing `condition`.
    pub async fn health_suggestion(&self, condition: &str, preferences: &HealthPreferences) -> ChatReply {
        let request = GenerationRequest::text(prompts::health_prompt(condition, preferences));
        self.orchestrator
            .resolve(EntryPoint::HealthSuggestion, request, |supplier| {
                supplier.health_suggestion(condition)
            })
            .await
            .into_value()
    }

    pub async fn quick_tip(&self, topic: &str) -> ChatReply {
        let request = GenerationRequest::text(prompts::tip_prompt(topic));
        self.orchestrator
            .resolve(EntryPoint::WellnessTip, request, |supplier| supplier.wellness_tip())
            .await
            .into_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::{FallbackReason, ResultSource};
    use crate::providers::ProviderError;
    use crate::testing::{closed_gate, orchestrator, usable_gate, ScriptedProvider};
    use cookwise_core::fallback::chat;

    #[tokio::test(start_paused = true)]
    async fn test_prose_reply_is_live() {
        let provider = Arc::new(ScriptedProvider::answering(
            "Try moong dal chilla, about ₹20 a plate. 😊",
        ));
        let coach = WellnessCoach::new(orchestrator(provider, usable_gate()));

        let resolved = coach.resolve_reply("cheap breakfast?", &[]).await;
        assert!(resolved.is_live());
        assert_eq!(resolved.value.reply, "Try moong dal chilla, about ₹20 a plate. 😊");
    }

    #[tokio::test(start_paused = true)]
    async fn test_network_failures_route_fallback_by_message() {
        let provider = Arc::new(ScriptedProvider::failing(|| {
            ProviderError::HttpError("network unreachable".into())
        }));
        let coach = WellnessCoach::new(orchestrator(provider.clone(), usable_gate()));

        let resolved = coach.resolve_reply("I feel low on energy every afternoon", &[]).await;
        assert_eq!(resolved.source, ResultSource::Fallback(FallbackReason::Exhausted));
        assert_eq!(
            resolved.value,
            chat::fallback_reply("I feel low on energy every afternoon")
        );
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_history_window_limits_prompt() {
        let provider = Arc::new(ScriptedProvider::answering("Sounds good!"));
        let coach = WellnessCoach::new(orchestrator(provider.clone(), usable_gate()));

        let history: Vec<ChatMessage> = (0..8)
            .map(|i| ChatMessage::user(format!("turn-{}", i)))
            .collect();
        coach.reply("and now?", &history).await;

        let prompt = &provider.requests()[0].prompt;
        assert!(!prompt.contains("turn-1"));
        assert!(prompt.contains("User: turn-2"));
        assert!(prompt.contains("User: turn-7"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_health_suggestion_fallback_names_condition() {
        let provider = Arc::new(ScriptedProvider::answering("unused"));
        let coach = WellnessCoach::new(orchestrator(provider, closed_gate()));

        let reply = coach
            .health_suggestion("high cholesterol", &HealthPreferences::default())
            .await;
        assert_eq!(reply, chat::fallback_health_suggestion("high cholesterol"));
        assert!(reply.reply.contains("high cholesterol"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_quick_tip_fallback_from_catalog() {
        let provider = Arc::new(ScriptedProvider::answering("unused"));
        let coach = WellnessCoach::new(orchestrator(provider, closed_gate()));

        let tips: Vec<ChatReply> = chat::tip_catalog()
            .values()
            .map(|tip| ChatReply::new(*tip))
            .collect();
        for _ in 0..5 {
            assert!(tips.contains(&coach.quick_tip("hydration").await));
        }
    }

    #[test]
    fn test_preferences_from_json() {
        let prefs: HealthPreferences =
            serde_json::from_str(r#"{"budget": 60, "timeMinutes": 15}"#).unwrap();
        assert_eq!(prefs.budget, Some(60.0));
        assert_eq!(prefs.time_minutes, Some(15));
        assert_eq!(prefs.dietary, None);
    }
}
