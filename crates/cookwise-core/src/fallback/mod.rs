//! Pre-authored fallback results.
//!
//! When live generation is unavailable or its output is unusable, each entry
//! point answers from a fixed catalog of values shaped exactly like a live
//! result. How a value is chosen is a declared property of the entry point
//! ([`EntryPoint::selection_policy`]):
//!
//! - **Keyword-routed**: the first catalog entry whose keyword appears in the
//!   request text wins, otherwise the catalog default. Deterministic.
//! - **Uniform-random**: every catalog value is equally likely. The random
//!   source is always supplied by the caller so selection can be seeded.

pub mod chat;
pub mod food;
pub mod meal_plan;
pub mod pantry;

use std::fmt;

use rand::Rng;

use crate::shape::ResultKind;

/// How a fallback value is chosen from its catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPolicy {
    KeywordRouted,
    UniformRandom,
}

/// Public entry points served by the assistants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryPoint {
    MealPlan,
    WellnessChat,
    HealthSuggestion,
    WellnessTip,
    FoodAnalysis,
    PantryItems,
    PantryRecipes,
    LeftoverUsage,
}

impl EntryPoint {
    pub const ALL: [EntryPoint; 8] = [
        EntryPoint::MealPlan,
        EntryPoint::WellnessChat,
        EntryPoint::HealthSuggestion,
        EntryPoint::WellnessTip,
        EntryPoint::FoodAnalysis,
        EntryPoint::PantryItems,
        EntryPoint::PantryRecipes,
        EntryPoint::LeftoverUsage,
    ];

    /// The declared fallback selection policy for this entry point.
    pub fn selection_policy(self) -> SelectionPolicy {
        match self {
            EntryPoint::WellnessTip | EntryPoint::FoodAnalysis => SelectionPolicy::UniformRandom,
            EntryPoint::MealPlan
            | EntryPoint::WellnessChat
            | EntryPoint::HealthSuggestion
            | EntryPoint::PantryItems
            | EntryPoint::PantryRecipes
            | EntryPoint::LeftoverUsage => SelectionPolicy::KeywordRouted,
        }
    }

    /// The record kind this entry point returns.
    pub fn result_kind(self) -> ResultKind {
        match self {
            EntryPoint::MealPlan => ResultKind::MealPlan,
            EntryPoint::WellnessChat | EntryPoint::HealthSuggestion | EntryPoint::WellnessTip => {
                ResultKind::ChatReply
            }
            EntryPoint::FoodAnalysis => ResultKind::FoodAnalysis,
            EntryPoint::PantryItems => ResultKind::PantryItems,
            EntryPoint::PantryRecipes | EntryPoint::LeftoverUsage => ResultKind::PantryRecipes,
        }
    }
}

impl fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntryPoint::MealPlan => "meal_plan",
            EntryPoint::WellnessChat => "wellness_chat",
            EntryPoint::HealthSuggestion => "health_suggestion",
            EntryPoint::WellnessTip => "wellness_tip",
            EntryPoint::FoodAnalysis => "food_analysis",
            EntryPoint::PantryItems => "pantry_items",
            EntryPoint::PantryRecipes => "pantry_recipes",
            EntryPoint::LeftoverUsage => "leftover_usage",
        };
        write!(f, "{}", name)
    }
}

/// A catalog entry reachable by keyword.
#[derive(Debug, Clone)]
pub struct Route<T> {
    pub keywords: Vec<&'static str>,
    pub value: T,
}

impl<T> Route<T> {
    /// Whether any keyword occurs in already-lowercased text.
    fn hits(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|keyword| lowered.contains(keyword))
    }
}

/// A fixed set of pre-authored values with a default.
#[derive(Debug, Clone)]
pub struct FallbackCatalog<T> {
    routes: Vec<Route<T>>,
    default: T,
}

impl<T> FallbackCatalog<T> {
    /// Create a catalog holding only its default value.
    pub fn new(default: T) -> Self {
        Self {
            routes: Vec::new(),
            default,
        }
    }

    /// Add an entry chosen when any of `keywords` appears in the request.
    ///
    /// Keywords are matched case-insensitively and should be lowercase.
    /// An entry with no keywords is only reachable by random selection.
    pub fn with_entry(mut self, keywords: &[&'static str], value: T) -> Self {
        self.routes.push(Route {
            keywords: keywords.to_vec(),
            value,
        });
        self
    }

    pub fn default_value(&self) -> &T {
        &self.default
    }

    /// First entry whose keyword occurs in `text`, else the default.
    pub fn route(&self, text: &str) -> &T {
        let lowered = text.to_lowercase();
        self.routes
            .iter()
            .find(|route| route.hits(&lowered))
            .map(|route| &route.value)
            .unwrap_or(&self.default)
    }

    /// Every entry whose keyword occurs in `text`, in catalog order.
    pub fn route_all(&self, text: &str) -> Vec<&Route<T>> {
        let lowered = text.to_lowercase();
        self.routes.iter().filter(|route| route.hits(&lowered)).collect()
    }

    /// Pick any value with equal probability, the default included.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &T {
        let index = rng.gen_range(0..=self.routes.len());
        self.routes
            .get(index)
            .map(|route| &route.value)
            .unwrap_or(&self.default)
    }

    /// Choose a value according to `policy`.
    ///
    /// Keyword routing never touches `rng`.
    pub fn select<R: Rng + ?Sized>(&self, policy: SelectionPolicy, text: &str, rng: &mut R) -> &T {
        match policy {
            SelectionPolicy::KeywordRouted => self.route(text),
            SelectionPolicy::UniformRandom => self.pick(rng),
        }
    }

    /// All values in catalog order, default last.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.routes
            .iter()
            .map(|route| &route.value)
            .chain(std::iter::once(&self.default))
    }

    /// The value following `current` in catalog order, wrapping around.
    pub fn next_after(&self, current: &T) -> &T
    where
        T: PartialEq,
    {
        let values: Vec<&T> = self.values().collect();
        let position = values.iter().position(|value| *value == current).unwrap_or(0);
        values[(position + 1) % values.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn catalog() -> FallbackCatalog<&'static str> {
        FallbackCatalog::new("default")
            .with_entry(&["budget", "cheap"], "budget")
            .with_entry(&["protein"], "protein")
    }

    #[test]
    fn test_route_first_match_wins() {
        let catalog = catalog();
        assert_eq!(*catalog.route("Cheap high PROTEIN meals"), "budget");
        assert_eq!(*catalog.route("more protein please"), "protein");
    }

    #[test]
    fn test_route_falls_back_to_default() {
        assert_eq!(*catalog().route("hello there"), "default");
        assert_eq!(*catalog().route(""), "default");
    }

    #[test]
    fn test_route_is_deterministic() {
        let catalog = catalog();
        for _ in 0..10 {
            assert_eq!(*catalog.route("on a budget"), "budget");
        }
    }

    #[test]
    fn test_route_all_in_catalog_order() {
        let catalog = catalog();
        let hits = catalog.route_all("cheap protein");
        let values: Vec<_> = hits.iter().map(|route| route.value).collect();
        assert_eq!(values, vec!["budget", "protein"]);
    }

    #[test]
    fn test_pick_reaches_every_value() {
        let catalog = catalog();
        let mut rng = StdRng::seed_from_u64(7);
        let seen: HashSet<_> = (0..200).map(|_| *catalog.pick(&mut rng)).collect();
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_seeded_pick_is_reproducible() {
        let catalog = catalog();
        let first: Vec<_> = {
            let mut rng = StdRng::seed_from_u64(42);
            (0..20).map(|_| *catalog.pick(&mut rng)).collect()
        };
        let second: Vec<_> = {
            let mut rng = StdRng::seed_from_u64(42);
            (0..20).map(|_| *catalog.pick(&mut rng)).collect()
        };
        assert_eq!(first, second);
    }

    #[test]
    fn test_next_after_wraps() {
        let catalog = catalog();
        assert_eq!(*catalog.next_after(&"budget"), "protein");
        assert_eq!(*catalog.next_after(&"protein"), "default");
        assert_eq!(*catalog.next_after(&"default"), "budget");
    }

    #[test]
    fn test_declared_policies() {
        assert_eq!(
            EntryPoint::FoodAnalysis.selection_policy(),
            SelectionPolicy::UniformRandom
        );
        assert_eq!(
            EntryPoint::WellnessTip.selection_policy(),
            SelectionPolicy::UniformRandom
        );
        assert_eq!(
            EntryPoint::MealPlan.selection_policy(),
            SelectionPolicy::KeywordRouted
        );
        assert_eq!(
            EntryPoint::WellnessChat.selection_policy(),
            SelectionPolicy::KeywordRouted
        );
    }

    #[test]
    fn test_entry_point_kinds() {
        assert_eq!(EntryPoint::LeftoverUsage.result_kind(), ResultKind::PantryRecipes);
        assert_eq!(EntryPoint::WellnessTip.result_kind(), ResultKind::ChatReply);
        assert_eq!(EntryPoint::PantryItems.to_string(), "pantry_items");
    }
}
