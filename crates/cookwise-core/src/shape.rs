//! Shape validation of decoded model output.
//!
//! A decoded value is only syntactically well formed. Before a caller sees
//! it, the value is checked against the JSON Schema embedded for its
//! [`ResultKind`] and then deserialized into the typed record. The outcome
//! is an explicit [`Validated`] instead of a value trusted blindly.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::decode::decode;
use crate::types::{ChatReply, FoodAnalysis, MealPlanResponse, PantryItems, PantrySuggestions};

const MEAL_PLAN_SCHEMA: &str = include_str!("../schemas/meal_plan.schema.json");
const FOOD_ANALYSIS_SCHEMA: &str = include_str!("../schemas/food_analysis.schema.json");
const PANTRY_ITEMS_SCHEMA: &str = include_str!("../schemas/pantry_items.schema.json");
const PANTRY_RECIPES_SCHEMA: &str = include_str!("../schemas/pantry_recipes.schema.json");
const CHAT_REPLY_SCHEMA: &str = include_str!("../schemas/chat_reply.schema.json");

/// Compiled validators, one per kind (initialized once, reused).
static VALIDATORS: OnceLock<BTreeMap<ResultKind, Result<jsonschema::Validator, String>>> =
    OnceLock::new();

/// Errors from schema loading.
#[derive(Error, Debug, Clone)]
pub enum SchemaError {
    #[error("Failed to load schema for {kind:?}: {message}")]
    LoadError { kind: ResultKind, message: String },
}

/// The kinds of structured result the assistants produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResultKind {
    MealPlan,
    FoodAnalysis,
    PantryItems,
    PantryRecipes,
    ChatReply,
}

impl ResultKind {
    pub const ALL: [ResultKind; 5] = [
        ResultKind::MealPlan,
        ResultKind::FoodAnalysis,
        ResultKind::PantryItems,
        ResultKind::PantryRecipes,
        ResultKind::ChatReply,
    ];

    fn schema_source(self) -> &'static str {
        match self {
            ResultKind::MealPlan => MEAL_PLAN_SCHEMA,
            ResultKind::FoodAnalysis => FOOD_ANALYSIS_SCHEMA,
            ResultKind::PantryItems => PANTRY_ITEMS_SCHEMA,
            ResultKind::PantryRecipes => PANTRY_RECIPES_SCHEMA,
            ResultKind::ChatReply => CHAT_REPLY_SCHEMA,
        }
    }

    /// Top-level keys every value of this kind must carry.
    pub fn required_keys(self) -> Vec<String> {
        serde_json::from_str::<Value>(self.schema_source())
            .ok()
            .and_then(|schema| schema.get("required").cloned())
            .and_then(|required| serde_json::from_value(required).ok())
            .unwrap_or_default()
    }
}

/// Outcome of checking a decoded value against its expected shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Validated<T> {
    Valid(T),
    Invalid(String),
}

impl<T> Validated<T> {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validated::Valid(_))
    }

    pub fn ok(self) -> Option<T> {
        match self {
            Validated::Valid(value) => Some(value),
            Validated::Invalid(_) => None,
        }
    }
}

/// A record an assistant can return, whether decoded or supplied by a fallback.
pub trait StructuredResult: Serialize + DeserializeOwned + Send + Sized {
    /// The schema this record is validated against.
    const KIND: ResultKind;

    /// Adjust a decoded value before validation.
    fn normalize(value: Value) -> Value {
        value
    }

    /// Turn raw model text into a validated record.
    ///
    /// The default decodes JSON tolerantly and validates the shape.
    fn interpret(raw: &str) -> Validated<Self> {
        match decode(raw) {
            Some(value) => validate_shape(Self::normalize(value)),
            None => Validated::Invalid("no structured value found in model output".to_string()),
        }
    }
}

impl StructuredResult for MealPlanResponse {
    const KIND: ResultKind = ResultKind::MealPlan;
}

impl StructuredResult for FoodAnalysis {
    const KIND: ResultKind = ResultKind::FoodAnalysis;
}

// Models often answer list requests with a bare array.
impl StructuredResult for PantryItems {
    const KIND: ResultKind = ResultKind::PantryItems;

    fn normalize(value: Value) -> Value {
        wrap_array(value, "items")
    }
}

impl StructuredResult for PantrySuggestions {
    const KIND: ResultKind = ResultKind::PantryRecipes;

    fn normalize(value: Value) -> Value {
        wrap_array(value, "recipes")
    }
}

fn wrap_array(value: Value, key: &str) -> Value {
    match value {
        Value::Array(entries) => {
            let mut object = serde_json::Map::new();
            object.insert(key.to_string(), Value::Array(entries));
            Value::Object(object)
        }
        other => other,
    }
}

impl StructuredResult for ChatReply {
    const KIND: ResultKind = ResultKind::ChatReply;

    /// Chat replies are prose. A `{"reply": ...}` object is honoured when
    /// present, otherwise the trimmed text itself is the reply.
    fn interpret(raw: &str) -> Validated<Self> {
        if let Some(Validated::Valid(reply)) = decode(raw).map(validate_shape::<ChatReply>) {
            return Validated::Valid(reply);
        }

        let text = raw.trim();
        if text.is_empty() {
            Validated::Invalid("empty reply".to_string())
        } else {
            Validated::Valid(ChatReply::new(text))
        }
    }
}

fn validators() -> &'static BTreeMap<ResultKind, Result<jsonschema::Validator, String>> {
    VALIDATORS.get_or_init(|| {
        ResultKind::ALL
            .into_iter()
            .map(|kind| (kind, compile(kind)))
            .collect()
    })
}

fn compile(kind: ResultKind) -> Result<jsonschema::Validator, String> {
    let schema_value: Value = serde_json::from_str(kind.schema_source())
        .map_err(|e| format!("Invalid schema JSON: {}", e))?;

    jsonschema::options()
        .build(&schema_value)
        .map_err(|e| format!("Failed to compile schema: {}", e))
}

fn get_validator(kind: ResultKind) -> Result<&'static jsonschema::Validator, SchemaError> {
    match validators().get(&kind) {
        Some(Ok(validator)) => Ok(validator),
        Some(Err(message)) => Err(SchemaError::LoadError {
            kind,
            message: message.clone(),
        }),
        None => Err(SchemaError::LoadError {
            kind,
            message: "no schema registered".to_string(),
        }),
    }
}

/// Check a value against the schema for `kind`.
///
/// Returns the list of violations, each with the offending path.
pub fn check_schema(kind: ResultKind, value: &Value) -> Result<(), Vec<String>> {
    let validator = get_validator(kind).map_err(|e| vec![e.to_string()])?;

    let errors: Vec<String> = validator
        .iter_errors(value)
        .map(|e| format!("{} at {}", e, e.instance_path))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a decoded value and convert it into `T`.
pub fn validate_shape<T: StructuredResult>(value: Value) -> Validated<T> {
    if let Err(errors) = check_schema(T::KIND, &value) {
        tracing::debug!(kind = ?T::KIND, violations = errors.len(), "decoded value failed schema");
        return Validated::Invalid(errors.join("; "));
    }

    match serde_json::from_value::<T>(value) {
        Ok(record) => Validated::Valid(record),
        Err(e) => Validated::Invalid(format!("shape mismatch: {}", e)),
    }
}
