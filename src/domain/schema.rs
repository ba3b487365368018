//! Response schema handed to the model.
//!
//! Derived from [`SwotAnalysisResult`] so the data model and the model
//! contract cannot drift. schemars emits standard JSON Schema; Gemini's
//! `responseSchema` speaks an OpenAPI subset with upper-case type names and
//! no references, so the generated document is inlined and then normalised.

use crate::domain::model::SwotAnalysisResult;
use schemars::generate::SchemaSettings;
use serde_json::{Map, Value};
use std::sync::LazyLock;

// No `description`: rustdoc on the model types stays out of the request.
const KEPT_KEYS: [&str; 4] = ["type", "properties", "items", "required"];

static RESPONSE_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    let generator = SchemaSettings::draft2020_12()
        .with(|settings| settings.inline_subschemas = true)
        .into_generator();
    let schema = generator.into_root_schema_for::<SwotAnalysisResult>();
    to_gemini_schema(&Value::from(schema))
});

/// Gemini-dialect schema for [`SwotAnalysisResult`].
pub fn response_schema() -> &'static Value {
    &RESPONSE_SCHEMA
}

/// Rewrites a JSON Schema node into the Gemini `responseSchema` dialect.
pub fn to_gemini_schema(node: &Value) -> Value {
    let Value::Object(object) = node else {
        return node.clone();
    };

    let mut out = Map::new();
    for key in KEPT_KEYS {
        let Some(value) = object.get(key) else {
            continue;
        };
        let converted = match key {
            "type" => match value {
                Value::String(name) => Value::String(name.to_uppercase()),
                other => other.clone(),
            },
            "properties" => match value {
                Value::Object(properties) => Value::Object(
                    properties
                        .iter()
                        .map(|(name, schema)| (name.clone(), to_gemini_schema(schema)))
                        .collect(),
                ),
                other => other.clone(),
            },
            "items" => to_gemini_schema(value),
            _ => value.clone(),
        };
        out.insert(key.to_string(), converted);
    }
    Value::Object(out)
}
