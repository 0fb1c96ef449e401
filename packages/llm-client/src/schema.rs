//! Type-safe schema generation for strict tool parameters.
//!
//! Uses the `schemars` crate to generate JSON schemas from Rust types, then
//! rewrites them into the strict form required by OpenAI-compatible APIs.

use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;

/// Trait for types that can be used as strict tool arguments.
///
/// Automatically implemented for any type that implements
/// `JsonSchema + DeserializeOwned`.
pub trait ToolArguments: JsonSchema + DeserializeOwned {
    /// Generate a strict-mode JSON schema for this type.
    ///
    /// Strict tool calling requires:
    /// 1. `additionalProperties: false` on every object schema
    /// 2. ALL properties listed in `required`, even nullable ones
    /// 3. Fully inlined schemas (no `$ref` references)
    fn tool_schema() -> serde_json::Value {
        let schema = schema_for!(Self);
        let mut value = serde_json::to_value(schema).unwrap_or_default();

        tighten_object_schemas(&mut value);
        inline_refs(&mut value);

        if let serde_json::Value::Object(map) = &mut value {
            map.remove("definitions");
            map.remove("$schema");
        }

        value
    }

    /// Get the schema name for this type.
    fn type_name() -> String {
        <Self as JsonSchema>::schema_name()
    }
}

impl<T: JsonSchema + DeserializeOwned> ToolArguments for T {}

/// Add `additionalProperties: false` and list every property as required,
/// recursively.
fn tighten_object_schemas(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            if map.get("type") == Some(&serde_json::Value::String("object".to_string())) {
                map.insert(
                    "additionalProperties".to_string(),
                    serde_json::Value::Bool(false),
                );

                if let Some(serde_json::Value::Object(props)) = map.get("properties") {
                    let all_keys: Vec<serde_json::Value> = props
                        .keys()
                        .map(|k| serde_json::Value::String(k.clone()))
                        .collect();
                    map.insert("required".to_string(), serde_json::Value::Array(all_keys));
                }
            }

            for (_, v) in map.iter_mut() {
                tighten_object_schemas(v);
            }
        }
        serde_json::Value::Array(arr) => {
            for item in arr.iter_mut() {
                tighten_object_schemas(item);
            }
        }
        _ => {}
    }
}

/// Inline all `$ref` references from the definitions section.
///
/// Strict-mode validators do not reliably traverse `$ref`, so every
/// reference is replaced with the referenced schema itself.
fn inline_refs(value: &mut serde_json::Value) {
    let Some(definitions) = value.get("definitions").cloned() else {
        return;
    };
    substitute_refs(value, &definitions);
}

/// Look up the definition a node points at, if it is a `$ref` node.
fn resolve_ref<'a>(
    node: &serde_json::Value,
    definitions: &'a serde_json::Value,
) -> Option<&'a serde_json::Value> {
    let name = node.get("$ref")?.as_str()?.strip_prefix("#/definitions/")?;
    definitions.get(name)
}

fn substitute_refs(node: &mut serde_json::Value, definitions: &serde_json::Value) {
    // Chains of refs collapse here before descending
    while let Some(def) = resolve_ref(node, definitions) {
        *node = def.clone();
    }

    match node {
        serde_json::Value::Object(map) => {
            for (_, child) in map.iter_mut() {
                substitute_refs(child, definitions);
            }
        }
        serde_json::Value::Array(items) => {
            for child in items.iter_mut() {
                substitute_refs(child, definitions);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemars::JsonSchema;
    use serde::Deserialize;

    #[derive(Deserialize, JsonSchema)]
    struct Item {
        title: String,
        note: Option<String>,
    }

    #[derive(Deserialize, JsonSchema)]
    struct Batch {
        items: Vec<Item>,
    }

    #[test]
    fn test_all_properties_required() {
        let schema = Item::tool_schema();
        let required = schema["required"].as_array().unwrap();
        let names: Vec<&str> = required.iter().filter_map(|v| v.as_str()).collect();

        // Optional fields still appear in required for strict mode
        assert!(names.contains(&"title"));
        assert!(names.contains(&"note"));
        assert_eq!(schema["additionalProperties"], serde_json::json!(false));
    }

    #[test]
    fn test_nested_refs_inlined() {
        let schema = Batch::tool_schema();
        let rendered = serde_json::to_string(&schema).unwrap();

        assert!(!rendered.contains("$ref"), "refs must be inlined: {rendered}");
        assert!(!schema.as_object().unwrap().contains_key("definitions"));
        assert!(!schema.as_object().unwrap().contains_key("$schema"));

        // The array item schema is the inlined Item object
        let item_schema = &schema["properties"]["items"]["items"];
        assert_eq!(item_schema["type"], "object");
        assert_eq!(item_schema["additionalProperties"], serde_json::json!(false));
    }
}
