//! JSON schema generation for structured output
//!
//! Strict-mode providers accept a narrow dialect: no `$ref`, every object
//! closed with `additionalProperties: false`, and every property listed in
//! `required` (optional values are expressed as nullable types instead).

use schemars::{JsonSchema, r#gen::SchemaSettings};
use serde_json::Value;

/// Generate a strict-mode schema for `T`
pub fn strict_schema_for<T: JsonSchema>() -> Value {
    let settings = SchemaSettings::draft07().with(|s| {
        s.inline_subschemas = true;
        s.meta_schema = None;
    });
    let generator = schemars::r#gen::SchemaGenerator::new(settings);
    let mut schema = generator.into_root_schema_for::<T>();
    schema.schema.metadata().title = None;

    let mut value = serde_json::to_value(schema.schema).unwrap_or_default();
    make_strict(&mut value);
    value
}

/// Close every object and strip keywords strict mode rejects
pub fn make_strict(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for key in ["$schema", "definitions", "title", "default", "format"] {
                map.remove(key);
            }

            let property_names: Option<Vec<Value>> = map
                .get("properties")
                .and_then(Value::as_object)
                .map(|props| props.keys().cloned().map(Value::String).collect());

            if let Some(names) = property_names {
                map.insert("required".to_string(), Value::Array(names));
                map.insert("additionalProperties".to_string(), Value::Bool(false));
            }

            for (key, child) in map.iter_mut() {
                // property names are data, not schema keywords
                if key == "properties" {
                    if let Value::Object(props) = child {
                        props.values_mut().for_each(make_strict);
                    }
                } else {
                    make_strict(child);
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(make_strict),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[allow(dead_code)]
    #[derive(Deserialize, JsonSchema)]
    struct Verdict {
        /// Whether the item passed
        approved: bool,
        #[serde(default)]
        issues: Vec<String>,
        suggestion: Option<String>,
        detail: Detail,
    }

    #[allow(dead_code)]
    #[derive(Deserialize, JsonSchema)]
    struct Detail {
        score: u32,
    }

    #[test]
    fn test_strict_schema_closes_objects() {
        let schema = strict_schema_for::<Verdict>();

        assert_eq!(schema["type"], "object");
        assert_eq!(schema["additionalProperties"], false);
        let required = schema["required"].as_array().unwrap();
        assert_eq!(required.len(), 4);
        assert!(required.contains(&json!("suggestion")));
        assert!(schema.get("title").is_none());
        assert!(schema.get("$schema").is_none());

        let detail = &schema["properties"]["detail"];
        assert_eq!(detail["additionalProperties"], false);
        assert!(detail["properties"]["score"].get("format").is_none());
        assert!(schema["properties"]["issues"].get("default").is_none());
    }

    #[test]
    fn test_property_named_like_keyword_survives() {
        let mut schema = json!({
            "type": "object",
            "properties": { "title": { "type": "string", "title": "Title" } }
        });
        make_strict(&mut schema);

        assert_eq!(schema["properties"]["title"], json!({ "type": "string" }));
        assert_eq!(schema["required"], json!(["title"]));
    }
}
