//! JSON Schema of the detections input.
//!
//! schemars emits draft 2020-12. Validators stuck on draft-07 need `$defs`
//! moved to `definitions`, so [`to_draft07`] rewrites the document.

use layout_tagger_core::DetectionDocument;
use serde_json::{Map, Value};

const DRAFT_07: &str = "http://json-schema.org/draft-07/schema#";

/// Schema of the detections document the `template` command reads.
pub fn detections_schema() -> Value {
    let schema = schemars::schema_for!(DetectionDocument);
    schema.to_value()
}

/// Rewrite a draft 2020-12 schema for draft-07 consumers.
pub fn to_draft07(mut schema: Value) -> Value {
    if let Some(root) = schema.as_object_mut() {
        if let Some(defs) = root.remove("$defs") {
            root.insert("definitions".to_string(), defs);
        }
        if root.contains_key("$schema") {
            root.insert("$schema".to_string(), Value::String(DRAFT_07.to_string()));
        }
        rewrite_refs(root);
    }
    schema
}

fn rewrite_refs(object: &mut Map<String, Value>) {
    for (key, value) in object.iter_mut() {
        match value {
            Value::String(reference) if key == "$ref" => {
                if let Some(name) = reference.strip_prefix("#/$defs/") {
                    *reference = format!("#/definitions/{name}");
                }
            }
            Value::Object(nested) => rewrite_refs(nested),
            Value::Array(items) => {
                for item in items {
                    if let Value::Object(nested) = item {
                        rewrite_refs(nested);
                    }
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detections_schema_describes_regions() {
        let schema = detections_schema();
        let text = schema.to_string();

        assert!(schema["properties"]["pages"].is_object());
        assert!(text.contains("\"box\""));
        assert!(text.contains("\"score\""));
        assert!(text.contains("\"page_number\""));
    }

    #[test]
    fn test_to_draft07_moves_defs() {
        let schema = json!({
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "$defs": {
                "Region": {"type": "object"}
            },
            "properties": {
                "regions": {
                    "type": "array",
                    "items": {"$ref": "#/$defs/Region"}
                },
                "either": {
                    "anyOf": [{"$ref": "#/$defs/Region"}, {"type": "string"}]
                }
            }
        });

        let result = to_draft07(schema);

        assert!(result["$defs"].is_null());
        assert!(result["definitions"]["Region"].is_object());
        assert_eq!(result["$schema"], DRAFT_07);
        assert_eq!(
            result["properties"]["regions"]["items"]["$ref"],
            "#/definitions/Region"
        );
        assert_eq!(
            result["properties"]["either"]["anyOf"][0]["$ref"],
            "#/definitions/Region"
        );
    }

    #[test]
    fn test_to_draft07_leaves_external_refs() {
        let schema = json!({"properties": {"x": {"$ref": "other.json#/Foo"}}});
        let result = to_draft07(schema);
        assert_eq!(result["properties"]["x"]["$ref"], "other.json#/Foo");
        assert!(result.get("$schema").is_none());
    }
}
