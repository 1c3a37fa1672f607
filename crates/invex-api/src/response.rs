//! Outbound document normalization.
//!
//! Interface compatibility convention: every returned document has its
//! internal `_id` field renamed to `id`, applied recursively through
//! nested objects and arrays. Identifiers and timestamps are already
//! persisted as strings, so no further rendering is needed.

use serde_json::Value;

/// Normalize a document for an API response.
pub fn normalize_document(mut doc: Value) -> Value {
    normalize_in_place(&mut doc);
    doc
}

fn normalize_in_place(value: &mut Value) {
    match value {
        Value::Object(obj) => {
            if !obj.contains_key("id") {
                if let Some(id) = obj.remove("_id") {
                    obj.insert("id".to_string(), id);
                }
            }
            for nested in obj.values_mut() {
                normalize_in_place(nested);
            }
        }
        Value::Array(items) => {
            for item in items {
                normalize_in_place(item);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renames_top_level_id() {
        let doc = normalize_document(json!({"_id": "65f0", "pk": "j1"}));
        assert_eq!(doc, json!({"id": "65f0", "pk": "j1"}));
    }

    #[test]
    fn existing_id_field_wins() {
        let doc = normalize_document(json!({"_id": "65f0", "id": "mine"}));
        assert_eq!(doc["id"], json!("mine"));
        assert_eq!(doc["_id"], json!("65f0"));
    }

    #[test]
    fn recurses_into_nested_objects_and_arrays() {
        let doc = normalize_document(json!({
            "_id": "a",
            "child": {"_id": "b"},
            "items": [{"_id": "c"}, {"x": 1}]
        }));
        assert_eq!(doc["id"], json!("a"));
        assert_eq!(doc["child"]["id"], json!("b"));
        assert_eq!(doc["items"][0]["id"], json!("c"));
    }

    #[test]
    fn scalars_pass_through() {
        assert_eq!(normalize_document(json!(5)), json!(5));
        assert_eq!(normalize_document(json!("x")), json!("x"));
    }
}
