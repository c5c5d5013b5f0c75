//! Feed API wire models and decoding helpers

use crate::config::AttributeSpec;
use crate::domain::{Result, SyncError, VariantRecord};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// One page of feed results. Pagination ends when `results` comes back
/// empty.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPage<T> {
    #[serde(default)]
    pub language: String,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

/// Token endpoint response for the client-credentials exchange.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: i64,
}

/// Decodes a raw product element into a `VariantRecord`, capturing the raw
/// value of every schema-configured attribute.
///
/// Variants carry custom, configurable attributes, so the typed record alone
/// is not enough: each schema attribute name is looked up in the raw element
/// (with a lowercased first letter, matching the feed's camelCase keys) and
/// stored verbatim for the projector.
pub fn decode_variant(
    element: Value,
    schema: &[AttributeSpec],
    language: &str,
) -> Result<VariantRecord> {
    let mut attributes = HashMap::new();
    for spec in schema {
        if let Some(raw) = element.get(lower_first(&spec.name)) {
            let text = match raw {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            attributes.insert(spec.name.clone(), text);
        }
    }

    let mut record: VariantRecord = serde_json::from_value(element)
        .map_err(|e| SyncError::Serialization(format!("variant element: {e}")))?;
    record.language = language.to_string();
    record.attributes = attributes;
    Ok(record)
}

/// Lowercases the first character of an attribute name for the raw-element
/// lookup.
fn lower_first(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AttributeType;
    use serde_json::json;

    fn spec(name: &str) -> AttributeSpec {
        AttributeSpec {
            name: name.to_string(),
            attribute_type: AttributeType::Text,
        }
    }

    #[test]
    fn test_lower_first() {
        assert_eq!(lower_first("Color"), "color");
        assert_eq!(lower_first("washInstructions"), "washInstructions");
        assert_eq!(lower_first(""), "");
    }

    #[test]
    fn test_decode_variant_captures_attributes() {
        let element = json!({
            "id": "v1",
            "productId": "p1",
            "productName": "Sneaker",
            "productSlug": "sneaker",
            "productCategories": ["c1"],
            "color": "red",
            "stockLevel": 12
        });

        let record =
            decode_variant(element, &[spec("Color"), spec("StockLevel"), spec("Absent")], "en")
                .unwrap();

        assert_eq!(record.language, "en");
        assert_eq!(record.attributes.get("Color").unwrap(), "red");
        assert_eq!(record.attributes.get("StockLevel").unwrap(), "12");
        assert!(!record.attributes.contains_key("Absent"));
    }

    #[test]
    fn test_decode_variant_invalid_element() {
        let element = json!({"id": "v1"});
        assert!(decode_variant(element, &[], "en").is_err());
    }

    #[test]
    fn test_feed_page_defaults() {
        let page: FeedPage<Value> = serde_json::from_str("{}").unwrap();
        assert!(page.results.is_empty());
        assert!(page.language.is_empty());
    }
}
