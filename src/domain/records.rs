//! Source record types
//!
//! One record represents one entity instance in one language, exactly as the
//! feed returns it (camelCase fields). The `language` field is not part of
//! the feed payload; it is tagged onto each record after the fetch.

use serde::Deserialize;
use std::collections::HashMap;

/// A record fetched from the feed, identified by a stable id that is
/// immutable across languages. The id doubles as the pagination cursor.
pub trait SourceRecord {
    /// Stable entity id, used both for cross-language grouping and as the
    /// `after` cursor of the next page request.
    fn id(&self) -> &str;
}

/// One category in one language.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRecord {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub meta_keywords: Option<String>,
    #[serde(default = "default_order_hint")]
    pub order_hint: String,
    /// Tagged after fetch, not part of the feed payload.
    #[serde(default)]
    pub language: String,
}

fn default_order_hint() -> String {
    "0".to_string()
}

impl SourceRecord for CategoryRecord {
    fn id(&self) -> &str {
        &self.id
    }
}

/// One product variant in one language.
///
/// The feed's product endpoint returns variants flattened together with the
/// owning product's fields (`product_*`), so both product and variant import
/// documents are derived from this record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantRecord {
    pub id: String,
    #[serde(default)]
    pub sku: Option<String>,
    pub product_id: String,
    pub product_name: String,
    #[serde(default)]
    pub product_type: Option<String>,
    pub product_slug: String,
    #[serde(default)]
    pub product_categories: Vec<String>,
    #[serde(default)]
    pub product_description: Option<String>,
    #[serde(default)]
    pub product_meta_title: Option<String>,
    #[serde(default)]
    pub product_meta_description: Option<String>,
    #[serde(default)]
    pub product_meta_keywords: Option<String>,
    #[serde(default)]
    pub is_master_variant: bool,
    #[serde(default)]
    pub publish_variant: Option<bool>,
    #[serde(default)]
    pub publish_product: Option<bool>,
    #[serde(default)]
    pub images: Option<Vec<ImageRef>>,
    /// Raw values for the schema-configured attributes, captured from the
    /// raw feed element during decoding. Keyed by schema attribute name.
    #[serde(skip)]
    pub attributes: HashMap<String, String>,
    /// Tagged after fetch, not part of the feed payload.
    #[serde(default)]
    pub language: String,
}

impl SourceRecord for VariantRecord {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Image reference carried on a variant; images are referenced by URL, never
/// uploaded.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRef {
    pub url: String,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub label: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_record_from_feed_json() {
        let record: CategoryRecord = serde_json::from_str(
            r#"{"id": "c1", "name": "Shoes", "slug": "shoes", "parent": "c0"}"#,
        )
        .unwrap();

        assert_eq!(record.id(), "c1");
        assert_eq!(record.order_hint, "0");
        assert_eq!(record.parent.as_deref(), Some("c0"));
        assert!(record.language.is_empty());
    }

    #[test]
    fn test_variant_record_defaults() {
        let record: VariantRecord = serde_json::from_str(
            r#"{
                "id": "v1",
                "productId": "p1",
                "productName": "Sneaker",
                "productSlug": "sneaker",
                "productCategories": ["c1"]
            }"#,
        )
        .unwrap();

        assert_eq!(record.id(), "v1");
        assert!(!record.is_master_variant);
        assert!(record.images.is_none());
        assert!(record.attributes.is_empty());
    }
}
