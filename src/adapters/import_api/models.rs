//! Import API wire models

use serde::{Deserialize, Serialize};
use std::fmt;

/// The three entity kinds catsync imports, in run order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Category,
    Product,
    ProductVariant,
}

impl EntityKind {
    /// URL path segment and container-name slug for this kind.
    pub fn slug(&self) -> &'static str {
        match self {
            EntityKind::Category => "categories",
            EntityKind::Product => "products",
            EntityKind::ProductVariant => "product-variants",
        }
    }

    /// The `type` discriminator of an import request.
    pub fn resource_type(&self) -> &'static str {
        match self {
            EntityKind::Category => "category",
            EntityKind::Product => "product",
            EntityKind::ProductVariant => "product-variant",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// A staging container identified by its deterministic key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportContainer {
    pub key: String,
}

/// Result of a container lookup by key.
///
/// "Not found" is an expected branch of get-or-create, so it is a value,
/// not an error; transport problems surface as `Err` instead.
#[derive(Debug)]
pub enum ContainerLookup {
    Found(ImportContainer),
    NotFound,
}

/// Body of one sub-batch submission.
#[derive(Debug, Serialize)]
pub struct ImportRequest<'a, T> {
    #[serde(rename = "type")]
    pub resource_type: &'static str,
    pub resources: &'a [T],
}

/// A `{key, typeId}` reference to another imported resource.
#[derive(Debug, Clone, Serialize)]
pub struct KeyReference {
    pub key: String,
    #[serde(rename = "typeId")]
    pub type_id: &'static str,
}

impl KeyReference {
    pub fn category(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            type_id: "category",
        }
    }

    pub fn product(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            type_id: "product",
        }
    }

    pub fn product_type(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            type_id: "product-type",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_kind_slugs() {
        assert_eq!(EntityKind::Category.slug(), "categories");
        assert_eq!(EntityKind::ProductVariant.slug(), "product-variants");
        assert_eq!(EntityKind::Product.resource_type(), "product");
    }

    #[test]
    fn test_key_reference_serialization() {
        let json = serde_json::to_value(KeyReference::category("c1")).unwrap();
        assert_eq!(json["key"], "c1");
        assert_eq!(json["typeId"], "category");
    }

    #[test]
    fn test_import_request_serialization() {
        let resources = vec![ImportContainer {
            key: "x".to_string(),
        }];
        let request = ImportRequest {
            resource_type: EntityKind::Category.resource_type(),
            resources: &resources,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["type"], "category");
        assert_eq!(json["resources"].as_array().unwrap().len(), 1);
    }
}
