//! Source record validation
//!
//! Domain rules applied to fetched records before any merging. A single
//! invalid record abandons the whole batch for that entity kind; nothing is
//! partially committed.

use crate::domain::records::{CategoryRecord, VariantRecord};
use crate::domain::{Result, SyncError};
use url::Url;

/// A record that can be checked against its domain rules.
pub trait Validate {
    /// Returns the list of rule violations, empty when the record is valid.
    fn validate(&self) -> Vec<String>;
}

impl Validate for CategoryRecord {
    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.id.trim().is_empty() {
            errors.push("id must not be empty".to_string());
        }
        if self.name.trim().is_empty() {
            errors.push("name must not be empty".to_string());
        }
        if self.slug.trim().is_empty() {
            errors.push("slug must not be empty".to_string());
        }
        if self.language.trim().is_empty() {
            errors.push("language must not be empty".to_string());
        }
        match self.order_hint.parse::<f64>() {
            Ok(hint) if (0.0..=1.0).contains(&hint) => {}
            Ok(hint) => errors.push(format!("orderHint {hint} must be between 0 and 1")),
            Err(_) => errors.push(format!("orderHint '{}' is not a number", self.order_hint)),
        }
        errors
    }
}

impl Validate for VariantRecord {
    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.id.trim().is_empty() {
            errors.push("id must not be empty".to_string());
        }
        if self.product_id.trim().is_empty() {
            errors.push("productId must not be empty".to_string());
        }
        if self.product_name.trim().is_empty() {
            errors.push("productName must not be empty".to_string());
        }
        if self.product_slug.trim().is_empty() {
            errors.push("productSlug must not be empty".to_string());
        }
        if self.product_categories.is_empty() {
            errors.push("at least one product category is required".to_string());
        }
        if self.language.trim().is_empty() {
            errors.push("language must not be empty".to_string());
        }
        if let Some(images) = &self.images {
            for image in images {
                if !is_http_url(&image.url) {
                    errors.push(format!("image url '{}' is not a valid http(s) URL", image.url));
                }
                if image.width == 0 || image.height == 0 {
                    errors.push(format!(
                        "image '{}' must have positive dimensions",
                        image.url
                    ));
                }
            }
        }
        errors
    }
}

fn is_http_url(candidate: &str) -> bool {
    Url::parse(candidate)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

/// Validates every record of a batch, logging each violation.
///
/// Returns `SyncError::Validation` naming the offending ids when any record
/// fails, so the caller abandons the entity kind entirely.
pub fn validate_all<T: Validate + super::records::SourceRecord>(
    kind: &str,
    records: &[T],
) -> Result<()> {
    let mut invalid_ids = Vec::new();
    for record in records {
        let errors = record.validate();
        if !errors.is_empty() {
            tracing::error!(
                kind = kind,
                id = record.id(),
                errors = %errors.join(", "),
                "Record failed validation"
            );
            invalid_ids.push(record.id().to_string());
        }
    }

    if invalid_ids.is_empty() {
        Ok(())
    } else {
        Err(SyncError::Validation(format!(
            "{} invalid {kind} record(s): {}",
            invalid_ids.len(),
            invalid_ids.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::records::ImageRef;

    fn category(id: &str, order_hint: &str) -> CategoryRecord {
        CategoryRecord {
            id: id.to_string(),
            name: "Shoes".to_string(),
            slug: "shoes".to_string(),
            description: None,
            parent: None,
            external_id: None,
            meta_title: None,
            meta_description: None,
            meta_keywords: None,
            order_hint: order_hint.to_string(),
            language: "en".to_string(),
        }
    }

    fn variant(id: &str) -> VariantRecord {
        VariantRecord {
            id: id.to_string(),
            sku: None,
            product_id: "p1".to_string(),
            product_name: "Sneaker".to_string(),
            product_type: None,
            product_slug: "sneaker".to_string(),
            product_categories: vec!["c1".to_string()],
            product_description: None,
            product_meta_title: None,
            product_meta_description: None,
            product_meta_keywords: None,
            is_master_variant: false,
            publish_variant: None,
            publish_product: None,
            images: None,
            attributes: Default::default(),
            language: "en".to_string(),
        }
    }

    #[test]
    fn test_valid_category_passes() {
        assert!(category("c1", "0.5").validate().is_empty());
    }

    #[test]
    fn test_category_order_hint_out_of_range() {
        let errors = category("c1", "1.5").validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("between 0 and 1"));
    }

    #[test]
    fn test_category_missing_id() {
        let errors = category("  ", "0").validate();
        assert!(errors.iter().any(|e| e.contains("id")));
    }

    #[test]
    fn test_variant_requires_category() {
        let mut record = variant("v1");
        record.product_categories.clear();
        let errors = record.validate();
        assert!(errors.iter().any(|e| e.contains("category")));
    }

    #[test]
    fn test_variant_image_rules() {
        let mut record = variant("v1");
        record.images = Some(vec![ImageRef {
            url: "ftp://img.example.com/a.png".to_string(),
            width: 0,
            height: 100,
            label: None,
        }]);
        let errors = record.validate();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_validate_all_names_offenders() {
        let records = vec![variant("v1"), variant("")];
        let err = validate_all("product-variant", &records).unwrap_err();
        assert!(matches!(err, SyncError::Validation(_)));
        assert!(err.to_string().contains("1 invalid"));
    }
}
