//! Variant merging and master-variant promotion

use crate::adapters::import_api::KeyReference;
use crate::config::{AttributeSpec, ImportConfig};
use crate::core::attributes::{project_attributes, Attribute};
use crate::core::merge::group_by_encounter_order;
use crate::domain::{Result, VariantRecord};
use serde::Serialize;

/// Import document for one product variant.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantImport {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    pub product: KeyReference,
    pub is_master_variant: bool,
    pub publish: bool,
    pub attributes: Vec<Attribute>,
    pub images: Vec<ImageImport>,
}

/// Image entry on a variant import, referenced by URL.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageImport {
    pub url: String,
    pub dimensions: ImageDimensions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageDimensions {
    pub w: u32,
    pub h: u32,
}

/// Guarantees exactly one designated master per product group.
///
/// Records are grouped by product id in encounter order. A group that
/// already contains a flagged master passes through unchanged (multiple
/// flags are not corrected); otherwise the first record of the group is
/// promoted. "First" means first in the order the records arrived; callers
/// requiring a different tie-break must pre-sort.
pub fn ensure_master_variants(records: Vec<VariantRecord>) -> Vec<VariantRecord> {
    group_by_encounter_order(records, |record| record.product_id.clone())
        .into_iter()
        .flat_map(|(_, mut group)| {
            if !group.iter().any(|v| v.is_master_variant) {
                group[0].is_master_variant = true;
            }
            group
        })
        .collect()
}

/// Builds one variant import per distinct variant id.
///
/// The first record of each group supplies the canonical fields; the whole
/// group feeds the localized attribute projection. A malformed attribute
/// value fails the whole build.
pub fn build_variant_imports(
    records: Vec<VariantRecord>,
    schema: &[AttributeSpec],
    settings: &ImportConfig,
) -> Result<Vec<VariantImport>> {
    group_by_encounter_order(records, |record| record.id.clone())
        .into_iter()
        .map(|(_, group)| build_import(group, schema, settings))
        .collect()
}

fn build_import(
    group: Vec<VariantRecord>,
    schema: &[AttributeSpec],
    settings: &ImportConfig,
) -> Result<VariantImport> {
    let canonical = &group[0];
    let attributes = project_attributes(&group, canonical, schema)?;

    Ok(VariantImport {
        key: canonical.id.clone(),
        sku: canonical.sku.clone(),
        product: KeyReference::product(canonical.product_id.clone()),
        is_master_variant: canonical.is_master_variant,
        publish: canonical
            .publish_variant
            .unwrap_or(settings.publish_product_variants),
        attributes,
        images: canonical
            .images
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|image| ImageImport {
                url: image.url.clone(),
                dimensions: ImageDimensions {
                    w: image.width,
                    h: image.height,
                },
                label: image.label.clone(),
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;
    use crate::domain::ImageRef;

    fn settings() -> ImportConfig {
        ImportConfig {
            base_url: "https://import.example.com".to_string(),
            access_token: secret_string("token".to_string()),
            container_prefix: "catsync".to_string(),
            container_entries_limit: 200_000,
            product_type: "catalog".to_string(),
            publish_products: false,
            publish_product_variants: true,
            timeout_seconds: 30,
        }
    }

    fn record(variant_id: &str, product_id: &str) -> VariantRecord {
        VariantRecord {
            id: variant_id.to_string(),
            sku: Some(format!("sku-{variant_id}")),
            product_id: product_id.to_string(),
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
    fn test_first_variant_promoted_when_no_master() {
        let records = vec![record("v1", "p1"), record("v2", "p1"), record("v3", "p1")];
        let ensured = ensure_master_variants(records);

        assert!(ensured[0].is_master_variant);
        assert!(!ensured[1].is_master_variant);
        assert!(!ensured[2].is_master_variant);
    }

    #[test]
    fn test_existing_master_passes_through_unchanged() {
        let mut records = vec![record("v1", "p1"), record("v2", "p1")];
        records[1].is_master_variant = true;
        let ensured = ensure_master_variants(records);

        assert!(!ensured[0].is_master_variant);
        assert!(ensured[1].is_master_variant);
    }

    #[test]
    fn test_multiple_masters_not_corrected() {
        let mut records = vec![record("v1", "p1"), record("v2", "p1")];
        records[0].is_master_variant = true;
        records[1].is_master_variant = true;
        let ensured = ensure_master_variants(records);

        assert_eq!(ensured.iter().filter(|v| v.is_master_variant).count(), 2);
    }

    #[test]
    fn test_promotion_is_per_product_group() {
        let records = vec![record("v1", "p1"), record("v2", "p2"), record("v3", "p1")];
        let ensured = ensure_master_variants(records);

        let masters: Vec<_> = ensured
            .iter()
            .filter(|v| v.is_master_variant)
            .map(|v| v.id.as_str())
            .collect();
        assert_eq!(masters, vec!["v1", "v2"]);
    }

    #[test]
    fn test_build_collapses_languages_and_maps_images() {
        let mut en = record("v1", "p1");
        en.images = Some(vec![ImageRef {
            url: "https://img.example.com/a.png".to_string(),
            width: 800,
            height: 600,
            label: Some("front".to_string()),
        }]);
        let mut sv = record("v1", "p1");
        sv.language = "sv".to_string();

        let imports = build_variant_imports(vec![en, sv], &[], &settings()).unwrap();
        assert_eq!(imports.len(), 1);
        let import = &imports[0];
        assert_eq!(import.key, "v1");
        assert_eq!(import.product.key, "p1");
        assert_eq!(import.images.len(), 1);
        assert_eq!(import.images[0].dimensions.w, 800);
        assert!(import.publish);
    }
}
