//! Product merging
//!
//! Products are derived from the variant feed: variant records sharing one
//! `product_id` collapse into a single `ProductImport`. Name, slug and
//! description are required localized fields and written unconditionally;
//! the metadata fields skip blank values.

use crate::adapters::import_api::KeyReference;
use crate::config::ImportConfig;
use crate::core::merge::{group_by_encounter_order, set_if_present, LocalizedString};
use crate::domain::VariantRecord;
use serde::Serialize;

/// Import document for one product.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImport {
    pub key: String,
    pub product_type: KeyReference,
    pub name: LocalizedString,
    pub slug: LocalizedString,
    pub description: LocalizedString,
    #[serde(skip_serializing_if = "LocalizedString::is_empty")]
    pub meta_title: LocalizedString,
    #[serde(skip_serializing_if = "LocalizedString::is_empty")]
    pub meta_description: LocalizedString,
    #[serde(skip_serializing_if = "LocalizedString::is_empty")]
    pub meta_keywords: LocalizedString,
    pub price_mode: &'static str,
    pub publish: bool,
    pub categories: Vec<KeyReference>,
}

/// Merges variant records into one import document per distinct product id.
pub fn merge_products(records: Vec<VariantRecord>, settings: &ImportConfig) -> Vec<ProductImport> {
    group_by_encounter_order(records, |record| record.product_id.clone())
        .into_iter()
        .map(|(_, group)| merge_group(group, settings))
        .collect()
}

fn merge_group(group: Vec<VariantRecord>, settings: &ImportConfig) -> ProductImport {
    let canonical = &group[0];
    let mut import = ProductImport {
        key: canonical.product_id.clone(),
        product_type: KeyReference::product_type(settings.product_type.clone()),
        name: LocalizedString::new(),
        slug: LocalizedString::new(),
        description: LocalizedString::new(),
        meta_title: LocalizedString::new(),
        meta_description: LocalizedString::new(),
        meta_keywords: LocalizedString::new(),
        price_mode: "Embedded",
        publish: canonical.publish_product.unwrap_or(settings.publish_products),
        categories: canonical
            .product_categories
            .iter()
            .map(KeyReference::category)
            .collect(),
    };

    for record in &group {
        let language = record.language.clone();
        import.name.insert(language.clone(), record.product_name.clone());
        import.slug.insert(language.clone(), record.product_slug.clone());
        import.description.insert(
            language.clone(),
            record.product_description.clone().unwrap_or_default(),
        );
        set_if_present(&mut import.meta_title, &language, record.product_meta_title.as_ref());
        set_if_present(
            &mut import.meta_description,
            &language,
            record.product_meta_description.as_ref(),
        );
        set_if_present(
            &mut import.meta_keywords,
            &language,
            record.product_meta_keywords.as_ref(),
        );
    }

    import
}
