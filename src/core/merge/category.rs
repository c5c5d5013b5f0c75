//! Category merging
//!
//! One `CategoryImport` per distinct category id. The first record of a
//! group (in encounter order) supplies the canonical fields; every record
//! contributes its language to the localized maps. Name and slug are
//! required and written unconditionally; the metadata fields are optional
//! and skip blank values.

use crate::adapters::import_api::KeyReference;
use crate::core::merge::{group_by_encounter_order, is_blank, set_if_present, LocalizedString};
use crate::domain::CategoryRecord;
use serde::Serialize;

/// Import document for one category.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryImport {
    pub key: String,
    pub name: LocalizedString,
    pub slug: LocalizedString,
    #[serde(skip_serializing_if = "LocalizedString::is_empty")]
    pub description: LocalizedString,
    #[serde(skip_serializing_if = "LocalizedString::is_empty")]
    pub meta_title: LocalizedString,
    #[serde(skip_serializing_if = "LocalizedString::is_empty")]
    pub meta_description: LocalizedString,
    #[serde(skip_serializing_if = "LocalizedString::is_empty")]
    pub meta_keywords: LocalizedString,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<KeyReference>,
    pub order_hint: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

/// Merges per-language category records into one import document per id.
pub fn merge_categories(records: Vec<CategoryRecord>) -> Vec<CategoryImport> {
    group_by_encounter_order(records, |record| record.id.clone())
        .into_iter()
        .map(|(_, group)| merge_group(group))
        .collect()
}

fn merge_group(group: Vec<CategoryRecord>) -> CategoryImport {
    let canonical = &group[0];
    let mut import = CategoryImport {
        key: canonical.id.clone(),
        name: LocalizedString::new(),
        slug: LocalizedString::new(),
        description: LocalizedString::new(),
        meta_title: LocalizedString::new(),
        meta_description: LocalizedString::new(),
        meta_keywords: LocalizedString::new(),
        parent: canonical
            .parent
            .as_deref()
            .filter(|parent| !is_blank(parent))
            .map(KeyReference::category),
        order_hint: canonical.order_hint.clone(),
        external_id: canonical.external_id.clone(),
    };

    for record in &group {
        // required fields are written even when blank
        import
            .name
            .insert(record.language.clone(), record.name.clone());
        import
            .slug
            .insert(record.language.clone(), record.slug.clone());
        set_if_present(&mut import.description, &record.language, record.description.as_ref());
        set_if_present(&mut import.meta_title, &record.language, record.meta_title.as_ref());
        set_if_present(
            &mut import.meta_description,
            &record.language,
            record.meta_description.as_ref(),
        );
        set_if_present(
            &mut import.meta_keywords,
            &record.language,
            record.meta_keywords.as_ref(),
        );
    }

    import
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, language: &str, name: &str) -> CategoryRecord {
        CategoryRecord {
            id: id.to_string(),
            name: name.to_string(),
            slug: format!("{}-slug", name.to_lowercase()),
            description: None,
            parent: None,
            external_id: None,
            meta_title: None,
            meta_description: None,
            meta_keywords: None,
            order_hint: "0".to_string(),
            language: language.to_string(),
        }
    }

    #[test]
    fn test_two_languages_merge_into_one_document() {
        let records = vec![record("c1", "en", "Shoes"), record("c1", "sv", "Skor")];
        let merged = merge_categories(records);

        assert_eq!(merged.len(), 1);
        let import = &merged[0];
        assert_eq!(import.key, "c1");
        assert_eq!(import.name.get("en").unwrap(), "Shoes");
        assert_eq!(import.name.get("sv").unwrap(), "Skor");
    }

    #[test]
    fn test_blank_optional_field_never_populates_map() {
        let mut en = record("c1", "en", "Shoes");
        en.meta_title = Some("All shoes".to_string());
        let mut sv = record("c1", "sv", "Skor");
        sv.meta_title = Some("   ".to_string());

        let merged = merge_categories(vec![en, sv]);
        let import = &merged[0];
        assert_eq!(import.meta_title.len(), 1);
        assert!(import.meta_title.contains_key("en"));
    }

    #[test]
    fn test_blank_parent_produces_no_reference() {
        let mut with_parent = record("c1", "en", "Shoes");
        with_parent.parent = Some("c0".to_string());
        let mut blank_parent = record("c2", "en", "Boots");
        blank_parent.parent = Some("  ".to_string());

        let merged = merge_categories(vec![with_parent, blank_parent]);
        assert!(merged[0].parent.is_some());
        assert_eq!(merged[0].parent.as_ref().unwrap().key, "c0");
        assert!(merged[1].parent.is_none());
    }

    #[test]
    fn test_one_document_per_distinct_id() {
        let records = vec![
            record("c1", "en", "Shoes"),
            record("c2", "en", "Boots"),
            record("c1", "sv", "Skor"),
            record("c2", "sv", "Stövlar"),
        ];
        let merged = merge_categories(records);
        assert_eq!(merged.len(), 2);
        let keys: Vec<_> = merged.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["c1", "c2"]);
    }

    #[test]
    fn test_same_language_last_write_wins() {
        let records = vec![record("c1", "en", "Shoes"), record("c1", "en", "Footwear")];
        let merged = merge_categories(records);
        assert_eq!(merged[0].name.get("en").unwrap(), "Footwear");
    }
}
