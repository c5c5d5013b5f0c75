//! Entity merging: cross-language fold of flat source records
//!
//! The feed returns one flat record per entity per language. Merging groups
//! them by stable id and folds the localized fields of every language into
//! per-language maps on a single canonical import document.

pub mod category;
pub mod product;
pub mod variant;

pub use category::{merge_categories, CategoryImport};
pub use product::{merge_products, ProductImport};
pub use variant::{build_variant_imports, ensure_master_variants, VariantImport};

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::hash::Hash;

/// Per-language value map for one localized field.
pub type LocalizedString = BTreeMap<String, String>;

/// Groups items by key, preserving first-encounter order of the keys and
/// input order within each group.
///
/// The master-variant promotion picks "the first" variant of a group, so
/// grouping must not reorder: no sort is applied, matching the fetch order
/// the records arrived in.
pub(crate) fn group_by_encounter_order<T, K, F>(items: Vec<T>, key_fn: F) -> Vec<(K, Vec<T>)>
where
    K: Eq + Hash + Clone,
    F: Fn(&T) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<T>)> = Vec::new();

    for item in items {
        let key = key_fn(&item);
        match index.get(&key) {
            Some(&position) => groups[position].1.push(item),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, vec![item]));
            }
        }
    }

    groups
}

/// True when a value is missing or contains only whitespace; such values
/// never populate an optional localized field.
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Writes an optional localized value, skipping blank ones.
pub(crate) fn set_if_present(
    map: &mut LocalizedString,
    language: &str,
    value: Option<&String>,
) {
    if let Some(value) = value {
        if !is_blank(value) {
            map.insert(language.to_string(), value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_preserves_encounter_order() {
        let items = vec![("b", 1), ("a", 2), ("b", 3), ("c", 4), ("a", 5)];
        let groups = group_by_encounter_order(items, |(k, _)| *k);

        let keys: Vec<_> = groups.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
        assert_eq!(groups[0].1, vec![("b", 1), ("b", 3)]);
        assert_eq!(groups[1].1, vec![("a", 2), ("a", 5)]);
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("   "));
        assert!(is_blank("\t\n"));
        assert!(!is_blank("x"));
    }

    #[test]
    fn test_set_if_present_skips_blank() {
        let mut map = LocalizedString::new();
        set_if_present(&mut map, "en", Some(&"  ".to_string()));
        set_if_present(&mut map, "sv", Some(&"Skor".to_string()));
        set_if_present(&mut map, "de", None);

        assert_eq!(map.len(), 1);
        assert_eq!(map.get("sv").unwrap(), "Skor");
    }
}
