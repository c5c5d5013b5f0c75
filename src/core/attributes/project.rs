//! Attribute projection
//!
//! Converts the raw string-keyed attribute map of a merged variant into
//! typed attribute values, driven by the configured schema. Schema entries
//! are projected in declared order.
//!
//! Localized types read the raw map of every record in the language group;
//! all other types read the canonical record only. A missing or blank raw
//! value omits the attribute entirely; a malformed one aborts projection
//! and propagates to the run boundary.

use crate::config::{AttributeSpec, AttributeType};
use crate::core::attributes::{Attribute, AttributeValue};
use crate::core::merge::LocalizedString;
use crate::domain::{Result, SyncError, VariantRecord};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Projects the schema onto one variant group.
pub fn project_attributes(
    group: &[VariantRecord],
    canonical: &VariantRecord,
    schema: &[AttributeSpec],
) -> Result<Vec<Attribute>> {
    let mut attributes = Vec::new();

    for spec in schema {
        match spec.attribute_type {
            AttributeType::LocalizedText => {
                attributes.push(Attribute::new(
                    spec.name.clone(),
                    AttributeValue::LocalizedText(collect_localized(group, &spec.name)),
                ));
            }
            AttributeType::LocalizedList => {
                attributes.push(Attribute::new(
                    spec.name.clone(),
                    AttributeValue::LocalizedEnum(collect_localized(group, &spec.name)),
                ));
            }
            scalar_type => {
                let raw = canonical
                    .attributes
                    .get(&spec.name)
                    .map(String::as_str)
                    .unwrap_or("");
                if raw.trim().is_empty() {
                    continue;
                }
                let value = parse_scalar(scalar_type, raw)
                    .map_err(|reason| SyncError::AttributeParse {
                        name: spec.name.clone(),
                        reason,
                    })?;
                attributes.push(Attribute::new(spec.name.clone(), value));
            }
        }
    }

    Ok(attributes)
}

/// Collects non-blank raw values per language across the group.
fn collect_localized(group: &[VariantRecord], name: &str) -> LocalizedString {
    let mut map = LocalizedString::new();
    for record in group {
        if let Some(value) = record.attributes.get(name) {
            if !value.trim().is_empty() {
                map.insert(record.language.clone(), value.clone());
            }
        }
    }
    map
}

/// Parses one non-localized raw value. Total over the scalar types; the
/// localized ones are handled before this is reached.
fn parse_scalar(
    attribute_type: AttributeType,
    raw: &str,
) -> std::result::Result<AttributeValue, String> {
    let trimmed = raw.trim();
    match attribute_type {
        AttributeType::Boolean => parse_bool(trimmed).map(AttributeValue::Boolean),
        AttributeType::Text => Ok(AttributeValue::Text(trimmed.to_string())),
        AttributeType::Number => trimmed
            .parse::<f64>()
            .map(AttributeValue::Number)
            .map_err(|e| format!("'{trimmed}' is not a number: {e}")),
        AttributeType::DateTime => parse_datetime(trimmed).map(AttributeValue::DateTime),
        AttributeType::Date => parse_datetime(trimmed).map(|dt| AttributeValue::Date(dt.date_naive())),
        AttributeType::Time => parse_datetime(trimmed).map(|dt| AttributeValue::Time(dt.time())),
        AttributeType::EnumList => Ok(AttributeValue::Enum(trimmed.to_string())),
        AttributeType::LocalizedText | AttributeType::LocalizedList => {
            unreachable!("localized types are projected from the language group")
        }
    }
}

fn parse_bool(raw: &str) -> std::result::Result<bool, String> {
    if raw.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(format!("'{raw}' is not a boolean literal"))
    }
}

/// Parses a date-time in RFC 3339, naive date-time, or plain date form.
/// Naive values are taken as UTC.
fn parse_datetime(raw: &str) -> std::result::Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.and_time(chrono::NaiveTime::MIN).and_utc());
    }
    Err(format!("'{raw}' is not a recognized date-time"))
}
