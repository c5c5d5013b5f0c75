//! Typed attribute values
//!
//! A closed tagged union with one variant per declared schema type. The
//! serialized form is the import API attribute shape:
//! `{"name": ..., "type": ..., "value": ...}`.

use crate::core::merge::LocalizedString;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

/// One projected attribute on a variant import.
#[derive(Debug, Clone, Serialize)]
pub struct Attribute {
    pub name: String,
    #[serde(flatten)]
    pub value: AttributeValue,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: AttributeValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// A typed attribute value, tagged by its declared type on the wire.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum AttributeValue {
    #[serde(rename = "boolean")]
    Boolean(bool),
    #[serde(rename = "text")]
    Text(String),
    #[serde(rename = "ltext")]
    LocalizedText(LocalizedString),
    #[serde(rename = "number")]
    Number(f64),
    #[serde(rename = "datetime")]
    DateTime(DateTime<Utc>),
    #[serde(rename = "date")]
    Date(NaiveDate),
    #[serde(rename = "time")]
    Time(NaiveTime),
    #[serde(rename = "enum")]
    Enum(String),
    #[serde(rename = "lenum")]
    LocalizedEnum(LocalizedString),
}
