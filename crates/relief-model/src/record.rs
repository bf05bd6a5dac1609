use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::enums::EntityKind;

/// A validated, typed field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypedValue {
    Integer(u64),
    Date(NaiveDate),
    Text(String),
}

impl TypedValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TypedValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            TypedValue::Date(date) => Some(*date),
            _ => None,
        }
    }

    /// Canonical string form used for comparisons and reports.
    pub fn render(&self) -> String {
        match self {
            TypedValue::Integer(value) => value.to_string(),
            TypedValue::Date(date) => date.format("%Y-%m-%d").to_string(),
            TypedValue::Text(text) => text.clone(),
        }
    }
}

/// Read access to named fields, shared by fresh and persisted records.
pub trait FieldLookup {
    fn lookup(&self, field: &str) -> Option<String>;

    /// Identifier of a persisted record, if it has one.
    fn record_id(&self) -> Option<&str> {
        None
    }
}

/// A row that passed validation, ready for the caller's persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommittableRecord {
    /// Source row number (header is row 1).
    pub row: usize,
    pub entity: EntityKind,
    pub fields: BTreeMap<String, TypedValue>,
}

impl CommittableRecord {
    pub fn new(row: usize, entity: EntityKind) -> Self {
        Self {
            row,
            entity,
            fields: BTreeMap::new(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&TypedValue> {
        self.fields.get(field)
    }

    pub fn text(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(TypedValue::as_text)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: TypedValue) {
        self.fields.insert(field.into(), value);
    }
}

impl FieldLookup for CommittableRecord {
    fn lookup(&self, field: &str) -> Option<String> {
        self.fields.get(field).map(TypedValue::render)
    }
}

/// A record already held by the caller (e.g. loaded from its data store).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

impl StoredRecord {
    pub fn new(id: Option<&str>) -> Self {
        Self {
            id: id.map(str::to_string),
            fields: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with(mut self, field: &str, value: &str) -> Self {
        self.fields.insert(field.to_string(), value.to_string());
        self
    }
}

impl FieldLookup for StoredRecord {
    fn lookup(&self, field: &str) -> Option<String> {
        self.fields.get(field).cloned()
    }

    fn record_id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl From<&CommittableRecord> for StoredRecord {
    fn from(record: &CommittableRecord) -> Self {
        Self {
            id: None,
            fields: record
                .fields
                .iter()
                .map(|(name, value)| (name.clone(), value.render()))
                .collect(),
        }
    }
}
