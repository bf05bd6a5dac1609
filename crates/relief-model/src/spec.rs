//! Data-driven record schemas.
//!
//! A [`RecordSpec`] describes one importable entity type: which spreadsheet
//! columns it reads, how each cell is typed, which reference collection a
//! column points into, what is derived after validation, and when two records
//! count as duplicates. One engine interprets every spec.

use serde::{Deserialize, Serialize};

use crate::enums::{EntityKind, ReferenceSet};

/// How a single column is interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    /// Free text, trimmed.
    Text,
    /// A national identity number, trimmed, otherwise opaque.
    NationalId,
    /// A calendar date in any supported spreadsheet representation.
    Date,
    /// A non-negative integer.
    Count,
    /// One of a fixed list of options (case-sensitive).
    Choice { options: Vec<String> },
    /// A national ID that must resolve against a reference collection.
    Reference(ReferenceField),
}

impl FieldKind {
    pub fn choice<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldKind::Choice {
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::NationalId => "national ID",
            FieldKind::Date => "date",
            FieldKind::Count => "whole number",
            FieldKind::Choice { .. } => "choice",
            FieldKind::Reference(_) => "reference",
        }
    }
}

/// Foreign-key configuration for a [`FieldKind::Reference`] column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceField {
    /// Collection the key is looked up in.
    pub set: ReferenceSet,
    /// Condition the matched entity must satisfy beyond existing.
    pub eligibility: Option<Eligibility>,
    /// Attributes of the matched entity copied onto the record.
    pub copies: Vec<Projection>,
}

impl ReferenceField {
    pub fn new(set: ReferenceSet) -> Self {
        Self {
            set,
            eligibility: None,
            copies: Vec::new(),
        }
    }

    #[must_use]
    pub fn requiring(mut self, eligibility: Eligibility) -> Self {
        self.eligibility = Some(eligibility);
        self
    }

    #[must_use]
    pub fn copying(mut self, attribute: ReferenceAttribute, target: &str) -> Self {
        self.copies.push(Projection {
            attribute,
            target: target.to_string(),
        });
        self
    }
}

/// Eligibility predicates applied to a resolved reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Eligibility {
    /// Guardian must have a positive declared child count.
    HasDeclaredChildren,
    /// Guardian must be male and currently married.
    MarriedMale,
}

/// Attribute of a reference entity that can be copied onto a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceAttribute {
    Name,
    Area,
    Phone,
    DeathDate,
}

/// Copy `attribute` of the resolved entity into the record field `target`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projection {
    pub attribute: ReferenceAttribute,
    pub target: String,
}

/// One column of a record spec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Spreadsheet column label.
    pub label: String,
    /// Field name on the committable record.
    pub target: String,
    pub required: bool,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub fn required(label: &str, target: &str, kind: FieldKind) -> Self {
        Self {
            label: label.to_string(),
            target: target.to_string(),
            required: true,
            kind,
        }
    }

    pub fn optional(label: &str, target: &str, kind: FieldKind) -> Self {
        Self {
            label: label.to_string(),
            target: target.to_string(),
            required: false,
            kind,
        }
    }
}

/// Values computed from already-validated fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DerivedField {
    /// Whole years between the date in `from` and the import's as-of date.
    AgeInYears { from: String, into: String },
}

/// When a candidate record counts as a duplicate of another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateRule {
    /// Natural identifier compared exactly (trimmed).
    pub identifier: String,
    /// Additional field tuples compared case-insensitively.
    pub secondary: Vec<Vec<String>>,
}

impl DuplicateRule {
    pub fn by_identifier(identifier: &str) -> Self {
        Self {
            identifier: identifier.to_string(),
            secondary: Vec::new(),
        }
    }

    #[must_use]
    pub fn or_matching(mut self, fields: &[&str]) -> Self {
        self.secondary
            .push(fields.iter().map(|f| (*f).to_string()).collect());
        self
    }
}

/// Complete import schema for one entity type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSpec {
    pub entity: EntityKind,
    pub fields: Vec<FieldSpec>,
    pub derived: Vec<DerivedField>,
    pub duplicates: DuplicateRule,
}

impl RecordSpec {
    pub fn field(&self, target: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.target == target)
    }

    /// Label of the column that feeds `target`, falling back to the target name.
    pub fn label_for<'a>(&'a self, target: &'a str) -> &'a str {
        self.field(target)
            .map(|field| field.label.as_str())
            .unwrap_or(target)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.label.as_str())
    }

    pub fn required_labels(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|field| field.required)
            .map(|field| field.label.as_str())
    }

    pub fn reference_sets(&self) -> Vec<ReferenceSet> {
        let mut sets: Vec<ReferenceSet> = self
            .fields
            .iter()
            .filter_map(|field| match &field.kind {
                FieldKind::Reference(reference) => Some(reference.set),
                _ => None,
            })
            .collect();
        sets.sort();
        sets.dedup();
        sets
    }
}
