//! Type-safe enumerations for beneficiary records.
//!
//! These enums give compile-time safety to concepts that arrive as free text
//! in spreadsheets and JSON snapshots.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Entity types that support bulk spreadsheet import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityKind {
    /// Children registered under a guardian.
    Children,
    /// Orphans linked to a martyr record.
    Orphans,
    /// Wives linked to a husband (guardian) record.
    Wives,
    /// Medical cases, optionally linked to a guardian.
    MedicalCases,
}

impl EntityKind {
    /// All importable entity types, in display order.
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Children,
        EntityKind::Orphans,
        EntityKind::Wives,
        EntityKind::MedicalCases,
    ];

    /// Returns the machine name used on the command line and in JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Children => "children",
            EntityKind::Orphans => "orphans",
            EntityKind::Wives => "wives",
            EntityKind::MedicalCases => "medical-cases",
        }
    }

    /// Returns a human-readable label for summaries.
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Children => "Children",
            EntityKind::Orphans => "Orphans",
            EntityKind::Wives => "Wives",
            EntityKind::MedicalCases => "Medical cases",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = ModelError;

    /// Parse an entity name (case-insensitive, `_` and `-` interchangeable).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");

        match normalized.as_str() {
            "children" | "child" => Ok(EntityKind::Children),
            "orphans" | "orphan" => Ok(EntityKind::Orphans),
            "wives" | "wife" => Ok(EntityKind::Wives),
            "medical-cases" | "medical-case" | "medical" => Ok(EntityKind::MedicalCases),
            _ => Err(ModelError::UnknownEntity(s.to_string())),
        }
    }
}

/// Reference collections that import rows may point into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceSet {
    Guardians,
    Martyrs,
}

impl ReferenceSet {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferenceSet::Guardians => "guardians",
            ReferenceSet::Martyrs => "martyrs",
        }
    }

    /// Singular noun used in user-facing messages ("No guardian found ...").
    pub fn singular(&self) -> &'static str {
        match self {
            ReferenceSet::Guardians => "guardian",
            ReferenceSet::Martyrs => "martyr",
        }
    }
}

impl fmt::Display for ReferenceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Snapshots spell genders loosely (`male`, `M`); they deserialize through [`FromStr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Gender {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "MALE" | "M" => Ok(Gender::Male),
            "FEMALE" | "F" => Ok(Gender::Female),
            _ => Err(ModelError::InvalidValue {
                field: "gender",
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Gender {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Marital status of a guardian record. Deserializes through [`FromStr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum MaritalStatus {
    Single,
    Married,
    Divorced,
    Widowed,
}

impl MaritalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaritalStatus::Single => "Single",
            MaritalStatus::Married => "Married",
            MaritalStatus::Divorced => "Divorced",
            MaritalStatus::Widowed => "Widowed",
        }
    }
}

impl fmt::Display for MaritalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MaritalStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "SINGLE" => Ok(MaritalStatus::Single),
            "MARRIED" => Ok(MaritalStatus::Married),
            "DIVORCED" => Ok(MaritalStatus::Divorced),
            "WIDOWED" | "WIDOW" | "WIDOWER" => Ok(MaritalStatus::Widowed),
            _ => Err(ModelError::InvalidValue {
                field: "marital status",
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for MaritalStatus {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_kind_from_str() {
        assert_eq!(
            "children".parse::<EntityKind>().unwrap(),
            EntityKind::Children
        );
        assert_eq!(
            "Medical_Cases".parse::<EntityKind>().unwrap(),
            EntityKind::MedicalCases
        );
        assert_eq!("WIFE".parse::<EntityKind>().unwrap(), EntityKind::Wives);
        assert!("guardians".parse::<EntityKind>().is_err());
    }

    #[test]
    fn test_entity_kind_display_round_trips() {
        for kind in EntityKind::ALL {
            assert_eq!(kind.to_string().parse::<EntityKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_marital_status_from_str() {
        assert_eq!(
            " married ".parse::<MaritalStatus>().unwrap(),
            MaritalStatus::Married
        );
        assert_eq!(
            "Widow".parse::<MaritalStatus>().unwrap(),
            MaritalStatus::Widowed
        );
    }
}
