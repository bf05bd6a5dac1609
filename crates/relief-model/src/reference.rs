//! Reference entities that import rows point into, and the counter updates
//! a caller applies to them after committing records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::enums::{Gender, MaritalStatus, ReferenceSet};
use crate::spec::ReferenceAttribute;

/// Head of a household.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guardian {
    pub national_id: String,
    pub name: String,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub gender: Gender,
    pub marital_status: MaritalStatus,
    /// Number of children the guardian declared at registration.
    #[serde(default)]
    pub children_count: u32,
    /// Number of child records imported under this guardian.
    #[serde(default)]
    pub registered_children: u32,
    #[serde(default)]
    pub wives_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Martyr {
    pub national_id: String,
    pub name: String,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub death_date: Option<NaiveDate>,
}

/// Any entity a reference index can hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ReferenceEntity {
    Guardian(Guardian),
    Martyr(Martyr),
}

impl ReferenceEntity {
    pub fn national_id(&self) -> &str {
        match self {
            ReferenceEntity::Guardian(guardian) => &guardian.national_id,
            ReferenceEntity::Martyr(martyr) => &martyr.national_id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ReferenceEntity::Guardian(guardian) => &guardian.name,
            ReferenceEntity::Martyr(martyr) => &martyr.name,
        }
    }

    pub fn set(&self) -> ReferenceSet {
        match self {
            ReferenceEntity::Guardian(_) => ReferenceSet::Guardians,
            ReferenceEntity::Martyr(_) => ReferenceSet::Martyrs,
        }
    }

    pub fn as_guardian(&self) -> Option<&Guardian> {
        match self {
            ReferenceEntity::Guardian(guardian) => Some(guardian),
            ReferenceEntity::Martyr(_) => None,
        }
    }

    /// Value of a copyable attribute, or `None` when the entity lacks it.
    pub fn attribute(&self, attribute: ReferenceAttribute) -> Option<String> {
        let value = match (self, attribute) {
            (_, ReferenceAttribute::Name) => Some(self.name().to_string()),
            (ReferenceEntity::Guardian(g), ReferenceAttribute::Area) => g.area.clone(),
            (ReferenceEntity::Guardian(g), ReferenceAttribute::Phone) => g.phone.clone(),
            (ReferenceEntity::Guardian(_), ReferenceAttribute::DeathDate) => None,
            (ReferenceEntity::Martyr(m), ReferenceAttribute::Area) => m.area.clone(),
            (ReferenceEntity::Martyr(_), ReferenceAttribute::Phone) => None,
            (ReferenceEntity::Martyr(m), ReferenceAttribute::DeathDate) => {
                m.death_date.map(|date| date.format("%Y-%m-%d").to_string())
            }
        };
        value.filter(|text| !text.trim().is_empty())
    }
}

impl From<Guardian> for ReferenceEntity {
    fn from(guardian: Guardian) -> Self {
        ReferenceEntity::Guardian(guardian)
    }
}

impl From<Martyr> for ReferenceEntity {
    fn from(martyr: Martyr) -> Self {
        ReferenceEntity::Martyr(martyr)
    }
}

/// Counter change to a guardian record after a committed import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "update", rename_all = "snake_case")]
pub enum ReferenceUpdate {
    IncrementWives { guardian_national_id: String },
    IncrementRegisteredChildren { guardian_national_id: String },
}

impl ReferenceUpdate {
    pub fn guardian_national_id(&self) -> &str {
        match self {
            ReferenceUpdate::IncrementWives {
                guardian_national_id,
            }
            | ReferenceUpdate::IncrementRegisteredChildren {
                guardian_national_id,
            } => guardian_national_id,
        }
    }

    /// Apply the update to a caller-owned guardian collection.
    ///
    /// Returns `false` when no guardian carries the national ID.
    pub fn apply(&self, guardians: &mut [Guardian]) -> bool {
        let key = self.guardian_national_id().trim();
        let Some(guardian) = guardians
            .iter_mut()
            .find(|guardian| guardian.national_id.trim() == key)
        else {
            return false;
        };
        match self {
            ReferenceUpdate::IncrementWives { .. } => {
                guardian.wives_count = guardian.wives_count.saturating_add(1);
            }
            ReferenceUpdate::IncrementRegisteredChildren { .. } => {
                guardian.registered_children = guardian.registered_children.saturating_add(1);
            }
        }
        true
    }
}
