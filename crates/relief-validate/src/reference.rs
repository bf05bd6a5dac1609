//! Reference indexes and foreign-key resolution.
//!
//! A [`ReferenceIndex`] is built once per import from the caller's current
//! collection (all guardians, all martyrs) and never mutated afterwards.
//! Import validation only ever matches on the canonical key, the national ID.
//! The name matcher exists for suggestion lists in user interfaces.

use std::collections::{BTreeMap, HashMap};

use relief_model::{
    Eligibility, Gender, Guardian, MaritalStatus, Martyr, ReferenceEntity, ReferenceSet,
};
use tracing::warn;

/// Immutable lookup over one reference collection.
#[derive(Debug, Clone)]
pub struct ReferenceIndex {
    set: ReferenceSet,
    entities: Vec<ReferenceEntity>,
    by_national_id: HashMap<String, usize>,
}

impl ReferenceIndex {
    /// Build an index. When two entities share a national ID the first wins.
    pub fn new<I>(set: ReferenceSet, entities: I) -> Self
    where
        I: IntoIterator<Item = ReferenceEntity>,
    {
        let entities: Vec<ReferenceEntity> = entities.into_iter().collect();
        let mut by_national_id = HashMap::with_capacity(entities.len());
        let mut collisions = 0usize;
        for (position, entity) in entities.iter().enumerate() {
            let key = entity.national_id().trim();
            if key.is_empty() {
                continue;
            }
            if by_national_id.contains_key(key) {
                collisions += 1;
                continue;
            }
            by_national_id.insert(key.to_string(), position);
        }
        if collisions > 0 {
            warn!(
                set = %set,
                collisions,
                "reference collection has repeated national IDs; first occurrence wins"
            );
        }
        Self {
            set,
            entities,
            by_national_id,
        }
    }

    pub fn from_guardians(guardians: Vec<Guardian>) -> Self {
        Self::new(
            ReferenceSet::Guardians,
            guardians.into_iter().map(ReferenceEntity::from),
        )
    }

    pub fn from_martyrs(martyrs: Vec<Martyr>) -> Self {
        Self::new(
            ReferenceSet::Martyrs,
            martyrs.into_iter().map(ReferenceEntity::from),
        )
    }

    pub fn set(&self) -> ReferenceSet {
        self.set
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Exact, case-sensitive lookup on the trimmed national ID.
    pub fn get(&self, national_id: &str) -> Option<&ReferenceEntity> {
        self.by_national_id
            .get(national_id.trim())
            .and_then(|position| self.entities.get(*position))
    }

    /// Entities whose name contains `query`, case-insensitively, in
    /// collection order. Lower confidence than the national ID; never used
    /// to validate imports.
    pub fn suggest_by_name(&self, query: &str, limit: usize) -> Vec<&ReferenceEntity> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.entities
            .iter()
            .filter(|entity| entity.name().to_lowercase().contains(&needle))
            .take(limit)
            .collect()
    }
}

/// All reference indexes supplied for one import.
#[derive(Debug, Clone, Default)]
pub struct ReferenceSnapshot {
    indexes: BTreeMap<ReferenceSet, ReferenceIndex>,
}

impl ReferenceSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_index(mut self, index: ReferenceIndex) -> Self {
        self.insert(index);
        self
    }

    #[must_use]
    pub fn with_guardians(self, guardians: Vec<Guardian>) -> Self {
        self.with_index(ReferenceIndex::from_guardians(guardians))
    }

    #[must_use]
    pub fn with_martyrs(self, martyrs: Vec<Martyr>) -> Self {
        self.with_index(ReferenceIndex::from_martyrs(martyrs))
    }

    /// Add or replace the index for its reference set.
    pub fn insert(&mut self, index: ReferenceIndex) {
        self.indexes.insert(index.set(), index);
    }

    pub fn index(&self, set: ReferenceSet) -> Option<&ReferenceIndex> {
        self.indexes.get(&set)
    }
}

/// Outcome of resolving one foreign key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'a> {
    Found(&'a ReferenceEntity),
    NotFound,
    /// The key matched, but the entity fails the field's eligibility rule.
    Ineligible {
        entity: &'a ReferenceEntity,
        reason: String,
    },
}

/// Look up `key` and apply the eligibility rule, if any.
pub fn resolve<'a>(
    index: &'a ReferenceIndex,
    key: &str,
    eligibility: Option<Eligibility>,
) -> Resolution<'a> {
    let Some(entity) = index.get(key) else {
        return Resolution::NotFound;
    };
    match eligibility.map(|rule| check_eligibility(entity, rule)) {
        Some(Err(reason)) => Resolution::Ineligible { entity, reason },
        _ => Resolution::Found(entity),
    }
}

/// `Err` carries the unmet condition, phrased to follow the entity's name.
fn check_eligibility(entity: &ReferenceEntity, rule: Eligibility) -> Result<(), String> {
    let Some(guardian) = entity.as_guardian() else {
        return Err("is not a guardian record".to_string());
    };
    match rule {
        Eligibility::HasDeclaredChildren => {
            if guardian.children_count > 0 {
                Ok(())
            } else {
                Err("has no children recorded (children count is 0)".to_string())
            }
        }
        Eligibility::MarriedMale => {
            let mut unmet = Vec::new();
            if guardian.gender != Gender::Male {
                unmet.push(format!("is not male (gender is {})", guardian.gender));
            }
            if guardian.marital_status != MaritalStatus::Married {
                unmet.push(format!(
                    "is not currently married (marital status is {})",
                    guardian.marital_status
                ));
            }
            if unmet.is_empty() {
                Ok(())
            } else {
                Err(unmet.join(" and "))
            }
        }
    }
}
