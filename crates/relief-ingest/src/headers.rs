//! Header checks against a record spec.

use std::collections::BTreeSet;

use relief_model::RecordSpec;

/// Differences between a file's header row and the labels a spec reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderCheck {
    /// Required labels with no matching column.
    pub missing_required: Vec<String>,
    /// Optional labels with no matching column.
    pub missing_optional: Vec<String>,
    /// Columns the record spec does not read.
    pub unknown: Vec<String>,
}

impl HeaderCheck {
    pub fn is_clean(&self) -> bool {
        self.missing_required.is_empty()
            && self.missing_optional.is_empty()
            && self.unknown.is_empty()
    }
}

/// Compare file labels with the record spec. Matching trims whitespace and is
/// case-sensitive, like row lookups.
pub fn check_headers<'a, I>(spec: &RecordSpec, labels: I) -> HeaderCheck
where
    I: IntoIterator<Item = &'a str>,
{
    let present: BTreeSet<&str> = labels.into_iter().map(str::trim).collect();
    let declared: BTreeSet<&str> = spec.labels().map(str::trim).collect();

    let mut check = HeaderCheck::default();
    for field in &spec.fields {
        if present.contains(field.label.trim()) {
            continue;
        }
        if field.required {
            check.missing_required.push(field.label.clone());
        } else {
            check.missing_optional.push(field.label.clone());
        }
    }
    check.unknown = present
        .iter()
        .filter(|label| !label.is_empty() && !declared.contains(*label))
        .map(|label| (*label).to_string())
        .collect();
    check
}
