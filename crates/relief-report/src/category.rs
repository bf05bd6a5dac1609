//! Error categories for triage.

use std::fmt;

use relief_model::ErrorKind;
use serde::{Deserialize, Serialize};

/// Coarse grouping of validation errors by the kind of fix they need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Date,
    Reference,
    Choice,
    Generic,
}

impl ErrorCategory {
    pub const ALL: [ErrorCategory; 4] = [
        ErrorCategory::Date,
        ErrorCategory::Reference,
        ErrorCategory::Choice,
        ErrorCategory::Generic,
    ];

    pub fn classify(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::InvalidDate => ErrorCategory::Date,
            ErrorKind::ReferenceNotFound | ErrorKind::ReferenceIneligible => {
                ErrorCategory::Reference
            }
            ErrorKind::InvalidChoice => ErrorCategory::Choice,
            ErrorKind::Missing | ErrorKind::InvalidNumber | ErrorKind::Duplicate => {
                ErrorCategory::Generic
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Date => "date",
            ErrorCategory::Reference => "reference",
            ErrorCategory::Choice => "choice",
            ErrorCategory::Generic => "generic",
        }
    }

    /// Column heading used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            ErrorCategory::Date => "Date",
            ErrorCategory::Reference => "Reference",
            ErrorCategory::Choice => "Allowed values",
            ErrorCategory::Generic => "Other",
        }
    }

    /// Standing advice for fixing errors of this category.
    pub fn common_fix(&self) -> &'static str {
        match self {
            ErrorCategory::Date => {
                "Write dates as YYYY-MM-DD (2015-03-15) or DD/MM/YYYY (15/03/2015). \
                 Check that the month is between 1 and 12 and the day exists in that month."
            }
            ErrorCategory::Reference => {
                "Copy the national ID exactly as it appears on the guardian or martyr record. \
                 Register the guardian or martyr first if they are missing, and check that a \
                 guardian has declared children (or, for wives, is a married man)."
            }
            ErrorCategory::Choice => {
                "Use one of the listed values exactly as written, including capital letters."
            }
            ErrorCategory::Generic => {
                "Fill in every required column, use whole numbers for counts, and remove rows \
                 whose national ID is already registered."
            }
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_covers_every_kind() {
        assert_eq!(
            ErrorCategory::classify(ErrorKind::InvalidDate),
            ErrorCategory::Date
        );
        assert_eq!(
            ErrorCategory::classify(ErrorKind::ReferenceIneligible),
            ErrorCategory::Reference
        );
        assert_eq!(
            ErrorCategory::classify(ErrorKind::InvalidChoice),
            ErrorCategory::Choice
        );
        assert_eq!(
            ErrorCategory::classify(ErrorKind::Duplicate),
            ErrorCategory::Generic
        );
        assert_eq!(
            ErrorCategory::classify(ErrorKind::InvalidNumber),
            ErrorCategory::Generic
        );
    }
}
