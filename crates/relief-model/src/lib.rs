//! Data model for bulk beneficiary imports.
//!
//! Every type here is transient: rows, specs, records and outcomes are built
//! fresh for each import and owned by the caller.

pub mod cell;
pub mod enums;
pub mod error;
pub mod outcome;
pub mod record;
pub mod reference;
pub mod spec;

pub use cell::{CellValue, RawRow, format_number};
pub use enums::{EntityKind, Gender, MaritalStatus, ReferenceSet};
pub use error::{ModelError, Result};
pub use outcome::{ErrorKind, ImportOutcome, ValidationError};
pub use record::{CommittableRecord, FieldLookup, StoredRecord, TypedValue};
pub use reference::{Guardian, Martyr, ReferenceEntity, ReferenceUpdate};
pub use spec::{
    DerivedField, DuplicateRule, Eligibility, FieldKind, FieldSpec, Projection,
    ReferenceAttribute, ReferenceField, RecordSpec,
};
