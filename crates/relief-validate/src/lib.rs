//! Bulk import engine for beneficiary spreadsheets.
//!
//! - **specs**: built-in record specs for children, orphans, wives and medical cases
//! - **reference**: guardian and martyr indexes, foreign-key resolution
//! - **duplicate**: identifier and field-tuple duplicate detection
//! - **record**: per-row validation into committable records
//! - **engine**: batch runs producing an [`ImportOutcome`](relief_model::ImportOutcome)
//! - **effects**: reference updates owed after commit

pub mod duplicate;
pub mod effects;
pub mod engine;
mod field;
pub mod record;
pub mod reference;
pub mod specs;

pub use duplicate::{DuplicateDetector, DuplicateMatch, MatchedBy, find_duplicate};
pub use effects::post_commit_updates;
pub use engine::{FIRST_DATA_ROW, ImportBatch, run};
pub use record::{RowContext, validate_row};
pub use reference::{ReferenceIndex, ReferenceSnapshot, Resolution, resolve};
pub use specs::{all_specs, fields, spec_for};
