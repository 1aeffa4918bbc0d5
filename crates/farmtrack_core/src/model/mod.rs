//! Domain model for farm records.
//!
//! # Responsibility
//! - Define the crop, task and expense records owned by collection stores.
//! - Provide draft/patch shapes and validation for every write path.
//!
//! # Invariants
//! - Every record is identified by a store-generated `RecordId`.
//! - Records are plain values; callers receive copies, never shared handles.
//! - Task -> crop links are soft references (`CropRef`) with no integrity
//!   enforcement.

pub mod amount;
pub mod crop;
pub mod display;
pub mod expense;
pub mod task;
pub mod validation;

use uuid::Uuid;

/// Stable identifier assigned by a store when a record is created.
///
/// Query and aggregate code only compares identifiers for equality.
pub type RecordId = Uuid;

/// Generates a fresh identifier for a new record.
pub fn new_record_id() -> RecordId {
    Uuid::new_v4()
}
