//! Query/filter engine over record snapshots.
//!
//! # Responsibility
//! - Select the records matching free-text, enum and date-interval criteria.
//! - Derive task buckets (today/upcoming/overdue/completed) from due dates.
//!
//! # Invariants
//! - All functions are pure: they read a snapshot and return owned copies.
//! - Active predicates compose by logical AND; `filter_*` never reorders.
//! - `query_*` applies `filter_*` then exactly one stable sort with the
//!   collection's canonical key.

pub mod bucket;
pub mod filter;
pub mod text;

pub use bucket::{classify_task, TaskBucket};
pub use filter::{
    filter_crops, filter_expenses, filter_tasks, query_crops, query_expenses, query_tasks,
    sort_expenses_by_recency, sort_tasks_by_due, CropCriteria, ExpenseCriteria, TaskCriteria,
};
pub use text::{Searchable, TextMatcher};
