//! Core domain logic for FarmTrack.
//! This crate is the single source of truth for record invariants, list
//! filtering and dashboard figures.

pub mod config;
pub mod dates;
pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;
pub mod stats;
pub mod weather;

pub use config::{ConfigError, FarmConfig};
pub use dates::{Clock, DateInterval, MonthCursor};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::amount::Amount;
pub use model::crop::{Crop, CropPatch, CropStatus, NewCrop};
pub use model::display::{BadgeVariant, Describe, DisplayMeta};
pub use model::expense::{Expense, ExpenseCategory, ExpensePatch, NewExpense};
pub use model::task::{CropRef, CropResolution, NewTask, Priority, Task, TaskPatch, TaskType};
pub use model::validation::ValidationError;
pub use model::RecordId;
pub use query::{CropCriteria, ExpenseCriteria, TaskBucket, TaskCriteria};
pub use repo::{CollectionStore, ErrorKind, MemoryStore, RepoError, RepoResult, SqliteStore};
pub use service::{CropService, DashboardService, ExpenseService, TaskService};
pub use stats::{DashboardSummary, TaskCounts};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
